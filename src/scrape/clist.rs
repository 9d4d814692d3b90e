// src/scrape/clist.rs
use std::error::Error;
use std::fs;
use std::path::Path;
use std::thread;
use std::time::Duration;

use crate::config::options::ScrapeOptions;
use crate::core::Http;
use crate::progress::Progress;
use crate::specs::clist::{self, ClistItem, ClistOutput};

/// Page through clist.by until a page comes back empty or `clist_max_pages` is hit.
///
/// Page 1 failing is an error; a later failure ends the crawl with what was
/// collected so far.
pub fn collect_clist(
    opts: &ScrapeOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Result<ClistOutput, Box<dyn Error>> {
    let http = Http::new()?;
    let max = opts.clist_max_pages.max(1);

    if let Some(p) = progress.as_deref_mut() {
        p.begin(max as usize);
    }

    let mut all: Vec<ClistItem> = Vec::new();
    for page in 1..=max {
        let url = clist::page_url(page);
        let doc = match http.get_text(&url) {
            Ok(d) => d,
            Err(e) if page == 1 => return Err(e),
            Err(e) => {
                loge!("Clist: page {} failed, stopping: {}", page, e);
                if let Some(p) = progress.as_deref_mut() {
                    p.item_failed(&format!("page {page}"));
                }
                break;
            }
        };

        let items = clist::parse_problems(&doc);
        logf!("Clist: page {} → {} row(s)", page, items.len());
        if items.is_empty() && page > 1 {
            break;
        }
        if let Some(p) = progress.as_deref_mut() {
            p.item_done(&format!("page {page}: {} problem(s)", items.len()));
        }
        all.extend(items);

        if page < max {
            thread::sleep(Duration::from_millis(opts.clist_delay_ms));
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    Ok(ClistOutput::new(clist::dedup_items(all), max))
}

pub fn save_clist(out: &ClistOutput, path: &Path) -> Result<(), Box<dyn Error>> {
    fs::write(path, serde_json::to_string_pretty(out)?)?;
    logf!("Clist: saved {} item(s) to {}", out.items.len(), path.display());
    Ok(())
}

fn load_clist(input: &Path) -> Result<ClistOutput, Box<dyn Error>> {
    let text = fs::read_to_string(input)
        .map_err(|e| format!("cannot read {}: {e}", input.display()))?;
    Ok(serde_json::from_str(&text)?)
}

/// Markdown link table from a saved crawl. Returns the number of rows written.
pub fn generate_table(input: &Path, output: &Path) -> Result<usize, Box<dyn Error>> {
    let data = load_clist(input)?;
    fs::write(output, clist::markdown_table(&data.items))?;
    logf!("Clist: table with {} row(s) → {}", data.items.len(), output.display());
    Ok(data.items.len())
}

/// CSV sheet of the saved crawl, limited to contests matching `keywords`.
/// Nothing is written when no item matches. Returns the number of rows.
pub fn generate_sheet(input: &Path, output: &Path, keywords: &[&str]) -> Result<usize, Box<dyn Error>> {
    let data = load_clist(input)?;
    let picked = clist::filter_by_contest(&data.items, keywords);
    if picked.is_empty() {
        logf!("Clist: no item matches {:?}, sheet not written", keywords);
        return Ok(0);
    }
    fs::write(output, clist::sheet_csv(&picked)?)?;
    logf!("Clist: sheet with {} row(s) → {}", picked.len(), output.display());
    Ok(picked.len())
}
