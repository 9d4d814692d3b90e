// benches/clist_parse.rs
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use nc_tracker::specs::{clist, weekly};

/// A listing page shaped like clist.by's, `rows` problems long.
fn synthetic_clist(rows: usize) -> String {
    let mut doc = String::from("<table><thead><tr><th>Date</th><th>Rating</th><th>Problem</th></tr></thead><tbody>");
    for i in 0..rows {
        let contest = 80_000 + i / 6;
        let letter = (b'A' + (i % 6) as u8) as char;
        doc.push_str(&format!(
            "<tr><td>2024-05-{d:02}</td><td>{r}</td>\
             <td><a href=\"https://ac.nowcoder.com/acm/contest/{contest}/{letter}\">Problem {i}</a></td>\
             <td><a href=\"https://clist.by/standings/nowcoder-{contest}/\">Round {contest}</a></td></tr>",
            d = i % 28 + 1,
            r = 800 + (i % 20) * 100,
        ));
    }
    doc.push_str("</tbody></table>");
    doc
}

fn synthetic_weekly_list(rounds: usize) -> String {
    let mut doc = String::new();
    for i in 0..rounds {
        doc.push_str(&format!(
            "<div class=\"platform-item\"><h4>牛客周赛 Round {n}</h4><a href=\"/acm/contest/{id}\">进入</a></div>",
            n = 100 + i,
            id = 90_000 + i,
        ));
    }
    doc
}

fn bench_clist(c: &mut Criterion) {
    let doc = synthetic_clist(100);

    c.bench_function("clist_parse_page", |b| {
        b.iter(|| {
            let items = clist::parse_problems(black_box(&doc));
            black_box(items.len())
        })
    });

    c.bench_function("clist_parse_dedup_table", |b| {
        b.iter(|| {
            let mut items = clist::parse_problems(black_box(&doc));
            items.extend(clist::parse_problems(black_box(&doc)));
            let items = clist::dedup_items(items);
            black_box(clist::markdown_table(&items).len())
        })
    });
}

fn bench_weekly(c: &mut Criterion) {
    let doc = synthetic_weekly_list(30);

    c.bench_function("weekly_contest_list", |b| {
        b.iter(|| {
            let list = weekly::parse_contest_list(black_box(&doc));
            black_box(list.len())
        })
    });
}

criterion_group!(benches, bench_clist, bench_weekly);
criterion_main!(benches);
