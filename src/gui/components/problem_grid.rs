// src/gui/components/problem_grid.rs
//
// Contest / knowledge-point rows with one coloured cell per problem.
// Colours come from the shell's highlight for the view; rows are what the
// page reported through `App::set_problem_rows`.

use eframe::egui::{self, Color32, RichText};
use egui_extras::{Column, TableBuilder};

use super::color32;
use crate::api::Problem;
use crate::core::sanitize::truncate_chars;
use crate::gui::app::App;
use crate::router::ProblemsView;
use crate::shell::{self, difficulty_info, CellStatus, GridRow};

const CELLS_PER_LINE: usize = 4;
const LINE_H: f32 = 24.0;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProblemCell {
    pub id: String,
    pub title: String,
    pub link: String,
    pub difficulty: Option<u32>,
}

impl From<&Problem> for ProblemCell {
    fn from(p: &Problem) -> Self {
        Self {
            id: p.problem_id.clone(),
            title: p.title.clone(),
            link: s!(p.link()),
            difficulty: p.difficulty_score(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProblemRow {
    pub label: String,
    /// Contest page, empty for knowledge-point rows.
    pub link: String,
    pub kp: Option<String>,
    pub cells: Vec<ProblemCell>,
}

pub fn grid_rows(rows: &[ProblemRow]) -> Vec<GridRow> {
    rows.iter()
        .map(|r| GridRow {
            label: r.label.clone(),
            problem_ids: r.cells.iter().map(|c| c.id.clone()).filter(|id| !id.is_empty()).collect(),
            kp: r.kp.clone(),
        })
        .collect()
}

/// Knowledge point → rows of at most `per_row` problems.
pub fn chunk_kp(kp: &str, problems: &[Problem], per_row: usize) -> Vec<ProblemRow> {
    problems
        .chunks(per_row.max(1))
        .enumerate()
        .map(|(i, chunk)| ProblemRow {
            label: if i == 0 { s!(kp) } else { s!() },
            link: s!(),
            kp: Some(s!(kp)),
            cells: chunk.iter().map(ProblemCell::from).collect(),
        })
        .collect()
}

fn letter(i: usize) -> String {
    char::from_u32('A' as u32 + (i % 26) as u32).map(String::from).unwrap_or_default()
}

pub fn draw(ui: &mut egui::Ui, app: &App, view: ProblemsView, letters: bool) {
    let Some(rows) = app.views.problem_rows.get(&view) else {
        ui.label("暂无数据");
        return;
    };
    if rows.is_empty() {
        ui.label("暂无数据");
        return;
    }

    let highlight = app.tracker.highlights.get(&view);
    let channel_put = app.state().channel_put.clone();
    let heights: Vec<f32> = rows
        .iter()
        .map(|r| r.cells.len().div_ceil(CELLS_PER_LINE).max(1) as f32 * LINE_H)
        .collect();

    TableBuilder::new(ui)
        .id_salt(("problem_grid", view))
        .striped(true)
        .vscroll(false)
        .column(Column::initial(220.0).resizable(true).clip(true))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui| { ui.strong(if view == ProblemsView::Practice { "知识点" } else { "Contest" }); });
            header.col(|ui| { ui.strong("Problems"); });
        })
        .body(|body| {
            body.heterogeneous_rows(heights.into_iter(), |mut row| {
                let i = row.index();
                let r = &rows[i];
                let all_ac = highlight.and_then(|h| h.all_ac.get(i).copied()).unwrap_or(false);

                row.col(|ui| {
                    let text = if all_ac { join!("✔ ", &r.label) } else { r.label.clone() };
                    if r.link.is_empty() {
                        ui.label(RichText::new(text).strong());
                    } else {
                        ui.hyperlink_to(text, shell::contest_link(&r.link, &channel_put));
                    }
                });
                row.col(|ui| {
                    ui.horizontal_wrapped(|ui| {
                        for (ci, cell) in r.cells.iter().enumerate() {
                            let status = highlight.and_then(|h| h.status(&cell.id));
                            let prefix = if letters { join!(&letter(ci), ". ") } else { s!() };
                            draw_cell(ui, cell, status, &prefix, &channel_put);
                        }
                    });
                });
            });
        });
}

fn draw_cell(ui: &mut egui::Ui, cell: &ProblemCell, status: Option<CellStatus>, prefix: &str, channel_put: &str) {
    let (fill, fg) = match status {
        Some(CellStatus::Ac) => (color32("#52c41a"), Color32::WHITE),
        Some(CellStatus::RivalAc) => (color32("#faad14"), Color32::WHITE),
        _ => (ui.visuals().faint_bg_color, ui.visuals().text_color()),
    };

    let mut text = RichText::new(join!(prefix, &truncate_chars(&cell.title, 20))).color(fg);
    if let Some(score) = cell.difficulty {
        text = text.strong();
        let info = difficulty_info(score);
        ui.label(RichText::new("●").color(color32(info.color)));
    }

    let resp = ui.add(egui::Button::new(text).fill(fill)).on_hover_ui(|ui| {
        ui.label(&cell.title);
        if let Some(score) = cell.difficulty {
            let info = difficulty_info(score);
            ui.label(format!("{} ({score})", info.label));
        }
    });
    if resp.clicked() && !cell.link.is_empty() {
        ui.ctx().open_url(egui::OpenUrl::new_tab(shell::problem_link(&cell.link, channel_put)));
    }
}
