// src/gui/components/pager.rs
use eframe::egui;

/// `‹ page/total ›` with the record range. Returns true when `page` changed.
pub fn draw(ui: &mut egui::Ui, page: &mut u32, total_items: u64, page_size: u32) -> bool {
    let size = u64::from(page_size.max(1));
    let pages = total_items.div_ceil(size).max(1) as u32;
    let before = *page;

    ui.horizontal(|ui| {
        if ui.add_enabled(*page > 1, egui::Button::new("‹")).clicked() {
            *page -= 1;
        }
        ui.label(format!("{}/{}", page, pages));
        if ui.add_enabled(*page < pages, egui::Button::new("›")).clicked() {
            *page += 1;
        }
        if total_items > 0 {
            let start = u64::from(*page - 1) * size + 1;
            let end = (u64::from(*page) * size).min(total_items);
            ui.label(format!("显示 {start}-{end} 共 {total_items} 条记录"));
        } else {
            ui.label("共 0 条记录");
        }
    });
    *page != before
}
