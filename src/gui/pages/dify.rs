// src/gui/pages/dify.rs
//
// AI assistant. The webview embed becomes a link that opens in the browser.

use eframe::egui;

use super::Page;
use crate::gui::app::App;
use crate::router::Tab;
use crate::store::DifyConfig;

pub struct DifyPage;
pub static PAGE: DifyPage = DifyPage;

impl Page for DifyPage {
    fn tab(&self) -> Tab { Tab::Ai }
    fn title(&self) -> &'static str { "AI 助手" }

    fn on_enter(&self, app: &mut App) {
        app.views.dify = DifyConfig::load();
        app.views.dify_input = app.views.dify.url.clone();
    }

    fn draw(&self, ui: &mut egui::Ui, app: &mut App) {
        match app.views.dify.normalized_url() {
            Some(url) => {
                ui.hyperlink_to("打开 AI 助手", &url);
                ui.weak(url);
            }
            None => { ui.label("尚未配置 AI 助手地址"); }
        }
        ui.separator();

        ui.horizontal(|ui| {
            ui.label("地址");
            ui.add(egui::TextEdit::singleline(&mut app.views.dify_input).desired_width(360.0));
            if ui.button("保存").clicked() {
                let cfg = DifyConfig { url: s!(app.views.dify_input.trim()) };
                if cfg.normalized_url().is_none() {
                    app.status("地址需以 http 开头");
                } else if app.report("保存配置", cfg.save()).is_some() {
                    app.views.dify = cfg;
                }
            }
        });
    }
}
