// src/gui/pages/profile.rs
//
// Rank and check-in record of the target user, plus the shareable card.

use std::error::Error;

use eframe::egui;

use super::Page;
use crate::card;
use crate::events::Event;
use crate::gui::app::App;
use crate::router::Tab;

pub struct ProfilePage;
pub static PAGE: ProfilePage = ProfilePage;

fn card_texture(ctx: &egui::Context, data_url: &str) -> Result<egui::TextureHandle, Box<dyn Error>> {
    let png = card::decode_data_url(data_url)?;
    let rgba = image::load_from_memory(&png)?.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    let img = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
    Ok(ctx.load_texture("profile_card", img, egui::TextureOptions::LINEAR))
}

fn make_card(ui: &egui::Ui, app: &mut App) {
    let Some(user) = app.views.profile_rank.clone() else {
        app.status("用户未找到");
        return;
    };
    let rival_uid = s!(app.state().gui.rival_uid.trim());
    let rival = if rival_uid.is_empty() { None } else { app.api().fetch_user_data(&rival_uid) };

    let made = card::user_card(app.api().http(), &user, rival.as_ref());
    let Some(data_url) = app.report("生成卡片", made) else { return };
    match card_texture(ui.ctx(), &data_url) {
        Ok(tex) => app.views.card_texture = Some(tex),
        Err(e) => loge!("Card: texture failed: {}", e),
    }
    let data_url_len = data_url.len();
    app.views.card_data_url = data_url;
    app.tracker.bus.emit(&Event::CardGenerated { data_url_len });
}

impl Page for ProfilePage {
    fn tab(&self) -> Tab { Tab::Profile }
    fn title(&self) -> &'static str { "个人" }

    fn on_enter(&self, app: &mut App) {
        let uid = app.target_uid();
        if uid.is_empty() {
            app.views.profile_rank = None;
            app.views.profile_checkin = None;
            return;
        }
        app.views.profile_rank = app.api().fetch_user_data(&uid);
        app.views.profile_checkin = Some(app.api().fetch_user_checkin_data(&uid));
    }

    fn draw(&self, ui: &mut egui::Ui, app: &mut App) {
        ui.horizontal(|ui| {
            ui.label("UID");
            ui.add(egui::TextEdit::singleline(&mut app.tracker.state.gui.search_uid).desired_width(120.0));
            ui.label("对手");
            ui.add(egui::TextEdit::singleline(&mut app.tracker.state.gui.rival_uid).desired_width(120.0));
            if ui.button("查询").clicked() {
                app.save_prefs();
                self.on_enter(app);
            }
        });
        ui.separator();

        match &app.views.profile_rank {
            Some(r) => {
                ui.heading(format!("{} ({})", r.name, r.uid));
                ui.label(format!("做题 {} · 排名 {}", r.count, r.rank_label()));
            }
            None => {
                ui.label(if app.target_uid().is_empty() { "登录或输入 UID" } else { "用户未找到" });
                return;
            }
        }
        if let Some(c) = &app.views.profile_checkin {
            ui.label(format!("打卡 {} 天 · 连续 {} 天 · 打卡排名 {}", c.count, c.continue_days, c.rank_label()));
        }
        ui.separator();

        if ui.button("生成分享卡片").clicked() {
            make_card(ui, app);
        }
        if let Some(tex) = &app.views.card_texture {
            ui.image((tex.id(), tex.size_vec2()));
            if ui.button("复制 data URL").clicked() {
                ui.ctx().copy_text(app.views.card_data_url.clone());
            }
        }
    }
}
