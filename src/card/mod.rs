// src/card/mod.rs
//
// Shareable user cards rendered to PNG data URLs.

use std::error::Error;
use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{DynamicImage, ImageFormat};

use crate::api::RankEntry;
use crate::config::consts::NOWCODER_UI_BASE;
use crate::core::Http;

pub mod canvas;
pub mod font;

use canvas::{hex, Align, Canvas, Color};

pub const SINGLE_W: u32 = 500;
pub const SINGLE_H: u32 = 220;
pub const COMPARE_W: u32 = 700;
pub const COMPARE_H: u32 = 330;

const WHITE: Color = [255, 255, 255];
const PLACEHOLDER: &str = "#ccc";
const WIN: &str = "#76FF03";
const LOSE: &str = "#FF5252";

const DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// White card with a gradient header, avatar, name, solved count and rank.
pub fn draw_single_card(user: &RankEntry, avatar: Option<&DynamicImage>) -> Result<String, Box<dyn Error>> {
    let mut c = Canvas::new(SINGLE_W, SINGLE_H);
    c.fill_rect(0, 0, SINGLE_W, SINGLE_H, hex("#FFFFFF"));
    c.fill_hgradient(0, 80, hex("#283E51"), hex("#4B79A1"));

    let size = 90;
    let (cx, cy) = (30.0 + size as f32 / 2.0, 80.0);
    match avatar {
        Some(img) => c.draw_circular_image(img, 30, 80 - size / 2, size),
        None => c.fill_circle(cx, cy, size as f32 / 2.0, hex(PLACEHOLDER)),
    }

    c.text((size + 50) as i64, 55, &user.name, 3, WHITE, 1.0, Align::Left);

    let ink = hex("#333333");
    let value_x = (SINGLE_W / 2 + 40) as i64;
    c.text(50, 160, "SOLVED", 2, ink, 1.0, Align::Left);
    c.text(value_x, 160, "RANK", 2, ink, 1.0, Align::Left);

    let blue = hex("#007BFF");
    c.text(50, 195, &user.count.to_string(), 4, blue, 1.0, Align::Left);
    c.text(value_x, 195, &user.rank_label(), 4, blue, 1.0, Align::Left);

    encode_data_url(c)
}

/// Side-by-side "VS" card. Each stat is green when it is at least as good as
/// the other user's, red otherwise.
pub fn draw_comparison_card(
    u1: &RankEntry,
    u2: &RankEntry,
    a1: Option<&DynamicImage>,
    a2: Option<&DynamicImage>,
) -> Result<String, Box<dyn Error>> {
    let mut c = Canvas::new(COMPARE_W, COMPARE_H);
    c.fill_rounded_diagonal(30, hex("#302b63"), hex("#24243e"));

    let mid_y = (COMPARE_H / 2) as i64 + (font::GLYPH_H * 8 / 2) as i64;
    c.text((COMPARE_W / 2) as i64, mid_y, "VS", 8, WHITE, 0.8, Align::Center);

    draw_segment(&mut c, u1, u2, a1, Side::Left);
    draw_segment(&mut c, u2, u1, a2, Side::Right);

    encode_data_url(c)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

fn draw_segment(c: &mut Canvas, me: &RankEntry, other: &RankEntry, avatar: Option<&DynamicImage>, side: Side) {
    let size = 80u32;
    let avatar_x = match side {
        Side::Left => 30,
        Side::Right => COMPARE_W - 30 - size,
    };
    let (cx, cy, r) = (avatar_x as f32 + size as f32 / 2.0, 60.0, size as f32 / 2.0);
    match avatar {
        Some(img) => {
            c.draw_circular_image(img, avatar_x, 60 - size / 2, size);
            c.stroke_circle(cx, cy, r, 4.0, WHITE);
        }
        None => c.fill_circle(cx, cy, r, hex(PLACEHOLDER)),
    }

    let (name_x, align) = match side {
        Side::Left => (30i64, Align::Left),
        Side::Right => ((COMPARE_W - 30) as i64, Align::Right),
    };
    c.text(name_x, 140, &me.name, 3, WHITE, 1.0, align);

    let stats_y = 190i64;
    c.text(name_x, stats_y, "SOLVED", 2, WHITE, 0.85, align);
    c.text(name_x, stats_y + 50, "RANK", 2, WHITE, 0.85, align);

    let count_color = if me.count >= other.count { WIN } else { LOSE };
    c.text(name_x, stats_y + 25, &me.count.to_string(), 4, hex(count_color), 1.0, align);

    let rank_color = if me.rank_value() <= other.rank_value() { WIN } else { LOSE };
    c.text(name_x, stats_y + 75, &me.rank_label(), 4, hex(rank_color), 1.0, align);
}

fn encode_data_url(c: Canvas) -> Result<String, Box<dyn Error>> {
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(c.img).write_to(&mut buf, ImageFormat::Png)?;
    Ok(join!(DATA_URL_PREFIX, &STANDARD.encode(buf.get_ref())))
}

/// Raw PNG bytes of a data URL produced above.
pub fn decode_data_url(data_url: &str) -> Result<Vec<u8>, Box<dyn Error>> {
    let b64 = data_url
        .strip_prefix(DATA_URL_PREFIX)
        .ok_or("not a PNG data URL")?;
    Ok(STANDARD.decode(b64)?)
}

/// Download and decode an avatar. `None` makes the card fall back to the placeholder.
pub fn fetch_avatar(http: &Http, user: &RankEntry) -> Option<DynamicImage> {
    let url = user.avatar_url(NOWCODER_UI_BASE);
    if url.is_empty() {
        return None;
    }
    let decoded = http
        .get_bytes(&url)
        .and_then(|bytes| image::load_from_memory(&bytes).map_err(|e| e.into()));
    match decoded {
        Ok(img) => Some(img),
        Err(e) => {
            loge!("Card: avatar {} unavailable: {}", url, e);
            None
        }
    }
}

/// Single card for one user, comparison card when a rival is given.
/// Avatars are fetched here; a missing one falls back to the placeholder.
pub fn user_card(http: &Http, user: &RankEntry, rival: Option<&RankEntry>) -> Result<String, Box<dyn Error>> {
    let a1 = fetch_avatar(http, user);
    match rival {
        Some(r) => {
            let a2 = fetch_avatar(http, r);
            draw_comparison_card(user, r, a1.as_ref(), a2.as_ref())
        }
        None => draw_single_card(user, a1.as_ref()),
    }
}

/// Window icon: the comparison gradient with a white check.
pub fn app_icon() -> (Vec<u8>, u32, u32) {
    let size = 64;
    let mut c = Canvas::new(size, size);
    c.fill_rounded_diagonal(12, hex("#302b63"), hex("#24243e"));
    c.fill_circle(32.0, 32.0, 18.0, hex("#4B79A1"));
    c.text(32, 32 + 14, "AC", 4, WHITE, 1.0, Align::Center);
    (c.img.into_raw(), size, size)
}
