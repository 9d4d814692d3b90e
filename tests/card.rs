// tests/card.rs
use image::GenericImageView;

use nc_tracker::api::RankEntry;
use nc_tracker::card::{
    app_icon, decode_data_url, draw_comparison_card, draw_single_card, COMPARE_H, COMPARE_W, SINGLE_H, SINGLE_W,
};

fn user(uid: &str, name: &str, count: u64, place: &str) -> RankEntry {
    RankEntry { uid: uid.into(), name: name.into(), count, place: place.into(), ..Default::default() }
}

#[test]
fn single_card_is_a_png_data_url() {
    let url = draw_single_card(&user("1", "alice", 321, "42"), None).unwrap();
    assert!(url.starts_with("data:image/png;base64,"));

    let png = decode_data_url(&url).unwrap();
    let img = image::load_from_memory(&png).unwrap();
    assert_eq!(img.dimensions(), (SINGLE_W, SINGLE_H));
    assert_eq!((SINGLE_W, SINGLE_H), (500, 220));
}

#[test]
fn comparison_card_dimensions() {
    let a = user("1", "alice", 321, "42");
    let b = user("2", "bob", 99, "0");
    let url = draw_comparison_card(&a, &b, None, None).unwrap();

    let img = image::load_from_memory(&decode_data_url(&url).unwrap()).unwrap();
    assert_eq!(img.dimensions(), (COMPARE_W, COMPARE_H));
    assert_eq!((COMPARE_W, COMPARE_H), (700, 330));
}

#[test]
fn avatar_is_drawn_when_present() {
    let avatar = image::DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(32, 32, image::Rgba([255, 0, 0, 255])));
    let u = user("1", "alice", 1, "1");
    let with = draw_single_card(&u, Some(&avatar)).unwrap();
    let without = draw_single_card(&u, None).unwrap();
    assert_ne!(with, without);
}

#[test]
fn rejects_foreign_data_urls() {
    assert!(decode_data_url("data:image/jpeg;base64,AAAA").is_err());
    assert!(decode_data_url("https://example.com/a.png").is_err());
}

#[test]
fn icon_is_square_rgba() {
    let (rgba, w, h) = app_icon();
    assert_eq!((w, h), (64, 64));
    assert_eq!(rgba.len(), (w * h * 4) as usize);
}
