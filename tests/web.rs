#![cfg(target_arch = "wasm32")]

use particle_christmas_tree::config::TextConfig;
use particle_christmas_tree::text::{generate_text_cloud, CanvasRasterizer, GlyphRasterizer, TextLayout};
use particle_christmas_tree::{clock_text, ParticleTreeScene};
use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlCanvasElement;

wasm_bindgen_test_configure!(run_in_browser);

const SMALL_SCENE: &str = r#"
seed: 42
tree:
  particle_count: 500
trunk:
  line_count: 20
backdrop:
  snow_count: 100
  spiral_count: 200
  cloud_count: 1000
  sky_segments: 16
"#;

fn canvas() -> HtmlCanvasElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<HtmlCanvasElement>()
        .unwrap();
    canvas.set_width(320);
    canvas.set_height(240);
    canvas
}

#[wasm_bindgen_test]
fn canvas_rasterizer_draws_glyphs() {
    let config = TextConfig::default();
    let rasterizer = CanvasRasterizer::from_window().unwrap();
    let bitmap = rasterizer
        .rasterize("HI", &TextLayout::from_config(&config), &config.fallback_font)
        .unwrap();

    assert_eq!(bitmap.width, 1000);
    assert_eq!(bitmap.rgba.len(), 1000 * 300 * 4);
    assert!(bitmap.red(500, 150) > 128 || bitmap.rgba.chunks(4).any(|px| px[0] > 128));
    assert_eq!(bitmap.red(0, 0), 0);

    let cloud = generate_text_cloud(&bitmap, &config, &mut StdRng::seed_from_u64(1));
    assert!(!cloud.is_empty());
}

#[wasm_bindgen_test]
fn scene_runs_before_and_after_text() {
    let mut scene = ParticleTreeScene::with_config(canvas(), SMALL_SCENE).unwrap();
    assert!(!scene.has_text());

    for _ in 0..5 {
        scene.render(1.0 / 60.0);
    }
    assert_eq!(scene.text_progress(), 0.0);

    scene.attach_text(false).unwrap();
    assert!(scene.has_text());
    assert!(scene.attach_text(false).is_err());

    scene.render(10.0);
    assert!(scene.is_text_settled());
    assert_eq!(scene.text_progress(), 1.0);

    scene.resize(640, 480);
    scene.render(1.0 / 60.0);
}

#[wasm_bindgen_test]
fn bad_config_is_rejected() {
    assert!(ParticleTreeScene::with_config(canvas(), "tree:\n  height: -1\n").is_err());
}

#[wasm_bindgen_test]
fn scene_clock_uses_configured_zone() {
    let yaml = format!("{}clock:\n  time_zone: Asia/Tokyo\n  element_id: scene-clock\n", SMALL_SCENE);
    let scene = ParticleTreeScene::with_config(canvas(), &yaml).unwrap();
    assert_eq!(scene.clock_time_zone(), "Asia/Tokyo");

    // a second boundary can fall between the two reads
    let matched = (0..3).any(|_| scene.clock_text().unwrap() == clock_text("Asia/Tokyo").unwrap());
    assert!(matched);

    assert!(scene.update_clock().is_err());

    let document = web_sys::window().unwrap().document().unwrap();
    let element = document.create_element("div").unwrap();
    element.set_id("scene-clock");
    document.document_element().unwrap().append_child(&element).unwrap();

    scene.update_clock().unwrap();
    assert_eq!(element.text_content().unwrap().len(), 8);
    element.remove();
}

#[wasm_bindgen_test]
fn clock_reads_hms() {
    let text = clock_text("America/New_York").unwrap();
    assert_eq!(text.len(), 8);
    assert_eq!(&text[2..3], ":");
    assert_eq!(&text[5..6], ":");
}
