//! Offscreen glyph rasterization
//!
//! Text is drawn white on black so the red channel alone carries glyph
//! coverage.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use super::layout::TextLayout;
use crate::error::SceneError;

/// RGBA8 pixels, row-major, four bytes per pixel
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphBitmap {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl GlyphBitmap {
    /// All-black bitmap
    pub fn blank(width: u32, height: u32) -> Self {
        let mut rgba = vec![0u8; (width * height * 4) as usize];
        for alpha in rgba.iter_mut().skip(3).step_by(4) {
            *alpha = 255;
        }
        Self { width, height, rgba }
    }

    pub fn red(&self, x: u32, y: u32) -> u8 {
        self.rgba[((y * self.width + x) * 4) as usize]
    }

    /// Paint a white rectangle, clipped to the bitmap
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32) {
        for py in y..(y + h).min(self.height) {
            for px in x..(x + w).min(self.width) {
                let i = ((py * self.width + px) * 4) as usize;
                self.rgba[i..i + 3].copy_from_slice(&[255, 255, 255]);
            }
        }
    }
}

/// Turns a string into a glyph coverage bitmap
pub trait GlyphRasterizer {
    fn rasterize(&self, text: &str, layout: &TextLayout, font_family: &str) -> Result<GlyphBitmap, SceneError>;
}

/// Rasterizer backed by a detached 2D canvas element
pub struct CanvasRasterizer {
    document: Document,
}

impl CanvasRasterizer {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    pub fn from_window() -> Result<Self, SceneError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| SceneError::Canvas("no document available".to_string()))?;
        Ok(Self::new(document))
    }

    fn context(&self, layout: &TextLayout) -> Result<CanvasRenderingContext2d, SceneError> {
        let canvas = self
            .document
            .create_element("canvas")
            .map_err(canvas_error)?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| SceneError::Canvas("element is not a canvas".to_string()))?;
        canvas.set_width(layout.width);
        canvas.set_height(layout.height);

        canvas
            .get_context("2d")
            .map_err(canvas_error)?
            .ok_or_else(|| SceneError::Canvas("2D context unavailable".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SceneError::Canvas("context is not 2D".to_string()))
    }
}

impl GlyphRasterizer for CanvasRasterizer {
    fn rasterize(&self, text: &str, layout: &TextLayout, font_family: &str) -> Result<GlyphBitmap, SceneError> {
        let ctx = self.context(layout)?;
        let (width, height) = (layout.width as f64, layout.height as f64);

        ctx.set_fill_style_str("#000000");
        ctx.fill_rect(0.0, 0.0, width, height);

        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        ctx.set_font(&format!("bold {}px {}", layout.font_px, font_family));
        ctx.set_fill_style_str("#ffffff");

        for line in layout.place_lines(text) {
            ctx.fill_text(line.text, line.center_x as f64, line.middle_y as f64)
                .map_err(canvas_error)?;
        }

        let image = ctx.get_image_data(0.0, 0.0, width, height).map_err(canvas_error)?;

        Ok(GlyphBitmap {
            width: layout.width,
            height: layout.height,
            rgba: image.data().0,
        })
    }
}

fn canvas_error(err: JsValue) -> SceneError {
    SceneError::Canvas(format!("{:?}", err))
}
