use anyhow::{anyhow, Context as _, Result};
use eframe::egui::{self, ColorImage, Context, IconData, TextureHandle, TextureOptions};

/// Terminal glyph: a chevron over an underscore, stroked white on a 24 unit grid.
pub const TERMINAL_GLYPH_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24" fill="none" stroke="#ffffff" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><polyline points="4 17 10 11 4 5"/><line x1="12" x2="20" y1="19" y2="19"/></svg>"##;

/// Texture side. The icon never grows past 100px, so one raster covers every size.
pub const GLYPH_TEXTURE_SIDE: u32 = 128;
pub const WINDOW_ICON_SIDE: u32 = 64;

#[derive(Debug, Clone)]
pub struct RasterGlyph {
    pub side: u32,
    /// Premultiplied RGBA, row-major.
    pub rgba: Vec<u8>,
}

impl RasterGlyph {
    pub fn to_color_image(&self) -> ColorImage {
        ColorImage::from_rgba_premultiplied([self.side as usize; 2], &self.rgba)
    }

    pub fn to_icon_data(&self) -> IconData {
        IconData {
            rgba: unpremultiply(&self.rgba),
            width: self.side,
            height: self.side,
        }
    }
}

pub fn rasterize_glyph(side: u32) -> Result<RasterGlyph> {
    let tree = usvg::Tree::from_str(TERMINAL_GLYPH_SVG, &usvg::Options::default())
        .context("parsing terminal glyph")?;
    let mut pixmap = resvg::tiny_skia::Pixmap::new(side, side)
        .ok_or_else(|| anyhow!("cannot rasterize glyph at {side}x{side}"))?;
    let size = tree.size();
    let transform = resvg::tiny_skia::Transform::from_scale(
        side as f32 / size.width(),
        side as f32 / size.height(),
    );
    resvg::render(&tree, transform, &mut pixmap.as_mut());
    Ok(RasterGlyph {
        side,
        rgba: pixmap.take(),
    })
}

fn unpremultiply(rgba: &[u8]) -> Vec<u8> {
    rgba.chunks_exact(4)
        .flat_map(|px| {
            let a = px[3];
            if a == 0 {
                return [0, 0, 0, 0];
            }
            let un = |c: u8| ((c as u32 * 255 + a as u32 / 2) / a as u32).min(255) as u8;
            [un(px[0]), un(px[1]), un(px[2]), a]
        })
        .collect()
}

/// Lazily uploaded glyph texture.
#[derive(Default)]
pub struct GlyphTexture {
    handle: Option<TextureHandle>,
    failed: bool,
}

impl GlyphTexture {
    pub fn get(&mut self, ctx: &Context) -> Option<&TextureHandle> {
        if self.handle.is_none() && !self.failed {
            match rasterize_glyph(GLYPH_TEXTURE_SIDE) {
                Ok(glyph) => {
                    self.handle = Some(ctx.load_texture(
                        "termlink-glyph",
                        glyph.to_color_image(),
                        TextureOptions::LINEAR,
                    ));
                }
                Err(err) => {
                    log::error!("terminal glyph unavailable: {err:#}");
                    self.failed = true;
                }
            }
        }
        self.handle.as_ref()
    }
}

pub fn window_icon() -> Option<IconData> {
    match rasterize_glyph(WINDOW_ICON_SIDE) {
        Ok(glyph) => Some(glyph.to_icon_data()),
        Err(err) => {
            log::warn!("no window icon: {err:#}");
            None
        }
    }
}

/// Fallback when the glyph cannot be rasterized: draw the same strokes directly.
pub fn paint_glyph_strokes(painter: &egui::Painter, rect: egui::Rect, color: egui::Color32) {
    let unit = rect.width().min(rect.height()) / 24.0;
    let at = |x: f32, y: f32| rect.min + egui::vec2(x * unit, y * unit);
    let stroke = egui::Stroke::new(2.0 * unit, color);
    painter.line_segment([at(4.0, 17.0), at(10.0, 11.0)], stroke);
    painter.line_segment([at(10.0, 11.0), at(4.0, 5.0)], stroke);
    painter.line_segment([at(12.0, 19.0), at(20.0, 19.0)], stroke);
}
