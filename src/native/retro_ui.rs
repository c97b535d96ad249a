use crate::config::{current_theme_color, get_settings};
use eframe::egui::{self, Color32, Context, FontFamily, FontId, TextStyle};
use ratatui::style::Color;

pub const BODY_FONT_SIZE: f32 = 16.0;

#[derive(Debug, Clone, Copy)]
pub struct RetroPalette {
    pub fg: Color32,
    pub dim: Color32,
    pub bg: Color32,
    pub panel: Color32,
    pub glyph: Color32,
    pub handle: Color32,
    pub selection_bg: Color32,
}

pub fn color32_from_theme(color: Color) -> Color32 {
    match color {
        Color::Black => Color32::from_rgb(0, 0, 0),
        Color::DarkGray => Color32::from_rgb(85, 85, 85),
        Color::Gray => Color32::from_rgb(170, 170, 170),
        Color::White => Color32::from_rgb(240, 240, 240),
        Color::Red | Color::LightRed => Color32::from_rgb(255, 90, 90),
        Color::Green | Color::LightGreen => Color32::from_rgb(74, 222, 128),
        Color::Yellow | Color::LightYellow => Color32::from_rgb(255, 191, 74),
        Color::Blue | Color::LightBlue => Color32::from_rgb(105, 180, 255),
        Color::Magenta | Color::LightMagenta => Color32::from_rgb(214, 112, 255),
        Color::Cyan | Color::LightCyan => Color32::from_rgb(110, 235, 255),
        Color::Rgb(r, g, b) => Color32::from_rgb(r, g, b),
        Color::Indexed(_) | Color::Reset => Color32::from_rgb(74, 222, 128),
    }
}

fn scale(color: Color32, factor: f32) -> Color32 {
    let [r, g, b, a] = color.to_array();
    Color32::from_rgba_unmultiplied(
        ((r as f32) * factor).clamp(0.0, 255.0) as u8,
        ((g as f32) * factor).clamp(0.0, 255.0) as u8,
        ((b as f32) * factor).clamp(0.0, 255.0) as u8,
        a,
    )
}

pub fn current_palette() -> RetroPalette {
    palette_for(color32_from_theme(current_theme_color()))
}

pub fn palette_for(fg: Color32) -> RetroPalette {
    RetroPalette {
        fg,
        dim: scale(fg, 0.52),
        // gray-900 backdrop
        bg: Color32::from_rgb(17, 24, 39),
        panel: Color32::from_rgb(17, 24, 39),
        glyph: Color32::WHITE,
        handle: Color32::from_white_alpha(128),
        selection_bg: scale(fg, 0.26),
    }
}

pub fn configure_visuals(ctx: &Context) {
    let palette = current_palette();
    let mut visuals = egui::Visuals::dark();
    visuals.override_text_color = Some(palette.fg);
    visuals.window_fill = palette.bg;
    visuals.panel_fill = palette.panel;
    visuals.widgets.noninteractive.bg_fill = palette.panel;
    visuals.widgets.noninteractive.fg_stroke.color = palette.fg;
    visuals.widgets.inactive.bg_fill = palette.bg;
    visuals.widgets.inactive.fg_stroke.color = palette.fg;
    visuals.selection.bg_fill = palette.selection_bg;
    visuals.selection.stroke.color = palette.fg;
    visuals.extreme_bg_color = palette.bg;
    visuals.faint_bg_color = palette.panel;
    ctx.set_visuals(visuals);
}

pub fn configure_text_styles(ctx: &Context) {
    let size = BODY_FONT_SIZE * get_settings().ui_scale();
    let mut style = (*ctx.style()).clone();
    style.text_styles = [
        (TextStyle::Heading, FontId::new(size + 4.0, FontFamily::Monospace)),
        (TextStyle::Body, FontId::new(size, FontFamily::Monospace)),
        (TextStyle::Monospace, FontId::new(size, FontFamily::Monospace)),
        (TextStyle::Button, FontId::new(size, FontFamily::Monospace)),
        (TextStyle::Small, FontId::new(size - 2.0, FontFamily::Monospace)),
    ]
    .into();
    ctx.set_style(style);
}
