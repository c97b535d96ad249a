use super::icon::{paint_glyph_strokes, GlyphTexture};
use super::retro_ui::{configure_text_styles, configure_visuals, current_palette, RetroPalette};
use crate::config::{get_settings, Settings};
use crate::core::geometry::{Point, Rect, Size};
use crate::core::panel::TerminalPanel;
use crate::core::transcript::PROMPT;
use crate::core::viewport::{IconHit, IconLimits, PanelWatch};
use eframe::egui::{
    self, Context, CursorIcon, Id, Key, LayerId, Order, RichText, ScrollArea, TextEdit,
    TextStyle,
};

/// Inset of the transcript from the panel edge. The icon ignores it.
pub const PANEL_PADDING: f32 = 16.0;

pub fn configure_native_context(ctx: &Context) {
    configure_visuals(ctx);
    configure_text_styles(ctx);
}

pub struct TermlinkNativeApp {
    panel: TerminalPanel,
    watch: PanelWatch,
    glyph: GlyphTexture,
    input_id: Id,
}

impl TermlinkNativeApp {
    pub fn new(ctx: &Context) -> Self {
        Self::with_settings(ctx, &get_settings())
    }

    pub fn with_settings(ctx: &Context, settings: &Settings) -> Self {
        let mut panel = TerminalPanel::new(
            settings.welcome_message.clone(),
            settings.icon_sizing(IconLimits::PIXELS),
            IconLimits::PIXELS,
        );
        let repaint = ctx.clone();
        panel.on_change(Box::new(move |_| repaint.request_repaint()));
        Self {
            panel,
            watch: PanelWatch::default(),
            glyph: GlyphTexture::default(),
            input_id: Id::new("termlink_input"),
        }
    }

    fn handle_pointer(&mut self, ctx: &Context, panel_rect: egui::Rect) {
        let (hover, delta, pressed, released) = ctx.input(|i| {
            (
                i.pointer.hover_pos(),
                i.pointer.delta(),
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
            )
        });
        let Some(pos) = hover.filter(|p| panel_rect.contains(*p)) else {
            self.panel.pointer_left();
            return;
        };
        let local = to_panel_point(panel_rect, pos);
        if pressed {
            self.panel.pointer_down(local);
        }
        if delta != egui::Vec2::ZERO {
            self.panel.pointer_moved(local, Point::new(delta.x, delta.y));
        }
        if released {
            self.panel.pointer_released();
        }

        let hit = self.panel.viewport().hit(local);
        if let Some(cursor) = cursor_for(hit, self.panel.viewport().is_dragging()) {
            ctx.output_mut(|o| o.cursor_icon = cursor);
        }
    }

    fn draw_transcript(&mut self, ui: &mut egui::Ui, palette: &RetroPalette) {
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .stick_to_bottom(true)
            .drag_to_scroll(false)
            .show(ui, |ui| {
                for line in self.panel.session().transcript().lines() {
                    ui.label(RichText::new(line).monospace().color(palette.fg));
                }
                ui.add_space(4.0);
                ui.horizontal(|ui| {
                    ui.label(RichText::new(PROMPT).monospace().color(palette.dim));
                    let mut buffer = self.panel.session().input().to_string();
                    let response = ui.add(
                        TextEdit::singleline(&mut buffer)
                            .id(self.input_id)
                            .frame(false)
                            .font(TextStyle::Monospace)
                            .text_color(palette.fg)
                            .desired_width(f32::INFINITY),
                    );
                    if response.changed() {
                        self.panel.set_input(buffer);
                    }
                    if response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
                        self.panel.submit();
                        response.request_focus();
                    } else if ui.memory(|m| m.focused().is_none()) {
                        response.request_focus();
                    }
                });
                // Space for the icon so the prompt is not hidden under it.
                ui.add_space(self.panel.viewport().icon().size.height);
            });
    }

    fn draw_icon(&mut self, ctx: &Context, panel_rect: egui::Rect, palette: &RetroPalette) {
        let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("termlink_icon")));
        let viewport = self.panel.viewport();
        let icon_rect = to_screen_rect(panel_rect, viewport.icon());
        let handle_rect = viewport.handle().map(|h| to_screen_rect(panel_rect, h));

        match self.glyph.get(ctx) {
            Some(texture) => {
                let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
                painter.image(texture.id(), icon_rect, uv, palette.glyph);
            }
            None => paint_glyph_strokes(&painter, icon_rect, palette.glyph),
        }
        if let Some(handle) = handle_rect {
            painter.rect_filled(handle, 0.0, palette.handle);
        }
    }
}

impl eframe::App for TermlinkNativeApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let palette = current_palette();
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(palette.bg).inner_margin(0.0))
            .show(ctx, |ui| {
                let panel_rect = ui.max_rect();
                let size = panel_rect.size();
                if let Some(size) = self.watch.observe(Size::new(size.x, size.y)) {
                    self.panel.resize_panel(size);
                }
                self.handle_pointer(ctx, panel_rect);
                let content = egui::UiBuilder::new().max_rect(content_rect(panel_rect));
                ui.allocate_new_ui(content, |ui| {
                    self.draw_transcript(ui, &palette);
                });
                self.draw_icon(ctx, panel_rect, &palette);
            });
    }
}

/// Where the transcript lives inside the panel.
pub fn content_rect(panel_rect: egui::Rect) -> egui::Rect {
    panel_rect.shrink(PANEL_PADDING)
}

pub fn to_panel_point(panel_rect: egui::Rect, pos: egui::Pos2) -> Point {
    Point::new(pos.x - panel_rect.left(), pos.y - panel_rect.top())
}

pub fn to_screen_rect(panel_rect: egui::Rect, rect: Rect) -> egui::Rect {
    egui::Rect::from_min_size(
        egui::pos2(
            panel_rect.left() + rect.origin.x,
            panel_rect.top() + rect.origin.y,
        ),
        egui::vec2(rect.size.width, rect.size.height),
    )
}

pub fn cursor_for(hit: IconHit, dragging: bool) -> Option<CursorIcon> {
    match (hit, dragging) {
        (IconHit::Handle, _) => Some(CursorIcon::ResizeSouthEast),
        (IconHit::Body, _) | (_, true) => Some(CursorIcon::Move),
        (IconHit::Outside, false) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_points_are_relative_to_panel_origin() {
        let panel = egui::Rect::from_min_max(egui::pos2(10.0, 20.0), egui::pos2(810.0, 620.0));
        assert_eq!(
            to_panel_point(panel, egui::pos2(110.0, 70.0)),
            Point::new(100.0, 50.0)
        );
    }

    #[test]
    fn screen_rect_offsets_by_panel_origin() {
        let panel = egui::Rect::from_min_max(egui::pos2(10.0, 20.0), egui::pos2(810.0, 620.0));
        let icon = Rect::new(Point::new(750.0, 550.0), Size::new(50.0, 50.0));
        let screen = to_screen_rect(panel, icon);
        assert_eq!(screen.min, egui::pos2(760.0, 570.0));
        assert_eq!(screen.max, egui::pos2(810.0, 620.0));
    }

    #[test]
    fn transcript_is_inset_from_panel_edges() {
        let panel = egui::Rect::from_min_max(egui::pos2(10.0, 20.0), egui::pos2(810.0, 620.0));
        let content = content_rect(panel);
        assert_eq!(content.min, egui::pos2(26.0, 36.0));
        assert_eq!(content.max, egui::pos2(794.0, 604.0));
    }

    #[test]
    fn transcript_renders_inside_content_rect() {
        let ctx = Context::default();
        let mut app = TermlinkNativeApp::with_settings(&ctx, &Settings::default());
        let palette = current_palette();
        let panel = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(400.0, 300.0));
        let mut inner = egui::Rect::NOTHING;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                let response = ui.allocate_new_ui(
                    egui::UiBuilder::new().max_rect(content_rect(panel)),
                    |ui| {
                        app.draw_transcript(ui, &palette);
                        ui.max_rect()
                    },
                );
                inner = response.inner;
            });
        });
        assert!(content_rect(panel).contains_rect(inner));
    }

    #[test]
    fn cursor_reflects_hit_and_drag() {
        assert_eq!(
            cursor_for(IconHit::Handle, false),
            Some(CursorIcon::ResizeSouthEast)
        );
        assert_eq!(cursor_for(IconHit::Body, false), Some(CursorIcon::Move));
        assert_eq!(cursor_for(IconHit::Outside, true), Some(CursorIcon::Move));
        assert_eq!(cursor_for(IconHit::Outside, false), None);
    }
}
