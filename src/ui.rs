use ratatui::{
    layout::{Alignment, Rect as CellRect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph},
    Frame, Terminal,
};

use crate::config::current_theme_color;
use crate::core::geometry::Rect;
use crate::core::panel::TerminalPanel;
use crate::core::transcript::{Session, PROMPT};
use crate::core::viewport::Viewport;

pub type Term = Terminal<ratatui::backend::CrosstermBackend<std::io::Stdout>>;

// ── Padding ───────────────────────────────────────────────────────────────────
const PAD: u16 = 1;

/// Shrink a rect by PAD cells on each side.
pub fn pad(area: CellRect) -> CellRect {
    let h = PAD.min(area.width / 2);
    let v = PAD.min(area.height / 2);
    CellRect {
        x: area.x + h,
        y: area.y + v,
        width: area.width.saturating_sub(h * 2),
        height: area.height.saturating_sub(v * 2),
    }
}

// ── Color helpers ─────────────────────────────────────────────────────────────

pub fn normal_style() -> Style { Style::default().fg(current_theme_color()) }
pub fn sel_style()    -> Style { Style::default().fg(Color::Black).bg(current_theme_color()).add_modifier(Modifier::BOLD) }
pub fn glyph_style()  -> Style { Style::default().fg(Color::White).add_modifier(Modifier::BOLD) }

// ── Panel ─────────────────────────────────────────────────────────────────────

pub fn render_panel(f: &mut Frame, panel: &TerminalPanel) {
    let area = f.area();
    let inner = pad(area);
    let lines = transcript_lines(panel.session(), inner.width as usize, inner.height as usize);
    f.render_widget(Paragraph::new(lines).style(normal_style()), inner);
    render_icon(f, area, panel.viewport());
}

/// Splits `text` into rows of at most `width` characters. Empty text is one empty row.
pub fn wrap_chars(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return vec![String::new()];
    }
    chars.chunks(width).map(|c| c.iter().collect()).collect()
}

/// The tail of the transcript plus the prompt, wrapped to `width` and at most `rows` lines.
pub fn transcript_lines(session: &Session, width: usize, rows: usize) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = session
        .transcript()
        .lines()
        .iter()
        .flat_map(|l| wrap_chars(l, width))
        .map(Line::from)
        .collect();

    let mut prompt = wrap_chars(&format!("{PROMPT}{}", session.input()), width);
    let last = prompt.pop().unwrap_or_default();
    lines.extend(prompt.into_iter().map(Line::from));
    let cursor = Span::styled("_", sel_style());
    if last.chars().count() < width.max(1) {
        lines.push(Line::from(vec![Span::raw(last), cursor]));
    } else {
        lines.push(Line::from(last));
        lines.push(Line::from(cursor));
    }

    let skip = lines.len().saturating_sub(rows);
    lines.split_off(skip)
}

fn render_icon(f: &mut Frame, area: CellRect, viewport: &Viewport) {
    let Some(icon) = to_cell_rect(area, viewport.icon()) else {
        return;
    };
    f.render_widget(Clear, icon);
    let glyph = Paragraph::new(">_").style(glyph_style()).alignment(Alignment::Center);
    if icon.height < 3 || icon.width < 4 {
        // Too small for a border and the glyph.
        let row = CellRect::new(icon.x, icon.y + (icon.height - 1) / 2, icon.width, 1);
        f.render_widget(glyph, row);
    } else {
        let block = Block::bordered().border_style(glyph_style());
        let inner = block.inner(icon);
        f.render_widget(block, icon);
        f.render_widget(glyph, inner);
    }
    if let Some(handle) = viewport.handle().and_then(|h| to_cell_rect(area, h)) {
        f.render_widget(Paragraph::new("◢").style(sel_style()), handle);
    }
}

/// Rounds a panel-local rect to cells and clips it to `area`.
pub fn to_cell_rect(area: CellRect, rect: Rect) -> Option<CellRect> {
    let left = rect.origin.x.round().max(0.0);
    let top = rect.origin.y.round().max(0.0);
    let right = rect.right().round().min(area.width as f32);
    let bottom = rect.bottom().round().min(area.height as f32);
    if right <= left || bottom <= top {
        return None;
    }
    Some(CellRect::new(
        area.x + left as u16,
        area.y + top as u16,
        (right - left) as u16,
        (bottom - top) as u16,
    ))
}
