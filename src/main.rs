use anyhow::Result;
use crossterm::{
    event::{
        self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
        Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use std::cell::Cell;
use std::io::stdout;
use std::rc::Rc;
use std::time::Duration;

use termlink::config::{self, get_settings};
use termlink::core::{IconLimits, Point, Size, TerminalPanel};
use termlink::logging::{self, LogTarget};
use termlink::ui::{render_panel, Term};

// ── Terminal setup / teardown ─────────────────────────────────────────────────

fn init_terminal() -> Result<Term> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, EnableFocusChange)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(ratatui::Terminal::new(backend)?)
}

fn restore_terminal(terminal: &mut Term) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableFocusChange,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    Ok(())
}

// ── Event loop ────────────────────────────────────────────────────────────────

struct PointerTracker {
    last: Option<Point>,
}

impl PointerTracker {
    /// Terminals report absolute cells only; the delta is derived here.
    fn advance(&mut self, p: Point) -> Point {
        let delta = self
            .last
            .map(|last| Point::new(p.x - last.x, p.y - last.y))
            .unwrap_or_default();
        self.last = Some(p);
        delta
    }

    fn forget(&mut self) {
        self.last = None;
    }
}

fn handle_key(panel: &mut TerminalPanel, key: KeyEvent) -> bool {
    if key.kind == KeyEventKind::Release {
        return true;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => return false,
        KeyCode::Char('c') if ctrl => return false,
        KeyCode::Enter => {
            panel.submit();
        }
        KeyCode::Backspace => {
            panel.backspace();
        }
        KeyCode::Char(ch) if !ctrl => {
            panel.insert_char(ch);
        }
        _ => {}
    }
    true
}

fn handle_mouse(panel: &mut TerminalPanel, pointer: &mut PointerTracker, mouse: MouseEvent) {
    let p = Point::new(mouse.column as f32, mouse.row as f32);
    let delta = pointer.advance(p);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            panel.pointer_down(p);
        }
        MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
            panel.pointer_moved(p, delta);
        }
        MouseEventKind::Up(MouseButton::Left) => {
            panel.pointer_released();
        }
        _ => {}
    }
}

fn run(terminal: &mut Term) -> Result<()> {
    let settings = get_settings();
    let mut panel = TerminalPanel::new(
        settings.welcome_message.clone(),
        settings.icon_sizing(IconLimits::CELLS),
        IconLimits::CELLS,
    );
    let dirty = Rc::new(Cell::new(true));
    let flag = Rc::clone(&dirty);
    panel.on_change(Box::new(move |_| flag.set(true)));

    let area = terminal.size()?;
    panel.resize_panel(Size::new(area.width as f32, area.height as f32));
    let mut pointer = PointerTracker { last: None };

    loop {
        if dirty.replace(false) {
            terminal.draw(|f| render_panel(f, &panel))?;
        }

        if !event::poll(Duration::from_millis(200))? {
            continue;
        }
        match event::read()? {
            Event::Key(key) => {
                if !handle_key(&mut panel, key) {
                    return Ok(());
                }
            }
            Event::Mouse(mouse) => handle_mouse(&mut panel, &mut pointer, mouse),
            Event::Resize(width, height) => {
                panel.resize_panel(Size::new(width as f32, height as f32));
                dirty.set(true);
            }
            Event::FocusLost => {
                pointer.forget();
                panel.pointer_left();
            }
            _ => {}
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    logging::init(LogTarget::File(config::log_file()))?;
    std::panic::set_hook(Box::new(|info| log::error!("termlink panic: {info}")));
    config::reload_settings();
    log::info!("termlink starting, settings at {}", config::settings_file().display());

    let mut terminal = init_terminal()?;

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| run(&mut terminal)));

    // Always restore terminal
    restore_terminal(&mut terminal).ok();

    match result {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(e),
        Err(_) => {
            eprintln!("termlink crashed. Check {}", config::log_file().display());
            Ok(())
        }
    }
}
