use super::geometry::{Point, Size};
use super::interpreter::Reply;
use super::transcript::Session;
use super::viewport::{DragState, IconLimits, IconSizing, Viewport};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Transcript,
    Input,
    Icon,
    Drag,
}

pub type Observer = Box<dyn FnMut(Change)>;

/// The whole widget state. Front ends forward events here and redraw when
/// the observer fires.
pub struct TerminalPanel {
    session: Session,
    viewport: Viewport,
    observer: Option<Observer>,
}

impl TerminalPanel {
    pub fn new(welcome: impl Into<String>, sizing: IconSizing, limits: IconLimits) -> Self {
        Self {
            session: Session::new(welcome),
            viewport: Viewport::new(sizing, limits),
            observer: None,
        }
    }

    pub fn on_change(&mut self, observer: Observer) {
        self.observer = Some(observer);
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    fn notify(&mut self, changed: bool, change: Change) -> bool {
        if changed {
            if let Some(observer) = self.observer.as_mut() {
                observer(change);
            }
        }
        changed
    }

    pub fn set_input(&mut self, text: impl Into<String>) -> bool {
        let changed = self.session.set_input(text);
        self.notify(changed, Change::Input)
    }

    pub fn insert_char(&mut self, ch: char) -> bool {
        let changed = self.session.insert_char(ch);
        self.notify(changed, Change::Input)
    }

    pub fn backspace(&mut self) -> bool {
        let changed = self.session.backspace();
        self.notify(changed, Change::Input)
    }

    pub fn submit(&mut self) -> Reply {
        let reply = self.session.submit();
        log::debug!(
            "submitted {:?} ({} transcript lines)",
            self.session.transcript().lines().iter().rev().nth(1),
            self.session.transcript().len()
        );
        self.notify(true, Change::Transcript);
        reply
    }

    pub fn resize_panel(&mut self, size: Size) -> bool {
        let changed = self.viewport.resize_panel(size);
        if changed {
            log::debug!(
                "panel {}x{}, icon at {:?}",
                size.width,
                size.height,
                self.viewport.icon()
            );
        }
        self.notify(changed, Change::Icon)
    }

    pub fn pointer_down(&mut self, p: Point) -> bool {
        let changed = self.viewport.pointer_down(p);
        if changed {
            log::trace!("drag start at {p:?}");
        }
        self.notify(changed, Change::Drag)
    }

    pub fn pointer_moved(&mut self, p: Point, delta: Point) -> bool {
        let changed = self.viewport.pointer_moved(p, delta);
        self.notify(changed, Change::Icon)
    }

    pub fn pointer_released(&mut self) -> bool {
        self.end_drag()
    }

    pub fn pointer_left(&mut self) -> bool {
        self.end_drag()
    }

    fn end_drag(&mut self) -> bool {
        let changed = self.viewport.end_drag();
        if changed {
            log::trace!("drag end, icon at {:?}", self.viewport.icon().origin);
        }
        self.notify(changed, Change::Drag)
    }

    pub fn drag_state(&self) -> DragState {
        self.viewport.drag_state()
    }
}

impl fmt::Debug for TerminalPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TerminalPanel")
            .field("session", &self.session)
            .field("viewport", &self.viewport)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn watched_panel() -> (TerminalPanel, Rc<RefCell<Vec<Change>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut panel = TerminalPanel::new(
            "ready",
            IconSizing::Fixed(Size::new(50.0, 50.0)),
            IconLimits::PIXELS,
        );
        panel.on_change(Box::new(move |change| sink.borrow_mut().push(change)));
        (panel, seen)
    }

    #[test]
    fn observer_sees_each_kind_of_change() {
        let (mut panel, seen) = watched_panel();
        panel.resize_panel(Size::new(400.0, 300.0));
        panel.insert_char('h');
        panel.set_input("help");
        panel.submit();
        panel.pointer_down(Point::new(360.0, 260.0));
        panel.pointer_moved(Point::new(100.0, 100.0), Point::new(1.0, 1.0));
        panel.pointer_left();
        assert_eq!(
            *seen.borrow(),
            vec![
                Change::Icon,
                Change::Input,
                Change::Input,
                Change::Transcript,
                Change::Drag,
                Change::Icon,
                Change::Drag,
            ]
        );
    }

    #[test]
    fn observer_stays_quiet_without_changes() {
        let (mut panel, seen) = watched_panel();
        panel.resize_panel(Size::new(400.0, 300.0));
        seen.borrow_mut().clear();

        panel.resize_panel(Size::new(400.0, 300.0));
        panel.backspace();
        panel.pointer_moved(Point::new(10.0, 10.0), Point::new(2.0, 2.0));
        panel.pointer_released();
        panel.pointer_left();
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn clear_through_panel_matches_session_contract() {
        let (mut panel, _) = watched_panel();
        panel.set_input("echo one");
        panel.submit();
        panel.set_input("clear");
        let reply = panel.submit();
        assert!(reply.clears_transcript());
        assert_eq!(
            panel.session().transcript().lines(),
            ["$ clear", ""].map(String::from)
        );
    }

    #[test]
    fn release_ends_drag() {
        let (mut panel, _) = watched_panel();
        panel.resize_panel(Size::new(400.0, 300.0));
        assert!(panel.pointer_down(Point::new(360.0, 260.0)));
        assert_eq!(panel.drag_state(), DragState::Dragging);
        assert!(panel.pointer_released());
        assert_eq!(panel.drag_state(), DragState::Idle);
    }
}
