pub mod geometry;
pub mod interpreter;
pub mod panel;
pub mod transcript;
pub mod viewport;

pub use geometry::{Point, Rect, Size};
pub use interpreter::{interpret, Command, Reply};
pub use panel::{Change, TerminalPanel};
pub use transcript::{Session, Transcript, PROMPT};
pub use viewport::{DragState, IconHit, IconLimits, IconSizing, PanelWatch, Viewport};
