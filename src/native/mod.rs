pub mod app;
pub mod icon;
mod retro_ui;

pub use app::{configure_native_context, TermlinkNativeApp};
