pub mod config;
pub mod core;
pub mod logging;
pub mod native;
pub mod ui;
