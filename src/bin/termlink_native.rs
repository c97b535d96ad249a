use anyhow::Result;
use eframe::egui::ViewportBuilder;
use termlink::config;
use termlink::logging::{self, LogTarget};
use termlink::native::{configure_native_context, icon, TermlinkNativeApp};

fn main() -> Result<()> {
    logging::init(LogTarget::Stderr)?;
    config::reload_settings();
    log::info!("termlink-native starting, settings at {}", config::settings_file().display());

    let mut viewport = ViewportBuilder::default()
        .with_inner_size([1024.0, 640.0])
        .with_min_inner_size([480.0, 320.0])
        .with_title("TermLink");
    if let Some(icon) = icon::window_icon() {
        viewport = viewport.with_icon(icon);
    }

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "TermLink",
        options,
        Box::new(|cc| {
            cc.egui_ctx.set_zoom_factor(1.0);
            configure_native_context(&cc.egui_ctx);
            Ok(Box::new(TermlinkNativeApp::new(&cc.egui_ctx)))
        }),
    )
    .map_err(|err| anyhow::anyhow!(err.to_string()))
}
