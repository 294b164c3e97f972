//! Entry point for the Cozy Lobby desktop app.

use dioxus::desktop::{Config, LogicalPosition, LogicalSize, WindowBuilder};
use tracing_subscriber::EnvFilter;

use cozy_lobby::bridge;
use cozy_lobby::components::app::App;
use cozy_lobby::config::LobbyConfig;
use cozy_lobby::LOBBY_CSS;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cozy_lobby=info")),
        )
        .init();

    let config = match LobbyConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(2);
        }
    };

    let window_title = match &config.workspace {
        Some(ws) => format!("The Cozy Lobby - {}", ws),
        None => "The Cozy Lobby".to_string(),
    };
    tracing::info!("Starting {}", window_title);

    let mut wb = WindowBuilder::new()
        .with_title(&window_title)
        .with_maximized(false);

    let geometry = &config.window;
    if let (Some(w), Some(h)) = (geometry.width, geometry.height) {
        wb = wb.with_inner_size(LogicalSize::new(w, h));
    } else {
        wb = wb.with_inner_size(LogicalSize::new(960.0, 640.0));
    }
    if let (Some(x), Some(y)) = (geometry.x, geometry.y) {
        wb = wb.with_position(LogicalPosition::new(x, y));
    }

    let boot = match bridge::boot(config) {
        Ok(boot) => boot,
        Err(e) => {
            tracing::error!(error = %e, "failed to open document store");
            std::process::exit(1);
        }
    };

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            Config::new()
                .with_window(wb)
                .with_custom_head(format!(r#"<style>{}</style>"#, LOBBY_CSS)),
        )
        .with_context(boot)
        .launch(App);
}
