//! Flywheel Dashboard Entry Point

mod actions;
mod adapters;
mod app;
mod components;
mod config;
mod context;
mod store;

use app::App;
use leptos::prelude::*;

use adapters::ConsoleLogger;
use flywheel_core::ClientConfig;

fn main() {
    console_error_panic_hook::set_once();

    let (config, problem) = match config::load_config() {
        Ok(config) => (config, None),
        Err(e) => (ClientConfig::default(), Some(e)),
    };
    ConsoleLogger::init(config.level_filter());
    if let Some(problem) = problem {
        log::warn!("[CONFIG] Ignoring unreadable configuration: {}", problem);
    }
    log::info!("[APP] Starting {}", config.site_name);

    mount_to_body(move || view! { <App config=config.clone() /> });
}
