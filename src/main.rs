#![allow(warnings)]
//! Quality Console Frontend Entry Point

mod models;
mod error;
mod config;
mod draft;
mod capture;
mod collection;
mod library;
mod attachment;
mod kanban;
mod forms;
mod auth;
mod nav;
mod indicators;
mod notifications;
mod browser;
mod context;
mod store;
mod components;
mod app;

use app::App;
use leptos::prelude::*;
use log::LevelFilter;

fn main() {
    console_error_panic_hook::set_once();

    let config = browser::load_config(&browser::LocalStorageBackend::new());
    let level = config.level_filter().unwrap_or(LevelFilter::Info);
    if let Err(e) = rolling_logger::init(level, config.log_capacity) {
        web_sys::console::error_1(&format!("[APP] Logger init failed: {}", e).into());
    }
    log::info!("[APP] Starting, draft key {}", config.draft_key);

    mount_to_body(move || view! { <App config=config /> });
}
