// Host builds compile only the target independent core so it can be unit
// tested; the browser entry point lives behind the wasm32 gate.
#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

#[cfg(target_arch = "wasm32")]
mod app;
#[path = "lib/mod.rs"]
mod app_lib;
#[cfg(target_arch = "wasm32")]
mod components;
mod features;
mod routes;

#[cfg(target_arch = "wasm32")]
use crate::{
    app::App,
    app_lib::{build_info, config::AppConfig, logging},
};
#[cfg(target_arch = "wasm32")]
use leptos::prelude::mount_to_body;

#[cfg(target_arch = "wasm32")]
pub fn main() {
    let config = AppConfig::load();
    logging::init(&config.log_level);
    tracing::info!(
        version = build_info::version(),
        commit = build_info::git_commit_hash(),
        api_base_url = %config.api_base_url,
        "starting quill web"
    );
    mount_to_body(App);
}

#[cfg(not(target_arch = "wasm32"))]
pub fn main() {}
