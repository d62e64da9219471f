//! Tsumo table in-browser WASM server.
//!
//! Exports `handle_request(method, path, query, body)` for the Service Worker
//! bridge to call. Uses `matchit` for URL routing. Responses are HTML
//! fragments for HTMX to swap into `#table`, except `/api/table/state`
//! which returns JSON.

use wasm_bindgen::prelude::*;

pub mod assets;
pub mod game;
pub mod logging;
pub mod routes;

/// Module entry point: panic hook and console logging.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    logging::init(log::LevelFilter::Info);
}

/// Change the console log level ("error", "warn", "info", "debug", "trace").
#[wasm_bindgen]
pub fn set_log_level(level: &str) {
    logging::init(logging::parse_level(level));
}

/// Register tile art under its file name (e.g. `0m1.png`).
#[wasm_bindgen]
pub fn register_tile_image(name: &str, bytes: &[u8]) {
    assets::register_image(name, bytes);
    log::debug!("registered tile image {} ({} bytes)", name, bytes.len());
}

/// Process an HTTP-like request and return a response body.
///
/// Called from JavaScript (Web Worker) via wasm-bindgen.
///
/// # Arguments
/// * `method` HTTP method ("GET" or "POST")
/// * `path`  URL path (e.g., "/api/table/step")
/// * `query` Query string, may be empty
/// * `body`  Request body (form data or JSON). Empty string for GET requests.
#[wasm_bindgen]
pub fn handle_request(method: &str, path: &str, query: &str, body: &str) -> String {
    let mut router = matchit::Router::new();

    router.insert("/api/table", "table").ok();
    router.insert("/api/table/step", "step").ok();
    router.insert("/api/table/discard", "discard").ok();
    router.insert("/api/table/reset", "reset").ok();
    router.insert("/api/table/autoplay", "autoplay").ok();
    router.insert("/api/table/config", "config").ok();
    router.insert("/api/table/state", "state").ok();

    match router.at(path) {
        Ok(matched) => match (*matched.value, method) {
            ("table", "GET") => routes::table::handle_table_get(query),
            ("state", "GET") => routes::table::handle_state_get(query),

            ("step", "POST") => routes::table::handle_step_post(body),
            ("discard", "POST") => routes::table::handle_discard_post(body),
            ("reset", "POST") => routes::table::handle_reset_post(body),
            ("autoplay", "POST") => routes::table::handle_autoplay_post(body),
            ("config", "POST") => routes::table::handle_config_post(body),

            _ => method_not_allowed(),
        },
        Err(_) => not_found(),
    }
}

fn not_found() -> String {
    r#"<span class="text-kip-red">404: route not found</span>"#.to_string()
}

fn method_not_allowed() -> String {
    r#"<span class="text-kip-red">405: method not allowed</span>"#.to_string()
}
