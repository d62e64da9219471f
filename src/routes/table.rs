//! `/api/table/*` routes: the table board, engine steps and session
//! controls.
//!
//! Every mutating route answers with the re-rendered board so HTMX can swap
//! it straight into `#table`.

use crate::game::board;
use crate::game::error::TurnError;
use crate::game::state;
use crate::game::turns;
use crate::routes::util::{get_flag, get_parsed, parse_form_body};

fn error_span(message: &str) -> String {
    format!(r#"<span class="text-kip-red">{}</span>"#, message)
}

fn render() -> String {
    state::with_session(board::render_board)
}

/// Log a rejected transition and render it above the board.
fn report(err: TurnError) -> String {
    if err.is_invariant_violation() {
        log::error!("turn engine rejected a transition: {}", err);
    } else {
        log::info!("{}", err);
    }
    format!("{}{}", error_span(&err.to_string()), render())
}

// ── GET /api/table ─────────────────────────────────────────────────

pub fn handle_table_get(_query: &str) -> String {
    render()
}

// ── POST /api/table/step ───────────────────────────────────────────

/// Advance the engine by one sub-step. Posted by the pacing trigger.
pub fn handle_step_post(_body: &str) -> String {
    match state::with_session_mut(|s| turns::step(&mut s.table, &s.config)) {
        Ok(_) => render(),
        Err(e) => report(e),
    }
}

// ── POST /api/table/discard ────────────────────────────────────────

/// Handle POST /api/table/discard
/// Body params:
///   - index={n} → discard hand[n] for the human seat
pub fn handle_discard_post(body: &str) -> String {
    let params = parse_form_body(body);
    let Some(index) = get_parsed::<usize>(&params, "index") else {
        return error_span("Missing or invalid index parameter");
    };
    match state::with_session_mut(|s| turns::discard_selected(&mut s.table, &s.config, index)) {
        Ok(_) => render(),
        Err(e) => report(e),
    }
}

// ── POST /api/table/reset ──────────────────────────────────────────

/// Handle POST /api/table/reset
/// Body params:
///   - seed={n} (optional) → deal from a fixed seed
pub fn handle_reset_post(body: &str) -> String {
    let params = parse_form_body(body);
    state::reset_session(get_parsed::<u64>(&params, "seed"));
    render()
}

// ── POST /api/table/autoplay ───────────────────────────────────────

/// Handle POST /api/table/autoplay
/// Body params:
///   - enabled=true|false → set; absent → toggle
pub fn handle_autoplay_post(body: &str) -> String {
    let params = parse_form_body(body);
    let enabled = state::with_session_mut(|s| {
        s.config.auto_play = get_flag(&params, "enabled").unwrap_or(!s.config.auto_play);
        s.config.auto_play
    });
    log::info!("auto-play {}", if enabled { "on" } else { "off" });
    render()
}

// ── POST /api/table/config ─────────────────────────────────────────

/// Handle POST /api/table/config
/// Body: JSON object with any `TableConfig` fields. Seat and deal options
/// apply from the next reset.
pub fn handle_config_post(body: &str) -> String {
    let patched = state::with_session(|s| s.config.patched(body));
    match patched {
        Ok(config) => {
            log::info!("table config updated: {:?}", config);
            state::with_session_mut(|s| s.config = config);
            render()
        }
        Err(e) => {
            log::warn!("{}", e);
            error_span(&e.to_string())
        }
    }
}

// ── GET /api/table/state ───────────────────────────────────────────

pub fn handle_state_get(_query: &str) -> String {
    state::export_state_json()
}
