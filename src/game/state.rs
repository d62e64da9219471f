//! Session store: one table plus its config for the life of the worker.
//!
//! Uses `thread_local!` + `RefCell` for mutable access in single-threaded
//! WASM. The Web Worker keeps the module alive, so the session persists
//! across `handle_request` calls until a reset replaces it.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::cell::RefCell;

use crate::game::config::TableConfig;
use crate::game::table::Table;
use crate::game::turns::{self, Phase};

#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub table: Table,
    pub config: TableConfig,
}

impl Session {
    /// Deal a fresh table from `seed` under `config`.
    pub fn new(config: TableConfig, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let table = Table::shuffled(&mut rng, config.dealer, config.red_fives).with_seed(seed);
        Self { table, config }
    }
}

/// A seed from the platform RNG (`crypto.getRandomValues` in the browser).
pub fn entropy_seed() -> u64 {
    rand::rng().random()
}

thread_local! {
    static SESSION: RefCell<Session> = RefCell::new(Session::new(TableConfig::default(), entropy_seed()));
}

/// Execute a closure with read access to the session.
pub fn with_session<F, R>(f: F) -> R
where
    F: FnOnce(&Session) -> R,
{
    SESSION.with(|s| f(&s.borrow()))
}

/// Execute a closure with mutable access to the session.
pub fn with_session_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut Session) -> R,
{
    SESSION.with(|s| f(&mut s.borrow_mut()))
}

/// Replace the entire session.
pub fn replace_session(session: Session) {
    SESSION.with(|s| {
        *s.borrow_mut() = session;
    });
}

/// Throw away the table and deal a new one, keeping the config.
/// Returns the seed used.
pub fn reset_session(seed: Option<u64>) -> u64 {
    let seed = seed.unwrap_or_else(entropy_seed);
    let config = with_session(|s| s.config.clone());
    replace_session(Session::new(config, seed));
    log::info!("dealt a new table (seed {})", seed);
    seed
}

#[derive(Serialize)]
struct Snapshot<'a> {
    #[serde(flatten)]
    session: &'a Session,
    phase: String,
}

/// Export the session as JSON, with the current phase spelled out.
pub fn export_state_json() -> String {
    with_session(|s| {
        let phase = match turns::phase(&s.table) {
            Phase::AwaitingDraw(seat) => format!("awaiting_draw:{}", seat),
            Phase::AwaitingDiscard(seat) => format!("awaiting_discard:{}", seat),
            Phase::Exhausted => "exhausted".to_string(),
        };
        let snapshot = Snapshot { session: s, phase };
        serde_json::to_string(&snapshot).unwrap_or_else(|_| "{}".to_string())
    })
}
