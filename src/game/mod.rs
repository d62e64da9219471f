//! Game module: tiles, the table store, the turn engine and board
//! rendering. State lives in WASM memory (thread_local) for the lifetime of
//! the Web Worker.

pub mod board;
pub mod config;
pub mod error;
pub mod seat;
pub mod state;
pub mod table;
pub mod tile;
pub mod turns;
pub mod wall;
