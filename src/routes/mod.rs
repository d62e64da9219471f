//! Request handlers. Each returns an HTML fragment (or JSON for state).

pub mod table;
pub mod util;
