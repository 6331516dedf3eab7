//! Adapter implementations for port traits.
//!
//! - `live/` — the real Imagen API client
//! - `recording/` — wraps live calls and captures them to cassettes
//! - `replaying/` — serves recorded interactions from cassettes

pub mod live;
pub mod recording;
pub mod replaying;
