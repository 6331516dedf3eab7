//! Record/replay infrastructure for deterministic runs without network I/O.

pub mod format;
pub mod recorder;
pub mod replayer;
