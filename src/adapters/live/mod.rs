//! Live adapters that talk to real endpoints.

pub mod imagen;
