//! Replaying adapters that serve recorded interactions from cassettes.

pub mod image_generator;
