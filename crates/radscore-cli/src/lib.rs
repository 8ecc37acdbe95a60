//! radscore-cli library root.
//!
//! Exposes the command bodies and preferences store so integration tests
//! can drive them without going through argument parsing.

pub mod cli;
pub mod commands;
pub mod preferences;
