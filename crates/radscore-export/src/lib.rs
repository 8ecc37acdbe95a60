//! radscore-export
//!
//! CSV downloads and plain-text reports from a calculated result.

pub mod csv;
pub mod error;
pub mod render;
