//! radscore-core
//!
//! Shared vocabulary for the calculators: raw form input, declared field
//! schema, the input normalizer, validation errors and the typed result.
//! Pure data, no I/O.

pub mod error;
pub mod field;
pub mod format;
pub mod input;
pub mod normalize;
pub mod result;
