//! Generic rubric interpreters. Calculators describe their tables as data
//! and hand them to one of these evaluators.

pub mod bands;
pub mod composite;
pub mod points;
pub mod tree;
