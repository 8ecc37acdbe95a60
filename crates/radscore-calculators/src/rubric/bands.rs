use std::ops::{Bound, RangeBounds};

/// A numeric interval mapped to an outcome. Each rubric states its own
/// edges, so both ends carry an explicit [`Bound`].
#[derive(Debug, Clone, Copy)]
pub struct Band<T> {
    pub lower: Bound<f64>,
    pub upper: Bound<f64>,
    pub outcome: T,
}

impl<T> Band<T> {
    pub const fn new(lower: Bound<f64>, upper: Bound<f64>, outcome: T) -> Self {
        Self { lower, upper, outcome }
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.lower, self.upper).contains(&value)
    }
}

/// The outcome of the first band containing `value`.
pub fn classify<T>(bands: &[Band<T>], value: f64) -> Option<&T> {
    bands.iter().find(|b| b.contains(value)).map(|b| &b.outcome)
}
