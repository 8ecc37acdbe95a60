//! Weighted composites over ordinal questionnaire items.

/// A named group of questionnaire items (1-based item numbers).
#[derive(Debug, Clone, Copy)]
pub struct Scale {
    pub id: &'static str,
    pub name: &'static str,
    pub items: &'static [usize],
}

/// `sum / (items * max_item)` on a 0-100 scale. Multiplying before
/// dividing keeps quarter boundaries (22/88, 44/88) exact.
pub fn normalized_score(sum: u32, items: usize, max_item: u32) -> f64 {
    let max = items as f64 * f64::from(max_item);
    if max == 0.0 {
        return 0.0;
    }
    f64::from(sum) * 100.0 / max
}

/// Raw sum of a scale's items from a 1-based answer sheet.
pub fn scale_sum(scale: &Scale, answers: &[u32]) -> u32 {
    scale
        .items
        .iter()
        .filter_map(|item| answers.get(item - 1))
        .sum()
}
