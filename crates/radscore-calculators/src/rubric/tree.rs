//! Decision-tree rubrics: ordered rule lists and graded finding tables.

/// One branch of an ordered rule list. `reason` is shown to the user as
/// the justification for the outcome.
pub struct Rule<C, O> {
    pub when: fn(&C) -> bool,
    pub then: O,
    pub reason: &'static str,
}

/// The first rule whose predicate holds. Order encodes precedence.
pub fn first_match<'a, C, O>(rules: &'a [Rule<C, O>], case: &C) -> Option<&'a Rule<C, O>> {
    rules.iter().find(|rule| (rule.when)(case))
}

/// A finding that implies a grade on its own.
#[derive(Debug, Clone, Copy)]
pub struct GradedFinding {
    pub id: &'static str,
    pub label: &'static str,
    pub grade: u8,
}

pub const fn finding(id: &'static str, label: &'static str, grade: u8) -> GradedFinding {
    GradedFinding { id, label, grade }
}

/// Highest-grade finding among `selected`; ties go to the earlier table row.
pub fn most_severe<'a>(table: &'a [GradedFinding], selected: &[String]) -> Option<&'a GradedFinding> {
    let mut best: Option<&'a GradedFinding> = None;
    for f in table.iter().filter(|f| selected.iter().any(|s| s == f.id)) {
        match best {
            Some(b) if b.grade >= f.grade => {}
            _ => best = Some(f),
        }
    }
    best
}

/// Advance one grade unless `grade` has already reached `ceiling`.
pub fn advance_capped(grade: u8, ceiling: u8) -> u8 {
    if grade < ceiling { grade + 1 } else { grade }
}
