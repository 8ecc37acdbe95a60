//! Fixed-precision display helpers shared by every calculator.

/// `value` with exactly `places` decimals.
pub fn fixed(value: f64, places: usize) -> String {
    format!("{value:.places$}")
}

/// "26.1%"
pub fn percent(value: f64, places: usize) -> String {
    format!("{value:.places$}%")
}

/// "47.7 / 100"
pub fn out_of(value: f64, max: f64, places: usize) -> String {
    format!("{value:.places$} / {max}")
}

/// Shortest plain rendering of a number: `1000`, `0.5`, `37000000000`.
/// Very small magnitudes fall back to exponent form (`1e-5`).
pub fn plain(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else if value.abs() < 1e-4 {
        format!("{value:e}")
    } else {
        let s = format!("{value:.6}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Roman numeral for injury grades (1..=6).
pub fn roman(n: u8) -> &'static str {
    match n {
        1 => "I",
        2 => "II",
        3 => "III",
        4 => "IV",
        5 => "V",
        6 => "VI",
        _ => "?",
    }
}

pub fn points(n: i32) -> String {
    if n == 1 {
        "1 point".to_string()
    } else {
        format!("{n} points")
    }
}
