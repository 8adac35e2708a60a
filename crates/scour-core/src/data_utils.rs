//! Small value-level helpers shared by the engines.

use std::cmp::Ordering;

/// Parse a cell as `f64`, returning `None` for empty or non-numeric text.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Format a float without trailing fractional zeros ("2.50" -> "2.5").
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

/// Sort `(code, label)` pairs into natural ascending order: numeric when
/// every label parses as a number, lexical otherwise. The sort is stable.
pub fn sort_labels(pairs: &mut [(u32, String)]) {
    let all_numeric = pairs.iter().all(|(_, label)| parse_f64(label).is_some());
    if all_numeric {
        pairs.sort_by(|a, b| {
            let x = parse_f64(&a.1).unwrap_or(f64::NAN);
            let y = parse_f64(&b.1).unwrap_or(f64::NAN);
            x.partial_cmp(&y)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.1.cmp(&b.1))
        });
    } else {
        pairs.sort_by(|a, b| a.1.cmp(&b.1));
    }
}

/// Total order over float bit patterns for grouping: `-0.0` folds into
/// `0.0` so the two compare equal as keys.
pub fn normalize_bits(v: f64) -> u64 {
    if v == 0.0 { 0.0f64.to_bits() } else { v.to_bits() }
}
