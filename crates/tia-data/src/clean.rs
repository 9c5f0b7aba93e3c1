//! Best-effort numeric cleaning for hand-curated table cells.
//!
//! Literature tables report values as plain numbers, ranges such as
//! `"950–1000"`, or markers such as `"not reported"`. Cleaning never fails:
//! anything that cannot be read as a number becomes `None`.

const NOT_REPORTED: &str = "not reported";
const DASHES: [char; 2] = ['\u{2013}', '\u{2014}'];

/// Cleans a raw cell into a single value.
///
/// En and em dashes are read as `-` first. A cell that then parses as a
/// finite float is kept as is, so `-5`, `\u{2013}5` and `1e-3` keep their
/// sign and exponent. Any other cell containing `-` is a range and resolves
/// to the mean of its non-empty parts; a cell with a fragment that does not
/// parse is treated as missing.
pub fn clean_numeric(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(NOT_REPORTED) {
        return None;
    }
    let normalized = trimmed.replace(DASHES, "-");
    if let Ok(value) = normalized.parse::<f64>() {
        return value.is_finite().then_some(value);
    }
    if normalized.contains('-') {
        return mean_of_parts(&normalized);
    }
    None
}

fn mean_of_parts(range: &str) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for part in range.split('-').map(str::trim).filter(|part| !part.is_empty()) {
        sum += part.parse::<f64>().ok()?;
        count += 1;
    }
    if count == 0 {
        return None;
    }
    let mean = sum / count as f64;
    mean.is_finite().then_some(mean)
}

/// Cleans an optional cell, treating an absent cell as missing.
pub fn clean_cell(raw: Option<&str>) -> Option<f64> {
    raw.and_then(clean_numeric)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_numbers_pass_through() {
        assert_eq!(clean_numeric("12.1"), Some(12.1));
        assert_eq!(clean_numeric(" 979 "), Some(979.0));
        assert_eq!(clean_numeric("1e-3"), Some(0.001));
        assert_eq!(clean_numeric("-40"), Some(-40.0));
    }

    #[test]
    fn ranges_resolve_to_mean() {
        assert_eq!(clean_numeric("9-11"), Some(10.0));
        assert_eq!(clean_numeric("950\u{2013}1000"), Some(975.0));
        assert_eq!(clean_numeric("8 \u{2014} 12"), Some(10.0));
        assert_eq!(clean_numeric("5-"), Some(5.0));
        assert_eq!(clean_numeric("900 - 1000"), Some(950.0));
    }

    #[test]
    fn leading_dash_is_a_sign_for_every_dash_variant() {
        assert_eq!(clean_numeric("-5"), Some(-5.0));
        assert_eq!(clean_numeric("\u{2013}5"), Some(-5.0));
        assert_eq!(clean_numeric("\u{2014}5"), Some(-5.0));
        assert_eq!(clean_numeric("2.5e\u{2013}3"), Some(0.0025));
    }

    #[test]
    fn markers_and_garbage_are_missing() {
        assert_eq!(clean_numeric("not reported"), None);
        assert_eq!(clean_numeric("Not Reported"), None);
        assert_eq!(clean_numeric(""), None);
        assert_eq!(clean_numeric("n/a"), None);
        assert_eq!(clean_numeric("9-abc"), None);
        assert_eq!(clean_numeric("-"), None);
        assert_eq!(clean_numeric("NaN"), None);
        assert_eq!(clean_numeric("inf"), None);
        assert_eq!(clean_cell(None), None);
    }
}
