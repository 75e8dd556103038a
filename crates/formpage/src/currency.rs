//! Lenient parsing of money amounts typed by users.

/// Parse a money amount, ignoring everything but digits and the decimal point.
///
/// Anything from a second decimal point onwards is dropped, so `1.2.3` reads
/// as `1.2`. Returns `None` when nothing numeric remains. The result is
/// rounded to two decimal places after adding `f64::EPSILON`, which absorbs
/// binary representation error at the half-cent boundary.
pub fn to_currency(input: &str) -> Option<f64> {
    let digits: String = input
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let digits = match digits.match_indices('.').nth(1) {
        Some((second, _)) => &digits[..second],
        None => digits.as_str(),
    };
    if !digits.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    let n = digits.parse::<f64>().ok()?;
    Some(((n + f64::EPSILON) * 100.0).round() / 100.0)
}
