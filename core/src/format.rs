//! Number formatting for display: thousands grouped with commas,
//! amounts suffixed with the tenge sign.

pub const TENGE: &str = "₸";

/// `1234567` -> `1,234,567`. Negative numbers keep their sign.
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// `85000` -> `85,000 ₸`.
pub fn tenge(amount: i64) -> String {
    format!("{} {TENGE}", group_thousands(amount))
}

/// Like `tenge`, with an explicit `+` on positive amounts.
pub fn signed_tenge(amount: i64) -> String {
    if amount > 0 {
        format!("+{}", tenge(amount))
    } else {
        tenge(amount)
    }
}
