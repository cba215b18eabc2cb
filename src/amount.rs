use rust_decimal::{Decimal, RoundingStrategy};

pub const MAX_PRECISION: usize = 14;
pub const MAX_SCALE: usize = 2;

/// Checks a trimmed string is a dollar amount with at most 14 digits in total
/// and at most 2 of them after the decimal point, e.g. `1425.48`, `1425.`,
/// `.48` or `1425`.
pub fn is_valid_amount(s: &str) -> bool {
    split_amount(s).is_some()
}

/// Validates and converts a trimmed dollar amount into a `Decimal`.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let (whole, fraction) = split_amount(s)?;

    let digits = format!("{}{}", whole, fraction);
    let mantissa: i64 = if digits.is_empty() { 0 } else { digits.parse().ok()? };

    Some(Decimal::new(mantissa, fraction.len() as u32))
}

/// Drops cents below .50 and rounds anything from .50 up to the next dollar.
pub fn round_dollars(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

fn split_amount(s: &str) -> Option<(&str, &str)> {
    if s.is_empty() || s == "." {
        return None;
    }

    let mut parts = s.split('.');
    let whole = parts.next().unwrap_or_default();
    let fraction = parts.next().unwrap_or_default();
    if parts.next().is_some() {
        return None;
    }

    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(whole) || !all_digits(fraction) {
        return None;
    }

    if fraction.len() > MAX_SCALE || whole.len() + fraction.len() > MAX_PRECISION {
        return None;
    }

    Some((whole, fraction))
}
