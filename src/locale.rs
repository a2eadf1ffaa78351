//! Brazilian-locale numeric coercion.
//!
//! The source reports format numbers with `.` as the thousands separator and
//! `,` as the decimal separator, but individual publication periods have
//! shipped plain integers, bare decimals, and mixed-separator values. The
//! parser here resolves the ambiguity with one explicit policy:
//!
//! - both separators present: whichever occurs later is the decimal separator,
//!   the other is a thousands separator and is removed;
//! - only `,`: decimal separator;
//! - only `.`: thousands separator when repeated, decimal separator when it
//!   occurs exactly once;
//! - neither: plain integer.
//!
//! Any failure yields `None`. An unparseable cell is absent, never zero.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

pub fn parse_locale_number(raw: &str) -> Option<Decimal> {
    let filtered: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-'))
        .collect();
    if filtered.is_empty() {
        return None;
    }
    let normalized = match (filtered.rfind('.'), filtered.rfind(',')) {
        (Some(dot), Some(comma)) => {
            if comma > dot {
                filtered.replace('.', "").replace(',', ".")
            } else {
                filtered.replace(',', "")
            }
        }
        (None, Some(_)) => filtered.replace(',', "."),
        (Some(_), None) => {
            if filtered.matches('.').count() > 1 {
                filtered.replace('.', "")
            } else {
                filtered
            }
        }
        (None, None) => filtered,
    };
    normalized.parse::<Decimal>().ok()
}

/// Coerces a locale-formatted string into a whole number.
///
/// Complaint counts are integral in every known publication; a value that
/// survives [`parse_locale_number`] but carries a fractional part is treated
/// as malformed and left absent.
pub fn parse_locale_integer(raw: &str) -> Option<i64> {
    let value = parse_locale_number(raw)?;
    if value.fract().is_zero() {
        value.to_i64()
    } else {
        None
    }
}

/// Formats a value back into the source locale: `.` thousands separator,
/// `,` decimal separator, two fraction digits.
pub fn format_locale_number(value: Decimal) -> String {
    let text = format!("{:.2}", value.round_dp(2));
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, "00"));
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3 + 3);
    for (offset, ch) in int_part.chars().enumerate() {
        if offset > 0 && (int_part.len() - offset) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped},{frac_part}")
}

/// Absent values render as the empty string, matching the source reports.
pub fn format_locale_opt(value: Option<Decimal>) -> String {
    value.map(format_locale_number).unwrap_or_default()
}
