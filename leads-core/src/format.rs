//! Display formatting for counts, currency amounts and durations.

use rust_decimal::Decimal;

use crate::calculations::common::round_half_up;

/// Hours in one working day, used when presenting saved time.
pub const WORKDAY_HOURS: u64 = 8;

/// Inserts `,` every three digits of an unsigned digit string.
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Formats a count with thousands separators.
///
/// ```
/// use leads_core::format::format_count;
///
/// assert_eq!(format_count(1234567), "1,234,567");
/// ```
pub fn format_count(value: u64) -> String {
    group_thousands(&value.to_string())
}

/// Formats an amount as US dollars with two decimals.
///
/// ```
/// use rust_decimal_macros::dec;
/// use leads_core::format::format_currency;
///
/// assert_eq!(format_currency(dec!(1261)), "$1,261.00");
/// assert_eq!(format_currency(dec!(-0.005)), "-$0.01");
/// ```
pub fn format_currency(amount: Decimal) -> String {
    let rounded = round_half_up(amount);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    format!("{sign}${}.{cents}", group_thousands(whole))
}

/// Formats saved minutes as working days and hours (`{days}d {hours}h`).
///
/// ```
/// use leads_core::format::format_duration;
///
/// assert_eq!(format_duration(1200), "2d 4h");
/// ```
pub fn format_duration(minutes: u64) -> String {
    let hours = minutes / 60;
    let days = hours / WORKDAY_HOURS;
    format!("{days}d {}h", hours % WORKDAY_HOURS)
}

/// Formats a ratio as a percentage without trailing zeros.
///
/// ```
/// use rust_decimal_macros::dec;
/// use leads_core::format::format_percent;
///
/// assert_eq!(format_percent(dec!(0.1325)), "13.25%");
/// assert_eq!(format_percent(dec!(0.6)), "60%");
/// ```
pub fn format_percent(ratio: Decimal) -> String {
    format!("{}%", (ratio * Decimal::ONE_HUNDRED).normalize())
}
