//! pt-BR display formatting

use chrono::DateTime;
use chrono::Datelike;
use chrono::TimeZone;
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;
use rust_decimal::prelude::ToPrimitive;

use super::format_relative;

const MONTHS_SHORT: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

/// Groups the digits of a non-negative integer with `.`.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// `45678` → `"45.678"`.
pub fn format_count(value: u64) -> String {
    group_thousands(&value.to_string())
}

/// `89345` → `"R$ 89.345,00"`.
///
/// Rounds half away from zero to cents.
pub fn format_currency(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let cents = (rounded.abs() * Decimal::ONE_HUNDRED).trunc();
    let cents = cents.to_u128().unwrap_or(0);
    format!(
        "{}R$ {},{:02}",
        sign,
        group_thousands(&(cents / 100).to_string()),
        cents % 100
    )
}

/// `28.5` → `"28,5%"`, one decimal place.
pub fn format_percentage(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    format!("{:.1}%", value).replace('.', ",")
}

/// `"dd/mm/yyyy"` in the timestamp's own zone.
pub fn format_date<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%d/%m/%Y").to_string()
}

/// `"dd/mm/yyyy HH:MM"` in the timestamp's own zone.
pub fn format_datetime<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%d/%m/%Y %H:%M").to_string()
}

/// Short month day, `"15 jan"`.
fn day_month<Tz: TimeZone>(at: &DateTime<Tz>) -> String {
    format!("{:02} {}", at.day(), MONTHS_SHORT[at.month0() as usize])
}

/// Campaign period, `"15 jan - 15 mar 2024"`.
///
/// The year is written once, after the end date, unless the dates fall in
/// different years. Missing ends are shown as `"-"`.
pub fn format_date_range<Tz: TimeZone>(start: Option<&DateTime<Tz>>, end: Option<&DateTime<Tz>>) -> String {
    match (start, end) {
        (Some(start), Some(end)) if start.year() == end.year() => {
            format!("{} - {} {}", day_month(start), day_month(end), end.year())
        }
        (Some(start), Some(end)) => format!(
            "{} {} - {} {}",
            day_month(start),
            start.year(),
            day_month(end),
            end.year()
        ),
        (Some(start), None) => format!("{} {} - -", day_month(start), start.year()),
        (None, Some(end)) => format!("- - {} {}", day_month(end), end.year()),
        (None, None) => "-".to_string(),
    }
}

/// Last login column: date and time, or `"Nunca"`.
pub fn format_last_login<Tz: TimeZone>(at: Option<&DateTime<Tz>>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.map(format_datetime)
        .unwrap_or_else(|| "Nunca".to_string())
}

/// Fundraising progress in percent, capped at 100.
///
/// Zero or negative targets give 0.
pub fn progress_percentage(raised: Decimal, target: Decimal) -> f64 {
    if target <= Decimal::ZERO {
        return 0.0;
    }
    let ratio = (raised / target * Decimal::ONE_HUNDRED).to_f64().unwrap_or(0.0);
    ratio.clamp(0.0, 100.0)
}

/// Feed time, `"15 min atrás"`, relative to `now`.
pub fn format_time_ago(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    format_relative(now.signed_duration_since(at))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1234), "1.234");
        assert_eq!(format_count(45678), "45.678");
        assert_eq!(format_count(1234567), "1.234.567");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(Decimal::from(89345)), "R$ 89.345,00");
        assert_eq!(format_currency(Decimal::new(12505, 1)), "R$ 1.250,50");
        assert_eq!(format_currency(Decimal::new(5, 3)), "R$ 0,01");
        assert_eq!(format_currency(Decimal::new(-150, 0)), "-R$ 150,00");
        assert_eq!(format_currency(Decimal::ZERO), "R$ 0,00");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(28.5), "28,5%");
        assert_eq!(format_percentage(0.0), "0,0%");
        assert_eq!(format_percentage(f64::NAN), "0,0%");
    }

    #[test]
    fn test_dates_in_local_zone() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 1, 30, 0).unwrap();
        let brt = FixedOffset::west_opt(3 * 3600).unwrap();
        assert_eq!(format_date(&at), "01/03/2024");
        assert_eq!(format_date(&at.with_timezone(&brt)), "29/02/2024");
        assert_eq!(format_datetime(&at.with_timezone(&brt)), "29/02/2024 22:30");
    }

    #[test]
    fn test_format_date_range() {
        let start = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap();
        assert_eq!(
            format_date_range(Some(&start), Some(&end)),
            "15 jan - 15 mar 2024"
        );
        let next_year = Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap();
        assert_eq!(
            format_date_range(Some(&start), Some(&next_year)),
            "15 jan 2024 - 01 fev 2025"
        );
        assert_eq!(format_date_range::<Utc>(None, None), "-");
    }

    #[test]
    fn test_format_last_login() {
        assert_eq!(format_last_login::<Utc>(None), "Nunca");
        let at = Utc.with_ymd_and_hms(2024, 1, 30, 14, 5, 0).unwrap();
        assert_eq!(format_last_login(Some(&at)), "30/01/2024 14:05");
    }

    #[test]
    fn test_progress_percentage() {
        assert_eq!(progress_percentage(Decimal::from(50), Decimal::from(200)), 25.0);
        assert_eq!(progress_percentage(Decimal::from(500), Decimal::from(200)), 100.0);
        assert_eq!(progress_percentage(Decimal::from(500), Decimal::ZERO), 0.0);
    }
}
