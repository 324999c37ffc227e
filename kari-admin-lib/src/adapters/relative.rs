//! Relative time phrases

use chrono::TimeDelta;

/// `"agora"`, `"1 min atrás"`, `"3 horas atrás"`, `"2 dias atrás"`.
///
/// Negative durations (clock skew) read as `"agora"`.
pub fn format_relative(elapsed: TimeDelta) -> String {
    let minutes = elapsed.num_minutes();
    if minutes < 1 {
        return "agora".to_string();
    }
    if minutes < 60 {
        return format!("{} min atrás", minutes);
    }
    let hours = elapsed.num_hours();
    if hours < 24 {
        let unit = if hours == 1 { "hora" } else { "horas" };
        return format!("{} {} atrás", hours, unit);
    }
    let days = elapsed.num_days();
    let unit = if days == 1 { "dia" } else { "dias" };
    format!("{} {} atrás", days, unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phrases() {
        assert_eq!(format_relative(TimeDelta::seconds(-5)), "agora");
        assert_eq!(format_relative(TimeDelta::minutes(2)), "2 min atrás");
        assert_eq!(format_relative(TimeDelta::minutes(60)), "1 hora atrás");
        assert_eq!(format_relative(TimeDelta::hours(5)), "5 horas atrás");
        assert_eq!(format_relative(TimeDelta::hours(49)), "2 dias atrás");
    }
}
