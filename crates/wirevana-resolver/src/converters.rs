//! Value converters applied by `{binding path, converter=Name}`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;
use wirevana_core::value::is_truthy;

/// The closed set of known converters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Converter {
    /// ISO-8601 timestamp to "today", "yesterday", "3 days ago", "in 2 days".
    RelativeDate,
    /// Truthy to `"strikethrough"`, otherwise `"none"`.
    CompletedToStrikethrough,
    InvertBool,
    ToUpper,
}

impl Converter {
    pub const ALL: [Converter; 4] = [
        Converter::RelativeDate,
        Converter::CompletedToStrikethrough,
        Converter::InvertBool,
        Converter::ToUpper,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.name() == name.trim())
    }

    pub fn name(self) -> &'static str {
        match self {
            Converter::RelativeDate => "RelativeDate",
            Converter::CompletedToStrikethrough => "CompletedToStrikethrough",
            Converter::InvertBool => "InvertBool",
            Converter::ToUpper => "ToUpper",
        }
    }

    /// Apply the converter. Values it cannot interpret pass through.
    pub fn apply(self, value: &Value, now: DateTime<Utc>) -> Value {
        match self {
            Converter::RelativeDate => value
                .as_str()
                .and_then(parse_date)
                .map(|date| Value::String(relative_days(date, now.date_naive())))
                .unwrap_or_else(|| value.clone()),
            Converter::CompletedToStrikethrough => {
                let decoration = if is_truthy(value) { "strikethrough" } else { "none" };
                Value::String(decoration.to_string())
            }
            Converter::InvertBool => Value::Bool(!is_truthy(value)),
            Converter::ToUpper => match value {
                Value::String(text) => Value::String(text.to_uppercase()),
                other => other.clone(),
            },
        }
    }
}

/// Parse an RFC 3339 timestamp, a naive `YYYY-MM-DDTHH:MM:SS`, or a plain date.
fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
        return Some(timestamp.with_timezone(&Utc).date_naive());
    }
    if let Ok(timestamp) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S") {
        return Some(timestamp.date());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
}

fn relative_days(date: NaiveDate, today: NaiveDate) -> String {
    match (date - today).num_days() {
        0 => "today".to_string(),
        -1 => "yesterday".to_string(),
        1 => "tomorrow".to_string(),
        days if days < 0 => format!("{} days ago", -days),
        days => format!("in {} days", days),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, 20, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_relative_date() {
        let convert = |text: &str| Converter::RelativeDate.apply(&json!(text), now());
        assert_eq!(convert("2024-02-20T08:00:00Z"), json!("today"));
        assert_eq!(convert("2024-02-19"), json!("yesterday"));
        assert_eq!(convert("2024-02-18T18:30:00Z"), json!("2 days ago"));
        assert_eq!(convert("2024-02-21"), json!("tomorrow"));
        assert_eq!(convert("2024-02-25T10:00:00"), json!("in 5 days"));
        assert_eq!(convert("not a date"), json!("not a date"));
    }

    #[test]
    fn test_strikethrough() {
        let convert = |value: Value| Converter::CompletedToStrikethrough.apply(&value, now());
        assert_eq!(convert(json!(true)), json!("strikethrough"));
        assert_eq!(convert(json!(false)), json!("none"));
    }

    #[test]
    fn test_invert_and_upper() {
        assert_eq!(Converter::InvertBool.apply(&json!(true), now()), json!(false));
        assert_eq!(Converter::ToUpper.apply(&json!("due"), now()), json!("DUE"));
        assert_eq!(Converter::ToUpper.apply(&json!(3), now()), json!(3));
    }

    #[test]
    fn test_names() {
        for converter in Converter::ALL {
            assert_eq!(Converter::from_name(converter.name()), Some(converter));
        }
        assert_eq!(Converter::from_name("Sparkle"), None);
    }
}
