use std::{str::FromStr, sync::LazyLock};

use regex::Regex;
use thiserror::Error;

// Same grammar as the `ms` package: "365d", "12h", "2 days", "1.5h", "120" (ms).
static SPAN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(-?(?:\d+)?\.?\d+) *(milliseconds?|msecs?|ms|seconds?|secs?|s|minutes?|mins?|m|hours?|hrs?|h|days?|d|weeks?|w|years?|yrs?|y)?$",
    )
    .expect("token lifetime pattern is valid")
});

const SECOND_MS: f64 = 1_000.0;
const MINUTE_MS: f64 = SECOND_MS * 60.0;
const HOUR_MS: f64 = MINUTE_MS * 60.0;
const DAY_MS: f64 = HOUR_MS * 24.0;
const WEEK_MS: f64 = DAY_MS * 7.0;
const YEAR_MS: f64 = DAY_MS * 365.25;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenLifetimeError {
    #[error("Unrecognized token lifetime '{0}'")]
    Unrecognized(String),
    #[error("Token lifetime '{0}' is shorter than one second")]
    TooShort(String),
}

/// How long an issued token stays valid, kept with the text it was configured as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenLifetime {
    raw: String,
    seconds: i64,
}

impl TokenLifetime {
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn seconds(&self) -> i64 {
        self.seconds
    }
}

impl FromStr for TokenLifetime {
    type Err = TokenLifetimeError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let unrecognized = || TokenLifetimeError::Unrecognized(raw.to_string());

        let captures = SPAN_PATTERN.captures(raw.trim()).ok_or_else(unrecognized)?;
        let amount: f64 = captures[1].parse().map_err(|_| unrecognized())?;
        let unit_ms = match captures
            .get(2)
            .map(|unit| unit.as_str().to_lowercase())
            .as_deref()
        {
            None | Some("milliseconds" | "millisecond" | "msecs" | "msec" | "ms") => 1.0,
            Some("seconds" | "second" | "secs" | "sec" | "s") => SECOND_MS,
            Some("minutes" | "minute" | "mins" | "min" | "m") => MINUTE_MS,
            Some("hours" | "hour" | "hrs" | "hr" | "h") => HOUR_MS,
            Some("days" | "day" | "d") => DAY_MS,
            Some("weeks" | "week" | "w") => WEEK_MS,
            Some("years" | "year" | "yrs" | "yr" | "y") => YEAR_MS,
            Some(_) => return Err(unrecognized()),
        };

        let seconds = (amount * unit_ms / SECOND_MS).floor();
        if seconds < 1.0 {
            return Err(TokenLifetimeError::TooShort(raw.to_string()));
        }

        Ok(TokenLifetime {
            raw: raw.to_string(),
            seconds: seconds as i64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seconds(raw: &str) -> i64 {
        raw.parse::<TokenLifetime>().expect("valid lifetime").seconds()
    }

    #[test]
    fn test_short_units() {
        assert_eq!(seconds("365d"), 365 * 86_400);
        assert_eq!(seconds("12h"), 12 * 3_600);
        assert_eq!(seconds("30m"), 1_800);
        assert_eq!(seconds("45s"), 45);
        assert_eq!(seconds("1w"), 604_800);
        assert_eq!(seconds("1y"), 31_557_600);
    }

    #[test]
    fn test_long_units_and_spacing() {
        assert_eq!(seconds("2 days"), 172_800);
        assert_eq!(seconds("1.5h"), 5_400);
        assert_eq!(seconds("10 Hours"), 36_000);
    }

    #[test]
    fn test_unitless_values_are_milliseconds() {
        assert_eq!(seconds("120000"), 120);
        assert_eq!(seconds("1999"), 1);
    }

    #[test]
    fn test_keeps_configured_text() {
        let lifetime: TokenLifetime = "365d".parse().expect("valid lifetime");
        assert_eq!(lifetime.as_str(), "365d");
    }

    #[test]
    fn test_rejects_garbage_and_sub_second_spans() {
        assert_eq!(
            "forever".parse::<TokenLifetime>(),
            Err(TokenLifetimeError::Unrecognized("forever".to_string()))
        );
        assert_eq!(
            "500ms".parse::<TokenLifetime>(),
            Err(TokenLifetimeError::TooShort("500ms".to_string()))
        );
        assert!("-1d".parse::<TokenLifetime>().is_err());
    }
}
