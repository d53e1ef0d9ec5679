use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};

use super::entry::SearchResultEntry;

// Date-times and dates without an offset are read as UTC.
const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

// ISO date-times with minute precision and an explicit offset.
const OFFSET_DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M%:z", "%Y-%m-%dT%H:%M%z"];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%m/%d/%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
];

/// Parses the calendar date/time notations that spreadsheets commonly render.
pub fn parse_entry_time(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Some(parsed) = parse_offset_date_time(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Some(date) = parse_partial_date(raw) {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }

    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

fn parse_offset_date_time(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = match raw.strip_suffix(['Z', 'z']) {
        Some(local) => format!("{local}+00:00"),
        None => raw.to_string(),
    };
    OFFSET_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(&raw, format).ok())
}

/// `YYYY` and `YYYY-MM`, read as the first day of the period.
fn parse_partial_date(raw: &str) -> Option<NaiveDate> {
    let digits =
        |part: &str, len: usize| part.len() == len && part.bytes().all(|b| b.is_ascii_digit());

    let mut parts = raw.split('-');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(year), None, None) if digits(year, 4) => {
            NaiveDate::from_ymd_opt(year.parse().ok()?, 1, 1)
        }
        (Some(year), Some(month), None) if digits(year, 4) && digits(month, 2) => {
            NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
        }
        _ => None,
    }
}

/// Sort key of an entry: its parsed time, or the Unix epoch when unparseable.
pub fn sort_instant(time: &str) -> DateTime<Utc> {
    parse_entry_time(time).unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// Orders entries newest first. Equal instants keep their incoming order.
pub fn sort_newest_first(entries: Vec<SearchResultEntry>) -> Vec<SearchResultEntry> {
    let mut keyed: Vec<_> = entries
        .into_iter()
        .map(|entry| (sort_instant(&entry.time), entry))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| b.cmp(a));
    keyed.into_iter().map(|(_, entry)| entry).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry(time: &str) -> SearchResultEntry {
        SearchResultEntry {
            sheet: "s".to_string(),
            time: time.to_string(),
            case_name: String::new(),
            content: Vec::new(),
        }
    }

    #[test]
    fn test_parse_iso_date_as_utc_midnight() {
        assert_eq!(
            parse_entry_time("2023-01-05"),
            Some(Utc.with_ymd_and_hms(2023, 1, 5, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_parse_spreadsheet_renderings() {
        let expected = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        assert_eq!(parse_entry_time("2024/6/1"), Some(expected));
        assert_eq!(parse_entry_time("06/01/2024"), Some(expected));
        assert_eq!(parse_entry_time(" 2024-06-01 "), Some(expected));
        assert_eq!(
            parse_entry_time("2024/06/01 13:30"),
            Some(Utc.with_ymd_and_hms(2024, 6, 1, 13, 30, 0).unwrap())
        );
        assert_eq!(
            parse_entry_time("2024-06-01T08:00:00+08:00"),
            Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_parse_partial_iso_dates() {
        assert_eq!(
            parse_entry_time("2024"),
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(
            parse_entry_time("2024-06"),
            Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_entry_time("2024-13"), None);
        assert_eq!(parse_entry_time("24-06"), None);
    }

    #[test]
    fn test_parse_minute_precision_with_offset() {
        let expected = Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap();
        assert_eq!(parse_entry_time("2024-06-01T08:00Z"), Some(expected));
        assert_eq!(parse_entry_time("2024-06-01T16:00+08:00"), Some(expected));
        assert_eq!(parse_entry_time("2024-06-01T03:00-0500"), Some(expected));
    }

    #[test]
    fn test_sort_places_partial_and_offset_dates_by_instant() {
        let sorted = sort_newest_first(vec![
            entry("2023-01-05"),
            entry("2024"),
            entry("not-a-date"),
            entry("2024-06-01T08:00Z"),
            entry("2024-06"),
        ]);
        let times: Vec<_> = sorted.iter().map(|e| e.time.as_str()).collect();
        assert_eq!(
            times,
            vec!["2024-06-01T08:00Z", "2024-06", "2024", "2023-01-05", "not-a-date"]
        );
    }

    #[test]
    fn test_unparseable_times() {
        assert_eq!(parse_entry_time("not-a-date"), None);
        assert_eq!(parse_entry_time(""), None);
        assert_eq!(parse_entry_time("未填日期"), None);
        assert_eq!(sort_instant("未填日期"), DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn test_sort_newest_first_sinks_unparseable_times() {
        let sorted = sort_newest_first(vec![
            entry("2023-01-05"),
            entry("not-a-date"),
            entry("2024-06-01"),
        ]);
        let times: Vec<_> = sorted.iter().map(|e| e.time.as_str()).collect();
        assert_eq!(times, vec!["2024-06-01", "2023-01-05", "not-a-date"]);
    }

    #[test]
    fn test_sort_keeps_order_of_equal_instants() {
        let mut first = entry("2024-01-01");
        first.sheet = "first".to_string();
        let mut second = entry("2024/1/1");
        second.sheet = "second".to_string();

        let sorted = sort_newest_first(vec![first, entry("x"), second]);
        let sheets: Vec<_> = sorted.iter().map(|e| e.sheet.as_str()).collect();
        assert_eq!(sheets, vec!["first", "second", "s"]);
    }
}
