//! Header heuristics for tabs whose layout is only known at request time.

const DATE_TERM_CJK: &str = "日期";
const TIME_TERM_CJK: &str = "時間";
const DATE_TERM: &str = "date";
const CASE_TERM_CJK: &str = "案件";

fn compact_lowercase(label: &str) -> String {
    label
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

/// `日期`/`時間` are matched with whitespace removed; `date` is matched on the
/// lower-cased label as written, so `"Due Date"` matches but `"da te"` does not.
pub fn is_time_label(label: &str) -> bool {
    if label.is_empty() {
        return false;
    }
    let compact = compact_lowercase(label);
    compact.contains(DATE_TERM_CJK)
        || compact.contains(TIME_TERM_CJK)
        || label.to_lowercase().contains(DATE_TERM)
}

pub fn is_case_label(label: &str) -> bool {
    !label.is_empty() && compact_lowercase(label).contains(CASE_TERM_CJK)
}

pub fn find_time_column(header: &[String]) -> Option<usize> {
    header.iter().position(|label| is_time_label(label))
}

pub fn find_case_column(header: &[String]) -> Option<usize> {
    header.iter().position(|label| is_case_label(label))
}

/// Resolved positions of the time and case-name columns of one tab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeaderColumns {
    pub time: Option<usize>,
    pub case_name: Option<usize>,
}

impl HeaderColumns {
    pub fn locate(header: &[String]) -> Self {
        HeaderColumns {
            time: find_time_column(header),
            case_name: find_case_column(header),
        }
    }

    pub fn is_reserved(&self, index: usize) -> bool {
        self.time == Some(index) || self.case_name == Some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|label| label.to_string()).collect()
    }

    #[test]
    fn test_cjk_date_and_time_labels() {
        assert_eq!(find_time_column(&header(&["案件", "日期"])), Some(1));
        assert_eq!(find_time_column(&header(&["備註", "時 間"])), Some(1));
        assert_eq!(find_time_column(&header(&["交易\u{3000}日期"])), Some(0));
    }

    #[test]
    fn test_date_matches_case_insensitively_without_stripping() {
        assert_eq!(find_time_column(&header(&["name", "Due DATE"])), Some(1));
        assert_eq!(find_time_column(&header(&["name", "da te"])), None);
        assert_eq!(find_time_column(&header(&["updated"])), Some(0), "substring of upDATEd");
    }

    #[test]
    fn test_first_matching_column_wins() {
        assert_eq!(find_time_column(&header(&["時間", "日期", "date"])), Some(0));
        assert_eq!(find_case_column(&header(&["案件編號", "案件名稱"])), Some(0));
    }

    #[test]
    fn test_case_label_ignores_whitespace() {
        assert_eq!(find_case_column(&header(&["id", " 案 件 "])), Some(1));
        assert_eq!(find_case_column(&header(&["id", "名稱"])), None);
    }

    #[test]
    fn test_empty_labels_never_match() {
        assert_eq!(find_time_column(&header(&["", ""])), None);
        assert_eq!(find_case_column(&header(&[""])), None);
        assert_eq!(HeaderColumns::locate(&[]), HeaderColumns::default());
    }

    #[test]
    fn test_remark_column_is_not_reserved() {
        let columns = HeaderColumns::locate(&header(&["日期", "備註"]));
        assert_eq!(columns.time, Some(0));
        assert_eq!(columns.case_name, None);
        assert!(columns.is_reserved(0));
        assert!(!columns.is_reserved(1));
    }
}
