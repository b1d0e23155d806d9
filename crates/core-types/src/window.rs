use crate::time::parse_iso_to_epoch;

/// An inclusive `[start, end]` filter in epoch seconds; either side may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: Option<i64>,
    pub end: Option<i64>,
}

impl TimeWindow {
    pub fn contains(&self, timestamp: i64) -> bool {
        self.start.is_none_or(|start| timestamp >= start)
            && self.end.is_none_or(|end| timestamp <= end)
    }
}

/// The window exactly as the caller supplied it.
///
/// The raw strings are kept because the aggregated result echoes them back
/// unchanged when no data falls inside the window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestedWindow {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl RequestedWindow {
    pub fn new(start: Option<String>, end: Option<String>) -> Self {
        let non_blank = |s: String| if s.trim().is_empty() { None } else { Some(s) };
        Self {
            start: start.and_then(non_blank),
            end: end.and_then(non_blank),
        }
    }

    /// Parsed bounds; unparseable strings become open bounds.
    pub fn bounds(&self) -> TimeWindow {
        TimeWindow {
            start: self.start.as_deref().and_then(parse_iso_to_epoch),
            end: self.end.as_deref().and_then(parse_iso_to_epoch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_inclusive() {
        let window = TimeWindow {
            start: Some(10),
            end: Some(20),
        };
        assert!(window.contains(10));
        assert!(window.contains(20));
        assert!(!window.contains(9));
        assert!(!window.contains(21));
        assert!(TimeWindow::default().contains(i64::MIN));
    }

    #[test]
    fn blank_strings_are_treated_as_absent() {
        let requested = RequestedWindow::new(Some("".to_string()), Some("  ".to_string()));
        assert_eq!(requested, RequestedWindow::default());
    }

    #[test]
    fn malformed_bound_degrades_to_open_side() {
        let requested = RequestedWindow::new(
            Some("not-a-date".to_string()),
            Some("1970-01-02T00:00:00Z".to_string()),
        );
        assert_eq!(
            requested.bounds(),
            TimeWindow {
                start: None,
                end: Some(86_400)
            }
        );
        assert_eq!(requested.start.as_deref(), Some("not-a-date"));
    }
}
