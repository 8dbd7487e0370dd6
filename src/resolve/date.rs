use std::fmt;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::resolve::error::ResolveError;

static DATE_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{8}$").expect("valid date pattern"));
static PUBLISHED_DAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]{4})-([0-9]{2})-([0-9]{2})").expect("valid published date pattern")
});

/// A `yyyymmdd` route segment. Only the shape is checked, not the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DateParam(String);

impl DateParam {
    pub fn parse(raw: &str) -> Result<Self, ResolveError> {
        if DATE_PARAM.is_match(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(ResolveError::InvalidDateFormat(raw.to_string()))
        }
    }

    /// Day part of a `YYYY-MM-DD HH:mm:ss` published timestamp.
    pub fn from_published(published_at: &str) -> Option<Self> {
        let captures = PUBLISHED_DAY.captures(published_at)?;
        Some(Self(format!(
            "{}{}{}",
            &captures[1], &captures[2], &captures[3]
        )))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `"September 18, 2025"`, or the raw digits when they are not a real day.
    pub fn display(&self) -> String {
        NaiveDate::parse_from_str(&self.0, "%Y%m%d")
            .map(|date| date.format("%B %-d, %Y").to_string())
            .unwrap_or_else(|_| self.0.clone())
    }
}

impl fmt::Display for DateParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
