//! Query criteria shared by the PostgreSQL and in-memory stores.

use crate::error::AppError;
use chrono::{Datelike, Duration, NaiveDate};

/// Named date ranges offered by the admin date filters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DateFilter {
    Today,
    Past7Days,
    ThisMonth,
    ThisYear,
    Null,
    NotNull,
}

impl std::str::FromStr for DateFilter {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "today" => Ok(DateFilter::Today),
            "past_7_days" => Ok(DateFilter::Past7Days),
            "this_month" => Ok(DateFilter::ThisMonth),
            "this_year" => Ok(DateFilter::ThisYear),
            "null" => Ok(DateFilter::Null),
            "not_null" => Ok(DateFilter::NotNull),
            _ => Err(AppError::BadRequest(format!(
                "invalid date filter: {} (expected today, past_7_days, this_month, this_year, null or not_null)",
                s
            ))),
        }
    }
}

/// A date filter resolved against a concrete day. Ranges are half-open: `since <= d < until`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DateCondition {
    Range { since: NaiveDate, until: NaiveDate },
    IsNull,
    IsNotNull,
}

impl DateFilter {
    pub fn resolve(self, today: NaiveDate) -> DateCondition {
        let tomorrow = today + Duration::days(1);
        match self {
            DateFilter::Today => DateCondition::Range {
                since: today,
                until: tomorrow,
            },
            DateFilter::Past7Days => DateCondition::Range {
                since: today - Duration::days(7),
                until: tomorrow,
            },
            DateFilter::ThisMonth => {
                let since = today.with_day(1).unwrap_or(today);
                let until = if since.month() == 12 {
                    NaiveDate::from_ymd_opt(since.year() + 1, 1, 1)
                } else {
                    NaiveDate::from_ymd_opt(since.year(), since.month() + 1, 1)
                }
                .unwrap_or(tomorrow);
                DateCondition::Range { since, until }
            }
            DateFilter::ThisYear => {
                let since = NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today);
                let until = NaiveDate::from_ymd_opt(today.year() + 1, 1, 1).unwrap_or(tomorrow);
                DateCondition::Range { since, until }
            }
            DateFilter::Null => DateCondition::IsNull,
            DateFilter::NotNull => DateCondition::IsNotNull,
        }
    }
}

impl DateCondition {
    pub fn matches(&self, value: Option<NaiveDate>) -> bool {
        match (self, value) {
            (DateCondition::IsNull, v) => v.is_none(),
            (DateCondition::IsNotNull, v) => v.is_some(),
            (DateCondition::Range { since, until }, Some(d)) => *since <= d && d < *until,
            (DateCondition::Range { .. }, None) => false,
        }
    }
}

/// Splits a search box value into terms. Every term must match at least one search field.
pub fn search_terms(q: Option<&str>) -> Vec<String> {
    q.map(|s| s.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}

/// Case-insensitive containment used for admin search.
pub fn term_matches(term: &str, fields: &[&str]) -> bool {
    let term = term.to_lowercase();
    fields.iter().any(|f| f.to_lowercase().contains(&term))
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FacultyFilter {
    pub search: Vec<String>,
    pub established: Option<DateCondition>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct StudentFilter {
    pub search: Vec<String>,
    pub faculty_id: Option<i64>,
    pub is_active: Option<bool>,
    pub graduation_year: Option<i32>,
    pub enrolled: Option<DateCondition>,
}

impl StudentFilter {
    pub fn active() -> Self {
        StudentFilter {
            is_active: Some(true),
            ..Default::default()
        }
    }

    pub fn active_in(faculty_id: i64) -> Self {
        StudentFilter {
            faculty_id: Some(faculty_id),
            is_active: Some(true),
            ..Default::default()
        }
    }
}

/// LIMIT/OFFSET slice of an ordered result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
    pub limit: u64,
    pub offset: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn resolves_month_across_year_end() {
        let cond = DateFilter::ThisMonth.resolve(date(2026, 12, 19));
        assert_eq!(
            cond,
            DateCondition::Range {
                since: date(2026, 12, 1),
                until: date(2027, 1, 1)
            }
        );
        assert!(cond.matches(Some(date(2026, 12, 31))));
        assert!(!cond.matches(Some(date(2027, 1, 1))));
        assert!(!cond.matches(None));
    }

    #[test]
    fn past_seven_days_includes_today() {
        let today = date(2026, 10, 19);
        let cond = DateFilter::Past7Days.resolve(today);
        assert!(cond.matches(Some(today)));
        assert!(cond.matches(Some(date(2026, 10, 12))));
        assert!(!cond.matches(Some(date(2026, 10, 11))));
    }

    #[test]
    fn null_filters() {
        assert!(DateCondition::IsNull.matches(None));
        assert!(!DateCondition::IsNotNull.matches(None));
        assert_eq!("null".parse::<DateFilter>().unwrap(), DateFilter::Null);
        assert!("yesterday".parse::<DateFilter>().is_err());
    }

    #[test]
    fn search_terms_split_on_whitespace() {
        assert_eq!(search_terms(Some("  ada  lovelace ")), vec!["ada", "lovelace"]);
        assert!(search_terms(None).is_empty());
        assert!(term_matches("LOVE", &["Ada", "Lovelace"]));
        assert!(!term_matches("turing", &["Ada", "Lovelace"]));
    }
}
