//! Output Calendar
//!
//! Daily output figures for a month and the grid the heat-map is drawn on.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, Months, NaiveDate};
use serde_json::Value;

use crate::value::{as_id, as_number, present};

/// Figures for one day
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DailyOutput {
    pub vcc: f64,
    pub completed: i64,
    pub incomplete: i64,
}

pub type IncomeMap = BTreeMap<NaiveDate, DailyOutput>;

/// Parse a `YYYYMMDD` day key
pub fn parse_day_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key.trim(), "%Y%m%d").ok()
}

/// `YYYYMMDD`, as the day task endpoint expects
pub fn day_key(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// Convert the sparse `{first, second, third, fourth}` rows into a day map.
/// Rows with an unreadable day are skipped.
pub fn parse_income(data: &Value) -> IncomeMap {
    let mut map = IncomeMap::new();
    let Some(rows) = data.as_array() else {
        return map;
    };
    for row in rows {
        let day = match present(row, "first") {
            Some(Value::String(s)) => parse_day_key(s),
            Some(other) => as_id(other).and_then(|n| parse_day_key(&n.to_string())),
            None => None,
        };
        let Some(day) = day else {
            log::debug!("[INCOME] Skipping row without a day: {}", row);
            continue;
        };
        map.insert(
            day,
            DailyOutput {
                vcc: present(row, "second").and_then(as_number).unwrap_or(0.0),
                completed: present(row, "third").and_then(as_id).unwrap_or(0),
                incomplete: present(row, "fourth").and_then(as_id).unwrap_or(0),
            },
        );
    }
    map
}

/// Heat-map shade of a calendar cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeatLevel {
    None,
    Low,
    Medium,
    High,
}

impl HeatLevel {
    pub fn of(output: Option<&DailyOutput>) -> Self {
        match output {
            None => HeatLevel::None,
            Some(o) if o.completed >= 6 => HeatLevel::High,
            Some(o) if o.completed >= 3 => HeatLevel::Medium,
            Some(_) => HeatLevel::Low,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            HeatLevel::None => "hover:bg-gray-100",
            HeatLevel::Low => "bg-red-50 border-red-200",
            HeatLevel::Medium => "bg-blue-100 border-blue-300",
            HeatLevel::High => "bg-emerald-100 border-emerald-300",
        }
    }
}

/// Calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth {
    first: NaiveDate,
}

impl YearMonth {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| Self { first })
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn previous(&self) -> Self {
        Self {
            first: self.first.checked_sub_months(Months::new(1)).unwrap_or(self.first),
        }
    }

    pub fn next(&self) -> Self {
        Self {
            first: self.first.checked_add_months(Months::new(1)).unwrap_or(self.first),
        }
    }

    pub fn days_in_month(&self) -> u32 {
        let next = self.next().first;
        if next == self.first {
            return 31;
        }
        (next - self.first).num_days() as u32
    }

    /// `YYYYMM`, as the output endpoint expects
    pub fn key(&self) -> String {
        self.first.format("%Y%m").to_string()
    }

    /// Blank cells before day 1 in a Sunday-first week
    pub fn leading_blanks(&self) -> u32 {
        self.first.weekday().num_days_from_sunday()
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.first.iter_days().take(self.days_in_month() as usize)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first.format("%Y年%m月"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_income_rows() {
        let data = json!([
            {"first": "20260227", "second": 12.5, "third": 4, "fourth": 1},
            {"first": 20260228, "second": "3", "third": 0, "fourth": 0},
            {"first": "bad", "third": 9},
            {"second": 1}
        ]);
        let map = parse_income(&data);
        assert_eq!(map.len(), 2);
        let day = map.get(&date(2026, 2, 27)).unwrap();
        assert_eq!(day.vcc, 12.5);
        assert_eq!(day.completed, 4);
        assert_eq!(day.incomplete, 1);
        assert_eq!(map.get(&date(2026, 2, 28)).unwrap().vcc, 3.0);
    }

    #[test]
    fn test_heat_levels() {
        let out = |completed| DailyOutput { completed, ..Default::default() };
        assert_eq!(HeatLevel::of(None), HeatLevel::None);
        assert_eq!(HeatLevel::of(Some(&out(0))), HeatLevel::Low);
        assert_eq!(HeatLevel::of(Some(&out(3))), HeatLevel::Medium);
        assert_eq!(HeatLevel::of(Some(&out(6))), HeatLevel::High);
    }

    #[test]
    fn test_month_grid() {
        // February 2026 starts on a Sunday
        let feb = YearMonth::new(2026, 2).unwrap();
        assert_eq!(feb.leading_blanks(), 0);
        assert_eq!(feb.days_in_month(), 28);
        assert_eq!(feb.key(), "202602");
        assert_eq!(feb.to_string(), "2026年02月");

        let mar = feb.next();
        assert_eq!(mar.key(), "202603");
        assert_eq!(mar.leading_blanks(), 0);
        assert_eq!(mar.days().count(), 31);

        let jan = feb.previous();
        assert_eq!(jan.key(), "202601");
        assert_eq!(jan.leading_blanks(), 4);
        assert_eq!(YearMonth::new(2025, 12).unwrap().next().key(), "202601");
    }

    #[test]
    fn test_day_key() {
        assert_eq!(day_key(date(2026, 3, 5)), "20260305");
        assert_eq!(parse_day_key("20260305"), Some(date(2026, 3, 5)));
    }
}
