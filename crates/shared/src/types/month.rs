//! Calendar months in fiscal-year order.
//!
//! The fiscal year runs April to March, so `Month::April` sorts first and
//! `Month::March` last.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A calendar month, ordered by position in the fiscal year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Month {
    /// April (fiscal month 1).
    April,
    /// May.
    May,
    /// June.
    June,
    /// July.
    July,
    /// August.
    August,
    /// September.
    September,
    /// October.
    October,
    /// November.
    November,
    /// December.
    December,
    /// January.
    January,
    /// February.
    February,
    /// March (fiscal month 12).
    March,
}

/// Error returned when a string does not name a month.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown month: {0}")]
pub struct ParseMonthError(pub String);

impl Month {
    /// All months in fiscal-year order.
    pub const ALL: [Self; 12] = [
        Self::April,
        Self::May,
        Self::June,
        Self::July,
        Self::August,
        Self::September,
        Self::October,
        Self::November,
        Self::December,
        Self::January,
        Self::February,
        Self::March,
    ];

    /// Full English name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::April => "April",
            Self::May => "May",
            Self::June => "June",
            Self::July => "July",
            Self::August => "August",
            Self::September => "September",
            Self::October => "October",
            Self::November => "November",
            Self::December => "December",
            Self::January => "January",
            Self::February => "February",
            Self::March => "March",
        }
    }

    /// Calendar month number, 1 for January through 12 for December.
    #[must_use]
    pub const fn number(self) -> u32 {
        match self {
            Self::January => 1,
            Self::February => 2,
            Self::March => 3,
            Self::April => 4,
            Self::May => 5,
            Self::June => 6,
            Self::July => 7,
            Self::August => 8,
            Self::September => 9,
            Self::October => 10,
            Self::November => 11,
            Self::December => 12,
        }
    }

    /// Month from its calendar number (1-12).
    #[must_use]
    pub fn from_number(number: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.number() == number)
    }

    /// Month a date falls in.
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        // `Datelike::month` is always 1..=12.
        Self::from_number(date.month()).unwrap_or(Self::January)
    }

    /// Label of the single column produced by an entire-month view.
    #[must_use]
    pub fn total_label(self) -> String {
        format!("{} Total", self.name())
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Month {
    type Err = ParseMonthError;

    /// Accepts full or three-letter names in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        if needle.len() < 3 {
            return Err(ParseMonthError(s.to_string()));
        }
        Self::ALL
            .into_iter()
            .find(|m| {
                let name = m.name().to_lowercase();
                name == needle || (needle.len() == 3 && name.starts_with(&needle))
            })
            .ok_or_else(|| ParseMonthError(s.to_string()))
    }
}

impl TryFrom<String> for Month {
    type Error = ParseMonthError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
