use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::{BirthdayError, BirthdayResult};

/// Language used for month labels and the fixed roster strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Spanish,
    English,
}

impl FromStr for Locale {
    type Err = BirthdayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "es" | "spanish" | "español" => Ok(Self::Spanish),
            "en" | "english" => Ok(Self::English),
            other => Err(BirthdayError::Validation(format!("unknown locale '{other}'"))),
        }
    }
}

/// Calendar month, ordered January to December.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

const SPANISH_LABELS: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

const ENGLISH_LABELS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

impl Month {
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// 1-based month number.
    pub fn number(self) -> u8 {
        self as u8 + 1
    }

    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.get(usize::from(number).checked_sub(1)?).copied()
    }

    pub fn label(self, locale: Locale) -> &'static str {
        let index = self as usize;
        match locale {
            Locale::Spanish => SPANISH_LABELS[index],
            Locale::English => ENGLISH_LABELS[index],
        }
    }

    /// Longest day this month can have in any year. February allows the 29th.
    pub fn max_day(self) -> u8 {
        // 2000 is a leap year, so every plausible day-month exists in it.
        let first = NaiveDate::from_ymd_opt(2000, u32::from(self.number()), 1);
        let next = match self {
            Month::December => NaiveDate::from_ymd_opt(2001, 1, 1),
            _ => NaiveDate::from_ymd_opt(2000, u32::from(self.number()) + 1, 1),
        };
        match (first, next) {
            (Some(first), Some(next)) => (next - first).num_days() as u8,
            _ => 31,
        }
    }
}

/// A recurring annual date with no year component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DayMonth {
    // Field order gives (month, day) ordering for derived Ord.
    month: Month,
    day: u8,
}

impl DayMonth {
    pub fn new(day: u8, month: Month) -> BirthdayResult<Self> {
        if day == 0 || day > month.max_day() {
            return Err(BirthdayError::InvalidDate(format!(
                "{day:02}-{:02} is not a calendar date",
                month.number()
            )));
        }
        Ok(Self { month, day })
    }

    /// Parse `DD-MM`, accepting one or two digits per field.
    pub fn parse(input: &str) -> BirthdayResult<Self> {
        let invalid = || BirthdayError::InvalidDate(format!("'{}' is not in DD-MM format", input.trim()));

        let (day, month) = input.trim().split_once('-').ok_or_else(invalid)?;
        let well_formed =
            |part: &str| (1..=2).contains(&part.len()) && part.bytes().all(|b| b.is_ascii_digit());
        if !well_formed(day) || !well_formed(month) {
            return Err(invalid());
        }

        let day: u8 = day.parse().map_err(|_| invalid())?;
        let month = month
            .parse::<u8>()
            .ok()
            .and_then(Month::from_number)
            .ok_or_else(invalid)?;

        Self::new(day, month)
    }

    pub fn from_date(date: NaiveDate) -> Self {
        // A real calendar date is always a plausible day-month.
        Self {
            day: date.day() as u8,
            month: Month::ALL[date.month0() as usize],
        }
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    pub fn month(&self) -> Month {
        self.month
    }
}

impl FromStr for DayMonth {
    type Err = BirthdayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DayMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}", self.day, self.month.number())
    }
}
