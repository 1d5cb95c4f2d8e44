use core::str::FromStr;
use std::ops::Add;

use derive_more::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(
    Debug, Clone, Copy, PartialEq, PartialOrd, Eq, Ord, Hash, Display, Deserialize, Serialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum WeekDay {
    #[display("monday")]
    Monday = 1,
    #[display("tuesday")]
    Tuesday = 2,
    #[display("wednesday")]
    Wednesday = 3,
    #[display("thursday")]
    Thursday = 4,
    #[display("friday")]
    Friday = 5,
    #[display("saturday")]
    Saturday = 6,
    #[display("sunday")]
    Sunday = 7,
}

impl WeekDay {
    pub const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    #[must_use]
    pub fn as_usize(&self) -> usize {
        *self as usize
    }

    /// Returns how many days it takes to get from `self` to `other`
    /// (always moving forward, between 0 and 6).
    #[must_use]
    pub fn days_until(&self, other: Self) -> usize {
        (other.as_usize() + 7 - self.as_usize()) % 7
    }
}

impl Add<usize> for WeekDay {
    type Output = Self;

    fn add(self, rhs: usize) -> Self::Output {
        Self::ALL[(self.as_usize() - 1 + rhs % 7) % 7]
    }
}

impl From<chrono::Weekday> for WeekDay {
    fn from(value: chrono::Weekday) -> Self {
        Self::ALL[value.num_days_from_monday() as usize]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("\"{input}\" is not a week day, expected a name like \"monday\" or \"mon\"")]
pub struct InvalidWeekDay {
    input: String,
}

impl FromStr for WeekDay {
    type Err = InvalidWeekDay;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        match string.trim().to_ascii_lowercase().as_str() {
            "mon" | "monday" => Ok(Self::Monday),
            "tue" | "tuesday" => Ok(Self::Tuesday),
            "wed" | "wednesday" => Ok(Self::Wednesday),
            "thu" | "thursday" => Ok(Self::Thursday),
            "fri" | "friday" => Ok(Self::Friday),
            "sat" | "saturday" => Ok(Self::Saturday),
            "sun" | "sunday" => Ok(Self::Sunday),
            _ => Err(InvalidWeekDay {
                input: string.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for WeekDay {
    type Error = InvalidWeekDay;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(&value)
    }
}

impl From<WeekDay> for String {
    fn from(value: WeekDay) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn test_days_until() {
        assert_eq!(WeekDay::Monday.days_until(WeekDay::Monday), 0);
        assert_eq!(WeekDay::Monday.days_until(WeekDay::Sunday), 6);
        assert_eq!(WeekDay::Sunday.days_until(WeekDay::Monday), 1);
        assert_eq!(WeekDay::Friday.days_until(WeekDay::Tuesday), 4);
    }

    #[test]
    fn test_add() {
        assert_eq!(WeekDay::Monday + 1, WeekDay::Tuesday);
        assert_eq!(WeekDay::Sunday + 1, WeekDay::Monday);
        assert_eq!(WeekDay::Friday + 9, WeekDay::Sunday);
    }

    #[test]
    fn test_parse() {
        assert_eq!("Mon".parse::<WeekDay>(), Ok(WeekDay::Monday));
        assert_eq!("saturday".parse::<WeekDay>(), Ok(WeekDay::Saturday));
        assert!("someday".parse::<WeekDay>().is_err());
        assert_eq!(WeekDay::Thursday.to_string(), "thursday");
    }

    #[test]
    fn test_from_chrono() {
        assert_eq!(WeekDay::from(chrono::Weekday::Mon), WeekDay::Monday);
        assert_eq!(WeekDay::from(chrono::Weekday::Sun), WeekDay::Sunday);
    }
}
