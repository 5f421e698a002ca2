//! Weekly operating hours

use crate::error::StoreError;
use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

const TIME_FORMAT: &str = "%H:%M";

/// Opening window for one weekday
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayHours {
    pub day: Weekday,
    pub is_open: bool,
    #[serde(with = "hhmm")]
    pub open_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub close_time: NaiveTime,
}

impl DayHours {
    /// Parse `HH:MM` strings into a validated window
    ///
    /// # Errors
    /// - `StoreError::InvalidTime` for malformed times
    /// - `StoreError::ClosesBeforeOpens` if close is not after open
    pub fn parse(day: Weekday, is_open: bool, open: &str, close: &str) -> Result<Self, StoreError> {
        let hours = Self {
            day,
            is_open,
            open_time: parse_time(open)?,
            close_time: parse_time(close)?,
        };
        hours.validate()?;
        Ok(hours)
    }

    fn validate(&self) -> Result<(), StoreError> {
        if self.close_time <= self.open_time {
            return Err(StoreError::ClosesBeforeOpens {
                day: self.day,
                open: self.open_time.format(TIME_FORMAT).to_string(),
                close: self.close_time.format(TIME_FORMAT).to_string(),
            });
        }
        Ok(())
    }

    /// `09:00-22:00`, or `Closed`
    #[must_use]
    pub fn display(&self) -> String {
        if self.is_open {
            format!(
                "{}-{}",
                self.open_time.format(TIME_FORMAT),
                self.close_time.format(TIME_FORMAT)
            )
        } else {
            "Closed".to_string()
        }
    }
}

/// Seven-day schedule, Monday first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSchedule")]
pub struct OperatingHours {
    days: Vec<DayHours>,
}

#[derive(Deserialize)]
struct RawSchedule {
    days: Vec<DayHours>,
}

impl TryFrom<RawSchedule> for OperatingHours {
    type Error = StoreError;

    /// Exactly Monday to Sunday, in order, each window valid
    fn try_from(raw: RawSchedule) -> Result<Self, Self::Error> {
        let in_order = raw.days.len() == 7
            && raw
                .days
                .iter()
                .enumerate()
                .all(|(i, d)| d.day.num_days_from_monday() as usize == i);
        if !in_order {
            return Err(StoreError::InvalidSchedule {
                days: raw.days.iter().map(|d| d.day).collect(),
            });
        }
        for day in raw.days.iter().filter(|d| d.is_open) {
            day.validate()?;
        }
        Ok(Self { days: raw.days })
    }
}

impl OperatingHours {
    #[must_use]
    pub fn days(&self) -> &[DayHours] {
        &self.days
    }

    #[must_use]
    pub fn day(&self, day: Weekday) -> &DayHours {
        &self.days[day.num_days_from_monday() as usize]
    }

    /// Replace one day's window
    ///
    /// # Errors
    /// Returns `StoreError::ClosesBeforeOpens` if the window is inverted
    pub fn update_day(&mut self, hours: DayHours) -> Result<(), StoreError> {
        hours.validate()?;
        self.days[hours.day.num_days_from_monday() as usize] = hours;
        Ok(())
    }

    /// Open or close a day without touching its times
    pub fn set_open(&mut self, day: Weekday, is_open: bool) {
        self.days[day.num_days_from_monday() as usize].is_open = is_open;
    }

    /// Copy one day's open/close times to every day (open flags are kept)
    pub fn copy_to_all(&mut self, template: Weekday) {
        let source = *self.day(template);
        for day in &mut self.days {
            day.open_time = source.open_time;
            day.close_time = source.close_time;
        }
    }

    /// Whether the store is open at `time` on `day`
    #[must_use]
    pub fn is_open_at(&self, day: Weekday, time: NaiveTime) -> bool {
        let hours = self.day(day);
        hours.is_open && time >= hours.open_time && time < hours.close_time
    }
}

impl Default for OperatingHours {
    fn default() -> Self {
        let window = |day, open: (u32, u32), close: (u32, u32)| DayHours {
            day,
            is_open: true,
            open_time: NaiveTime::from_hms_opt(open.0, open.1, 0).unwrap_or_default(),
            close_time: NaiveTime::from_hms_opt(close.0, close.1, 0).unwrap_or_default(),
        };
        Self {
            days: vec![
                window(Weekday::Mon, (9, 0), (22, 0)),
                window(Weekday::Tue, (9, 0), (22, 0)),
                window(Weekday::Wed, (9, 0), (22, 0)),
                window(Weekday::Thu, (9, 0), (22, 0)),
                window(Weekday::Fri, (9, 0), (23, 0)),
                window(Weekday::Sat, (10, 0), (23, 0)),
                window(Weekday::Sun, (10, 0), (22, 0)),
            ],
        }
    }
}

fn parse_time(value: &str) -> Result<NaiveTime, StoreError> {
    NaiveTime::parse_from_str(value.trim(), TIME_FORMAT).map_err(|_| StoreError::InvalidTime {
        value: value.to_string(),
    })
}

mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(super::TIME_FORMAT).to_string())
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, super::TIME_FORMAT).map_err(serde::de::Error::custom)
    }
}
