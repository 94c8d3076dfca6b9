use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    time::Duration,
};

use clap::ValueEnum;

use crate::errors::WatchError;

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: u64 = 24 * SECONDS_PER_HOUR;
const MAX_PERIOD_SECONDS: u64 = 366 * SECONDS_PER_DAY;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TimeUnit {
    Minutes,
    #[default]
    Hours,
    Days,
}

impl TimeUnit {
    fn seconds(&self) -> u64 {
        match self {
            TimeUnit::Minutes => SECONDS_PER_MINUTE,
            TimeUnit::Hours => SECONDS_PER_HOUR,
            TimeUnit::Days => SECONDS_PER_DAY,
        }
    }
}

impl Display for TimeUnit {
    fn fmt(&self, format: &mut Formatter) -> FmtResult {
        write!(format, "{}", format!("{:?}", self).to_lowercase())
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    #[default]
    Once,
    Every {
        amount: u64,
        unit: TimeUnit,
    },
}

impl Schedule {
    pub fn every(amount: u64, unit: TimeUnit) -> Result<Self, WatchError> {
        if amount == 0 {
            return Err(WatchError::InvalidSchedule(format!(
                "interval must be at least 1 {unit}"
            )));
        }

        let Some(seconds) = amount.checked_mul(unit.seconds()) else {
            return Err(WatchError::InvalidSchedule(format!(
                "{amount} {unit} is too long"
            )));
        };

        if seconds > MAX_PERIOD_SECONDS {
            return Err(WatchError::InvalidSchedule(format!(
                "{amount} {unit} is longer than a year"
            )));
        }

        Ok(Self::Every { amount, unit })
    }

    /// `None` for a single run.
    pub fn period(&self) -> Option<Duration> {
        match self {
            Schedule::Once => None,
            Schedule::Every { amount, unit } => {
                Some(Duration::from_secs(amount.saturating_mul(unit.seconds())))
            }
        }
    }
}

impl Display for Schedule {
    fn fmt(&self, format: &mut Formatter) -> FmtResult {
        match self {
            Schedule::Once => write!(format, "once"),
            Schedule::Every { amount, unit } => write!(format, "{amount} {unit}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn periods() {
        assert_eq!(Schedule::Once.period(), None);
        assert_eq!(
            Schedule::every(15, TimeUnit::Minutes).unwrap().period(),
            Some(Duration::from_secs(900))
        );
        assert_eq!(
            Schedule::every(2, TimeUnit::Hours).unwrap().period(),
            Some(Duration::from_secs(7_200))
        );
        assert_eq!(
            Schedule::every(1, TimeUnit::Days).unwrap().period(),
            Some(Duration::from_secs(86_400))
        );
    }

    #[test]
    fn rejects_empty_interval() {
        assert!(matches!(
            Schedule::every(0, TimeUnit::Hours),
            Err(WatchError::InvalidSchedule(_))
        ));
    }

    #[test]
    fn rejects_overflowing_interval() {
        assert!(matches!(
            Schedule::every(u64::MAX, TimeUnit::Days),
            Err(WatchError::InvalidSchedule(_))
        ));
        assert!(Schedule::every(367, TimeUnit::Days).is_err());
        assert!(Schedule::every(366, TimeUnit::Days).is_ok());
    }

    #[test]
    fn displays_for_logs() {
        assert_eq!(Schedule::Once.to_string(), "once");
        assert_eq!(
            Schedule::every(30, TimeUnit::Minutes).unwrap().to_string(),
            "30 minutes"
        );
    }
}
