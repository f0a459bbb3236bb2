//! Calendar buckets and the injectable clock
//!
//! Buckets are computed in UTC so the same instant maps to the same bucket
//! on every device.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

/// Source of the current time
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a chosen instant, moved only by hand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    pub at: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self { at }
    }

    pub fn advance(&mut self, by: Duration) {
        self.at += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.at
    }
}

/// Midnight UTC of the day containing `now`
pub fn start_of_day(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// ISO week-numbering year and week of `now`
pub fn iso_week_of(now: DateTime<Utc>) -> (i32, u32) {
    let week = now.iso_week();
    (week.year(), week.week())
}

/// How often a rotation turns over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cadence {
    Daily,
    Weekly,
}

impl Cadence {
    pub fn bucket_of(&self, now: DateTime<Utc>) -> Bucket {
        match self {
            Cadence::Daily => Bucket::day_of(now),
            Cadence::Weekly => Bucket::week_of(now),
        }
    }

    /// Instant the bucket after the current one begins
    pub fn next_refresh(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let today = start_of_day(now);
        match self {
            Cadence::Daily => today + Duration::days(1),
            Cadence::Weekly => {
                let days_into_week = now.weekday().num_days_from_monday() as i64;
                today + Duration::days(7 - days_into_week)
            }
        }
    }

    pub fn time_until_refresh(&self, now: DateTime<Utc>) -> Duration {
        self.next_refresh(now) - now
    }
}

/// Coarse time key a rotation is stable within
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bucket {
    Day(NaiveDate),
    Week { year: i32, week: u32 },
}

impl Bucket {
    pub fn day_of(now: DateTime<Utc>) -> Self {
        Bucket::Day(now.date_naive())
    }

    pub fn week_of(now: DateTime<Utc>) -> Self {
        let (year, week) = iso_week_of(now);
        Bucket::Week { year, week }
    }

    /// Stable numeric identity: the unix timestamp of the bucket's first
    /// midnight (UTC), so no two buckets of one kind share a hash
    pub fn hash(&self) -> u64 {
        match self {
            Bucket::Day(date) => midnight_timestamp(*date),
            Bucket::Week { year, week } => match NaiveDate::from_isoywd_opt(*year, *week, Weekday::Mon) {
                Some(monday) => midnight_timestamp(monday),
                // Not a real ISO week; only reachable through hand-built buckets
                None => (*year as i64 * 53 + *week as i64) as u64,
            },
        }
    }

    /// Seed for one subsystem's generator in this bucket
    pub fn seed(&self, offset: u64) -> u64 {
        self.hash().wrapping_add(offset)
    }
}

fn midnight_timestamp(date: NaiveDate) -> u64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp() as u64
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Bucket::Day(date) => write!(f, "{}", date),
            Bucket::Week { year, week } => write!(f, "{}-W{:02}", year, week),
        }
    }
}
