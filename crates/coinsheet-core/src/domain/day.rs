use std::fmt::{Display, Formatter};

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Calendar day pinned to midnight UTC.
///
/// The history resolvers compare candle timestamps against the midnight-UTC
/// Unix timestamp of this day, so a bucket either matches exactly or the day
/// is treated as missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UtcDay(Date);

impl UtcDay {
    pub const fn from_date(date: Date) -> Self {
        Self(date)
    }

    /// The civil date of the instant in its own offset.
    ///
    /// A caller holding "2021-03-01 00:00 local" gets the day 2021-03-01
    /// regardless of the local offset.
    pub fn from_datetime(value: OffsetDateTime) -> Self {
        Self(value.date())
    }

    pub const fn date(self) -> Date {
        self.0
    }

    pub fn midnight_utc(self) -> OffsetDateTime {
        self.0.midnight().assume_utc()
    }

    /// Unix timestamp of midnight UTC, the bucket key used by daily candles.
    pub fn unix_timestamp(self) -> i64 {
        self.midnight_utc().unix_timestamp()
    }

    /// `YYYY-MM-DD`, the form daily-candle query parameters expect.
    pub fn format_iso(self) -> String {
        self.0
            .format(ISO_DATE)
            .expect("UtcDay must be ISO formattable")
    }
}

impl Display for UtcDay {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_iso())
    }
}
