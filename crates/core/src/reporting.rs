//! Dashboard trend ranges and chart bucket labels.
//!
//! The dashboard's headline totals are all-time; only the trend chart is
//! windowed by a [`TrendRange`].

use chrono::NaiveDate;

/// Number of recent orders shown on the dashboard.
pub const RECENT_ORDERS_LIMIT: i64 = 10;

/// Number of fabrics in the usage ranking.
pub const TOP_FABRICS_LIMIT: i64 = 5;

/// Look-back window (days) for the fabric usage ranking.
pub const FABRIC_USAGE_WINDOW_DAYS: i32 = 30;

/// Number of entries returned by the activity feed.
pub const ACTIVITY_FEED_LIMIT: i64 = 50;

/// Granularity of a trend chart bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketSize {
    Day,
    Month,
}

impl BucketSize {
    /// Unit accepted by PostgreSQL `DATE_TRUNC`.
    pub fn trunc_unit(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Month => "month",
        }
    }

    /// Chart label for a bucket start date: `Mon DD` for days, `Mon YY` for
    /// months.
    pub fn label(self, bucket: NaiveDate) -> String {
        match self {
            Self::Day => bucket.format("%b %d").to_string(),
            Self::Month => bucket.format("%b %y").to_string(),
        }
    }
}

/// Trend window selectable from the dashboard (`?range=`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrendRange {
    #[default]
    SevenDays,
    ThirtyDays,
    SixMonths,
    OneYear,
}

impl TrendRange {
    /// Parse a `range` query value. Missing or unknown values fall back to
    /// seven days.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("30d") => Self::ThirtyDays,
            Some("6m") => Self::SixMonths,
            Some("1y") => Self::OneYear,
            _ => Self::SevenDays,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::SevenDays => "7d",
            Self::ThirtyDays => "30d",
            Self::SixMonths => "6m",
            Self::OneYear => "1y",
        }
    }

    /// Window length as a PostgreSQL interval literal.
    pub fn interval(self) -> &'static str {
        match self {
            Self::SevenDays => "7 days",
            Self::ThirtyDays => "30 days",
            Self::SixMonths => "6 months",
            Self::OneYear => "1 year",
        }
    }

    pub fn bucket_size(self) -> BucketSize {
        match self {
            Self::SevenDays | Self::ThirtyDays => BucketSize::Day,
            Self::SixMonths | Self::OneYear => BucketSize::Month,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_ranges() {
        assert_eq!(TrendRange::parse(Some("7d")), TrendRange::SevenDays);
        assert_eq!(TrendRange::parse(Some("30d")), TrendRange::ThirtyDays);
        assert_eq!(TrendRange::parse(Some("6m")), TrendRange::SixMonths);
        assert_eq!(TrendRange::parse(Some("1y")), TrendRange::OneYear);
    }

    #[test]
    fn parse_falls_back_to_seven_days() {
        assert_eq!(TrendRange::parse(None), TrendRange::SevenDays);
        assert_eq!(TrendRange::parse(Some("")), TrendRange::SevenDays);
        assert_eq!(TrendRange::parse(Some("2w")), TrendRange::SevenDays);
    }

    #[test]
    fn short_ranges_bucket_by_day_long_ranges_by_month() {
        assert_eq!(TrendRange::SevenDays.bucket_size(), BucketSize::Day);
        assert_eq!(TrendRange::ThirtyDays.bucket_size(), BucketSize::Day);
        assert_eq!(TrendRange::SixMonths.bucket_size(), BucketSize::Month);
        assert_eq!(TrendRange::OneYear.bucket_size(), BucketSize::Month);
    }

    #[test]
    fn intervals_match_range() {
        assert_eq!(TrendRange::SevenDays.interval(), "7 days");
        assert_eq!(TrendRange::OneYear.interval(), "1 year");
    }

    #[test]
    fn labels_follow_bucket_size() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 4).unwrap();
        assert_eq!(BucketSize::Day.label(date), "Mar 04");
        assert_eq!(BucketSize::Month.label(date), "Mar 25");
    }

    #[test]
    fn as_str_round_trips_through_parse() {
        for range in [
            TrendRange::SevenDays,
            TrendRange::ThirtyDays,
            TrendRange::SixMonths,
            TrendRange::OneYear,
        ] {
            assert_eq!(TrendRange::parse(Some(range.as_str())), range);
        }
    }
}
