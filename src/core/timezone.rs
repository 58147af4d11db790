use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

/// Business-local calendar.
///
/// Timestamps are stored as UTC; every "today" comparison (schedule status,
/// days overdue) uses the calendar date in the business timezone.
#[derive(Debug, Clone, Copy)]
pub struct BusinessClock {
    offset: FixedOffset,
}

impl BusinessClock {
    /// Qatar / Arabia Standard Time
    pub const DEFAULT_OFFSET_HOURS: i32 = 3;

    /// Create a clock for a whole-hour UTC offset.
    /// Returns `None` for offsets outside -12..=14.
    pub fn from_offset_hours(hours: i32) -> Option<Self> {
        if !(-12..=14).contains(&hours) {
            return None;
        }
        FixedOffset::east_opt(hours * 3600).map(|offset| Self { offset })
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Convert a UTC timestamp to business-local time
    pub fn to_local(&self, utc_time: DateTime<Utc>) -> DateTime<FixedOffset> {
        utc_time.with_timezone(&self.offset)
    }

    /// Calendar date of a UTC timestamp in the business timezone
    pub fn date_of(&self, utc_time: DateTime<Utc>) -> NaiveDate {
        self.to_local(utc_time).date_naive()
    }

    /// Today's date in the business timezone
    pub fn today(&self) -> NaiveDate {
        self.date_of(Utc::now())
    }
}

impl Default for BusinessClock {
    fn default() -> Self {
        Self {
            offset: FixedOffset::east_opt(Self::DEFAULT_OFFSET_HOURS * 3600).expect("Valid offset"),
        }
    }
}

/// Format a date the way printed documents show it (dd/MM/yyyy)
pub fn format_document_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}
