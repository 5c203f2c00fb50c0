use chrono::{Datelike, Duration, Month, NaiveDate};

use crate::error::TimelineError;

/// Inclusive span of whole calendar years shown on the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarRange {
    year_start: i32,
    year_end: i32,
}

impl CalendarRange {
    pub fn new(year_start: i32, year_end: i32) -> Result<Self, TimelineError> {
        if year_start > year_end {
            return Err(TimelineError::InvalidRange {
                start: year_start,
                end: year_end,
            });
        }
        Ok(Self {
            year_start,
            year_end,
        })
    }

    pub fn year_start(&self) -> i32 {
        self.year_start
    }

    pub fn year_end(&self) -> i32 {
        self.year_end
    }

    pub fn contains_year(&self, year: i32) -> bool {
        (self.year_start..=self.year_end).contains(&year)
    }

    pub fn years(&self) -> impl Iterator<Item = i32> {
        self.year_start..=self.year_end
    }

    /// Widen the range just enough to include `year`.
    pub fn including(self, year: i32) -> Self {
        Self {
            year_start: self.year_start.min(year),
            year_end: self.year_end.max(year),
        }
    }
}

/// One month of the calendar strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthDescriptor {
    pub year: i32,
    /// Zero-based month (0 = January).
    pub month0: u32,
    pub day_count: u32,
    /// Days from Jan 1 of the first calendar year to this month's first day.
    pub day_offset: i64,
    pub first_day: NaiveDate,
}

impl MonthDescriptor {
    /// Date of the given 1-based day, clamped into this month.
    pub fn day(&self, day: u32) -> NaiveDate {
        let day = day.clamp(1, self.day_count);
        self.first_day + Duration::days(i64::from(day) - 1)
    }

    pub fn last_day(&self) -> NaiveDate {
        self.day(self.day_count)
    }

    /// Exclusive day offset of the month end.
    pub fn end_offset(&self) -> i64 {
        self.day_offset + i64::from(self.day_count)
    }

    pub fn width(&self, day_width: f32) -> f32 {
        self.day_count as f32 * day_width
    }

    pub fn name(&self) -> &'static str {
        u8::try_from(self.month0 + 1)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .map(|m| m.name())
            .unwrap_or_default()
    }

    /// "January 2025"
    pub fn label(&self) -> String {
        format!("{} {}", self.name(), self.year)
    }
}

/// Month layout of a [`CalendarRange`]. Fully derived from the range; day
/// width only scales it into pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarMetadata {
    range: CalendarRange,
    months: Vec<MonthDescriptor>,
    total_days: i64,
}

impl CalendarMetadata {
    /// Lay out every month from January of `year_start` through December of
    /// `year_end`.
    pub fn build(year_start: i32, year_end: i32) -> Result<Self, TimelineError> {
        Self::for_range(CalendarRange::new(year_start, year_end)?)
    }

    pub fn for_range(range: CalendarRange) -> Result<Self, TimelineError> {
        for year in [range.year_start, range.year_end] {
            NaiveDate::from_ymd_opt(year, 1, 1).ok_or(TimelineError::YearOutOfRange(year))?;
        }
        let years = i64::from(range.year_end) - i64::from(range.year_start) + 1;
        let mut months = Vec::with_capacity(usize::try_from(years * 12).unwrap_or(0));
        let mut total_days = 0i64;

        for year in range.years() {
            for month0 in 0..12 {
                let day_count = days_in_month(year, month0)?;
                let first_day = NaiveDate::from_ymd_opt(year, month0 + 1, 1)
                    .ok_or(TimelineError::YearOutOfRange(year))?;
                months.push(MonthDescriptor {
                    year,
                    month0,
                    day_count,
                    day_offset: total_days,
                    first_day,
                });
                total_days += i64::from(day_count);
            }
        }

        Ok(Self {
            range,
            months,
            total_days,
        })
    }

    pub fn range(&self) -> CalendarRange {
        self.range
    }

    pub fn months(&self) -> &[MonthDescriptor] {
        &self.months
    }

    pub fn total_days(&self) -> i64 {
        self.total_days
    }

    pub fn first_day(&self) -> NaiveDate {
        self.months[0].first_day
    }

    pub fn last_day(&self) -> NaiveDate {
        self.months[self.months.len() - 1].last_day()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first_day() && date <= self.last_day()
    }

    /// Day offset of Jan 1 of `year`, if the year is part of the calendar.
    pub fn year_offset(&self, year: i32) -> Option<i64> {
        if !self.range.contains_year(year) {
            return None;
        }
        let idx = (year - self.range.year_start) as usize * 12;
        self.months.get(idx).map(|m| m.day_offset)
    }
}

/// Length of a month, taken from chrono's calendar arithmetic so leap years
/// follow the proleptic Gregorian rules.
pub fn days_in_month(year: i32, month0: u32) -> Result<u32, TimelineError> {
    let (next_year, next_month) = if month0 == 11 {
        (year.checked_add(1), 1)
    } else {
        (Some(year), month0 + 2)
    };
    next_year
        .and_then(|y| NaiveDate::from_ymd_opt(y, next_month, 1))
        .and_then(|first_of_next| first_of_next.pred_opt())
        .map(|last| last.day())
        .ok_or(TimelineError::YearOutOfRange(year))
}
