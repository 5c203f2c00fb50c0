use chrono::NaiveDate;

use super::calendar::{CalendarMetadata, MonthDescriptor};
use super::hack::DateRange;

/// Gap between neighbouring bars so adjacent phases stay visually distinct.
pub const BAR_GAP: f32 = 2.0;

/// A date plus how far into that day's cell the viewport edge sits.
///
/// Captured before the calendar is rebuilt so the same date can be put back
/// under the same screen pixel afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportAnchor {
    pub anchor_date: NaiveDate,
    pub pixel_offset_within_day: f32,
}

/// Horizontal placement of an event bar, relative to the calendar's first day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarPlacement {
    pub left: f32,
    pub width: f32,
    /// Inclusive number of days the (clipped) bar covers.
    pub days: i64,
}

/// Converts between calendar dates and pixel positions for one metadata
/// snapshot at one zoom level.
#[derive(Debug, Clone, Copy)]
pub struct CoordinateMapper<'a> {
    metadata: &'a CalendarMetadata,
    day_width: f32,
}

impl<'a> CoordinateMapper<'a> {
    pub fn new(metadata: &'a CalendarMetadata, day_width: f32) -> Self {
        Self {
            metadata,
            day_width,
        }
    }

    pub fn day_width(&self) -> f32 {
        self.day_width
    }

    pub fn total_width(&self) -> f32 {
        self.offset_to_pixel(self.metadata.total_days())
    }

    /// Whole days from Jan 1 of the first calendar year to `date`. Negative
    /// for dates before the calendar.
    pub fn date_to_offset(&self, date: NaiveDate) -> i64 {
        (date - self.metadata.first_day()).num_days()
    }

    pub fn offset_to_pixel(&self, offset: i64) -> f32 {
        offset as f32 * self.day_width
    }

    pub fn date_to_pixel(&self, date: NaiveDate) -> f32 {
        self.offset_to_pixel(self.date_to_offset(date))
    }

    /// The month whose pixel span contains `px`, with the month's left edge.
    /// Positions past the end resolve to the last month.
    pub fn month_at(&self, px: f32) -> (&'a MonthDescriptor, f32) {
        let months = self.metadata.months();
        let mut acc = 0.0;
        for month in months {
            let width = month.width(self.day_width);
            if acc + width > px {
                return (month, acc);
            }
            acc += width;
        }
        let last = &months[months.len() - 1];
        (last, acc - last.width(self.day_width))
    }

    /// Date of the day cell under scroll position `px`, clamped to the
    /// calendar.
    pub fn scroll_position_to_date(&self, px: f32) -> NaiveDate {
        if px >= self.total_width() {
            return self.metadata.last_day();
        }
        let (month, month_left) = self.month_at(px);
        let day = ((px - month_left) / self.day_width).floor() + 1.0;
        month.day(day.max(1.0) as u32)
    }

    pub fn anchor_at(&self, px: f32) -> ViewportAnchor {
        let anchor_date = self.scroll_position_to_date(px);
        let day_left = self.date_to_pixel(anchor_date);
        ViewportAnchor {
            anchor_date,
            pixel_offset_within_day: (px - day_left).clamp(0.0, self.day_width),
        }
    }

    pub fn anchor_to_pixel(&self, anchor: ViewportAnchor) -> f32 {
        self.date_to_pixel(anchor.anchor_date) + anchor.pixel_offset_within_day
    }

    /// Place a bar covering `range`, clipped to the calendar. `None` when the
    /// range lies entirely outside it.
    pub fn phase_bar(&self, range: DateRange) -> Option<BarPlacement> {
        let first = self.metadata.first_day();
        let last = self.metadata.last_day();
        if range.end < first || range.start > last {
            return None;
        }
        let start = range.start.max(first);
        let end = range.end.min(last);
        let days = (end - start).num_days() + 1;
        Some(BarPlacement {
            left: self.date_to_pixel(start),
            width: days as f32 * self.day_width - BAR_GAP,
            days,
        })
    }
}
