use chrono::{Datelike, NaiveDate};
use tracing::{debug, warn};

use super::calendar::{CalendarMetadata, CalendarRange};
use super::coords::{BarPlacement, CoordinateMapper};
use super::hack::{Hack, PhaseKind};
use super::scheduler::FrameScheduler;
use super::zoom::{ZoomController, ZoomInput, ZoomOutcome};
use crate::error::TimelineError;

/// Fraction of the viewport width left before an edge that triggers growth.
pub const GROW_THRESHOLD: f32 = 0.5;

/// Slack used when deciding which month the view currently sits in.
const MONTH_SNAP_PX: f32 = 10.0;

/// Scroll geometry reported by the render layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollSample {
    pub scroll_left: f32,
    pub scroll_width: f32,
    pub viewport_width: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollOutcome {
    pub range_changed: bool,
    pub new_scroll_left: Option<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthStep {
    Previous,
    Next,
}

/// State of the calendar strip: loaded years, zoom level and scroll position.
///
/// All mutation goes through the scroll, zoom and navigation operations
/// below; the render layer reads the result and applies any scroll request
/// returned by [`Timeline::take_scroll_request`].
#[derive(Debug, Clone)]
pub struct Timeline {
    metadata: CalendarMetadata,
    zoom: ZoomController,
    today: NaiveDate,
    scroll_left: f32,
    scroll_request: Option<f32>,
    scroll_frames: FrameScheduler<ScrollSample>,
}

impl Timeline {
    pub fn new(
        range: CalendarRange,
        zoom: ZoomController,
        today: NaiveDate,
    ) -> Result<Self, TimelineError> {
        Ok(Self {
            metadata: CalendarMetadata::for_range(range)?,
            zoom,
            today,
            scroll_left: 0.0,
            scroll_request: None,
            scroll_frames: FrameScheduler::new(),
        })
    }

    /// Calendar spanning `years_before` years before and `years_after` years
    /// after the year of `today`.
    pub fn around(
        today: NaiveDate,
        years_before: u16,
        years_after: u16,
        zoom: ZoomController,
    ) -> Result<Self, TimelineError> {
        let year = today.year();
        let range = CalendarRange::new(
            year.saturating_sub(i32::from(years_before)),
            year.saturating_add(i32::from(years_after)),
        )?;
        Self::new(range, zoom, today)
    }

    // ── Accessors ───────────────────────────────────────────────────────

    pub fn metadata(&self) -> &CalendarMetadata {
        &self.metadata
    }

    pub fn range(&self) -> CalendarRange {
        self.metadata.range()
    }

    pub fn day_width(&self) -> f32 {
        self.zoom.day_width()
    }

    pub fn zoom_percent(&self) -> u32 {
        self.zoom.percent()
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn scroll_left(&self) -> f32 {
        self.scroll_left
    }

    pub fn mapper(&self) -> CoordinateMapper<'_> {
        CoordinateMapper::new(&self.metadata, self.zoom.day_width())
    }

    pub fn total_width(&self) -> f32 {
        self.mapper().total_width()
    }

    pub fn date_to_offset(&self, date: NaiveDate) -> i64 {
        self.mapper().date_to_offset(date)
    }

    pub fn offset_to_pixel(&self, offset: i64) -> f32 {
        self.mapper().offset_to_pixel(offset)
    }

    pub fn scroll_position_to_date(&self, px: f32) -> NaiveDate {
        self.mapper().scroll_position_to_date(px)
    }

    // ── Scroll requests ─────────────────────────────────────────────────

    /// Move the view to `scroll_left`. Any queued scroll sample was measured
    /// before the move and is dropped.
    pub fn request_scroll(&mut self, scroll_left: f32) {
        self.scroll_frames.cancel();
        self.scroll_left = scroll_left;
        self.scroll_request = Some(scroll_left);
    }

    /// Scroll position the render layer must apply this frame, if any.
    pub fn take_scroll_request(&mut self) -> Option<f32> {
        self.scroll_request.take()
    }

    // ── Infinite scroll ─────────────────────────────────────────────────

    /// Grow the loaded years when the viewport comes within half a viewport
    /// of either edge, keeping the leftmost visible date where it was.
    pub fn on_scroll(
        &mut self,
        scroll_left: f32,
        scroll_width: f32,
        viewport_width: f32,
    ) -> ScrollOutcome {
        self.scroll_left = scroll_left;

        let threshold = viewport_width * GROW_THRESHOLD;
        let remaining_right = scroll_width - scroll_left - viewport_width;
        let old = self.range();
        let mut year_start = old.year_start();
        let mut year_end = old.year_end();
        if scroll_left < threshold {
            year_start = year_start.saturating_sub(1);
        }
        if remaining_right < threshold {
            year_end = year_end.saturating_add(1);
        }
        if (year_start, year_end) == (old.year_start(), old.year_end()) {
            return ScrollOutcome::default();
        }

        // Offsets shift once months are prepended, so pin a date first.
        let anchor = self.mapper().anchor_at(scroll_left);
        let grown = CalendarRange::new(year_start, year_end).and_then(CalendarMetadata::for_range);
        match grown {
            Ok(metadata) => self.metadata = metadata,
            Err(err) => {
                warn!("calendar cannot grow past {}..={}: {}", year_start, year_end, err);
                return ScrollOutcome::default();
            }
        }

        let new_scroll_left = self.mapper().anchor_to_pixel(anchor);
        debug!(
            year_start,
            year_end,
            anchor = %anchor.anchor_date,
            new_scroll_left,
            "calendar range grown"
        );
        self.request_scroll(new_scroll_left);
        ScrollOutcome {
            range_changed: true,
            new_scroll_left: Some(new_scroll_left),
        }
    }

    /// Record a scroll sample for the next frame. Samples arriving before
    /// [`Timeline::run_frame`] replace each other.
    pub fn queue_scroll(&mut self, sample: ScrollSample) -> bool {
        self.scroll_frames.schedule(sample)
    }

    /// Process the latest queued scroll sample, if any.
    pub fn run_frame(&mut self) -> Option<ScrollOutcome> {
        let sample = self.scroll_frames.take()?;
        Some(self.on_scroll(
            sample.scroll_left,
            sample.scroll_width,
            sample.viewport_width,
        ))
    }

    // ── Zoom ────────────────────────────────────────────────────────────

    pub fn on_zoom_input(&mut self, input: ZoomInput) -> ZoomOutcome {
        let outcome = self.zoom.apply(input);
        if outcome.changed {
            self.request_scroll(outcome.new_scroll_left);
            debug!(
                day_width = outcome.new_day_width,
                percent = outcome.zoom_percent,
                "zoom changed"
            );
        }
        outcome
    }

    // ── Navigation ──────────────────────────────────────────────────────

    fn ensure_year(&mut self, year: i32) -> Result<(), TimelineError> {
        let range = self.range().including(year);
        if range != self.range() {
            self.metadata = CalendarMetadata::for_range(range)?;
            self.scroll_frames.cancel();
            debug!(
                year_start = range.year_start(),
                year_end = range.year_end(),
                "calendar range widened for navigation"
            );
        }
        Ok(())
    }

    /// Scroll to Jan 1 of `year`, loading the year first if needed. Returns
    /// the pixel offset of that day.
    pub fn jump_to_year(&mut self, year: i32) -> Result<f32, TimelineError> {
        self.ensure_year(year)
            .map_err(|_| TimelineError::YearOutOfRange(year))?;
        let offset = self
            .metadata
            .year_offset(year)
            .ok_or(TimelineError::YearOutOfRange(year))?;
        let px = self.offset_to_pixel(offset);
        self.request_scroll(px);
        Ok(px)
    }

    /// Scroll so today sits a third of the way into the viewport.
    pub fn scroll_to_today(&mut self, viewport_width: f32) -> Result<f32, TimelineError> {
        self.ensure_year(self.today.year())?;
        let px = (self.mapper().date_to_pixel(self.today) - viewport_width / 3.0).max(0.0);
        self.request_scroll(px);
        Ok(px)
    }

    /// Scroll to the start of the next month, or back to the start of the
    /// current (or previous, when already at a month start) month.
    pub fn scroll_by_month(&mut self, step: MonthStep, scroll_left: f32) -> f32 {
        let day_width = self.day_width();
        let mut acc = 0.0;
        let mut prev_left = 0.0;
        let mut target = None;

        for month in self.metadata.months() {
            let width = month.width(day_width);
            match step {
                MonthStep::Next if acc + width > scroll_left + MONTH_SNAP_PX => {
                    target = Some(acc + width);
                    break;
                }
                MonthStep::Previous if acc >= scroll_left - MONTH_SNAP_PX => {
                    target = Some(prev_left);
                    break;
                }
                _ => {}
            }
            prev_left = acc;
            acc += width;
        }

        let px = target
            .unwrap_or(match step {
                MonthStep::Next => acc,
                MonthStep::Previous => prev_left,
            })
            .max(0.0);
        self.request_scroll(px);
        px
    }

    /// Year of the leftmost visible month.
    pub fn active_year(&self, scroll_left: f32) -> i32 {
        self.mapper().month_at(scroll_left).0.year
    }

    /// "January 2025" style label for the leftmost visible month.
    pub fn view_label(&self, scroll_left: f32) -> String {
        self.mapper().month_at(scroll_left).0.label()
    }

    /// Centre of today's column, if today is on the calendar.
    pub fn today_marker(&self) -> Option<f32> {
        if !self.metadata.contains(self.today) {
            return None;
        }
        let mapper = self.mapper();
        Some(mapper.date_to_pixel(self.today) + mapper.day_width() / 2.0)
    }

    /// Bars for each phase of `hack` that overlaps the calendar.
    pub fn phase_bars<'a>(
        &'a self,
        hack: &'a Hack,
    ) -> impl Iterator<Item = (PhaseKind, BarPlacement)> + 'a {
        let mapper = self.mapper();
        hack.phases
            .iter()
            .filter_map(move |(kind, range)| mapper.phase_bar(range).map(|bar| (kind, bar)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::hack::{DateRange, Phases};
    use crate::model::zoom::ZOOM_LEVELS;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn timeline(start: i32, end: i32) -> Timeline {
        Timeline::new(
            CalendarRange::new(start, end).unwrap(),
            ZoomController::default(),
            date(2024, 6, 15),
        )
        .unwrap()
    }

    #[test]
    fn around_today_uses_offsets() {
        let tl = Timeline::around(date(2025, 3, 3), 1, 2, ZoomController::default()).unwrap();
        assert_eq!(tl.range(), CalendarRange::new(2024, 2027).unwrap());
    }

    #[test]
    fn no_growth_in_the_middle() {
        let mut tl = timeline(2023, 2025);
        let width = tl.total_width();
        let outcome = tl.on_scroll(width / 2.0, width, 1000.0);
        assert_eq!(outcome, ScrollOutcome::default());
        assert_eq!(tl.range(), CalendarRange::new(2023, 2025).unwrap());
        assert_eq!(tl.take_scroll_request(), None);
    }

    #[test]
    fn prepend_keeps_anchor_date_in_place() {
        let mut tl = timeline(2024, 2025);
        let p = 40.0 * 28.0 + 5.5;
        let anchor = tl.scroll_position_to_date(p);
        let width = tl.total_width();

        let outcome = tl.on_scroll(p, width, 4000.0);
        assert!(outcome.range_changed);
        assert_eq!(tl.range(), CalendarRange::new(2023, 2025).unwrap());

        let expected = p + 365.0 * 28.0;
        assert_eq!(outcome.new_scroll_left, Some(expected));
        assert_eq!(tl.scroll_position_to_date(expected), anchor);
        assert_eq!(tl.take_scroll_request(), Some(expected));
        assert_eq!(tl.scroll_left(), expected);
    }

    #[test]
    fn append_keeps_scroll_position() {
        let mut tl = timeline(2024, 2024);
        let width = tl.total_width();
        let p = width - 1200.0;
        let outcome = tl.on_scroll(p, width, 1000.0);
        assert!(outcome.range_changed);
        assert_eq!(tl.range(), CalendarRange::new(2024, 2025).unwrap());
        assert_eq!(outcome.new_scroll_left, Some(p));
    }

    #[test]
    fn both_edges_can_grow_at_once() {
        let mut tl = timeline(2024, 2024);
        let width = tl.total_width();
        let outcome = tl.on_scroll(0.0, width, width + 500.0);
        assert!(outcome.range_changed);
        assert_eq!(tl.range(), CalendarRange::new(2023, 2025).unwrap());
        assert_eq!(outcome.new_scroll_left, Some(365.0 * 28.0));
    }

    #[test]
    fn coalesced_scrolls_grow_once() {
        let mut tl = timeline(2024, 2024);
        let width = tl.total_width();
        let near_right = |scroll_left| ScrollSample {
            scroll_left,
            scroll_width: width,
            viewport_width: 1000.0,
        };

        assert!(tl.queue_scroll(near_right(width - 1400.0)));
        assert!(!tl.queue_scroll(near_right(width - 1300.0)));
        assert!(!tl.queue_scroll(near_right(width - 1200.0)));

        let outcome = tl.run_frame().unwrap();
        assert!(outcome.range_changed);
        assert_eq!(tl.range(), CalendarRange::new(2024, 2025).unwrap());
        assert_eq!(tl.run_frame(), None);
        assert_eq!(tl.range().year_end(), 2025);
    }

    #[test]
    fn zoom_cancels_stale_scroll_sample() {
        let mut tl = timeline(2024, 2024);
        let width = tl.total_width();
        tl.queue_scroll(ScrollSample {
            scroll_left: width - 1200.0,
            scroll_width: width,
            viewport_width: 1000.0,
        });
        let outcome = tl.on_zoom_input(ZoomInput {
            delta_y: -1.0,
            pointer_x: 200.0,
            scroll_before: 3000.0,
            has_modifier: true,
        });
        assert!(outcome.changed);
        assert_eq!(tl.run_frame(), None);
        assert_eq!(tl.take_scroll_request(), Some(outcome.new_scroll_left));
    }

    #[test]
    fn navigation_drops_queued_sample() {
        let mut tl = timeline(2024, 2025);
        tl.queue_scroll(ScrollSample {
            scroll_left: 0.0,
            scroll_width: tl.total_width(),
            viewport_width: 1000.0,
        });
        let px = tl.scroll_to_today(900.0).unwrap();
        assert_eq!(tl.run_frame(), None);
        assert_eq!(tl.range(), CalendarRange::new(2024, 2025).unwrap());
        assert_eq!(tl.scroll_left(), px);
    }

    #[test]
    fn jump_to_unrepresentable_year_names_that_year() {
        let mut tl = timeline(2024, 2025);
        assert_eq!(
            tl.jump_to_year(300_000),
            Err(TimelineError::YearOutOfRange(300_000))
        );
        assert_eq!(tl.range(), CalendarRange::new(2024, 2025).unwrap());
        assert_eq!(tl.take_scroll_request(), None);
    }

    #[test]
    fn jump_to_year_grows_range() {
        let mut tl = timeline(2024, 2025);
        let px = tl.jump_to_year(2021).unwrap();
        assert_eq!(tl.range(), CalendarRange::new(2021, 2025).unwrap());
        assert_eq!(px, 0.0);

        let px = tl.jump_to_year(2027).unwrap();
        assert_eq!(tl.range(), CalendarRange::new(2021, 2027).unwrap());
        let days_before_2027 = 365 + 365 + 366 + 365 + 365 + 365;
        assert_eq!(px, days_before_2027 as f32 * 28.0);
        assert_eq!(tl.take_scroll_request(), Some(px));
    }

    #[test]
    fn scroll_to_today_leaves_a_third_of_the_view() {
        let mut tl = timeline(2024, 2024);
        let today_px = tl.date_to_offset(date(2024, 6, 15)) as f32 * 28.0;
        assert_eq!(tl.scroll_to_today(900.0).unwrap(), today_px - 300.0);

        let mut early = Timeline::new(
            CalendarRange::new(2024, 2024).unwrap(),
            ZoomController::default(),
            date(2024, 1, 2),
        )
        .unwrap();
        assert_eq!(early.scroll_to_today(900.0).unwrap(), 0.0);
    }

    #[test]
    fn scroll_to_today_loads_its_year() {
        let mut tl = Timeline::new(
            CalendarRange::new(2020, 2021).unwrap(),
            ZoomController::default(),
            date(2024, 6, 15),
        )
        .unwrap();
        tl.scroll_to_today(900.0).unwrap();
        assert_eq!(tl.range(), CalendarRange::new(2020, 2024).unwrap());
    }

    #[test]
    fn month_stepping() {
        let mut tl = timeline(2024, 2024);
        let feb = 31.0 * 28.0;
        let mar = 60.0 * 28.0;

        assert_eq!(tl.scroll_by_month(MonthStep::Next, 0.0), feb);
        assert_eq!(tl.scroll_by_month(MonthStep::Next, feb), mar);
        assert_eq!(tl.scroll_by_month(MonthStep::Next, feb - 5.0), mar);

        assert_eq!(tl.scroll_by_month(MonthStep::Previous, mar), feb);
        assert_eq!(tl.scroll_by_month(MonthStep::Previous, mar + 100.0), mar);
        assert_eq!(tl.scroll_by_month(MonthStep::Previous, 0.0), 0.0);
        assert_eq!(tl.scroll_by_month(MonthStep::Next, 1.0e9), tl.total_width());
    }

    #[test]
    fn view_label_and_active_year() {
        let tl = timeline(2024, 2025);
        assert_eq!(tl.view_label(0.0), "January 2024");
        assert_eq!(tl.view_label(60.0 * 28.0), "March 2024");
        assert_eq!(tl.active_year(366.0 * 28.0 + 1.0), 2025);
    }

    #[test]
    fn today_marker_sits_mid_column() {
        let tl = timeline(2024, 2024);
        let off = tl.date_to_offset(date(2024, 6, 15)) as f32;
        assert_eq!(tl.today_marker(), Some(off * 28.0 + 14.0));
        assert_eq!(timeline(2022, 2023).today_marker(), None);
    }

    #[test]
    fn phase_bars_skip_phases_outside_calendar() {
        let tl = timeline(2024, 2024);
        let mut hack = Hack::new("Spring", Phases::starting(date(2024, 3, 1)));
        hack.phases.post = DateRange::new(date(2025, 1, 2), date(2025, 1, 4));

        let bars: Vec<_> = tl.phase_bars(&hack).collect();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].0, PhaseKind::Pre);
        assert_eq!(bars[0].1.left, 1680.0);
        assert_eq!(bars[0].1.width, 3.0 * 28.0 - 2.0);
        assert_eq!(bars[1].0, PhaseKind::Hack);
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prepend_shifts_by_one_year(
                start in 1990i32..2060,
                level in 0usize..ZOOM_LEVELS.len(),
                frac in 0.0f32..1.0,
            ) {
                let zoom = ZoomController::new(level);
                let mut tl = Timeline::new(
                    CalendarRange::new(start, start + 1).unwrap(),
                    zoom,
                    date(2024, 6, 15),
                ).unwrap();
                let w = zoom.day_width();
                let viewport = 2000.0;
                let p = (frac * viewport * GROW_THRESHOLD).floor();
                let anchor = tl.scroll_position_to_date(p);
                let width = tl.total_width();

                let outcome = tl.on_scroll(p, width, viewport);
                prop_assert!(outcome.range_changed);

                let prepended = tl.metadata().year_offset(start).unwrap() as f32;
                let new_left = outcome.new_scroll_left.unwrap();
                prop_assert_eq!(new_left, p + prepended * w);
                prop_assert_eq!(tl.scroll_position_to_date(new_left), anchor);
            }

            #[test]
            fn zoom_keeps_pointer_date(
                from in 0usize..ZOOM_LEVELS.len(),
                zoom_in in any::<bool>(),
                scroll_before in 0.0f32..20_000.0,
                pointer_x in 0.0f32..1500.0,
            ) {
                let mut tl = Timeline::new(
                    CalendarRange::new(2023, 2026).unwrap(),
                    ZoomController::new(from),
                    date(2024, 6, 15),
                ).unwrap();
                let before = tl.scroll_position_to_date(scroll_before + pointer_x);

                let outcome = tl.on_zoom_input(ZoomInput {
                    delta_y: if zoom_in { -1.0 } else { 1.0 },
                    pointer_x,
                    scroll_before,
                    has_modifier: true,
                });
                let after = tl.scroll_position_to_date(outcome.new_scroll_left + pointer_x);
                prop_assert!((after - before).num_days().abs() <= 1);
            }
        }
    }
}
