use std::time::{Duration, Instant};

/// Pixel widths of one day, narrowest first.
pub const ZOOM_LEVELS: [f32; 7] = [14.0, 18.0, 22.0, 28.0, 36.0, 48.0, 64.0];

/// Index of the 100% level.
pub const DEFAULT_ZOOM_INDEX: usize = 3;

pub const ZOOM_INDICATOR_DELAY: Duration = Duration::from_millis(1200);

/// One wheel or pinch event over the calendar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomInput {
    /// Negative zooms in, positive zooms out.
    pub delta_y: f32,
    /// Pointer position relative to the visible left edge of the day grid.
    pub pointer_x: f32,
    pub scroll_before: f32,
    /// Ctrl/Cmd held or a pinch gesture. Plain wheel input never zooms.
    pub has_modifier: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomOutcome {
    /// The event belongs to zooming and must not scroll the view.
    pub handled: bool,
    /// The zoom level actually moved.
    pub changed: bool,
    pub new_day_width: f32,
    pub new_scroll_left: f32,
    pub zoom_percent: u32,
}

/// Discrete zoom level state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoomController {
    index: usize,
}

impl Default for ZoomController {
    fn default() -> Self {
        Self {
            index: DEFAULT_ZOOM_INDEX,
        }
    }
}

impl ZoomController {
    /// Start at `index`, clamped into the level table.
    pub fn new(index: usize) -> Self {
        Self {
            index: index.min(ZOOM_LEVELS.len() - 1),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn day_width(&self) -> f32 {
        ZOOM_LEVELS[self.index]
    }

    pub fn percent(&self) -> u32 {
        (self.day_width() / ZOOM_LEVELS[DEFAULT_ZOOM_INDEX] * 100.0).round() as u32
    }

    /// Move one level in the direction of `delta_y`. Returns `(old, new)` day
    /// widths, or `None` at a boundary or for a zero delta.
    pub fn step(&mut self, delta_y: f32) -> Option<(f32, f32)> {
        let old = self.day_width();
        if delta_y < 0.0 && self.index < ZOOM_LEVELS.len() - 1 {
            self.index += 1;
        } else if delta_y > 0.0 && self.index > 0 {
            self.index -= 1;
        } else {
            return None;
        }
        Some((old, self.day_width()))
    }

    /// Apply a zoom input, rescaling the scroll offset around the pointer.
    pub fn apply(&mut self, input: ZoomInput) -> ZoomOutcome {
        let unchanged = |zoom: &Self, handled| ZoomOutcome {
            handled,
            changed: false,
            new_day_width: zoom.day_width(),
            new_scroll_left: input.scroll_before,
            zoom_percent: zoom.percent(),
        };

        if !input.has_modifier {
            return unchanged(&*self, false);
        }
        let Some((old, new)) = self.step(input.delta_y) else {
            return unchanged(&*self, true);
        };

        ZoomOutcome {
            handled: true,
            changed: true,
            new_day_width: new,
            new_scroll_left: rescale_around(input.scroll_before, input.pointer_x, new / old),
            zoom_percent: self.percent(),
        }
    }
}

/// Scroll offset that keeps the content under `pointer_x` fixed on screen
/// when every width is multiplied by `ratio`.
pub fn rescale_around(scroll_before: f32, pointer_x: f32, ratio: f32) -> f32 {
    (scroll_before + pointer_x) * ratio - pointer_x
}

/// Transient "NN%" badge shown after a zoom step.
#[derive(Debug, Clone)]
pub struct ZoomIndicator {
    delay: Duration,
    shown: Option<(u32, Instant)>,
}

impl Default for ZoomIndicator {
    fn default() -> Self {
        Self::new(ZOOM_INDICATOR_DELAY)
    }
}

impl ZoomIndicator {
    pub fn new(delay: Duration) -> Self {
        Self { delay, shown: None }
    }

    /// Show `percent`, restarting the hide delay if already visible.
    pub fn show(&mut self, percent: u32, now: Instant) {
        self.shown = Some((percent, now + self.delay));
    }

    /// The percentage to display at `now`, if the badge is still up.
    pub fn visible(&self, now: Instant) -> Option<u32> {
        match self.shown {
            Some((percent, hide_at)) if now < hide_at => Some(percent),
            _ => None,
        }
    }

    /// Time until the badge hides, for scheduling a repaint.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.shown
            .and_then(|(_, hide_at)| hide_at.checked_duration_since(now))
            .filter(|left| !left.is_zero())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(delta_y: f32) -> ZoomInput {
        ZoomInput {
            delta_y,
            pointer_x: 100.0,
            scroll_before: 1000.0,
            has_modifier: true,
        }
    }

    #[test]
    fn default_is_one_hundred_percent() {
        let zoom = ZoomController::default();
        assert_eq!(zoom.day_width(), 28.0);
        assert_eq!(zoom.percent(), 100);
    }

    #[test]
    fn plain_wheel_is_ignored() {
        let mut zoom = ZoomController::default();
        let outcome = zoom.apply(ZoomInput {
            has_modifier: false,
            ..input(-1.0)
        });
        assert!(!outcome.handled);
        assert!(!outcome.changed);
        assert_eq!(zoom.index(), DEFAULT_ZOOM_INDEX);
        assert_eq!(outcome.new_scroll_left, 1000.0);
    }

    #[test]
    fn zoom_in_rescales_around_pointer() {
        let mut zoom = ZoomController::default();
        let outcome = zoom.apply(input(-120.0));
        assert!(outcome.changed);
        assert_eq!(outcome.new_day_width, 36.0);
        assert_eq!(outcome.new_scroll_left, 1100.0 * (36.0f32 / 28.0) - 100.0);
        assert_eq!(outcome.zoom_percent, 129);
    }

    #[test]
    fn zoom_clamps_at_both_ends() {
        let mut zoom = ZoomController::default();
        for _ in 0..20 {
            zoom.apply(input(-1.0));
        }
        assert_eq!(zoom.day_width(), 64.0);
        let outcome = zoom.apply(input(-1.0));
        assert!(outcome.handled);
        assert!(!outcome.changed);
        assert_eq!(outcome.new_day_width, 64.0);
        assert_eq!(outcome.new_scroll_left, 1000.0);

        for _ in 0..20 {
            zoom.apply(input(1.0));
        }
        assert_eq!(zoom.day_width(), 14.0);
        assert_eq!(zoom.index(), 0);
        assert!(!zoom.apply(input(1.0)).changed);
        assert_eq!(zoom.percent(), 50);
    }

    #[test]
    fn zero_delta_does_nothing() {
        let mut zoom = ZoomController::default();
        assert!(zoom.step(0.0).is_none());
        assert_eq!(zoom.index(), DEFAULT_ZOOM_INDEX);
    }

    #[test]
    fn initial_index_is_clamped() {
        assert_eq!(ZoomController::new(99).day_width(), 64.0);
    }

    #[test]
    fn indicator_restarts_delay() {
        let start = Instant::now();
        let mut indicator = ZoomIndicator::default();
        assert_eq!(indicator.visible(start), None);

        indicator.show(129, start);
        assert_eq!(indicator.visible(start + Duration::from_millis(1000)), Some(129));

        indicator.show(171, start + Duration::from_millis(1000));
        assert_eq!(indicator.visible(start + Duration::from_millis(2000)), Some(171));
        assert_eq!(
            indicator.remaining(start + Duration::from_millis(2000)),
            Some(Duration::from_millis(200))
        );
        assert_eq!(indicator.visible(start + Duration::from_millis(2200)), None);
        assert_eq!(indicator.remaining(start + Duration::from_millis(2300)), None);
    }
}
