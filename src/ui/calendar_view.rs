use std::time::Instant;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use egui::{Align2, Color32, Event, Painter, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};
use hack_planner::model::{
    BarPlacement, Hack, PhaseKind, ScrollSample, Timeline, ZoomIndicator, ZoomInput,
};
use uuid::Uuid;

use crate::ui::theme;

const LABEL_WIDTH: f32 = theme::ROW_LABEL_WIDTH;
const ROW_HEIGHT: f32 = theme::ROW_HEIGHT;
const HEADER_HEIGHT: f32 = theme::HEADER_HEIGHT;

/// Result details from interactions in the calendar.
#[derive(Debug, Clone, Default)]
pub struct CalendarInteraction {
    pub open_hack: Option<Uuid>,
}

/// Scrolling day grid with one row per hack.
///
/// Remembers the geometry it last reported so the timeline only sees a new
/// scroll sample when something actually moved.
#[derive(Debug, Default)]
pub struct CalendarView {
    last_sample: Option<ScrollSample>,
}

/// Screen-space frame of one calendar paint pass.
struct Canvas<'a> {
    painter: &'a Painter,
    clip: Rect,
    /// Screen x of the first calendar day.
    grid_left: f32,
    body_top: f32,
    body_bottom: f32,
    day_width: f32,
}

impl Canvas<'_> {
    fn day_x(&self, offset: i64) -> f32 {
        self.grid_left + offset as f32 * self.day_width
    }

    fn row_top(&self, row: usize) -> f32 {
        self.body_top + row as f32 * ROW_HEIGHT
    }

    /// Visible part of the grid, below the sticky header and right of the
    /// sticky row labels.
    fn grid_clip(&self) -> Rect {
        Rect::from_min_max(
            Pos2::new(self.clip.left() + LABEL_WIDTH, self.clip.top() + HEADER_HEIGHT),
            self.clip.max,
        )
    }
}

impl CalendarView {
    /// Width of the scroll viewport as of the last frame.
    pub fn viewport_width(&self) -> Option<f32> {
        self.last_sample.map(|sample| sample.viewport_width)
    }

    pub fn show(
        &mut self,
        timeline: &mut Timeline,
        hacks: &[Hack],
        indicator: &mut ZoomIndicator,
        ui: &mut Ui,
    ) -> CalendarInteraction {
        let mut interaction = CalendarInteraction::default();
        let area_rect = ui.available_rect_before_wrap();
        let now = Instant::now();

        if ui.rect_contains_pointer(area_rect) {
            handle_zoom_input(timeline, indicator, ui, area_rect, now);
        }

        let rows = hacks.len().max(1);
        let content = Vec2::new(
            LABEL_WIDTH + timeline.total_width(),
            HEADER_HEIGHT + rows as f32 * ROW_HEIGHT,
        );

        let mut area = egui::ScrollArea::both()
            .id_salt("calendar")
            .auto_shrink([false, false]);
        if let Some(x) = timeline.take_scroll_request() {
            area = area.horizontal_scroll_offset(x);
        }

        let output = area.show_viewport(ui, |ui, viewport| {
            let (response, painter) =
                ui.allocate_painter(content.max(viewport.size()), Sense::hover());
            let origin = response.rect.min;
            let canvas = Canvas {
                painter: &painter,
                clip: painter.clip_rect(),
                grid_left: origin.x + LABEL_WIDTH,
                body_top: origin.y + HEADER_HEIGHT,
                body_bottom: origin.y + content.y,
                day_width: timeline.day_width(),
            };

            painter.rect_filled(canvas.clip, 0.0, theme::BG_DARK);

            // Only the days inside the viewport are painted.
            let total_days = timeline.metadata().total_days();
            let first = ((viewport.min.x / canvas.day_width).floor() as i64).clamp(0, total_days);
            let last = (((viewport.max.x - LABEL_WIDTH) / canvas.day_width).ceil() as i64)
                .clamp(first, total_days);

            draw_day_columns(&canvas, timeline, first, last);
            draw_row_lines(&canvas, rows, content.x);

            for (row, hack) in hacks.iter().enumerate() {
                for (kind, bar) in timeline.phase_bars(hack) {
                    let bar_rect = draw_phase_bar(&canvas, row, kind, bar, hack);
                    let hit_rect = bar_rect.intersect(canvas.grid_clip());
                    if !hit_rect.is_positive() {
                        continue;
                    }
                    let bar_response = ui.interact(
                        hit_rect,
                        ui.make_persistent_id(("phase-bar", hack.id, kind)),
                        Sense::click(),
                    );
                    if bar_response.hovered() {
                        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                        egui::show_tooltip_at_pointer(
                            ui.ctx(),
                            ui.layer_id(),
                            egui::Id::new(("phase-tip", hack.id, kind)),
                            |ui| {
                                let range = hack.phases.get(kind);
                                ui.strong(&hack.name);
                                ui.label(format!(
                                    "{}: {} → {}",
                                    kind.label(),
                                    range.start.format("%b %-d, %Y"),
                                    range.end.format("%b %-d, %Y"),
                                ));
                                ui.label(format!("{} day(s)", bar.days));
                            },
                        );
                    }
                    if bar_response.clicked() {
                        interaction.open_hack = Some(hack.id);
                    }
                }
            }

            if let Some(marker) = timeline.today_marker() {
                draw_today_line(&canvas, canvas.grid_left + marker);
            }

            draw_header(&canvas, timeline, first, last);
            draw_row_labels(&canvas, hacks);
        });

        let sample = ScrollSample {
            scroll_left: output.state.offset.x,
            scroll_width: output.content_size.x,
            viewport_width: output.inner_rect.width(),
        };
        if self.last_sample != Some(sample) {
            self.last_sample = Some(sample);
            timeline.queue_scroll(sample);
            ui.ctx().request_repaint();
        }

        if let Some(percent) = indicator.visible(now) {
            draw_zoom_badge(ui.painter(), area_rect, percent);
            if let Some(left) = indicator.remaining(now) {
                ui.ctx().request_repaint_after(left);
            }
        }

        interaction
    }
}

/// Browser-style wheel delta and modifier flag for zoom-relevant events.
/// Positive deltas zoom out, matching a downward wheel.
fn zoom_event(event: &Event) -> Option<(f32, bool)> {
    match event {
        Event::MouseWheel {
            delta, modifiers, ..
        } => Some((-delta.y, modifiers.command || modifiers.ctrl)),
        Event::Zoom(factor) if *factor > 1.0 => Some((-1.0, true)),
        Event::Zoom(factor) if *factor < 1.0 => Some((1.0, true)),
        _ => None,
    }
}

fn handle_zoom_input(
    timeline: &mut Timeline,
    indicator: &mut ZoomIndicator,
    ui: &Ui,
    area_rect: Rect,
    now: Instant,
) {
    let events: Vec<(f32, bool)> = ui.input(|i| i.events.iter().filter_map(zoom_event).collect());
    if events.is_empty() {
        return;
    }
    let pointer_x = ui
        .input(|i| i.pointer.hover_pos())
        .map_or(0.0, |pos| (pos.x - area_rect.left() - LABEL_WIDTH).max(0.0));

    let mut scroll_before = timeline.scroll_left();
    for (delta_y, has_modifier) in events {
        let outcome = timeline.on_zoom_input(ZoomInput {
            delta_y,
            pointer_x,
            scroll_before,
            has_modifier,
        });
        if outcome.changed {
            scroll_before = outcome.new_scroll_left;
            indicator.show(outcome.zoom_percent, now);
        }
    }
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

fn draw_day_columns(canvas: &Canvas, timeline: &Timeline, first: i64, last: i64) {
    let first_day = timeline.metadata().first_day();
    let today = timeline.today();
    let painter = canvas.painter;

    for offset in first..last {
        let date = first_day + Duration::days(offset);
        let x = canvas.day_x(offset);
        let column = Rect::from_min_max(
            Pos2::new(x, canvas.body_top),
            Pos2::new(x + canvas.day_width, canvas.body_bottom.max(canvas.clip.bottom())),
        );

        if date == today {
            painter.rect_filled(column, 0.0, theme::BG_TODAY);
        } else if is_weekend(date) {
            painter.rect_filled(column, 0.0, theme::BG_WEEKEND);
        }

        let stroke = if date.day() == 1 {
            Stroke::new(1.0, theme::MONTH_LINE)
        } else {
            Stroke::new(0.5, theme::GRID_LINE)
        };
        painter.line_segment([column.left_top(), column.left_bottom()], stroke);
    }
}

fn draw_row_lines(canvas: &Canvas, rows: usize, width: f32) {
    for row in 1..=rows {
        let y = canvas.row_top(row);
        canvas.painter.line_segment(
            [
                Pos2::new(canvas.grid_left - LABEL_WIDTH, y),
                Pos2::new(canvas.grid_left - LABEL_WIDTH + width, y),
            ],
            Stroke::new(0.5, theme::BORDER_SUBTLE),
        );
    }
}

fn draw_phase_bar(
    canvas: &Canvas,
    row: usize,
    kind: PhaseKind,
    bar: BarPlacement,
    hack: &Hack,
) -> Rect {
    let inset = theme::BAR_INSET;
    let bar_rect = Rect::from_min_size(
        Pos2::new(canvas.grid_left + bar.left, canvas.row_top(row) + inset),
        Vec2::new(bar.width.max(2.0), ROW_HEIGHT - inset * 2.0),
    );
    if !bar_rect.intersects(canvas.clip) {
        return bar_rect;
    }

    let painter = canvas.painter;
    let (base, highlight) = theme::phase_colors(kind);
    let rounding = Rounding::same(theme::BAR_ROUNDING);

    painter.rect_filled(bar_rect.translate(Vec2::new(1.0, 2.0)), rounding, Color32::from_black_alpha(35));
    painter.rect_filled(bar_rect, rounding, base);
    painter.rect_filled(
        Rect::from_min_size(bar_rect.min, Vec2::new(bar_rect.width(), bar_rect.height() * 0.45)),
        Rounding {
            nw: theme::BAR_ROUNDING,
            ne: theme::BAR_ROUNDING,
            sw: 0.0,
            se: 0.0,
        },
        highlight.gamma_multiply(0.35),
    );

    if bar_rect.width() > 24.0 {
        let text = match kind {
            PhaseKind::Hack => hack.name.clone(),
            _ => kind.label().to_string(),
        };
        let galley = painter.layout_no_wrap(text, theme::font_bar(), theme::TEXT_ON_BAR);
        let text_y = bar_rect.top() + (bar_rect.height() - galley.size().y) / 2.0;
        painter
            .with_clip_rect(bar_rect.shrink2(Vec2::new(4.0, 0.0)).intersect(canvas.clip))
            .galley(Pos2::new(bar_rect.left() + 6.0, text_y), galley, Color32::TRANSPARENT);
    }

    bar_rect
}

fn draw_today_line(canvas: &Canvas, x: f32) {
    let top = canvas.clip.top() + HEADER_HEIGHT;
    canvas.painter.line_segment(
        [
            Pos2::new(x, top),
            Pos2::new(x, canvas.body_bottom.max(canvas.clip.bottom())),
        ],
        Stroke::new(2.0, theme::TODAY_LINE),
    );
    canvas
        .painter
        .circle_filled(Pos2::new(x, top + 3.0), 4.0, theme::TODAY_LINE);
}

/// Three-row header pinned to the top of the viewport: months, day numbers,
/// two-letter weekday names.
fn draw_header(canvas: &Canvas, timeline: &Timeline, first: i64, last: i64) {
    let painter = canvas.painter;
    let top = canvas.clip.top();
    let header = Rect::from_min_size(
        Pos2::new(canvas.clip.left(), top),
        Vec2::new(canvas.clip.width(), HEADER_HEIGHT),
    );
    painter.rect_filled(header, 0.0, theme::BG_HEADER);

    let month_row = top + theme::MONTH_HEADER_HEIGHT;
    let day_row = month_row + theme::DAY_HEADER_HEIGHT;
    let grid_visible_left = canvas.clip.left() + LABEL_WIDTH;

    for month in timeline.metadata().months() {
        if month.end_offset() <= first || month.day_offset >= last {
            continue;
        }
        let left = canvas.day_x(month.day_offset);
        let right = left + month.width(canvas.day_width);
        let cell = Rect::from_min_max(Pos2::new(left, top), Pos2::new(right, month_row));
        painter.line_segment(
            [cell.left_top(), cell.left_bottom()],
            Stroke::new(1.0, theme::MONTH_LINE),
        );

        // Keep the month name readable while its first days are scrolled away.
        let label_x = left.max(grid_visible_left) + 8.0;
        let name = month.label();
        painter
            .with_clip_rect(cell.intersect(header))
            .text(
                Pos2::new(label_x, cell.center().y),
                Align2::LEFT_CENTER,
                name,
                theme::font_header(),
                theme::TEXT_PRIMARY,
            );
    }

    let first_day = timeline.metadata().first_day();
    let today = timeline.today();
    for offset in first..last {
        let date = first_day + Duration::days(offset);
        let x = canvas.day_x(offset);
        let center_x = x + canvas.day_width / 2.0;
        let color = if date == today {
            theme::TODAY_LINE
        } else if is_weekend(date) {
            theme::TEXT_DIM
        } else {
            theme::TEXT_SECONDARY
        };

        if date == today {
            painter.rect_filled(
                Rect::from_min_max(Pos2::new(x, month_row), Pos2::new(x + canvas.day_width, day_row)),
                0.0,
                theme::BG_TODAY,
            );
        }
        painter.text(
            Pos2::new(center_x, month_row + theme::DAY_HEADER_HEIGHT / 2.0),
            Align2::CENTER_CENTER,
            date.day().to_string(),
            theme::font_sub(),
            color,
        );

        let weekday: String = date.format("%a").to_string().chars().take(2).collect();
        painter.text(
            Pos2::new(center_x, day_row + theme::DAYNAME_HEADER_HEIGHT / 2.0),
            Align2::CENTER_CENTER,
            weekday,
            theme::font_small(),
            color,
        );
    }

    painter.line_segment(
        [header.left_bottom(), header.right_bottom()],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );
}

/// Hack names pinned to the left edge of the viewport.
fn draw_row_labels(canvas: &Canvas, hacks: &[Hack]) {
    let painter = canvas.painter;
    let left = canvas.clip.left();
    let column = Rect::from_min_max(
        Pos2::new(left, canvas.clip.top()),
        Pos2::new(left + LABEL_WIDTH, canvas.clip.bottom()),
    );
    painter.rect_filled(column, 0.0, theme::BG_PANEL);

    let rows = painter.with_clip_rect(
        Rect::from_min_max(
            Pos2::new(left, canvas.clip.top() + HEADER_HEIGHT),
            column.max,
        )
        .intersect(canvas.clip),
    );
    if hacks.is_empty() {
        rows.text(
            Pos2::new(left + 10.0, canvas.row_top(0) + ROW_HEIGHT / 2.0),
            Align2::LEFT_CENTER,
            "No hacks yet",
            egui::FontId::proportional(12.0),
            theme::TEXT_DIM,
        );
    }
    for (row, hack) in hacks.iter().enumerate() {
        let cell = Rect::from_min_size(
            Pos2::new(left, canvas.row_top(row)),
            Vec2::new(LABEL_WIDTH, ROW_HEIGHT),
        );
        let galley = rows.layout_no_wrap(hack.name.clone(), theme::font_bar(), theme::TEXT_PRIMARY);
        rows.with_clip_rect(cell.shrink2(Vec2::new(8.0, 0.0)).intersect(rows.clip_rect()))
            .galley(
                Pos2::new(cell.left() + 10.0, cell.center().y - galley.size().y / 2.0),
                galley,
                Color32::TRANSPARENT,
            );
        rows.line_segment(
            [cell.left_bottom(), cell.right_bottom()],
            Stroke::new(0.5, theme::BORDER_SUBTLE),
        );
    }

    painter.line_segment(
        [column.right_top(), column.right_bottom()],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );

    let corner = Rect::from_min_size(column.min, Vec2::new(LABEL_WIDTH, HEADER_HEIGHT));
    painter.rect_filled(corner, 0.0, theme::BG_HEADER);
    painter.text(
        Pos2::new(corner.left() + 10.0, corner.bottom() - theme::DAYNAME_HEADER_HEIGHT / 2.0),
        Align2::LEFT_CENTER,
        "Events",
        theme::font_header(),
        theme::TEXT_SECONDARY,
    );
    painter.line_segment(
        [corner.left_bottom(), corner.right_bottom()],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );
}

fn draw_zoom_badge(painter: &Painter, area_rect: Rect, percent: u32) {
    let galley = painter.layout_no_wrap(
        format!("{percent}%"),
        egui::FontId::proportional(15.0),
        Color32::WHITE,
    );
    let size = galley.size() + Vec2::new(24.0, 12.0);
    let badge = Rect::from_center_size(
        Pos2::new(area_rect.center().x, area_rect.top() + HEADER_HEIGHT + 28.0),
        size,
    );
    painter.rect_filled(badge, Rounding::same(8.0), Color32::from_black_alpha(190));
    painter.rect_stroke(badge, Rounding::same(8.0), Stroke::new(1.0, theme::ACCENT));
    painter.galley(
        badge.min + Vec2::new(12.0, 6.0),
        galley,
        Color32::TRANSPARENT,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Modifiers, MouseWheelUnit};

    fn wheel(delta_y: f32, modifiers: Modifiers) -> Event {
        Event::MouseWheel {
            unit: MouseWheelUnit::Line,
            delta: Vec2::new(0.0, delta_y),
            modifiers,
        }
    }

    #[test]
    fn ctrl_wheel_up_zooms_in() {
        let (delta_y, has_modifier) = zoom_event(&wheel(1.0, Modifiers::CTRL)).unwrap();
        assert!(delta_y < 0.0);
        assert!(has_modifier);

        let (delta_y, has_modifier) = zoom_event(&wheel(-1.0, Modifiers::COMMAND)).unwrap();
        assert!(delta_y > 0.0);
        assert!(has_modifier);
    }

    #[test]
    fn plain_wheel_carries_no_modifier() {
        let (_, has_modifier) = zoom_event(&wheel(1.0, Modifiers::NONE)).unwrap();
        assert!(!has_modifier);
        let (_, has_modifier) = zoom_event(&wheel(-3.0, Modifiers::SHIFT)).unwrap();
        assert!(!has_modifier);
    }

    #[test]
    fn pinch_maps_to_one_step() {
        assert_eq!(zoom_event(&Event::Zoom(1.1)), Some((-1.0, true)));
        assert_eq!(zoom_event(&Event::Zoom(0.9)), Some((1.0, true)));
        assert_eq!(zoom_event(&Event::Zoom(1.0)), None);
    }

    #[test]
    fn other_events_are_ignored() {
        assert_eq!(zoom_event(&Event::Copy), None);
    }
}
