use egui::{RichText, Ui};
use egui_phosphor::regular as icons;
use hack_planner::model::MonthStep;

use crate::app::PlannerApp;
use crate::ui::theme;

/// Render the top bar: month navigation, current view label and year tabs.
pub fn show_toolbar(app: &mut PlannerApp, ui: &mut Ui) {
    ui.horizontal(|ui| {
        ui.label(
            RichText::new(format!("{} Hack Planner", icons::CALENDAR))
                .strong()
                .size(15.0)
                .color(theme::TEXT_PRIMARY),
        );
        ui.add_space(16.0);

        if ui
            .button(icons::CARET_LEFT)
            .on_hover_text("Previous month")
            .clicked()
        {
            app.step_month(MonthStep::Previous);
        }
        if ui.button("Today").clicked() {
            app.go_to_today();
        }
        if ui
            .button(icons::CARET_RIGHT)
            .on_hover_text("Next month")
            .clicked()
        {
            app.step_month(MonthStep::Next);
        }

        ui.add_space(8.0);
        let scroll_left = app.timeline.scroll_left();
        ui.label(
            RichText::new(app.timeline.view_label(scroll_left))
                .font(theme::font_header())
                .color(theme::TEXT_PRIMARY),
        );

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let active = app.timeline.active_year(scroll_left);
            let years: Vec<i32> = app.timeline.range().years().collect();
            // right_to_left lays out the last year first
            for year in years.into_iter().rev() {
                let text = RichText::new(year.to_string()).size(12.0);
                if ui.selectable_label(year == active, text).clicked() {
                    app.jump_to_year(year);
                }
            }
        });
    });
}
