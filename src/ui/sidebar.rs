use egui::{Color32, RichText, Ui};
use egui_phosphor::regular as icons;
use hack_planner::model::{Hack, PhaseKind};
use uuid::Uuid;

use crate::ui::theme;

/// Actions that the hack list can request.
pub enum SidebarAction {
    None,
    Open(Uuid),
    Add,
}

/// Render the hack list panel, earliest pre-event start first.
pub fn show_sidebar(hacks: &[&Hack], count_label: &str, ui: &mut Ui) -> SidebarAction {
    let mut action = SidebarAction::None;

    ui.add_space(2.0);
    ui.horizontal(|ui| {
        ui.label(
            RichText::new("Hacks")
                .strong()
                .size(15.0)
                .color(theme::TEXT_PRIMARY),
        );
        ui.add_space(4.0);
        ui.label(RichText::new(count_label).size(11.0).color(theme::TEXT_DIM));
    });
    ui.add_space(4.0);

    let btn = egui::Button::new(
        RichText::new(format!("{}  Add Hack", icons::PLUS))
            .color(Color32::WHITE)
            .size(12.0),
    )
    .fill(theme::ACCENT)
    .rounding(egui::Rounding::same(5.0));
    if ui.add_sized([ui.available_width(), 30.0], btn).clicked() {
        action = SidebarAction::Add;
    }

    ui.add_space(6.0);
    ui.separator();

    if hacks.is_empty() {
        ui.add_space(24.0);
        ui.vertical_centered(|ui| {
            ui.label(RichText::new(icons::CALENDAR_BLANK).size(28.0).color(theme::TEXT_DIM));
            ui.label(RichText::new("No hacks planned yet.").color(theme::TEXT_SECONDARY));
            ui.label(
                RichText::new("Add one to see it on the calendar.")
                    .size(11.0)
                    .color(theme::TEXT_DIM),
            );
        });
        return action;
    }

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for hack in hacks {
                let response = hack_card(hack, ui);
                if response.clicked() {
                    action = SidebarAction::Open(hack.id);
                }
            }
        });

    action
}

fn hack_card(hack: &Hack, ui: &mut Ui) -> egui::Response {
    let frame = egui::Frame {
        fill: theme::BG_DARK,
        rounding: egui::Rounding::same(6.0),
        inner_margin: egui::Margin::symmetric(10.0, 8.0),
        outer_margin: egui::Margin::symmetric(0.0, 3.0),
        stroke: egui::Stroke::new(1.0, theme::BORDER_SUBTLE),
        shadow: egui::epaint::Shadow::NONE,
    };

    let card = frame.show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(RichText::new(&hack.name).strong().color(theme::TEXT_PRIMARY));

        let span = hack.phases.span();
        ui.label(
            RichText::new(format!(
                "{} → {}",
                span.start.format("%b %-d, %Y"),
                span.end.format("%b %-d, %Y"),
            ))
            .size(11.0)
            .color(theme::TEXT_SECONDARY),
        );

        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 4.0;
            for kind in PhaseKind::ALL {
                let (swatch, _) = ui.allocate_exact_size(egui::vec2(8.0, 8.0), egui::Sense::hover());
                ui.painter()
                    .rect_filled(swatch, 2.0, theme::phase_colors(kind).0);
                let range = hack.phases.get(kind);
                ui.label(
                    RichText::new(format!(
                        "{} – {}",
                        range.start.format("%b %-d"),
                        range.end.format("%b %-d"),
                    ))
                    .size(10.0)
                    .color(theme::TEXT_DIM),
                )
                .on_hover_text(kind.label());
                ui.add_space(4.0);
            }
        });

        if !hack.po.is_empty() {
            ui.label(
                RichText::new(format!("{} PO: {}", icons::USER, hack.po))
                    .size(11.0)
                    .color(theme::TEXT_SECONDARY),
            );
        }

        ui.horizontal_wrapped(|ui| {
            for (name, url) in [("Tech sheet", &hack.tech_sheet), ("Cred sheet", &hack.cred_sheet)] {
                if !url.is_empty() {
                    link(ui, name, url);
                }
            }
            for doc in &hack.documents {
                if doc.url.is_empty() {
                    ui.label(RichText::new(&doc.name).size(11.0).color(theme::TEXT_DIM));
                } else {
                    link(ui, &doc.name, &doc.url);
                }
            }
        });

        if !hack.notes.is_empty() {
            ui.label(
                RichText::new(&hack.notes)
                    .italics()
                    .size(11.0)
                    .color(theme::TEXT_DIM),
            );
        }
    });

    let response = card.response.interact(egui::Sense::click());
    if response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        ui.painter().rect_filled(
            response.rect,
            egui::Rounding::same(6.0),
            theme::BG_ROW_HOVER,
        );
    }
    response
}

fn link(ui: &mut Ui, name: &str, url: &str) {
    ui.hyperlink_to(
        RichText::new(format!("{} {}", icons::LINK, name)).size(11.0),
        url,
    );
}
