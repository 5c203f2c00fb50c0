use chrono::NaiveDate;
use egui::{Color32, Context, RichText, Ui, Window};
use egui_phosphor::regular as icons;
use hack_planner::model::{Document, Hack, PhaseKind, Phases};
use uuid::Uuid;

use crate::ui::theme;

/// What the hack form asks the app to do after this frame.
pub enum EditorAction {
    None,
    Save(Hack),
    Delete(Uuid),
    Close,
}

/// Add/edit form for one hack. Works on a draft; nothing reaches the
/// book until the app accepts a [`EditorAction::Save`].
pub struct HackEditor {
    draft: Hack,
    is_new: bool,
    confirm_delete: bool,
}

impl HackEditor {
    pub fn new_hack(today: NaiveDate) -> Self {
        let mut draft = Hack::new("", Phases::starting(today));
        draft.documents.push(Document::default());
        Self {
            draft,
            is_new: true,
            confirm_delete: false,
        }
    }

    pub fn edit(hack: &Hack) -> Self {
        let mut draft = hack.clone();
        if draft.documents.is_empty() {
            draft.documents.push(Document::default());
        }
        Self {
            draft,
            is_new: false,
            confirm_delete: false,
        }
    }

    pub fn is_new(&self) -> bool {
        self.is_new
    }

    pub fn show(&mut self, ctx: &Context) -> EditorAction {
        let mut action = EditorAction::None;
        let title = if self.is_new { "Add Hack" } else { "Edit Hack" };

        Window::new(RichText::new(title).strong().size(14.0))
            .resizable(false)
            .collapsible(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .fixed_size([440.0, 0.0])
            .show(ctx, |ui| {
                ui.visuals_mut().extreme_bg_color = theme::BG_FIELD;
                ui.visuals_mut().striped = false;

                egui::ScrollArea::vertical()
                    .max_height(ctx.screen_rect().height() * 0.7)
                    .show(ui, |ui| {
                        self.details(ui);
                        ui.add_space(6.0);
                        self.phases(ui);
                        ui.add_space(6.0);
                        self.documents(ui);
                        ui.add_space(6.0);
                        ui.label(RichText::new("Notes").color(theme::TEXT_SECONDARY));
                        ui.add(
                            egui::TextEdit::multiline(&mut self.draft.notes)
                                .desired_rows(3)
                                .desired_width(f32::INFINITY),
                        );
                    });

                ui.add_space(6.0);
                ui.separator();
                ui.add_space(4.0);
                action = self.buttons(ui);
            });

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            action = EditorAction::Close;
        }
        action
    }

    fn details(&mut self, ui: &mut Ui) {
        egui::Grid::new("hack_details_grid")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                let fields = [
                    ("Name", &mut self.draft.name, "Hack name..."),
                    ("PO", &mut self.draft.po, "Product owner"),
                    ("Tech sheet", &mut self.draft.tech_sheet, "https://..."),
                    ("Cred sheet", &mut self.draft.cred_sheet, "https://..."),
                ];
                for (label, value, hint) in fields {
                    ui.label(RichText::new(label).color(theme::TEXT_SECONDARY));
                    ui.add_sized(
                        [300.0, 24.0],
                        egui::TextEdit::singleline(value).hint_text(hint),
                    );
                    ui.end_row();
                }
            });
    }

    fn phases(&mut self, ui: &mut Ui) {
        egui::Grid::new("hack_phase_grid")
            .num_columns(3)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                for kind in PhaseKind::ALL {
                    let (color, _) = theme::phase_colors(kind);
                    ui.label(RichText::new(kind.label()).color(color).strong());

                    let range = self.draft.phases.get_mut(kind);
                    ui.add(
                        egui_extras::DatePickerButton::new(&mut range.start)
                            .id_salt(&format!("dp_{:?}_start", kind)),
                    );
                    let end_changed = ui
                        .add(
                            egui_extras::DatePickerButton::new(&mut range.end)
                                .id_salt(&format!("dp_{:?}_end", kind)),
                        )
                        .changed();
                    ui.end_row();

                    // Later phases follow the one that just moved.
                    if end_changed {
                        match kind {
                            PhaseKind::Pre => self.draft.phases.chain_after_pre(),
                            PhaseKind::Hack => self.draft.phases.chain_after_hack(),
                            PhaseKind::Post => {}
                        }
                    }
                }
            });
    }

    fn documents(&mut self, ui: &mut Ui) {
        ui.label(RichText::new("Documents").color(theme::TEXT_SECONDARY));

        let mut remove = None;
        let single = self.draft.documents.len() <= 1;
        for (i, doc) in self.draft.documents.iter_mut().enumerate() {
            ui.horizontal(|ui| {
                ui.add_sized(
                    [130.0, 22.0],
                    egui::TextEdit::singleline(&mut doc.name).hint_text("Name"),
                );
                ui.add_sized(
                    [220.0, 22.0],
                    egui::TextEdit::singleline(&mut doc.url).hint_text("URL"),
                );
                if ui.small_button(icons::X).on_hover_text("Remove").clicked() {
                    remove = Some(i);
                }
            });
        }
        if let Some(i) = remove {
            // The last row is cleared rather than removed.
            if single {
                self.draft.documents[i] = Document::default();
            } else {
                self.draft.documents.remove(i);
            }
        }

        if ui
            .button(format!("{}  Add document", icons::PLUS))
            .clicked()
        {
            self.draft.documents.push(Document::default());
        }
    }

    fn buttons(&mut self, ui: &mut Ui) -> EditorAction {
        let mut action = EditorAction::None;
        ui.horizontal(|ui| {
            let save_btn = egui::Button::new(RichText::new("Save").color(Color32::WHITE))
                .fill(theme::ACCENT)
                .rounding(egui::Rounding::same(4.0));
            if ui.add_sized([80.0, 28.0], save_btn).clicked() {
                action = EditorAction::Save(self.draft.clone());
            }
            if ui.add_sized([80.0, 28.0], egui::Button::new("Cancel")).clicked() {
                action = EditorAction::Close;
            }

            if self.is_new {
                return;
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if self.confirm_delete {
                    let confirm = egui::Button::new(
                        RichText::new(format!("{}  Confirm delete", icons::TRASH))
                            .color(Color32::WHITE),
                    )
                    .fill(theme::TODAY_LINE);
                    if ui.add(confirm).clicked() {
                        action = EditorAction::Delete(self.draft.id);
                    }
                    if ui.button("Keep").clicked() {
                        self.confirm_delete = false;
                    }
                } else if ui
                    .button(RichText::new(format!("{}  Delete", icons::TRASH)).color(theme::TODAY_LINE))
                    .clicked()
                {
                    self.confirm_delete = true;
                }
            });
        });
        action
    }
}
