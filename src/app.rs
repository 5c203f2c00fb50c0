use chrono::NaiveDate;
use hack_planner::io::HackStore;
use hack_planner::model::{Hack, HackBook, MonthStep, Timeline, ZoomIndicator};
use hack_planner::{Settings, TimelineError};
use tracing::{info, warn};
use uuid::Uuid;

use crate::ui;
use crate::ui::calendar_view::CalendarView;
use crate::ui::dialogs::{EditorAction, HackEditor};
use crate::ui::toast::Toasts;

/// Main application state.
pub struct PlannerApp {
    pub book: HackBook,
    pub store: HackStore,
    pub timeline: Timeline,
    pub calendar: CalendarView,
    pub indicator: ZoomIndicator,
    pub toasts: Toasts,
    pub editor: Option<HackEditor>,

    /// Scroll to today once the calendar has reported its width.
    pending_today: bool,
}

impl PlannerApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: &Settings,
        today: NaiveDate,
    ) -> Result<Self, TimelineError> {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);
        ui::theme::apply_theme(&cc.egui_ctx);

        let store = HackStore::in_data_dir().unwrap_or_else(|e| {
            warn!("{}; storing hacks in the working directory", e);
            HackStore::new(format!("{}.json", hack_planner::io::STORAGE_KEY))
        });
        let book = HackBook::new(store.load());

        let timeline = Timeline::around(
            today,
            settings.years_before,
            settings.years_after,
            settings.zoom(),
        )?;
        info!(
            today = %today,
            years = ?(timeline.range().year_start()..=timeline.range().year_end()),
            hacks = book.len(),
            store = %store.path().display(),
            "planner ready"
        );

        Ok(Self {
            book,
            store,
            timeline,
            calendar: CalendarView::default(),
            indicator: ZoomIndicator::new(settings.zoom_indicator_delay()),
            toasts: Toasts::new(settings.toast_duration()),
            editor: None,
            pending_today: true,
        })
    }

    pub fn step_month(&mut self, step: MonthStep) {
        let scroll_left = self.timeline.scroll_left();
        self.timeline.scroll_by_month(step, scroll_left);
    }

    pub fn jump_to_year(&mut self, year: i32) {
        if let Err(e) = self.timeline.jump_to_year(year) {
            warn!("cannot show {}: {}", year, e);
            self.toasts.error(e.to_string());
        }
    }

    pub fn go_to_today(&mut self) {
        match self.calendar.viewport_width() {
            Some(width) => {
                if let Err(e) = self.timeline.scroll_to_today(width) {
                    warn!("cannot scroll to today: {}", e);
                }
                self.pending_today = false;
            }
            None => self.pending_today = true,
        }
    }

    fn open_editor(&mut self, id: Uuid) {
        if let Some(hack) = self.book.get(id) {
            self.editor = Some(HackEditor::edit(hack));
        }
    }

    fn save_hack(&mut self, mut hack: Hack, is_new: bool) {
        hack.normalize();
        if let Err(e) = hack.validate() {
            self.toasts.error(e.to_string());
            return;
        }
        let name = hack.name.clone();
        info!(id = %hack.id, name = %name, is_new, "saving hack");
        if is_new {
            self.book.add(hack);
            self.toasts.success(format!("Added \"{}\"", name));
        } else if self.book.update(hack) {
            self.toasts.success(format!("Updated \"{}\"", name));
        } else {
            self.toasts.error(format!("\"{}\" no longer exists", name));
        }
        self.store.save(self.book.hacks());
        self.editor = None;
    }

    fn delete_hack(&mut self, id: Uuid) {
        if let Some(hack) = self.book.remove(id) {
            info!(id = %id, name = %hack.name, "deleted hack");
            self.store.save(self.book.hacks());
            self.toasts.info(format!("Deleted \"{}\"", hack.name));
        }
        self.editor = None;
    }
}

impl eframe::App for PlannerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.pending_today {
            self.go_to_today();
        }
        // Latest scroll sample from the previous frame.
        self.timeline.run_frame();

        // Top panel: toolbar
        egui::TopBottomPanel::top("toolbar")
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_HEADER)
                    .inner_margin(egui::Margin::symmetric(10.0, 6.0)),
            )
            .show(ctx, |ui| {
                ui::toolbar::show_toolbar(self, ui);
            });

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_HEADER_SUB)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new("Ctrl+Scroll or pinch to zoom")
                            .size(10.5)
                            .color(ui::theme::TEXT_DIM),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(self.book.count_label())
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                        );
                        ui.label(
                            egui::RichText::new(" · ")
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                        );
                        ui.label(
                            egui::RichText::new(format!(
                                "Zoom: {}%",
                                self.timeline.zoom_percent()
                            ))
                            .size(10.5)
                            .color(ui::theme::TEXT_DIM),
                        );
                    });
                });
            });

        // Left panel: hack list
        let mut sidebar_action = ui::sidebar::SidebarAction::None;
        egui::SidePanel::left("hack_panel")
            .default_width(ui::theme::SIDE_PANEL_WIDTH)
            .min_width(220.0)
            .resizable(true)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_PANEL)
                    .inner_margin(egui::Margin::same(10.0))
                    .stroke(egui::Stroke::new(1.0, ui::theme::BORDER_SUBTLE)),
            )
            .show(ctx, |ui| {
                let hacks = self.book.sorted_by_start();
                sidebar_action =
                    ui::sidebar::show_sidebar(&hacks, &self.book.count_label(), ui);
            });

        match sidebar_action {
            ui::sidebar::SidebarAction::Open(id) => self.open_editor(id),
            ui::sidebar::SidebarAction::Add => {
                self.editor = Some(HackEditor::new_hack(self.timeline.today()));
            }
            ui::sidebar::SidebarAction::None => {}
        }

        // Central panel: calendar
        let calendar_frame = egui::Frame::default()
            .fill(ui::theme::BG_DARK)
            .inner_margin(egui::Margin::ZERO);
        let interaction = egui::CentralPanel::default()
            .frame(calendar_frame)
            .show(ctx, |ui| {
                // Rows keep insertion order; only the sidebar is sorted.
                self.calendar
                    .show(&mut self.timeline, self.book.hacks(), &mut self.indicator, ui)
            })
            .inner;
        if let Some(id) = interaction.open_hack {
            self.open_editor(id);
        }

        // Dialogs
        let action = self
            .editor
            .as_mut()
            .map_or(EditorAction::None, |editor| editor.show(ctx));
        match action {
            EditorAction::Save(hack) => {
                let is_new = self.editor.as_ref().is_some_and(HackEditor::is_new);
                self.save_hack(hack, is_new);
            }
            EditorAction::Delete(id) => self.delete_hack(id),
            EditorAction::Close => self.editor = None,
            EditorAction::None => {}
        }

        self.toasts.show(ctx);
    }
}
