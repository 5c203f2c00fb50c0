use std::time::{Duration, Instant};

use egui::{Align2, Color32, Context, RichText};
use egui_phosphor::regular as icons;

use crate::ui::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Info,
    Error,
}

impl ToastKind {
    fn icon(self) -> &'static str {
        match self {
            ToastKind::Success => icons::CHECK_CIRCLE,
            ToastKind::Info => icons::INFO,
            ToastKind::Error => icons::WARNING_CIRCLE,
        }
    }

    fn color(self) -> Color32 {
        match self {
            ToastKind::Success => Color32::from_rgb(74, 222, 128),
            ToastKind::Info => theme::ACCENT,
            ToastKind::Error => theme::TODAY_LINE,
        }
    }
}

#[derive(Debug, Clone)]
struct Toast {
    kind: ToastKind,
    message: String,
    expires_at: Instant,
}

/// Short-lived notifications stacked in the bottom-right corner.
#[derive(Debug, Clone)]
pub struct Toasts {
    lifetime: Duration,
    items: Vec<Toast>,
}

impl Toasts {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            lifetime,
            items: Vec::new(),
        }
    }

    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) {
        self.items.push(Toast {
            kind,
            message: message.into(),
            expires_at: Instant::now() + self.lifetime,
        });
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Success, message);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Info, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Error, message);
    }

    pub fn show(&mut self, ctx: &Context) {
        let now = Instant::now();
        self.items.retain(|toast| toast.expires_at > now);
        let Some(next_expiry) = self.items.iter().map(|toast| toast.expires_at).min() else {
            return;
        };

        egui::Area::new(egui::Id::new("toasts"))
            .anchor(Align2::RIGHT_BOTTOM, [-16.0, -(theme::STATUS_BAR_HEIGHT + 12.0)])
            .interactable(false)
            .show(ctx, |ui| {
                for toast in &self.items {
                    egui::Frame::popup(ui.style())
                        .fill(theme::BG_HEADER)
                        .stroke(egui::Stroke::new(1.0, toast.kind.color()))
                        .show(ui, |ui| {
                            ui.horizontal(|ui| {
                                ui.label(
                                    RichText::new(toast.kind.icon())
                                        .size(16.0)
                                        .color(toast.kind.color()),
                                );
                                ui.label(RichText::new(&toast.message).color(theme::TEXT_PRIMARY));
                            });
                        });
                    ui.add_space(6.0);
                }
            });

        ctx.request_repaint_after(next_expiry.saturating_duration_since(now));
    }
}
