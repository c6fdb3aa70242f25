//! egui renderer for the application UI.

use std::sync::Arc;
use std::time::Duration;

use crate::classifier::Classifier;
use crate::egui_app::controller::DigitController;
use eframe::egui::{
    self, Color32, Frame, Margin, RichText, Stroke, StrokeKind, TextureHandle, TextureOptions, Ui,
    Vec2,
};

/// Drawing canvas edge length in pixels.
pub const CANVAS_SIZE: usize = 280;
/// Smallest usable window size.
pub const MIN_VIEWPORT_SIZE: Vec2 = Vec2::new(420.0, 420.0);

/// Renders the egui UI using the shared controller state.
pub struct EguiApp {
    controller: DigitController,
    visuals_set: bool,
    canvas_tex: Option<TextureHandle>,
}

impl EguiApp {
    /// Create the app around an injected classifier.
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self {
            controller: DigitController::new(classifier, CANVAS_SIZE, CANVAS_SIZE),
            visuals_set: false,
            canvas_tex: None,
        }
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        visuals.window_fill = Color32::from_rgb(12, 12, 12);
        visuals.panel_fill = Color32::from_rgb(16, 16, 16);
        visuals.widgets.noninteractive.bg_fill = Color32::from_rgb(16, 16, 16);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn render_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar")
            .frame(Frame::none().fill(Color32::from_rgb(24, 24, 24)))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("Digitink").color(Color32::WHITE));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui
                            .button(RichText::new("Close").color(Color32::WHITE))
                            .clicked()
                        {
                            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                        }
                    });
                });
            });
    }

    fn render_status(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .frame(Frame::none().fill(Color32::from_rgb(0, 0, 0)))
            .show(ctx, |ui| {
                let status = &self.controller.ui.status;
                ui.horizontal(|ui| {
                    ui.add_space(8.0);
                    ui.painter().circle_filled(
                        ui.cursor().min + egui::vec2(9.0, 11.0),
                        9.0,
                        status.badge_color,
                    );
                    ui.add_space(8.0);
                    ui.label(RichText::new(&status.badge_label).color(Color32::WHITE));
                    ui.separator();
                    ui.label(RichText::new(&status.text).color(Color32::WHITE));
                });
            });
    }

    fn render_canvas(&mut self, ui: &mut Ui) {
        let desired = Vec2::splat(CANVAS_SIZE as f32);
        let (rect, response) = ui.allocate_exact_size(desired, egui::Sense::drag());

        if let Some(pos) = response.interact_pointer_pos() {
            let local = egui::pos2(
                (pos.x - rect.left()).clamp(0.0, rect.width()),
                (pos.y - rect.top()).clamp(0.0, rect.height()),
            );
            if response.drag_started() {
                self.controller.pointer_down(local);
            } else if response.dragged() {
                self.controller.pointer_moved(local);
            }
        }
        if response.drag_stopped() {
            self.controller.pointer_up();
        }

        if self.controller.take_canvas_dirty() || self.canvas_tex.is_none() {
            let image = self.controller.bitmap().to_color_image();
            if let Some(tex) = self.canvas_tex.as_mut() {
                tex.set(image, TextureOptions::NEAREST);
            } else {
                self.canvas_tex =
                    Some(ui.ctx().load_texture("canvas", image, TextureOptions::NEAREST));
            }
        }

        let painter = ui.painter();
        if let Some(tex) = &self.canvas_tex {
            let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
            painter.image(tex.id(), rect, uv, Color32::WHITE);
        } else {
            painter.rect_filled(rect, 0.0, Color32::WHITE);
        }
        painter.rect_stroke(
            rect,
            0.0,
            Stroke::new(1.0, Color32::from_rgb(64, 64, 64)),
            StrokeKind::Inside,
        );
    }

    fn render_controls(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            let recognize = ui.add_enabled(
                self.controller.ui.recognize_enabled,
                egui::Button::new(RichText::new("Recognize").color(Color32::WHITE)),
            );
            if recognize.clicked() {
                self.controller.recognize();
            }
            let clear = ui.add_enabled(
                self.controller.ui.clear_enabled,
                egui::Button::new(RichText::new("Clear").color(Color32::WHITE)),
            );
            if clear.clicked() {
                self.controller.clear();
            }
        });
        ui.add_space(10.0);
        ui.label(RichText::new("Result").color(Color32::from_rgb(160, 160, 160)));
        ui.label(
            RichText::new(&self.controller.ui.result_label)
                .size(64.0)
                .color(Color32::WHITE),
        );
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        if self.controller.poll_results() {
            ctx.request_repaint();
        }
        if self.controller.inference_in_flight() {
            // Keep polling for the background result.
            ctx.request_repaint_after(Duration::from_millis(50));
        }

        self.render_top_bar(ctx);
        self.render_status(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            let frame = Frame::none()
                .fill(Color32::from_rgb(16, 16, 16))
                .inner_margin(Margin::symmetric(10, 8));
            frame.show(ui, |ui| {
                ui.horizontal_top(|ui| {
                    self.render_canvas(ui);
                    ui.add_space(16.0);
                    ui.vertical(|ui| {
                        self.render_controls(ui);
                    });
                });
            });
        });
    }
}
