//! UI rendering methods for the X-ray viewer.

use crate::XrayViewerApp;
use crate::colors;
use crate::constants::{IMAGE_BORDER_WIDTH, SIDEBAR_WIDTH, TOOLBAR_MARGIN, TOOLBAR_SIZE};
use crate::images::ImageLoadState;
use eframe::egui;
use xray_viewer::{Geometry, GestureEvent, Point, Size};

impl XrayViewerApp {
    /// Handles the close and zoom shortcuts.
    pub fn handle_keyboard_input(&mut self, ctx: &egui::Context) {
        if self.session.is_none() {
            return;
        }

        let (close, zoom_in, zoom_out, reset) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::Escape),
                i.key_pressed(egui::Key::Plus) || i.key_pressed(egui::Key::Equals),
                i.key_pressed(egui::Key::Minus),
                i.key_pressed(egui::Key::Num0),
            )
        });

        if close {
            self.close_viewer();
            return;
        }

        if !self.config.keyboard_zoom {
            return;
        }
        if zoom_in {
            self.apply(GestureEvent::ZoomIn);
        }
        if zoom_out {
            self.apply(GestureEvent::ZoomOut);
        }
        if reset {
            self.apply(GestureEvent::Reset);
        }
    }

    /// Renders the bottom status bar with the controls hint and image info.
    pub fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Scroll: Zoom | Drag: Pan | +/-: Zoom | 0: Reset | Esc: Close");

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if let Some(path) = self.open_path() {
                        let image = self.geometry.image;
                        if image.is_measurable() {
                            ui.label(format!("{} × {} px", image.width, image.height));
                        }
                        ui.label(path.display().to_string());
                    }
                });
            });
        });
    }

    /// Renders the left sidebar listing the loaded images.
    pub fn show_sidebar(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("sidebar")
            .exact_width(SIDEBAR_WIDTH)
            .resizable(false)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .enable_scrolling(!self.scroll_lock.is_locked())
                    .show(ui, |ui| {
                        self.show_sidebar_content(ui);
                    });
            });
    }

    fn show_sidebar_content(&mut self, ui: &mut egui::Ui) {
        ui.add_space(4.0);

        ui.strong("X-rays");
        ui.separator();

        if self.images.is_empty() {
            ui.label("No images given");
            return;
        }

        let open = self.session.as_ref().map(|session| *session.image());
        let mut clicked = None;
        for (idx, path) in self.images.iter().enumerate() {
            let name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            let failed = matches!(self.asset_cache.get(path), Some(ImageLoadState::Error(_)));
            let text = if failed { format!("⚠ {name}") } else { name };

            if ui.selectable_label(open == Some(idx), text).clicked() {
                clicked = Some(idx);
            }
        }

        if let Some(idx) = clicked {
            self.open_image(idx);
        }
    }

    /// Renders the central panel containing the viewer.
    pub fn show_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(path) = self.open_path().cloned() else {
                self.geometry = Geometry::default();
                ui.centered_and_justified(|ui| {
                    ui.label(
                        egui::RichText::new("Select an X-ray to view")
                            .size(18.0)
                            .color(colors::PLACEHOLDER_TEXT),
                    );
                });
                return;
            };

            let panel_rect = ui.max_rect();
            self.show_viewer(ui, &path);
            self.show_zoom_controls(ctx, panel_rect);
        });
    }

    /// Renders the open image inside its pan/zoom viewport.
    fn show_viewer(&mut self, ui: &mut egui::Ui, path: &std::path::Path) {
        match self.asset_cache.get(path) {
            Some(ImageLoadState::Loading(_)) | None => {
                self.geometry = Geometry::default();
                ui.centered_and_justified(|ui| ui.spinner());
                return;
            }
            Some(ImageLoadState::Error(msg)) => {
                self.geometry = Geometry::default();
                ui.centered_and_justified(|ui| {
                    ui.label(format!("Failed to load image: {msg}"));
                });
                return;
            }
            Some(ImageLoadState::Ready(_)) => {}
        }

        let (viewport_rect, response) =
            ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
        ui.painter()
            .rect_filled(viewport_rect, 0.0, colors::VIEWPORT_BACKGROUND);

        // Until the texture exists the image size stays zero and gestures are ignored
        let (texture_id, image_size) = match self.get_texture(path) {
            Some(texture) => {
                let [w, h] = texture.size();
                (Some(texture.id()), Size::new(w as f32, h as f32))
            }
            None => (None, Size::default()),
        };
        self.geometry = Geometry::new(
            Size::new(viewport_rect.width(), viewport_rect.height()),
            image_size,
        );

        if let Some(session) = &mut self.session {
            session.viewport_mut().fit_to(&self.geometry);
        }

        self.handle_pointer(ui, &response, viewport_rect);

        let Some(session) = &self.session else {
            return;
        };
        let state = *session.viewport().state();
        let (Some(texture_id), Some(image_rect)) = (texture_id, state.image_rect(&self.geometry))
        else {
            return;
        };

        let screen_rect = egui::Rect::from_min_max(
            viewport_rect.min + egui::vec2(image_rect.min.x, image_rect.min.y),
            viewport_rect.min + egui::vec2(image_rect.max.x, image_rect.max.y),
        );

        ui.set_clip_rect(viewport_rect);
        ui.painter().image(
            texture_id,
            screen_rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );
        ui.painter().rect_stroke(
            screen_rect,
            0.0,
            egui::Stroke::new(IMAGE_BORDER_WIDTH, colors::IMAGE_BORDER),
            egui::StrokeKind::Outside,
        );
    }

    /// Turns wheel and primary-button drag input over the viewport into gestures.
    fn handle_pointer(
        &mut self,
        ui: &mut egui::Ui,
        response: &egui::Response,
        viewport_rect: egui::Rect,
    ) {
        let to_container = |pos: egui::Pos2| {
            Point::new(pos.x - viewport_rect.min.x, pos.y - viewport_rect.min.y)
        };
        let hover_pos = ui.input(|i| i.pointer.hover_pos());
        let hovering = hover_pos.is_some_and(|p| viewport_rect.contains(p));

        let scroll_delta = ui.input(|i| i.raw_scroll_delta.y);
        if scroll_delta != 0.0
            && hovering
            && let Some(pos) = hover_pos
        {
            self.apply(GestureEvent::Wheel {
                position: to_container(pos),
                delta: scroll_delta,
            });
            // Keep the wheel from also scrolling anything behind the viewer
            ui.ctx().input_mut(|i| {
                i.raw_scroll_delta = egui::Vec2::ZERO;
                i.smooth_scroll_delta = egui::Vec2::ZERO;
            });
        }

        if response.drag_started_by(egui::PointerButton::Primary)
            && let Some(pos) = response.interact_pointer_pos()
        {
            self.apply(GestureEvent::DragStart {
                position: to_container(pos),
            });
        } else if response.dragged_by(egui::PointerButton::Primary)
            && let Some(pos) = response.interact_pointer_pos()
        {
            self.apply(GestureEvent::DragMove {
                position: to_container(pos),
            });
        }

        let dragging = self
            .session
            .as_ref()
            .is_some_and(|session| session.viewport().state().is_dragging);

        if dragging && (response.drag_stopped() || !hovering) {
            self.apply(GestureEvent::DragEnd);
        }

        if dragging && hovering {
            ui.ctx().set_cursor_icon(egui::CursorIcon::Grabbing);
        } else if hovering {
            ui.ctx().set_cursor_icon(egui::CursorIcon::Grab);
        }
    }

    /// Renders the floating zoom toolbar at the bottom center of the viewer.
    fn show_zoom_controls(&mut self, ctx: &egui::Context, panel_rect: egui::Rect) {
        let Some(session) = &self.session else {
            return;
        };
        let percent = session.viewport().state().zoom_percent();

        let anchor_pos = egui::pos2(
            panel_rect.center().x - TOOLBAR_SIZE[0] / 2.0,
            panel_rect.bottom() - TOOLBAR_SIZE[1] - TOOLBAR_MARGIN,
        );

        let mut event = None;
        let mut close = false;

        egui::Area::new(egui::Id::new("zoom_controls"))
            .fixed_pos(anchor_pos)
            .interactable(true)
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style())
                    .fill(ui.style().visuals.window_fill.gamma_multiply(0.95))
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            if ui.button("➕").on_hover_text("Zoom in (+)").clicked() {
                                event = Some(GestureEvent::ZoomIn);
                            }
                            if ui.button("➖").on_hover_text("Zoom out (-)").clicked() {
                                event = Some(GestureEvent::ZoomOut);
                            }
                            if ui.button("⟲").on_hover_text("Reset view (0)").clicked() {
                                event = Some(GestureEvent::Reset);
                            }
                            ui.label(
                                egui::RichText::new(format!("{percent}%"))
                                    .strong()
                                    .color(colors::TOOLBAR_TEXT),
                            );
                            if ui.button("✖").on_hover_text("Close (Esc)").clicked() {
                                close = true;
                            }
                        });
                    });
            });

        if let Some(event) = event {
            self.apply(event);
        }
        if close {
            self.close_viewer();
        }
    }
}
