//! Gesture events from the UI layer and the viewport that consumes them.

use crate::config::ViewerConfig;
use crate::geometry::{Geometry, Point};
use crate::viewport::ViewportState;
use serde::{Deserialize, Serialize};

/// A user gesture targeting the viewport.
///
/// Positions are in container space (origin at the container's top-left corner).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum GestureEvent {
    ZoomIn,
    ZoomOut,
    /// Mouse wheel over the image. Only the sign of `delta` is used:
    /// positive zooms in, negative zooms out, zero is ignored.
    ///
    /// Positive means wheel-up, as in egui's `raw_scroll_delta.y`. This is the
    /// opposite of DOM `WheelEvent.deltaY`, so web hosts must negate it.
    Wheel { position: Point, delta: f32 },
    DragStart { position: Point },
    DragMove { position: Point },
    DragEnd,
    Reset,
}

/// A viewport bound to its configuration.
///
/// One per viewer; never shared.
#[derive(Debug, Clone, Default)]
pub struct Viewport {
    config: ViewerConfig,
    state: ViewportState,
}

impl Viewport {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            config,
            state: ViewportState::default(),
        }
    }

    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Applies one gesture and returns the resulting state.
    pub fn handle(&mut self, event: GestureEvent, geometry: &Geometry) -> ViewportState {
        let limits = self.config.limits();
        let state = self.state;

        self.state = match event {
            GestureEvent::ZoomIn => state.zoom_by(self.config.button_step, None, geometry, limits),
            GestureEvent::ZoomOut => {
                state.zoom_by(-self.config.button_step, None, geometry, limits)
            }
            GestureEvent::Wheel { position, delta } => match wheel_step(delta, self.config.wheel_step) {
                Some(step) => state.zoom_by(step, Some(position), geometry, limits),
                None => state,
            },
            GestureEvent::DragStart { position } => state.begin_drag(position, geometry),
            GestureEvent::DragMove { position } => state.continue_drag(position, geometry),
            GestureEvent::DragEnd => state.end_drag(),
            GestureEvent::Reset => state.reset(),
        };

        if self.state != state {
            log::debug!("{event:?} -> {}", self.state.css_transform());
        }

        self.state
    }

    /// Applies a sequence of gestures against the same geometry.
    pub fn replay<'a>(
        &mut self,
        events: impl IntoIterator<Item = &'a GestureEvent>,
        geometry: &Geometry,
    ) -> ViewportState {
        for event in events {
            self.handle(*event, geometry);
        }
        self.state
    }

    pub fn reset(&mut self) {
        self.state = self.state.reset();
    }

    /// Re-clamps the offset after the container or image was re-measured.
    pub fn fit_to(&mut self, geometry: &Geometry) -> ViewportState {
        self.state = self.state.clamp_to(geometry);
        self.state
    }
}

fn wheel_step(delta: f32, step: f32) -> Option<f32> {
    if delta > 0.0 {
        Some(step)
    } else if delta < 0.0 {
        Some(-step)
    } else {
        None
    }
}
