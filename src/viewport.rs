//! Zoom and pan state for a single image viewer.
//!
//! Every operation is a pure function of the current state, its inputs and
//! the [`Geometry`] measured at call time. Operations never fail: requests
//! saturate at the zoom limits, offsets are clamped to the pan bound, and
//! gestures that arrive before the image or container can be measured leave
//! the state untouched.

use crate::geometry::{Geometry, Point, Rect, Size};

/// Default lower zoom limit.
pub const MIN_SCALE: f32 = 0.5;

/// Default upper zoom limit.
pub const MAX_SCALE: f32 = 3.0;

/// Inclusive scale range a viewport may reach.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomLimits {
    min: f32,
    max: f32,
}

impl ZoomLimits {
    /// Returns `None` unless `0 < min <= 1 <= max` and both are finite,
    /// so that the reset scale is always reachable.
    pub fn new(min: f32, max: f32) -> Option<Self> {
        let valid = min.is_finite() && max.is_finite() && min > 0.0 && min <= 1.0 && max >= 1.0;
        valid.then_some(Self { min, max })
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn clamp(&self, scale: f32) -> f32 {
        scale.clamp(self.min, self.max)
    }
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            min: MIN_SCALE,
            max: MAX_SCALE,
        }
    }
}

/// Current transform of the displayed image plus in-progress drag tracking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    /// Zoom factor applied to the image's natural size.
    pub scale: f32,
    /// Image center relative to the container center, in container pixels.
    pub offset: Point,
    pub is_dragging: bool,
    /// `pointer - offset` captured when the drag began.
    pub drag_anchor: Point,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: Point::ZERO,
            is_dragging: false,
            drag_anchor: Point::ZERO,
        }
    }
}

impl ViewportState {
    /// Changes the scale by `delta`, keeping the image point under `anchor` stationary.
    ///
    /// `anchor` is in container space (origin at the container's top-left
    /// corner). Without an anchor the zoom is centered on the container.
    #[must_use]
    pub fn zoom_by(
        self,
        delta: f32,
        anchor: Option<Point>,
        geometry: &Geometry,
        limits: ZoomLimits,
    ) -> Self {
        if !geometry.is_available() || !delta.is_finite() {
            return self;
        }

        let new_scale = limits.clamp(self.scale + delta);
        if new_scale == self.scale {
            return self.clamp_to(geometry);
        }

        let center = geometry.container.center();
        let anchor = match anchor {
            Some(anchor) if anchor.is_finite() => anchor,
            Some(_) => return self,
            None => center,
        };

        // Anchor relative to the container center, then back into unscaled image space.
        let anchor_rel = anchor - center;
        let image_point = (anchor_rel - self.offset) * (1.0 / self.scale);
        let offset = anchor_rel - image_point * new_scale;

        Self {
            scale: new_scale,
            offset: geometry.clamp_offset(offset, new_scale),
            ..self
        }
    }

    #[must_use]
    pub fn begin_drag(self, pointer: Point, geometry: &Geometry) -> Self {
        if !geometry.is_available() || !pointer.is_finite() {
            return self;
        }

        Self {
            is_dragging: true,
            drag_anchor: pointer - self.offset,
            ..self
        }
    }

    /// Moves the image with the pointer. Does nothing unless a drag is in progress.
    #[must_use]
    pub fn continue_drag(self, pointer: Point, geometry: &Geometry) -> Self {
        if !self.is_dragging || !geometry.is_available() || !pointer.is_finite() {
            return self;
        }

        Self {
            offset: geometry.clamp_offset(pointer - self.drag_anchor, self.scale),
            ..self
        }
    }

    #[must_use]
    pub fn end_drag(self) -> Self {
        Self {
            is_dragging: false,
            ..self
        }
    }

    /// Pulls the offset back inside the pan bound for `geometry`.
    ///
    /// The container can change size between gestures (window resize, layout),
    /// which may leave a previously valid offset out of bounds.
    #[must_use]
    pub fn clamp_to(self, geometry: &Geometry) -> Self {
        if !geometry.is_available() {
            return self;
        }

        Self {
            offset: geometry.clamp_offset(self.offset, self.scale),
            ..self
        }
    }

    #[must_use]
    pub fn reset(self) -> Self {
        Self::default()
    }

    /// Rectangle the image occupies in container space.
    ///
    /// `None` while the geometry is unavailable.
    pub fn image_rect(&self, geometry: &Geometry) -> Option<Rect> {
        if !geometry.is_available() {
            return None;
        }

        let offset = geometry.clamp_offset(self.offset, self.scale);
        let center = geometry.container.center() + offset;
        let size = Size::new(
            geometry.image.width * self.scale,
            geometry.image.height * self.scale,
        );
        Some(Rect::from_center_size(center, size))
    }

    /// Maps a container-space point into unscaled image space (origin at the image center).
    pub fn container_to_image(&self, point: Point, geometry: &Geometry) -> Option<Point> {
        if !geometry.is_available() {
            return None;
        }
        let rel = point - geometry.container.center();
        Some((rel - self.offset) * (1.0 / self.scale))
    }

    /// Inverse of [`Self::container_to_image`].
    pub fn image_to_container(&self, point: Point, geometry: &Geometry) -> Option<Point> {
        if !geometry.is_available() {
            return None;
        }
        Some(geometry.container.center() + self.offset + point * self.scale)
    }

    /// CSS-equivalent transform: translate by the offset, then scale, around the container center.
    pub fn css_transform(&self) -> String {
        format!(
            "translate({}px, {}px) scale({})",
            self.offset.x, self.offset.y, self.scale
        )
    }

    /// Zoom level as a whole percentage, for display.
    pub fn zoom_percent(&self) -> u32 {
        (self.scale * 100.0).round().max(0.0) as u32
    }
}
