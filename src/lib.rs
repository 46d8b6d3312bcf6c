//! Interactive pan/zoom viewport for X-ray images.
//!
//! [`ViewportState`] holds the transform and implements the zoom and drag
//! operations; [`Viewport`] binds it to a [`ViewerConfig`] and consumes
//! [`GestureEvent`]s; [`ViewerSession`] ties a viewport to the image it shows
//! and to the host's [`ScrollLock`].

pub mod config;
pub mod geometry;
pub mod gesture;
pub mod session;
pub mod viewport;

pub use config::{ConfigError, ViewerConfig};
pub use geometry::{Geometry, Point, Rect, Size};
pub use gesture::{GestureEvent, Viewport};
pub use session::{ScrollLock, ScrollLockToken, ViewerSession};
pub use viewport::{MAX_SCALE, MIN_SCALE, ViewportState, ZoomLimits};
