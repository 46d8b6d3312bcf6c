/// Width of the sidebar panel in pixels.
pub const SIDEBAR_WIDTH: f32 = 220.0;

/// Margin between the viewport edge and the zoom toolbar.
pub const TOOLBAR_MARGIN: f32 = 12.0;

/// Approximate size of the zoom toolbar, used to anchor it bottom-center.
pub const TOOLBAR_SIZE: [f32; 2] = [200.0, 36.0];

/// Width of the outline drawn around the displayed image.
pub const IMAGE_BORDER_WIDTH: f32 = 2.0;
