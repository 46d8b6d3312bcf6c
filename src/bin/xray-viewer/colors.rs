//! Color constants for the viewer.

use eframe::egui::Color32;

pub const VIEWPORT_BACKGROUND: Color32 = Color32::from_rgb(255, 255, 255);
pub const IMAGE_BORDER: Color32 = Color32::from_rgb(59, 130, 246);
pub const TOOLBAR_TEXT: Color32 = Color32::from_rgb(75, 85, 99);
pub const PLACEHOLDER_TEXT: Color32 = Color32::from_gray(120);
