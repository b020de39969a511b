//! # Theme Configuration
//!
//! Centralized colors and global style setup. The palette follows the
//! app's printed-schedule look: deep emerald surfaces with amber accents.

use eframe::egui;

pub mod colors {
    use eframe::egui::Color32;

    pub const EMERALD_DARK: Color32 = Color32::from_rgb(4, 47, 36);
    pub const EMERALD: Color32 = Color32::from_rgb(7, 89, 67);
    pub const EMERALD_LIGHT: Color32 = Color32::from_rgb(209, 250, 229);
    pub const AMBER: Color32 = Color32::from_rgb(245, 158, 11);
    pub const AMBER_LIGHT: Color32 = Color32::from_rgb(255, 251, 235);
    pub const CREAM: Color32 = Color32::from_rgb(255, 253, 245);
    pub const ERROR_RED: Color32 = Color32::from_rgb(185, 28, 28);
    pub const WARNING_TEXT: Color32 = Color32::from_rgb(120, 53, 15);
    pub const MUTED: Color32 = Color32::from_rgb(100, 116, 139);
}

/// One-time visual setup at app construction.
pub fn setup_app_style(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(8.0, 8.0);
    style.spacing.button_padding = egui::vec2(12.0, 6.0);
    style.visuals.selection.bg_fill = colors::EMERALD;
    style.visuals.hyperlink_color = colors::AMBER;
    ctx.set_style(style);
}
