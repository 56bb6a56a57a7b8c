//! Colors, spacing and font sizes for the dark theme.

use iced::Color;

pub mod colors {
    use super::Color;

    /// Card/panel background
    pub const CARD: Color = Color::from_rgb(0.14, 0.14, 0.14);

    /// Modal dialog background
    pub const DIALOG: Color = Color::from_rgb(0.16, 0.16, 0.16);

    /// Dimmed backdrop behind the completion dialog
    pub const BACKDROP: Color = Color::from_rgba(0.0, 0.0, 0.0, 0.6);

    pub const TEXT_SECONDARY: Color = Color::from_rgb(0.53, 0.53, 0.53);
    pub const TEXT_MUTED: Color = Color::from_rgb(0.40, 0.40, 0.40);

    /// Inline error messages
    pub const ERROR_TEXT: Color = Color::from_rgb(0.90, 0.40, 0.40);

    /// Cleanup warnings in the completion dialog
    pub const WARNING_TEXT: Color = Color::from_rgb(0.90, 0.80, 0.40);

    pub const SUCCESS_TEXT: Color = Color::from_rgb(0.45, 0.80, 0.45);

    pub const BORDER: Color = Color::from_rgb(0.25, 0.25, 0.25);

    /// Paste button states
    pub const BUTTON_BG: Color = Color::from_rgb(0.20, 0.20, 0.20);
    pub const BUTTON_HOVER: Color = Color::from_rgb(0.25, 0.30, 0.35);
    pub const BUTTON_PRESSED: Color = Color::from_rgb(0.20, 0.25, 0.30);
}

/// Spacing constants.
pub mod spacing {
    /// 4px
    pub const XS: f32 = 4.0;
    /// 8px
    pub const SM: f32 = 8.0;
    /// 12px
    pub const MD: f32 = 12.0;
    /// 16px
    pub const LG: f32 = 16.0;
    /// 24px
    pub const XL: f32 = 24.0;
}

/// Font sizes.
pub mod font {
    pub const SM: f32 = 11.0;
    pub const NORMAL: f32 = 13.0;
    pub const MD: f32 = 14.0;
    pub const LG: f32 = 16.0;
    pub const HEADER: f32 = 18.0;
}
