use crate::tasks::Priority;
use ratatui::style::Color;

/// Theme color palette defining all colors used in the application.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Theme {
    pub name: String,

    // Primary colors
    pub primary: ColorSpec,
    pub accent: ColorSpec,

    // Text colors
    pub text: ColorSpec,
    pub text_muted: ColorSpec,

    // Background colors
    pub background: ColorSpec,
    pub surface: ColorSpec,

    // Status colors
    pub success: ColorSpec,
    pub warning: ColorSpec,
    pub error: ColorSpec,

    // UI element colors
    pub border_active: ColorSpec,
    pub border_normal: ColorSpec,
    pub highlight_bg: ColorSpec,
    pub highlight_fg: ColorSpec,

    // Footer mode colors
    pub footer_normal: ColorSpec,
    pub footer_edit: ColorSpec,
    pub footer_delete: ColorSpec,
}

/// Color specification that can be serialized/deserialized.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorSpec {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorSpec {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        ColorSpec { r, g, b }
    }

    pub fn to_color(&self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }
}

const GRAY_50: ColorSpec = ColorSpec::new(249, 250, 251);
const GRAY_100: ColorSpec = ColorSpec::new(243, 244, 246);
const GRAY_400: ColorSpec = ColorSpec::new(156, 163, 175);
const GRAY_500: ColorSpec = ColorSpec::new(107, 114, 128);
const GRAY_700: ColorSpec = ColorSpec::new(55, 65, 81);
const GRAY_800: ColorSpec = ColorSpec::new(31, 41, 55);
const GRAY_900: ColorSpec = ColorSpec::new(17, 24, 39);
const WHITE: ColorSpec = ColorSpec::new(255, 255, 255);
const BLUE: ColorSpec = ColorSpec::new(37, 99, 235);
const BLUE_LIGHT: ColorSpec = ColorSpec::new(96, 165, 250);
const RED: ColorSpec = ColorSpec::new(220, 38, 38);
const AMBER: ColorSpec = ColorSpec::new(251, 191, 36);
const GREEN: ColorSpec = ColorSpec::new(34, 197, 94);

impl Default for Theme {
    fn default() -> Self {
        Theme::light()
    }
}

impl Theme {
    /// Pick the palette matching the dark mode preference.
    ///
    pub fn for_mode(dark_mode: bool) -> Self {
        if dark_mode {
            Theme::dark()
        } else {
            Theme::light()
        }
    }

    /// Light palette.
    ///
    pub fn light() -> Self {
        Theme {
            name: "light".to_string(),
            primary: BLUE,
            accent: BLUE_LIGHT,
            text: GRAY_800,
            text_muted: GRAY_500,
            background: GRAY_100,
            surface: WHITE,
            success: GREEN,
            warning: AMBER,
            error: RED,
            border_active: BLUE,
            border_normal: GRAY_400,
            highlight_bg: BLUE,
            highlight_fg: WHITE,
            footer_normal: BLUE,
            footer_edit: GREEN,
            footer_delete: RED,
        }
    }

    /// Dark palette.
    ///
    pub fn dark() -> Self {
        Theme {
            name: "dark".to_string(),
            primary: BLUE_LIGHT,
            accent: BLUE,
            text: GRAY_50,
            text_muted: GRAY_400,
            background: GRAY_900,
            surface: GRAY_800,
            success: GREEN,
            warning: AMBER,
            error: RED,
            border_active: BLUE_LIGHT,
            border_normal: GRAY_700,
            highlight_bg: GRAY_700,
            highlight_fg: GRAY_50,
            footer_normal: BLUE,
            footer_edit: GREEN,
            footer_delete: RED,
        }
    }

    pub fn is_dark(&self) -> bool {
        self.name == "dark"
    }

    /// Color used to tag a task priority.
    ///
    pub fn priority_color(&self, priority: Priority) -> Color {
        match priority {
            Priority::High => self.error.to_color(),
            Priority::Medium => self.warning.to_color(),
            Priority::Low => self.success.to_color(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_mode() {
        assert!(Theme::for_mode(true).is_dark());
        assert!(!Theme::for_mode(false).is_dark());
        assert_eq!(Theme::default(), Theme::light());
    }

    #[test]
    fn test_priority_colors_differ() {
        let theme = Theme::dark();
        assert_eq!(theme.priority_color(Priority::High), Color::Rgb(220, 38, 38));
        assert_ne!(
            theme.priority_color(Priority::Medium),
            theme.priority_color(Priority::Low)
        );
    }

    #[test]
    fn test_palettes_contrast() {
        let light = Theme::light();
        let dark = Theme::dark();
        assert_ne!(light.background, dark.background);
        assert_ne!(light.text, dark.text);
    }
}
