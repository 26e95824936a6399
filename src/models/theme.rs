//! Profile theme configuration types
//!
//! Themes are pure configuration values: constructed (usually deserialized
//! from the profile record), read by the renderer, never mutated in place.

use serde::{Deserialize, Serialize};

/// Border radius: either a pixel value or a percentage string like `"50%"`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum BorderRadius {
    Pixels(f64),
    Percent(String),
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ThemeBorder {
    pub radius: BorderRadius,
    pub width: f64,
    pub color: String,
}

/// Border variant for primary buttons, which take their radius and width
/// from the button style itself
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ThemeBorderColor {
    pub color: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ThemeShadow {
    pub color: String,
    pub x: f64,
    pub y: f64,
    pub blur: f64,
    pub spread: f64,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GradientType {
    Linear,
    Radial,
    Conic,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ImagePosition {
    Center,
    Top,
    Bottom,
    Left,
    Right,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ImageSize {
    Cover,
    Contain,
}

/// Page background, discriminated by the `type` field
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Background {
    Gradient {
        gradient_colors: Vec<String>,
        gradient_direction: Option<f64>,
        gradient_type: GradientType,
    },
    Image {
        image_url: String,
        image_position: ImagePosition,
        image_size: ImageSize,
    },
    Color {
        color: String,
    },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AvatarStyle {
    pub size: f64,
    pub border: Option<ThemeBorder>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FontStyle {
    pub family: String,
    pub color_paragraph: String,
    pub color_heading: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SpacingStyle {
    pub padding: f64,
    pub gap: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct WidgetStyle {
    pub color_background: String,
    pub color_background_dim: String,
    pub border: ThemeBorder,
    pub shadow: Option<ThemeShadow>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PrimaryButtonStyle {
    pub color_background: String,
    pub color_on_background: String,
    pub border: ThemeBorderColor,
    pub shadow: Option<ThemeShadow>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SecondaryInputStyle {
    pub color_background: String,
    pub color_on_background: String,
    pub border: ThemeBorder,
    pub shadow: Option<ThemeShadow>,
}

/// A complete profile theme
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Theme {
    pub background: Background,
    pub avatar: AvatarStyle,
    pub font: FontStyle,
    pub spacing: SpacingStyle,
    pub widgets: WidgetStyle,
    pub primary_buttons: PrimaryButtonStyle,
    pub secondary_inputs: SecondaryInputStyle,
}
