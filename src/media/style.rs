use clap::ValueEnum;
use std::fmt;

/// Screen anchor for burned-in subtitles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ScreenPosition {
    #[default]
    #[value(name = "lower_center")]
    LowerCenter,
    #[value(name = "lower_left")]
    LowerLeft,
    #[value(name = "lower_right")]
    LowerRight,
    #[value(name = "upper_center")]
    UpperCenter,
    #[value(name = "upper_left")]
    UpperLeft,
    #[value(name = "upper_right")]
    UpperRight,
}

/// Position to ASS alignment code (numpad layout)
const ALIGNMENT_CODES: [(ScreenPosition, u8); 6] = [
    (ScreenPosition::LowerLeft, 1),
    (ScreenPosition::LowerCenter, 2),
    (ScreenPosition::LowerRight, 3),
    (ScreenPosition::UpperLeft, 7),
    (ScreenPosition::UpperCenter, 8),
    (ScreenPosition::UpperRight, 9),
];

/// Color name to the BGR hex string ffmpeg's force_style expects
const COLORS: [(&str, &str); 8] = [
    ("white", "FFFFFF"),
    ("black", "000000"),
    ("yellow", "00FFFF"),
    ("red", "0000FF"),
    ("green", "00FF00"),
    ("blue", "FF0000"),
    ("cyan", "FFFF00"),
    ("magenta", "FF00FF"),
];

const FALLBACK_COLOR: &str = "FFFFFF";

impl ScreenPosition {
    pub fn alignment_code(self) -> u8 {
        ALIGNMENT_CODES
            .iter()
            .find(|(position, _)| *position == self)
            .map(|(_, code)| *code)
            .unwrap_or(2)
    }

    pub fn name(self) -> &'static str {
        match self {
            ScreenPosition::LowerCenter => "lower_center",
            ScreenPosition::LowerLeft => "lower_left",
            ScreenPosition::LowerRight => "lower_right",
            ScreenPosition::UpperCenter => "upper_center",
            ScreenPosition::UpperLeft => "upper_left",
            ScreenPosition::UpperRight => "upper_right",
        }
    }
}

impl fmt::Display for ScreenPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// BGR hex for a color name; unknown names are white.
pub fn color_to_hex(name: &str) -> &'static str {
    let name = name.to_lowercase();
    COLORS
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, hex)| *hex)
        .unwrap_or(FALLBACK_COLOR)
}

/// Appearance of burned-in subtitles
#[derive(Debug, Clone, PartialEq)]
pub struct BurnInStyle {
    pub font_size: u32,
    pub position: ScreenPosition,
    pub primary_color: String,
    pub outline_color: String,
    pub outline_width: f64,
}

impl Default for BurnInStyle {
    fn default() -> Self {
        Self {
            font_size: 24,
            position: ScreenPosition::LowerCenter,
            primary_color: "white".to_string(),
            outline_color: "black".to_string(),
            outline_width: 1.0,
        }
    }
}

impl BurnInStyle {
    /// Value of the subtitles filter's `force_style` option
    pub fn force_style(&self) -> String {
        format!(
            "Alignment={},FontSize={},PrimaryColour=&H{},OutlineColour=&H{},BorderStyle=1,Outline={},MarginV=30",
            self.position.alignment_code(),
            self.font_size,
            color_to_hex(&self.primary_color),
            color_to_hex(&self.outline_color),
            self.outline_width
        )
    }
}
