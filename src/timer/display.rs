//! Label text formatting and label layout

use serde::Serialize;

/// Width of the main countdown field in characters
pub const MAIN_FIELD_WIDTH: usize = 2;

/// The three text labels on the timer screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelSlot {
    Stretch,
    Pause,
    Main,
}

impl LabelSlot {
    pub const ALL: [LabelSlot; 3] = [LabelSlot::Stretch, LabelSlot::Pause, LabelSlot::Main];

    pub fn as_str(&self) -> &'static str {
        match self {
            LabelSlot::Stretch => "stretch",
            LabelSlot::Pause => "pause",
            LabelSlot::Main => "main",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Black,
    White,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Font {
    pub size: u8,
    pub bold: bool,
}

impl Font {
    pub const SMALL: Font = Font { size: 14, bold: false };
    pub const LARGE_BOLD: Font = Font { size: 49, bold: true };
}

/// Rectangle in screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Frame {
    pub x: i16,
    pub y: i16,
    pub width: u16,
    pub height: u16,
}

impl Frame {
    pub const fn new(x: i16, y: i16, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LabelStyle {
    pub alignment: Alignment,
    pub foreground: Color,
    pub background: Color,
    pub font: Font,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LabelLayout {
    pub frame: Frame,
    pub style: LabelStyle,
}

/// Build a centered label style from explicit colors and font
pub fn label_style(font: Font, foreground: Color, background: Color) -> LabelStyle {
    LabelStyle {
        alignment: Alignment::Center,
        foreground,
        background,
        font,
    }
}

/// Screen layout for a label slot, white on black
pub fn default_layout(slot: LabelSlot) -> LabelLayout {
    let (frame, font) = match slot {
        LabelSlot::Stretch => (Frame::new(0, 0, 144, 16), Font::SMALL),
        LabelSlot::Pause => (Frame::new(0, 136, 144, 16), Font::SMALL),
        LabelSlot::Main => (Frame::new(0, 16, 144, 120), Font::LARGE_BOLD),
    };
    LabelLayout {
        frame,
        style: label_style(font, Color::White, Color::Black),
    }
}

/// Render a countdown value into the two-character main field.
///
/// Values that need more than two digits keep their leading digits.
pub fn format_countdown(secs: u32) -> String {
    let mut text = secs.to_string();
    text.truncate(MAIN_FIELD_WIDTH);
    text
}

pub fn stretch_label_text(duration_secs: u32) -> String {
    format!("Stretch Time: {}", duration_secs)
}

pub fn pause_label_text(duration_secs: u32) -> String {
    format!("Pause Time: {}", duration_secs)
}
