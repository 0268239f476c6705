//! Tag colors are persisted as three floating-point channels in `[0, 1]`.
//! Terminal colors and hex strings are converted at the edges.

use colored::Color;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ColorParseError {
  #[error("color must be #RRGGBB or #RRGGBBAA, got: {0:?}")]
  Length(String),

  #[error("invalid hex digits in color: {0:?}")]
  Digits(String),
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rgb {
  pub red: f64,
  pub green: f64,
  pub blue: f64,
}

impl Default for Rgb {
  fn default() -> Self {
    Self::new(0.5, 0.5, 0.5)
  }
}

impl Rgb {
  pub fn new(red: f64, green: f64, blue: f64) -> Self {
    Self {
      red: clamp_channel(red),
      green: clamp_channel(green),
      blue: clamp_channel(blue),
    }
  }

  pub fn from_bytes(red: u8, green: u8, blue: u8) -> Self {
    Self::new(
      red as f64 / 255.0,
      green as f64 / 255.0,
      blue as f64 / 255.0,
    )
  }

  pub fn to_bytes(&self) -> (u8, u8, u8) {
    (
      channel_to_byte(self.red),
      channel_to_byte(self.green),
      channel_to_byte(self.blue),
    )
  }

  /// Accepts `#RRGGBB` or `#RRGGBBAA`, with or without the leading `#`.
  /// The alpha channel is dropped.
  pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 && digits.len() != 8 {
      return Err(ColorParseError::Length(hex.to_owned()));
    }
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
      return Err(ColorParseError::Digits(hex.to_owned()));
    }

    let byte_at = |offset: usize| {
      u8::from_str_radix(&digits[offset..offset + 2], 16)
        .map_err(|_| ColorParseError::Digits(hex.to_owned()))
    };

    Ok(Self::from_bytes(byte_at(0)?, byte_at(2)?, byte_at(4)?))
  }

  pub fn to_hex(&self) -> String {
    let (r, g, b) = self.to_bytes();
    format!("#{:02x}{:02x}{:02x}", r, g, b)
  }

  pub fn from_color(color: Color) -> Self {
    let (r, g, b) = match color {
      Color::Black => (0, 0, 0),
      Color::Red => (205, 0, 0),
      Color::Green => (0, 205, 0),
      Color::Yellow => (205, 205, 0),
      Color::Blue => (0, 0, 238),
      Color::Magenta => (205, 0, 205),
      Color::Cyan => (0, 205, 205),
      Color::White => (229, 229, 229),
      Color::BrightBlack => (127, 127, 127),
      Color::BrightRed => (255, 0, 0),
      Color::BrightGreen => (0, 255, 0),
      Color::BrightYellow => (255, 255, 0),
      Color::BrightBlue => (92, 92, 255),
      Color::BrightMagenta => (255, 0, 255),
      Color::BrightCyan => (0, 255, 255),
      Color::BrightWhite => (255, 255, 255),
      Color::TrueColor { r, g, b } => (r, g, b),
    };
    Self::from_bytes(r, g, b)
  }

  pub fn to_color(&self) -> Color {
    let (r, g, b) = self.to_bytes();
    Color::TrueColor { r, g, b }
  }
}

impl From<Color> for Rgb {
  fn from(color: Color) -> Self {
    Self::from_color(color)
  }
}

impl From<Rgb> for Color {
  fn from(rgb: Rgb) -> Self {
    rgb.to_color()
  }
}

impl std::str::FromStr for Rgb {
  type Err = ColorParseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::from_hex(s)
  }
}

fn clamp_channel(value: f64) -> f64 {
  if value.is_nan() {
    return 0.0;
  }
  value.clamp(0.0, 1.0)
}

fn channel_to_byte(value: f64) -> u8 {
  (clamp_channel(value) * 255.0).round() as u8
}
