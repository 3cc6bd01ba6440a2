use serde::{Deserialize, Serialize};

use crate::errors::UxError;

/// Normalized RGBA colour, each channel in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("Hex colour '{value}' must have 6 or 8 digits")]
    InvalidLength { value: String },

    #[error("Hex colour '{value}' contains a non-hex digit")]
    InvalidDigit { value: String },
}

impl UxError for ColorError {
    fn error_code(&self) -> &'static str {
        match self {
            ColorError::InvalidLength { .. } => "COLOR_INVALID_LENGTH",
            ColorError::InvalidDigit { .. } => "COLOR_INVALID_DIGIT",
        }
    }

    fn is_user_error(&self) -> bool {
        true
    }
}

/// Parse `#rrggbb` or `#rrggbbaa` (leading `#` optional). Alpha defaults to 1.0.
pub fn parse_hex_color(hex: &str) -> Result<Rgba, ColorError> {
    let digits = hex.trim_start_matches('#');
    if digits.len() != 6 && digits.len() != 8 {
        return Err(ColorError::InvalidLength {
            value: hex.to_string(),
        });
    }
    // from_str_radix alone would accept a sign such as "+f".
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidDigit {
            value: hex.to_string(),
        });
    }

    let channel = |range: std::ops::Range<usize>| -> Result<f32, ColorError> {
        let part = digits.get(range).ok_or_else(|| ColorError::InvalidDigit {
            value: hex.to_string(),
        })?;
        u8::from_str_radix(part, 16)
            .map(|v| f32::from(v) / 255.0)
            .map_err(|_| ColorError::InvalidDigit {
                value: hex.to_string(),
            })
    };

    let a = if digits.len() == 8 { channel(6..8)? } else { 1.0 };

    Ok(Rgba {
        r: channel(0..2)?,
        g: channel(2..4)?,
        b: channel(4..6)?,
        a,
    })
}
