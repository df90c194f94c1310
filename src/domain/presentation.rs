// SPDX-License-Identifier: MPL-2.0
//! Label presentation attributes.
//!
//! Maps a classifier label to an accent color and an icon glyph. The mapping
//! is total: labels outside the known table get [`DEFAULT_STYLE`], so a label
//! the server introduces later still renders.

/// An sRGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Builds a color from a `0xRRGGBB` literal.
    #[must_use]
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }

    /// Returns the `#rrggbb` representation.
    #[must_use]
    pub fn to_hex_string(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Display attributes derived from a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelStyle {
    pub accent: Rgb,
    pub icon: &'static str,
}

/// Style used for any label missing from [`KNOWN_LABELS`].
pub const DEFAULT_STYLE: LabelStyle = LabelStyle {
    accent: Rgb::from_hex(0x667eea),
    icon: "🔍",
};

/// Labels the classifier is known to emit.
pub const KNOWN_LABELS: &[(&str, LabelStyle)] = &[
    (
        "Healthy",
        LabelStyle {
            accent: Rgb::from_hex(0x48bb78),
            icon: "🌿",
        },
    ),
    (
        "Early Blight",
        LabelStyle {
            accent: Rgb::from_hex(0xed8936),
            icon: "🦠",
        },
    ),
    (
        "Late Blight",
        LabelStyle {
            accent: Rgb::from_hex(0xe53e3e),
            icon: "🍄",
        },
    ),
];

/// Returns the accent color and icon for `label`.
///
/// Matching is exact; anything else falls back to [`DEFAULT_STYLE`].
#[must_use]
pub fn attributes_for(label: &str) -> LabelStyle {
    KNOWN_LABELS
        .iter()
        .find(|(known, _)| *known == label)
        .map_or(DEFAULT_STYLE, |(_, style)| *style)
}
