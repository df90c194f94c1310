// SPDX-License-Identifier: MPL-2.0
//! Confidence bar styles.

use crate::ui::design_tokens::{opacity, radius};
use iced::widget::progress_bar;
use iced::{Background, Border, Color, Theme};

/// Bar filled with `accent` over a faint track of the same hue.
pub fn confidence(accent: Color) -> impl Fn(&Theme) -> progress_bar::Style {
    move |_theme: &Theme| progress_bar::Style {
        background: Background::Color(Color {
            a: opacity::TRACK,
            ..accent
        }),
        bar: Background::Color(accent),
        border: Border {
            radius: radius::FULL.into(),
            ..Default::default()
        },
    }
}
