// SPDX-License-Identifier: MPL-2.0
//! Diagnosis card and per-label breakdown.

use super::Message;
use crate::domain::classification::{ClassificationResult, LabelScore};
use crate::domain::presentation::{attributes_for, Rgb};
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{progress_bar, Column, Container, Row, Text};
use iced::{alignment, Color, Element, Length};

fn color(rgb: Rgb) -> Color {
    Color::from_rgb8(rgb.r, rgb.g, rgb.b)
}

pub(super) fn view<'a>(i18n: &'a I18n, result: &'a ClassificationResult) -> Element<'a, Message> {
    Column::new()
        .spacing(spacing::LG)
        .width(Length::Fill)
        .push(build_main_card(i18n, result))
        .push(build_breakdown(i18n, result.breakdown()))
        .into()
}

fn build_main_card<'a>(i18n: &'a I18n, result: &'a ClassificationResult) -> Element<'a, Message> {
    let style = attributes_for(result.chosen_label());
    let accent = color(style.accent);
    let confidence = i18n.tr_with_args("result-confidence", &[("value", &result.percent_label())]);

    let content = Column::new()
        .spacing(spacing::XS)
        .align_x(alignment::Horizontal::Center)
        .width(Length::Fill)
        .push(
            Text::new(i18n.tr("result-title"))
                .size(typography::BODY_SM)
                .color(accent),
        )
        .push(Text::new(style.icon).size(sizing::ICON_XL))
        .push(
            Text::new(result.chosen_label())
                .size(typography::TITLE_LG)
                .color(accent),
        )
        .push(Text::new(confidence).size(typography::BODY_LG));

    Container::new(content)
        .width(Length::Fill)
        .padding(spacing::LG)
        .style(styles::container::result_card(accent))
        .into()
}

/// One row per entry, in the order the server listed them.
fn build_breakdown<'a>(i18n: &'a I18n, breakdown: &'a [LabelScore]) -> Element<'a, Message> {
    let rows = breakdown.iter().fold(
        Column::new()
            .spacing(spacing::SM)
            .push(Text::new(i18n.tr("result-all-predictions")).size(typography::TITLE_SM)),
        |column, score| column.push(build_row(score)),
    );

    Container::new(rows)
        .width(Length::Fill)
        .padding(spacing::MD)
        .style(styles::container::panel)
        .into()
}

fn build_row(score: &LabelScore) -> Element<'_, Message> {
    let style = attributes_for(&score.label);
    let accent = color(style.accent);
    // The bar clamps its value; out-of-range scores still show their raw percent.
    let value = score.confidence as f32;

    Row::new()
        .spacing(spacing::SM)
        .align_y(alignment::Vertical::Center)
        .push(Text::new(style.icon).size(sizing::ICON_SM))
        .push(
            Text::new(score.label.as_str())
                .size(typography::BODY)
                .width(Length::Fixed(sizing::PREDICTION_LABEL_WIDTH)),
        )
        .push(
            progress_bar(0.0..=1.0, value)
                .length(Length::Fill)
                .girth(sizing::PROGRESS_HEIGHT)
                .style(styles::progress::confidence(accent)),
        )
        .push(
            Container::new(Text::new(score.percent_label()).size(typography::BODY))
                .width(Length::Fixed(sizing::PREDICTION_VALUE_WIDTH))
                .align_x(alignment::Horizontal::Right),
        )
        .into()
}
