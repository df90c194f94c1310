// SPDX-License-Identifier: MPL-2.0
//! Classifier screen.
//!
//! Renders the current workflow state top to bottom: header, upload area,
//! preview with its actions, the failure banner and the diagnosis. The screen
//! holds no state of its own; everything comes from [`ViewContext`].

mod results;

use crate::application::workflow::Workflow;
use crate::domain::error::Failure;
use crate::i18n::fluent::I18n;
use crate::infrastructure::HandlePreviewStore;
use crate::media::extensions;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, image, mouse_area, scrollable, Column, Container, Row, Space, Text};
use iced::{alignment, mouse, Element, Length};

/// Contextual data needed to render the classifier screen.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub workflow: &'a Workflow,
    pub previews: &'a HandlePreviewStore,
    /// Files are hovering over the window.
    pub drag_over: bool,
}

/// Messages emitted by the classifier screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    BrowseRequested,
    SubmitRequested,
    ClearRequested,
}

/// Localized text for a workflow failure.
#[must_use]
pub fn failure_message(i18n: &I18n, failure: &Failure) -> String {
    match failure.http_status() {
        Some(status) => {
            let status = status.to_string();
            i18n.tr_with_args(failure.i18n_key(), &[("status", &status)])
        }
        None => i18n.tr(failure.i18n_key()),
    }
}

/// Render the classifier screen.
#[must_use]
#[allow(clippy::needless_pass_by_value)] // ViewContext is small and consumed
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let mut content = Column::new()
        .width(Length::Fill)
        .max_width(sizing::CONTENT_MAX_WIDTH)
        .spacing(spacing::LG)
        .padding(spacing::LG)
        .push(build_header(ctx.i18n))
        .push(build_upload_area(&ctx));

    if let Some(preview) = build_preview_section(&ctx) {
        content = content.push(preview);
    }

    if let Some(failure) = ctx.workflow.failure() {
        content = content.push(build_error_banner(ctx.i18n, failure));
    }

    if let Some(result) = ctx.workflow.result() {
        content = content.push(results::view(ctx.i18n, result));
    }

    scrollable(
        Container::new(content)
            .width(Length::Fill)
            .align_x(alignment::Horizontal::Center),
    )
    .into()
}

fn build_header(i18n: &I18n) -> Element<'_, Message> {
    Column::new()
        .spacing(spacing::XS)
        .align_x(alignment::Horizontal::Center)
        .width(Length::Fill)
        .push(Text::new(i18n.tr("header-title")).size(typography::TITLE_LG))
        .push(
            Text::new(i18n.tr("header-subtitle"))
                .size(typography::BODY)
                .color(palette::GRAY_400),
        )
        .into()
}

/// Click target for the native picker. Also shows the hover state of the
/// window-level drop target.
fn build_upload_area<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let headline = if ctx.drag_over {
        ctx.i18n.tr("upload-hover")
    } else {
        ctx.workflow
            .state()
            .image()
            .map_or_else(|| ctx.i18n.tr("upload-prompt"), |image| image.name().to_string())
    };

    let formats = extensions::display_list();
    let subtext = ctx
        .i18n
        .tr_with_args("upload-formats", &[("formats", &formats)]);

    let content = Column::new()
        .spacing(spacing::XS)
        .align_x(alignment::Horizontal::Center)
        .push(Text::new("📁").size(sizing::ICON_XL))
        .push(Text::new(headline).size(typography::BODY_LG))
        .push(
            Text::new(subtext)
                .size(typography::CAPTION)
                .color(palette::GRAY_400),
        );

    let area = Container::new(content)
        .width(Length::Fill)
        .height(Length::Fixed(sizing::UPLOAD_AREA_HEIGHT))
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .style(styles::container::upload_area(ctx.drag_over));

    mouse_area(area)
        .on_press(Message::BrowseRequested)
        .interaction(mouse::Interaction::Pointer)
        .into()
}

fn build_preview_section<'a>(ctx: &ViewContext<'a>) -> Option<Element<'a, Message>> {
    let selected = ctx.workflow.state().image()?;
    let submitting = ctx.workflow.is_submitting();

    let preview: Element<'a, Message> = match ctx.previews.handle(selected.preview_id()) {
        Some(handle) => image(handle)
            .height(Length::Fixed(sizing::PREVIEW_HEIGHT))
            .into(),
        None => Space::new()
            .height(Length::Fixed(sizing::PREVIEW_HEIGHT))
            .into(),
    };

    let classify_label = if submitting {
        ctx.i18n.tr("classify-button-busy")
    } else {
        ctx.i18n.tr("classify-button")
    };
    let classify = button(Text::new(classify_label).size(typography::BODY))
        .height(Length::Fixed(sizing::BUTTON_HEIGHT))
        .padding([spacing::XS, spacing::LG])
        .style(styles::button::primary)
        .on_press_maybe(ctx.workflow.can_submit().then_some(Message::SubmitRequested));

    let clear = button(Text::new(ctx.i18n.tr("clear-button")).size(typography::BODY))
        .height(Length::Fixed(sizing::BUTTON_HEIGHT))
        .padding([spacing::XS, spacing::LG])
        .style(styles::button::secondary)
        .on_press(Message::ClearRequested);

    let actions = Row::new()
        .spacing(spacing::SM)
        .align_y(alignment::Vertical::Center)
        .push(classify)
        .push(clear);

    let section = Column::new()
        .spacing(spacing::MD)
        .align_x(alignment::Horizontal::Center)
        .width(Length::Fill)
        .push(Text::new(ctx.i18n.tr("preview-title")).size(typography::TITLE_SM))
        .push(preview)
        .push(actions);

    Some(
        Container::new(section)
            .width(Length::Fill)
            .padding(spacing::MD)
            .style(styles::container::panel)
            .into(),
    )
}

fn build_error_banner<'a>(i18n: &'a I18n, failure: &Failure) -> Element<'a, Message> {
    let row = Row::new()
        .spacing(spacing::SM)
        .align_y(alignment::Vertical::Center)
        .push(Text::new("⚠").size(sizing::ICON_SM))
        .push(Text::new(failure_message(i18n, failure)).size(typography::BODY));

    Container::new(row)
        .width(Length::Fill)
        .padding(spacing::SM)
        .style(styles::container::error_banner)
        .into()
}
