// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! Stacks the toast overlay on top of the classifier screen.

use super::Message;
use crate::application::workflow::Workflow;
use crate::i18n::fluent::I18n;
use crate::infrastructure::HandlePreviewStore;
use crate::ui::classifier;
use crate::ui::notifications::{self, Toast};
use iced::widget::{Container, Stack};
use iced::{Element, Length};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub workflow: &'a Workflow,
    pub previews: &'a HandlePreviewStore,
    pub notifications: &'a notifications::Manager,
    pub drag_over: bool,
}

/// Renders the classifier screen with any visible toasts.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let screen = classifier::view(classifier::ViewContext {
        i18n: ctx.i18n,
        workflow: ctx.workflow,
        previews: ctx.previews,
        drag_over: ctx.drag_over,
    })
    .map(Message::Classifier);

    let toasts = Toast::view_overlay(ctx.notifications, ctx.i18n).map(Message::Notification);

    Stack::new()
        .push(
            Container::new(screen)
                .width(Length::Fill)
                .height(Length::Fill),
        )
        .push(toasts)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
