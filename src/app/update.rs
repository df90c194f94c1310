// SPDX-License-Identifier: MPL-2.0
//! Update logic for the application.
//!
//! Every handler feeds the workflow one [`Event`] and turns the returned
//! [`Effect`] into an Iced [`Task`]. Problems that do not belong to the
//! workflow (unreadable files, drops rejected mid-analysis) become toasts.
//!
//! File reads run off the UI thread and are tagged with a [`ReadTicket`].
//! Only the read started last reaches the workflow; clearing the selection
//! invalidates any read still in flight.

use super::Message;
use crate::application::port::Classifier;
use crate::application::selection::Candidate;
use crate::application::workflow::{Effect, Event, SubmissionTicket, Workflow};
use crate::domain::classification::ClassificationResult;
use crate::domain::error::{ClassifyError, Failure};
use crate::error::Error;
use crate::i18n::fluent::I18n;
use crate::media;
use crate::ui::classifier;
use crate::ui::notifications::{self, Notification};
use iced::Task;
use std::path::PathBuf;
use std::sync::Arc;

/// Identifies one file read. A completed read is applied only if its ticket
/// is still the current one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadTicket(u64);

impl ReadTicket {
    /// Invalidates every read started so far and returns the new ticket.
    pub fn advance(&mut self) -> Self {
        self.0 = self.0.wrapping_add(1);
        *self
    }
}

/// Mutable application state needed by the update handlers.
pub struct UpdateContext<'a> {
    pub i18n: &'a I18n,
    pub workflow: &'a mut Workflow,
    pub classifier: &'a Arc<dyn Classifier>,
    pub notifications: &'a mut notifications::Manager,
    pub drag_over: &'a mut bool,
    pub read_ticket: &'a mut ReadTicket,
    /// The current drag gesture already delivered its file.
    pub drop_consumed: &'a mut bool,
}

/// Handles messages emitted by the classifier screen.
pub fn handle_classifier_message(
    ctx: &mut UpdateContext<'_>,
    message: classifier::Message,
) -> Task<Message> {
    match message {
        classifier::Message::BrowseRequested => {
            handle_open_file_dialog(ctx.i18n.tr("upload-dialog-filter"))
        }
        classifier::Message::SubmitRequested => apply(ctx, Event::Submit),
        classifier::Message::ClearRequested => {
            ctx.read_ticket.advance();
            apply(ctx, Event::Clear)
        }
    }
}

/// Opens the native picker restricted to supported image extensions.
pub fn handle_open_file_dialog(filter_label: String) -> Task<Message> {
    Task::perform(
        async move {
            rfd::AsyncFileDialog::new()
                .add_filter(filter_label, media::extensions::IMAGE_EXTENSIONS)
                .pick_file()
                .await
                .map(|h| h.path().to_path_buf())
        },
        Message::OpenFileDialogResult,
    )
}

/// Handles the result of the open file dialog.
pub fn handle_open_file_dialog_result(
    ctx: &mut UpdateContext<'_>,
    path: Option<PathBuf>,
) -> Task<Message> {
    let Some(path) = path else {
        // User cancelled the dialog
        return Task::none();
    };
    read_file(ctx.read_ticket, path)
}

/// Handles a file dropped on the window.
///
/// A multi-file drop arrives as one event per file; only the first one of
/// the gesture is read.
pub fn handle_file_dropped(ctx: &mut UpdateContext<'_>, path: PathBuf) -> Task<Message> {
    *ctx.drag_over = false;
    if *ctx.drop_consumed {
        tracing::debug!(path = %path.display(), "ignoring extra dropped file");
        return Task::none();
    }
    *ctx.drop_consumed = true;
    read_file(ctx.read_ticket, path)
}

/// Reads `path` off the UI thread and reports back with
/// [`Message::CandidateRead`] under a fresh ticket.
pub fn read_file(read_ticket: &mut ReadTicket, path: PathBuf) -> Task<Message> {
    let ticket = read_ticket.advance();
    let name = media::file_name(&path);
    Task::perform(
        async move { media::read_candidate(&path).await },
        move |result| Message::CandidateRead {
            ticket,
            name,
            result,
        },
    )
}

/// Feeds a freshly read file to the workflow.
pub fn handle_candidate_read(
    ctx: &mut UpdateContext<'_>,
    ticket: ReadTicket,
    name: String,
    result: Result<Candidate, Error>,
) -> Task<Message> {
    if ticket != *ctx.read_ticket {
        tracing::debug!(file = %name, ?ticket, "discarding superseded read");
        return Task::none();
    }

    match result {
        Ok(candidate) => apply(ctx, Event::Acquire(candidate)),
        Err(err) => {
            tracing::warn!(file = %name, error = %err, "could not read file");
            ctx.notifications
                .push(Notification::error("notification-read-error").with_arg("name", name));
            Task::none()
        }
    }
}

/// Feeds a gateway resolution to the workflow.
pub fn handle_classification_completed(
    ctx: &mut UpdateContext<'_>,
    ticket: SubmissionTicket,
    result: Result<ClassificationResult, ClassifyError>,
) -> Task<Message> {
    apply(
        ctx,
        Event::Resolved {
            ticket,
            outcome: result,
        },
    )
}

fn apply(ctx: &mut UpdateContext<'_>, event: Event) -> Task<Message> {
    let effect = ctx.workflow.apply(event);
    tracing::debug!(state = ctx.workflow.state().name(), "workflow transition");
    handle_effect(ctx, effect)
}

fn handle_effect(ctx: &mut UpdateContext<'_>, effect: Effect) -> Task<Message> {
    match effect {
        Effect::None => Task::none(),
        Effect::Dispatch { ticket, upload } => {
            tracing::info!(%ticket, file = %upload.file_name, "classification submitted");
            Task::perform(ctx.classifier.classify(upload), move |result| {
                Message::ClassificationCompleted { ticket, result }
            })
        }
        Effect::Rejected(failure) => {
            ctx.notifications.push(failure_notification(&failure));
            Task::none()
        }
        Effect::Stale(ticket) => {
            tracing::debug!(%ticket, "discarding stale classification");
            Task::none()
        }
    }
}

fn failure_notification(failure: &Failure) -> Notification {
    let notification = Notification::warning(failure.i18n_key());
    match failure.http_status() {
        Some(status) => notification.with_arg("status", status.to_string()),
        None => notification,
    }
}
