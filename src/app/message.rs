// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use super::update::ReadTicket;
use crate::application::selection::Candidate;
use crate::application::workflow::SubmissionTicket;
use crate::domain::classification::ClassificationResult;
use crate::domain::error::ClassifyError;
use crate::error::Error;
use crate::ui::classifier;
use crate::ui::notifications;
use std::path::PathBuf;
use std::time::Instant;

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Classifier(classifier::Message),
    Notification(notifications::NotificationMessage),
    /// Result from the open file dialog.
    OpenFileDialogResult(Option<PathBuf>),
    /// Files started hovering over the window.
    FileHovered,
    /// Hovering files left the window without being dropped.
    FilesHoveredLeft,
    /// A file was dropped on the window.
    FileDropped(PathBuf),
    /// A picked, dropped or preselected file finished reading.
    CandidateRead {
        ticket: ReadTicket,
        name: String,
        result: Result<Candidate, Error>,
    },
    /// The gateway resolved the submission identified by `ticket`.
    ClassificationCompleted {
        ticket: SubmissionTicket,
        result: Result<ClassificationResult, ClassifyError>,
    },
    Tick(Instant), // Periodic tick for notification auto-dismiss
}

/// Runtime flags passed in from the CLI or launcher to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Optional classifier base URL.
    /// Takes precedence over `LEAF_LENS_ENDPOINT` and the settings file.
    pub endpoint: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `LEAF_LENS_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
    /// Optional image path to preselect on startup.
    pub file_path: Option<String>,
}
