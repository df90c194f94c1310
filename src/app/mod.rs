// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration.
//!
//! The `App` struct wires the workflow to its collaborators (the classifier
//! gateway, the preview store, localization and toasts) and translates
//! messages into workflow events and Iced tasks. Startup policy (endpoint
//! resolution, fallbacks when the settings or the HTTP client are unusable)
//! lives here so it is easy to audit user-facing behavior.

mod message;
pub mod paths;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};

use crate::application::port::{Classifier, PreviewStore};
use crate::application::workflow::Workflow;
use crate::config::{self, defaults::DEFAULT_ENDPOINT_URL};
use crate::i18n::fluent::I18n;
use crate::infrastructure::{Endpoint, HandlePreviewStore, HttpClassifier, Unavailable};
use crate::ui::notifications::{self, Notification};
use crate::ui::theming::ThemeMode;
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Root Iced application state.
pub struct App {
    pub i18n: I18n,
    workflow: Workflow,
    previews: Arc<HandlePreviewStore>,
    classifier: Arc<dyn Classifier>,
    theme_mode: ThemeMode,
    /// Whether files are hovering over the window.
    drag_over: bool,
    /// Ticket of the most recent file read.
    read_ticket: update::ReadTicket,
    /// The current drag gesture already delivered its file.
    drop_consumed: bool,
    /// Toast notification manager for user feedback.
    notifications: notifications::Manager,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("state", &self.workflow.state().name())
            .field("drag_over", &self.drag_over)
            .finish()
    }
}

pub const WINDOW_DEFAULT_HEIGHT: u32 = 820;
pub const WINDOW_DEFAULT_WIDTH: u32 = 760;
pub const MIN_WINDOW_HEIGHT: u32 = 520;
pub const MIN_WINDOW_WIDTH: u32 = 480;

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Runs the application until the window closes.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // Wrap flags in RefCell<Option<_>> to satisfy Fn trait requirement
    // while only consuming flags once (iced 0.14 requires Fn, not FnOnce)
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once");
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

/// Builds the gateway for `base_url`.
///
/// An unparseable URL falls back to the built-in default; a client that
/// cannot be built yields a gateway whose every call fails. Both cases push
/// a toast so the user knows why classification misbehaves.
fn build_classifier(
    base_url: &str,
    timeout: Option<Duration>,
    notifications: &mut notifications::Manager,
) -> Arc<dyn Classifier> {
    let endpoint = Endpoint::from_base(base_url).or_else(|err| {
        tracing::warn!(error = %err, fallback = DEFAULT_ENDPOINT_URL, "invalid endpoint");
        notifications.push(
            Notification::warning("notification-endpoint-invalid")
                .with_arg("url", DEFAULT_ENDPOINT_URL),
        );
        Endpoint::from_base(DEFAULT_ENDPOINT_URL)
    });

    match endpoint.and_then(|endpoint| HttpClassifier::new(endpoint, timeout)) {
        Ok(classifier) => {
            tracing::info!(endpoint = %classifier.endpoint(), ?timeout, "classifier ready");
            Arc::new(classifier)
        }
        Err(err) => {
            tracing::error!(error = %err, "classifier unavailable");
            notifications.push(Notification::error("notification-client-error"));
            Arc::new(Unavailable::new(err.to_string()))
        }
    }
}

impl App {
    /// Creates an idle application around an existing gateway.
    pub fn with_classifier(
        i18n: I18n,
        classifier: Arc<dyn Classifier>,
        theme_mode: ThemeMode,
    ) -> Self {
        let previews = Arc::new(HandlePreviewStore::new());
        let store: Arc<dyn PreviewStore> = previews.clone();

        Self {
            i18n,
            workflow: Workflow::new(store),
            previews,
            classifier,
            theme_mode,
            drag_over: false,
            read_ticket: update::ReadTicket::default(),
            drop_consumed: false,
            notifications: notifications::Manager::new(),
        }
    }

    /// Initializes application state and optionally kicks off asynchronous
    /// reading of the file passed on the command line.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        // Initialize directory overrides from CLI flags (must be done before any path resolution)
        paths::init_cli_overrides(flags.config_dir);

        let (config, config_warning) = config::load();
        let i18n = I18n::new(flags.lang, &config);

        let mut notifications = notifications::Manager::new();
        if let Some(key) = config_warning {
            notifications.push(Notification::warning(key));
        }

        let env_endpoint = config::endpoint_from_env();
        let base_url =
            config::resolve_base_url(flags.endpoint.as_deref(), env_endpoint.as_deref(), &config);
        let classifier = build_classifier(
            &base_url,
            config.endpoint.request_timeout(),
            &mut notifications,
        );

        let mut app = Self::with_classifier(i18n, classifier, config.general.theme_mode);
        app.notifications = notifications;

        let task = match flags.file_path {
            Some(path) => update::read_file(&mut app.read_ticket, PathBuf::from(path)),
            None => Task::none(),
        };

        (app, task)
    }

    fn title(&self) -> String {
        let app_name = self.i18n.tr("window-title");
        match self.workflow.state().image() {
            Some(image) => format!("{} - {}", image.name(), app_name),
            None => app_name,
        }
    }

    fn theme(&self) -> Theme {
        self.theme_mode.theme()
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            subscription::create_event_subscription(),
            subscription::create_tick_subscription(self.notifications.has_notifications()),
        ])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let mut ctx = update::UpdateContext {
            i18n: &self.i18n,
            workflow: &mut self.workflow,
            classifier: &self.classifier,
            notifications: &mut self.notifications,
            drag_over: &mut self.drag_over,
            read_ticket: &mut self.read_ticket,
            drop_consumed: &mut self.drop_consumed,
        };

        match message {
            Message::Classifier(message) => update::handle_classifier_message(&mut ctx, message),
            Message::Notification(notification_message) => {
                self.notifications.handle_message(&notification_message);
                Task::none()
            }
            Message::OpenFileDialogResult(path) => {
                update::handle_open_file_dialog_result(&mut ctx, path)
            }
            Message::FileHovered => {
                self.drag_over = true;
                self.drop_consumed = false;
                Task::none()
            }
            Message::FilesHoveredLeft => {
                self.drag_over = false;
                Task::none()
            }
            Message::FileDropped(path) => update::handle_file_dropped(&mut ctx, path),
            Message::CandidateRead {
                ticket,
                name,
                result,
            } => update::handle_candidate_read(&mut ctx, ticket, name, result),
            Message::ClassificationCompleted { ticket, result } => {
                update::handle_classification_completed(&mut ctx, ticket, result)
            }
            Message::Tick(now) => {
                self.notifications.tick(now);
                Task::none()
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            workflow: &self.workflow,
            previews: &self.previews,
            notifications: &self.notifications,
            drag_over: self.drag_over,
        })
    }
}
