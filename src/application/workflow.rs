// SPDX-License-Identifier: MPL-2.0
//! The classification workflow state machine.
//!
//! [`Workflow`] owns the single [`WorkflowState`] the UI renders. Every user
//! action and every gateway resolution goes through [`Workflow::apply`], which
//! consumes the current state and installs the next one in one step.
//!
//! ```text
//!            acquire(valid)              submit
//!   Idle ──────────────────▶ Selected ──────────▶ Submitting
//!    ▲                          ▲                  │      │
//!    │ clear (from any)         │ acquire(valid)   │ ok   │ err
//!    │                          │                  ▼      ▼
//!    └──────────────────── Succeeded / Failed ◀────┴──────┘
//! ```
//!
//! Submissions are tagged with a [`SubmissionTicket`]. A resolution is only
//! applied while the workflow is still `Submitting` with the same ticket, so
//! a response arriving after `clear` or after a newer selection is dropped.

use crate::application::port::{ImageUpload, PreviewStore};
use crate::application::selection::{self, Candidate, SelectedImage};
use crate::domain::classification::ClassificationResult;
use crate::domain::error::{ClassifyError, Failure};
use std::fmt;
use std::sync::Arc;

/// Identifies one outstanding submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubmissionTicket(u64);

impl fmt::Display for SubmissionTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What the UI renders. Exactly one variant is active.
#[derive(Debug, Default)]
pub enum WorkflowState {
    #[default]
    Idle,
    Selected(SelectedImage),
    Submitting {
        image: SelectedImage,
        ticket: SubmissionTicket,
    },
    Succeeded {
        image: SelectedImage,
        result: ClassificationResult,
    },
    Failed {
        image: Option<SelectedImage>,
        failure: Failure,
    },
}

impl WorkflowState {
    /// Returns the image held by this state, if any.
    #[must_use]
    pub fn image(&self) -> Option<&SelectedImage> {
        match self {
            WorkflowState::Idle => None,
            WorkflowState::Selected(image)
            | WorkflowState::Submitting { image, .. }
            | WorkflowState::Succeeded { image, .. } => Some(image),
            WorkflowState::Failed { image, .. } => image.as_ref(),
        }
    }

    /// Short variant name, used for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            WorkflowState::Idle => "idle",
            WorkflowState::Selected(_) => "selected",
            WorkflowState::Submitting { .. } => "submitting",
            WorkflowState::Succeeded { .. } => "succeeded",
            WorkflowState::Failed { .. } => "failed",
        }
    }
}

/// Inputs to the state machine.
#[derive(Debug)]
pub enum Event {
    /// A file was dropped or picked.
    Acquire(Candidate),
    /// The user asked for classification of the held image.
    Submit,
    /// The gateway finished the submission identified by `ticket`.
    Resolved {
        ticket: SubmissionTicket,
        outcome: Result<ClassificationResult, ClassifyError>,
    },
    /// The user discarded the selection.
    Clear,
}

/// Side effect requested by a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Start the gateway call and report back with `Event::Resolved { ticket, .. }`.
    Dispatch {
        ticket: SubmissionTicket,
        upload: ImageUpload,
    },
    /// A candidate was rejected while a submission is in flight. The state is
    /// unchanged; the caller reports the failure out of band.
    Rejected(Failure),
    /// A resolution arrived for a submission that is no longer current.
    Stale(SubmissionTicket),
}

/// Owner of the [`WorkflowState`].
pub struct Workflow {
    state: WorkflowState,
    previews: Arc<dyn PreviewStore>,
    next_ticket: u64,
}

impl fmt::Debug for Workflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Workflow")
            .field("state", &self.state)
            .field("next_ticket", &self.next_ticket)
            .finish_non_exhaustive()
    }
}

impl Workflow {
    /// Creates an idle workflow allocating previews from `previews`.
    #[must_use]
    pub fn new(previews: Arc<dyn PreviewStore>) -> Self {
        Self {
            state: WorkflowState::Idle,
            previews,
            next_ticket: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        matches!(self.state, WorkflowState::Submitting { .. })
    }

    /// Whether a submit trigger would start a request right now.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.is_submitting() && self.state.image().is_some()
    }

    #[must_use]
    pub fn result(&self) -> Option<&ClassificationResult> {
        match &self.state {
            WorkflowState::Succeeded { result, .. } => Some(result),
            _ => None,
        }
    }

    #[must_use]
    pub fn failure(&self) -> Option<&Failure> {
        match &self.state {
            WorkflowState::Failed { failure, .. } => Some(failure),
            _ => None,
        }
    }

    /// Applies `event` and returns the side effect the caller must perform.
    pub fn apply(&mut self, event: Event) -> Effect {
        let current = std::mem::take(&mut self.state);
        let (next, effect) = self.transition(current, event);
        self.state = next;
        effect
    }

    fn transition(&mut self, state: WorkflowState, event: Event) -> (WorkflowState, Effect) {
        match event {
            Event::Acquire(candidate) => self.on_acquire(state, candidate),
            Event::Submit => self.on_submit(state),
            Event::Resolved { ticket, outcome } => Self::on_resolved(state, ticket, outcome),
            Event::Clear => {
                // Dropping `state` releases the held preview.
                drop(state);
                (WorkflowState::Idle, Effect::None)
            }
        }
    }

    fn on_acquire(&mut self, state: WorkflowState, candidate: Candidate) -> (WorkflowState, Effect) {
        match selection::acquire(&self.previews, candidate) {
            Ok(image) => {
                // The previous selection, its preview and any pending ticket
                // are dropped together with `state`.
                drop(state);
                (WorkflowState::Selected(image), Effect::None)
            }
            Err(err) => {
                let failure = Failure::from(err);
                match state {
                    WorkflowState::Submitting { .. } => (state, Effect::Rejected(failure)),
                    WorkflowState::Idle => (
                        WorkflowState::Failed {
                            image: None,
                            failure,
                        },
                        Effect::None,
                    ),
                    WorkflowState::Selected(image) | WorkflowState::Succeeded { image, .. } => (
                        WorkflowState::Failed {
                            image: Some(image),
                            failure,
                        },
                        Effect::None,
                    ),
                    WorkflowState::Failed { image, .. } => {
                        (WorkflowState::Failed { image, failure }, Effect::None)
                    }
                }
            }
        }
    }

    fn on_submit(&mut self, state: WorkflowState) -> (WorkflowState, Effect) {
        let image = match state {
            WorkflowState::Selected(image)
            | WorkflowState::Succeeded { image, .. }
            | WorkflowState::Failed {
                image: Some(image), ..
            } => image,
            other => return (other, Effect::None),
        };

        let ticket = SubmissionTicket(self.next_ticket);
        self.next_ticket += 1;
        let upload = image.upload();
        (
            WorkflowState::Submitting { image, ticket },
            Effect::Dispatch { ticket, upload },
        )
    }

    fn on_resolved(
        state: WorkflowState,
        ticket: SubmissionTicket,
        outcome: Result<ClassificationResult, ClassifyError>,
    ) -> (WorkflowState, Effect) {
        match state {
            WorkflowState::Submitting {
                image,
                ticket: current,
            } if current == ticket => match outcome {
                Ok(result) => (WorkflowState::Succeeded { image, result }, Effect::None),
                Err(err) => (
                    WorkflowState::Failed {
                        image: Some(image),
                        failure: Failure::from(err),
                    },
                    Effect::None,
                ),
            },
            other => (other, Effect::Stale(ticket)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::selection::tests::CountingStore;
    use crate::domain::classification::LabelScore;
    use crate::domain::error::SelectionError;

    fn workflow() -> (Arc<CountingStore>, Workflow) {
        let counting = Arc::new(CountingStore::default());
        let workflow = Workflow::new(counting.clone());
        (counting, workflow)
    }

    fn png(name: &str) -> Candidate {
        Candidate::new(name, Some("image/png"), vec![0x89u8, b'P', b'N', b'G'])
    }

    fn text() -> Candidate {
        Candidate::new("notes.txt", Some("text/plain"), vec![b'x'])
    }

    fn healthy() -> ClassificationResult {
        ClassificationResult::new(
            "Healthy",
            0.92,
            vec![
                LabelScore::new("Healthy", 0.92),
                LabelScore::new("Early Blight", 0.05),
                LabelScore::new("Late Blight", 0.03),
            ],
        )
    }

    fn dispatch_ticket(effect: Effect) -> SubmissionTicket {
        match effect {
            Effect::Dispatch { ticket, .. } => ticket,
            other => panic!("expected Dispatch, got {other:?}"),
        }
    }

    #[test]
    fn starts_idle() {
        let (_, workflow) = workflow();
        assert!(matches!(workflow.state(), WorkflowState::Idle));
        assert!(!workflow.can_submit());
    }

    #[test]
    fn valid_acquire_selects_image() {
        let (counting, mut workflow) = workflow();
        assert_eq!(workflow.apply(Event::Acquire(png("a.png"))), Effect::None);

        let WorkflowState::Selected(image) = workflow.state() else {
            panic!("expected Selected, got {:?}", workflow.state());
        };
        assert_eq!(image.name(), "a.png");
        assert_eq!(counting.allocations().len(), 1);
        assert!(workflow.can_submit());
    }

    #[test]
    fn invalid_acquire_in_idle_fails_without_image() {
        let (counting, mut workflow) = workflow();
        workflow.apply(Event::Acquire(text()));

        match workflow.state() {
            WorkflowState::Failed { image: None, failure } => {
                assert_eq!(failure.i18n_key(), "error-invalid-file-type");
            }
            other => panic!("expected Failed without image, got {other:?}"),
        }
        assert!(counting.allocations().is_empty());
        assert!(!workflow.can_submit());
    }

    #[test]
    fn invalid_acquire_keeps_current_selection() {
        let (counting, mut workflow) = workflow();
        workflow.apply(Event::Acquire(png("a.png")));
        let id = workflow.state().image().map(SelectedImage::preview_id);

        workflow.apply(Event::Acquire(text()));

        assert_eq!(workflow.state().image().map(SelectedImage::preview_id), id);
        assert!(matches!(
            workflow.failure(),
            Some(Failure::Selection(SelectionError::InvalidFileType { .. }))
        ));
        assert!(counting.releases().is_empty());
        assert!(workflow.can_submit());
    }

    #[test]
    fn invalid_acquire_replaces_result_with_error() {
        let (_, mut workflow) = workflow();
        workflow.apply(Event::Acquire(png("a.png")));
        let ticket = dispatch_ticket(workflow.apply(Event::Submit));
        workflow.apply(Event::Resolved {
            ticket,
            outcome: Ok(healthy()),
        });
        assert!(workflow.result().is_some());

        workflow.apply(Event::Acquire(text()));
        assert!(workflow.result().is_none());
        assert!(workflow.failure().is_some());
        assert_eq!(workflow.state().image().map(SelectedImage::name), Some("a.png"));
    }

    #[test]
    fn new_selection_releases_previous_preview_once() {
        let (counting, mut workflow) = workflow();
        workflow.apply(Event::Acquire(png("a.png")));
        workflow.apply(Event::Acquire(png("b.png")));
        workflow.apply(Event::Acquire(png("c.png")));

        let allocated = counting.allocations();
        assert_eq!(allocated.len(), 3);
        assert_eq!(counting.releases(), allocated[..2].to_vec());
        assert_eq!(workflow.state().image().map(SelectedImage::name), Some("c.png"));
    }

    #[test]
    fn new_selection_clears_error_and_result() {
        let (_, mut workflow) = workflow();
        workflow.apply(Event::Acquire(text()));
        assert!(workflow.failure().is_some());

        workflow.apply(Event::Acquire(png("a.png")));
        assert!(workflow.failure().is_none());
        assert!(matches!(workflow.state(), WorkflowState::Selected(_)));

        let ticket = dispatch_ticket(workflow.apply(Event::Submit));
        workflow.apply(Event::Resolved {
            ticket,
            outcome: Ok(healthy()),
        });
        workflow.apply(Event::Acquire(png("b.png")));
        assert!(workflow.result().is_none());
        assert!(matches!(workflow.state(), WorkflowState::Selected(_)));
    }

    #[test]
    fn submit_in_idle_is_noop() {
        let (_, mut workflow) = workflow();
        assert_eq!(workflow.apply(Event::Submit), Effect::None);
        assert!(matches!(workflow.state(), WorkflowState::Idle));
    }

    #[test]
    fn submit_without_image_after_failure_is_noop() {
        let (_, mut workflow) = workflow();
        workflow.apply(Event::Acquire(text()));
        assert_eq!(workflow.apply(Event::Submit), Effect::None);
        assert!(workflow.failure().is_some());
    }

    #[test]
    fn submit_dispatches_upload_of_selected_image() {
        let (_, mut workflow) = workflow();
        workflow.apply(Event::Acquire(png("leaf.png")));

        match workflow.apply(Event::Submit) {
            Effect::Dispatch { upload, .. } => {
                assert_eq!(upload.file_name, "leaf.png");
                assert_eq!(upload.content_type, "image/png");
                assert_eq!(upload.bytes.len(), 4);
            }
            other => panic!("expected Dispatch, got {other:?}"),
        }
        assert!(workflow.is_submitting());
        assert!(!workflow.can_submit());
    }

    #[test]
    fn second_submit_while_submitting_is_ignored() {
        let (_, mut workflow) = workflow();
        workflow.apply(Event::Acquire(png("a.png")));
        let first = dispatch_ticket(workflow.apply(Event::Submit));

        assert_eq!(workflow.apply(Event::Submit), Effect::None);
        match workflow.state() {
            WorkflowState::Submitting { ticket, .. } => assert_eq!(*ticket, first),
            other => panic!("expected Submitting, got {other:?}"),
        }
    }

    #[test]
    fn success_resolution_stores_result() {
        let (_, mut workflow) = workflow();
        workflow.apply(Event::Acquire(png("a.png")));
        let ticket = dispatch_ticket(workflow.apply(Event::Submit));

        assert_eq!(
            workflow.apply(Event::Resolved {
                ticket,
                outcome: Ok(healthy()),
            }),
            Effect::None
        );

        let result = workflow.result().expect("succeeded");
        assert_eq!(result.chosen_label(), "Healthy");
        assert_eq!(result.percent_label(), "92.0%");
        assert!(workflow.failure().is_none());
    }

    #[test]
    fn http_error_resolution_fails_without_result() {
        let (_, mut workflow) = workflow();
        workflow.apply(Event::Acquire(png("a.png")));
        let ticket = dispatch_ticket(workflow.apply(Event::Submit));

        workflow.apply(Event::Resolved {
            ticket,
            outcome: Err(ClassifyError::Http(500)),
        });

        assert!(workflow.result().is_none());
        let failure = workflow.failure().expect("failed");
        assert_eq!(failure.http_status(), Some(500));
        assert!(workflow.state().image().is_some());
        assert!(workflow.can_submit());
    }

    #[test]
    fn resubmit_after_failure_uses_new_ticket() {
        let (_, mut workflow) = workflow();
        workflow.apply(Event::Acquire(png("a.png")));
        let first = dispatch_ticket(workflow.apply(Event::Submit));
        workflow.apply(Event::Resolved {
            ticket: first,
            outcome: Err(ClassifyError::Network("refused".into())),
        });

        let second = dispatch_ticket(workflow.apply(Event::Submit));
        assert_ne!(first, second);
        assert!(workflow.failure().is_none());
    }

    #[test]
    fn clear_from_any_state_returns_idle_and_releases_once() {
        let (counting, mut workflow) = workflow();

        workflow.apply(Event::Clear);
        assert!(matches!(workflow.state(), WorkflowState::Idle));
        assert!(counting.releases().is_empty());

        workflow.apply(Event::Acquire(png("a.png")));
        workflow.apply(Event::Clear);
        assert_eq!(counting.releases().len(), 1);

        workflow.apply(Event::Acquire(png("b.png")));
        dispatch_ticket(workflow.apply(Event::Submit));
        workflow.apply(Event::Clear);
        assert_eq!(counting.releases().len(), 2);

        workflow.apply(Event::Acquire(text()));
        workflow.apply(Event::Clear);
        assert!(matches!(workflow.state(), WorkflowState::Idle));
        assert_eq!(counting.releases(), counting.allocations());
    }

    #[test]
    fn late_resolution_after_clear_is_discarded() {
        let (_, mut workflow) = workflow();
        workflow.apply(Event::Acquire(png("a.png")));
        let ticket = dispatch_ticket(workflow.apply(Event::Submit));
        workflow.apply(Event::Clear);

        assert_eq!(
            workflow.apply(Event::Resolved {
                ticket,
                outcome: Ok(healthy()),
            }),
            Effect::Stale(ticket)
        );
        assert!(matches!(workflow.state(), WorkflowState::Idle));
    }

    #[test]
    fn late_resolution_after_new_selection_is_discarded() {
        let (_, mut workflow) = workflow();
        workflow.apply(Event::Acquire(png("a.png")));
        let ticket = dispatch_ticket(workflow.apply(Event::Submit));
        workflow.apply(Event::Acquire(png("b.png")));

        workflow.apply(Event::Resolved {
            ticket,
            outcome: Ok(healthy()),
        });
        assert!(matches!(workflow.state(), WorkflowState::Selected(_)));
        assert_eq!(workflow.state().image().map(SelectedImage::name), Some("b.png"));
    }

    #[test]
    fn resolution_of_superseded_ticket_does_not_touch_newer_submission() {
        let (_, mut workflow) = workflow();
        workflow.apply(Event::Acquire(png("a.png")));
        let old = dispatch_ticket(workflow.apply(Event::Submit));
        workflow.apply(Event::Acquire(png("b.png")));
        let new = dispatch_ticket(workflow.apply(Event::Submit));

        assert_eq!(
            workflow.apply(Event::Resolved {
                ticket: old,
                outcome: Err(ClassifyError::Http(500)),
            }),
            Effect::Stale(old)
        );
        assert!(workflow.is_submitting());

        workflow.apply(Event::Resolved {
            ticket: new,
            outcome: Ok(healthy()),
        });
        assert!(workflow.result().is_some());
    }

    #[test]
    fn invalid_acquire_while_submitting_is_rejected_out_of_band() {
        let (_, mut workflow) = workflow();
        workflow.apply(Event::Acquire(png("a.png")));
        let ticket = dispatch_ticket(workflow.apply(Event::Submit));

        match workflow.apply(Event::Acquire(text())) {
            Effect::Rejected(failure) => {
                assert_eq!(failure.i18n_key(), "error-invalid-file-type");
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
        match workflow.state() {
            WorkflowState::Submitting { ticket: current, .. } => assert_eq!(*current, ticket),
            other => panic!("expected Submitting, got {other:?}"),
        }
    }

    #[test]
    fn dropping_workflow_releases_held_preview() {
        let (counting, mut workflow) = workflow();
        workflow.apply(Event::Acquire(png("a.png")));
        drop(workflow);
        assert_eq!(counting.releases(), counting.allocations());
    }
}
