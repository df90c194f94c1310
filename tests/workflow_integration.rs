// SPDX-License-Identifier: MPL-2.0
//! Drives the workflow end to end with a scripted gateway and a counting
//! preview store, awaiting every dispatched request like the app shell does.

use futures_util::FutureExt;
use leaf_lens::application::port::{Classifier, ClassifyFuture, ImageUpload, PreviewId, PreviewStore};
use leaf_lens::application::selection::Candidate;
use leaf_lens::application::workflow::{Effect, Event, Workflow, WorkflowState};
use leaf_lens::domain::classification::{ClassificationResult, LabelScore};
use leaf_lens::domain::error::{ClassifyError, Failure, SelectionError};
use leaf_lens::domain::presentation::{attributes_for, DEFAULT_STYLE};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct CountingStore {
    allocated: AtomicUsize,
    released: AtomicUsize,
}

impl CountingStore {
    fn live(&self) -> usize {
        self.allocated.load(Ordering::SeqCst) - self.released.load(Ordering::SeqCst)
    }
}

impl PreviewStore for CountingStore {
    fn allocate(&self, _bytes: Arc<[u8]>) -> PreviewId {
        self.allocated.fetch_add(1, Ordering::SeqCst);
        PreviewId::new()
    }

    fn release(&self, _id: PreviewId) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}

/// Answers each call with the next scripted outcome.
#[derive(Default)]
struct ScriptedGateway {
    outcomes: Mutex<VecDeque<Result<ClassificationResult, ClassifyError>>>,
    uploads: Mutex<Vec<String>>,
}

impl ScriptedGateway {
    fn answering(outcomes: Vec<Result<ClassificationResult, ClassifyError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            uploads: Mutex::default(),
        }
    }

    fn calls(&self) -> usize {
        self.uploads.lock().expect("lock").len()
    }
}

impl Classifier for ScriptedGateway {
    fn classify(&self, upload: ImageUpload) -> ClassifyFuture {
        self.uploads.lock().expect("lock").push(upload.file_name);
        let outcome = self
            .outcomes
            .lock()
            .expect("lock")
            .pop_front()
            .unwrap_or_else(|| Err(ClassifyError::Network("no scripted answer".to_string())));
        async move { outcome }.boxed()
    }
}

fn sample_result() -> ClassificationResult {
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

fn jpeg(name: &str) -> Candidate {
    Candidate::new(name, Some("image/jpeg"), vec![0xFFu8, 0xD8, 0xFF, 0xE0])
}

fn setup(
    outcomes: Vec<Result<ClassificationResult, ClassifyError>>,
) -> (Arc<CountingStore>, ScriptedGateway, Workflow) {
    let store = Arc::new(CountingStore::default());
    let workflow = Workflow::new(store.clone());
    (store, ScriptedGateway::answering(outcomes), workflow)
}

/// Submits and, if a request was dispatched, resolves it through `gateway`.
async fn submit(workflow: &mut Workflow, gateway: &ScriptedGateway) -> Effect {
    match workflow.apply(Event::Submit) {
        Effect::Dispatch { ticket, upload } => {
            let outcome = gateway.classify(upload).await;
            workflow.apply(Event::Resolved { ticket, outcome })
        }
        other => other,
    }
}

#[tokio::test]
async fn successful_classification_renders_sample_response() {
    let (store, gateway, mut workflow) = setup(vec![Ok(sample_result())]);

    workflow.apply(Event::Acquire(jpeg("leaf.jpg")));
    submit(&mut workflow, &gateway).await;

    let result = workflow.result().expect("succeeded");
    assert_eq!(result.chosen_label(), "Healthy");
    assert_eq!(result.percent_label(), "92.0%");
    let percents: Vec<String> = result.breakdown().iter().map(LabelScore::percent_label).collect();
    assert_eq!(percents, vec!["92.0%", "5.0%", "3.0%"]);
    assert_eq!(store.live(), 1);
    assert_eq!(gateway.calls(), 1);
}

#[tokio::test]
async fn server_error_fails_without_result() {
    let (_store, gateway, mut workflow) = setup(vec![Err(ClassifyError::Http(500))]);

    workflow.apply(Event::Acquire(jpeg("leaf.jpg")));
    submit(&mut workflow, &gateway).await;

    assert!(workflow.result().is_none());
    assert_eq!(workflow.failure(), Some(&Failure::Classify(ClassifyError::Http(500))));
    assert!(workflow.state().image().is_some(), "image kept for resubmission");
}

#[tokio::test]
async fn resubmitting_after_failure_recovers() {
    let (_store, gateway, mut workflow) = setup(vec![
        Err(ClassifyError::Network("refused".to_string())),
        Ok(sample_result()),
    ]);

    workflow.apply(Event::Acquire(jpeg("leaf.jpg")));
    submit(&mut workflow, &gateway).await;
    assert!(workflow.failure().is_some());

    submit(&mut workflow, &gateway).await;
    assert!(workflow.failure().is_none());
    assert_eq!(workflow.result().map(ClassificationResult::chosen_label), Some("Healthy"));
    assert_eq!(gateway.calls(), 2);
}

#[tokio::test]
async fn submit_in_idle_never_reaches_gateway() {
    let (_store, gateway, mut workflow) = setup(vec![Ok(sample_result())]);

    assert_eq!(submit(&mut workflow, &gateway).await, Effect::None);
    assert!(matches!(workflow.state(), WorkflowState::Idle));
    assert_eq!(gateway.calls(), 0);
}

#[test]
fn second_submit_while_in_flight_is_ignored() {
    let (_store, _gateway, mut workflow) = setup(vec![]);

    workflow.apply(Event::Acquire(jpeg("leaf.jpg")));
    assert!(matches!(workflow.apply(Event::Submit), Effect::Dispatch { .. }));
    assert_eq!(workflow.apply(Event::Submit), Effect::None);
    assert!(workflow.is_submitting());
}

#[tokio::test]
async fn late_response_after_new_selection_is_discarded() {
    let (store, gateway, mut workflow) = setup(vec![Ok(sample_result())]);

    workflow.apply(Event::Acquire(jpeg("first.jpg")));
    let Effect::Dispatch { ticket, upload } = workflow.apply(Event::Submit) else {
        panic!("expected dispatch");
    };
    workflow.apply(Event::Acquire(jpeg("second.jpg")));

    let outcome = gateway.classify(upload).await;
    assert_eq!(workflow.apply(Event::Resolved { ticket, outcome }), Effect::Stale(ticket));

    assert!(matches!(workflow.state(), WorkflowState::Selected(image) if image.name() == "second.jpg"));
    assert_eq!(store.live(), 1);
}

#[test]
fn invalid_file_keeps_current_image_and_reports_error() {
    let (store, _gateway, mut workflow) = setup(vec![]);

    workflow.apply(Event::Acquire(jpeg("leaf.jpg")));
    workflow.apply(Event::Acquire(Candidate::new("notes.txt", Some("text/plain"), vec![b'x'])));

    assert_eq!(workflow.state().image().map(|image| image.name()), Some("leaf.jpg"));
    assert!(matches!(
        workflow.failure(),
        Some(Failure::Selection(SelectionError::InvalidFileType { .. }))
    ));
    assert_eq!(store.live(), 1);
}

#[test]
fn replacing_and_clearing_release_every_preview_once() {
    let (store, _gateway, mut workflow) = setup(vec![]);

    for name in ["a.jpg", "b.jpg", "c.jpg"] {
        workflow.apply(Event::Acquire(jpeg(name)));
    }
    assert_eq!(store.allocated.load(Ordering::SeqCst), 3);
    assert_eq!(store.released.load(Ordering::SeqCst), 2);

    workflow.apply(Event::Clear);
    workflow.apply(Event::Clear);
    assert!(matches!(workflow.state(), WorkflowState::Idle));
    assert_eq!(store.released.load(Ordering::SeqCst), 3);
}

#[test]
fn unknown_label_maps_to_default_style() {
    assert_eq!(attributes_for("Unknown Disease"), DEFAULT_STYLE);
    assert_eq!(attributes_for("Healthy").icon, "🌿");
}
