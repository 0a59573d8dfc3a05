use std::sync::mpsc::{Receiver, TryRecvError};

use crate::api::{AnalysisReport, ApiError, RemoteDocument, UploadedDocument};

/// Fixed user-facing message for a failed upload.
pub const UPLOAD_ERROR_MESSAGE: &str = "Failed to upload file. Please try again.";

/// Fixed user-facing message for a failed analysis.
pub const ANALYZE_ERROR_MESSAGE: &str = "Failed to analyze document. Please try again.";

/// The phases of the upload-then-analyze flow.
///
/// One submission moves Idle → Uploading → Analyzing → Done, dropping into
/// Failed from either network stage. Uploading and Analyzing are the busy
/// phases; while one is active no new submission is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisPhase {
    Idle,
    Uploading,
    Analyzing,
    Done,
    Failed,
}

impl Default for AnalysisPhase {
    fn default() -> Self {
        Self::Idle
    }
}

/// Events sent from the background flow worker to the UI thread.
#[derive(Debug)]
pub enum FlowEvent {
    UploadFinished(Result<UploadedDocument, ApiError>),
    AnalysisFinished(Result<AnalysisReport, ApiError>),
}

#[derive(Default)]
pub struct SessionState {
    pub phase: AnalysisPhase,
    pub dragging: bool,
    /// Grow-only list of documents uploaded this session.
    pub documents: Vec<UploadedDocument>,
    /// The current analysis, replaced wholesale on each completed run.
    pub report: Option<AnalysisReport>,
    pub error_message: Option<String>,
    pub remote_documents: Option<Vec<RemoteDocument>>,
    pub remote_error: Option<String>,
    pub flow_receiver: Option<Receiver<FlowEvent>>,
    pub remote_receiver: Option<Receiver<Result<Vec<RemoteDocument>, ApiError>>>,
}

impl SessionState {
    pub fn is_busy(&self) -> bool {
        matches!(
            self.phase,
            AnalysisPhase::Uploading | AnalysisPhase::Analyzing
        )
    }

    /// Start a new submission. The previous report and error are cleared
    /// before the upload request is sent.
    pub fn begin_submission(&mut self) {
        self.phase = AnalysisPhase::Uploading;
        self.error_message = None;
        self.report = None;
    }

    /// Drain pending worker events. Returns true if anything changed.
    ///
    /// A disconnected channel while still busy means the worker died
    /// without reporting; that is surfaced as a failure of the current
    /// stage so the busy phase always terminates.
    pub fn drain_events(&mut self) -> bool {
        let receiver = match self.flow_receiver.take() {
            Some(receiver) => receiver,
            None => return false,
        };

        let mut changed = false;
        loop {
            match receiver.try_recv() {
                Ok(event) => {
                    self.apply_event(event);
                    changed = true;
                }
                Err(TryRecvError::Empty) => {
                    self.flow_receiver = Some(receiver);
                    break;
                }
                Err(TryRecvError::Disconnected) => {
                    if self.is_busy() {
                        eprintln!("Flow worker exited unexpectedly");
                        let message = match self.phase {
                            AnalysisPhase::Uploading => UPLOAD_ERROR_MESSAGE,
                            _ => ANALYZE_ERROR_MESSAGE,
                        };
                        self.error_message = Some(message.to_string());
                        self.phase = AnalysisPhase::Failed;
                        changed = true;
                    }
                    break;
                }
            }
        }
        changed
    }

    /// The single place flow events mutate session state.
    fn apply_event(&mut self, event: FlowEvent) {
        match event {
            FlowEvent::UploadFinished(Ok(document)) => {
                println!("Uploaded '{}' as {}", document.filename, document.file_id);
                self.documents.push(document);
                self.error_message = None;
                self.phase = AnalysisPhase::Analyzing;
            }
            FlowEvent::UploadFinished(Err(e)) => {
                eprintln!("Upload failed: {}", e);
                self.error_message = Some(UPLOAD_ERROR_MESSAGE.to_string());
                self.phase = AnalysisPhase::Failed;
            }
            FlowEvent::AnalysisFinished(Ok(report)) => {
                println!("Analysis complete ({}% confidence)", report.confidence_score);
                self.report = Some(report);
                self.phase = AnalysisPhase::Done;
            }
            FlowEvent::AnalysisFinished(Err(e)) => {
                // The report slot is left as it was.
                eprintln!("Analysis failed: {}", e);
                self.error_message = Some(ANALYZE_ERROR_MESSAGE.to_string());
                self.phase = AnalysisPhase::Failed;
            }
        }
    }

    /// Short label for the busy indicator.
    pub fn phase_label(&self) -> &'static str {
        match self.phase {
            AnalysisPhase::Idle => "",
            AnalysisPhase::Uploading => "Uploading...",
            AnalysisPhase::Analyzing => "Analyzing...",
            AnalysisPhase::Done => "Analysis complete",
            AnalysisPhase::Failed => "Something went wrong",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    fn uploaded_doc() -> UploadedDocument {
        UploadedDocument {
            file_id: "abc123".to_string(),
            filename: "report.pdf".to_string(),
            file_size: 2048,
            upload_time: None,
        }
    }

    fn report() -> AnalysisReport {
        AnalysisReport {
            summary: "A short opinion.".to_string(),
            key_points: vec!["a".to_string(), "b".to_string()],
            recommendations: vec![],
            risks: vec![],
            next_steps: vec![],
            confidence_score: 80.0,
        }
    }

    #[test]
    fn submission_enters_uploading_and_clears_stale_output() {
        let mut state = SessionState::default();
        state.report = Some(report());
        state.error_message = Some("old error".to_string());

        state.begin_submission();

        assert_eq!(state.phase, AnalysisPhase::Uploading);
        assert!(state.is_busy());
        assert!(state.report.is_none());
        assert!(state.error_message.is_none());
    }

    #[test]
    fn successful_upload_grows_list_and_enters_analyzing() {
        let mut state = SessionState::default();
        state.begin_submission();

        state.apply_event(FlowEvent::UploadFinished(Ok(uploaded_doc())));

        assert_eq!(state.phase, AnalysisPhase::Analyzing);
        assert_eq!(state.documents.len(), 1);
        assert_eq!(state.documents[0].filename, "report.pdf");
    }

    #[test]
    fn failed_upload_sets_fixed_message_and_leaves_busy_state() {
        let mut state = SessionState::default();
        state.begin_submission();

        state.apply_event(FlowEvent::UploadFinished(Err(ApiError::Status(500))));

        assert_eq!(state.phase, AnalysisPhase::Failed);
        assert!(!state.is_busy());
        assert_eq!(state.error_message.as_deref(), Some(UPLOAD_ERROR_MESSAGE));
        assert!(state.documents.is_empty());
    }

    #[test]
    fn failed_analysis_keeps_document_and_leaves_report_untouched() {
        let mut state = SessionState::default();
        state.begin_submission();
        state.apply_event(FlowEvent::UploadFinished(Ok(uploaded_doc())));

        state.apply_event(FlowEvent::AnalysisFinished(Err(ApiError::Status(500))));

        assert_eq!(state.phase, AnalysisPhase::Failed);
        assert!(!state.is_busy());
        assert_eq!(state.error_message.as_deref(), Some(ANALYZE_ERROR_MESSAGE));
        assert!(state.report.is_none());
        assert_eq!(state.documents.len(), 1);
    }

    #[test]
    fn successful_analysis_stores_report() {
        let mut state = SessionState::default();
        state.begin_submission();
        state.apply_event(FlowEvent::UploadFinished(Ok(uploaded_doc())));

        state.apply_event(FlowEvent::AnalysisFinished(Ok(report())));

        assert_eq!(state.phase, AnalysisPhase::Done);
        assert_eq!(state.report.as_ref().unwrap().confidence_score, 80.0);
    }

    #[test]
    fn document_list_never_shrinks_across_runs() {
        let mut state = SessionState::default();
        state.begin_submission();
        state.apply_event(FlowEvent::UploadFinished(Ok(uploaded_doc())));
        state.apply_event(FlowEvent::AnalysisFinished(Ok(report())));

        state.begin_submission();
        assert_eq!(state.documents.len(), 1);

        state.apply_event(FlowEvent::UploadFinished(Err(ApiError::Status(400))));
        assert_eq!(state.documents.len(), 1);

        state.begin_submission();
        state.apply_event(FlowEvent::UploadFinished(Ok(uploaded_doc())));
        assert_eq!(state.documents.len(), 2);
    }

    #[test]
    fn new_submission_replaces_previous_report_and_error() {
        let mut state = SessionState::default();
        state.begin_submission();
        state.apply_event(FlowEvent::UploadFinished(Ok(uploaded_doc())));
        state.apply_event(FlowEvent::AnalysisFinished(Ok(report())));
        assert!(state.report.is_some());

        state.begin_submission();
        assert!(state.report.is_none());
        assert!(state.error_message.is_none());
        assert_eq!(state.phase, AnalysisPhase::Uploading);
    }

    #[test]
    fn drain_applies_buffered_events_in_order() {
        let mut state = SessionState::default();
        state.begin_submission();
        let (sender, receiver) = mpsc::channel();
        state.flow_receiver = Some(receiver);

        sender
            .send(FlowEvent::UploadFinished(Ok(uploaded_doc())))
            .unwrap();
        sender
            .send(FlowEvent::AnalysisFinished(Ok(report())))
            .unwrap();
        drop(sender);

        assert!(state.drain_events());
        assert_eq!(state.phase, AnalysisPhase::Done);
        assert_eq!(state.documents.len(), 1);
        assert!(state.report.is_some());
        // Finished channel is dropped.
        assert!(state.flow_receiver.is_none());
    }

    #[test]
    fn drain_without_receiver_is_a_noop() {
        let mut state = SessionState::default();
        assert!(!state.drain_events());
    }

    #[test]
    fn dead_worker_fails_the_current_stage() {
        let mut state = SessionState::default();
        state.begin_submission();
        let (sender, receiver) = mpsc::channel::<FlowEvent>();
        state.flow_receiver = Some(receiver);
        drop(sender);

        assert!(state.drain_events());
        assert_eq!(state.phase, AnalysisPhase::Failed);
        assert_eq!(state.error_message.as_deref(), Some(UPLOAD_ERROR_MESSAGE));
    }
}
