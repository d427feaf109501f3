//! Upload workflow state machine.
//!
//! [`Uploader::dispatch`] is the only place state changes. UI events,
//! transfer progress, the transfer outcome and the reset timer all arrive as
//! [`Action`]s; anything that has to happen outside the reducer comes back
//! as a [`Command`] for the shell to run.
//!
//! ```text
//!            UploadRequested              TransferSucceeded
//!   Idle ───────────────────▶ Uploading ───────────────────▶ Success
//!    ▲                           │                              │
//!    │                           │ TransferFailed               │ ResetElapsed (3 s)
//!    │         Reset             ▼                              │
//!    └─────────────────────── Error ◀── (missing config)        │
//!    └──────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::StreamExt;
use serde::{Deserialize, Serialize};

use crate::config::Destination;
use crate::error::{ConfigResult, TransferError, UploadError};
use crate::metadata::Metadata;
use crate::models::{PickedFile, SelectedFile, UploadStatus};
use crate::progress::{self, ProgressEvent};
use crate::transfer::{object_key, Transfer, TransferHandle, TransferOptions, TransferRequest};

/// How long the success banner stays before the form resets.
pub const SUCCESS_RESET_DELAY: Duration = Duration::from_secs(3);

/// Everything the widget renders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploaderState {
    pub selected: Option<SelectedFile>,
    pub metadata: Metadata,
    /// Current contents of the tag entry field.
    pub tag_draft: String,
    pub dragging: bool,
    pub status: UploadStatus,
    /// Percentage, `0..=100`.
    pub progress: u8,
    /// Set only in [`UploadStatus::Error`].
    pub error_message: Option<String>,
    /// Number of transfer attempts started so far.
    pub attempt: u64,
}

impl UploaderState {
    /// Whether the upload control should be enabled.
    pub fn can_upload(&self) -> bool {
        self.selected.is_some() && self.status != UploadStatus::Uploading
    }
}

/// Inputs to the reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum Action<B> {
    DragEnter,
    DragOver,
    DragLeave,
    /// Files dropped on the target. Only the first one is kept.
    Drop(Vec<PickedFile<B>>),
    /// Files chosen through the picker. Only the first one is kept.
    FilesChosen(Vec<PickedFile<B>>),
    TitleChanged(String),
    DescriptionChanged(String),
    TagDraftChanged(String),
    /// Commit key pressed in the tag field.
    TagCommitted,
    TagRemoved(String),
    UploadRequested { at: DateTime<Utc> },
    Progress { attempt: u64, event: ProgressEvent },
    TransferSucceeded { attempt: u64 },
    TransferFailed { attempt: u64, error: TransferError },
    ResetElapsed { attempt: u64 },
    Reset,
}

/// Side effects requested by the reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum Command<B> {
    /// Start the delegated transfer and feed its results back with
    /// [`drive_transfer`].
    StartTransfer { attempt: u64, request: TransferRequest<B> },
    /// Dispatch [`Action::ResetElapsed`] after `delay`.
    ScheduleReset { attempt: u64, delay: Duration },
}

/// One uploader widget: its configuration, its state and the body of the
/// selected file.
#[derive(Debug)]
pub struct Uploader<B> {
    destination: ConfigResult<Destination>,
    state: UploaderState,
    body: Option<B>,
}

impl<B: Clone> Uploader<B> {
    /// `destination` is validated once at start-up; an `Err` turns every
    /// upload attempt into an immediate error.
    pub fn new(destination: ConfigResult<Destination>) -> Self {
        Self {
            destination,
            state: UploaderState::default(),
            body: None,
        }
    }

    pub fn state(&self) -> &UploaderState {
        &self.state
    }

    pub fn body(&self) -> Option<&B> {
        self.body.as_ref()
    }

    /// Apply one action.
    pub fn dispatch(&mut self, action: Action<B>) -> Option<Command<B>> {
        match action {
            Action::DragEnter | Action::DragOver => {
                self.state.dragging = true;
            }
            Action::DragLeave => {
                self.state.dragging = false;
            }
            Action::Drop(files) => {
                self.state.dragging = false;
                self.select(files);
            }
            Action::FilesChosen(files) => self.select(files),
            Action::TitleChanged(title) => self.state.metadata.title = title,
            Action::DescriptionChanged(description) => {
                self.state.metadata.description = description;
            }
            Action::TagDraftChanged(draft) => self.state.tag_draft = draft,
            Action::TagCommitted => {
                let UploaderState {
                    metadata,
                    tag_draft,
                    ..
                } = &mut self.state;
                metadata.commit_tag(tag_draft);
            }
            Action::TagRemoved(tag) => {
                self.state.metadata.remove_tag(&tag);
            }
            Action::UploadRequested { at } => return self.request_upload(at),
            Action::Progress { attempt, event } => {
                if self.is_running(attempt) {
                    self.state.progress = progress::advance(self.state.progress, &event);
                    log::debug!("upload progress: {}%", self.state.progress);
                }
            }
            Action::TransferSucceeded { attempt } => {
                if self.is_running(attempt) {
                    log::info!("upload #{} completed", attempt);
                    self.state.status = UploadStatus::Success;
                    return Some(Command::ScheduleReset {
                        attempt,
                        delay: SUCCESS_RESET_DELAY,
                    });
                }
            }
            Action::TransferFailed { attempt, error } => {
                if self.is_running(attempt) {
                    self.fail(error.into());
                }
            }
            Action::ResetElapsed { attempt } => {
                if attempt == self.state.attempt && self.state.status == UploadStatus::Success {
                    self.reset();
                }
            }
            Action::Reset => {
                if self.state.status == UploadStatus::Uploading {
                    log::debug!("reset ignored: a transfer is in flight");
                } else {
                    self.reset();
                }
            }
        }
        None
    }

    fn select(&mut self, files: Vec<PickedFile<B>>) {
        let count = files.len();
        let Some(first) = files.into_iter().next() else {
            return;
        };
        if count > 1 {
            log::debug!("{} files offered, keeping only {}", count, first.info.name);
        }
        log::info!("selected {} ({} bytes)", first.info.name, first.info.size);
        self.state.selected = Some(first.info);
        self.body = Some(first.body);
    }

    fn request_upload(&mut self, at: DateTime<Utc>) -> Option<Command<B>> {
        if self.state.status == UploadStatus::Uploading {
            log::debug!("upload already in flight");
            return None;
        }
        let (Some(file), Some(body)) = (self.state.selected.clone(), self.body.clone()) else {
            return None;
        };

        let destination = match self.destination.clone() {
            Ok(destination) => destination,
            Err(err) => {
                self.state.progress = 0;
                self.fail(err.into());
                return None;
            }
        };

        self.state.attempt += 1;
        self.state.progress = 0;
        self.state.error_message = None;
        self.state.status = UploadStatus::Uploading;

        let request = TransferRequest {
            key: object_key(&file.name, at),
            destination,
            body,
            content_type: file.content_type,
            metadata: self.state.metadata.object_metadata(),
            options: TransferOptions::default(),
        };
        log::info!(
            "upload #{} starting: s3://{}/{}",
            self.state.attempt,
            request.destination.bucket,
            request.key
        );

        Some(Command::StartTransfer {
            attempt: self.state.attempt,
            request,
        })
    }

    fn is_running(&self, attempt: u64) -> bool {
        attempt == self.state.attempt && self.state.status == UploadStatus::Uploading
    }

    fn fail(&mut self, err: UploadError) {
        log::warn!("upload failed: {}", err);
        self.state.status = UploadStatus::Error;
        self.state.error_message = Some(err.display_message());
    }

    fn reset(&mut self) {
        self.state = UploaderState {
            attempt: self.state.attempt,
            ..UploaderState::default()
        };
        self.body = None;
    }
}

/// Run one transfer and feed its progress and outcome back as actions.
///
/// Every progress event is emitted before the single terminal action.
pub async fn drive_transfer<T, F>(
    transfer: &T,
    attempt: u64,
    request: TransferRequest<T::Body>,
    mut emit: F,
) where
    T: Transfer + ?Sized,
    F: FnMut(Action<T::Body>),
{
    let TransferHandle {
        mut progress,
        outcome,
    } = transfer.start(request);

    while let Some(event) = progress.next().await {
        emit(Action::Progress { attempt, event });
    }

    let action = match outcome.await {
        Ok(Ok(())) => Action::TransferSucceeded { attempt },
        Ok(Err(error)) => Action::TransferFailed { attempt, error },
        Err(_) => Action::TransferFailed {
            attempt,
            error: TransferError::Abandoned,
        },
    };
    emit(action);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Credentials;
    use crate::error::{ConfigError, GENERIC_FAILURE_MESSAGE};
    use crate::testing::ScriptedTransfer;

    type Body = Vec<u8>;

    fn destination() -> Destination {
        Destination {
            region: "us-east-1".into(),
            bucket: "inbox".into(),
            credentials: Credentials {
                access_key_id: "AKIAEXAMPLE".into(),
                secret_access_key: "secret".into(),
            },
            endpoint: None,
        }
    }

    fn uploader() -> Uploader<Body> {
        Uploader::new(Ok(destination()))
    }

    fn file(name: &str) -> PickedFile<Body> {
        PickedFile::new(name, "application/pdf", 3, vec![1, 2, 3])
    }

    fn at() -> DateTime<Utc> {
        DateTime::from_timestamp_millis(1_700_000_000_000).unwrap()
    }

    /// Trigger an upload and run it to completion against `transfer`.
    /// Returns the command produced by the terminal action.
    async fn run_upload(
        uploader: &mut Uploader<Body>,
        transfer: &ScriptedTransfer<Body>,
    ) -> (Option<Command<Body>>, Vec<u8>) {
        let Some(Command::StartTransfer { attempt, request }) =
            uploader.dispatch(Action::UploadRequested { at: at() })
        else {
            panic!("expected a transfer to start");
        };

        let mut actions = Vec::new();
        drive_transfer(transfer, attempt, request, |a| actions.push(a)).await;

        let mut seen = Vec::new();
        let mut last = None;
        for action in actions {
            last = uploader.dispatch(action);
            if uploader.state().status == UploadStatus::Uploading {
                seen.push(uploader.state().progress);
            }
        }
        (last, seen)
    }

    #[test]
    fn test_drag_flag() {
        let mut up = uploader();
        up.dispatch(Action::DragEnter);
        assert!(up.state().dragging);
        up.dispatch(Action::DragLeave);
        assert!(!up.state().dragging);
        up.dispatch(Action::DragOver);
        assert!(up.state().dragging);
        up.dispatch(Action::Drop(vec![file("a.txt")]));
        assert!(!up.state().dragging);
    }

    #[test]
    fn test_drop_keeps_first_file_only() {
        let mut up = uploader();
        up.dispatch(Action::Drop(vec![file("first.pdf"), file("second.pdf")]));
        assert_eq!(up.state().selected.as_ref().unwrap().name, "first.pdf");
    }

    #[test]
    fn test_empty_selection_keeps_previous_file() {
        let mut up = uploader();
        up.dispatch(Action::FilesChosen(vec![file("keep.pdf")]));
        up.dispatch(Action::FilesChosen(vec![]));
        up.dispatch(Action::Drop(vec![]));
        assert_eq!(up.state().selected.as_ref().unwrap().name, "keep.pdf");
    }

    #[test]
    fn test_tag_editing_through_actions() {
        let mut up = uploader();
        for tag in ["finance", "finance", "2024"] {
            up.dispatch(Action::TagDraftChanged(tag.into()));
            up.dispatch(Action::TagCommitted);
        }
        assert_eq!(up.state().metadata.tags, vec!["finance", "2024"]);
        assert!(up.state().tag_draft.is_empty());

        up.dispatch(Action::TagRemoved("missing".into()));
        assert_eq!(up.state().metadata.tags, vec!["finance", "2024"]);
        up.dispatch(Action::TagRemoved("finance".into()));
        assert_eq!(up.state().metadata.tags, vec!["2024"]);
    }

    #[test]
    fn test_upload_without_file_is_noop() {
        let mut up = uploader();
        up.dispatch(Action::TitleChanged("draft".into()));
        let before = up.state().clone();
        assert!(up.dispatch(Action::UploadRequested { at: at() }).is_none());
        assert_eq!(up.state(), &before);
    }

    #[test]
    fn test_missing_config_fails_without_transfer() {
        let mut up: Uploader<Body> =
            Uploader::new(Err(ConfigError::Missing(vec!["AWS_BUCKET_NAME"])));
        up.dispatch(Action::Drop(vec![file("report.pdf")]));

        let cmd = up.dispatch(Action::UploadRequested { at: at() });
        assert!(cmd.is_none());
        assert_eq!(up.state().status, UploadStatus::Error);
        assert_eq!(up.state().progress, 0);
        assert_eq!(up.state().attempt, 0);
        assert!(up
            .state()
            .error_message
            .as_deref()
            .unwrap()
            .contains("AWS_BUCKET_NAME"));
    }

    #[test]
    fn test_start_transfer_request() {
        let mut up = uploader();
        up.dispatch(Action::Drop(vec![file("report.pdf")]));
        up.dispatch(Action::TitleChanged("Q1 Report".into()));
        up.dispatch(Action::DescriptionChanged("numbers".into()));
        up.dispatch(Action::TagDraftChanged("finance".into()));
        up.dispatch(Action::TagCommitted);

        let Some(Command::StartTransfer { attempt, request }) =
            up.dispatch(Action::UploadRequested { at: at() })
        else {
            panic!("expected StartTransfer");
        };
        assert_eq!(attempt, 1);
        assert_eq!(request.destination.bucket, "inbox");
        assert_eq!(request.key, "uploads/1700000000000-report.pdf");
        assert_eq!(request.body, vec![1, 2, 3]);
        assert_eq!(request.content_type, "application/pdf");
        assert_eq!(request.metadata["title"], "Q1 Report");
        assert_eq!(request.metadata["description"], "numbers");
        assert_eq!(request.metadata["tags"], "finance");
        assert_eq!(request.options, TransferOptions::default());
        assert_eq!(up.state().status, UploadStatus::Uploading);
        assert!(!up.state().can_upload());
    }

    #[test]
    fn test_second_trigger_while_uploading_ignored() {
        let mut up = uploader();
        up.dispatch(Action::Drop(vec![file("a.bin")]));
        assert!(up.dispatch(Action::UploadRequested { at: at() }).is_some());
        assert!(up.dispatch(Action::UploadRequested { at: at() }).is_none());
        assert_eq!(up.state().attempt, 1);
    }

    #[test]
    fn test_new_file_does_not_change_status() {
        let mut up = uploader();
        up.dispatch(Action::Drop(vec![file("a.bin")]));
        up.dispatch(Action::UploadRequested { at: at() });
        up.dispatch(Action::FilesChosen(vec![file("b.bin")]));
        assert_eq!(up.state().status, UploadStatus::Uploading);
        assert_eq!(up.state().selected.as_ref().unwrap().name, "b.bin");
    }

    #[test]
    fn test_reset_ignored_while_uploading() {
        let mut up = uploader();
        up.dispatch(Action::Drop(vec![file("a.bin")]));
        up.dispatch(Action::UploadRequested { at: at() });
        up.dispatch(Action::Reset);
        assert_eq!(up.state().status, UploadStatus::Uploading);
        assert!(up.body().is_some());
    }

    #[tokio::test]
    async fn test_report_scenario_success_then_auto_reset() {
        let mut up = uploader();
        up.dispatch(Action::DragEnter);
        up.dispatch(Action::Drop(vec![file("report.pdf")]));
        up.dispatch(Action::TitleChanged("Q1 Report".into()));
        for tag in ["finance", "finance", "2024"] {
            up.dispatch(Action::TagDraftChanged(tag.into()));
            up.dispatch(Action::TagCommitted);
        }
        assert_eq!(up.state().metadata.tags, vec!["finance", "2024"]);

        let total = Some(12 << 20);
        let transfer = ScriptedTransfer::new(
            vec![
                ProgressEvent::new(5 << 20, total),
                ProgressEvent::new(10 << 20, total),
            ],
            Ok(()),
        );
        let (cmd, seen) = run_upload(&mut up, &transfer).await;

        assert_eq!(transfer.started(), 1);
        assert_eq!(transfer.requests.borrow()[0].metadata["tags"], "finance,2024");
        assert_eq!(seen, vec![42, 83]);
        assert_eq!(up.state().status, UploadStatus::Success);
        // Success does not jump the bar to 100
        assert_eq!(up.state().progress, 83);
        assert_eq!(
            cmd,
            Some(Command::ScheduleReset {
                attempt: 1,
                delay: Duration::from_secs(3)
            })
        );

        up.dispatch(Action::ResetElapsed { attempt: 1 });
        let state = up.state();
        assert_eq!(state.status, UploadStatus::Idle);
        assert!(state.selected.is_none());
        assert_eq!(state.metadata, Metadata::default());
        assert_eq!(state.progress, 0);
        assert!(up.body().is_none());
    }

    #[tokio::test]
    async fn test_access_denied_shown_verbatim() {
        let mut up = uploader();
        up.dispatch(Action::Drop(vec![file("report.pdf")]));
        let transfer = ScriptedTransfer::new(
            vec![ProgressEvent::new(1, Some(10))],
            Err(TransferError::from_message(Some("Access Denied".into()))),
        );
        let (cmd, _) = run_upload(&mut up, &transfer).await;

        assert!(cmd.is_none());
        assert_eq!(up.state().status, UploadStatus::Error);
        assert_eq!(up.state().error_message.as_deref(), Some("Access Denied"));
    }

    #[tokio::test]
    async fn test_failure_without_message_uses_fallback() {
        let mut up = uploader();
        up.dispatch(Action::Drop(vec![file("report.pdf")]));
        let transfer = ScriptedTransfer::new(vec![], Err(TransferError::from_message(None)));
        run_upload(&mut up, &transfer).await;

        assert_eq!(up.state().status, UploadStatus::Error);
        assert_eq!(up.state().error_message.as_deref(), Some(GENERIC_FAILURE_MESSAGE));
    }

    #[tokio::test]
    async fn test_abandoned_transfer_is_a_failure() {
        let mut up = uploader();
        up.dispatch(Action::Drop(vec![file("report.pdf")]));
        let transfer = ScriptedTransfer::abandoned(vec![ProgressEvent::new(3, Some(6))]);
        let (_, seen) = run_upload(&mut up, &transfer).await;

        assert_eq!(seen, vec![50]);
        assert_eq!(up.state().status, UploadStatus::Error);
        assert_eq!(up.state().error_message.as_deref(), Some(GENERIC_FAILURE_MESSAGE));
    }

    #[tokio::test]
    async fn test_progress_monotonic_and_bounded() {
        let mut up = uploader();
        up.dispatch(Action::Drop(vec![file("big.iso")]));
        let transfer = ScriptedTransfer::new(
            vec![
                ProgressEvent::new(30, Some(100)),
                ProgressEvent::new(20, Some(100)),
                ProgressEvent::new(50, None),
                ProgressEvent::new(250, Some(200)),
            ],
            Err(TransferError::Unspecified),
        );
        let (_, seen) = run_upload(&mut up, &transfer).await;
        assert_eq!(seen, vec![30, 30, 30, 100]);
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
    }

    #[tokio::test]
    async fn test_retry_after_error_starts_fresh() {
        let mut up = uploader();
        up.dispatch(Action::Drop(vec![file("report.pdf")]));
        let failing = ScriptedTransfer::new(
            vec![ProgressEvent::new(8, Some(10))],
            Err(TransferError::Rejected("RequestTimeout".into())),
        );
        run_upload(&mut up, &failing).await;
        assert_eq!(up.state().progress, 80);

        let cmd = up.dispatch(Action::UploadRequested { at: at() });
        assert!(matches!(cmd, Some(Command::StartTransfer { attempt: 2, .. })));
        assert_eq!(up.state().progress, 0);
        assert_eq!(up.state().error_message, None);
        assert_eq!(up.state().status, UploadStatus::Uploading);
    }

    #[test]
    fn test_stale_actions_ignored() {
        let mut up = uploader();
        up.dispatch(Action::Drop(vec![file("report.pdf")]));
        up.dispatch(Action::UploadRequested { at: at() });
        up.dispatch(Action::TransferFailed {
            attempt: 1,
            error: TransferError::Unspecified,
        });
        up.dispatch(Action::UploadRequested { at: at() });
        assert_eq!(up.state().attempt, 2);

        up.dispatch(Action::Progress {
            attempt: 1,
            event: ProgressEvent::new(9, Some(10)),
        });
        up.dispatch(Action::TransferSucceeded { attempt: 1 });
        assert_eq!(up.state().progress, 0);
        assert_eq!(up.state().status, UploadStatus::Uploading);

        // A reset timer from an earlier success must not clear a later attempt.
        up.dispatch(Action::TransferSucceeded { attempt: 2 });
        up.dispatch(Action::TitleChanged("kept".into()));
        up.dispatch(Action::ResetElapsed { attempt: 1 });
        assert_eq!(up.state().status, UploadStatus::Success);
        assert_eq!(up.state().metadata.title, "kept");
    }

    #[test]
    fn test_manual_reset_from_error() {
        let mut up: Uploader<Body> = Uploader::new(Err(ConfigError::Missing(vec!["AWS_REGION"])));
        up.dispatch(Action::Drop(vec![file("report.pdf")]));
        up.dispatch(Action::TitleChanged("x".into()));
        up.dispatch(Action::UploadRequested { at: at() });
        assert_eq!(up.state().status, UploadStatus::Error);

        up.dispatch(Action::Reset);
        assert_eq!(up.state(), &UploaderState::default());
    }

    #[test]
    fn test_state_is_serializable() {
        let mut up = uploader();
        up.dispatch(Action::Drop(vec![file("report.pdf")]));
        up.dispatch(Action::TitleChanged("Q1 Report".into()));
        up.dispatch(Action::UploadRequested { at: at() });

        let json = serde_json::to_value(up.state()).unwrap();
        assert_eq!(json["status"], "uploading");
        assert_eq!(json["selected"]["name"], "report.pdf");
        assert_eq!(json["metadata"]["title"], "Q1 Report");

        let back: UploaderState = serde_json::from_value(json).unwrap();
        assert_eq!(&back, up.state());
    }
}
