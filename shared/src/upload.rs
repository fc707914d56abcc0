use crate::error::{ApiError, UploadError};
use crate::model::{SourceFile, StoredImage, Ticket};
use crate::notify::NotificationSink;
use crate::validation::{UploadPolicy, ValidationResult};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum UploadState {
    #[default]
    Idle,
    Uploading {
        ticket: Ticket,
        file_name: String,
    },
    Ready(StoredImage),
}

/// An accepted file the caller must now POST to the upload route. The
/// response goes back through [`UploadController::complete`] with `ticket`.
#[derive(Debug)]
pub struct PendingUpload<P> {
    pub ticket: Ticket,
    pub file: SourceFile<P>,
}

#[derive(Debug)]
pub struct UploadController {
    state: UploadState,
    policy: UploadPolicy,
    notification_ms: u32,
    tickets: u64,
}

impl UploadController {
    pub fn new(policy: UploadPolicy, notification_ms: u32) -> Self {
        Self {
            state: UploadState::Idle,
            policy,
            notification_ms,
            tickets: 0,
        }
    }

    pub fn state(&self) -> &UploadState {
        &self.state
    }

    pub fn policy(&self) -> &UploadPolicy {
        &self.policy
    }

    pub fn is_uploading(&self) -> bool {
        matches!(self.state, UploadState::Uploading { .. })
    }

    pub fn stored_image(&self) -> Option<&StoredImage> {
        match &self.state {
            UploadState::Ready(image) => Some(image),
            _ => None,
        }
    }

    /// Validates `file` and, if it passes, moves to `Uploading` and hands the
    /// file back as a request to send. Rejections are reported to `sink` one
    /// reason at a time and leave the state untouched.
    pub fn submit<P>(
        &mut self,
        file: SourceFile<P>,
        sink: &mut dyn NotificationSink,
    ) -> Result<PendingUpload<P>, UploadError> {
        match &self.state {
            UploadState::Idle => {}
            UploadState::Uploading { file_name, .. } => {
                log::warn!("submit of {} ignored, {} is still uploading", file.name, file_name);
                return Err(UploadError::Busy);
            }
            UploadState::Ready(_) => {
                log::warn!("submit of {} ignored, an image is already uploaded", file.name);
                return Err(UploadError::AlreadyUploaded);
            }
        }

        if let ValidationResult::Rejected(reasons) = self.policy.validate(&file) {
            for reason in &reasons {
                sink.show(reason, self.notification_ms);
            }
            log::debug!("{} rejected before upload: {:?}", file.name, reasons);
            return Err(UploadError::Rejected(reasons));
        }

        let ticket = Ticket::next(&mut self.tickets);
        log::debug!("upload {:?}: Idle -> Uploading ({})", ticket, file.name);
        self.state = UploadState::Uploading {
            ticket,
            file_name: file.name.clone(),
        };
        Ok(PendingUpload { ticket, file })
    }

    /// Applies the outcome of the request identified by `ticket`. Returns
    /// `false` when the ticket is stale and nothing changed.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        outcome: Result<StoredImage, ApiError>,
        sink: &mut dyn NotificationSink,
    ) -> bool {
        match &self.state {
            UploadState::Uploading { ticket: current, .. } if *current == ticket => {}
            _ => {
                log::warn!("dropping stale upload completion {:?}", ticket);
                return false;
            }
        }

        match outcome {
            Ok(image) => {
                log::info!("upload {:?} stored at {}", ticket, image.path);
                self.state = UploadState::Ready(image);
            }
            Err(err) => {
                log::debug!("upload {:?} failed: {}", ticket, err);
                sink.show(&err.user_message(), self.notification_ms);
                self.state = UploadState::Idle;
            }
        }
        true
    }

    /// Drops the stored image and returns to `Idle`.
    pub fn remove(&mut self) -> Option<StoredImage> {
        match std::mem::take(&mut self.state) {
            UploadState::Ready(image) => {
                log::debug!("removed {}: Ready -> Idle", image.path);
                Some(image)
            }
            UploadState::Idle => {
                log::debug!("remove while idle, nothing to do");
                None
            }
            uploading @ UploadState::Uploading { .. } => {
                log::warn!("remove ignored while an upload is in flight");
                self.state = uploading;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn controller() -> UploadController {
        UploadController::new(UploadPolicy::default(), 2000)
    }

    fn stored(path: &str) -> StoredImage {
        StoredImage {
            id: Uuid::new_v4(),
            path: path.into(),
        }
    }

    #[test]
    fn rejected_file_notifies_each_reason_and_stays_idle() {
        let mut upload = controller();
        let mut sink: Vec<(String, u32)> = Vec::new();
        let file = SourceFile::from_bytes("huge.bmp", "image/bmp", vec![0; 200_000]);

        let err = upload.submit(file, &mut sink).unwrap_err();

        assert!(matches!(err, UploadError::Rejected(ref r) if r.len() == 2));
        assert_eq!(sink.len(), 2);
        assert!(sink.iter().all(|(_, ms)| *ms == 2000));
        assert_eq!(upload.state(), &UploadState::Idle);
    }

    #[test]
    fn accepted_file_moves_to_uploading() {
        let mut upload = controller();
        let mut sink: Vec<(String, u32)> = Vec::new();
        let file = SourceFile::from_bytes("cat.png", "image/png", vec![1; 100]);

        let pending = upload.submit(file, &mut sink).unwrap();

        assert_eq!(pending.file.payload.len(), 100);
        assert!(upload.is_uploading());
        assert!(sink.is_empty());
    }

    #[test]
    fn second_submit_while_uploading_is_refused() {
        let mut upload = controller();
        let mut sink: Vec<(String, u32)> = Vec::new();
        let first = upload
            .submit(SourceFile::from_bytes("a.png", "image/png", vec![0; 10]), &mut sink)
            .unwrap();
        let again = upload.submit(SourceFile::from_bytes("b.png", "image/png", vec![0; 10]), &mut sink);

        assert_eq!(again.unwrap_err(), UploadError::Busy);
        assert_eq!(
            upload.state(),
            &UploadState::Uploading {
                ticket: first.ticket,
                file_name: "a.png".into()
            }
        );
    }

    #[test]
    fn success_moves_to_ready() {
        let mut upload = controller();
        let mut sink: Vec<(String, u32)> = Vec::new();
        let pending = upload
            .submit(SourceFile::from_bytes("a.gif", "image/gif", vec![0; 10]), &mut sink)
            .unwrap();

        assert!(upload.complete(pending.ticket, Ok(stored("/img/42.png")), &mut sink));
        assert_eq!(upload.stored_image().map(|i| i.path.as_str()), Some("/img/42.png"));
    }

    #[test]
    fn failure_notifies_and_returns_to_idle() {
        let mut upload = controller();
        let mut sink: Vec<(String, u32)> = Vec::new();
        let pending = upload
            .submit(SourceFile::from_bytes("a.gif", "image/gif", vec![0; 10]), &mut sink)
            .unwrap();

        let err = ApiError::Server {
            status: 400,
            message: Some("bad image".into()),
        };
        assert!(upload.complete(pending.ticket, Err(err), &mut sink));

        assert_eq!(upload.state(), &UploadState::Idle);
        assert_eq!(sink, vec![("bad image".to_string(), 2000)]);
    }

    #[test]
    fn stale_completion_is_ignored() {
        let mut upload = controller();
        let mut sink: Vec<(String, u32)> = Vec::new();
        let first = upload
            .submit(SourceFile::from_bytes("a.png", "image/png", vec![0; 10]), &mut sink)
            .unwrap();
        upload.complete(first.ticket, Err(ApiError::Timeout(5)), &mut sink);
        let second = upload
            .submit(SourceFile::from_bytes("b.png", "image/png", vec![0; 10]), &mut sink)
            .unwrap();

        assert!(!upload.complete(first.ticket, Ok(stored("/late.png")), &mut sink));
        assert!(upload.is_uploading());
        assert!(upload.complete(second.ticket, Ok(stored("/b.png")), &mut sink));
        assert_eq!(upload.stored_image().unwrap().path, "/b.png");
    }

    #[test]
    fn remove_discards_stored_image() {
        let mut upload = controller();
        let mut sink: Vec<(String, u32)> = Vec::new();
        let pending = upload
            .submit(SourceFile::from_bytes("a.png", "image/png", vec![0; 10]), &mut sink)
            .unwrap();
        upload.complete(pending.ticket, Ok(stored("/img/1.png")), &mut sink);

        assert_eq!(upload.remove().map(|i| i.path), Some("/img/1.png".into()));
        assert_eq!(upload.state(), &UploadState::Idle);
        assert!(upload.remove().is_none());
    }

    #[test]
    fn remove_does_not_abandon_an_upload_in_flight() {
        let mut upload = controller();
        let mut sink: Vec<(String, u32)> = Vec::new();
        upload
            .submit(SourceFile::from_bytes("a.png", "image/png", vec![0; 10]), &mut sink)
            .unwrap();
        assert!(upload.remove().is_none());
        assert!(upload.is_uploading());
    }

    #[test]
    fn submit_after_ready_requires_remove() {
        let mut upload = controller();
        let mut sink: Vec<(String, u32)> = Vec::new();
        let pending = upload
            .submit(SourceFile::from_bytes("a.png", "image/png", vec![0; 10]), &mut sink)
            .unwrap();
        upload.complete(pending.ticket, Ok(stored("/img/1.png")), &mut sink);

        let again = upload.submit(SourceFile::from_bytes("b.png", "image/png", vec![0; 10]), &mut sink);
        assert_eq!(again.unwrap_err(), UploadError::AlreadyUploaded);
    }
}
