use crate::config::ClientConfig;
use crate::error::{ApiError, GENERIC_ERROR_MESSAGE, QueryError, UploadError};
use crate::model::{ImageDescriptor, SourceFile, StoredImage, Ticket};
use crate::notify::NotificationSink;
use crate::query::{PendingQuery, QueryController};
use crate::upload::{PendingUpload, UploadController};

/// One upload-then-search workflow: the upload machine feeds its stored
/// image to the query machine, and removing the image resets both.
#[derive(Debug)]
pub struct SearchSession {
    upload: UploadController,
    query: QueryController,
    notification_ms: u32,
}

impl SearchSession {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            upload: UploadController::new(config.upload.clone(), config.notification_ms),
            query: QueryController::new(config.notification_ms),
            notification_ms: config.notification_ms,
        }
    }

    pub fn upload(&self) -> &UploadController {
        &self.upload
    }

    pub fn query(&self) -> &QueryController {
        &self.query
    }

    pub fn query_mut(&mut self) -> &mut QueryController {
        &mut self.query
    }

    pub fn source_image(&self) -> Option<&StoredImage> {
        self.upload.stored_image()
    }

    pub fn submit_file<P>(
        &mut self,
        file: SourceFile<P>,
        sink: &mut dyn NotificationSink,
    ) -> Result<PendingUpload<P>, UploadError> {
        self.upload.submit(file, sink)
    }

    pub fn finish_upload(
        &mut self,
        ticket: Ticket,
        outcome: Result<StoredImage, ApiError>,
        sink: &mut dyn NotificationSink,
    ) -> bool {
        self.upload.complete(ticket, outcome, sink)
    }

    pub fn submit_query(
        &mut self,
        sink: &mut dyn NotificationSink,
    ) -> Result<PendingQuery, QueryError> {
        let image = self.upload.stored_image().ok_or(QueryError::NoSourceImage)?;
        self.query.submit(image, sink)
    }

    pub fn finish_query(
        &mut self,
        ticket: Ticket,
        outcome: Result<Vec<ImageDescriptor>, ApiError>,
        sink: &mut dyn NotificationSink,
    ) -> bool {
        self.query.complete(ticket, outcome, sink)
    }

    /// Back to an empty page: no source image, a fresh search form.
    pub fn remove_image(&mut self) {
        if self.upload.is_uploading() {
            log::warn!("remove requested while uploading, ignored");
            return;
        }
        self.upload.remove();
        self.query.reset();
    }

    /// A rendered image failed to load: tell the user and start over. Once
    /// the source image is gone further failures are ignored, so a page of
    /// broken results produces a single notification.
    pub fn image_load_failed(&mut self, sink: &mut dyn NotificationSink) -> bool {
        if self.source_image().is_none() {
            log::debug!("image load failure with no source image, ignored");
            return false;
        }
        sink.show(GENERIC_ERROR_MESSAGE, self.notification_ms);
        self.remove_image();
        true
    }
}
