//! Client-side core of the image similarity search front end.
//!
//! Everything in here is target-agnostic: the wasm front end drives these
//! state machines and performs the actual HTTP calls, while the controllers
//! only decide *what* to send and *how* to react to what came back.

pub mod config;
pub mod error;
pub mod model;
pub mod notify;
pub mod query;
pub mod response;
pub mod session;
pub mod upload;
pub mod validation;

pub use config::ClientConfig;
pub use error::{ApiError, ConfigError, QueryError, UploadError};
pub use model::{
    ErrorBody, ImageDescriptor, PingResponse, QueryMode, SearchHit, SearchRequest, SourceFile,
    StoredImage, Ticket,
};
pub use notify::{NotificationSink, Toast, ToastQueue};
pub use query::{PendingQuery, QueryController, QuerySpec, QueryState};
pub use session::SearchSession;
pub use upload::{PendingUpload, UploadController, UploadState};
pub use validation::{UploadPolicy, ValidationResult};
