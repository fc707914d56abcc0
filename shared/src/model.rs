use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use strum_macros::{Display, EnumIter, EnumString};
use uuid::Uuid;

pub const UPLOAD_PATH: &str = "/image-upload";
pub const KNN_PATH: &str = "/knn";
pub const RANGE_SEARCH_PATH: &str = "/rangesearch";
pub const PING_ENGINE_PATH: &str = "/ping-engine";
pub const PING_IMAGE_PATH: &str = "/ping-image";

/// Multipart field carrying the image bytes on upload.
pub const UPLOAD_FIELD: &str = "file";

/// A file picked by the user, before it has been validated or uploaded.
///
/// The payload type is left open: the browser hands us a blob handle, tests
/// hand us plain bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile<P = Vec<u8>> {
    pub name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    pub payload: P,
}

impl SourceFile<Vec<u8>> {
    pub fn from_bytes(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size_bytes: bytes.len() as u64,
            payload: bytes,
        }
    }
}

/// Server-confirmed image produced by a successful upload.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StoredImage {
    #[serde(default = "Uuid::new_v4", deserialize_with = "id_or_fresh")]
    pub id: Uuid,
    pub path: String,
}

/// The server may send any kind of `id`, or none. Only a UUID string is kept;
/// anything else gets a fresh local id.
fn id_or_fresh<'de, D>(deserializer: D) -> Result<Uuid, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(raw
        .as_str()
        .and_then(|id| Uuid::parse_str(id).ok())
        .unwrap_or_else(Uuid::new_v4))
}

/// One matched image. Every key of the server's `imageInfo` object other than
/// `path` is kept verbatim in `info`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ImageDescriptor {
    pub path: String,
    #[serde(flatten)]
    pub info: Map<String, Value>,
}

impl ImageDescriptor {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            info: Map::new(),
        }
    }
}

/// Element of the array returned by `/knn` and `/rangesearch`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SearchHit {
    #[serde(rename = "imageInfo")]
    pub image_info: ImageDescriptor,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ErrorBody {
    pub message: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct PingResponse {
    pub ready: bool,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum QueryMode {
    #[default]
    #[strum(serialize = "KNN")]
    Knn,
    #[strum(serialize = "Range Search")]
    RangeSearch,
}

impl QueryMode {
    /// Every mode, in the order the form lists them.
    pub fn all() -> impl Iterator<Item = QueryMode> {
        <QueryMode as strum::IntoEnumIterator>::iter()
    }

    pub fn endpoint(self) -> &'static str {
        match self {
            QueryMode::Knn => KNN_PATH,
            QueryMode::RangeSearch => RANGE_SEARCH_PATH,
        }
    }

    /// `step` attribute for the number input: k is a count, a radius is not.
    pub fn input_step(self) -> &'static str {
        match self {
            QueryMode::Knn => "1",
            QueryMode::RangeSearch => "any",
        }
    }
}

/// Frozen search payload, sent as form fields `query` and `image`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub image: String,
}

impl SearchRequest {
    pub fn fields(&self) -> [(&'static str, &str); 2] {
        [("query", &self.query), ("image", &self.image)]
    }
}

/// Identifies one in-flight request so late completions can be told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub(crate) fn next(counter: &mut u64) -> Self {
        *counter += 1;
        Ticket(*counter)
    }
}
