//! Turns raw `(status, body)` pairs from the backend into typed outcomes.
//!
//! The front end reads the status code and body text and hands them over
//! unchanged, so every quirk of the wire format is handled (and tested) here.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::model::{ErrorBody, ImageDescriptor, PingResponse, SearchHit, StoredImage};

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Pulls `message` out of an error body. Anything unparsable yields `None`.
pub fn server_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|e| e.message)
}

fn parse<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    if !is_success(status) {
        return Err(ApiError::Server {
            status,
            message: server_message(body),
        });
    }
    serde_json::from_str(body).map_err(|e| ApiError::Malformed(e.to_string()))
}

pub fn parse_upload_response(status: u16, body: &str) -> Result<StoredImage, ApiError> {
    parse(status, body)
}

/// Extracts each hit's `imageInfo`, keeping server order.
pub fn parse_search_response(status: u16, body: &str) -> Result<Vec<ImageDescriptor>, ApiError> {
    let hits: Vec<SearchHit> = parse(status, body)?;
    Ok(hits.into_iter().map(|hit| hit.image_info).collect())
}

pub fn parse_ping_response(status: u16, body: &str) -> Result<bool, ApiError> {
    let ping: PingResponse = parse(status, body)?;
    Ok(ping.ready)
}
