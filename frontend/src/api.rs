use gloo_file::File as GlooFile;
use gloo_net::http::{Request, Response};
use imgsearch_shared::model::{PING_ENGINE_PATH, PING_IMAGE_PATH, UPLOAD_FIELD, UPLOAD_PATH};
use imgsearch_shared::response::{parse_ping_response, parse_search_response, parse_upload_response};
use imgsearch_shared::{ApiError, ClientConfig, ImageDescriptor, PendingQuery, PendingUpload, StoredImage};
use wasm_bindgen::JsValue;
use web_sys::FormData;

fn js_error(err: JsValue) -> ApiError {
    ApiError::Network(format!("{:?}", err))
}

fn net_error(err: gloo_net::Error) -> ApiError {
    ApiError::Network(err.to_string())
}

async fn read(response: Response) -> (u16, String) {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    (status, body)
}

async fn post_form(url: &str, form_data: FormData) -> Result<(u16, String), ApiError> {
    let response = Request::post(url)
        .body(form_data)
        .map_err(net_error)?
        .send()
        .await
        .map_err(net_error)?;
    Ok(read(response).await)
}

/// POSTs the file as multipart field `file`.
pub async fn upload_image(
    config: &ClientConfig,
    pending: &PendingUpload<GlooFile>,
) -> Result<StoredImage, ApiError> {
    let form_data = FormData::new().map_err(js_error)?;
    form_data
        .append_with_blob_and_filename(UPLOAD_FIELD, pending.file.payload.as_ref(), &pending.file.name)
        .map_err(js_error)?;

    let (status, body) = post_form(&config.endpoint(UPLOAD_PATH), form_data).await?;
    parse_upload_response(status, &body)
}

pub async fn search(
    config: &ClientConfig,
    pending: &PendingQuery,
) -> Result<Vec<ImageDescriptor>, ApiError> {
    let form_data = FormData::new().map_err(js_error)?;
    for (name, value) in pending.request.fields() {
        form_data.append_with_str(name, value).map_err(js_error)?;
    }

    let (status, body) = post_form(&config.endpoint(pending.endpoint()), form_data).await?;
    parse_search_response(status, &body)
}

async fn ping(config: &ClientConfig, path: &str) -> Result<bool, ApiError> {
    let response = Request::get(&config.endpoint(path))
        .send()
        .await
        .map_err(net_error)?;
    let (status, body) = read(response).await;
    parse_ping_response(status, &body)
}

/// Both the image store and the search engine have to be up.
pub async fn backend_ready(config: &ClientConfig) -> Result<bool, ApiError> {
    let images = ping(config, PING_IMAGE_PATH).await?;
    let engine = ping(config, PING_ENGINE_PATH).await?;
    Ok(images && engine)
}
