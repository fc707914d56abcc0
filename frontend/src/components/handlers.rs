use super::super::{Model, Msg};
use super::utils::{first_file, source_file};
use crate::api;
use gloo_file::File as GlooFile;
use gloo_timers::callback::Timeout;
use imgsearch_shared::{
    ApiError, ImageDescriptor, NotificationSink, PendingQuery, PendingUpload, StoredImage, Ticket,
    UploadError, UploadState,
};
use wasm_bindgen_futures::spawn_local;
use web_sys::{ClipboardEvent, DragEvent};
use yew::prelude::*;

/// Fires `msg` once the configured request deadline passes. Dropping the
/// returned timer cancels it.
fn arm_deadline<F>(model: &Model, ctx: &Context<Model>, msg: F) -> Option<Timeout>
where
    F: FnOnce() -> Msg + 'static,
{
    let millis = model.config.request_timeout_ms?;
    let link = ctx.link().clone();
    Some(Timeout::new(millis, move || link.send_message(msg())))
}

fn timeout_error(model: &Model) -> ApiError {
    ApiError::Timeout(model.config.request_timeout_ms.unwrap_or_default())
}

pub fn handle_file_chosen(model: &mut Model, ctx: &Context<Model>, file: GlooFile) -> bool {
    match model.session.submit_file(source_file(file), &mut model.toasts) {
        Ok(pending) => {
            let ticket = pending.ticket;
            model.upload_deadline = arm_deadline(model, ctx, move || Msg::UploadTimedOut(ticket));
            send_upload_request(ctx, model, pending);
            true
        }
        Err(UploadError::Rejected(_)) => true,
        Err(e) => {
            log::warn!("File ignored: {}", e);
            false
        }
    }
}

pub fn send_upload_request(ctx: &Context<Model>, model: &Model, pending: PendingUpload<GlooFile>) {
    spawn_local({
        let link = ctx.link().clone();
        let config = model.config.clone();

        async move {
            let outcome = api::upload_image(&config, &pending).await;
            if let Err(e) = &outcome {
                log::error!("Upload of {} failed: {}", pending.file.name, e);
            }
            link.send_message(Msg::UploadFinished(pending.ticket, outcome));
        }
    });
}

pub fn handle_upload_finished(
    model: &mut Model,
    ticket: Ticket,
    outcome: Result<StoredImage, ApiError>,
) -> bool {
    if model.session.finish_upload(ticket, outcome, &mut model.toasts) {
        model.upload_deadline = None;
        true
    } else {
        false
    }
}

pub fn handle_upload_timed_out(model: &mut Model, ticket: Ticket) -> bool {
    let error = timeout_error(model);
    model.upload_deadline = None;
    model.session.finish_upload(ticket, Err(error), &mut model.toasts)
}

pub fn handle_remove_image(model: &mut Model) -> bool {
    model.session.remove_image();
    model.query_deadline = None;
    model.parameter_text = None;
    true
}

pub fn handle_image_load_failed(model: &mut Model) -> bool {
    if !model.session.image_load_failed(&mut model.toasts) {
        return false;
    }
    model.query_deadline = None;
    model.parameter_text = None;
    true
}

pub fn handle_set_mode(model: &mut Model, label: &str) -> bool {
    match model.session.query_mut().update_mode_str(label) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("Mode change ignored: {}", e);
            false
        }
    }
}

/// Keeps the typed text as is so partial numbers like "0." survive the
/// re-render; the draft only changes when the text parses.
pub fn handle_set_parameter(model: &mut Model, raw: String) -> bool {
    if let Err(e) = model.session.query_mut().update_parameter_str(&raw) {
        log::debug!("Query input rejected: {}", e);
    }
    model.parameter_text = Some(raw);
    true
}

pub fn handle_submit_query(model: &mut Model, ctx: &Context<Model>) -> bool {
    match model.session.submit_query(&mut model.toasts) {
        Ok(pending) => {
            let ticket = pending.ticket;
            model.query_deadline = arm_deadline(model, ctx, move || Msg::QueryTimedOut(ticket));
            send_search_request(ctx, model, pending);
            true
        }
        Err(e) => {
            log::warn!("Search not submitted: {}", e);
            true
        }
    }
}

pub fn send_search_request(ctx: &Context<Model>, model: &Model, pending: PendingQuery) {
    spawn_local({
        let link = ctx.link().clone();
        let config = model.config.clone();

        async move {
            let outcome = api::search(&config, &pending).await;
            if let Err(e) = &outcome {
                log::error!("Search on {} failed: {}", pending.endpoint(), e);
            }
            link.send_message(Msg::QueryFinished(pending.ticket, outcome));
        }
    });
}

pub fn handle_query_finished(
    model: &mut Model,
    ticket: Ticket,
    outcome: Result<Vec<ImageDescriptor>, ApiError>,
) -> bool {
    if model.session.finish_query(ticket, outcome, &mut model.toasts) {
        model.query_deadline = None;
        true
    } else {
        false
    }
}

pub fn handle_query_timed_out(model: &mut Model, ticket: Ticket) -> bool {
    let error = timeout_error(model);
    model.query_deadline = None;
    model.session.finish_query(ticket, Err(error), &mut model.toasts)
}

pub fn handle_notify(model: &mut Model, message: &str) -> bool {
    model.toasts.show(message, model.config.notification_ms);
    true
}

pub fn handle_dismiss_toast(model: &mut Model, id: u64) -> bool {
    model.toast_timers.remove(&id);
    model.toasts.dismiss(id)
}

pub fn handle_backend_status(model: &mut Model, status: Result<bool, ApiError>) -> bool {
    let ready = match status {
        Ok(ready) => ready,
        Err(e) => {
            log::error!("Backend health check failed: {}", e);
            false
        }
    };
    model.backend_ready = Some(ready);
    true
}

/// Starts an expiry timer for every toast shown since the last call.
pub fn arm_toast_timers(model: &mut Model, ctx: &Context<Model>) {
    for toast in model.toasts.take_unscheduled() {
        let link = ctx.link().clone();
        let id = toast.id;
        let timer = Timeout::new(toast.duration_ms, move || {
            link.send_message(Msg::DismissToast(id));
        });
        model.toast_timers.insert(id, timer);
    }
}

pub fn handle_drop(model: &mut Model, ctx: &Context<Model>, event: DragEvent) -> bool {
    event.prevent_default();
    model.is_dragging = false;

    if let Some(file) = event
        .data_transfer()
        .and_then(|data_transfer| data_transfer.files())
        .and_then(|files| first_file(&files))
    {
        ctx.link().send_message(Msg::FileChosen(file));
    }

    true
}

pub fn handle_paste(model: &mut Model, ctx: &Context<Model>, event: ClipboardEvent) -> bool {
    if *model.session.upload().state() != UploadState::Idle {
        return false;
    }

    if let Some(file) = event
        .clipboard_data()
        .and_then(|data_transfer| data_transfer.files())
        .and_then(|files| first_file(&files))
    {
        event.prevent_default();
        ctx.link().send_message(Msg::FileChosen(file));
        return true;
    }
    false
}
