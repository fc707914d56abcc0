mod api;
mod components;

use components::header::{render_backend_banner, render_header};
use components::notifications::render_toasts;
use components::search_form::render_search_view;
use components::upload_section::{render_upload_section, render_uploading};
use components::handlers;
use gloo_events::EventListener;
use gloo_file::File as GlooFile;
use gloo_timers::callback::Timeout;
use imgsearch_shared::{
    ApiError, ClientConfig, ImageDescriptor, SearchSession, StoredImage, Ticket, ToastQueue,
    UploadState,
};
use std::collections::HashMap;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{ClipboardEvent, DragEvent};
use yew::prelude::*;

// Yew msg components
pub enum Msg {
    // Upload workflow
    FileChosen(GlooFile),
    UploadFinished(Ticket, Result<StoredImage, ApiError>),
    UploadTimedOut(Ticket),
    RemoveImage,
    ImageLoadFailed,

    // Search workflow
    SetMode(String),
    SetParameter(String),
    SubmitQuery,
    QueryFinished(Ticket, Result<Vec<ImageDescriptor>, ApiError>),
    QueryTimedOut(Ticket),

    // UI states
    Notify(String),
    DismissToast(u64),
    BackendStatus(Result<bool, ApiError>),
    SetDragging(bool),

    // Input events
    HandleDrop(DragEvent),
    HandlePaste(ClipboardEvent),
}

// Main component
pub struct Model {
    config: Rc<ClientConfig>,
    session: SearchSession,
    toasts: ToastQueue,
    toast_timers: HashMap<u64, Timeout>,
    upload_deadline: Option<Timeout>,
    query_deadline: Option<Timeout>,
    backend_ready: Option<bool>,
    is_dragging: bool,
    /// Raw text of the parameter input, once the user has typed into it.
    parameter_text: Option<String>,
    paste_listener: Option<EventListener>,
}

fn load_config() -> ClientConfig {
    match ClientConfig::from_yaml_str(include_str!("../config/client.yaml")) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Falling back to default client config: {}", e);
            ClientConfig::default()
        }
    }
}

impl Component for Model {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let config = Rc::new(load_config());
        let mut model = Self {
            session: SearchSession::new(&config),
            config,
            toasts: ToastQueue::new(),
            toast_timers: HashMap::new(),
            upload_deadline: None,
            query_deadline: None,
            backend_ready: None,
            is_dragging: false,
            parameter_text: None,
            paste_listener: None,
        };

        if let Some(window) = web_sys::window() {
            let link = ctx.link().clone();
            let listener = EventListener::new(&window, "paste", move |event| {
                if let Some(clipboard_event) = event.dyn_ref::<ClipboardEvent>() {
                    link.send_message(Msg::HandlePaste(clipboard_event.clone()));
                }
            });
            model.paste_listener = Some(listener);
        }

        let link = ctx.link().clone();
        let config = model.config.clone();
        spawn_local(async move {
            link.send_message(Msg::BackendStatus(api::backend_ready(&config).await));
        });

        model
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        let changed = match msg {
            // Upload workflow
            Msg::FileChosen(file) => handlers::handle_file_chosen(self, ctx, file),
            Msg::UploadFinished(ticket, outcome) => {
                handlers::handle_upload_finished(self, ticket, outcome)
            }
            Msg::UploadTimedOut(ticket) => handlers::handle_upload_timed_out(self, ticket),
            Msg::RemoveImage => handlers::handle_remove_image(self),
            Msg::ImageLoadFailed => handlers::handle_image_load_failed(self),

            // Search workflow
            Msg::SetMode(label) => handlers::handle_set_mode(self, &label),
            Msg::SetParameter(value) => handlers::handle_set_parameter(self, value),
            Msg::SubmitQuery => handlers::handle_submit_query(self, ctx),
            Msg::QueryFinished(ticket, outcome) => {
                handlers::handle_query_finished(self, ticket, outcome)
            }
            Msg::QueryTimedOut(ticket) => handlers::handle_query_timed_out(self, ticket),

            // UI states
            Msg::Notify(message) => handlers::handle_notify(self, &message),
            Msg::DismissToast(id) => handlers::handle_dismiss_toast(self, id),
            Msg::BackendStatus(status) => handlers::handle_backend_status(self, status),
            Msg::SetDragging(is_dragging) => {
                self.is_dragging = is_dragging;
                true
            }

            // Input events
            Msg::HandleDrop(event) => handlers::handle_drop(self, ctx, event),
            Msg::HandlePaste(event) => handlers::handle_paste(self, ctx, event),
        };

        handlers::arm_toast_timers(self, ctx);
        changed
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let content = match self.session.upload().state() {
            UploadState::Idle => render_upload_section(self, ctx),
            UploadState::Uploading { file_name, .. } => render_uploading(file_name),
            UploadState::Ready(image) => render_search_view(self, ctx, image),
        };

        html! {
            <div class="container">
                { render_header() }
                { render_backend_banner(self.backend_ready) }

                <main class="main-content">
                    <div class="buttons">{ content }</div>
                </main>

                { render_toasts(&self.toasts, ctx.link()) }

                <footer class="app-footer">
                    <p>{"Image Similarity Search | Fullstack Rust WASM"}</p>
                </footer>
            </div>
        }
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("App starting...");
    yew::Renderer::<Model>::new().render();
}
