use yew::prelude::*;

/// Renders the application header
pub fn render_header() -> Html {
    html! {
        <header class="app-header">
            <h1><i class="fa-solid fa-images"></i> {" Image Similarity Search"}</h1>
            <p class="subtitle">{"Upload an image, then search by nearest neighbours or by range"}</p>
        </header>
    }
}

pub fn render_backend_banner(ready: Option<bool>) -> Html {
    match ready {
        Some(false) => html! {
            <div class="error-message backend-banner">
                <i class="fa-solid fa-triangle-exclamation"></i>
                <p>{"The search backend is not ready yet, uploads and searches may fail."}</p>
            </div>
        },
        _ => html! {},
    }
}
