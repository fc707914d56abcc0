use imgsearch_shared::ImageDescriptor;
use yew::prelude::*;

fn render_image(path: &str, on_error: &Callback<Event>) -> Html {
    html! {
        <img
            src={path.to_string()}
            alt=""
            onerror={on_error.clone()}
        />
    }
}

/// Renders images in the order given. `on_delete` adds the remove button,
/// `on_error` fires for every image that fails to load.
pub fn render_images<'a>(
    paths: impl IntoIterator<Item = &'a str>,
    on_delete: Option<Callback<MouseEvent>>,
    on_error: Callback<Event>,
) -> Html {
    html! {
        <div class="fadein">
            {
                if let Some(on_delete) = on_delete {
                    html! {
                        <div class="delete" title="Remove this image" onclick={on_delete}>
                            <i class="fa-solid fa-circle-xmark fa-2x"></i>
                        </div>
                    }
                } else {
                    html! {}
                }
            }
            { for paths.into_iter().map(|path| render_image(path, &on_error)) }
        </div>
    }
}

pub fn render_results(results: &[ImageDescriptor], on_error: Callback<Event>) -> Html {
    if results.is_empty() {
        return html! {
            <p class="no-results-message">{"No similar images found."}</p>
        };
    }

    html! {
        <div class="results-container">
            <h2>{ format!("{} matching images", results.len()) }</h2>
            { render_images(results.iter().map(|d| d.path.as_str()), None, on_error) }
        </div>
    }
}
