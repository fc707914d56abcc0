use super::super::Model;
use super::super::Msg;
use super::utils::{debounce, first_file, trigger_file_input};
use web_sys::{DragEvent, HtmlInputElement};
use yew::prelude::*;

const FILE_INPUT_ID: &str = "file-input";

pub fn render_upload_section(model: &Model, ctx: &Context<Model>) -> Html {
    html! {
        <div class="upload-section fadein">
            { render_file_input_area(model, ctx) }
        </div>
    }
}

pub fn render_uploading(file_name: &str) -> Html {
    html! {
        <div class="loading-preview">
            <i class="fa-solid fa-spinner fa-spin fa-2x"></i>
            <p style="margin-left: 10px;">{ format!("Uploading {}...", file_name) }</p>
        </div>
    }
}

fn render_file_input_area(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link();
    let policy = model.session.upload().policy();

    let handle_change = link.callback(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let file = input.files().as_ref().and_then(first_file);

        input.set_value("");

        match file {
            Some(file) => Msg::FileChosen(file),
            None => Msg::Notify("No image file selected.".into()),
        }
    });

    let handle_drag_over = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(true)
    });

    let handle_drag_leave = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(false)
    });

    let handle_drop = link.callback(Msg::HandleDrop);
    let open_picker = trigger_file_input(FILE_INPUT_ID);

    html! {
        <>
            <input
                type="file"
                id={FILE_INPUT_ID}
                accept={policy.accept_attribute()}
                style="display: none;"
                onchange={handle_change}
            />

            <button
                id="upload-button"
                class="analyze-btn"
                onclick={debounce(300, open_picker.clone())}
            >
                <i class="fa-solid fa-image"></i> {" Select Image"}
            </button>

            <div
                id="drop-zone"
                class={classes!("upload-area", model.is_dragging.then_some("drag-over"))}
                ondragover={handle_drag_over}
                ondragleave={handle_drag_leave}
                ondrop={handle_drop}
                onclick={debounce(300, open_picker)}
            >
                <div class="upload-placeholder">
                    <i class="fa-solid fa-cloud-arrow-up"></i>
                    <p>{"Drag & drop an image here, paste, or click"}</p>
                    <p class="file-types">
                        { format!("Supported formats: PNG, JPEG, GIF | up to {} KB", policy.max_size_bytes / 1000) }
                    </p>
                </div>
            </div>
        </>
    }
}
