use super::super::{Model, Msg};
use super::results::{render_images, render_results};
use super::utils::debounce;
use imgsearch_shared::{QueryMode, QuerySpec, QueryState, StoredImage};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

/// The uploaded source image followed by either the search form or its
/// results.
pub fn render_search_view(model: &Model, ctx: &Context<Model>, image: &StoredImage) -> Html {
    let link = ctx.link().clone();
    let on_delete = debounce(300, {
        let link = link.clone();
        move || link.send_message(Msg::RemoveImage)
    });
    let on_error = link.callback(|_: Event| Msg::ImageLoadFailed);

    let content = match model.session.query().state() {
        QueryState::Composing(spec) => render_form(model, ctx, spec, false),
        QueryState::Submitting { spec, .. } => render_form(model, ctx, spec, true),
        QueryState::Completed(results) => render_results(results, on_error.clone()),
    };

    html! {
        <div class="search-view">
            { render_images([image.path.as_str()], Some(on_delete), on_error) }
            { content }
        </div>
    }
}

fn render_form(model: &Model, ctx: &Context<Model>, spec: &QuerySpec, submitting: bool) -> Html {
    let link = ctx.link();
    let parameter = model
        .parameter_text
        .clone()
        .unwrap_or_else(|| spec.parameter.to_string());

    let on_submit = link.callback(|e: SubmitEvent| {
        e.prevent_default();
        Msg::SubmitQuery
    });

    let on_mode_change = link.callback(|e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        Msg::SetMode(select.value())
    });

    let on_parameter_input = link.callback(|e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Msg::SetParameter(input.value())
    });

    html! {
        <form onsubmit={on_submit} class="fadein">
            <select onchange={on_mode_change} disabled={submitting}>
                { for QueryMode::all().map(|mode| html! {
                    <option value={mode.to_string()} selected={mode == spec.mode}>
                        { mode.to_string() }
                    </option>
                })}
            </select>
            <input
                type="number"
                step={spec.mode.input_step()}
                min="0"
                required=true
                value={parameter}
                oninput={on_parameter_input}
                disabled={submitting}
            />
            <button type="submit" class="analyze-btn" disabled={submitting}>
                {
                    if submitting {
                        html! { <><i class="fa-solid fa-spinner fa-spin"></i>{" Searching..."}</> }
                    } else {
                        html! { <><i class="fa-solid fa-magnifying-glass"></i>{" Search"}</> }
                    }
                }
            </button>
        </form>
    }
}
