use super::super::{Model, Msg};
use imgsearch_shared::ToastQueue;
use yew::html::Scope;
use yew::prelude::*;

pub fn render_toasts(toasts: &ToastQueue, link: &Scope<Model>) -> Html {
    if toasts.is_empty() {
        return html! {};
    }

    html! {
        <div class="toast-stack">
            { for toasts.iter().map(|toast| {
                let id = toast.id;
                html! {
                    <div
                        class="toast"
                        key={id.to_string()}
                        onclick={link.callback(move |_| Msg::DismissToast(id))}
                    >
                        { &toast.message }
                    </div>
                }
            })}
        </div>
    }
}
