use gloo_file::File as GlooFile;
use gloo_timers::callback::Timeout;
use imgsearch_shared::SourceFile;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::FileList;
use yew::prelude::*;

// Debounce function to limit button events
pub fn debounce<F>(duration: i32, callback: F) -> Callback<MouseEvent>
where
    F: Fn() + Clone + 'static,
{
    let timeout = Rc::new(RefCell::new(None::<Timeout>));
    let timeout_clone = Rc::clone(&timeout);

    Callback::from(move |_| {
        let mut timeout_ref = timeout_clone.borrow_mut();

        if let Some(old_timeout) = timeout_ref.take() {
            old_timeout.cancel();
        }

        let inner_callback = callback.clone();
        let new_timeout = Timeout::new(duration as u32, move || {
            inner_callback();
        });

        *timeout_ref = Some(new_timeout);
    })
}

/// Only one source image is searched at a time, extra files are ignored.
/// Nothing is filtered by type here so that the validator can explain why a
/// file was refused.
pub fn first_file(file_list: &FileList) -> Option<GlooFile> {
    if file_list.length() > 1 {
        log::info!("{} files given, using the first one", file_list.length());
    }
    file_list.item(0).map(GlooFile::from)
}

pub fn source_file(file: GlooFile) -> SourceFile<GlooFile> {
    SourceFile {
        name: file.name(),
        mime_type: file.raw_mime_type(),
        size_bytes: file.size(),
        payload: file,
    }
}

pub fn trigger_file_input(input_id: &'static str) -> impl Fn() + Clone + 'static {
    move || {
        if let Some(input) = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id(input_id))
        {
            if let Ok(html_input) = input.dyn_into::<web_sys::HtmlElement>() {
                html_input.click();
            }
        }
    }
}
