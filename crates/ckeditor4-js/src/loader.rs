//! Lazy, memoized loading of the editor script.
//!
//! The namespace is a process-wide singleton: it is created at most once
//! and outlives every adapter instance. While the script is downloading,
//! the pending promise is kept in a thread-local slot and handed out to
//! every concurrent caller, so at most one `<script>` fetch happens no
//! matter how many editors mount at the same time. The slot is cleared
//! when the load settles, which lets a later call retry after a failure.

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::bindings::CkNamespace;

/// Default CDN location of the standard-all CKEditor 4 build.
pub const DEFAULT_EDITOR_URL: &str = "https://cdn.ckeditor.com/4.22.1/standard-all/ckeditor.js";

const NAMESPACE_GLOBAL: &str = "CKEDITOR";

thread_local! {
    static PENDING_LOAD: RefCell<Option<js_sys::Promise>> = const { RefCell::new(None) };
}

/// Errors produced while resolving the editor namespace.
#[derive(Debug, thiserror::Error)]
pub enum NamespaceError {
    /// The caller passed an empty script URL.
    #[error("editor URL must be a non-empty string")]
    EmptyUrl,
    /// No browser `document` to inject the script into.
    #[error("browser document is not available")]
    NoDocument,
    /// The script failed to fetch or evaluate.
    #[error("failed to load editor script from {url}: {message}")]
    ScriptLoad { url: String, message: String },
}

/// Returns the global namespace if the editor script has already run.
pub fn global_namespace() -> Option<CkNamespace> {
    let window = web_sys::window()?;
    let value = js_sys::Reflect::get(&window, &JsValue::from_str(NAMESPACE_GLOBAL)).ok()?;
    if value.is_undefined() || value.is_null() {
        None
    } else {
        Some(value.unchecked_into())
    }
}

/// Resolves the editor namespace, fetching the script at `url` if needed.
///
/// Concurrent callers share one in-flight load and resolve to the same
/// namespace object. There is no retry policy beyond "the next call after
/// settlement starts fresh", and no timeout beyond the browser's own.
pub async fn ensure_namespace(url: &str) -> Result<CkNamespace, NamespaceError> {
    if url.is_empty() {
        return Err(NamespaceError::EmptyUrl);
    }
    if let Some(namespace) = global_namespace() {
        return Ok(namespace);
    }

    let promise = pending_or_start(url)?;
    match JsFuture::from(promise).await {
        Ok(value) => Ok(value.unchecked_into()),
        Err(err) => Err(NamespaceError::ScriptLoad {
            url: url.to_owned(),
            message: error_message(&err),
        }),
    }
}

fn pending_or_start(url: &str) -> Result<js_sys::Promise, NamespaceError> {
    PENDING_LOAD.with(|slot| {
        if let Some(promise) = slot.borrow().clone() {
            return Ok(promise);
        }
        let promise = start_script_load(url)?;
        // Clear on settlement, attached to the stored promise itself.
        // Clearing from inside the executor is wrong: its failure paths
        // run before the store, and the slot would keep a dead rejected
        // promise forever.
        let on_settled: Closure<dyn FnMut(JsValue)> =
            Closure::once(move |_value: JsValue| clear_pending());
        let _ = promise.then2(&on_settled, &on_settled);
        on_settled.forget();
        *slot.borrow_mut() = Some(promise.clone());
        Ok(promise)
    })
}

fn clear_pending() {
    PENDING_LOAD.with(|slot| {
        slot.borrow_mut().take();
    });
}

fn start_script_load(url: &str) -> Result<js_sys::Promise, NamespaceError> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or(NamespaceError::NoDocument)?;
    let head = document.head().ok_or(NamespaceError::NoDocument)?;
    let url = url.to_owned();

    tracing::debug!("injecting editor script from {url}");

    let mut executor = |resolve: js_sys::Function, reject: js_sys::Function| {
        let script: web_sys::HtmlScriptElement = match document.create_element("script") {
            Ok(element) => element.unchecked_into(),
            Err(err) => {
                let _ = reject.call1(&JsValue::UNDEFINED, &err);
                return;
            }
        };
        script.set_src(&url);

        let load_url = url.clone();
        let load_reject = reject.clone();
        let onload = Closure::once_into_js(move || {
            match global_namespace() {
                Some(namespace) => {
                    tracing::debug!("editor namespace ready from {load_url}");
                    let _ = resolve.call1(&JsValue::UNDEFINED, &namespace);
                }
                None => {
                    let message =
                        format!("script at {load_url} did not define the {NAMESPACE_GLOBAL} global");
                    let _ = load_reject.call1(&JsValue::UNDEFINED, &js_sys::Error::new(&message));
                }
            }
        });
        script.set_onload(Some(onload.unchecked_ref()));

        let error_url = url.clone();
        let error_reject = reject.clone();
        let onerror = Closure::once_into_js(move |_event: web_sys::Event| {
            let message = format!("failed to fetch editor script from {error_url}");
            let _ = error_reject.call1(&JsValue::UNDEFINED, &js_sys::Error::new(&message));
        });
        script.set_onerror(Some(onerror.unchecked_ref()));

        if let Err(err) = head.append_child(&script) {
            let _ = reject.call1(&JsValue::UNDEFINED, &err);
        }
    };
    Ok(js_sys::Promise::new(&mut executor))
}

fn error_message(err: &JsValue) -> String {
    err.dyn_ref::<js_sys::Error>()
        .map(|error| String::from(error.message()))
        .unwrap_or_else(|| format!("{err:?}"))
}
