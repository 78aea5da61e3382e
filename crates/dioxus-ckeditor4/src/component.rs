//! The `CKEditor` component: lifecycle, props, and instance creation.
//!
//! The editor script is fetched lazily on first mount, the instance is
//! created against a generated host element, and everything after that
//! is gated on the one-shot `instanceReady` hook. Teardown can overlap
//! any of those steps; a disposed flag set synchronously in `use_drop`
//! is checked at every async re-entry point. The flag lives outside the
//! component scope so callbacks firing after the scope is gone can
//! still read it.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};

use ckeditor4_js::{CkEditor, CkEventInfo, CkNamespace, DEFAULT_EDITOR_URL, ensure_namespace};
use dioxus::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use crate::config::{EditorType, merge_config, to_js};
use crate::events::{BridgeHandlers, Listener, emit, subscribe};
use crate::state::EditorState;

/// Host element ids must be unique even with several editors per page.
static NEXT_HOST_ID: AtomicUsize = AtomicUsize::new(0);

/// Teardown marker shared with JS callbacks.
///
/// Deliberately not a signal: the one-shot ready hook and the namespace
/// load continuation can run after the owning scope and its signals
/// have been dropped, and reading a dead signal panics.
#[derive(Clone, Default)]
struct DisposeFlag(Rc<Cell<bool>>);

impl DisposeFlag {
    fn dispose(&self) {
        self.0.set(true);
    }

    fn is_disposed(&self) -> bool {
        self.0.get()
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct CKEditorProps {
    /// Configuration passed through to the editor constructor, on top of
    /// the adapter's defaults (see `merge_config`).
    pub config: Option<serde_json::Value>,
    /// URL of the editor script; defaults to [`DEFAULT_EDITOR_URL`].
    pub editor_url: Option<String>,
    /// Tag of the generated element the editor is created over.
    /// Defaults to `textarea`.
    pub tag_name: Option<String>,
    /// Classic (framed) or inline interface.
    #[props(default)]
    pub editor_type: EditorType,

    /// One-way bound content. Ignored while `model` is bound.
    pub data: Option<String>,
    /// Bound read-only flag. When unset the editor's own configuration
    /// decides and the adapter never touches the flag.
    pub read_only: Option<bool>,
    /// Two-way content binding: prop writes go into the editor, edits
    /// come back through the signal.
    pub model: Option<Signal<String>>,

    /// The namespace became available (fires once per page at most).
    pub on_namespace_loaded: Option<EventHandler<CkNamespace>>,
    /// The instance finished initializing, including any initial-content
    /// replay.
    pub on_ready: Option<EventHandler<CkEditor>>,
    /// Content was loaded into the editing area; payload is the fresh
    /// content.
    pub on_data_ready: Option<EventHandler<String>>,
    /// Native change notification; payload is the fresh content.
    pub on_change: Option<EventHandler<String>>,
    /// The bound content actually changed (deduplicated against the
    /// last known value).
    pub on_data_change: Option<EventHandler<String>>,
    pub on_drag_start: Option<EventHandler<CkEventInfo>>,
    pub on_drag_end: Option<EventHandler<CkEventInfo>>,
    pub on_drop: Option<EventHandler<CkEventInfo>>,
    pub on_file_upload_request: Option<EventHandler<CkEventInfo>>,
    pub on_file_upload_response: Option<EventHandler<CkEventInfo>>,
    pub on_focus: Option<EventHandler<CkEventInfo>>,
    pub on_paste: Option<EventHandler<CkEventInfo>>,
    pub on_after_paste: Option<EventHandler<CkEventInfo>>,
    /// Also serves as the "touched" notification for form integration.
    pub on_blur: Option<EventHandler<CkEventInfo>>,
}

/// Everything the async creation path needs, detached from the props so
/// it can be moved into spawned futures and JS callbacks.
#[derive(Clone)]
struct CreateArgs {
    host_id: String,
    editor_url: Option<String>,
    config: Option<serde_json::Value>,
    tag_name: Option<String>,
    editor_type: EditorType,
    handlers: BridgeHandlers,
    state: Signal<EditorState<CkEditor>>,
    disposed: DisposeFlag,
    listeners: Signal<Vec<Listener>>,
    model: Option<Signal<String>>,
    on_namespace_loaded: Option<EventHandler<CkNamespace>>,
    on_ready: Option<EventHandler<CkEditor>>,
}

#[allow(non_snake_case)]
pub fn CKEditor(props: CKEditorProps) -> Element {
    let host_id = use_hook(|| {
        format!(
            "dioxus-ckeditor-{}",
            NEXT_HOST_ID.fetch_add(1, Ordering::Relaxed)
        )
    });
    let mut state = use_signal(EditorState::<CkEditor>::new);
    let disposed = use_hook(DisposeFlag::default);
    let mut listeners = use_signal(Vec::<Listener>::new);

    let handlers = BridgeHandlers {
        on_data_ready: props.on_data_ready,
        on_change: props.on_change,
        on_data_change: props.on_data_change,
        on_drag_start: props.on_drag_start,
        on_drag_end: props.on_drag_end,
        on_drop: props.on_drop,
        on_file_upload_request: props.on_file_upload_request,
        on_file_upload_response: props.on_file_upload_response,
        on_focus: props.on_focus,
        on_paste: props.on_paste,
        on_after_paste: props.on_after_paste,
        on_blur: props.on_blur,
    };
    let model = props.model;

    // Bound-content reconciliation. The first run of these effects
    // happens before the instance exists, so initial values are staged
    // and replayed on attach.
    let data = props.data.clone();
    use_effect(use_reactive!(|data| {
        if model.is_none() {
            if let Some(value) = data.as_deref() {
                state.write().set_data(value);
            }
        }
    }));

    let read_only = props.read_only;
    use_effect(use_reactive!(|read_only| {
        if let Some(flag) = read_only {
            state.write().set_read_only(flag);
        }
    }));

    use_effect(move || {
        if let Some(model) = model {
            let value = model();
            state.write().set_data(&value);
        }
    });

    // Set the flag before touching the instance so callbacks already in
    // flight observe it. An instance that has not reached ready yet is
    // destroyed by the ready hook itself, guarded by the same flag.
    let drop_flag = disposed.clone();
    use_drop(move || {
        drop_flag.dispose();
        if let Some(editor) = state.write().detach() {
            editor.destroy();
        }
        listeners.write().clear();
    });

    let create = CreateArgs {
        host_id: host_id.clone(),
        editor_url: props.editor_url.clone(),
        config: props.config.clone(),
        tag_name: props.tag_name.clone(),
        editor_type: props.editor_type,
        handlers,
        state,
        disposed: disposed.clone(),
        listeners,
        model,
        on_namespace_loaded: props.on_namespace_loaded,
        on_ready: props.on_ready,
    };

    rsx! {
        div {
            id: "{host_id}",
            class: "dioxus-ckeditor",
            onmounted: move |_| {
                let args = create.clone();
                spawn(async move { initialize(args).await });
            },
        }
    }
}

async fn initialize(args: CreateArgs) {
    let url = args.editor_url.as_deref().unwrap_or(DEFAULT_EDITOR_URL);
    let namespace = match ensure_namespace(url).await {
        Ok(namespace) => namespace,
        Err(err) => {
            // The component stays inert; the page keeps working.
            tracing::error!(error = %err, url, "editor script failed to load");
            return;
        }
    };
    if args.disposed.is_disposed() {
        return;
    }
    emit(&args.on_namespace_loaded, namespace.clone());
    create_instance(&namespace, args);
}

fn create_instance(namespace: &CkNamespace, args: CreateArgs) {
    let CreateArgs {
        host_id,
        config,
        tag_name,
        editor_type,
        handlers,
        mut state,
        disposed,
        mut listeners,
        model,
        on_ready,
        ..
    } = args;

    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };
    // Unmounted while the script was loading.
    let Some(host) = document.get_element_by_id(&host_id) else {
        tracing::debug!(host_id, "host element gone, skipping editor creation");
        return;
    };

    let tag = tag_name.as_deref().unwrap_or("textarea");
    let Ok(element) = document.create_element(tag) else {
        tracing::error!(tag, "could not create the editor host element");
        return;
    };
    if host.append_child(&element).is_err() {
        return;
    }

    let config = to_js(&merge_config(config.as_ref()));
    let editor = match editor_type {
        EditorType::Classic => namespace.replace(&element, &config),
        EditorType::Inline => namespace.inline(&element, &config),
    };

    let on_instance_ready = Closure::once_into_js(move |info: CkEventInfo| {
        let ready_editor = info.editor();
        // Torn down while the instance was booting. The scope and its
        // signals may already be gone; only the flag is safe to read,
        // and the fresh instance is ours to destroy.
        if disposed.is_disposed() {
            ready_editor.destroy();
            return;
        }
        let staged = state.write().attach(ready_editor.clone());
        listeners.set(subscribe(&ready_editor, handlers, state, model));
        match staged {
            Some(value) => replay_data(&ready_editor, &value, on_ready),
            None => emit(&on_ready, ready_editor),
        }
    });
    editor.once("instanceReady", on_instance_ready.unchecked_ref());
}

/// Writes staged content into a freshly ready instance.
///
/// The undo manager is locked around the write so the replay does not
/// land on the undo stack; the lock also suppresses the native `change`,
/// so when the content filter rewrote the value, one synthetic event is
/// fired to let the bound data converge on the normalized form.
fn replay_data(editor: &CkEditor, value: &str, on_ready: Option<EventHandler<CkEditor>>) {
    let undo = editor.undo_manager();
    if let Some(undo) = &undo {
        undo.lock();
    }

    let written = value.to_owned();
    let callback_editor = editor.clone();
    let callback = Closure::once_into_js(move || {
        if callback_editor.get_data() != written {
            if undo.is_some() {
                callback_editor.fire("change");
            } else {
                callback_editor.fire("dataReady");
            }
        }
        if let Some(undo) = &undo {
            undo.unlock();
        }
        emit(&on_ready, callback_editor);
    });

    let options = js_sys::Object::new();
    let _ = js_sys::Reflect::set(
        &options,
        &wasm_bindgen::JsValue::from_str("callback"),
        &callback,
    );
    editor.set_data_with_options(value, &options);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    thread_local! {
        static CAPTURED_FLAG: RefCell<Option<DisposeFlag>> = const { RefCell::new(None) };
    }

    fn flag_harness() -> Element {
        let flag = use_hook(DisposeFlag::default);
        let drop_flag = flag.clone();
        use_drop(move || drop_flag.dispose());
        CAPTURED_FLAG.with(|slot| *slot.borrow_mut() = Some(flag.clone()));
        rsx! {
            div {}
        }
    }

    /// The ready hook and the namespace-load continuation can fire after
    /// the component scope is gone. The teardown marker must stay
    /// readable then, and must already be set: whoever reads it skips
    /// creation (or destroys the fresh instance) instead of touching
    /// dead scope state.
    #[test]
    fn teardown_flag_survives_the_component_scope() {
        let mut vdom = VirtualDom::new(flag_harness);
        vdom.rebuild_in_place();

        let flag = CAPTURED_FLAG
            .with(|slot| slot.borrow_mut().take())
            .expect("harness ran");
        assert!(!flag.is_disposed());

        drop(vdom);
        assert!(flag.is_disposed());
    }

    /// Unmounting before initialization ever starts must tear down
    /// cleanly: no instance exists, nothing to destroy, no panic.
    #[test]
    fn unmount_before_initialization_is_quiet() {
        let mut vdom = VirtualDom::new(|| {
            rsx! {
                CKEditor {
                    data: "<p>never shown</p>".to_string(),
                    read_only: true,
                }
            }
        });
        vdom.rebuild_in_place();
        drop(vdom);
    }
}
