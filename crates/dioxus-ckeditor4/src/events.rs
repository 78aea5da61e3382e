//! Bridges native editor events into Dioxus event handlers.
//!
//! Subscriptions happen once, right after the instance reports ready.
//! The returned closures must outlive the editor instance; the component
//! keeps them in a signal and drops them after `destroy`.

use ckeditor4_js::{CkEditor, CkEventInfo};
use dioxus::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use crate::state::EditorState;

pub(crate) type Listener = Closure<dyn FnMut(CkEventInfo)>;

/// The handler set wired into native subscriptions.
///
/// `EventHandler` is a Copy wrapper around the component's scope, so the
/// whole set can be captured by each listener closure by value.
#[derive(Clone, Copy)]
pub(crate) struct BridgeHandlers {
    pub on_data_ready: Option<EventHandler<String>>,
    pub on_change: Option<EventHandler<String>>,
    pub on_data_change: Option<EventHandler<String>>,
    pub on_drag_start: Option<EventHandler<CkEventInfo>>,
    pub on_drag_end: Option<EventHandler<CkEventInfo>>,
    pub on_drop: Option<EventHandler<CkEventInfo>>,
    pub on_file_upload_request: Option<EventHandler<CkEventInfo>>,
    pub on_file_upload_response: Option<EventHandler<CkEventInfo>>,
    pub on_focus: Option<EventHandler<CkEventInfo>>,
    pub on_paste: Option<EventHandler<CkEventInfo>>,
    pub on_after_paste: Option<EventHandler<CkEventInfo>>,
    pub on_blur: Option<EventHandler<CkEventInfo>>,
}

pub(crate) fn emit<T: 'static>(handler: &Option<EventHandler<T>>, payload: T) {
    if let Some(handler) = handler {
        handler.call(payload);
    }
}

/// Which native event triggered a content read.
#[derive(Clone, Copy)]
enum DataEvent {
    DataReady,
    Changed,
}

/// Subscribes to every native event the adapter surfaces and returns the
/// closures backing the subscriptions.
pub(crate) fn subscribe(
    editor: &CkEditor,
    handlers: BridgeHandlers,
    mut state: Signal<EditorState<CkEditor>>,
    model: Option<Signal<String>>,
) -> Vec<Listener> {
    let mut listeners = Vec::new();

    let pass_through: [(&str, Option<EventHandler<CkEventInfo>>); 9] = [
        ("dragstart", handlers.on_drag_start),
        ("dragend", handlers.on_drag_end),
        ("drop", handlers.on_drop),
        ("fileUploadRequest", handlers.on_file_upload_request),
        ("fileUploadResponse", handlers.on_file_upload_response),
        ("focus", handlers.on_focus),
        ("paste", handlers.on_paste),
        ("afterPaste", handlers.on_after_paste),
        ("blur", handlers.on_blur),
    ];
    for (event, handler) in pass_through {
        let listener = Listener::new(move |info: CkEventInfo| emit(&handler, info));
        editor.on(event, listener.as_ref().unchecked_ref());
        listeners.push(listener);
    }

    // Content events share one path: emit the specific handler, then run
    // the fresh value through the cache so the combined change
    // notification and the bound model fire only on real changes (the
    // cache already holds values written from the framework side).
    let data_listener = |kind: DataEvent| {
        Listener::new(move |info: CkEventInfo| {
            let value = info.editor().get_data();
            match kind {
                DataEvent::DataReady => emit(&handlers.on_data_ready, value),
                DataEvent::Changed => emit(&handlers.on_change, value),
            }
            let fresh = state.write().sync_from_editor();
            if let Some(fresh) = fresh {
                emit(&handlers.on_data_change, fresh.clone());
                if let Some(mut model) = model {
                    model.set(fresh);
                }
            }
        })
    };

    let data_ready = data_listener(DataEvent::DataReady);
    editor.on("dataReady", data_ready.as_ref().unchecked_ref());
    listeners.push(data_ready);

    // Builds without the undo plugin never fire `change`; fall back to
    // the selection heartbeat there, gated by the cache comparison.
    let change_event = if editor.undo_manager().is_some() {
        "change"
    } else {
        "selectionCheck"
    };
    let changed = data_listener(DataEvent::Changed);
    editor.on(change_event, changed.as_ref().unchecked_ref());
    listeners.push(changed);

    listeners
}
