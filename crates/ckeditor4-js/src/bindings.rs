//! wasm-bindgen bindings for the CKEditor 4 API surface.
//!
//! These are custom structural bindings: the objects only exist after the
//! editor script has been evaluated at runtime, so there is nothing for
//! web-sys to type. Only the surface the adapter consumes is bound.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// The `CKEDITOR` namespace object installed by the editor script.
    pub type CkNamespace;

    /// Replaces the given element with a classic, chrome-wrapped editor.
    #[wasm_bindgen(method, structural)]
    pub fn replace(this: &CkNamespace, element: &web_sys::Element, config: &JsValue) -> CkEditor;

    /// Attaches an inline editor to the given element.
    #[wasm_bindgen(method, structural)]
    pub fn inline(this: &CkNamespace, element: &web_sys::Element, config: &JsValue) -> CkEditor;

    /// The editor build version, e.g. `"4.22.1"`.
    #[wasm_bindgen(method, getter, structural)]
    pub fn version(this: &CkNamespace) -> String;

    /// One live editor instance, as returned by `replace`/`inline`.
    pub type CkEditor;

    /// Reads the editor's current (filtered) document content.
    #[wasm_bindgen(method, structural, js_name = getData)]
    pub fn get_data(this: &CkEditor) -> String;

    /// Writes document content. The editor's content filter may normalize
    /// the markup; read it back with [`CkEditor::get_data`].
    #[wasm_bindgen(method, structural, js_name = setData)]
    pub fn set_data(this: &CkEditor, data: &str);

    /// `setData` with an options object (`{ callback }` invoked once the
    /// content has been loaded into the editing area).
    #[wasm_bindgen(method, structural, js_name = setData)]
    pub fn set_data_with_options(this: &CkEditor, data: &str, options: &JsValue);

    #[wasm_bindgen(method, structural, js_name = setReadOnly)]
    pub fn set_read_only(this: &CkEditor, read_only: bool);

    #[wasm_bindgen(method, getter, structural, js_name = readOnly)]
    pub fn read_only(this: &CkEditor) -> bool;

    /// Destroys the instance and detaches it from the DOM.
    #[wasm_bindgen(method, structural)]
    pub fn destroy(this: &CkEditor);

    /// Subscribes `listener` to a native editor event.
    #[wasm_bindgen(method, structural)]
    pub fn on(this: &CkEditor, event: &str, listener: &js_sys::Function);

    /// Subscribes `listener` to the first occurrence of a native event.
    #[wasm_bindgen(method, structural)]
    pub fn once(this: &CkEditor, event: &str, listener: &js_sys::Function);

    /// Fires a native editor event with no payload.
    #[wasm_bindgen(method, structural)]
    pub fn fire(this: &CkEditor, event: &str);

    /// The undo plugin's manager, when that plugin is part of the build.
    #[wasm_bindgen(method, getter, structural, js_name = undoManager)]
    pub fn undo_manager(this: &CkEditor) -> Option<CkUndoManager>;

    /// The undo manager of a single editor instance.
    pub type CkUndoManager;

    /// Stops recording undo snapshots; also suppresses `change` events.
    #[wasm_bindgen(method, structural)]
    pub fn lock(this: &CkUndoManager);

    #[wasm_bindgen(method, structural)]
    pub fn unlock(this: &CkUndoManager);

    /// The event-info object CKEditor passes to every listener.
    pub type CkEventInfo;

    /// The native event name, e.g. `"instanceReady"`.
    #[wasm_bindgen(method, getter, structural)]
    pub fn name(this: &CkEventInfo) -> String;

    /// The editor instance the event originated from.
    #[wasm_bindgen(method, getter, structural)]
    pub fn editor(this: &CkEventInfo) -> CkEditor;
}

// The generated binding types don't derive `Clone`; a clone is another
// handle to the same underlying JS object.
impl Clone for CkNamespace {
    fn clone(&self) -> Self {
        JsValue::from(self).unchecked_into()
    }
}

impl Clone for CkEditor {
    fn clone(&self) -> Self {
        JsValue::from(self).unchecked_into()
    }
}
