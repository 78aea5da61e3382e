//! CKEditor 4 as a Dioxus component.
//!
//! The editing engine itself is an opaque third-party script loaded at
//! runtime (see `ckeditor4-js`); this crate adapts its callback-style
//! event API to Dioxus props, event handlers, and signals.
//!
//! # Architecture
//!
//! - `state`: which storage is authoritative — the staged cache before
//!   the instance exists, the live editor afterwards
//! - `config`: interface type and configuration merging
//! - `events`: subscription wiring from native editor events into the
//!   framework's reactive context
//! - `component`: the [`CKEditor`] component and its lifecycle
//!
//! # Example
//!
//! ```ignore
//! let content = use_signal(|| "<p>Hello</p>".to_string());
//! rsx! {
//!     CKEditor { model: content }
//!     pre { "{content}" }
//! }
//! ```

mod component;
mod config;
mod events;
mod state;

pub use component::{CKEditor, CKEditorProps};
pub use config::EditorType;

// The interop layer, re-exported so consumers only need one dependency.
pub use ckeditor4_js::{
    CkEditor, CkEventInfo, CkNamespace, CkUndoManager, DEFAULT_EDITOR_URL, NamespaceError,
    ensure_namespace,
};
