//! Bindings and loader for the CKEditor 4 browser global.
//!
//! CKEditor 4 is not an npm-style module: it installs itself as a single
//! `CKEDITOR` global when its script is evaluated. This crate covers the
//! two things a Rust embedding needs from that arrangement:
//!
//! - `bindings`: typed wasm-bindgen views of the namespace, editor
//!   instances, event-info objects, and the optional undo manager
//! - `loader`: one-shot script injection that memoizes the in-flight
//!   load, so any number of concurrent callers share a single fetch
//!
//! Consumers never touch the global directly; they hold the
//! [`CkNamespace`] handle returned by [`ensure_namespace`].

pub mod bindings;
pub mod loader;

pub use bindings::{CkEditor, CkEventInfo, CkNamespace, CkUndoManager};
pub use loader::{DEFAULT_EDITOR_URL, NamespaceError, ensure_namespace, global_namespace};
