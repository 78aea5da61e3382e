//! Reconciliation between the framework-bound content and the live editor.
//!
//! Before the asynchronous initialization completes there is no editor to
//! talk to, so writes are staged locally; once the instance exists it is
//! the sole source of truth and the local copy is only kept to detect
//! no-op writes. The two phases are an explicit sum type rather than a
//! nullable handle, and the logic is generic over [`EditorBackend`] so it
//! can be exercised without a browser.

use ckeditor4_js::CkEditor;

/// The slice of the editor API the reconciliation logic needs.
pub(crate) trait EditorBackend {
    fn data(&self) -> String;
    fn set_data(&self, data: &str);
    fn read_only(&self) -> bool;
    fn set_read_only(&self, read_only: bool);
}

impl EditorBackend for CkEditor {
    fn data(&self) -> String {
        self.get_data()
    }

    fn set_data(&self, data: &str) {
        CkEditor::set_data(self, data);
    }

    fn read_only(&self) -> bool {
        CkEditor::read_only(self)
    }

    fn set_read_only(&self, read_only: bool) {
        CkEditor::set_read_only(self, read_only);
    }
}

/// Which storage location is authoritative.
enum Phase<B> {
    Detached,
    Live(B),
}

/// What a write to the bound content actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WriteOutcome {
    /// The value matched the last known content; nothing happened.
    Unchanged,
    /// No live editor yet; the value was staged for replay.
    Staged,
    /// Written through to the live editor.
    Applied,
}

pub(crate) struct EditorState<B> {
    phase: Phase<B>,
    cached_data: Option<String>,
    staged_read_only: Option<bool>,
}

impl<B: EditorBackend> EditorState<B> {
    pub(crate) fn new() -> Self {
        Self {
            phase: Phase::Detached,
            cached_data: None,
            staged_read_only: None,
        }
    }

    pub(crate) fn set_data(&mut self, value: &str) -> WriteOutcome {
        if self.cached_data.as_deref() == Some(value) {
            return WriteOutcome::Unchanged;
        }
        match &self.phase {
            Phase::Live(editor) => {
                editor.set_data(value);
                // The content filter may rewrite what was written; cache
                // what the editor actually holds so writing that value
                // again is a no-op.
                self.cached_data = Some(editor.data());
                WriteOutcome::Applied
            }
            Phase::Detached => {
                self.cached_data = Some(value.to_owned());
                WriteOutcome::Staged
            }
        }
    }

    pub(crate) fn data(&self) -> String {
        match &self.phase {
            Phase::Live(editor) => editor.data(),
            Phase::Detached => self.cached_data.clone().unwrap_or_default(),
        }
    }

    pub(crate) fn set_read_only(&mut self, read_only: bool) {
        match &self.phase {
            Phase::Live(editor) => editor.set_read_only(read_only),
            Phase::Detached => self.staged_read_only = Some(read_only),
        }
    }

    // The live flag is read through the public `CkEditor` binding; this
    // accessor only backs the reconciliation tests.
    #[cfg(test)]
    pub(crate) fn read_only(&self) -> bool {
        match &self.phase {
            Phase::Live(editor) => editor.read_only(),
            Phase::Detached => self.staged_read_only.unwrap_or(false),
        }
    }

    /// Transitions to `Live`, exactly once per adapter lifetime.
    ///
    /// Applies the staged read-only flag and hands back any staged
    /// content; the caller owns the replay write because that needs
    /// editor-specific change suppression.
    pub(crate) fn attach(&mut self, editor: B) -> Option<String> {
        if let Some(read_only) = self.staged_read_only.take() {
            editor.set_read_only(read_only);
        }
        self.phase = Phase::Live(editor);
        self.cached_data.clone()
    }

    /// Pulls the live content into the cache.
    ///
    /// Returns the fresh value when it differed from the cache, `None`
    /// when nothing changed (or no editor is live) — the gate that keeps
    /// redundant change notifications from going out.
    pub(crate) fn sync_from_editor(&mut self) -> Option<String> {
        let Phase::Live(editor) = &self.phase else {
            return None;
        };
        let fresh = editor.data();
        if self.cached_data.as_deref() == Some(fresh.as_str()) {
            return None;
        }
        self.cached_data = Some(fresh.clone());
        Some(fresh)
    }

    /// Takes the live editor out for destruction. The state never returns
    /// to `Live` within one adapter's lifetime.
    pub(crate) fn detach(&mut self) -> Option<B> {
        match std::mem::replace(&mut self.phase, Phase::Detached) {
            Phase::Live(editor) => Some(editor),
            Phase::Detached => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Inner {
        data: String,
        read_only: bool,
        data_writes: usize,
        read_only_writes: usize,
        filter: fn(&str) -> String,
    }

    #[derive(Clone)]
    struct MockEditor {
        inner: Rc<RefCell<Inner>>,
    }

    impl MockEditor {
        fn new(filter: fn(&str) -> String) -> Self {
            Self {
                inner: Rc::new(RefCell::new(Inner {
                    data: String::new(),
                    read_only: false,
                    data_writes: 0,
                    read_only_writes: 0,
                    filter,
                })),
            }
        }

        fn data_writes(&self) -> usize {
            self.inner.borrow().data_writes
        }

        fn read_only_writes(&self) -> usize {
            self.inner.borrow().read_only_writes
        }
    }

    impl EditorBackend for MockEditor {
        fn data(&self) -> String {
            self.inner.borrow().data.clone()
        }

        fn set_data(&self, data: &str) {
            let mut inner = self.inner.borrow_mut();
            inner.data_writes += 1;
            inner.data = (inner.filter)(data);
        }

        fn read_only(&self) -> bool {
            self.inner.borrow().read_only
        }

        fn set_read_only(&self, read_only: bool) {
            let mut inner = self.inner.borrow_mut();
            inner.read_only_writes += 1;
            inner.read_only = read_only;
        }
    }

    fn identity(value: &str) -> String {
        value.to_owned()
    }

    /// Mimics a content filter that normalizes bold markup and wraps
    /// loose text in a paragraph.
    fn paragraph_filter(value: &str) -> String {
        let value = value.replace("<b>", "<strong>").replace("</b>", "</strong>");
        format!("<p>{value}</p>\n")
    }

    #[test]
    fn writes_stage_before_the_editor_exists() {
        let mut state = EditorState::<MockEditor>::new();
        assert_eq!(state.set_data("<p>one</p>"), WriteOutcome::Staged);
        assert_eq!(state.data(), "<p>one</p>");
    }

    #[test]
    fn duplicate_write_is_a_noop_before_attach() {
        let mut state = EditorState::<MockEditor>::new();
        assert_eq!(state.set_data("<p>one</p>"), WriteOutcome::Staged);
        assert_eq!(state.set_data("<p>one</p>"), WriteOutcome::Unchanged);
    }

    #[test]
    fn duplicate_write_is_a_noop_after_attach() {
        let editor = MockEditor::new(identity);
        let mut state = EditorState::new();
        state.attach(editor.clone());

        assert_eq!(state.set_data("<p>one</p>"), WriteOutcome::Applied);
        assert_eq!(state.set_data("<p>one</p>"), WriteOutcome::Unchanged);
        assert_eq!(editor.data_writes(), 1);
    }

    #[test]
    fn write_through_caches_the_normalized_value() {
        let editor = MockEditor::new(paragraph_filter);
        let mut state = EditorState::new();
        state.attach(editor.clone());

        assert_eq!(state.set_data("<b>foo</b>"), WriteOutcome::Applied);
        assert_eq!(state.data(), "<p><strong>foo</strong></p>\n");
        // Writing the normalized form back is a no-op.
        assert_eq!(
            state.set_data("<p><strong>foo</strong></p>\n"),
            WriteOutcome::Unchanged
        );
        assert_eq!(editor.data_writes(), 1);
    }

    #[test]
    fn attach_returns_staged_content_for_replay() {
        let editor = MockEditor::new(paragraph_filter);
        let mut state = EditorState::new();
        state.set_data("<b>foo</b>");

        let staged = state.attach(editor.clone());
        assert_eq!(staged.as_deref(), Some("<b>foo</b>"));

        // The replay write happens outside the state machine (it needs
        // change suppression); afterwards one sync picks up the
        // normalized value and a second reports nothing new.
        editor.set_data("<b>foo</b>");
        assert_eq!(
            state.sync_from_editor().as_deref(),
            Some("<p><strong>foo</strong></p>\n")
        );
        assert_eq!(state.sync_from_editor(), None);
    }

    #[test]
    fn attach_without_staged_content_returns_none() {
        let mut state = EditorState::new();
        assert_eq!(state.attach(MockEditor::new(identity)), None);
    }

    #[test]
    fn read_only_staged_then_replayed_on_attach() {
        let editor = MockEditor::new(identity);
        let mut state = EditorState::new();

        state.set_read_only(true);
        assert!(state.read_only());
        assert_eq!(editor.read_only_writes(), 0);

        state.attach(editor.clone());
        assert!(editor.read_only());
        assert_eq!(editor.read_only_writes(), 1);
        assert!(state.read_only());
    }

    #[test]
    fn read_only_delegates_once_live() {
        let editor = MockEditor::new(identity);
        let mut state = EditorState::new();
        state.attach(editor.clone());

        state.set_read_only(true);
        assert!(editor.read_only());
        assert!(state.read_only());
    }

    #[test]
    fn attach_leaves_read_only_alone_when_never_set() {
        let editor = MockEditor::new(identity);
        let mut state = EditorState::new();
        state.attach(editor.clone());
        assert_eq!(editor.read_only_writes(), 0);
    }

    #[test]
    fn sync_without_live_editor_reports_nothing() {
        let mut state = EditorState::<MockEditor>::new();
        state.set_data("<p>staged</p>");
        assert_eq!(state.sync_from_editor(), None);
    }

    #[test]
    fn detach_yields_the_editor_exactly_once() {
        let editor = MockEditor::new(identity);
        let mut state = EditorState::new();
        state.attach(editor);

        assert!(state.detach().is_some());
        assert!(state.detach().is_none());
    }

    #[test]
    fn data_falls_back_to_cache_after_detach() {
        let editor = MockEditor::new(identity);
        let mut state = EditorState::new();
        state.attach(editor);
        state.set_data("<p>last</p>");
        state.detach();

        assert_eq!(state.data(), "<p>last</p>");
    }
}
