//! Two editors on one page: a classic one with a two-way bound model and
//! a read-only toggle, and an inline one over a plain div.

use dioxus::prelude::*;
use dioxus_ckeditor4::{CKEditor, EditorType};

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let content = use_signal(|| "<p>Hello from <b>Dioxus</b>!</p>".to_string());
    let mut read_only = use_signal(|| false);
    let mut ready_count = use_signal(|| 0usize);

    rsx! {
        h1 { "CKEditor 4 + Dioxus" }

        label {
            input {
                r#type: "checkbox",
                checked: read_only(),
                onchange: move |event| read_only.set(event.checked()),
            }
            " read-only"
        }

        CKEditor {
            model: content,
            read_only: read_only(),
            config: serde_json::json!({ "height": 200 }),
            on_ready: move |_| ready_count += 1,
        }
        p { "editors ready: {ready_count}" }

        h2 { "Live data" }
        pre { "{content}" }

        h2 { "Inline" }
        CKEditor {
            editor_type: EditorType::Inline,
            tag_name: "div".to_string(),
            data: "<p>Click to edit inline.</p>".to_string(),
        }
    }
}
