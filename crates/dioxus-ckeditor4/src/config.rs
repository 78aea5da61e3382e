//! Editor interface type and configuration merging.

use serde::Serialize;
use serde_json::{Value, json};
use wasm_bindgen::JsValue;

/// Which editor interface to create over the host element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditorType {
    /// A framed editor with its own chrome, replacing the host element.
    #[default]
    Classic,
    /// An inline editor editing the host element in place.
    Inline,
}

/// Builds the configuration object passed to the editor constructor.
///
/// Creation is deferred until the host element is in the document, but
/// the editor script can still observe a detached element in edge cases
/// (the component unmounting mid-flight), so `delayIfDetached` is set by
/// default. User-supplied keys override it.
pub(crate) fn merge_config(user: Option<&Value>) -> Value {
    let mut config = json!({ "delayIfDetached": true });
    if let (Some(base), Some(Value::Object(overrides))) = (config.as_object_mut(), user) {
        for (key, value) in overrides {
            base.insert(key.clone(), value.clone());
        }
    }
    config
}

/// Serializes the merged configuration into a plain JS object.
///
/// Uses the JSON-compatible serializer so maps become objects, not
/// `Map` instances, which is what the editor script expects.
pub(crate) fn to_js(config: &Value) -> JsValue {
    config
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .unwrap_or(JsValue::UNDEFINED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_delayed_creation() {
        let config = merge_config(None);
        assert_eq!(config["delayIfDetached"], json!(true));
    }

    #[test]
    fn user_keys_are_merged_in() {
        let user = json!({ "height": 200, "language": "de" });
        let config = merge_config(Some(&user));
        assert_eq!(config["delayIfDetached"], json!(true));
        assert_eq!(config["height"], json!(200));
        assert_eq!(config["language"], json!("de"));
    }

    #[test]
    fn user_keys_override_defaults() {
        let user = json!({ "delayIfDetached": false });
        let config = merge_config(Some(&user));
        assert_eq!(config["delayIfDetached"], json!(false));
    }

    #[test]
    fn non_object_user_config_is_ignored() {
        let config = merge_config(Some(&json!("bogus")));
        assert_eq!(config, json!({ "delayIfDetached": true }));
    }
}
