// Support utilities for WASM bindings
use serde::de::DeserializeOwned;

/// Parse JSON config with defaults
/// Returns the deserialized config or the default value if parsing fails or config is empty
pub fn parse_with_defaults<T: DeserializeOwned + Default>(config_json: &str) -> T {
    if config_json.trim().is_empty() || config_json == "{}" {
        return T::default();
    }

    match serde_json::from_str::<T>(config_json) {
        Ok(params) => params,
        Err(e) => {
            warn(&format!("Ignoring invalid config JSON ({e}), using defaults"));
            T::default()
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn warn(message: &str) {
    web_sys::console::warn_1(&message.into());
}

#[cfg(not(target_arch = "wasm32"))]
fn warn(_message: &str) {}

/// Map a core error onto the JS error channel
pub fn to_js_error(error: morse_video_core::DecodeError) -> wasm_bindgen::JsValue {
    wasm_bindgen::JsValue::from_str(&error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use morse_video_core::MorseDecodeParams;

    #[test]
    fn test_empty_config_uses_defaults() {
        let params: MorseDecodeParams = parse_with_defaults("");
        assert_eq!(params.tolerance, 1);
        let params: MorseDecodeParams = parse_with_defaults("{}");
        assert_eq!(params.tolerance, 1);
    }

    #[test]
    fn test_partial_config() {
        let params: MorseDecodeParams = parse_with_defaults(r#"{"tolerance": 2}"#);
        assert_eq!(params.tolerance, 2);
    }

    #[test]
    fn test_invalid_config_uses_defaults() {
        let params: MorseDecodeParams = parse_with_defaults("{tolerance:");
        assert_eq!(params.tolerance, 1);
    }
}
