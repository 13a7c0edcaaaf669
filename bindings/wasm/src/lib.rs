// WebAssembly bindings: decode brightness samples gathered in the browser
use js_sys::Array;
use morse_video_core::patterns::{alphabet, pattern_to_string};
use morse_video_core::synth::{signal_to_intensities, synthesize_signal};
use morse_video_core::types::MorseDecodeParams;
use wasm_bindgen::prelude::*;

mod support;

use support::{parse_with_defaults, to_js_error};

// Console logging for debugging
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

macro_rules! console_log {
    ($($t:tt)*) => (log(&format_args!($($t)*).to_string()))
}

#[wasm_bindgen]
pub struct MorseDecodeResult {
    text: String,
    frames: usize,
}

#[wasm_bindgen]
impl MorseDecodeResult {
    #[wasm_bindgen(getter)]
    pub fn text(&self) -> String {
        self.text.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn frames(&self) -> usize {
        self.frames
    }
}

/// Decode one brightness value per video frame into text.
#[wasm_bindgen]
pub fn decode_intensities(
    intensities: &[u8],
    config_json: &str,
) -> Result<MorseDecodeResult, JsValue> {
    let params = parse_with_defaults::<MorseDecodeParams>(config_json);
    console_log!(
        "decoding {} frames (tolerance {})",
        intensities.len(),
        params.tolerance
    );

    let text = morse_video_core::decode_intensities(intensities, &params).map_err(to_js_error)?;

    Ok(MorseDecodeResult {
        text,
        frames: intensities.len(),
    })
}

/// High and low run durations (in frames) as `{ highs, lows }`.
#[wasm_bindgen]
pub fn measure_runs(intensities: &[u8], config_json: &str) -> Result<JsValue, JsValue> {
    let params = parse_with_defaults::<MorseDecodeParams>(config_json);
    let threshold =
        morse_video_core::compute_threshold(intensities, params.tolerance).map_err(to_js_error)?;
    let signal = morse_video_core::binarize(intensities, threshold);
    let edges = morse_video_core::extract_edges(&signal);
    let indices = morse_video_core::edge_indices(&edges);
    let runs = morse_video_core::signal_runs(&edges, &indices);

    serde_wasm_bindgen::to_value(&runs).map_err(JsValue::from)
}

#[wasm_bindgen]
pub fn compute_threshold(samples: &[u32], tolerance: u32) -> Result<u32, JsValue> {
    morse_video_core::compute_threshold(samples, tolerance).map_err(to_js_error)
}

/// Ideal brightness trace for `text`, handy for testing capture setups.
#[wasm_bindgen]
pub fn synthesize_intensities(text: &str, unit_frames: usize, low: u8, high: u8) -> Vec<u8> {
    signal_to_intensities(&synthesize_signal(text, unit_frames), low, high)
}

/// The alphabet as `[character, pattern]` pairs, e.g. `["A", ".-"]`.
#[wasm_bindgen]
pub fn morse_alphabet() -> Array {
    let array = Array::new();
    for (ch, pattern) in alphabet() {
        let pair = Array::new();
        pair.push(&JsValue::from_str(&ch.to_string()));
        pair.push(&JsValue::from_str(&pattern_to_string(pattern)));
        array.push(&pair);
    }
    array
}
