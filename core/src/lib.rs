// Morse code recovery from a blinking light in grayscale video
// Brightness per frame -> on/off signal -> run durations -> text

pub mod edges;
pub mod error;
pub mod interpret;
pub mod patterns;
pub mod synth;
pub mod threshold;
pub mod types;
pub mod video;

// Re-export main public API
pub use edges::{edge_indices, extract_edges, signal_runs};
pub use error::{DecodeError, Result};
pub use interpret::morse_decode;
pub use threshold::{binarize, compute_threshold};
pub use types::*;
pub use video::{frame_maxes, FfmpegSource, FrameMaxes};

use log::debug;
use std::path::Path;

/// Decode the Morse message blinking in a sequence of per-frame intensities.
///
/// The on/off threshold and both timing boundaries are measured from the
/// input itself. An empty sequence is an error; a signal without a single
/// complete on-run decodes to an empty string.
pub fn decode_intensities(intensities: &[u8], params: &MorseDecodeParams) -> Result<String> {
    let threshold = compute_threshold(intensities, params.tolerance)?;
    let signal = binarize(intensities, threshold);
    let edges = extract_edges(&signal);
    let indices = edge_indices(&edges);
    debug!(
        "intensity threshold {} over {} frames, {} transitions",
        threshold,
        intensities.len(),
        indices.len()
    );

    let runs = signal_runs(&edges, &indices);
    if runs.highs.is_empty() {
        return Ok(String::new());
    }
    if let Some(&tone) = runs.highs.first() {
        if runs.highs.iter().all(|&duration| duration == tone) {
            return Err(DecodeError::UniformTones(tone));
        }
    }

    // Off-runs double as element gaps (dot length) and symbol gaps (dash
    // length), so the long ones split into symbol and word gaps.
    let dot_dash_boundary = compute_threshold(&runs.highs, params.tolerance)?;
    let long_lows: Vec<u32> = runs
        .lows
        .iter()
        .copied()
        .filter(|&duration| duration > dot_dash_boundary)
        .collect();
    let symbols_word_boundary = if long_lows.is_empty() {
        // no run can end a character, so the boundary is never consulted
        dot_dash_boundary
    } else {
        compute_threshold(&long_lows, params.tolerance)?
    };
    debug!(
        "dot/dash boundary {} frames, symbol/word boundary {} frames",
        dot_dash_boundary, symbols_word_boundary
    );

    Ok(morse_decode(
        &edges,
        &indices,
        dot_dash_boundary,
        symbols_word_boundary,
    ))
}

/// Decode the Morse message in the video file at `path`.
pub fn decode_morse_video(
    path: &Path,
    params: &MorseDecodeParams,
    ffmpeg_params: &FfmpegParams,
) -> Result<String> {
    let intensities = frame_maxes(path, ffmpeg_params)?.collect::<Result<Vec<u8>>>()?;
    decode_intensities(&intensities, params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::{signal_to_intensities, synthesize_signal};

    fn blink(text: &str, unit_frames: usize) -> Vec<u8> {
        signal_to_intensities(&synthesize_signal(text, unit_frames), 16, 220)
    }

    #[test]
    fn test_empty_intensities() {
        let result = decode_intensities(&[], &MorseDecodeParams::default());
        assert!(matches!(result, Err(DecodeError::EmptySignal)));
    }

    #[test]
    fn test_constant_signal() {
        let params = MorseDecodeParams::default();
        assert_eq!(decode_intensities(&[40; 25], &params).unwrap(), "");
        assert_eq!(decode_intensities(&[7], &params).unwrap(), "");
    }

    #[test]
    fn test_single_transition() {
        let intensities = [10, 10, 10, 200, 200, 200, 200];
        let result = decode_intensities(&intensities, &MorseDecodeParams::default()).unwrap();
        assert_eq!(result, "");
    }

    #[test]
    fn test_sos() {
        let result = decode_intensities(&blink("SOS", 2), &MorseDecodeParams::default()).unwrap();
        assert_eq!(result, "SOS");
    }

    #[test]
    fn test_words_and_digits() {
        let result =
            decode_intensities(&blink("CQ DE K7ABC", 3), &MorseDecodeParams::default()).unwrap();
        assert_eq!(result, "CQ DE K7ABC");
    }

    #[test]
    fn test_noisy_levels() {
        // Uneven brightness within each level
        let intensities: Vec<u8> = synthesize_signal("PARIS", 4)
            .iter()
            .enumerate()
            .map(|(i, &on)| {
                let wobble = (i % 5) as u8 * 3;
                if on {
                    200 - wobble
                } else {
                    20 + wobble
                }
            })
            .collect();
        let result = decode_intensities(&intensities, &MorseDecodeParams::default()).unwrap();
        assert_eq!(result, "PARIS");
    }

    #[test]
    fn test_decoding_is_repeatable() {
        let intensities = blink("HELLO WORLD", 2);
        let params = MorseDecodeParams::default();
        let first = decode_intensities(&intensities, &params).unwrap();
        let second = decode_intensities(&intensities, &params).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, "HELLO WORLD");
    }

    #[test]
    fn test_missing_video_propagates() {
        let result = decode_morse_video(
            Path::new("/nonexistent/lamp.avi"),
            &MorseDecodeParams::default(),
            &FfmpegParams::default(),
        );
        assert!(matches!(result, Err(DecodeError::VideoNotFound(_))));
    }

    #[test]
    fn test_all_dots_is_an_error() {
        let result = decode_intensities(&blink("EEE", 3), &MorseDecodeParams::default());
        assert!(matches!(result, Err(DecodeError::UniformTones(3))));
        let result = decode_intensities(&blink("HI 5", 2), &MorseDecodeParams::default());
        assert!(matches!(result, Err(DecodeError::UniformTones(2))));
    }

    #[test]
    fn test_all_dashes_is_an_error() {
        let result = decode_intensities(&blink("TOM", 3), &MorseDecodeParams::default());
        assert!(matches!(result, Err(DecodeError::UniformTones(9))));
        let result = decode_intensities(&blink("T", 2), &MorseDecodeParams::default());
        assert!(matches!(result, Err(DecodeError::UniformTones(6))));
    }

    #[test]
    fn test_one_dot_and_one_dash() {
        let result = decode_intensities(&blink("ET", 3), &MorseDecodeParams::default()).unwrap();
        assert_eq!(result, "ET");
    }
}
