use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

/// Transition between two consecutive samples of a binary signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(i8)]
pub enum Edge {
    Falling = -1,
    Steady = 0,
    Rising = 1,
}

impl Edge {
    /// Edge from sample `from` to sample `to`.
    pub fn between(from: bool, to: bool) -> Self {
        match (from, to) {
            (false, true) => Edge::Rising,
            (true, false) => Edge::Falling,
            _ => Edge::Steady,
        }
    }

    pub fn is_transition(self) -> bool {
        self != Edge::Steady
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MorseElement {
    Dot,
    Dash,
}

/// Durations (in frames) of every fully bounded run, split by polarity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalRuns {
    pub highs: Vec<u32>,
    pub lows: Vec<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MorseDecodeParams {
    /// Largest threshold change still treated as converged.
    pub tolerance: u32,
}

impl Default for MorseDecodeParams {
    fn default() -> Self {
        Self { tolerance: 1 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FfmpegParams {
    pub ffmpeg_bin: String,
    pub ffprobe_bin: String,
}

impl Default for FfmpegParams {
    fn default() -> Self {
        Self {
            ffmpeg_bin: "ffmpeg".to_string(),
            ffprobe_bin: "ffprobe".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_between() {
        assert_eq!(Edge::between(false, true), Edge::Rising);
        assert_eq!(Edge::between(true, false), Edge::Falling);
        assert_eq!(Edge::between(true, true), Edge::Steady);
        assert_eq!(Edge::between(false, false), Edge::Steady);
    }

    #[test]
    fn test_edge_serializes_as_signed_step() {
        let json = serde_json::to_string(&[Edge::Falling, Edge::Steady, Edge::Rising]).unwrap();
        assert_eq!(json, "[-1,0,1]");
    }

    #[test]
    fn test_decode_params_json_deserialization() {
        // Empty JSON falls back to defaults
        let params: MorseDecodeParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.tolerance, 1);

        let params: MorseDecodeParams = serde_json::from_str(r#"{"tolerance": 3}"#).unwrap();
        assert_eq!(params.tolerance, 3);
    }

    #[test]
    fn test_ffmpeg_params_json_deserialization() {
        let json = r#"{"ffmpegBin": "/opt/ffmpeg/bin/ffmpeg"}"#;
        let params: FfmpegParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.ffmpeg_bin, "/opt/ffmpeg/bin/ffmpeg");
        assert_eq!(params.ffprobe_bin, "ffprobe"); // default
    }
}
