use crate::patterns::{lookup_character, pattern_to_string};
use crate::types::{Edge, MorseElement};
use log::trace;

/// Placeholder for a pattern that is not in the alphabet.
pub const UNKNOWN_CHARACTER: char = '?';

/// Classification of one bounded off-run.
#[derive(Debug, Clone, Copy, PartialEq)]
enum GapType {
    IntraCharacter, // between dots/dashes of one character
    InterCharacter, // ends a character
    Word,           // ends a character and a word
}

/// Duration boundaries calibrated from the signal itself.
#[derive(Debug, Clone, Copy)]
struct MorseTimings {
    dot_dash_boundary: u32,
    symbols_word_boundary: u32,
}

impl MorseTimings {
    fn classify_element(&self, duration: u32) -> MorseElement {
        if duration < self.dot_dash_boundary {
            MorseElement::Dot
        } else {
            MorseElement::Dash
        }
    }

    fn classify_gap(&self, duration: u32) -> GapType {
        if duration <= self.dot_dash_boundary {
            GapType::IntraCharacter
        } else if duration <= self.symbols_word_boundary {
            GapType::InterCharacter
        } else {
            GapType::Word
        }
    }
}

/// Decoder state while walking the runs between edges
struct MorseParser {
    timings: MorseTimings,
    signal_high: bool,
    pattern: Vec<MorseElement>,
    message: String,
}

impl MorseParser {
    fn new(timings: MorseTimings, first_edge: Edge) -> Self {
        Self {
            timings,
            signal_high: first_edge == Edge::Rising,
            pattern: Vec::new(),
            message: String::new(),
        }
    }

    fn feed(&mut self, duration: u32) {
        if self.signal_high {
            let element = self.timings.classify_element(duration);
            self.pattern.push(element);
        } else {
            match self.timings.classify_gap(duration) {
                GapType::IntraCharacter => {}
                GapType::InterCharacter => self.finish_character(),
                GapType::Word => {
                    self.finish_character();
                    self.message.push(' ');
                }
            }
        }
        self.signal_high = !self.signal_high;
    }

    fn finish_character(&mut self) {
        let ch = lookup_character(&self.pattern).unwrap_or(UNKNOWN_CHARACTER);
        trace!("{} -> {}", pattern_to_string(&self.pattern), ch);
        self.message.push(ch);
        self.pattern.clear();
    }

    // A pattern still buffered here was never closed by an off-run and is dropped.
    fn finish(self) -> String {
        self.message
    }
}

/// Decode the Morse message carried by `edges`.
///
/// Only runs bounded by two edges are classified. On-runs shorter than
/// `dot_dash_boundary` are dots, the rest dashes. Off-runs longer than
/// `dot_dash_boundary` end a character, and off-runs longer than
/// `symbols_word_boundary` also end a word. A character whose closing
/// off-run is never seen is not emitted.
pub fn morse_decode(
    edges: &[Edge],
    edge_indices: &[usize],
    dot_dash_boundary: u32,
    symbols_word_boundary: u32,
) -> String {
    let Some(&first_edge) = edge_indices.first().and_then(|&first| edges.get(first)) else {
        return String::new();
    };

    let timings = MorseTimings {
        dot_dash_boundary,
        symbols_word_boundary,
    };
    let mut parser = MorseParser::new(timings, first_edge);

    for pair in edge_indices.windows(2) {
        parser.feed((pair[1] - pair[0]) as u32);
    }

    parser.finish()
}
