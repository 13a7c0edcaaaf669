// Ideal on/off frame signals for known text, used to exercise the decoder
use crate::patterns::get_morse_pattern;
use crate::types::MorseElement;

// ITU timing in dot units
const DOTS_PER_DASH: usize = 3;
const DOTS_PER_ELEMENT_GAP: usize = 1;
const DOTS_PER_CHAR_GAP: usize = 3;
const DOTS_PER_WORD_GAP: usize = 7;

/// Render `text` as a frame-by-frame lamp signal with `unit_frames` frames per dot.
///
/// The message is preceded by a word-length silence and followed by a
/// character gap and a one-unit flash, so the last character is closed by a
/// bounded off-run. Characters outside the alphabet are skipped and runs of
/// spaces collapse into one word gap.
pub fn synthesize_signal(text: &str, unit_frames: usize) -> Vec<bool> {
    let unit = unit_frames.max(1);
    let mut signal = Vec::new();
    let mut push = |on: bool, units: usize| {
        signal.extend(std::iter::repeat(on).take(units * unit));
    };

    push(false, DOTS_PER_WORD_GAP);

    let mut first_char = true;
    let mut pending_word_gap = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            pending_word_gap = !first_char;
            continue;
        }
        let Some(pattern) = get_morse_pattern(ch) else {
            continue;
        };

        if !first_char {
            let gap = if pending_word_gap {
                DOTS_PER_WORD_GAP
            } else {
                DOTS_PER_CHAR_GAP
            };
            push(false, gap);
        }
        first_char = false;
        pending_word_gap = false;

        for (i, element) in pattern.iter().enumerate() {
            if i > 0 {
                push(false, DOTS_PER_ELEMENT_GAP);
            }
            let units = match element {
                MorseElement::Dot => 1,
                MorseElement::Dash => DOTS_PER_DASH,
            };
            push(true, units);
        }
    }

    if !first_char {
        push(false, DOTS_PER_CHAR_GAP);
        push(true, 1);
    }
    signal
}

/// Map an on/off signal to per-frame brightness values.
pub fn signal_to_intensities(signal: &[bool], low: u8, high: u8) -> Vec<u8> {
    signal
        .iter()
        .map(|&on| if on { high } else { low })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_bits(signal: &[bool]) -> String {
        signal.iter().map(|&on| if on { '1' } else { '0' }).collect()
    }

    #[test]
    fn test_single_dot() {
        let signal = synthesize_signal("E", 1);
        assert_eq!(as_bits(&signal), "000000010001");
    }

    #[test]
    fn test_unit_scales_runs() {
        let signal = synthesize_signal("T", 2);
        assert_eq!(signal.len(), (7 + 3 + 3 + 1) * 2);
        assert_eq!(signal.iter().filter(|&&on| on).count(), (3 + 1) * 2);
    }

    #[test]
    fn test_word_gap() {
        let signal = synthesize_signal("E  E", 1);
        assert_eq!(as_bits(&signal), "00000001000000010001");
    }

    #[test]
    fn test_empty_text_is_silent() {
        assert!(synthesize_signal("", 3).iter().all(|&on| !on));
        assert!(synthesize_signal("#", 3).iter().all(|&on| !on));
    }

    #[test]
    fn test_signal_to_intensities() {
        assert_eq!(
            signal_to_intensities(&[false, true, true], 12, 230),
            vec![12, 230, 230]
        );
    }
}
