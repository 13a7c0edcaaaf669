// International Morse alphabet: letters and digits only
use crate::types::MorseElement;

pub type MorsePattern = &'static [MorseElement];

const DOT: MorseElement = MorseElement::Dot;
const DASH: MorseElement = MorseElement::Dash;

static MORSE_ALPHABET: [(char, MorsePattern); 36] = [
    ('A', &[DOT, DASH]),
    ('B', &[DASH, DOT, DOT, DOT]),
    ('C', &[DASH, DOT, DASH, DOT]),
    ('D', &[DASH, DOT, DOT]),
    ('E', &[DOT]),
    ('F', &[DOT, DOT, DASH, DOT]),
    ('G', &[DASH, DASH, DOT]),
    ('H', &[DOT, DOT, DOT, DOT]),
    ('I', &[DOT, DOT]),
    ('J', &[DOT, DASH, DASH, DASH]),
    ('K', &[DASH, DOT, DASH]),
    ('L', &[DOT, DASH, DOT, DOT]),
    ('M', &[DASH, DASH]),
    ('N', &[DASH, DOT]),
    ('O', &[DASH, DASH, DASH]),
    ('P', &[DOT, DASH, DASH, DOT]),
    ('Q', &[DASH, DASH, DOT, DASH]),
    ('R', &[DOT, DASH, DOT]),
    ('S', &[DOT, DOT, DOT]),
    ('T', &[DASH]),
    ('U', &[DOT, DOT, DASH]),
    ('V', &[DOT, DOT, DOT, DASH]),
    ('W', &[DOT, DASH, DASH]),
    ('X', &[DASH, DOT, DOT, DASH]),
    ('Y', &[DASH, DOT, DASH, DASH]),
    ('Z', &[DASH, DASH, DOT, DOT]),
    ('1', &[DOT, DASH, DASH, DASH, DASH]),
    ('2', &[DOT, DOT, DASH, DASH, DASH]),
    ('3', &[DOT, DOT, DOT, DASH, DASH]),
    ('4', &[DOT, DOT, DOT, DOT, DASH]),
    ('5', &[DOT, DOT, DOT, DOT, DOT]),
    ('6', &[DASH, DOT, DOT, DOT, DOT]),
    ('7', &[DASH, DASH, DOT, DOT, DOT]),
    ('8', &[DASH, DASH, DASH, DOT, DOT]),
    ('9', &[DASH, DASH, DASH, DASH, DOT]),
    ('0', &[DASH, DASH, DASH, DASH, DASH]),
];

/// Character for a received dot/dash pattern, if it is in the alphabet.
pub fn lookup_character(pattern: &[MorseElement]) -> Option<char> {
    MORSE_ALPHABET
        .iter()
        .find(|(_, stored)| *stored == pattern)
        .map(|&(ch, _)| ch)
}

/// Pattern for a character. Letters match case-insensitively.
pub fn get_morse_pattern(ch: char) -> Option<MorsePattern> {
    let ch = ch.to_ascii_uppercase();
    MORSE_ALPHABET
        .iter()
        .find(|&&(stored, _)| stored == ch)
        .map(|&(_, pattern)| pattern)
}

/// Render a pattern as `.`/`-` text.
pub fn pattern_to_string(pattern: &[MorseElement]) -> String {
    pattern
        .iter()
        .map(|element| match element {
            MorseElement::Dot => '.',
            MorseElement::Dash => '-',
        })
        .collect()
}

/// Every (character, pattern) pair of the alphabet.
pub fn alphabet() -> &'static [(char, MorsePattern)] {
    &MORSE_ALPHABET
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_patterns() {
        assert_eq!(lookup_character(&[DOT, DOT, DOT]), Some('S'));
        assert_eq!(lookup_character(&[DASH, DASH, DASH]), Some('O'));
        assert_eq!(lookup_character(&[DASH, DASH, DASH, DASH, DASH]), Some('0'));
    }

    #[test]
    fn test_lookup_unknown_pattern() {
        assert_eq!(lookup_character(&[]), None);
        assert_eq!(lookup_character(&[DOT; 6]), None);
    }

    #[test]
    fn test_alphabet_is_a_bijection() {
        for (i, (ch, pattern)) in alphabet().iter().enumerate() {
            assert_eq!(lookup_character(pattern), Some(*ch));
            assert!(alphabet()[i + 1..].iter().all(|(other, p)| other != ch && p != pattern));
        }
    }

    #[test]
    fn test_forward_lookup_ignores_case() {
        assert_eq!(get_morse_pattern('a'), get_morse_pattern('A'));
        assert_eq!(pattern_to_string(get_morse_pattern('q').unwrap()), "--.-");
        assert_eq!(get_morse_pattern('?'), None);
    }
}
