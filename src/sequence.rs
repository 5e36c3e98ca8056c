use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::error::{KeyrushError, Result};

pub const LATIN_LETTERS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Letters a sequence may be drawn from. Always non-empty, uppercase A-Z, no duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    letters: Vec<char>,
}

impl Alphabet {
    pub fn latin() -> Self {
        Self {
            letters: LATIN_LETTERS.chars().collect(),
        }
    }

    /// Build an alphabet from user text such as `"abcd"` or `"A B C D"`.
    pub fn parse(text: &str) -> Result<Self> {
        let mut letters: Vec<char> = Vec::new();
        for c in text.chars().filter(|c| !c.is_whitespace()) {
            let upper = c.to_ascii_uppercase();
            if !upper.is_ascii_uppercase() {
                return Err(KeyrushError::InvalidAlphabet(text.to_string()));
            }
            if !letters.contains(&upper) {
                letters.push(upper);
            }
        }

        if letters.is_empty() {
            return Err(KeyrushError::InvalidAlphabet(text.to_string()));
        }

        Ok(Self { letters })
    }

    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    pub fn contains(&self, c: char) -> bool {
        self.letters.contains(&c)
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::latin()
    }
}

impl std::fmt::Display for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.letters.iter().try_for_each(|c| write!(f, "{c}"))
    }
}

/// Supplies the target sequence for each round
pub trait SequenceSource {
    fn next_sequence(&mut self, length: usize) -> Vec<char>;
}

/// Uniform sampling with replacement, one independent draw per position
#[derive(Debug, Clone)]
pub struct RandomSequence {
    alphabet: Alphabet,
    rng: StdRng,
}

impl RandomSequence {
    pub fn new(alphabet: Alphabet) -> Self {
        Self {
            alphabet,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(alphabet: Alphabet, seed: u64) -> Self {
        Self {
            alphabet,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }
}

impl Default for RandomSequence {
    fn default() -> Self {
        Self::new(Alphabet::latin())
    }
}

impl SequenceSource for RandomSequence {
    fn next_sequence(&mut self, length: usize) -> Vec<char> {
        let letters = self.alphabet.letters();
        (0..length)
            .map(|_| letters[self.rng.gen_range(0..letters.len())])
            .collect()
    }
}

/// Hands out a fixed list of sequences in order, starting over after the last one.
/// The requested length is ignored; each script entry defines its own.
#[derive(Debug, Clone)]
pub struct ScriptedSequence {
    script: Vec<Vec<char>>,
    next: usize,
}

impl ScriptedSequence {
    pub fn new<I, S>(script: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let script: Vec<Vec<char>> = script
            .into_iter()
            .map(|s| s.as_ref().chars().map(|c| c.to_ascii_uppercase()).collect())
            .collect();
        Self { script, next: 0 }
    }
}

impl SequenceSource for ScriptedSequence {
    fn next_sequence(&mut self, _length: usize) -> Vec<char> {
        if self.script.is_empty() {
            return Vec::new();
        }
        let sequence = self.script[self.next % self.script.len()].clone();
        self.next += 1;
        sequence
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn latin_alphabet_has_all_letters() {
        let alphabet = Alphabet::latin();
        assert_eq!(alphabet.len(), 26);
        assert!(alphabet.contains('A'));
        assert!(alphabet.contains('Z'));
        assert_eq!(alphabet.to_string(), LATIN_LETTERS);
    }

    #[test]
    fn parse_normalizes_and_dedups() {
        let alphabet = Alphabet::parse("a b c d a").unwrap();
        assert_eq!(alphabet.letters(), &['A', 'B', 'C', 'D']);
    }

    #[test]
    fn parse_rejects_non_letters() {
        assert_matches!(Alphabet::parse("AB1"), Err(KeyrushError::InvalidAlphabet(_)));
        assert_matches!(Alphabet::parse("Ä"), Err(KeyrushError::InvalidAlphabet(_)));
    }

    #[test]
    fn parse_rejects_empty() {
        assert_matches!(Alphabet::parse("   "), Err(KeyrushError::InvalidAlphabet(_)));
    }

    #[test]
    fn random_sequence_has_requested_length() {
        let mut source = RandomSequence::seeded(Alphabet::latin(), 7);
        assert_eq!(source.next_sequence(5).len(), 5);
        assert_eq!(source.next_sequence(12).len(), 12);
        assert!(source.next_sequence(0).is_empty());
    }

    #[test]
    fn random_sequence_stays_within_alphabet() {
        let alphabet = Alphabet::parse("ABCD").unwrap();
        let mut source = RandomSequence::seeded(alphabet.clone(), 42);
        for _ in 0..200 {
            assert!(source.next_sequence(5).iter().all(|c| alphabet.contains(*c)));
        }
    }

    #[test]
    fn same_seed_same_sequences() {
        let mut a = RandomSequence::seeded(Alphabet::latin(), 1234);
        let mut b = RandomSequence::seeded(Alphabet::latin(), 1234);
        for _ in 0..10 {
            assert_eq!(a.next_sequence(5), b.next_sequence(5));
        }
    }

    #[test]
    fn sampling_allows_repeated_letters() {
        // With a one-letter alphabet every position must repeat
        let mut source = RandomSequence::seeded(Alphabet::parse("Q").unwrap(), 0);
        assert_eq!(source.next_sequence(5), vec!['Q'; 5]);
    }

    #[test]
    fn scripted_sequence_cycles() {
        let mut source = ScriptedSequence::new(["hello", "ABCDE"]);
        assert_eq!(source.next_sequence(5), vec!['H', 'E', 'L', 'L', 'O']);
        assert_eq!(source.next_sequence(5), vec!['A', 'B', 'C', 'D', 'E']);
        assert_eq!(source.next_sequence(5), vec!['H', 'E', 'L', 'L', 'O']);
    }

    #[test]
    fn empty_script_yields_empty_sequence() {
        let mut source = ScriptedSequence::new(Vec::<String>::new());
        assert!(source.next_sequence(5).is_empty());
    }
}
