//! Syllable counting for the readability index

/// Counts syllables in a single normalized word
pub trait SyllableCounter {
    fn count(&self, word: &str) -> usize;
}

/// English vowel-group heuristic.
///
/// Words with no letters (numbers, symbols) have no syllables. Short words
/// and words whose only vowel is a silent `e` count as one.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicSyllables;

impl SyllableCounter for HeuristicSyllables {
    fn count(&self, word: &str) -> usize {
        let letters: String = word
            .chars()
            .filter(|c| c.is_alphabetic())
            .flat_map(char::to_lowercase)
            .collect();

        if letters.is_empty() {
            return 0;
        }
        if letters.chars().count() <= 3 {
            return 1;
        }

        let stem = strip_silent_suffix(&letters);
        vowel_groups(stem).max(1)
    }
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y')
}

/// Drop endings that are not pronounced as a separate syllable
fn strip_silent_suffix(word: &str) -> &str {
    let bytes = word.as_bytes();
    let len = bytes.len();

    if let Some(stem) = word.strip_suffix("es").or_else(|| word.strip_suffix("ed")) {
        // "-ted"/"-ded" and "-ses"/"-zes"/"-ces"/"-ges" keep their vowel
        if !matches!(stem.chars().last(), Some('t' | 'd' | 's' | 'z' | 'c' | 'g' | 'x')) {
            return stem;
        }
        return word;
    }

    if word.ends_with('e') && !word.ends_with("le") && len > 1 && !is_vowel(bytes[len - 2] as char) {
        return &word[..len - 1];
    }

    word
}

fn vowel_groups(word: &str) -> usize {
    let mut groups = 0;
    let mut in_group = false;
    for c in word.chars() {
        if is_vowel(c) {
            if !in_group {
                groups += 1;
            }
            in_group = true;
        } else {
            in_group = false;
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(word: &str) -> usize {
        HeuristicSyllables.count(word)
    }

    #[test]
    fn test_short_words() {
        assert_eq!(count("the"), 1);
        assert_eq!(count("cat"), 1);
        assert_eq!(count("a"), 1);
    }

    #[test]
    fn test_multisyllable_words() {
        assert_eq!(count("company"), 3);
        assert_eq!(count("financial"), 3);
        assert_eq!(count("investment"), 3);
        assert_eq!(count("uncertainty"), 4);
    }

    #[test]
    fn test_silent_endings() {
        assert_eq!(count("table"), 2);
        assert_eq!(count("liked"), 1);
        assert_eq!(count("revenue"), 3);
        assert_eq!(count("stated"), 2);
        assert_eq!(count("increases"), 3);
    }

    #[test]
    fn test_non_words() {
        assert_eq!(count("42"), 0);
        assert_eq!(count("1,234.5"), 0);
        assert_eq!(count(""), 0);
    }
}
