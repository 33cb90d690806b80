//! Character classes and the set of classes enabled for a password.

const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &[u8] = b"0123456789";
const SYMBOLS: &[u8] = b"!@#$%^&*()_+{}|:<>?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterClass {
    Lowercase,
    Uppercase,
    Digit,
    Symbol,
}

impl CharacterClass {
    /// Every class in the fixed order used to build alphabets.
    pub const ALL: [CharacterClass; 4] = [
        CharacterClass::Lowercase,
        CharacterClass::Uppercase,
        CharacterClass::Digit,
        CharacterClass::Symbol,
    ];

    pub fn chars(self) -> &'static [u8] {
        match self {
            CharacterClass::Lowercase => LOWERCASE,
            CharacterClass::Uppercase => UPPERCASE,
            CharacterClass::Digit => DIGITS,
            CharacterClass::Symbol => SYMBOLS,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CharacterClass::Lowercase => "lowercase",
            CharacterClass::Uppercase => "uppercase",
            CharacterClass::Digit => "digits",
            CharacterClass::Symbol => "symbols",
        }
    }

    pub fn contains(self, ch: char) -> bool {
        ch.is_ascii() && self.chars().contains(&(ch as u8))
    }
}

/// Optional classes enabled on top of the lowercase base set.
///
/// Lowercase is never a member: it always contributes to the alphabet but is
/// not a required class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassSet {
    upper: bool,
    digits: bool,
    symbols: bool,
}

impl ClassSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_flags(upper: bool, digits: bool, symbols: bool) -> Self {
        Self {
            upper,
            digits,
            symbols,
        }
    }

    pub fn insert(&mut self, class: CharacterClass) {
        match class {
            CharacterClass::Lowercase => {}
            CharacterClass::Uppercase => self.upper = true,
            CharacterClass::Digit => self.digits = true,
            CharacterClass::Symbol => self.symbols = true,
        }
    }

    pub fn with(mut self, class: CharacterClass) -> Self {
        self.insert(class);
        self
    }

    pub fn contains(&self, class: CharacterClass) -> bool {
        match class {
            CharacterClass::Lowercase => false,
            CharacterClass::Uppercase => self.upper,
            CharacterClass::Digit => self.digits,
            CharacterClass::Symbol => self.symbols,
        }
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        !(self.upper || self.digits || self.symbols)
    }

    /// Enabled classes in fixed order.
    pub fn iter(&self) -> impl Iterator<Item = CharacterClass> + '_ {
        CharacterClass::ALL
            .into_iter()
            .filter(move |class| self.contains(*class))
    }

    /// Lowercase followed by the alphabet of each enabled class.
    pub fn alphabet(&self) -> Vec<u8> {
        let mut chars = Vec::with_capacity(
            LOWERCASE.len() + UPPERCASE.len() + DIGITS.len() + SYMBOLS.len(),
        );
        chars.extend_from_slice(LOWERCASE);
        for class in self.iter() {
            chars.extend_from_slice(class.chars());
        }
        chars
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationRequest {
    pub length: usize,
    pub classes: ClassSet,
}

impl GenerationRequest {
    pub fn new(length: usize, classes: ClassSet) -> Self {
        Self { length, classes }
    }

    /// Number of characters reserved for class coverage.
    pub fn required(&self) -> usize {
        self.classes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_alphabet_sizes() {
        assert_eq!(CharacterClass::Lowercase.chars().len(), 26);
        assert_eq!(CharacterClass::Uppercase.chars().len(), 26);
        assert_eq!(CharacterClass::Digit.chars().len(), 10);
        assert_eq!(CharacterClass::Symbol.chars().len(), 19);
    }

    #[test]
    fn test_classes_are_disjoint() {
        let mut seen = HashSet::new();
        for class in CharacterClass::ALL {
            for &ch in class.chars() {
                assert!(
                    seen.insert(ch),
                    "Character \"{}\" appears in more than one class",
                    ch as char
                );
            }
        }
    }

    #[test]
    fn test_lowercase_is_never_a_member() {
        let mut set = ClassSet::empty();
        set.insert(CharacterClass::Lowercase);
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert!(!set.contains(CharacterClass::Lowercase));
    }

    #[test]
    fn test_iter_follows_fixed_order() {
        let set = ClassSet::empty()
            .with(CharacterClass::Symbol)
            .with(CharacterClass::Uppercase)
            .with(CharacterClass::Digit);
        let order: Vec<_> = set.iter().collect();
        assert_eq!(
            order,
            vec![
                CharacterClass::Uppercase,
                CharacterClass::Digit,
                CharacterClass::Symbol
            ]
        );
        assert_eq!(set, ClassSet::from_flags(true, true, true));
    }

    #[test]
    fn test_alphabet_empty_set_is_lowercase() {
        assert_eq!(ClassSet::empty().alphabet(), LOWERCASE);
    }

    #[test]
    fn test_alphabet_concatenation() {
        let set = ClassSet::from_flags(false, true, true);
        let expected: Vec<u8> = [LOWERCASE, DIGITS, SYMBOLS].concat();
        assert_eq!(set.alphabet(), expected);
    }

    #[test]
    fn test_alphabet_full_set_fits_capacity() {
        let alphabet = ClassSet::from_flags(true, true, true).alphabet();
        assert_eq!(alphabet.len(), 81);
        assert!(alphabet.capacity() >= alphabet.len());
        assert!(alphabet.starts_with(LOWERCASE));
        assert!(alphabet.ends_with(SYMBOLS));
    }

    #[test]
    fn test_request_required_count() {
        let request = GenerationRequest::new(12, ClassSet::from_flags(true, false, true));
        assert_eq!(request.required(), 2);
    }

    #[test]
    fn test_class_contains_char() {
        assert!(CharacterClass::Symbol.contains('?'));
        assert!(!CharacterClass::Symbol.contains('-'));
        assert!(CharacterClass::Digit.contains('7'));
        assert!(!CharacterClass::Lowercase.contains('é'));
    }
}
