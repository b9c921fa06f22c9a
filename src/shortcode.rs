//! Short-code generation.
//!
//! A code is five characters: positions 0, 1, 2 and 4 are uppercase letters,
//! position 3 is a digit. Every position is sampled independently and
//! uniformly, so there are 26^4 * 10 possible codes.

pub const CODE_LEN: usize = 5;

const LETTERS: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &[u8; 10] = b"0123456789";

/// Position within the code that draws from [`DIGITS`]
const DIGIT_POSITION: usize = 3;

fn alphabet_for(position: usize) -> &'static [u8] {
    if position == DIGIT_POSITION {
        DIGITS
    } else {
        LETTERS
    }
}

/// Generate a bare random code such as `QWE4R`
pub fn generate_code() -> String {
    (0..CODE_LEN)
        .map(|position| {
            let alphabet = alphabet_for(position);
            alphabet[rand::random_range(0..alphabet.len())] as char
        })
        .collect()
}

/// Whether `code` has the shape produced by [`generate_code`]
pub fn is_well_formed(code: &str) -> bool {
    code.len() == CODE_LEN
        && code
            .bytes()
            .enumerate()
            .all(|(position, c)| alphabet_for(position).contains(&c))
}

/// Builds full short links from codes and a configured base URL
#[derive(Debug, Clone)]
pub struct ShortLinks {
    base_url: String,
}

impl ShortLinks {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// A fresh short link: base URL followed by a random code
    pub fn generate(&self) -> String {
        self.link_for(&generate_code())
    }

    /// The short link a given code resolves through
    pub fn link_for(&self, code: &str) -> String {
        format!("{}{}", self.base_url, code)
    }

    /// Strip the base URL back off a short link
    pub fn code_of<'a>(&self, short_url: &'a str) -> Option<&'a str> {
        short_url.strip_prefix(self.base_url.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn codes_have_expected_shape() {
        for _ in 0..10_000 {
            let code = generate_code();
            assert_eq!(code.len(), CODE_LEN, "bad length: {code}");

            let bytes = code.as_bytes();
            assert!(bytes[3].is_ascii_digit(), "position 3 not a digit: {code}");
            for position in [0, 1, 2, 4] {
                assert!(
                    bytes[position].is_ascii_uppercase(),
                    "position {position} not an uppercase letter: {code}"
                );
            }
            assert!(is_well_formed(&code));
        }
    }

    #[test]
    fn every_symbol_is_reachable() {
        let mut letters = HashSet::new();
        let mut digits = HashSet::new();

        for _ in 0..20_000 {
            let code = generate_code();
            let bytes = code.as_bytes();
            letters.insert(bytes[0]);
            digits.insert(bytes[3]);
        }

        assert_eq!(letters.len(), LETTERS.len());
        assert_eq!(digits.len(), DIGITS.len());
    }

    #[test]
    fn rejects_malformed_codes() {
        assert!(is_well_formed("ABC1D"));
        assert!(!is_well_formed("ABCD1"));
        assert!(!is_well_formed("abc1d"));
        assert!(!is_well_formed("ABC1"));
        assert!(!is_well_formed("ABC1DE"));
        assert!(!is_well_formed(""));
    }

    #[test]
    fn links_round_trip_through_base_url() {
        let links = ShortLinks::new("http://localhost:8000/api/get-file/");

        let link = links.generate();
        assert!(link.starts_with("http://localhost:8000/api/get-file/"));

        let code = links.code_of(&link).unwrap();
        assert!(is_well_formed(code));
        assert_eq!(links.link_for(code), link);

        assert_eq!(links.code_of("http://elsewhere/ABC1D"), None);
    }
}
