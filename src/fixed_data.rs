//! Positional access to the 008 fixed-length data elements.
//!
//! The 008 field is a 40-character positional string. Offsets used here are
//! relative to the field data (the printable `=008  ` prefix is not part of
//! it):
//!
//! - 07-10: Date 1
//! - 15-17: Place of publication (country code)
//! - 23: Form of item (books and most formats)
//! - 35-37: Language
//!
//! Positions count characters, not bytes: a lossily decoded byte in the 008
//! occupies one position. Accessors return `None` when the string is too
//! short, never panic.

/// Date 1 (positions 07-10)
pub const DATE1: std::ops::Range<usize> = 7..11;
/// Place of publication, two significant letters (positions 15-16)
pub const PLACE: std::ops::Range<usize> = 15..17;
/// Form of item (position 23)
pub const FORM_OF_ITEM: usize = 23;
/// Language (positions 35-37)
pub const LANGUAGE: std::ops::Range<usize> = 35..38;

/// Form-of-item code for an online resource.
pub const FORM_ONLINE: char = 'o';

/// Borrowed view over an 008 value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedData<'a> {
    raw: &'a str,
}

impl<'a> FixedData<'a> {
    /// Wrap a raw 008 value.
    #[must_use]
    pub fn new(raw: &'a str) -> Self {
        FixedData { raw }
    }

    /// Substring covering character positions `range`.
    fn slice(&self, range: std::ops::Range<usize>) -> Option<&'a str> {
        let mut offsets = self
            .raw
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(self.raw.len()));
        let start = offsets.nth(range.start)?;
        let end = offsets.nth(range.len().checked_sub(1)?)?;
        Some(&self.raw[start..end])
    }

    /// Date 1 text, as stored (may contain `u` for unknown digits).
    #[must_use]
    pub fn date1(&self) -> Option<&'a str> {
        self.slice(DATE1)
    }

    /// Form of item character.
    #[must_use]
    pub fn form_of_item(&self) -> Option<char> {
        self.raw.chars().nth(FORM_OF_ITEM)
    }

    /// Whether the form of item marks an online resource.
    #[must_use]
    pub fn is_online(&self) -> bool {
        self.form_of_item() == Some(FORM_ONLINE)
    }

    /// Country code letters (first two positions of the place code).
    #[must_use]
    pub fn place_code(&self) -> Option<&'a str> {
        self.slice(PLACE)
    }

    /// Language code.
    #[must_use]
    pub fn language_code(&self) -> Option<&'a str> {
        self.slice(LANGUAGE)
    }
}

fn all_lowercase(s: Option<&str>) -> bool {
    s.is_some_and(|s| !s.is_empty() && s.bytes().all(|b| b.is_ascii_lowercase()))
}

impl FixedData<'_> {
    /// A three-letter lowercase language code is present.
    #[must_use]
    pub fn has_language_code(&self) -> bool {
        all_lowercase(self.language_code())
    }

    /// A lowercase country code (two letters, optional third) is present.
    #[must_use]
    pub fn has_country_code(&self) -> bool {
        all_lowercase(self.place_code())
    }
}
