//! Output string representations.
//!
//! The inspector never decides how the strings it reports are encoded in memory.
//! Every name and value is built by appending code points to a [`StringWriter`],
//! and the concrete writer picks the representation: UTF-8 ([`String`]),
//! UTF-16 ([`Utf16String`]) or UTF-32 ([`Utf32String`]). A custom scheme only
//! needs to implement the trait.

use std::borrow::Cow;
use std::fmt;
use std::hash::Hash;

/// A growable string which accepts one code point at a time.
///
/// Implementations must compare equal exactly when they hold the same
/// sequence of code points.
pub trait StringWriter: Default + Clone + PartialEq + Eq + Hash + fmt::Debug {
    /// Appends a code point.
    fn push_char(&mut self, c: char);

    /// Removes all content, keeping the allocated storage.
    fn clear(&mut self);

    /// Checks whether nothing has been written.
    fn is_empty(&self) -> bool;

    /// Checks whether this string holds exactly the code points of `s`.
    fn matches(&self, s: &str) -> bool;

    /// Returns the content as UTF-8, replacing anything which cannot be represented.
    fn to_utf8(&self) -> Cow<'_, str>;

    /// Appends every code point of `s`.
    fn push_str(&mut self, s: &str) {
        s.chars().for_each(|c| self.push_char(c));
    }

    /// Builds a new string from `s`.
    fn from_str(s: &str) -> Self {
        let mut result = Self::default();
        result.push_str(s);
        result
    }
}

impl StringWriter for String {
    #[inline]
    fn push_char(&mut self, c: char) {
        self.push(c);
    }

    #[inline]
    fn clear(&mut self) {
        String::clear(self);
    }

    #[inline]
    fn is_empty(&self) -> bool {
        String::is_empty(self)
    }

    #[inline]
    fn matches(&self, s: &str) -> bool {
        self == s
    }

    #[inline]
    fn to_utf8(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }

    #[inline]
    fn push_str(&mut self, s: &str) {
        String::push_str(self, s);
    }
}

/// A string stored as UTF-16 code units.
#[derive(Default, PartialEq, Eq, Hash, Debug)]
pub struct Utf16String(Vec<u16>);

impl Utf16String {
    /// Returns the stored code units.
    #[must_use]
    pub fn as_slice(&self) -> &[u16] {
        &self.0
    }

    /// Unwraps the stored code units.
    #[must_use]
    pub fn into_inner(self) -> Vec<u16> {
        self.0
    }
}

impl Clone for Utf16String {
    fn clone(&self) -> Self {
        Utf16String(self.0.clone())
    }

    fn clone_from(&mut self, source: &Self) {
        self.0.clone_from(&source.0);
    }
}

impl fmt::Display for Utf16String {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        char::decode_utf16(self.0.iter().copied())
            .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
            .try_for_each(|c| fmt::Write::write_char(f, c))
    }
}

impl StringWriter for Utf16String {
    fn push_char(&mut self, c: char) {
        let mut units = [0; 2];
        self.0.extend_from_slice(c.encode_utf16(&mut units));
    }

    fn clear(&mut self) {
        self.0.clear();
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn matches(&self, s: &str) -> bool {
        self.0.iter().copied().eq(s.encode_utf16())
    }

    fn to_utf8(&self) -> Cow<'_, str> {
        Cow::Owned(String::from_utf16_lossy(&self.0))
    }
}

/// A string stored as UTF-32 code units.
#[derive(Default, PartialEq, Eq, Hash, Debug)]
pub struct Utf32String(Vec<u32>);

impl Utf32String {
    /// Returns the stored code points.
    #[must_use]
    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    /// Unwraps the stored code points.
    #[must_use]
    pub fn into_inner(self) -> Vec<u32> {
        self.0
    }
}

impl Clone for Utf32String {
    fn clone(&self) -> Self {
        Utf32String(self.0.clone())
    }

    fn clone_from(&mut self, source: &Self) {
        self.0.clone_from(&source.0);
    }
}

impl fmt::Display for Utf32String {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter()
            .map(|&u| char::from_u32(u).unwrap_or(char::REPLACEMENT_CHARACTER))
            .try_for_each(|c| fmt::Write::write_char(f, c))
    }
}

impl StringWriter for Utf32String {
    fn push_char(&mut self, c: char) {
        self.0.push(c as u32);
    }

    fn clear(&mut self) {
        self.0.clear();
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn matches(&self, s: &str) -> bool {
        self.0.iter().copied().eq(s.chars().map(|c| c as u32))
    }

    fn to_utf8(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{StringWriter, Utf16String, Utf32String};

    #[test]
    fn utf16_surrogate_pairs() {
        let mut s = Utf16String::default();
        s.push_char('a');
        s.push_char('\u{1F600}');
        assert_eq!(s.as_slice(), &[0x61, 0xD83D, 0xDE00]);
        assert!(s.matches("a\u{1F600}"));
        assert!(!s.matches("a"));
        assert_eq!(s.to_string(), "a\u{1F600}");
    }

    #[test]
    fn utf32_matches() {
        let s = <Utf32String as StringWriter>::from_str("xmlns");
        assert_eq!(s.as_slice().len(), 5);
        assert!(s.matches("xmlns"));
        assert!(!s.matches("xml"));
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut s = <String as StringWriter>::from_str("some long value");
        let capacity = s.capacity();
        StringWriter::clear(&mut s);
        assert!(StringWriter::is_empty(&s));
        assert_eq!(s.capacity(), capacity);
    }
}
