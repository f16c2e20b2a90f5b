//! Text encoding of generated files.
//!
//! Supported: `UTF-8`, `US-ASCII` and `ISO-8859-1`, plus their common
//! aliases, matched case-insensitively.

use thiserror::Error;

/// Errors raised while encoding file content.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    /// The encoding name is not supported.
    #[error("unsupported encoding '{encoding}'")]
    Unsupported {
        /// Declared encoding
        encoding: String,
    },

    /// A character has no representation in the encoding.
    #[error("character {character:?} cannot be encoded as {encoding}")]
    Unmappable {
        /// Declared encoding
        encoding: String,
        /// First offending character
        character: char,
    },
}

/// A supported output encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// UTF-8
    Utf8,
    /// 7-bit ASCII
    Ascii,
    /// ISO-8859-1 (Latin-1)
    Latin1,
}

impl TextEncoding {
    /// Looks up an encoding by name or alias.
    ///
    /// # Examples
    ///
    /// ```
    /// use scaffold_generator::encoding::TextEncoding;
    ///
    /// assert_eq!(TextEncoding::from_name("utf8"), Some(TextEncoding::Utf8));
    /// assert_eq!(TextEncoding::from_name("Latin1"), Some(TextEncoding::Latin1));
    /// assert_eq!(TextEncoding::from_name("UTF-16"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Some(Self::Utf8),
            "us-ascii" | "ascii" => Some(Self::Ascii),
            "iso-8859-1" | "iso8859-1" | "iso_8859_1" | "latin1" | "latin-1" => Some(Self::Latin1),
            _ => None,
        }
    }

    /// Canonical name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::Ascii => "US-ASCII",
            Self::Latin1 => "ISO-8859-1",
        }
    }

    /// Encodes `text`.
    ///
    /// # Errors
    ///
    /// Returns [`EncodingError::Unmappable`] for a character outside the
    /// encoding's range.
    pub fn encode(self, text: &str) -> Result<Vec<u8>, EncodingError> {
        if self == Self::Utf8 {
            return Ok(text.as_bytes().to_vec());
        }
        text.chars()
            .map(|c| {
                u8::try_from(u32::from(c))
                    .ok()
                    .filter(|b| self == Self::Latin1 || b.is_ascii())
                    .ok_or_else(|| EncodingError::Unmappable {
                        encoding: self.as_str().to_string(),
                        character: c,
                    })
            })
            .collect()
    }
}

/// Encodes `text` in the encoding named `encoding`.
///
/// # Errors
///
/// Returns [`EncodingError`] if the encoding is unknown or a character
/// cannot be represented.
///
/// # Examples
///
/// ```
/// use scaffold_generator::encoding::encode;
///
/// assert_eq!(encode("café", "UTF-8").unwrap().len(), 5);
/// assert_eq!(encode("café", "ISO-8859-1").unwrap().len(), 4);
/// assert!(encode("café", "US-ASCII").is_err());
/// ```
pub fn encode(text: &str, encoding: &str) -> Result<Vec<u8>, EncodingError> {
    TextEncoding::from_name(encoding)
        .ok_or_else(|| EncodingError::Unsupported {
            encoding: encoding.to_string(),
        })?
        .encode(text)
}

/// Byte length of `text` once encoded, or its UTF-8 length when it cannot
/// be encoded.
#[must_use]
pub fn encoded_len(text: &str, encoding: &str) -> usize {
    encode(text, encoding).map_or(text.len(), |bytes| bytes.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_passthrough() {
        assert_eq!(encode("# payments", "UTF-8").unwrap(), b"# payments");
    }

    #[test]
    fn test_latin1() {
        assert_eq!(encode("é", "iso-8859-1").unwrap(), vec![0xe9]);
        let err = encode("€", "ISO-8859-1").unwrap_err();
        assert!(matches!(err, EncodingError::Unmappable { character: '€', .. }));
    }

    #[test]
    fn test_ascii_rejects_high_chars() {
        assert_eq!(encode("abc", "ASCII").unwrap(), b"abc");
        assert!(encode("é", "US-ASCII").is_err());
    }

    #[test]
    fn test_unsupported() {
        let err = encode("x", "EBCDIC").unwrap_err();
        assert_eq!(err.to_string(), "unsupported encoding 'EBCDIC'");
    }

    #[test]
    fn test_encoded_len_fallback() {
        assert_eq!(encoded_len("# payments", "UTF-8"), 10);
        assert_eq!(encoded_len("é", "Latin1"), 1);
        assert_eq!(encoded_len("é", "EBCDIC"), 2);
    }
}
