//! Output transcoding.
//!
//! Page text is assembled as UTF-8. Consumers that need a legacy single-byte
//! charset (e.g. `cp1252`) transcode it here, as a separate step after
//! assembly. Characters the target cannot represent are dropped and counted,
//! never replaced.

use encoding_rs::{EncoderResult, Encoding};

use crate::error::PageTextError;

/// Result of transcoding text into a target encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcoded {
    /// Encoded bytes.
    pub bytes: Vec<u8>,
    /// Characters that had no mapping in the target encoding, in input order.
    pub dropped: Vec<char>,
}

impl Transcoded {
    /// Returns `true` if every character was encoded.
    pub fn is_lossless(&self) -> bool {
        self.dropped.is_empty()
    }
}

/// Resolve a WHATWG encoding label such as `"utf-8"`, `"cp1252"` or
/// `"latin1"`.
///
/// # Errors
///
/// Returns [`PageTextError::UnknownEncoding`] if the label is not recognized.
pub fn encoding_for_label(label: &str) -> Result<&'static Encoding, PageTextError> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| PageTextError::UnknownEncoding(label.to_string()))
}

/// Encode `text` into `encoding`, dropping characters it cannot represent.
///
/// UTF-16 labels resolve to UTF-8 output, as with any WHATWG encoder.
pub fn transcode(text: &str, encoding: &'static Encoding) -> Transcoded {
    let mut encoder = encoding.new_encoder();
    let capacity = encoder
        .max_buffer_length_from_utf8_without_replacement(text.len())
        .unwrap_or(text.len());
    let mut bytes = Vec::with_capacity(capacity);
    let mut dropped = Vec::new();

    let mut remaining = text;
    loop {
        let (result, read) =
            encoder.encode_from_utf8_to_vec_without_replacement(remaining, &mut bytes, true);
        remaining = &remaining[read..];
        match result {
            EncoderResult::InputEmpty => break,
            EncoderResult::OutputFull => bytes.reserve(remaining.len().max(16)),
            EncoderResult::Unmappable(c) => dropped.push(c),
        }
    }

    Transcoded { bytes, dropped }
}
