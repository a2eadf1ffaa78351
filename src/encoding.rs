//! Byte-level encoding detection and decoding.
//!
//! The upstream endpoint has served UTF-8, UTF-8 with BOM, and legacy 8-bit
//! payloads across publication periods, without a reliable `Content-Type`
//! charset. Detection is a short chain: BOM sniff, strict UTF-8 validation,
//! then a WINDOWS-1252 fallback. Decoding is always lossy-tolerant; an
//! undecodable byte becomes a replacement character, never an error.

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use log::{debug, warn};

pub const FALLBACK_ENCODING: &Encoding = WINDOWS_1252;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confidence {
    Certain,
    Tentative,
}

#[derive(Debug, Clone, Copy)]
pub struct DetectedEncoding {
    pub encoding: &'static Encoding,
    pub confidence: Confidence,
}

/// A decoded payload plus the label of the encoding actually used.
#[derive(Debug, Clone)]
pub struct DecodedText {
    pub text: String,
    pub encoding: &'static str,
}

pub fn detect_encoding(bytes: &[u8]) -> DetectedEncoding {
    if bytes.is_empty() {
        return DetectedEncoding {
            encoding: FALLBACK_ENCODING,
            confidence: Confidence::Tentative,
        };
    }
    if let Some((encoding, _bom_length)) = Encoding::for_bom(bytes) {
        return DetectedEncoding {
            encoding,
            confidence: Confidence::Certain,
        };
    }
    if std::str::from_utf8(bytes).is_ok() {
        return DetectedEncoding {
            encoding: UTF_8,
            confidence: Confidence::Certain,
        };
    }
    DetectedEncoding {
        encoding: FALLBACK_ENCODING,
        confidence: Confidence::Tentative,
    }
}

pub fn decode(bytes: &[u8]) -> DecodedText {
    let detected = detect_encoding(bytes);
    if detected.confidence == Confidence::Tentative && !bytes.is_empty() {
        debug!(
            "no confident encoding match; decoding as {}",
            detected.encoding.name()
        );
    }
    let (text, used, had_errors) = detected.encoding.decode(bytes);
    if had_errors {
        warn!(
            "payload contained byte sequences invalid for {}; replaced",
            used.name()
        );
    }
    DecodedText {
        text: text.into_owned(),
        encoding: used.name(),
    }
}
