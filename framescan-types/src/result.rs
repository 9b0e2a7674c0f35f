//! Scan result: the terminal decode of a session, its caller-visible
//! reply envelope, and the caller-side parse of that envelope.

use serde::{Deserialize, Serialize};

use crate::extras::Extras;
use crate::format::BarcodeFormat;
use crate::keys;

/// Longest result preview shown on the status line before truncation.
const PREVIEW_MAX_CHARS: usize = 32;

/// A detected point in detection-space coordinates. Multiply by the
/// frame's scale factor to get display-space coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResultPoint {
    pub x: f32,
    pub y: f32,
}

/// Metadata attached to a decode, populated per symbology.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultMetadata {
    /// Supplemental UPC/EAN extension contents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upc_ean_extension: Option<String>,
    /// Orientation of the code in the frame, in degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<i32>,
    /// Error-correction level, e.g. QR `"M"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_correction_level: Option<String>,
    /// Raw byte segments, in decode order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub byte_segments: Vec<Vec<u8>>,
}

/// The terminal decode of one capture session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    /// Decoded text contents.
    pub contents: String,
    /// Symbology the code was decoded as.
    pub format: BarcodeFormat,
    /// Raw bytes, when the symbology carries them. May be empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub raw_bytes: Vec<u8>,
    /// Detected points: none, two for a linear code, four or more for a
    /// matrix code.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub points: Vec<ResultPoint>,
    #[serde(default)]
    pub metadata: ResultMetadata,
}

impl ScanResult {
    pub fn new(contents: impl Into<String>, format: BarcodeFormat) -> Self {
        Self {
            contents: contents.into(),
            format,
            raw_bytes: Vec::new(),
            points: Vec::new(),
            metadata: ResultMetadata::default(),
        }
    }

    /// Contents truncated for the status line: at most 32 characters,
    /// with `" ..."` appended when anything was cut.
    pub fn preview(&self) -> String {
        if self.contents.chars().count() > PREVIEW_MAX_CHARS {
            let head: String = self.contents.chars().take(PREVIEW_MAX_CHARS).collect();
            format!("{} ...", head)
        } else {
            self.contents.clone()
        }
    }

    /// Build the caller-visible reply envelope. Optional fields are
    /// written only when present; byte segments land under indexed keys.
    pub fn to_reply_extras(&self) -> Extras {
        let mut extras = Extras::new();
        extras.put_text(keys::RESULT, self.contents.clone());
        extras.put_text(keys::RESULT_FORMAT, self.format.name());
        if !self.raw_bytes.is_empty() {
            extras.put_bytes(keys::RESULT_BYTES, self.raw_bytes.clone());
        }
        if let Some(extension) = &self.metadata.upc_ean_extension {
            extras.put_text(keys::RESULT_UPC_EAN_EXTENSION, extension.clone());
        }
        if let Some(orientation) = self.metadata.orientation {
            extras.put_int(keys::RESULT_ORIENTATION, i64::from(orientation));
        }
        if let Some(level) = &self.metadata.error_correction_level {
            extras.put_text(keys::RESULT_ERROR_CORRECTION_LEVEL, level.clone());
        }
        for (i, segment) in self.metadata.byte_segments.iter().enumerate() {
            let key = format!("{}{}", keys::RESULT_BYTE_SEGMENTS_PREFIX, i);
            extras.put_bytes(&key, segment.clone());
        }
        extras
    }
}

/// Caller-side view of a delivered reply envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureResult {
    contents: Option<String>,
    format_name: Option<String>,
}

impl CaptureResult {
    /// Parse the fields the invoking component cares about out of a
    /// reply envelope.
    pub fn from_extras(extras: &Extras) -> Self {
        Self {
            contents: extras.get_text(keys::RESULT).map(str::to_string),
            format_name: extras.get_text(keys::RESULT_FORMAT).map(str::to_string),
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }

    /// Format name of the decoded code, like `"QR_CODE"` or `"UPC_A"`.
    pub fn format_name(&self) -> Option<&str> {
        self.format_name.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_result() -> ScanResult {
        ScanResult {
            contents: "9780201379624".to_string(),
            format: BarcodeFormat::Ean13,
            raw_bytes: vec![0x97, 0x80],
            points: vec![
                ResultPoint { x: 10.0, y: 20.0 },
                ResultPoint { x: 110.0, y: 20.0 },
            ],
            metadata: ResultMetadata {
                upc_ean_extension: Some("12".to_string()),
                orientation: Some(90),
                error_correction_level: Some("M".to_string()),
                byte_segments: vec![vec![1, 2], vec![3]],
            },
        }
    }

    #[test]
    fn test_reply_envelope_full() {
        let extras = full_result().to_reply_extras();
        assert_eq!(extras.get_text(keys::RESULT), Some("9780201379624"));
        assert_eq!(extras.get_text(keys::RESULT_FORMAT), Some("EAN_13"));
        assert_eq!(
            extras.get_bytes(keys::RESULT_BYTES),
            Some([0x97, 0x80].as_slice())
        );
        assert_eq!(extras.get_text(keys::RESULT_UPC_EAN_EXTENSION), Some("12"));
        assert_eq!(extras.get_int(keys::RESULT_ORIENTATION), Some(90));
        assert_eq!(
            extras.get_text(keys::RESULT_ERROR_CORRECTION_LEVEL),
            Some("M")
        );
        assert_eq!(
            extras.get_bytes("RESULT_BYTE_SEGMENTS_0"),
            Some([1, 2].as_slice())
        );
        assert_eq!(
            extras.get_bytes("RESULT_BYTE_SEGMENTS_1"),
            Some([3].as_slice())
        );
    }

    #[test]
    fn test_reply_envelope_omits_absent_fields() {
        let extras = ScanResult::new("ABC-123", BarcodeFormat::Code39).to_reply_extras();
        assert_eq!(extras.get_text(keys::RESULT), Some("ABC-123"));
        assert_eq!(extras.get_text(keys::RESULT_FORMAT), Some("CODE_39"));
        assert!(!extras.contains(keys::RESULT_BYTES));
        assert!(!extras.contains(keys::RESULT_UPC_EAN_EXTENSION));
        assert!(!extras.contains(keys::RESULT_ORIENTATION));
        assert!(!extras.contains(keys::RESULT_ERROR_CORRECTION_LEVEL));
        assert!(!extras.contains("RESULT_BYTE_SEGMENTS_0"));
    }

    #[test]
    fn test_capture_result_parse() {
        let extras = full_result().to_reply_extras();
        let parsed = CaptureResult::from_extras(&extras);
        assert_eq!(parsed.contents(), Some("9780201379624"));
        assert_eq!(parsed.format_name(), Some("EAN_13"));

        let empty = CaptureResult::from_extras(&Extras::new());
        assert_eq!(empty.contents(), None);
        assert_eq!(empty.format_name(), None);
    }

    #[test]
    fn test_preview_truncates_long_contents() {
        let long = "A".repeat(40);
        let result = ScanResult::new(long, BarcodeFormat::QrCode);
        let preview = result.preview();
        assert_eq!(preview, format!("{} ...", "A".repeat(32)));
    }

    #[test]
    fn test_preview_keeps_short_contents() {
        let result = ScanResult::new("short", BarcodeFormat::QrCode);
        assert_eq!(result.preview(), "short");
    }
}
