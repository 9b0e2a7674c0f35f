//! Envelope key names recognized by the scan request and result layers.
//!
//! Decode-hint keys are not listed here; they are derived from
//! [`crate::hints::HintKind::key`].

// Request keys
pub const FORMATS: &str = "FORMATS";
pub const MODE: &str = "MODE";
pub const PROMPT_MESSAGE: &str = "PROMPT_MESSAGE";
pub const WIDTH: &str = "WIDTH";
pub const HEIGHT: &str = "HEIGHT";
pub const RESULT_DISPLAY_DURATION_MS: &str = "RESULT_DISPLAY_DURATION_MS";
pub const FRONT_LIGHT_AUTO_MODE: &str = "FRONT_LIGHT_AUTO_MODE";

// Result keys
pub const RESULT: &str = "RESULT";
pub const RESULT_FORMAT: &str = "RESULT_FORMAT";
pub const RESULT_BYTES: &str = "RESULT_BYTES";
pub const RESULT_UPC_EAN_EXTENSION: &str = "RESULT_UPC_EAN_EXTENSION";
pub const RESULT_ORIENTATION: &str = "RESULT_ORIENTATION";
pub const RESULT_ERROR_CORRECTION_LEVEL: &str = "RESULT_ERROR_CORRECTION_LEVEL";
pub const RESULT_BYTE_SEGMENTS_PREFIX: &str = "RESULT_BYTE_SEGMENTS_";
