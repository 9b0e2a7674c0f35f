//! framescan Types Library
//!
//! Shared request/result types and the flat key/value envelope used to
//! pass scan parameters in and scan results out across the framescan
//! system boundary.

pub mod extras;
pub mod format;
pub mod hints;
pub mod keys;
pub mod request;
pub mod result;

pub use extras::{ExtraValue, Extras};
pub use format::{BarcodeFormat, ScanMode, ALL_FORMATS};
pub use hints::{DecodeHints, HintKind, HintValue};
pub use request::{FrameSize, ScanRequest, DEFAULT_RESULT_DISPLAY_DURATION_MS};
pub use result::{CaptureResult, ResultMetadata, ResultPoint, ScanResult};
