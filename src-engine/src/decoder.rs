//! Decode contract consumed by the session's background worker.

use framescan_types::{BarcodeFormat, DecodeHints, ScanResult};

use crate::frame::Frame;

/// Outcome of one decode attempt against one frame.
#[derive(Debug, Clone)]
pub enum DecodeOutcome {
    /// A valid code was found; the session is over.
    Found(ScanResult),
    /// Nothing recognizable in this frame. Expected, not an error; the
    /// coordinator requests the next frame.
    NotFound,
}

/// Pixel-level decode algorithm, consumed as an opaque capability.
///
/// Called on the session's dedicated worker thread, never on the host
/// UI thread or the frame source's capture thread. The character set,
/// when requested, rides inside the hints.
pub trait Decoder: Send + Sync {
    fn decode(
        &self,
        frame: &Frame,
        formats: &[BarcodeFormat],
        hints: &DecodeHints,
    ) -> DecodeOutcome;
}
