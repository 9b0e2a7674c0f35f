//! Synthetic collaborators for hardware-free smoke runs.
//!
//! These stand in for the camera driver, the decode algorithm, and the
//! viewfinder so a complete session can run on a build machine.

use std::sync::atomic::{AtomicUsize, Ordering};

use framescan::{
    DecodeOutcome, Decoder, Frame, FrameReply, FrameSource, SourceError, SurfaceHandle,
    ViewfinderSink,
};
use framescan_types::{BarcodeFormat, DecodeHints, ResultMetadata, ScanResult};

const FRAME_WIDTH: u32 = 640;
const FRAME_HEIGHT: u32 = 480;

/// Frame source producing gradient luminance frames on demand.
pub struct SyntheticSource {
    open: bool,
    #[allow(dead_code)] // recorded for parity with real sources, never read back
    torch: bool,
    counter: usize,
}

impl SyntheticSource {
    pub fn new() -> Self {
        Self {
            open: false,
            torch: false,
            counter: 0,
        }
    }

    fn generate_frame(&mut self) -> Frame {
        self.counter += 1;
        let shift = (self.counter % 251) as u8;
        let mut luma = vec![0u8; (FRAME_WIDTH * FRAME_HEIGHT) as usize];
        for (i, px) in luma.iter_mut().enumerate() {
            *px = ((i as u32 % FRAME_WIDTH) as u8).wrapping_add(shift);
        }
        Frame::new(FRAME_WIDTH, FRAME_HEIGHT, luma)
    }
}

impl FrameSource for SyntheticSource {
    fn open(&mut self, _surface: &SurfaceHandle) -> Result<(), SourceError> {
        self.open = true;
        Ok(())
    }

    fn close(&mut self) {
        self.open = false;
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn request_frame(&mut self, reply: FrameReply) {
        let frame = self.generate_frame();
        reply.deliver(frame);
    }

    fn set_torch(&mut self, on: bool) {
        self.torch = on;
    }
}

/// Decoder that misses a configured number of frames, then reports a
/// fixed hit in the first requested format.
pub struct StubDecoder {
    misses: usize,
    calls: AtomicUsize,
}

impl StubDecoder {
    pub fn new(misses: usize) -> Self {
        Self {
            misses,
            calls: AtomicUsize::new(0),
        }
    }
}

impl Decoder for StubDecoder {
    fn decode(
        &self,
        _frame: &Frame,
        formats: &[BarcodeFormat],
        _hints: &DecodeHints,
    ) -> DecodeOutcome {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.misses {
            return DecodeOutcome::NotFound;
        }
        let format = formats.first().copied().unwrap_or(BarcodeFormat::Code128);
        let mut result = ScanResult::new("FRAMESCAN-SELFTEST-0001", format);
        result.metadata = ResultMetadata {
            orientation: Some(0),
            ..Default::default()
        };
        DecodeOutcome::Found(result)
    }
}

/// Viewfinder that narrates to stderr instead of drawing.
pub struct StatusViewfinder {
    quiet: bool,
    frames: usize,
}

impl StatusViewfinder {
    pub fn new(quiet: bool) -> Self {
        Self { quiet, frames: 0 }
    }
}

impl ViewfinderSink for StatusViewfinder {
    fn draw_frame(&mut self, _frame: &Frame) {
        self.frames += 1;
    }

    fn draw_result(&mut self, result: &ScanResult) {
        if !self.quiet {
            eprintln!("decoded after {} frame(s): {}", self.frames, result.preview());
        }
    }

    fn set_status(&mut self, text: &str) {
        if !self.quiet {
            eprintln!("status: {}", text);
        }
    }
}
