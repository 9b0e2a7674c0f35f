//! Camera frame handed from the frame source to the decode worker.

/// One camera-captured image with its dimensions, luminance data, and
/// the scale factor relating detection-space coordinates back to
/// display space.
///
/// A frame is produced by the frame source, rendered once to the
/// viewfinder, moved into the decode worker for a single decode
/// attempt, and dropped afterwards.
#[derive(Clone)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    /// 8-bit luminance data, row-major
    pub luma: Vec<u8>,
    /// Multiply detection-space coordinates by this to get display space
    pub scale_factor: f32,
}

impl Frame {
    pub fn new(width: u32, height: u32, luma: Vec<u8>) -> Self {
        Self {
            width,
            height,
            luma,
            scale_factor: 1.0,
        }
    }

    pub fn with_scale_factor(mut self, scale_factor: f32) -> Self {
        self.scale_factor = scale_factor;
        self
    }
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("luma_len", &self.luma.len())
            .field("scale_factor", &self.scale_factor)
            .finish()
    }
}
