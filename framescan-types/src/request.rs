//! Scan request: the immutable description of what one capture session
//! scans for, and its envelope encoding.

use serde::{Deserialize, Serialize};

use crate::extras::Extras;
use crate::format::{BarcodeFormat, ScanMode, ALL_FORMATS};
use crate::hints::DecodeHints;
use crate::keys;

/// Pause after a successful scan when the request does not say otherwise.
pub const DEFAULT_RESULT_DISPLAY_DURATION_MS: u64 = 1500;

/// Requested scanning-rectangle size in pixels. Both dimensions are
/// positive; a carrier with only one of them, or a non-positive one,
/// decodes to no size at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

/// Immutable description of what to scan for. Captured once at session
/// start from caller input; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanRequest {
    /// Explicit formats to scan for. Takes precedence over `mode` when
    /// non-empty.
    #[serde(default)]
    pub formats: Vec<BarcodeFormat>,
    /// Named preset used when no explicit formats are given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<ScanMode>,
    /// Decode tuning hints, including the character set.
    #[serde(default)]
    pub hints: DecodeHints,
    /// Status line shown while scanning instead of the built-in default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_message: Option<String>,
    /// Requested scanning-rectangle size, best-effort.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_size: Option<FrameSize>,
    /// How long to keep showing the decoded frame before delivering the
    /// result. Zero delivers immediately.
    #[serde(default = "default_duration")]
    pub result_display_duration_ms: u64,
    /// Whether the host should install an ambient-light monitor that
    /// drives the torch automatically.
    #[serde(default)]
    pub front_light_auto: bool,
}

fn default_duration() -> u64 {
    DEFAULT_RESULT_DISPLAY_DURATION_MS
}

impl Default for ScanRequest {
    fn default() -> Self {
        Self {
            formats: Vec::new(),
            mode: None,
            hints: DecodeHints::new(),
            prompt_message: None,
            frame_size: None,
            result_display_duration_ms: DEFAULT_RESULT_DISPLAY_DURATION_MS,
            front_light_auto: false,
        }
    }
}

impl ScanRequest {
    /// The formats the decode worker actually scans for: explicit
    /// formats first, then the mode preset, then the full built-in set.
    pub fn effective_formats(&self) -> Vec<BarcodeFormat> {
        if !self.formats.is_empty() {
            self.formats.clone()
        } else if let Some(mode) = self.mode {
            mode.formats().to_vec()
        } else {
            ALL_FORMATS.to_vec()
        }
    }

    /// Encode this request into the flat carrier envelope. An empty
    /// formats set writes no `FORMATS` key at all.
    pub fn to_extras(&self) -> Extras {
        let mut extras = Extras::new();
        if !self.formats.is_empty() {
            let joined = self
                .formats
                .iter()
                .map(BarcodeFormat::name)
                .collect::<Vec<_>>()
                .join(",");
            extras.put_text(keys::FORMATS, joined);
        }
        if let Some(mode) = self.mode {
            extras.put_text(keys::MODE, mode.wire_name());
        }
        self.hints.write_to(&mut extras);
        if let Some(prompt) = &self.prompt_message {
            extras.put_text(keys::PROMPT_MESSAGE, prompt.clone());
        }
        if let Some(size) = &self.frame_size {
            extras.put_int(keys::WIDTH, i64::from(size.width));
            extras.put_int(keys::HEIGHT, i64::from(size.height));
        }
        extras.put_int(
            keys::RESULT_DISPLAY_DURATION_MS,
            self.result_display_duration_ms as i64,
        );
        if self.front_light_auto {
            extras.put_bool(keys::FRONT_LIGHT_AUTO_MODE, true);
        }
        extras
    }

    /// Decode a request out of a carrier envelope. Total: an absent
    /// envelope yields the default request, and malformed fields are
    /// defaulted rather than failing the session.
    pub fn from_extras(extras: Option<&Extras>) -> Self {
        let extras = match extras {
            Some(extras) => extras,
            None => return ScanRequest::default(),
        };

        let formats = extras
            .get_text(keys::FORMATS)
            .map(|list| {
                list.split(',')
                    .filter_map(BarcodeFormat::from_name)
                    .collect()
            })
            .unwrap_or_default();

        let mode = extras
            .get_text(keys::MODE)
            .and_then(ScanMode::from_wire_name);

        let frame_size = match (extras.get_int(keys::WIDTH), extras.get_int(keys::HEIGHT)) {
            (Some(width), Some(height)) if width > 0 && height > 0 => Some(FrameSize {
                width: width as u32,
                height: height as u32,
            }),
            _ => None,
        };

        let result_display_duration_ms = extras
            .get_int(keys::RESULT_DISPLAY_DURATION_MS)
            .and_then(|ms| u64::try_from(ms).ok())
            .unwrap_or(DEFAULT_RESULT_DISPLAY_DURATION_MS);

        Self {
            formats,
            mode,
            hints: DecodeHints::read_from(extras),
            prompt_message: extras.get_text(keys::PROMPT_MESSAGE).map(str::to_string),
            frame_size,
            result_display_duration_ms,
            front_light_auto: extras.get_bool(keys::FRONT_LIGHT_AUTO_MODE).unwrap_or(false),
        }
    }
}
