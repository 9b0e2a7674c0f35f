//! Decode hints: per-request tuning knobs passed through to the decode
//! algorithm.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::extras::Extras;

/// Kind of decode hint a request can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HintKind {
    /// Image is a pure monochrome barcode, no surrounding scene.
    PureBarcode,
    /// Spend more time trying to find a code.
    TryHarder,
    /// Assume Code 39 codes carry a check digit.
    AssumeCode39CheckDigit,
    /// Assume GS1 encoding.
    AssumeGs1,
    /// Return Codabar start/end guard characters in the contents.
    ReturnCodabarStartEnd,
    /// Restrict decoded data to these lengths.
    AllowedLengths,
    /// Character set to use when decoding text.
    CharacterSet,
}

/// The boolean-valued hint kinds, in envelope order.
pub const FLAG_HINT_KINDS: &[HintKind] = &[
    HintKind::PureBarcode,
    HintKind::TryHarder,
    HintKind::AssumeCode39CheckDigit,
    HintKind::AssumeGs1,
    HintKind::ReturnCodabarStartEnd,
];

impl HintKind {
    /// Envelope key for this hint kind.
    pub fn key(&self) -> &'static str {
        match self {
            HintKind::PureBarcode => "PURE_BARCODE",
            HintKind::TryHarder => "TRY_HARDER",
            HintKind::AssumeCode39CheckDigit => "ASSUME_CODE_39_CHECK_DIGIT",
            HintKind::AssumeGs1 => "ASSUME_GS1",
            HintKind::ReturnCodabarStartEnd => "RETURN_CODABAR_START_END",
            HintKind::AllowedLengths => "ALLOWED_LENGTHS",
            HintKind::CharacterSet => "CHARACTER_SET",
        }
    }
}

/// Value attached to a [`HintKind`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HintValue {
    Flag(bool),
    Lengths(Vec<i64>),
    Text(String),
}

/// Mapping of hint kinds to values, carried frozen inside a request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecodeHints {
    entries: BTreeMap<HintKind, HintValue>,
}

impl DecodeHints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&HintKind, &HintValue)> {
        self.entries.iter()
    }

    /// Set a boolean hint.
    pub fn set_flag(&mut self, kind: HintKind, on: bool) {
        self.entries.insert(kind, HintValue::Flag(on));
    }

    /// Enable a boolean hint.
    pub fn enable(&mut self, kind: HintKind) {
        self.set_flag(kind, true);
    }

    /// Whether a boolean hint is present and enabled.
    pub fn is_enabled(&self, kind: HintKind) -> bool {
        matches!(self.entries.get(&kind), Some(HintValue::Flag(true)))
    }

    pub fn set_allowed_lengths(&mut self, lengths: Vec<i64>) {
        self.entries
            .insert(HintKind::AllowedLengths, HintValue::Lengths(lengths));
    }

    pub fn allowed_lengths(&self) -> Option<&[i64]> {
        match self.entries.get(&HintKind::AllowedLengths) {
            Some(HintValue::Lengths(lengths)) => Some(lengths),
            _ => None,
        }
    }

    pub fn set_character_set(&mut self, charset: impl Into<String>) {
        self.entries
            .insert(HintKind::CharacterSet, HintValue::Text(charset.into()));
    }

    pub fn character_set(&self) -> Option<&str> {
        match self.entries.get(&HintKind::CharacterSet) {
            Some(HintValue::Text(charset)) => Some(charset),
            _ => None,
        }
    }

    /// Write every hint entry into an envelope under its key.
    pub fn write_to(&self, extras: &mut Extras) {
        for (kind, value) in &self.entries {
            match value {
                HintValue::Flag(on) => extras.put_bool(kind.key(), *on),
                HintValue::Lengths(lengths) => extras.put_int_list(kind.key(), lengths.clone()),
                HintValue::Text(text) => extras.put_text(kind.key(), text.clone()),
            }
        }
    }

    /// Collect the recognized hint keys out of an envelope. Unknown keys
    /// and mistyped values are ignored.
    pub fn read_from(extras: &Extras) -> Self {
        let mut hints = DecodeHints::new();
        for kind in FLAG_HINT_KINDS {
            if let Some(on) = extras.get_bool(kind.key()) {
                hints.set_flag(*kind, on);
            }
        }
        if let Some(lengths) = extras.get_int_list(HintKind::AllowedLengths.key()) {
            hints.set_allowed_lengths(lengths.to_vec());
        }
        if let Some(charset) = extras.get_text(HintKind::CharacterSet.key()) {
            hints.set_character_set(charset);
        }
        hints
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_flag_hint_roundtrips_alone() {
        for kind in FLAG_HINT_KINDS {
            let mut hints = DecodeHints::new();
            hints.enable(*kind);

            let mut extras = Extras::new();
            hints.write_to(&mut extras);
            assert_eq!(extras.len(), 1);
            assert_eq!(extras.get_bool(kind.key()), Some(true));

            let back = DecodeHints::read_from(&extras);
            assert_eq!(back.len(), 1);
            assert!(back.is_enabled(*kind));
        }
    }

    #[test]
    fn test_allowed_lengths_roundtrip() {
        for lengths in [vec![1, 2, 3], vec![]] {
            let mut hints = DecodeHints::new();
            hints.set_allowed_lengths(lengths.clone());

            let mut extras = Extras::new();
            hints.write_to(&mut extras);
            let back = DecodeHints::read_from(&extras);
            assert_eq!(back.allowed_lengths(), Some(lengths.as_slice()));
        }
    }

    #[test]
    fn test_character_set_roundtrip() {
        let mut hints = DecodeHints::new();
        hints.set_character_set("ISO-8859-1");

        let mut extras = Extras::new();
        hints.write_to(&mut extras);
        let back = DecodeHints::read_from(&extras);
        assert_eq!(back.character_set(), Some("ISO-8859-1"));
    }

    #[test]
    fn test_absent_hints_decode_empty() {
        let back = DecodeHints::read_from(&Extras::new());
        assert!(back.is_empty());
        assert!(!back.is_enabled(HintKind::TryHarder));
        assert_eq!(back.allowed_lengths(), None);
        assert_eq!(back.character_set(), None);
    }
}
