//! Barcode symbologies and the named scan-mode presets that expand to
//! format lists.

use serde::{Deserialize, Serialize};

/// A machine-readable code symbology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BarcodeFormat {
    #[serde(rename = "AZTEC")]
    Aztec,
    #[serde(rename = "CODABAR")]
    Codabar,
    #[serde(rename = "CODE_39")]
    Code39,
    #[serde(rename = "CODE_93")]
    Code93,
    #[serde(rename = "CODE_128")]
    Code128,
    #[serde(rename = "DATA_MATRIX")]
    DataMatrix,
    #[serde(rename = "EAN_8")]
    Ean8,
    #[serde(rename = "EAN_13")]
    Ean13,
    #[serde(rename = "ITF")]
    Itf,
    #[serde(rename = "MAXICODE")]
    Maxicode,
    #[serde(rename = "PDF_417")]
    Pdf417,
    #[serde(rename = "QR_CODE")]
    QrCode,
    #[serde(rename = "RSS_14")]
    Rss14,
    #[serde(rename = "RSS_EXPANDED")]
    RssExpanded,
    #[serde(rename = "UPC_A")]
    UpcA,
    #[serde(rename = "UPC_E")]
    UpcE,
    #[serde(rename = "UPC_EAN_EXTENSION")]
    UpcEanExtension,
}

/// Every supported symbology; the "try everything" set used when a
/// request names neither formats nor a mode.
pub const ALL_FORMATS: &[BarcodeFormat] = &[
    BarcodeFormat::Aztec,
    BarcodeFormat::Codabar,
    BarcodeFormat::Code39,
    BarcodeFormat::Code93,
    BarcodeFormat::Code128,
    BarcodeFormat::DataMatrix,
    BarcodeFormat::Ean8,
    BarcodeFormat::Ean13,
    BarcodeFormat::Itf,
    BarcodeFormat::Maxicode,
    BarcodeFormat::Pdf417,
    BarcodeFormat::QrCode,
    BarcodeFormat::Rss14,
    BarcodeFormat::RssExpanded,
    BarcodeFormat::UpcA,
    BarcodeFormat::UpcE,
    BarcodeFormat::UpcEanExtension,
];

/// Retail product codes.
pub const PRODUCT_FORMATS: &[BarcodeFormat] = &[
    BarcodeFormat::UpcA,
    BarcodeFormat::UpcE,
    BarcodeFormat::Ean8,
    BarcodeFormat::Ean13,
    BarcodeFormat::Rss14,
    BarcodeFormat::RssExpanded,
];

/// All linear (one-dimensional) codes: product plus industrial.
pub const ONE_D_FORMATS: &[BarcodeFormat] = &[
    BarcodeFormat::UpcA,
    BarcodeFormat::UpcE,
    BarcodeFormat::Ean8,
    BarcodeFormat::Ean13,
    BarcodeFormat::Rss14,
    BarcodeFormat::RssExpanded,
    BarcodeFormat::Code39,
    BarcodeFormat::Code93,
    BarcodeFormat::Code128,
    BarcodeFormat::Itf,
    BarcodeFormat::Codabar,
];

pub const QR_CODE_FORMATS: &[BarcodeFormat] = &[BarcodeFormat::QrCode];

pub const DATA_MATRIX_FORMATS: &[BarcodeFormat] = &[BarcodeFormat::DataMatrix];

impl BarcodeFormat {
    /// Wire name of this format, e.g. `"QR_CODE"` or `"UPC_A"`.
    pub fn name(&self) -> &'static str {
        match self {
            BarcodeFormat::Aztec => "AZTEC",
            BarcodeFormat::Codabar => "CODABAR",
            BarcodeFormat::Code39 => "CODE_39",
            BarcodeFormat::Code93 => "CODE_93",
            BarcodeFormat::Code128 => "CODE_128",
            BarcodeFormat::DataMatrix => "DATA_MATRIX",
            BarcodeFormat::Ean8 => "EAN_8",
            BarcodeFormat::Ean13 => "EAN_13",
            BarcodeFormat::Itf => "ITF",
            BarcodeFormat::Maxicode => "MAXICODE",
            BarcodeFormat::Pdf417 => "PDF_417",
            BarcodeFormat::QrCode => "QR_CODE",
            BarcodeFormat::Rss14 => "RSS_14",
            BarcodeFormat::RssExpanded => "RSS_EXPANDED",
            BarcodeFormat::UpcA => "UPC_A",
            BarcodeFormat::UpcE => "UPC_E",
            BarcodeFormat::UpcEanExtension => "UPC_EAN_EXTENSION",
        }
    }

    /// Parse a wire name. Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        ALL_FORMATS.iter().copied().find(|f| f.name() == name)
    }
}

impl std::fmt::Display for BarcodeFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Named preset expanding to a list of formats to scan for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanMode {
    #[serde(rename = "PRODUCT_MODE")]
    Product,
    #[serde(rename = "ONE_D_MODE")]
    OneD,
    #[serde(rename = "QR_CODE_MODE")]
    QrCode,
    #[serde(rename = "DATA_MATRIX_MODE")]
    DataMatrix,
}

impl ScanMode {
    /// Wire name of this mode, e.g. `"QR_CODE_MODE"`.
    pub fn wire_name(&self) -> &'static str {
        match self {
            ScanMode::Product => "PRODUCT_MODE",
            ScanMode::OneD => "ONE_D_MODE",
            ScanMode::QrCode => "QR_CODE_MODE",
            ScanMode::DataMatrix => "DATA_MATRIX_MODE",
        }
    }

    /// Parse a wire name. Unknown names yield `None`.
    pub fn from_wire_name(name: &str) -> Option<Self> {
        match name {
            "PRODUCT_MODE" => Some(ScanMode::Product),
            "ONE_D_MODE" => Some(ScanMode::OneD),
            "QR_CODE_MODE" => Some(ScanMode::QrCode),
            "DATA_MATRIX_MODE" => Some(ScanMode::DataMatrix),
            _ => None,
        }
    }

    /// The formats this preset expands to.
    pub fn formats(&self) -> &'static [BarcodeFormat] {
        match self {
            ScanMode::Product => PRODUCT_FORMATS,
            ScanMode::OneD => ONE_D_FORMATS,
            ScanMode::QrCode => QR_CODE_FORMATS,
            ScanMode::DataMatrix => DATA_MATRIX_FORMATS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_name_roundtrip() {
        for format in ALL_FORMATS {
            assert_eq!(BarcodeFormat::from_name(format.name()), Some(*format));
        }
    }

    #[test]
    fn test_unknown_format_name() {
        assert_eq!(BarcodeFormat::from_name("CODE_11"), None);
        assert_eq!(BarcodeFormat::from_name(""), None);
    }

    #[test]
    fn test_mode_expansion() {
        assert_eq!(ScanMode::Product.formats().len(), 6);
        assert_eq!(ScanMode::OneD.formats().len(), 11);
        assert_eq!(ScanMode::QrCode.formats(), &[BarcodeFormat::QrCode]);
        assert_eq!(ScanMode::DataMatrix.formats(), &[BarcodeFormat::DataMatrix]);
    }

    #[test]
    fn test_one_d_contains_product() {
        for format in PRODUCT_FORMATS {
            assert!(ONE_D_FORMATS.contains(format));
        }
    }

    #[test]
    fn test_mode_wire_name_roundtrip() {
        for mode in [
            ScanMode::Product,
            ScanMode::OneD,
            ScanMode::QrCode,
            ScanMode::DataMatrix,
        ] {
            assert_eq!(ScanMode::from_wire_name(mode.wire_name()), Some(mode));
        }
        assert_eq!(ScanMode::from_wire_name("BAD_MODE"), None);
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&BarcodeFormat::Code39).unwrap();
        assert_eq!(json, "\"CODE_39\"");
        let back: BarcodeFormat = serde_json::from_str("\"UPC_EAN_EXTENSION\"").unwrap();
        assert_eq!(back, BarcodeFormat::UpcEanExtension);
    }
}
