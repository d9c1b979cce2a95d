//! Console rendering of generation results

use crate::qr::ErrorCorrection;
use hex::encode as hex_encode;
use serde_json::{Value, json};
use std::path::PathBuf;

/// Summary of one generated QR image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    /// Where the image was written
    pub path: PathBuf,
    /// Encoded payload
    pub payload: Vec<u8>,
    /// QR version that was used
    pub version: u8,
    /// Error correction level
    pub ec_level: ErrorCorrection,
    /// Modules along one side, without border
    pub modules: usize,
    /// Image side length in pixels
    pub pixels: u32,
    /// Whether the written file was decoded and matched the payload
    pub verified: bool,
}

/// Combined structured and human-readable representation of a report
#[derive(Debug, Clone)]
pub struct RenderedReport {
    /// Structured JSON representation
    pub json: Value,
    /// Human-readable lines for terminal presentation
    pub human: Vec<String>,
}

/// Success line printed after the image is saved.
pub fn success_message(report: &GenerationReport) -> String {
    format!("Success! QR code saved as '{}'.", report.path.display())
}

/// Render a report into both JSON and human-readable forms.
///
/// The human form is a single success line unless `detailed` is set.
pub fn render_report(report: &GenerationReport, detailed: bool) -> RenderedReport {
    let json = report_value(report);
    let mut human = vec![success_message(report)];

    if detailed {
        human.push(format!("  Version: {}", report.version));
        human.push(format!("  Error correction: {}", report.ec_level));
        human.push(format!("  Modules: {0}x{0}", report.modules));
        human.push(format!("  Image: {0}x{0} px", report.pixels));
        human.push(format!("  Payload: {} bytes", report.payload.len()));
        if report.verified {
            human.push("  Verified: decoded payload matches".to_string());
        }
    }

    RenderedReport { json, human }
}

fn report_value(report: &GenerationReport) -> Value {
    json!({
        "path": report.path.display().to_string(),
        "version": report.version,
        "ec_level": report.ec_level.letter().to_string(),
        "modules": report.modules,
        "pixels": report.pixels,
        "payload": {
            "text": std::str::from_utf8(&report.payload).ok(),
            "bytes_hex": hex_encode(&report.payload),
            "byte_length": report.payload.len(),
        },
        "verified": report.verified,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> GenerationReport {
        GenerationReport {
            path: PathBuf::from("qr.png"),
            payload: b"DESLIGAR_WAKEUP_AGORA".to_vec(),
            version: 3,
            ec_level: ErrorCorrection::High,
            modules: 29,
            pixels: 740,
            verified: true,
        }
    }

    #[test]
    fn plain_output_is_single_success_line() {
        let rendered = render_report(&report(), false);
        assert_eq!(rendered.human, vec!["Success! QR code saved as 'qr.png'.".to_string()]);
    }

    #[test]
    fn detailed_output_lists_symbol() {
        let rendered = render_report(&report(), true);
        assert_eq!(rendered.human[0], "Success! QR code saved as 'qr.png'.");
        assert!(rendered.human.iter().any(|l| l == "  Modules: 29x29"));
        assert!(rendered.human.iter().any(|l| l == "  Image: 740x740 px"));
    }

    #[test]
    fn json_carries_payload_and_symbol() {
        let value = render_report(&report(), false).json;
        assert_eq!(value["path"], "qr.png");
        assert_eq!(value["ec_level"], "H");
        assert_eq!(value["pixels"], 740);
        assert_eq!(value["payload"]["text"], "DESLIGAR_WAKEUP_AGORA");
        assert_eq!(value["payload"]["byte_length"], 21);
        assert_eq!(value["verified"], true);
    }
}
