use std::path::Path;

use image::DynamicImage;

use wakeqr::config::DEFAULT_SECRET;
use wakeqr::{
    Error, ErrorCorrection, QrDecoder, QrEncoder, QrSymbol, RenderOptions, SymbolConfig,
    WakeQrConfig,
};

fn config_in(dir: &Path, file: &str) -> WakeQrConfig {
    WakeQrConfig {
        output: dir.join(file),
        ..WakeQrConfig::default()
    }
}

fn decode(symbol: &QrSymbol, box_size: u32) -> wakeqr::Result<String> {
    let options = RenderOptions {
        box_size,
        ..RenderOptions::default()
    };
    let image = DynamicImage::ImageRgb8(options.render(symbol)?);
    let payload = QrDecoder::new().decode(&image)?;
    Ok(payload.as_str().unwrap_or_default().to_string())
}

/// Modules of a version 2 symbol that carry codeword bits, in placement
/// order: two-column strips from the right edge, alternating upward and
/// downward, skipping the timing column and all function patterns.
fn version_two_data_modules() -> Vec<(usize, usize)> {
    const WIDTH: usize = 25;
    let reserved = |x: usize, y: usize| {
        let finder_or_format = (x < 9 && y < 9) || (x >= WIDTH - 8 && y < 9) || (x < 9 && y >= WIDTH - 8);
        let timing = x == 6 || y == 6;
        let alignment = (16..=20).contains(&x) && (16..=20).contains(&y);
        finder_or_format || timing || alignment
    };

    let mut order = Vec::new();
    let mut upward = true;
    let mut right = WIDTH - 1;
    loop {
        if right == 6 {
            right = 5;
        }
        for step in 0..WIDTH {
            let y = if upward { WIDTH - 1 - step } else { step };
            for x in [right, right - 1] {
                if !reserved(x, y) {
                    order.push((x, y));
                }
            }
        }
        upward = !upward;
        if right < 3 {
            break;
        }
        right -= 2;
    }
    order
}

/// Invert every bit of the first `count` codewords of a version 2 symbol.
fn corrupt_codewords(symbol: &mut QrSymbol, count: usize) {
    assert_eq!(symbol.width(), 25, "codeword layout is for version 2");
    for &(x, y) in version_two_data_modules().iter().take(count * 8) {
        symbol.toggle(x, y);
    }
}

fn version_two(ec_level: ErrorCorrection, text: &str) -> QrSymbol {
    QrEncoder::with_config(SymbolConfig {
        version: 2,
        ec_level,
        fit: false,
    })
    .encode_string(text)
    .expect("encode")
}

/// Invert a `size`x`size` block of modules next to the symbol centre, clear
/// of the finder, timing, format and alignment patterns for versions 1-6.
fn damage_centre(symbol: &mut QrSymbol, size: usize) {
    let start = symbol.width() / 2 - 1;
    for y in start..start + size {
        for x in start..start + size {
            symbol.toggle(x, y);
        }
    }
}

#[test]
fn default_run_writes_decodable_png() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = config_in(dir.path(), "qr.png");

    let report = wakeqr::generate(&config).expect("generate");

    assert!(config.output.exists());
    assert_eq!(report.path, config.output);
    assert_eq!(report.ec_level, ErrorCorrection::High);
    assert!(!report.verified);

    let decoded = QrDecoder::new().decode_file(&config.output).expect("decode");
    assert_eq!(decoded.as_str(), Some(DEFAULT_SECRET));
}

#[test]
fn image_dimensions_follow_modules_border_and_box() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut config = config_in(dir.path(), "sized.png");
    config.render.box_size = 7;
    config.render.border = 3;

    let report = wakeqr::generate(&config).expect("generate");
    let expected = (report.modules as u32 + 2 * 3) * 7;
    assert_eq!(report.pixels, expected);

    let written = image::open(&config.output).expect("open");
    assert_eq!(written.width(), expected);
    assert_eq!(written.height(), expected);
}

#[test]
fn verify_mode_checks_written_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut config = config_in(dir.path(), "verified.bmp");
    config.verify = true;
    config.secret = "ANOTHER_UNLOCK_CODE".to_string();

    let report = wakeqr::generate(&config).expect("generate");
    assert!(report.verified);
    assert_eq!(report.payload, b"ANOTHER_UNLOCK_CODE");
}

#[test]
fn same_configuration_gives_identical_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let first = config_in(dir.path(), "a.png");
    let second = config_in(dir.path(), "b.png");

    wakeqr::generate(&first).expect("first");
    wakeqr::generate(&second).expect("second");

    let a = image::open(&first.output).expect("open a").to_rgb8();
    let b = image::open(&second.output).expect("open b").to_rgb8();
    assert_eq!(a, b);
}

#[test]
fn fixed_version_without_fit_reports_capacity() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut config = config_in(dir.path(), "too_small.png");
    config.symbol.fit = false;

    let err = wakeqr::generate(&config).expect_err("secret exceeds version 1");
    assert!(matches!(err, Error::Capacity { version: 1, .. }));
    assert!(!config.output.exists(), "nothing is written on failure");
}

#[test]
fn unwritable_destination_is_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = config_in(&dir.path().join("no_such_dir"), "qr.png");

    let err = wakeqr::generate(&config).expect_err("missing directory");
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn high_correction_survives_obscured_modules() {
    let mut symbol = QrEncoder::new()
        .encode_string(DEFAULT_SECRET)
        .expect("encode");
    assert!(symbol.version() <= 6);

    damage_centre(&mut symbol, 4);
    assert_eq!(decode(&symbol, 6).expect("decode damaged"), DEFAULT_SECRET);
}

#[test]
fn damaged_symbol_differs_but_payload_is_recovered_at_each_level() {
    for ec_level in [ErrorCorrection::Medium, ErrorCorrection::Quartile, ErrorCorrection::High] {
        let encoder = QrEncoder::with_config(SymbolConfig {
            version: 2,
            ec_level,
            fit: true,
        });
        let pristine = encoder.encode_string("WAKE").expect("encode");
        let mut damaged = pristine.clone();
        damage_centre(&mut damaged, 2);

        assert_ne!(pristine, damaged);
        assert_eq!(decode(&damaged, 6).expect("decode"), "WAKE", "{ec_level}");
    }
}

#[test]
fn version_two_layout_covers_all_codewords() {
    // 44 codewords plus 7 remainder bits.
    assert_eq!(version_two_data_modules().len(), 44 * 8 + 7);
}

#[test]
fn high_correction_recovers_a_quarter_of_codewords() {
    let mut symbol = version_two(ErrorCorrection::High, "WAKE");
    // 12 of 44 codewords (96 of 359 data modules); High carries 28 EC codewords.
    corrupt_codewords(&mut symbol, 12);

    assert_eq!(decode(&symbol, 6).expect("decode damaged"), "WAKE");
}

#[test]
fn low_correction_loses_the_same_damage() {
    let mut symbol = version_two(ErrorCorrection::Low, "WAKE");
    // Low carries 10 EC codewords, so 12 bad codewords exceed what it restores.
    corrupt_codewords(&mut symbol, 12);

    match decode(&symbol, 6) {
        Ok(text) => assert_ne!(text, "WAKE"),
        Err(err) => assert!(
            matches!(err, Error::QrDecode(_) | Error::NoQrCodeFound),
            "{err:?}"
        ),
    }
}

#[test]
fn oversized_box_is_config_error_without_output() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut config = config_in(dir.path(), "huge.png");
    config.render.box_size = 200_000_000;

    let err = wakeqr::generate(&config).expect_err("image too large");
    assert!(matches!(err, Error::Config(_)), "{err:?}");
    assert!(!config.output.exists());
}

#[test]
fn rgb_incapable_extension_is_config_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = config_in(dir.path(), "qr.hdr");
    std::fs::write(&config.output, b"previous contents").expect("seed file");

    let err = wakeqr::generate(&config).expect_err("hdr cannot hold rgb8");
    assert!(matches!(err, Error::Config(_)), "{err:?}");
    assert_eq!(std::fs::read(&config.output).expect("read"), b"previous contents");
}
