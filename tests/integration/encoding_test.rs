//! Integration tests for input decoding and output encoding

use hotspotconv::conversion::{run_conversion, ConversionConfig};
use hotspotconv::error::ConversionErrorKind;
use serde_json::{json, Value};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_cp949_bytes_decode_to_hangul() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.csv");
    let output = dir.path().join("out.json");
    let (bytes, _, _) = encoding_rs::EUC_KR.encode("시도시군구명\n부산광역시 해운대구\n");
    fs::write(&input, &bytes).unwrap();

    assert!(run_conversion(&ConversionConfig::for_paths(&input, &output)).is_success());

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.contains("\"city_district_name\": \"부산광역시 해운대구\""));
    assert!(!text.contains("\\u"));
}

#[test]
fn test_invalid_cp949_bytes_fail_to_load() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.csv");
    let output = dir.path().join("out.json");
    // 0xFF is never a valid lead byte in cp949
    fs::write(&input, b"name\n\xFF\xFF\n").unwrap();

    let outcome = run_conversion(&ConversionConfig::for_paths(&input, &output));

    let err = outcome.error().expect("decode should fail");
    assert!(err.is_load());
    assert!(matches!(err.kind, ConversionErrorKind::Decode { .. }));
    assert!(!output.exists());
}

#[test]
fn test_utf8_sig_input_and_output() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.csv");
    let output = dir.path().join("out.json");
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend_from_slice("위도,경도\n37.5,127.0\n".as_bytes());
    fs::write(&input, &bytes).unwrap();

    let config = ConversionConfig::for_paths(&input, &output)
        .with_output_encoding("utf-8-sig")
        .unwrap();
    assert!(run_conversion(&config).is_success());

    let written = fs::read(&output).unwrap();
    assert_eq!(&written[..3], &[0xEF, 0xBB, 0xBF]);
    let value: Value = serde_json::from_slice(&written[3..]).unwrap();
    assert_eq!(value, json!([{"latitude": 37.5, "longitude": 127.0}]));
}

#[test]
fn test_unencodable_output_is_write_failure() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.csv");
    let output = dir.path().join("out.json");
    let (bytes, _, _) = encoding_rs::EUC_KR.encode("지점명\n명동\n");
    fs::write(&input, &bytes).unwrap();

    let config = ConversionConfig::for_paths(&input, &output)
        .with_output_encoding("windows-1252")
        .unwrap();
    let outcome = run_conversion(&config);

    let err = outcome.error().expect("encode should fail");
    assert!(err.is_write());
    assert!(matches!(err.kind, ConversionErrorKind::Unencodable { .. }));
}
