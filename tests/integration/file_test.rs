//! Integration tests for the file conversion workflow

#[cfg(test)]
mod file_conversion_tests {
    use hotspotconv::conversion::{run_conversion, ConversionConfig, RowPolicy};
    use hotspotconv::error::ConversionErrorKind;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    const HOTSPOT_HEADER: &str = "사고다발지fid,사고다발지id,법정동코드,지점코드,시도시군구명,지점명,사고건수,사상자수,사망자수,중상자수,경상자수,부상신고자수,경도,위도,다발지역폴리곤";

    fn hotspot_csv() -> String {
        format!(
            "{}\n{}\n{}\n",
            HOTSPOT_HEADER,
            r#"6244382,2022089,1111013800,11110001,서울특별시 종로구1,서울특별시 종로구 종로2가(종로2가 부근),5,7,0,3,4,0,126.988,37.5703,"{""type"":""Polygon""}""#,
            "6244383,2022089,1114010300,11140001,서울특별시 중구2,서울특별시 중구 명동(명동 부근),4,4,0,1,3,0,126.9852,37.5637,",
        )
    }

    fn write_cp949(path: &Path, text: &str) {
        let (bytes, _, had_errors) = encoding_rs::EUC_KR.encode(text);
        assert!(!had_errors);
        fs::write(path, &bytes).unwrap();
    }

    fn read_json(path: &Path) -> Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn test_hotspot_export_is_renamed() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("dataset.csv");
        let output = dir.path().join("dataset_converted.json");
        write_cp949(&input, &hotspot_csv());

        let outcome = run_conversion(&ConversionConfig::for_paths(&input, &output));
        assert!(outcome.is_success());

        let records = read_json(&output);
        let records = records.as_array().unwrap();
        assert_eq!(records.len(), 2);

        let first = records[0].as_object().unwrap();
        let keys: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "fid",
                "id",
                "legal_dong_code",
                "spot_code",
                "city_district_name",
                "spot_name",
                "accident_count",
                "casualty_count",
                "death_count",
                "severe_injury_count",
                "minor_injury_count",
                "reported_injury_count",
                "longitude",
                "latitude",
                "polygon_geom",
            ]
        );
        assert_eq!(first["spot_name"], json!("서울특별시 종로구 종로2가(종로2가 부근)"));
        assert_eq!(first["accident_count"], json!(5));
        assert_eq!(first["latitude"], json!(37.5703));
        assert_eq!(first["polygon_geom"], json!(r#"{"type":"Polygon"}"#));
        assert_eq!(records[1]["polygon_geom"], Value::Null);
    }

    #[test]
    fn test_output_layout_is_indented_and_literal() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.csv");
        let output = dir.path().join("out.json");
        write_cp949(&input, "지점명,사고건수\n명동,4\n");

        let config = ConversionConfig::for_paths(&input, &output).with_column_map(None);
        assert!(run_conversion(&config).is_success());

        let text = fs::read_to_string(&output).unwrap();
        assert_eq!(
            text,
            "[\n    {\n        \"지점명\": \"명동\",\n        \"사고건수\": 4\n    }\n]"
        );
    }

    #[test]
    fn test_round_trip_matches_source_rows() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.csv");
        let output = dir.path().join("out.json");
        let csv_text = "code,name,count\n0101,가,1\n0202,나,\n0303,다,3\n";
        write_cp949(&input, csv_text);

        let config = ConversionConfig::for_paths(&input, &output).with_column_map(None);
        assert!(run_conversion(&config).is_success());

        let records = read_json(&output);
        let records = records.as_array().unwrap();
        assert_eq!(records.len(), csv_text.lines().count() - 1);
        assert_eq!(records[0], json!({"code": "0101", "name": "가", "count": 1}));
        assert_eq!(records[1], json!({"code": "0202", "name": "나", "count": null}));
        assert_eq!(records[2], json!({"code": "0303", "name": "다", "count": 3}));
    }

    #[test]
    fn test_missing_input_reports_not_found() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("out.json");
        let config = ConversionConfig::for_paths(dir.path().join("nope.csv"), &output);

        let outcome = run_conversion(&config);

        let err = outcome.error().expect("should fail");
        assert!(matches!(err.kind, ConversionErrorKind::InputNotFound { .. }));
        assert!(err.user_message().contains("not found"));
        assert!(!output.exists());
    }

    #[test]
    fn test_ragged_rows_strict_and_padded() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.csv");
        let output = dir.path().join("out.json");
        fs::write(&input, "a,b,c\n1,2,3\n4,5\n").unwrap();

        let strict = ConversionConfig::for_paths(&input, &output);
        let outcome = run_conversion(&strict);
        assert!(outcome.error().unwrap().is_load());
        assert!(!output.exists());

        let padded = strict.with_row_policy(RowPolicy::PadShort);
        assert!(run_conversion(&padded).is_success());
        assert_eq!(
            read_json(&output),
            json!([{"a": 1, "b": 2, "c": 3}, {"a": 4, "b": 5, "c": null}])
        );
    }

    #[test]
    fn test_header_only_writes_empty_array() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.csv");
        let output = dir.path().join("out.json");
        fs::write(&input, "a,b\n").unwrap();

        assert!(run_conversion(&ConversionConfig::for_paths(&input, &output)).is_success());
        assert_eq!(fs::read_to_string(&output).unwrap(), "[]");
    }

    #[test]
    fn test_existing_output_is_overwritten() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.csv");
        let output = dir.path().join("out.json");
        fs::write(&input, "a\n1\n").unwrap();
        fs::write(&output, "stale content that is longer than the result").unwrap();

        assert!(run_conversion(&ConversionConfig::for_paths(&input, &output)).is_success());
        assert_eq!(read_json(&output), json!([{"a": 1}]));
    }
}
