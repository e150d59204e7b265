//! Integration tests for the command-line binary

#[cfg(test)]
mod cli_tests {
    use serde_json::{json, Value};
    use std::fs;
    use std::path::Path;
    use std::process::{Command, Output};
    use tempfile::tempdir;

    fn run_hotspotconv(dir: &Path, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_hotspotconv"))
            .current_dir(dir)
            .args(args)
            .env_remove("RUST_LOG")
            .output()
            .expect("failed to run hotspotconv")
    }

    fn write_cp949(path: &Path, text: &str) {
        let (bytes, _, _) = encoding_rs::EUC_KR.encode(text);
        fs::write(path, &bytes).unwrap();
    }

    #[test]
    fn test_defaults_read_dataset_csv() {
        let dir = tempdir().unwrap();
        write_cp949(&dir.path().join("dataset.csv"), "지점명,사고건수\n명동,4\n");

        let output = run_hotspotconv(dir.path(), &[]);
        let stdout = String::from_utf8_lossy(&output.stdout);

        assert!(output.status.success());
        assert!(stdout.contains("Loaded 1 rows"), "stdout: {}", stdout);

        let written: Value = serde_json::from_str(
            &fs::read_to_string(dir.path().join("dataset_converted.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(written, json!([{"spot_name": "명동", "accident_count": 4}]));
    }

    #[test]
    fn test_missing_input_exits_cleanly() {
        let dir = tempdir().unwrap();

        let output = run_hotspotconv(dir.path(), &["missing.csv", "-o", "out.json"]);
        let stderr = String::from_utf8_lossy(&output.stderr);

        assert!(output.status.success());
        assert!(stderr.contains("Input file not found"), "stderr: {}", stderr);
        assert!(!dir.path().join("out.json").exists());
    }

    #[test]
    fn test_no_rename_and_utf8_input() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("in.csv"), "지점명|비고\n명동|메모\n").unwrap();

        let output = run_hotspotconv(
            dir.path(),
            &[
                "in.csv",
                "-o",
                "out.json",
                "--input-encoding",
                "utf-8",
                "--no-rename",
                "--delimiter",
                "pipe",
                "--quiet",
            ],
        );

        assert!(output.status.success());
        assert!(output.stdout.is_empty());
        let written: Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join("out.json")).unwrap())
                .unwrap();
        assert_eq!(written, json!([{"지점명": "명동", "비고": "메모"}]));
    }

    #[test]
    fn test_stats_flag_prints_report() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("in.csv"), "a,b\n1,2\n3,4\n").unwrap();

        let output = run_hotspotconv(dir.path(), &["in.csv", "-o", "out.json", "--stats"]);
        let stdout = String::from_utf8_lossy(&output.stdout);

        assert!(stdout.contains("Conversion Statistics:"));
        assert!(stdout.contains("Rows: 2"));
    }

    #[test]
    fn test_stats_json_flag() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("in.csv"), "a,b\n1,2\n3,4\n").unwrap();

        let output = run_hotspotconv(
            dir.path(),
            &["in.csv", "-o", "out.json", "--quiet", "--stats-json"],
        );
        let stats: Value = serde_json::from_slice(&output.stdout).unwrap();

        assert_eq!(stats["row_count"], 2);
        assert_eq!(stats["column_count"], 2);
    }

    #[test]
    fn test_write_failure_still_reports_loaded_rows() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("in.csv"), "a\n1\n2\n3\n").unwrap();

        let output = run_hotspotconv(
            dir.path(),
            &[
                "in.csv",
                "-o",
                "missing_dir/out.json",
                "--input-encoding",
                "utf-8",
            ],
        );
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        assert!(output.status.success());
        assert!(stdout.contains("Loaded 3 rows"), "stdout: {}", stdout);
        assert!(!stdout.contains("Saved"), "stdout: {}", stdout);
        assert!(stderr.contains("JSON save error"), "stderr: {}", stderr);
    }

    #[test]
    fn test_missing_input_reported_before_path_clash() {
        let dir = tempdir().unwrap();

        let output = run_hotspotconv(dir.path(), &["data.csv", "-o", "data.csv"]);
        let stderr = String::from_utf8_lossy(&output.stderr);

        assert!(stderr.contains("Input file not found"), "stderr: {}", stderr);
        assert!(!stderr.contains("Invalid configuration"), "stderr: {}", stderr);
    }

    #[test]
    fn test_bad_encoding_label_is_reported() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("in.csv"), "a\n1\n").unwrap();

        let output = run_hotspotconv(dir.path(), &["in.csv", "--input-encoding", "klingon"]);
        let stderr = String::from_utf8_lossy(&output.stderr);

        assert!(stderr.contains("unknown encoding label"), "stderr: {}", stderr);
        assert!(!dir.path().join("dataset_converted.json").exists());
    }
}
