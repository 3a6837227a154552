mod cli {
    use assert_cmd::prelude::*;
    use predicates::prelude::*;
    use predicates::str::contains;
    use std::fs;
    use std::process::Command;
    use tempfile::TempDir;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    const NAME: &str = "goldmine";

    const LOG: &str = "BEGIN_COMMIT
Hash|abc123
Author|Jane
Date|01-02-2023 10:00:00
Message|Fix bug
5\t0\tapp/models/user.rb
3\t1\tapp/javascript/mastodon/a.js
";

    #[test]
    fn test_output_when_no_file_provided() -> TestResult {
        let mut cmd = Command::cargo_bin(NAME)?;

        cmd.assert()
            .failure()
            .code(1)
            .stdout(contains("Please provide a path to the git log file."))
            .stdout(contains("Usage:"));
        Ok(())
    }

    #[test]
    fn test_output_prints_cleaned_table() -> TestResult {
        let dir = TempDir::new()?;
        let log = dir.path().join("history.log");
        fs::write(&log, LOG)?;

        let mut cmd = Command::cargo_bin(NAME)?;
        cmd.arg(&log);

        cmd.assert()
            .success()
            .stdout(contains("abc123"))
            .stdout(contains("frontend"))
            .stdout(contains("[2 rows x 9 columns]"));
        Ok(())
    }

    #[test]
    fn test_output_json_and_charts() -> TestResult {
        let dir = TempDir::new()?;
        let log = dir.path().join("history.log");
        let json = dir.path().join("rows.json");
        let charts = dir.path().join("charts");
        fs::write(&log, LOG)?;

        let mut cmd = Command::cargo_bin(NAME)?;
        cmd.arg(&log).arg("--json").arg(&json).arg("--charts").arg(&charts).arg("-q");
        cmd.assert().success().stdout(contains("commit_trend.png"));

        let rows: serde_json::Value = serde_json::from_str(&fs::read_to_string(&json)?)?;
        let rows = rows.as_array().ok_or("expected array")?;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["Technology"], "Ruby");
        assert_eq!(rows[1]["Component"], "frontend");
        assert!(charts.join("treemap_commits_per_component.png").exists());
        Ok(())
    }

    #[test]
    fn test_output_legacy_deleted() -> TestResult {
        let dir = TempDir::new()?;
        let log = dir.path().join("history.log");
        let json = dir.path().join("rows.json");
        fs::write(&log, LOG)?;

        let mut cmd = Command::cargo_bin(NAME)?;
        cmd.arg(&log).arg("--legacy-deleted").arg("--json").arg(&json);
        cmd.assert().success();

        let rows: serde_json::Value = serde_json::from_str(&fs::read_to_string(&json)?)?;
        assert_eq!(rows[0]["Deleted"], 5);
        assert_eq!(rows[1]["Deleted"], 3);
        Ok(())
    }

    #[test]
    fn test_output_malformed_log_fails() -> TestResult {
        let dir = TempDir::new()?;
        let log = dir.path().join("history.log");
        fs::write(&log, "BEGIN_COMMIT\nHash|a\nDate|01-01-2023 00:00:00\n2\tfoo.rb\n")?;

        let mut cmd = Command::cargo_bin(NAME)?;
        cmd.arg(&log);

        cmd.assert()
            .failure()
            .stderr(contains("malformed file-change line 4"))
            .stdout(predicate::str::is_empty());
        Ok(())
    }
}
