#![forbid(unsafe_code)]
use assert_cmd::Command;
use predicates::prelude::*;
use shift_optimizer::Response;

fn cli() -> Command {
    Command::cargo_bin("shift-optimizer-cli").unwrap()
}

fn parse(stdout: &[u8]) -> Response {
    serde_json::from_slice(stdout).unwrap()
}

#[test]
fn feasible_request_exits_zero() {
    let assert = cli()
        .write_stdin(
            r#"{"staff":[{"id":"A"},{"id":"B"},{"id":"C"}],
                "dates":["2024-01-01","2024-01-02"],
                "constraints":{"min_staff_per_day":2,"max_staff_per_day":3}}"#,
        )
        .assert()
        .success();
    let resp = parse(&assert.get_output().stdout);
    assert!(resp.success);
    let shifts = resp.shifts.unwrap();
    assert_eq!(resp.objective_value, Some(shifts.len() as f64));
}

#[test]
fn infeasible_request_still_exits_zero() {
    let assert = cli()
        .write_stdin(r#"{"staff":[{"id":"A"}],"dates":["2024-01-01"]}"#)
        .assert()
        .success();
    let resp = parse(&assert.get_output().stdout);
    insta::assert_json_snapshot!(resp, @r###"
    {
      "success": false,
      "error": "no shift satisfying the constraints could be found; reconsider min/max staffing bounds",
      "status": "Infeasible"
    }
    "###);
}

#[test]
fn empty_dates_yield_empty_schedule() {
    let assert = cli()
        .write_stdin(r#"{"staff":[{"id":1},{"id":2}],"dates":[]}"#)
        .assert()
        .success();
    let resp = parse(&assert.get_output().stdout);
    assert!(resp.success);
    assert_eq!(resp.shifts, Some(vec![]));
    assert_eq!(resp.objective_value, Some(0.0));
    assert_eq!(resp.status, Some(shift_optimizer::SolveStatus::Optimal));
}

#[test]
fn malformed_input_exits_non_zero_with_json_body() {
    cli()
        .write_stdin("this is not json")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::starts_with(r#"{"success":false,"error":"invalid JSON input:"#));
}

#[test]
fn custom_times_and_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("result.json");
    cli()
        .args(["--start-time", "07:30", "--end-time", "15:30", "--output"])
        .arg(&out)
        .write_stdin(r#"{"staff":[{"id":"A"},{"id":"B"}],"dates":["d1"],"constraints":{"min_staff_per_day":1,"max_staff_per_day":1}}"#)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let resp = parse(&std::fs::read(&out).unwrap());
    let shifts = resp.shifts.unwrap();
    assert_eq!(shifts.len(), 1);
    assert_eq!(shifts[0].start_time.format("%H:%M").to_string(), "07:30");
    assert_eq!(shifts[0].end_time.format("%H:%M").to_string(), "15:30");
}

#[test]
fn csv_export_lists_shifts() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("request.json");
    let csv = dir.path().join("shifts.csv");
    std::fs::write(
        &input,
        r#"{"staff":[{"id":"A"},{"id":"B"}],"dates":["d1","d2"],"constraints":{"min_staff_per_day":2,"max_staff_per_day":2}}"#,
    )
    .unwrap();

    cli().arg("--input").arg(&input).arg("--csv").arg(&csv).assert().success();

    let body = std::fs::read_to_string(&csv).unwrap();
    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(
        lines,
        vec![
            "staff_id,date,start_time,end_time",
            "A,d1,09:00,17:00",
            "A,d2,09:00,17:00",
            "B,d1,09:00,17:00",
            "B,d2,09:00,17:00",
        ]
    );
}

#[test]
fn missing_input_file_is_an_error() {
    cli()
        .args(["--input", "/nonexistent/request.json"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(r#""success":false"#));
}

#[test]
fn failed_csv_export_reports_unexpected_error() {
    let dir = tempfile::tempdir().unwrap();
    let csv = dir.path().join("missing-dir").join("shifts.csv");
    let assert = cli()
        .arg("--csv")
        .arg(&csv)
        .write_stdin(r#"{"staff":[{"id":"A"},{"id":"B"}],"dates":["d1"]}"#)
        .assert()
        .code(1)
        .stdout(predicate::str::starts_with(
            r#"{"success":false,"error":"an error occurred:"#,
        ));
    let resp = parse(&assert.get_output().stdout);
    assert_eq!(resp.status, None);
    assert_eq!(resp.shifts, None);
    assert_eq!(std::str::from_utf8(&assert.get_output().stdout).unwrap().lines().count(), 1);
}
