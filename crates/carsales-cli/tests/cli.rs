use std::io::Write;
use std::process::{Command, Stdio};

use pretty_assertions::assert_eq;

fn carsales() -> Command {
    Command::new(env!("CARGO_BIN_EXE_carsales"))
}

fn json_lines(stdout: &[u8]) -> Vec<serde_json::Value> {
    String::from_utf8_lossy(stdout)
        .lines()
        .map(|line| serde_json::from_str(line).expect("json line"))
        .collect()
}

#[test]
fn demo_json_emits_every_view() {
    let output = carsales()
        .args(["demo", "--count", "5", "--seed", "3", "--format", "json"])
        .output()
        .expect("run carsales");
    assert!(
        output.status.success(),
        "stderr:\n{}",
        String::from_utf8_lossy(&output.stderr)
    );

    let views = json_lines(&output.stdout);
    let keys: Vec<&str> = views.iter().map(|v| v["view"].as_str().unwrap()).collect();
    assert_eq!(
        keys,
        vec![
            "sales",
            "salesperson_totals",
            "category_totals",
            "rankings",
            "filtered"
        ]
    );
    assert_eq!(views[0]["rows"].as_array().unwrap().len(), 5);
    assert_eq!(views[3]["rows"][0][0], "1");
}

#[test]
fn demo_is_reproducible_with_seed() {
    let run = || {
        carsales()
            .args(["demo", "--count", "6", "--seed", "99"])
            .output()
            .expect("run carsales")
            .stdout
    };
    assert_eq!(run(), run());
}

#[test]
fn demo_rejects_bad_count() {
    let output = carsales()
        .args(["demo", "--count", "zero"])
        .output()
        .expect("run carsales");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid count"));
}

#[test]
fn session_reads_commands_from_stdin() {
    let mut child = carsales()
        .args(["session", "--format", "json"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn carsales");

    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(
            b"load [[\"A\", 10, 5, 0], [\"B\", 1, 1, 1], [\"C\", 20, 0, 0]]\n\
              categories\n\
              rank\n\
              filter 20\n\
              quit\n",
        )
        .expect("write commands");

    let output = child.wait_with_output().expect("wait for carsales");
    assert!(output.status.success());

    let views = json_lines(&output.stdout);
    assert_eq!(views.len(), 4);
    assert_eq!(
        views[1]["rows"],
        serde_json::json!([["SUV", "31"], ["Sedan", "6"], ["Hatchback", "1"]])
    );
    assert_eq!(
        views[2]["rows"],
        serde_json::json!([["1", "C", "20"], ["2", "A", "15"], ["3", "B", "3"]])
    );
    assert_eq!(views[3]["rows"], serde_json::json!([["No results", ""]]));
}

#[test]
fn session_json_errors_stay_json() {
    let mut child = carsales()
        .args(["session", "--format", "json"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn carsales");

    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(b"rank\ngenerate 2\nfilter lots\nquit\n")
        .expect("write commands");

    let output = child.wait_with_output().expect("wait for carsales");
    assert!(output.status.success());

    let lines = json_lines(&output.stdout);
    assert_eq!(lines.len(), 3);
    assert!(lines[0]["error"].as_str().unwrap().contains("generate"));
    assert_eq!(lines[1]["view"], "sales");
    assert!(lines[2]["error"]
        .as_str()
        .unwrap()
        .contains("invalid threshold"));
}

#[test]
fn demo_rejects_negative_count() {
    let output = carsales()
        .args(["demo", "--count", "-3"])
        .output()
        .expect("run carsales");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid count"));
}

#[test]
fn config_file_changes_categories() {
    let mut file = tempfile::NamedTempFile::new().expect("temp config");
    file.write_all(br#"{"categories": ["Truck", "Van"], "defaultCount": 3}"#)
        .expect("write config");

    let output = carsales()
        .arg("demo")
        .arg("--seed")
        .arg("1")
        .arg("--format")
        .arg("json")
        .arg("--config")
        .arg(file.path())
        .output()
        .expect("run carsales");
    assert!(
        output.status.success(),
        "stderr:\n{}",
        String::from_utf8_lossy(&output.stderr)
    );

    let views = json_lines(&output.stdout);
    assert_eq!(
        views[0]["headers"],
        serde_json::json!(["Salesperson", "Truck", "Van"])
    );
    assert_eq!(views[0]["rows"].as_array().unwrap().len(), 3);
}
