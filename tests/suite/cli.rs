//! End-to-end runs of the `kanagi` binary over JSON lines.

use std::io::Write;
use std::process::{Command, Output, Stdio};

fn run_cli(stdin: &str, config: &tempfile::NamedTempFile) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_kanagi"))
        .env("KANAGI_CONFIG", config.path())
        .env("RUST_LOG", "warn")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn kanagi");
    child
        .stdin
        .take()
        .expect("piped stdin")
        .write_all(stdin.as_bytes())
        .expect("write stdin");
    child.wait_with_output().expect("wait for kanagi")
}

fn default_config() -> tempfile::NamedTempFile {
    tempfile::NamedTempFile::new().unwrap()
}

#[test]
fn plans_stream_one_per_line() {
    let input = [
        r#"{"message":"同じ質問","sessionId":"s1","turnCount":1}"#,
        r#"{"message":"同じ質問","sessionId":"s1","turnCount":2,"previousAxis":"observational"}"#,
    ]
    .join("\n");
    let output = run_cli(&input, &default_config());
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8(output.stdout).unwrap();
    let plans: Vec<serde_json::Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(plans.len(), 2);
    assert_eq!(plans[0]["phase"], "L-IN");
    assert_eq!(plans[1]["loopState"]["consecutiveCount"], 2);
    assert_eq!(plans[1]["loopOutcome"]["kind"], "center_reorganizing");
    assert!(plans.iter().all(|p| p["provisional"] == true));
}

#[test]
fn malformed_law_id_exits_nonzero() {
    let input = r#"{"message":"x","sessionId":"s","evidence":{"doc":"d","docKey":"khs","pdfPage":1,"pageText":"","laws":[{"id":"bad","title":"t","quote":"q"}]}}"#;
    let output = run_cli(input, &default_config());
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("line 1"));
}

#[test]
fn invalid_config_exits_nonzero() {
    let mut config = default_config();
    config.write_all(b"[loop]\nthreshold = 1\n").unwrap();
    let output = run_cli("", &config);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(&config.path().display().to_string()), "{stderr}");
}

#[test]
fn config_from_env_path_sets_loop_threshold() {
    let mut config = default_config();
    config.write_all(b"[loop]\nthreshold = 3\n").unwrap();
    let input = [
        r#"{"message":"同じ質問","sessionId":"s1","turnCount":1}"#,
        r#"{"message":"同じ質問","sessionId":"s1","turnCount":1}"#,
    ]
    .join("\n");
    let output = run_cli(&input, &config);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8(output.stdout).unwrap();
    let last: serde_json::Value = serde_json::from_str(stdout.lines().last().unwrap()).unwrap();
    assert_eq!(last["loopState"]["consecutiveCount"], 2);
    assert_eq!(last["loopOutcome"]["kind"], "normal");
}
