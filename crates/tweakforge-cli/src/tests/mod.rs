//! Runtime tests driven through substituted configuration and IO streams.

use std::ffi::OsString;
use std::fs;
use std::io::Cursor;
use std::process::ExitCode;

use camino::Utf8PathBuf;
use insta::assert_snapshot;
use rstest::{fixture, rstest};
use tempfile::TempDir;
use tweakforge_config::Config;
use tweakforge_lexer::tokenize;

use crate::commands::{parse_selection, render_row};
use crate::{AppError, ConfigLoader, IoStreams, run_with_loader};

const SELECTION_JSON: &str = r#"[
    {"id": "telemetry", "title": "Disable Telemetry", "code": "Stop-Service -Name DiagTrack"},
    {"id": "dns", "title": "Optimize DNS", "code": "ipconfig /flushdns", "downloads": 3}
]"#;

struct StaticConfigLoader {
    config: Config,
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self, _args: &[OsString]) -> Result<Config, AppError> {
        Ok(self.config.clone())
    }
}

struct Outcome {
    exit: ExitCode,
    stdout: String,
    stderr: String,
}

fn run_cli(config: Config, args: &[&str], stdin: &str) -> Outcome {
    let mut input = Cursor::new(stdin.as_bytes().to_vec());
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let loader = StaticConfigLoader { config };
    let mut io = IoStreams::new(&mut input, &mut stdout, &mut stderr);
    let argv = std::iter::once("tweakforge")
        .chain(args.iter().copied())
        .map(OsString::from);
    let exit = run_with_loader(argv, &mut io, &loader);
    Outcome {
        exit,
        stdout: String::from_utf8(stdout).expect("stdout utf8"),
        stderr: String::from_utf8(stderr).expect("stderr utf8"),
    }
}

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn path(&self, name: &str) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(self.dir.path().join(name)).expect("utf8 temp path")
    }

    fn write(&self, name: &str, contents: &str) -> String {
        let path = self.path(name);
        fs::write(&path, contents).expect("write fixture");
        path.into_string()
    }
}

#[fixture]
fn workspace() -> Workspace {
    Workspace {
        dir: TempDir::new().expect("temp dir"),
    }
}

fn quiet() -> Config {
    Config {
        always_show_warning: Some(false),
        show_comments: Some(false),
        ..Config::default()
    }
}

#[rstest]
fn compose_prints_combined_script(workspace: Workspace) {
    let selection = workspace.write("selection.json", SELECTION_JSON);
    let outcome = run_cli(quiet(), &["compose", &selection], "");
    assert_eq!(outcome.exit, ExitCode::SUCCESS);
    assert!(outcome.stdout.starts_with("#Requires -Version 5.1"));
    assert!(
        outcome
            .stdout
            .contains("\nStop-Service -Name DiagTrack\n\nipconfig /flushdns\n")
    );
    assert!(outcome.stderr.is_empty(), "stderr: {}", outcome.stderr);
}

#[rstest]
fn compose_reports_export_notice(workspace: Workspace) {
    let selection = workspace.write("selection.json", SELECTION_JSON);
    let outcome = run_cli(Config::default(), &["compose", &selection], "");
    assert_eq!(outcome.exit, ExitCode::SUCCESS);
    assert!(outcome.stderr.starts_with("notice: review generated scripts"));
}

#[rstest]
fn compose_writes_per_tweak_artifacts(workspace: Workspace) {
    let selection = workspace.write("selection.json", SELECTION_JSON);
    let out_dir = workspace.path("out");
    let config = Config {
        download_each_tweak: Some(true),
        ..quiet()
    };
    let outcome = run_cli(config, &["compose", &selection, "--out-dir", out_dir.as_str()], "");
    assert_eq!(outcome.exit, ExitCode::SUCCESS);
    let telemetry = fs::read_to_string(out_dir.join("Disable_Telemetry.ps1")).expect("artifact");
    assert!(telemetry.contains("Stop-Service -Name DiagTrack"));
    assert!(out_dir.join("Optimize_DNS.ps1").is_file());
    assert_eq!(outcome.stdout.lines().count(), 2);
}

#[rstest]
fn compose_prefers_override_file(workspace: Workspace) {
    let selection = workspace.write("selection.json", SELECTION_JSON);
    let custom = workspace.write("custom.ps1", "Write-Host 'custom'");
    let outcome = run_cli(quiet(), &["compose", &selection, "--override", &custom], "");
    assert_eq!(outcome.exit, ExitCode::SUCCESS);
    assert_eq!(outcome.stdout, "Write-Host 'custom'\n");
}

#[rstest]
fn compose_prints_placeholder_for_empty_selection(workspace: Workspace) {
    let selection = workspace.write("selection.json", r#"{"tweaks": []}"#);
    let outcome = run_cli(quiet(), &["compose", &selection], "");
    assert_eq!(outcome.exit, ExitCode::SUCCESS);
    assert_eq!(
        outcome.stdout.trim_end(),
        tweakforge_compose::EMPTY_SELECTION_PLACEHOLDER
    );
}

#[rstest]
fn compose_rejects_malformed_selection(workspace: Workspace) {
    let selection = workspace.write("selection.json", "{\"tweaks\": 3}");
    let outcome = run_cli(quiet(), &["compose", &selection], "");
    assert_eq!(outcome.exit, ExitCode::FAILURE);
    assert!(outcome.stderr.starts_with("failed to parse selection"));
}

#[test]
fn selection_accepts_wrapped_object() {
    let wrapped = format!("{{\"tweaks\": {SELECTION_JSON}}}");
    let path = Utf8PathBuf::from("selection.json");
    let selection = parse_selection(&path, &wrapped).expect("wrapped selection");
    assert_eq!(selection.ids().collect::<Vec<_>>(), vec!["telemetry", "dns"]);
}

#[test]
fn missing_file_is_reported() {
    let outcome = run_cli(quiet(), &["highlight", "/nonexistent/tweakforge.ps1"], "");
    assert_eq!(outcome.exit, ExitCode::FAILURE);
    assert!(outcome.stderr.starts_with("failed to read /nonexistent/tweakforge.ps1"));
}

#[test]
fn renders_token_rows() {
    assert_snapshot!(
        render_row(&tokenize("$x = 1")),
        @r#"variable:"$x" text:" " operator:"=" text:" " number:"1""#
    );
}

#[rstest]
fn highlight_prints_numbered_rows(workspace: Workspace) {
    let script = workspace.write("script.ps1", "# setup\n$x = 1\n");
    let outcome = run_cli(quiet(), &["highlight", &script], "");
    assert_eq!(outcome.exit, ExitCode::SUCCESS);
    assert_eq!(
        outcome.stdout,
        "   1: comment:\"# setup\"\n   2: variable:\"$x\" text:\" \" operator:\"=\" text:\" \" number:\"1\"\n"
    );
}

#[rstest]
fn highlight_emits_json_rows(workspace: Workspace) {
    let script = workspace.write("script.ps1", "Get-Process\n'a'");
    let outcome = run_cli(quiet(), &["highlight", &script, "--output", "json"], "");
    assert_eq!(outcome.exit, ExitCode::SUCCESS);
    let rows: serde_json::Value = serde_json::from_str(&outcome.stdout).expect("json rows");
    assert_eq!(rows[0][0]["kind"], "command");
    assert_eq!(rows[1][0]["kind"], "string");
    assert_eq!(rows[1][0]["value"], "'a'");
}

#[test]
fn redact_reads_stdin() {
    let outcome = run_cli(quiet(), &["redact"], "mail admin@example.com\n");
    assert_eq!(outcome.exit, ExitCode::SUCCESS);
    assert_eq!(outcome.stdout, "mail [REDACTED_EMAIL]\n");
}

#[rstest]
#[case(Some(true), "1 abcdefghijkl\n3 ab\n")]
#[case(Some(false), "1 abcdefghijkl\n2 ab\n")]
fn gutter_follows_word_wrap(
    workspace: Workspace,
    #[case] word_wrap: Option<bool>,
    #[case] expected: &str,
) {
    let script = workspace.write("script.ps1", "abcdefghijkl\nab\n");
    let config = Config {
        word_wrap,
        ..quiet()
    };
    let outcome = run_cli(config, &["gutter", &script, "--columns", "8"], "");
    assert_eq!(outcome.exit, ExitCode::SUCCESS);
    assert_eq!(outcome.stdout, expected);
}

#[test]
fn missing_subcommand_fails() {
    let outcome = run_cli(quiet(), &[], "");
    assert_eq!(outcome.exit, ExitCode::FAILURE);
    assert!(outcome.stderr.contains("Usage: tweakforge"));
}

#[test]
fn help_goes_to_stdout() {
    let outcome = run_cli(quiet(), &["--help"], "");
    assert_eq!(outcome.exit, ExitCode::SUCCESS);
    assert!(outcome.stdout.contains("compose"));
    assert!(outcome.stderr.is_empty());
}
