//! Integration tests for the inspect-diagnostics CLI

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const BINARY: &str = env!("CARGO_BIN_EXE_inspect-diagnostics");

const REPORT: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<Report ToolsVersion="2023.2">
  <Information>
    <Solution>App.sln</Solution>
  </Information>
  <IssueTypes>
    <IssueType Id="UnusedVariable" Category="Redundancies in Code" CategoryId="CodeRedundancy" Description="Unused local variable" Severity="WARNING" WikiUrl="https://example.com/UnusedVariable" />
    <IssueType Id="CSharpErrors" Category="C# Compiler Errors" CategoryId="CSharpErrors" Description="C# Compiler Errors" Severity="ERROR" />
    <IssueType Id="ArrangeThisQualifier" Category="Common Practices" CategoryId="BestPractice" Description="Remove redundant 'this.'" Severity="HINT" />
  </IssueTypes>
  <Issues>
    <Project Name="App">
      <Issue TypeId="UnusedVariable" File="src\Program.cs" Offset="40-41" Line="3" Message="Local variable 'x' is never used" />
      <Issue TypeId="ArrangeThisQualifier" File="src\Util.cs" Offset="0-5" Message="Qualifier 'this.' is redundant" />
    </Project>
    <Project Name="App.Tests">
      <Issue TypeId="CSharpErrors" File="tests\ProgramTests.cs" Offset="10-14" Line="2" Message="Cannot resolve symbol 'Fact'" />
      <Issue TypeId="UnusedVariable" File="tests\Deleted.cs" Offset="0-1" Line="1" Message="Gone" />
    </Project>
  </Issues>
</Report>"#;

/// Lays out a small solution plus a report and returns the workspace
fn workspace() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::create_dir_all(root.join("src")).unwrap();
    fs::create_dir_all(root.join("tests")).unwrap();
    fs::write(root.join("App.sln"), "").unwrap();
    fs::write(
        root.join("src/Program.cs"),
        "class Program {\n  void Main() {\n    var x = 1;\n  }\n}\n",
    )
    .unwrap();
    fs::write(root.join("src/Util.cs"), "this.Run();\n").unwrap();
    fs::write(
        root.join("tests/ProgramTests.cs"),
        "class T {\n  [Fact] void M() {}\n}\n",
    )
    .unwrap();
    fs::write(root.join("inspectcode.xml"), REPORT).unwrap();
    temp
}

fn check(root: &Path, extra: &[&str]) -> Output {
    Command::new(BINARY)
        .arg("check")
        .arg(root.join("inspectcode.xml"))
        .arg("--solution")
        .arg(root.join("App.sln"))
        .args(extra)
        .current_dir(root)
        .output()
        .expect("Failed to run command")
}

#[test]
fn test_check_text_output() {
    let temp = workspace();
    let output = check(temp.path(), &[]);

    // An ERROR-severity issue makes the run fail
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);

    // Line 3 starts at offset 32; 'x' sits at 40, column 8 + 1, printed 1-based
    assert!(stdout.contains("Program.cs:3:10: WARNING [UnusedVariable] Local variable 'x' is never used"));
    assert!(stdout.contains("Util.cs:1:2: HINT [ArrangeThisQualifier]"));
    assert!(stdout.contains("ProgramTests.cs:2:2: ERROR [CSharpErrors]"));
    assert!(stdout.contains("1 error(s), 1 warning(s) in 3 file(s)"));
    assert!(stdout.contains("1 issue(s) skipped (file-not-found: 1)"));
}

#[test]
fn test_check_json_output() {
    let temp = workspace();
    let output = check(temp.path(), &["--format", "json"]);

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let files = json["files"].as_array().unwrap();
    assert_eq!(files.len(), 3);

    let program = files
        .iter()
        .find(|f| f["file"].as_str().unwrap().ends_with("Program.cs"))
        .unwrap();
    let diag = &program["diagnostics"][0];
    assert_eq!(diag["severity"], "warning");
    assert_eq!(diag["code"], "UnusedVariable");
    assert_eq!(diag["source"], "inspectcode");
    assert_eq!(diag["href"], "https://example.com/UnusedVariable");
    assert_eq!(diag["range"]["start"]["line"], 2);
    assert_eq!(diag["range"]["start"]["character"], 9);
    assert_eq!(diag["range"]["end"]["character"], 10);

    assert_eq!(json["summary"]["diagnostics"], 3);
    assert_eq!(json["summary"]["skipped"]["file-not-found"], 1);
}

#[test]
fn test_output_keeps_report_order() {
    let temp = workspace();
    fs::write(
        temp.path().join("inspectcode.xml"),
        r#"<Report>
  <IssueTypes>
    <IssueType Id="ArrangeThisQualifier" Severity="HINT" />
  </IssueTypes>
  <Issues>
    <Project Name="App">
      <Issue TypeId="ArrangeThisQualifier" File="src\Util.cs" Offset="0-5" Line="1" Message="util" />
      <Issue TypeId="ArrangeThisQualifier" File="src\Program.cs" Offset="0-5" Line="1" Message="program" />
    </Project>
  </Issues>
</Report>"#,
    )
    .unwrap();

    let output = check(temp.path(), &["--format", "json"]);
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let files: Vec<_> = json["files"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["file"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(files.len(), 2);
    assert!(files[0].ends_with("Util.cs"));
    assert!(files[1].ends_with("Program.cs"));
}

#[test]
fn test_errors_only() {
    let temp = workspace();
    let output = check(temp.path(), &["--errors-only"]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[CSharpErrors]"));
    assert!(!stdout.contains("[UnusedVariable]"));
    assert!(!stdout.contains("[ArrangeThisQualifier]"));
}

#[test]
fn test_first_project_only_from_config() {
    let temp = workspace();
    fs::write(
        temp.path().join(".inspect-diagnostics.yaml"),
        "projects: first\nsource: resharper\n",
    )
    .unwrap();

    let output = check(temp.path(), &["--format", "json"]);
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["files"].as_array().unwrap().len(), 2);
    assert_eq!(json["files"][0]["diagnostics"][0]["source"], "resharper");
}

#[test]
fn test_malformed_report() {
    let temp = workspace();
    fs::write(
        temp.path().join("inspectcode.xml"),
        r#"<Report><IssueTypes/><Issues><Project>
<Issue TypeId="A" File="a.cs" Offset="120" Line="1" Message="m" />
</Project></Issues></Report>"#,
    )
    .unwrap();

    let output = check(temp.path(), &[]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid offset '120'"));
}

#[test]
fn test_missing_report() {
    let temp = TempDir::new().unwrap();
    let output = check(temp.path(), &[]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("IO error"));
}

#[test]
fn test_solutions_listing() {
    let temp = workspace();
    fs::create_dir_all(temp.path().join("node_modules/x")).unwrap();
    fs::write(temp.path().join("node_modules/x/Skip.sln"), "").unwrap();

    let output = Command::new(BINARY)
        .arg("solutions")
        .arg(temp.path())
        .output()
        .expect("Failed to run command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("App.sln"));
    assert!(!stdout.contains("Skip.sln"));
}

#[test]
fn test_inspect_with_missing_tool() {
    let temp = workspace();
    fs::write(
        temp.path().join(".inspect-diagnostics.yaml"),
        "tool:\n  command: inspect-diagnostics-no-such-tool\n",
    )
    .unwrap();

    let output = Command::new(BINARY)
        .arg("inspect")
        .arg(temp.path().join("App.sln"))
        .arg("--workspace")
        .arg(temp.path())
        .output()
        .expect("Failed to run command");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to start"));
}
