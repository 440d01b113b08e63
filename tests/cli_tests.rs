//! Binary-level tests for the fatal-error paths and CLI surface. These
//! never reach the network: every scenario fails before a request.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn test_help_lists_subcommands() {
    let mut cmd = Command::cargo_bin("cep2addr").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("enrich"))
        .stdout(predicate::str::contains("sample"))
        .stdout(predicate::str::contains("netcheck"));
}

#[test]
fn test_missing_input_file_exits_with_code_1() {
    let dir = TempDir::new().unwrap();

    let mut cmd = Command::cargo_bin("cep2addr").unwrap();
    cmd.arg("enrich")
        .arg(dir.path().join("nao_existe.xlsx"))
        .arg("--output")
        .arg(dir.path().join("saida.xlsx"));

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("file not found"));
}

#[test]
fn test_unsupported_input_format_exits_with_code_3() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("ceps.txt");
    std::fs::write(&input, "01001000\n").unwrap();

    let mut cmd = Command::cargo_bin("cep2addr").unwrap();
    cmd.arg("enrich")
        .arg(&input)
        .arg("--output")
        .arg(dir.path().join("saida.xlsx"));

    cmd.assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("unsupported file format"));
}

#[test]
fn test_missing_cep_column_names_the_available_ones() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("ceps.csv");
    std::fs::write(&input, "CodigoPostal,Obs\n01001000,linha 1\n").unwrap();

    let mut cmd = Command::cargo_bin("cep2addr").unwrap();
    cmd.arg("enrich")
        .arg(&input)
        .arg("--output")
        .arg(dir.path().join("saida.csv"));

    cmd.assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("column \"CEP\" not found"))
        .stderr(predicate::str::contains("CodigoPostal"));
}

#[test]
fn test_sample_respects_column_flag() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("ceps.csv");
    std::fs::write(&input, "CodigoPostal\n01001000\n").unwrap();

    // Wrong column still fatal in sample mode.
    let mut cmd = Command::cargo_bin("cep2addr").unwrap();
    cmd.arg("sample").arg(&input);

    cmd.assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("column \"CEP\" not found"));
}
