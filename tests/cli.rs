use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("adresko").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("adresko"));
}

#[test]
fn formats_lists_predefined() {
    let mut cmd = Command::cargo_bin("adresko").unwrap();
    cmd.arg("formats");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("48.3x16.9"))
        .stdout(predicate::str::contains("105x148"));
}

#[test]
fn abbrev_apply_uses_dictionary() {
    let dir = tempfile::tempdir().unwrap();
    let dict = dir.path().join("abbreviations.properties");

    let mut cmd = Command::cargo_bin("adresko").unwrap();
    cmd.args(["abbrev", "--dict"])
        .arg(&dict)
        .args(["apply", "Hlavná ulica 12, 851 01 Bratislava"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Hlavná ul. 12"));
}

#[test]
fn abbrev_add_persists_entry() {
    let dir = tempfile::tempdir().unwrap();
    let dict = dir.path().join("abbreviations.properties");

    let mut cmd = Command::cargo_bin("adresko").unwrap();
    cmd.args(["abbrev", "--dict"])
        .arg(&dict)
        .args(["add", "sídlisko", "sídl."]);
    cmd.assert().success();

    let mut cmd = Command::cargo_bin("adresko").unwrap();
    cmd.args(["abbrev", "--dict"]).arg(&dict).arg("list");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("sídlisko = sídl."));
}

#[test]
fn check_reports_status_per_address() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("trieda.csv");
    std::fs::write(
        &input,
        "Meno;Priezvisko;Rodič 1.;Adresa 1.\n\
         Peter;Novák;Ján Novák;Hlavná 12, 851 01 Bratislava\n",
    )
    .unwrap();
    let dict = dir.path().join("abbreviations.properties");

    let mut cmd = Command::cargo_bin("adresko").unwrap();
    cmd.arg("check")
        .arg(&input)
        .args(["--format", "2", "--dict"])
        .arg(&dict);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Ján Novák"))
        .stdout(predicate::str::contains("Vyhovuje"));
}

#[test]
fn unknown_format_number_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("trieda.csv");
    std::fs::write(&input, "Meno,Priezvisko\nPeter,Novák\n").unwrap();

    let mut cmd = Command::cargo_bin("adresko").unwrap();
    cmd.arg("check").arg(&input).args(["--format", "9"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("no such format"));
}
