mod common;

use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

#[test]
fn test_malformed_rows_are_skipped() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "cla, ins, p1, p2, p3, data").unwrap();
    writeln!(file, "B0, 30, 00, 00, 01, 05").unwrap();
    // Not hex
    writeln!(file, "B0, 3G, 00, 00, 01, 05").unwrap();
    // Two bytes where one is expected
    writeln!(file, "B0B0, 30, 00, 00, 01, 05").unwrap();
    // Odd number of data digits
    writeln!(file, "B0, 30, 00, 00, 01, 5").unwrap();
    writeln!(file, "B0, 50, 00, 00, 02,").unwrap();

    let mut cmd = Command::new(cargo_bin!("cardwallet"));
    cmd.arg(file.path());

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Error reading command"))
        .stdout(predicate::str::contains("B0,50,9000,0005"));
}

#[test]
fn test_rejected_commands_keep_balance() {
    let file = NamedTempFile::new().unwrap();
    common::write_script(
        file.path(),
        &[
            common::credit(42),
            common::get_balance(),
            // Wrong class
            common::row("80", "30", "01", "01"),
            common::get_balance(),
            // Unknown instruction
            common::row("B0", "20", "01", "01"),
            common::get_balance(),
            // Missing amount
            common::row("B0", "30", "01", ""),
            common::get_balance(),
            // Two amount bytes
            common::row("B0", "40", "02", "0101"),
            common::get_balance(),
        ],
    )
    .unwrap();

    let mut cmd = Command::new(cargo_bin!("cardwallet"));
    cmd.arg(file.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("80,30,6E00,"))
        .stdout(predicate::str::contains("B0,20,6D00,"))
        .stdout(predicate::str::contains("B0,30,6700,"))
        .stdout(predicate::str::contains("B0,40,6700,"))
        .stdout(predicate::str::contains("B0,50,9000,002A").count(5))
        .stderr(predicate::str::contains("Final balance: 42"));
}

#[test]
fn test_short_response_length() {
    let file = NamedTempFile::new().unwrap();
    common::write_script(
        file.path(),
        &[
            common::row("B0", "50", "01", ""),
            // Le = 00 accepts up to 256 bytes
            common::row("B0", "50", "00", ""),
        ],
    )
    .unwrap();

    let mut cmd = Command::new(cargo_bin!("cardwallet"));
    cmd.arg(file.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("B0,50,6700,\nB0,50,9000,0000"));
}

#[test]
fn test_empty_script() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "cla, ins, p1, p2, p3, data").unwrap();

    let mut cmd = Command::new(cargo_bin!("cardwallet"));
    cmd.arg(file.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::diff("cla,ins,sw,data\n"))
        .stderr(predicate::str::contains("Final balance: 0"));
}
