//! E2E тесты для CLI инструмента `csv2trn`.
//!
//! Тестируем перевод выписок в оба формата вывода:
//! - ledger (записи журнала)
//! - modcsv (канонический CSV)

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

/// Получить путь к фикстуре.
fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures").join(name)
}

/// Создать команду для запуска csv2trn.
fn csv2trn() -> Command {
    Command::new(env!("CARGO_BIN_EXE_csv2trn"))
}

// ============================================================================
// Формат по умолчанию
// ============================================================================

#[test]
fn test_default_format_to_ledger() {
    csv2trn()
        .write_stdin("1982-10-08,Assets:Saving,Assets:Current,DB,Daily allowance,-30,ALD\n")
        .assert()
        .success()
        .stdout("1982-10-08 (DB) Daily allowance\n  Assets:Saving  -30 ALD\n  Assets:Current\n");
}

#[test]
fn test_default_format_to_modcsv() {
    let input = std::fs::read_to_string(fixture("modcsv.csv")).unwrap();

    csv2trn().args(["-o", "modcsv"]).write_stdin(input.clone()).assert().success().stdout(input);
}

#[test]
fn test_csv_alias_and_input_file() {
    csv2trn()
        .args(["--output", "csv", "--input", fixture("modcsv.csv").to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("2025-05-05,Assets:Current:KB05,Imbalance,DB,"));
}

#[test]
fn test_this_account_and_currency_override() {
    csv2trn()
        .args(["-t", "Assets:Savings", "-c", "$"])
        .write_stdin("2025-05-02,Assets:Current:KB05,Assets:Current:PCUS1,,To term deposit,42.00,NZD\n")
        .assert()
        .success()
        .stdout(
            "2025-05-02 To term deposit\n  Assets:Savings  $42.00\n  Assets:Current:PCUS1\n",
        );
}

// ============================================================================
// Форматы банков
// ============================================================================

#[test]
fn test_kiwibank_statement() {
    csv2trn()
        .args(["-f", fixture("kiwibank.xml").to_str().unwrap(), "-o", "modcsv"])
        .arg("-i")
        .arg(fixture("kiwibank.csv"))
        .assert()
        .success()
        .stdout(
            "2023-12-29,38-9000-0000000-05,38-9000-1111111-00,,Automatic Payment Rates ;Ref: Rates,-162.00,\n\
             2023-12-30,38-9000-0000000-05,Imbalance,,Interest Credit,0.57,\n",
        )
        .stderr(predicate::str::contains("line 1"));
}

#[test]
fn test_descending_statement_with_debit_and_credit() {
    csv2trn()
        .args(["-f", fixture("pcu.xml").to_str().unwrap(), "-t", "Assets:Saving", "-c", "NZD"])
        .arg("-i")
        .arg(fixture("pcu.csv"))
        .assert()
        .success()
        .stdout(
            "2020-01-07 554PHP 18832946 Best of Health\n  Assets:Saving  -16.92 NZD\n  Imbalance\n\
             2020-01-08 Salary January\n  Assets:Saving  1234.50 NZD\n  Imbalance\n",
        )
        .stderr(predicate::str::contains("line 4"));
}

// ============================================================================
// Ошибки
// ============================================================================

#[test]
fn test_missing_this_account_is_fatal() {
    csv2trn()
        .args(["-f", fixture("pcu.xml").to_str().unwrap()])
        .write_stdin("07/01/2020,Best of Health,16.92,,265.01\n")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Cannot get this account"));
}

#[test]
fn test_invalid_format_file() {
    csv2trn()
        .args(["-f", fixture("invalid.xml").to_str().unwrap(), "-t", "Assets:Saving"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("date index cannot be zero"));
}

#[test]
fn test_missing_format_file() {
    csv2trn()
        .args(["-f", "/nonexistent/format.xml"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid record format file"));
}

#[test]
fn test_unknown_output_format() {
    csv2trn().args(["-o", "json"]).write_stdin("").assert().failure();
}

#[test]
fn test_empty_input() {
    csv2trn().write_stdin("").assert().success().stdout(predicate::str::is_empty());
}
