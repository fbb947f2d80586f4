use std::io::Write;

use assert_cmd::Command;
use predicates as pred;
use tempfile::NamedTempFile;

fn bank_ledger() -> Command {
    Command::new(env!("CARGO_BIN_EXE_bank_ledger"))
}

#[test]
fn demo_runs_without_arguments() {
    bank_ledger()
        .assert()
        .success()
        .stdout(pred::str::contains("=== INITIAL STATE ==="))
        .stdout(pred::str::contains(
            "Account{id=A1001, owner=Fares, balance=700, dailyLimit=500, dailyWithdrawn=500, status=ACTIVE}",
        ))
        .stdout(pred::str::contains("A2001,Mohammed,500.00,400.00,0.00,ACTIVE"));
}

#[test]
fn batch_file_outputs_expected_balances() {
    // A1: 1000 + 200 - 300 - 200 (transfer) = 700, 500 withdrawn today
    // A2: 300 + 200, then frozen
    // A3: limit changed after a new day started
    let mut file = NamedTempFile::new().expect("create temp file");
    writeln!(
        file,
        "type, account, detail, amount, limit\n\
    open, A1, Fares, 1000, 500\n\
    open, A2, Mohammed, 300, 400\n\
    open, A3, Dana, 50, 100\n\
    deposit, A1, , 200\n\
    deposit, A1, , -50\n\
    withdraw, A1, , 300\n\
    withdraw, A1, , 400\n\
    withdraw, A1, , 1000\n\
    transfer, A1, A2, 200\n\
    status, A2, FROZEN\n\
    deposit, A2, , 10\n\
    withdraw, A3, , 50\n\
    reset, A3\n\
    limit, A3, , , 250\n\
    limit, A3, , , 6000"
    )
    .unwrap();

    bank_ledger()
        .arg(file.path())
        .assert()
        .success()
        .stdout(pred::str::contains(
            "account,owner,balance,daily_limit,daily_withdrawn,status",
        ))
        .stdout(pred::str::contains("A1,Fares,700.00,500.00,500.00,ACTIVE"))
        .stdout(pred::str::contains("A2,Mohammed,500.00,400.00,0.00,FROZEN"))
        .stdout(pred::str::contains("A3,Dana,0.00,250.00,0.00,ACTIVE"));
}

#[test]
fn rejected_rows_are_reported_on_stderr() {
    let mut file = NamedTempFile::new().expect("create temp file");
    writeln!(
        file,
        "type, account, detail, amount, limit\n\
    open, A1, Fares, 100, 100\n\
    open, A1, Again, 100, 100\n\
    open, , Nobody, 100, 100\n\
    status, A1, ACTIVE\n\
    status, A1, SUSPENDED\n\
    transfer, A1, A1, 10\n\
    explode, A1"
    )
    .unwrap();

    bank_ledger()
        .arg(file.path())
        .assert()
        .success()
        .stdout(pred::str::contains("A1,Fares,100.00,100.00,0.00,ACTIVE"))
        .stderr(pred::str::contains(
            "DLQ Report - Error: Operation rejected: open,account=A1,owner=Again",
        ))
        .stderr(pred::str::contains("DLQ Report - Error: Invalid argument: Account id"))
        .stderr(pred::str::contains(
            "DLQ Report - Error: Operation rejected: status,account=A1,status=ACTIVE",
        ))
        .stderr(pred::str::contains("Status is invalid"))
        .stderr(pred::str::contains(
            "DLQ Report - Error: Operation rejected: transfer,account=A1,target=A1",
        ))
        .stderr(pred::str::contains("Invalid operation type: explode"));
}

#[test]
fn overflowing_deposit_is_rejected_and_run_continues() {
    let mut file = NamedTempFile::new().expect("create temp file");
    writeln!(
        file,
        "type, account, detail, amount, limit\n\
    open, A1, Big, 79228162514264337593543950335, 100\n\
    deposit, A1, , 1\n\
    open, A2, Small, 10, 100\n\
    deposit, A2, , 5"
    )
    .unwrap();

    bank_ledger()
        .arg(file.path())
        .assert()
        .success()
        .stdout(pred::str::contains("A2,Small,15.00,100.00,0.00,ACTIVE"))
        .stderr(pred::str::contains(
            "DLQ Report - Error: Operation rejected: deposit,account=A1,amount=1",
        ));
}

#[test]
fn missing_file_fails() {
    bank_ledger()
        .arg("/definitely/not/here.csv")
        .assert()
        .failure();
}
