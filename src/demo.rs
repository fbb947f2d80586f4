use std::io::Write;

use rust_decimal::Decimal;

use crate::domain::{Account, Error};
use crate::registry::Registry;

/// Walks two accounts through deposits, withdrawals (one over the daily limit,
/// one over the balance) and a transfer, narrating each step to `out`.
pub fn run<W: Write>(mut out: W) -> Result<(), Error> {
    let mut registry = Registry::new();
    registry.add_account(Account::new(
        "A1001",
        "Fares",
        Decimal::from(1000),
        Decimal::from(500),
    )?);
    registry.add_account(Account::new(
        "A2001",
        "Mohammed",
        Decimal::from(300),
        Decimal::from(400),
    )?);

    writeln!(out, "=== INITIAL STATE ===")?;
    print_accounts(&mut out, &registry)?;

    step(&mut out, &mut registry, "Deposit 200 into A1001", |acc| {
        acc.deposit(Decimal::from(200))
    })?;
    step(&mut out, &mut registry, "Deposit -50 into A1001", |acc| {
        acc.deposit(Decimal::from(-50))
    })?;
    step(&mut out, &mut registry, "Withdraw 300 from A1001", |acc| {
        acc.withdraw(Decimal::from(300))
    })?;
    step(
        &mut out,
        &mut registry,
        "Withdraw 400 from A1001 (over daily limit)",
        |acc| acc.withdraw(Decimal::from(400)),
    )?;
    step(
        &mut out,
        &mut registry,
        "Withdraw 1000 from A1001 (over balance)",
        |acc| acc.withdraw(Decimal::from(1000)),
    )?;

    writeln!(out, "\n=== Transfer 200 from A1001 to A2001 ===")?;
    let transferred = registry.transfer("A1001", "A2001", Decimal::from(200));
    writeln!(out, "Result: {}", transferred)?;

    writeln!(out, "\n=== FINAL STATE ===")?;
    print_accounts(&mut out, &registry)?;
    writeln!(out)?;
    registry.write_report(&mut out)?;

    Ok(())
}

fn step<W: Write>(
    out: &mut W,
    registry: &mut Registry,
    title: &str,
    action: impl FnOnce(&mut Account) -> bool,
) -> Result<(), Error> {
    writeln!(out, "\n=== {} ===", title)?;
    if let Some(account) = registry.find_account_mut("A1001") {
        let result = action(account);
        writeln!(out, "Result: {}", result)?;
        writeln!(out, "Balance: {}", account.balance())?;
    }
    Ok(())
}

fn print_accounts<W: Write>(out: &mut W, registry: &Registry) -> Result<(), Error> {
    for id in ["A1001", "A2001"] {
        if let Some(account) = registry.find_account(id) {
            writeln!(out, "{}", account)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::run;

    #[test]
    fn narrates_the_scenario() {
        let mut out = Vec::new();
        run(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("=== Deposit -50 into A1001 ===\nResult: false\nBalance: 1200"));
        assert!(text.contains("over daily limit) ===\nResult: false\nBalance: 900"));
        assert!(text.contains("over balance) ===\nResult: false\nBalance: 900"));
        assert!(text.contains("=== Transfer 200 from A1001 to A2001 ===\nResult: true"));
        assert!(text.contains("A1001,Fares,700.00,500.00,500.00,ACTIVE"));
        assert!(text.contains("A2001,Mohammed,500.00,400.00,0.00,ACTIVE"));
    }
}
