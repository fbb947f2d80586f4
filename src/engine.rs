use std::io::Write;

use futures::StreamExt;
use tracing::info;

use crate::domain::{
    Account, Error, Operation, OperationKind,
    traits::{DeadLetterQueue, OperationStream},
};
use crate::registry::Registry;

/// Replays a stream of operations against a [`Registry`]. Rejected operations
/// go to the dead letter queue and processing continues.
#[derive(Debug)]
pub struct Engine<I, D>
where
    I: OperationStream,
    D: DeadLetterQueue,
{
    ingestion: I,
    registry: Registry,
    dlq: D,
}

impl<I, D> Engine<I, D>
where
    I: OperationStream,
    D: DeadLetterQueue,
{
    pub fn new(ingestion: I, registry: Registry, dlq: D) -> Self {
        Self {
            ingestion,
            registry,
            dlq,
        }
    }

    pub async fn process(&mut self) -> Result<(), Error> {
        let mut res = self.ingestion.stream();

        while let Some(op) = res.next().await {
            match op {
                Ok(op) => match self.apply_operation(op) {
                    Ok(()) => {}
                    Err(e) => self.dlq.report(&e),
                },
                Err(e) => self.dlq.report(&e),
            }
        }

        info!(accounts = self.registry.len(), "batch processed");
        Ok(())
    }

    fn apply_operation(&mut self, op: Operation) -> Result<(), Error> {
        let accepted = match &op.kind {
            OperationKind::Open {
                owner_name,
                initial_balance,
                daily_limit,
            } => {
                let account =
                    Account::new(&op.account_id, owner_name, *initial_balance, *daily_limit)?;
                self.registry.add_account(account)
            }
            OperationKind::Deposit { amount } => {
                self.with_account(&op.account_id, |acc| acc.deposit(*amount))
            }
            OperationKind::Withdrawal { amount } => {
                self.with_account(&op.account_id, |acc| acc.withdraw(*amount))
            }
            OperationKind::Transfer { target_id, amount } => {
                self.registry.transfer(&op.account_id, target_id, *amount)
            }
            OperationKind::ChangeStatus { status } => {
                self.registry.change_status(&op.account_id, *status)
            }
            OperationKind::SetDailyLimit { daily_limit } => {
                self.registry.set_daily_limit(&op.account_id, *daily_limit)
            }
            OperationKind::ResetDailyWithdrawn => self.with_account(&op.account_id, |acc| {
                acc.reset_daily_withdrawn();
                true
            }),
        };

        if accepted {
            Ok(())
        } else {
            Err(Error::Rejected(op.to_string()))
        }
    }

    fn with_account(&mut self, id: &str, f: impl FnOnce(&mut Account) -> bool) -> bool {
        match self.registry.find_account_mut(id) {
            Some(account) => f(account),
            None => false,
        }
    }

    pub fn flush<W: Write>(&self, out: W) -> Result<(), Error> {
        self.registry.write_report(out)
    }
}
