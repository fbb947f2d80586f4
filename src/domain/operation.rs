use rust_decimal::Decimal;

use crate::domain::AccountStatus;

#[derive(Debug, Clone, PartialEq)]
pub enum OperationKind {
    Open {
        owner_name: String,
        initial_balance: Decimal,
        daily_limit: Decimal,
    },
    Deposit {
        amount: Decimal,
    },
    Withdrawal {
        amount: Decimal,
    },
    Transfer {
        target_id: String,
        amount: Decimal,
    },
    ChangeStatus {
        status: AccountStatus,
    },
    SetDailyLimit {
        daily_limit: Decimal,
    },
    ResetDailyWithdrawn,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    pub kind: OperationKind,
    pub account_id: String,
}

impl core::fmt::Display for Operation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match &self.kind {
            OperationKind::Open {
                owner_name,
                initial_balance,
                daily_limit,
            } => write!(
                f,
                "open,account={},owner={},balance={},limit={}",
                self.account_id, owner_name, initial_balance, daily_limit
            ),
            OperationKind::Deposit { amount } => {
                write!(f, "deposit,account={},amount={}", self.account_id, amount)
            }
            OperationKind::Withdrawal { amount } => {
                write!(f, "withdraw,account={},amount={}", self.account_id, amount)
            }
            OperationKind::Transfer { target_id, amount } => write!(
                f,
                "transfer,account={},target={},amount={}",
                self.account_id, target_id, amount
            ),
            OperationKind::ChangeStatus { status } => {
                write!(f, "status,account={},status={}", self.account_id, status)
            }
            OperationKind::SetDailyLimit { daily_limit } => write!(
                f,
                "limit,account={},limit={}",
                self.account_id, daily_limit
            ),
            OperationKind::ResetDailyWithdrawn => write!(f, "reset,account={}", self.account_id),
        }
    }
}
