use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::domain::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccountStatus {
    #[default]
    Active,
    Frozen,
    Closed,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Active => "ACTIVE",
            AccountStatus::Frozen => "FROZEN",
            AccountStatus::Closed => "CLOSED",
        }
    }
}

impl core::fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ACTIVE" => Ok(AccountStatus::Active),
            "FROZEN" => Ok(AccountStatus::Frozen),
            "CLOSED" => Ok(AccountStatus::Closed),
            other => Err(Error::InvalidArgument(format!(
                "Status is invalid: {:?}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    id: String,
    owner_name: String,
    balance: Decimal,
    daily_limit: Decimal,     // ceiling for withdrawals since the last reset
    daily_withdrawn: Decimal, // withdrawn since the last reset
    status: AccountStatus,
}

impl Account {
    /// Opens an active account. Blank id/owner, a negative opening balance or a
    /// non-positive daily limit are rejected with [`Error::InvalidArgument`].
    pub fn new(
        id: &str,
        owner_name: &str,
        initial_balance: Decimal,
        daily_limit: Decimal,
    ) -> Result<Self, Error> {
        let id = id.trim();
        if id.is_empty() {
            return Err(Error::InvalidArgument(
                "Account id must not be empty".to_string(),
            ));
        }

        let owner_name = owner_name.trim();
        if owner_name.is_empty() {
            return Err(Error::InvalidArgument(
                "Owner name must not be empty".to_string(),
            ));
        }

        if initial_balance < Decimal::ZERO {
            return Err(Error::InvalidArgument(format!(
                "Initial balance cannot be negative: {}",
                initial_balance
            )));
        }

        Self::check_daily_limit(daily_limit)?;

        Ok(Self {
            id: id.to_owned(),
            owner_name: owner_name.to_owned(),
            balance: initial_balance,
            daily_limit,
            daily_withdrawn: Decimal::ZERO,
            status: AccountStatus::Active,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn owner_name(&self) -> &str {
        &self.owner_name
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn daily_limit(&self) -> Decimal {
        self.daily_limit
    }

    pub fn daily_withdrawn(&self) -> Decimal {
        self.daily_withdrawn
    }

    pub fn status(&self) -> AccountStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }

    /// Unconditional overwrite, setting the current status again is allowed.
    pub fn set_status(&mut self, status: AccountStatus) {
        self.status = status;
    }

    pub fn set_daily_limit(&mut self, daily_limit: Decimal) -> Result<(), Error> {
        Self::check_daily_limit(daily_limit)?;
        self.daily_limit = daily_limit;
        Ok(())
    }

    /// Start of a new withdrawal day. Nothing calls this implicitly.
    pub fn reset_daily_withdrawn(&mut self) {
        self.daily_withdrawn = Decimal::ZERO;
    }

    pub fn deposit(&mut self, amount: Decimal) -> bool {
        if !self.is_active() {
            debug!(account = %self.id, status = %self.status, "deposit refused: account not active");
            return false;
        }

        if amount <= Decimal::ZERO {
            debug!(account = %self.id, %amount, "deposit refused: amount not positive");
            return false;
        }

        let Some(balance) = self.balance.checked_add(amount) else {
            debug!(account = %self.id, %amount, balance = %self.balance, "deposit refused: balance would overflow");
            return false;
        };

        self.balance = balance;
        true
    }

    pub fn withdraw(&mut self, amount: Decimal) -> bool {
        if !self.is_active() {
            debug!(account = %self.id, status = %self.status, "withdrawal refused: account not active");
            return false;
        }

        if amount <= Decimal::ZERO {
            debug!(account = %self.id, %amount, "withdrawal refused: amount not positive");
            return false;
        }

        // reaching the limit exactly is fine; an overflowing total is over any limit
        let withdrawn = match self.daily_withdrawn.checked_add(amount) {
            Some(withdrawn) if withdrawn <= self.daily_limit => withdrawn,
            _ => {
                debug!(
                    account = %self.id,
                    %amount,
                    withdrawn = %self.daily_withdrawn,
                    limit = %self.daily_limit,
                    "withdrawal refused: daily limit exceeded"
                );
                return false;
            }
        };

        if amount > self.balance {
            debug!(account = %self.id, %amount, balance = %self.balance, "withdrawal refused: insufficient funds");
            return false;
        }

        self.balance -= amount;
        self.daily_withdrawn = withdrawn;
        true
    }

    /// Moves `amount` to `target`: withdraw here (limit and balance rules
    /// apply), then deposit there. A failed deposit undoes the withdrawal.
    pub fn transfer_to(&mut self, target: &mut Account, amount: Decimal) -> bool {
        if !self.is_active() || !target.is_active() {
            debug!(
                from = %self.id,
                to = %target.id,
                from_status = %self.status,
                to_status = %target.status,
                "transfer refused: both accounts must be active"
            );
            return false;
        }

        if !self.withdraw(amount) {
            return false;
        }

        if !target.deposit(amount) {
            warn!(from = %self.id, to = %target.id, %amount, "deposit leg failed, rolling back transfer");
            self.rollback_withdrawal(amount);
            return false;
        }

        true
    }

    fn rollback_withdrawal(&mut self, amount: Decimal) {
        self.balance += amount;
        self.daily_withdrawn -= amount;
    }

    fn check_daily_limit(daily_limit: Decimal) -> Result<(), Error> {
        if daily_limit <= Decimal::ZERO {
            return Err(Error::InvalidArgument(format!(
                "Daily withdrawal limit must be positive: {}",
                daily_limit
            )));
        }
        Ok(())
    }
}

impl core::fmt::Display for Account {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Account{{id={}, owner={}, balance={}, dailyLimit={}, dailyWithdrawn={}, status={}}}",
            self.id,
            self.owner_name,
            self.balance,
            self.daily_limit,
            self.daily_withdrawn,
            self.status
        )
    }
}
