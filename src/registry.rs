use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::io::Write;

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::domain::{Account, AccountStatus, Error};

/// Business range for daily limits set through the registry, both ends inclusive.
pub const MIN_DAILY_LIMIT: Decimal = Decimal::ONE_HUNDRED;
pub const MAX_DAILY_LIMIT: Decimal = Decimal::from_parts(5000, 0, 0, false, 0);

#[derive(Default, Debug)]
pub struct Registry {
    accounts: HashMap<String, Account>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            accounts: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn add_account(&mut self, account: Account) -> bool {
        match self.accounts.entry(account.id().to_owned()) {
            Entry::Vacant(e) => {
                info!(account = %account.id(), owner = %account.owner_name(), "account added");
                e.insert(account);
                true
            }
            Entry::Occupied(e) => {
                debug!(account = %e.key(), "account refused: id already registered");
                false
            }
        }
    }

    pub fn find_account(&self, id: &str) -> Option<&Account> {
        self.accounts.get(id)
    }

    pub fn find_account_mut(&mut self, id: &str) -> Option<&mut Account> {
        self.accounts.get_mut(id)
    }

    pub fn transfer(&mut self, from_id: &str, to_id: &str, amount: Decimal) -> bool {
        if !self.accounts.contains_key(from_id) || !self.accounts.contains_key(to_id) {
            debug!(from = %from_id, to = %to_id, "transfer refused: unknown account");
            return false;
        }

        if from_id == to_id {
            debug!(account = %from_id, "transfer refused: source and target are the same account");
            return false;
        }

        // Take the source out so both sides can be borrowed mutably.
        let Some(mut from) = self.accounts.remove(from_id) else {
            return false; // checked above
        };

        let transferred = match self.accounts.get_mut(to_id) {
            Some(to) => from.transfer_to(to, amount),
            None => false,
        };

        self.accounts.insert(from_id.to_owned(), from);

        if transferred {
            info!(from = %from_id, to = %to_id, %amount, "transfer completed");
        }
        transferred
    }

    /// Unlike [`Account::set_status`], asking for the current status is refused.
    pub fn change_status(&mut self, id: &str, new_status: AccountStatus) -> bool {
        if id.trim().is_empty() {
            return false;
        }

        let Some(account) = self.accounts.get_mut(id) else {
            debug!(account = %id, "status change refused: unknown account");
            return false;
        };

        if account.status() == new_status {
            debug!(account = %id, status = %new_status, "status change refused: status unchanged");
            return false;
        }

        info!(account = %id, from = %account.status(), to = %new_status, "status changed");
        account.set_status(new_status);
        true
    }

    /// Sets a daily limit within [`MIN_DAILY_LIMIT`]..=[`MAX_DAILY_LIMIT`].
    /// The current limit is refused as a no-op.
    pub fn set_daily_limit(&mut self, id: &str, new_limit: Decimal) -> bool {
        if id.trim().is_empty() {
            return false;
        }

        if !(MIN_DAILY_LIMIT..=MAX_DAILY_LIMIT).contains(&new_limit) {
            debug!(account = %id, limit = %new_limit, "daily limit refused: outside business range");
            return false;
        }

        let Some(account) = self.accounts.get_mut(id) else {
            debug!(account = %id, "daily limit refused: unknown account");
            return false;
        };

        if account.daily_limit() == new_limit {
            debug!(account = %id, limit = %new_limit, "daily limit refused: limit unchanged");
            return false;
        }

        match account.set_daily_limit(new_limit) {
            Ok(()) => {
                info!(account = %id, limit = %new_limit, "daily limit changed");
                true
            }
            // range checked above
            Err(e) => {
                debug!(account = %id, error = %e, "daily limit refused");
                false
            }
        }
    }

    /// Writes every account as CSV, ordered by id.
    pub fn write_report<W: Write>(&self, out: W) -> Result<(), Error> {
        let mut accounts: Vec<&Account> = self.accounts.values().collect();
        accounts.sort_by(|a, b| a.id().cmp(b.id()));

        let mut writer = csv::Writer::from_writer(out);
        writer
            .write_record([
                "account",
                "owner",
                "balance",
                "daily_limit",
                "daily_withdrawn",
                "status",
            ])
            .map_err(csv_error)?;

        for account in accounts {
            writer
                .write_record([
                    account.id().to_owned(),
                    account.owner_name().to_owned(),
                    format!("{:.2}", account.balance()),
                    format!("{:.2}", account.daily_limit()),
                    format!("{:.2}", account.daily_withdrawn()),
                    account.status().to_string(),
                ])
                .map_err(csv_error)?;
        }

        writer.flush()?;
        Ok(())
    }
}

fn csv_error(e: csv::Error) -> Error {
    match e.into_kind() {
        csv::ErrorKind::Io(io) => Error::IO(io),
        other => Error::Ingestion(format!("CSV write error: {:?}", other)),
    }
}
