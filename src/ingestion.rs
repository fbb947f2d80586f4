use std::io::Read;
use std::pin::Pin;

use futures::stream::{self, Stream};
use serde::Deserialize;

use crate::domain::traits::OperationStream;
use crate::domain::{AccountStatus, Error, Money, Operation, OperationKind};

pub struct CsvReader<R: Read> {
    reader: Option<csv::Reader<R>>,
}

impl<R: Read> CsvReader<R> {
    pub fn new(reader: R) -> Self {
        let rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        Self { reader: Some(rdr) }
    }
}

/// Internal shape used only for CSV deserialization.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "type")]
    kind: String,
    account: String,
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    amount: Option<Money>,
    #[serde(default)]
    limit: Option<Money>,
}

fn required<T>(value: Option<T>, field: &str, kind: &str) -> Result<T, Error> {
    value.ok_or_else(|| Error::Ingestion(format!("{} requires a {} field", kind, field)))
}

impl TryFrom<CsvRow> for Operation {
    type Error = Error;

    fn try_from(row: CsvRow) -> Result<Self, Self::Error> {
        let kind_name = row.kind.trim().to_ascii_lowercase();
        let detail = row.detail.filter(|d| !d.trim().is_empty());
        let amount = row.amount.map(|m| m.amount());
        let limit = row.limit.map(|m| m.amount());

        let kind = match kind_name.as_str() {
            "open" => OperationKind::Open {
                owner_name: required(detail, "detail (owner)", "open")?,
                initial_balance: required(amount, "amount", "open")?,
                daily_limit: required(limit, "limit", "open")?,
            },
            "deposit" => OperationKind::Deposit {
                amount: required(amount, "amount", "deposit")?,
            },
            "withdraw" | "withdrawal" => OperationKind::Withdrawal {
                amount: required(amount, "amount", "withdraw")?,
            },
            "transfer" => OperationKind::Transfer {
                target_id: required(detail, "detail (target account)", "transfer")?,
                amount: required(amount, "amount", "transfer")?,
            },
            "status" => {
                let status = required(detail, "detail (status)", "status")?;
                OperationKind::ChangeStatus {
                    status: status.parse::<AccountStatus>()?,
                }
            }
            "limit" => OperationKind::SetDailyLimit {
                daily_limit: required(limit, "limit", "limit")?,
            },
            "reset" => OperationKind::ResetDailyWithdrawn,
            other => {
                return Err(Error::Ingestion(format!(
                    "Invalid operation type: {}",
                    other
                )));
            }
        };

        Ok(Operation {
            kind,
            account_id: row.account,
        })
    }
}

impl<R: Read + Send + 'static> OperationStream for CsvReader<R> {
    type OpStream = Pin<Box<dyn Stream<Item = Result<Operation, Error>> + Send>>;

    fn stream(&mut self) -> Self::OpStream {
        // Take ownership of the reader so the iterator we build owns all data and is 'static.
        let reader = match self.reader.take() {
            Some(r) => r,
            None => {
                // Already consumed; return an empty stream.
                return Box::pin(stream::iter(Vec::<Result<Operation, Error>>::new()));
            }
        };

        let iter = reader
            .into_deserialize::<CsvRow>()
            .map(|row_res| match row_res {
                Ok(row) => Operation::try_from(row),
                Err(e) => Err(Error::Ingestion(format!(
                    "CSV deserialization error: {}",
                    e
                ))),
            });

        Box::pin(stream::iter(iter))
    }
}
