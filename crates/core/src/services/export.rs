use chrono::NaiveDate;
use tracing::debug;

use crate::errors::CoreError;
use crate::models::transaction::Transaction;
use crate::services::chart_service::parse_month;

/// Column headers of the transaction export, in order.
pub const TRANSACTIONS_CSV_HEADER: [&str; 6] =
    ["ID", "Type", "Amount", "Category", "Description", "Date"];

/// Turns the transaction list into a downloadable CSV document.
///
/// Pure business logic: no I/O, no API calls.
pub struct ExportService;

impl ExportService {
    pub fn new() -> Self {
        Self
    }

    /// Transactions dated within `range`, both ends inclusive, in input
    /// order. `None` keeps everything. With a range, transactions whose
    /// date cannot be read are left out.
    pub fn filter_by_date<'a>(
        &self,
        transactions: &'a [Transaction],
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Vec<&'a Transaction> {
        match range {
            None => transactions.iter().collect(),
            Some((start, end)) => transactions
                .iter()
                .filter(|t| {
                    parse_month(&t.transaction_date)
                        .map(|day| start <= day && day <= end)
                        .unwrap_or(false)
                })
                .collect(),
        }
    }

    /// Header plus one row per transaction in `range`. Fields containing
    /// commas, quotes or line breaks are quoted.
    pub fn transactions_csv(
        &self,
        transactions: &[Transaction],
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<String, CoreError> {
        let rows = self.filter_by_date(transactions, range);

        let mut csv = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        csv.write_record(TRANSACTIONS_CSV_HEADER)
            .map_err(|e| CoreError::Serialization(format!("CSV write error: {e}")))?;

        for t in &rows {
            csv.write_record([
                t.id.to_string(),
                t.transaction_type.to_string(),
                t.amount.to_string(),
                t.category.clone(),
                t.description.clone().unwrap_or_default(),
                t.transaction_date.clone(),
            ])
            .map_err(|e| CoreError::Serialization(format!("CSV write error: {e}")))?;
        }

        let bytes = csv
            .into_inner()
            .map_err(|e| CoreError::Serialization(format!("CSV flush error: {e}")))?;
        debug!(rows = rows.len(), total = transactions.len(), "exported transactions");

        String::from_utf8(bytes)
            .map_err(|e| CoreError::Serialization(format!("CSV is not UTF-8: {e}")))
    }

    /// `transactions_2024-03-15.csv`
    pub fn file_name(&self, today: NaiveDate) -> String {
        format!("transactions_{}.csv", today.format("%Y-%m-%d"))
    }
}

impl Default for ExportService {
    fn default() -> Self {
        Self::new()
    }
}
