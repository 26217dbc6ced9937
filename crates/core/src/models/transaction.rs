use serde::{Deserialize, Serialize};

use super::lenient::{f64_lenient, string_or_empty};

/// Direction of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Income,
    Expense,
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Income => write!(f, "INCOME"),
            TransactionType::Expense => write!(f, "EXPENSE"),
        }
    }
}

/// A transaction as returned by `GET /transactions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,

    #[serde(rename = "type")]
    pub transaction_type: TransactionType,

    #[serde(default, deserialize_with = "f64_lenient")]
    pub amount: f64,

    #[serde(default, deserialize_with = "string_or_empty")]
    pub category: String,

    #[serde(default)]
    pub description: Option<String>,

    /// ISO date or date-time string
    #[serde(default, deserialize_with = "string_or_empty")]
    pub transaction_date: String,

    #[serde(default)]
    pub created_at: Option<String>,
}

/// Body of `POST /transactions` and `PUT /transactions/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,

    pub amount: f64,

    pub category: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub transaction_date: String,
}

impl TransactionRequest {
    pub fn new(
        transaction_type: TransactionType,
        amount: f64,
        category: impl Into<String>,
        transaction_date: impl Into<String>,
    ) -> Self {
        Self {
            transaction_type,
            amount,
            category: category.into(),
            description: None,
            transaction_date: transaction_date.into(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
