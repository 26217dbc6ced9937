use serde::{Deserialize, Serialize};

use super::lenient::{f64_lenient, string_or_empty};

/// A monthly budget for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: i64,

    #[serde(default, deserialize_with = "string_or_empty")]
    pub category: String,

    #[serde(default, deserialize_with = "f64_lenient")]
    pub amount: f64,

    /// 1-based month
    pub month: u32,

    pub year: i32,

    #[serde(default)]
    pub user_id: Option<i64>,

    #[serde(default)]
    pub created_at: Option<String>,

    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Body of `POST /budgets` and `PUT /budgets/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetRequest {
    pub category: String,
    pub amount: f64,
    pub month: u32,
    pub year: i32,
}

/// Response element of `GET /budgets/progress`. Computed by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetProgress {
    #[serde(default, deserialize_with = "string_or_empty")]
    pub category: String,

    #[serde(default, deserialize_with = "f64_lenient")]
    pub budgeted: f64,

    #[serde(default, deserialize_with = "f64_lenient")]
    pub spent: f64,

    #[serde(default, deserialize_with = "f64_lenient")]
    pub remaining: f64,

    #[serde(default, deserialize_with = "f64_lenient")]
    pub percentage: f64,
}

impl BudgetProgress {
    pub fn is_over_budget(&self) -> bool {
        self.spent > self.budgeted
    }
}
