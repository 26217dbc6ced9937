use serde::{Deserialize, Serialize};

use super::lenient::{
    f64_lenient, finite_or_zero, opt_f64_lenient, string_or_empty, vec_f64_lenient, vec_or_empty,
};

/// Total spend for one expense category over the selected period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryAmount {
    #[serde(default, deserialize_with = "string_or_empty")]
    pub category: String,

    /// Non-negative amount. The backend names this `totalAmount`;
    /// older builds used `total`.
    #[serde(
        default,
        alias = "totalAmount",
        alias = "total",
        deserialize_with = "f64_lenient"
    )]
    pub amount: f64,
}

impl CategoryAmount {
    pub fn new(category: impl Into<String>, amount: f64) -> Self {
        Self {
            category: category.into(),
            amount,
        }
    }
}

/// One point of the monthly spending trend, chronologically ascending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthSeriesPoint {
    /// Month label or ISO month / date string.
    #[serde(default, deserialize_with = "string_or_empty")]
    pub month: String,

    #[serde(
        default,
        alias = "totalAmount",
        alias = "total",
        deserialize_with = "f64_lenient"
    )]
    pub amount: f64,
}

/// Income and expenses for one month, chronologically ascending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeExpensePoint {
    #[serde(default, deserialize_with = "string_or_empty")]
    pub month: String,

    #[serde(default, alias = "totalIncome", deserialize_with = "f64_lenient")]
    pub income: f64,

    #[serde(default, alias = "totalExpenses", deserialize_with = "f64_lenient")]
    pub expenses: f64,
}

impl IncomeExpensePoint {
    pub fn new(month: impl Into<String>, income: f64, expenses: f64) -> Self {
        Self {
            month: month.into(),
            income,
            expenses,
        }
    }
}

/// Response of `GET /analytics?year&month`.
///
/// Any missing or `null` section deserializes to an empty list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    #[serde(default, deserialize_with = "vec_or_empty")]
    pub category_breakdown: Vec<CategoryAmount>,

    #[serde(default, deserialize_with = "vec_or_empty")]
    pub monthly_trend: Vec<MonthSeriesPoint>,

    #[serde(default, deserialize_with = "vec_or_empty")]
    pub income_vs_expenses: Vec<IncomeExpensePoint>,
}

impl AnalyticsReport {
    /// Sum of all category amounts for the period.
    pub fn total_spending(&self) -> f64 {
        self.category_breakdown
            .iter()
            .map(|c| finite_or_zero(c.amount))
            .sum()
    }

    /// Sum of the income series for the period.
    pub fn total_income(&self) -> f64 {
        self.income_vs_expenses
            .iter()
            .map(|p| finite_or_zero(p.income))
            .sum()
    }

    /// Sum of the expense series for the period.
    pub fn total_expenses(&self) -> f64 {
        self.income_vs_expenses
            .iter()
            .map(|p| finite_or_zero(p.expenses))
            .sum()
    }
}

/// Response of `GET /analytics/predict-next-month?months`.
///
/// `history_months` and `history_totals` are parallel arrays; the
/// prediction is for the month after the last history entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    #[serde(default, deserialize_with = "opt_f64_lenient")]
    pub predicted_amount: Option<f64>,

    #[serde(default, deserialize_with = "vec_or_empty")]
    pub history_months: Vec<String>,

    #[serde(default, deserialize_with = "vec_f64_lenient")]
    pub history_totals: Vec<f64>,
}
