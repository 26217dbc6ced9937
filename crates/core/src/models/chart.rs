use serde::{Deserialize, Serialize};

/// A single labelled point for line-chart rendering.
///
/// The core generates these; the frontend only renders them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// Short month name ("Jan") or the raw label when it is not a date
    pub label: String,

    /// Value plotted for this point
    pub amount: f64,

    /// True only for the appended next-month forecast
    #[serde(default)]
    pub is_forecast: bool,
}

impl ChartPoint {
    pub fn history(label: impl Into<String>, amount: f64) -> Self {
        Self {
            label: label.into(),
            amount,
            is_forecast: false,
        }
    }

    pub fn forecast(label: impl Into<String>, amount: f64) -> Self {
        Self {
            label: label.into(),
            amount,
            is_forecast: true,
        }
    }
}

/// One bar group of the income-vs-expenses chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeExpenseBar {
    pub label: String,
    pub income: f64,
    pub expenses: f64,
}

/// Comparison of the forecast against the most recent history month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionBadge {
    /// Expense total of the last history month
    pub last: f64,

    /// Percentage change from `last` to the forecast.
    /// `None` when `last` is zero and a percentage is meaningless.
    pub change_pct: Option<f64>,
}

impl PredictionBadge {
    /// Whether the forecast is at or above the last month.
    pub fn is_increase(&self) -> bool {
        self.change_pct.map(|p| p >= 0.0).unwrap_or(false)
    }
}
