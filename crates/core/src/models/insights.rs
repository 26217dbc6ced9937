use serde::{Deserialize, Serialize};

use super::analytics::{CategoryAmount, IncomeExpensePoint, PredictionResult};
use super::chart::ChartPoint;
use super::goal::SavingsGoalProgress;

/// The two saving tips shown side by side.
///
/// They are computed independently and never merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingTips {
    /// Based on the dominant spending category
    pub category_tip: String,

    /// Based on the savings rate
    pub rate_tip: String,
}

impl SavingTips {
    /// Tips in display order: category first, then rate.
    pub fn to_vec(&self) -> Vec<String> {
        vec![self.category_tip.clone(), self.rate_tip.clone()]
    }
}

/// Everything the insights engine needs for one view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InsightsInput<'a> {
    pub categories: &'a [CategoryAmount],
    pub income_expenses: &'a [IncomeExpensePoint],
    pub goals: &'a [SavingsGoalProgress],
    pub prediction: Option<&'a PredictionResult>,
}

/// Derived "AI insights" for one view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightsReport {
    /// Highest-spend categories, largest first
    pub top_categories: Vec<CategoryAmount>,

    /// Sum of all category amounts
    pub total_spending: f64,

    /// Sum of the income series
    pub total_income: f64,

    /// One-line summary of the top categories
    pub summary: String,

    pub tips: SavingTips,

    /// Never empty
    pub goal_alerts: Vec<String>,

    /// History plus the forecast point, when available
    pub prediction_series: Vec<ChartPoint>,
}

/// Figures for the analytics page summary cards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    pub average_monthly_spending: f64,
    pub total_income: f64,
    pub total_expenses: f64,
    pub total_category_spending: f64,
}

/// Dashboard headline numbers computed from raw transactions and goals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardTotals {
    pub total_income: f64,
    pub total_expenses: f64,

    /// Money already set aside in savings goals
    pub total_saved: f64,

    /// `total_income - total_expenses - total_saved`
    pub net_balance: f64,
}

/// Totals over a trailing window of the income/expense series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrailingTotals {
    pub months: usize,
    pub average_monthly_spending: f64,
    pub total_income: f64,
    pub total_expenses: f64,
}
