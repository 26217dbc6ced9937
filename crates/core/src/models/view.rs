use serde::{Deserialize, Serialize};

use super::analytics::{AnalyticsReport, PredictionResult};
use super::chart::{ChartPoint, IncomeExpenseBar, PredictionBadge};
use super::goal::SavingsGoalProgress;
use super::insights::{AnalyticsSummary, DashboardTotals, InsightsReport, TrailingTotals};
use super::transaction::Transaction;
use super::user::User;

/// An input of a view whose fetch failed and was replaced by a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewInput {
    Analytics,
    SavingsGoals,
    Prediction,
}

impl std::fmt::Display for ViewInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewInput::Analytics => write!(f, "analytics"),
            ViewInput::SavingsGoals => write!(f, "savings goals"),
            ViewInput::Prediction => write!(f, "prediction"),
        }
    }
}

/// Data for the analytics page of one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsView {
    pub year: i32,
    pub month: u32,
    pub report: AnalyticsReport,
    pub summary: AnalyticsSummary,
    pub goals: Vec<SavingsGoalProgress>,
    pub prediction: Option<PredictionResult>,
    pub insights: InsightsReport,

    /// Inputs that failed to load; the UI shows a warning for each
    pub degraded: Vec<ViewInput>,
}

/// Data for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub profile: User,
    pub totals: DashboardTotals,
    pub recent_transactions: Vec<Transaction>,
    pub goals: Vec<SavingsGoalProgress>,
    pub income_expense_chart: Vec<IncomeExpenseBar>,
    pub trailing: TrailingTotals,
    pub prediction_series: Vec<ChartPoint>,
    pub prediction_badge: Option<PredictionBadge>,
    pub insights: InsightsReport,
    pub degraded: Vec<ViewInput>,
}

impl AnalyticsView {
    pub fn is_degraded(&self) -> bool {
        !self.degraded.is_empty()
    }
}

impl DashboardView {
    pub fn is_degraded(&self) -> bool {
        !self.degraded.is_empty()
    }
}
