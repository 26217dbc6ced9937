use chrono::NaiveDate;

use crate::models::analytics::{AnalyticsReport, IncomeExpensePoint};
use crate::models::goal::SavingsGoalProgress;
use crate::models::insights::{AnalyticsSummary, DashboardTotals, TrailingTotals};
use crate::models::lenient::finite_or_zero;
use crate::models::transaction::{Transaction, TransactionType};
use crate::services::chart_service::parse_month;

/// Computes the single-pass figures shown on summary cards: averages,
/// totals and goal timelines.
///
/// Pure business logic: no I/O, no API calls.
pub struct AnalyticsService;

impl AnalyticsService {
    pub fn new() -> Self {
        Self
    }

    /// Summary cards of the analytics page.
    ///
    /// - Average monthly spending over the trend series (0 when empty)
    /// - Income and expense totals over the income/expense series
    /// - Total spending across the category breakdown
    pub fn summary(&self, report: &AnalyticsReport) -> AnalyticsSummary {
        let trend_total: f64 = report
            .monthly_trend
            .iter()
            .map(|p| finite_or_zero(p.amount))
            .sum();
        let average_monthly_spending = if report.monthly_trend.is_empty() {
            0.0
        } else {
            trend_total / report.monthly_trend.len() as f64
        };

        AnalyticsSummary {
            average_monthly_spending,
            total_income: report.total_income(),
            total_expenses: report.total_expenses(),
            total_category_spending: report.total_spending(),
        }
    }

    /// Dashboard headline totals from the raw transaction list.
    ///
    /// Net balance subtracts what is already parked in savings goals.
    pub fn dashboard_totals(
        &self,
        transactions: &[Transaction],
        goals: &[SavingsGoalProgress],
    ) -> DashboardTotals {
        let mut total_income = 0.0;
        let mut total_expenses = 0.0;

        for t in transactions {
            match t.transaction_type {
                TransactionType::Income => total_income += finite_or_zero(t.amount),
                TransactionType::Expense => total_expenses += finite_or_zero(t.amount),
            }
        }

        let total_saved: f64 = goals.iter().map(|g| finite_or_zero(g.current_amount)).sum();

        DashboardTotals {
            total_income,
            total_expenses,
            total_saved,
            net_balance: total_income - total_expenses - total_saved,
        }
    }

    /// The first `n` transactions, in the order the backend returned them.
    pub fn recent_transactions(&self, transactions: &[Transaction], n: usize) -> Vec<Transaction> {
        transactions.iter().take(n).cloned().collect()
    }

    /// Averages and totals over the last `months` points of the series.
    pub fn trailing_totals(&self, points: &[IncomeExpensePoint], months: usize) -> TrailingTotals {
        let start = points.len().saturating_sub(months);
        let window = &points[start..];

        let total_income = sum_by(window, |p| p.income);
        let total_expenses = sum_by(window, |p| p.expenses);
        let average_monthly_spending = if window.is_empty() {
            0.0
        } else {
            total_expenses / window.len() as f64
        };

        TrailingTotals {
            months: window.len(),
            average_monthly_spending,
            total_income,
            total_expenses,
        }
    }

    /// Whole days from `today` until the goal's target date.
    /// Negative once the date has passed; `None` without a parseable date.
    pub fn days_remaining(&self, target_date: Option<&str>, today: NaiveDate) -> Option<i64> {
        let target = parse_month(target_date?)?;
        Some((target - today).num_days())
    }

    /// Whether to nudge the user to save faster: the backend marks the goal
    /// off track and its deadline is still ahead.
    pub fn needs_pace_warning(&self, goal: &SavingsGoalProgress, today: NaiveDate) -> bool {
        !goal.on_track
            && self
                .days_remaining(goal.target_date.as_deref(), today)
                .map(|d| d > 0)
                .unwrap_or(false)
    }

    /// Goals whose target date has passed without reaching the target.
    pub fn overdue_goals<'a>(
        &self,
        goals: &'a [SavingsGoalProgress],
        today: NaiveDate,
    ) -> Vec<&'a SavingsGoalProgress> {
        goals
            .iter()
            .filter(|g| g.progress_ratio() < 1.0)
            .filter(|g| {
                self.days_remaining(g.target_date.as_deref(), today)
                    .map(|d| d < 0)
                    .unwrap_or(false)
            })
            .collect()
    }
}

impl Default for AnalyticsService {
    fn default() -> Self {
        Self::new()
    }
}

fn sum_by(points: &[IncomeExpensePoint], field: impl Fn(&IncomeExpensePoint) -> f64) -> f64 {
    points.iter().map(|p| finite_or_zero(field(p))).sum()
}
