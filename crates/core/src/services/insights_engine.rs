use tracing::debug;

use crate::models::analytics::CategoryAmount;
use crate::models::chart::ChartPoint;
use crate::models::goal::SavingsGoalProgress;
use crate::models::insights::{InsightsInput, InsightsReport, SavingTips};
use crate::models::lenient::finite_or_zero;
use crate::models::settings::Settings;
use crate::services::chart_service::ChartService;

pub const NO_BREAKDOWN_SUMMARY: &str = "No spending breakdown available yet.";
pub const SUMMARY_SEPARATOR: &str = " • ";
pub const WELL_DISTRIBUTED_TIP: &str =
    "Spending is well distributed. Consider increasing your savings contribution.";
pub const TRACK_INCOME_TIP: &str = "Track more income to get savings rate insights.";
pub const NO_GOALS_ALERT: &str = "No savings goals set.";
pub const ALL_ON_TRACK_ALERT: &str = "All goals currently appear on track.";

/// Share of total spending above which one category gets a targeted tip.
const DOMINANT_SHARE: f64 = 0.30;

/// Fraction of the dominant category suggested as a saving.
const SUGGESTED_CUT: f64 = 0.10;

/// Savings rate (percent) considered healthy.
const HEALTHY_SAVINGS_RATE: f64 = 20.0;

/// Goal progress below which a goal is reported as behind schedule.
/// Timeline-agnostic: the target date is not considered.
const BEHIND_SCHEDULE_PROGRESS: f64 = 0.5;

/// Derives the insight texts and the forecast chart series shown on the
/// analytics page and dashboard.
///
/// Every operation is total: empty lists, zero totals and malformed dates
/// all have a defined fallback and nothing here returns an error.
pub struct InsightsEngine {
    currency_symbol: String,
    top_n: usize,
    chart_service: ChartService,
}

impl InsightsEngine {
    pub fn new() -> Self {
        Self::from_settings(&Settings::default())
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            currency_symbol: settings.currency_symbol.clone(),
            top_n: settings.top_categories.max(1),
            chart_service: ChartService::new(),
        }
    }

    /// Sort by amount, largest first, and keep the first `n`.
    /// The sort is stable: equal amounts keep their input order.
    pub fn rank_top_categories(&self, categories: &[CategoryAmount], n: usize) -> Vec<CategoryAmount> {
        let mut ranked = categories.to_vec();
        ranked.sort_by(|a, b| {
            finite_or_zero(b.amount)
                .partial_cmp(&finite_or_zero(a.amount))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked.truncate(n);
        ranked
    }

    /// `"Food: ₹1,200 (40%) • Rent: ₹900 (30%)"`, or a fallback sentence
    /// when there is nothing to summarize.
    pub fn summarize_top_categories(&self, top: &[CategoryAmount], total: f64) -> String {
        if top.is_empty() {
            return NO_BREAKDOWN_SUMMARY.to_string();
        }

        let amounts: Vec<f64> = top.iter().map(|c| finite_or_zero(c.amount)).collect();
        let percentages = rounded_percentages(&amounts, finite_or_zero(total));

        top.iter()
            .zip(percentages)
            .map(|(c, pct)| {
                format!(
                    "{}: {}{} ({}%)",
                    c.category,
                    self.currency_symbol,
                    format_amount(c.amount),
                    pct
                )
            })
            .collect::<Vec<_>>()
            .join(SUMMARY_SEPARATOR)
    }

    /// A category-based tip and a savings-rate tip, computed independently.
    pub fn derive_saving_tips(
        &self,
        top: &[CategoryAmount],
        total_spending: f64,
        total_income: f64,
    ) -> SavingTips {
        let total_spending = finite_or_zero(total_spending);
        let total_income = finite_or_zero(total_income);

        let category_tip = match top.first() {
            Some(dominant)
                if total_spending > 0.0
                    && finite_or_zero(dominant.amount) / total_spending > DOMINANT_SHARE =>
            {
                let saving = (finite_or_zero(dominant.amount) * SUGGESTED_CUT).round();
                format!(
                    "Reduce {} by 10% to save approx {}{saving:.0}.",
                    dominant.category, self.currency_symbol
                )
            }
            _ => WELL_DISTRIBUTED_TIP.to_string(),
        };

        let rate_tip = if total_income > 0.0 {
            let rate = (total_income - total_spending) / total_income * 100.0;
            if rate < HEALTHY_SAVINGS_RATE {
                format!("Your savings rate is {rate:.1}%. Try to reach 20% for better financial health.")
            } else {
                format!("Great job! You are saving {rate:.1}% of your income.")
            }
        } else {
            TRACK_INCOME_TIP.to_string()
        };

        SavingTips {
            category_tip,
            rate_tip,
        }
    }

    /// One alert per goal under half of its target, in input order.
    /// Never returns an empty list.
    pub fn derive_goal_alerts(&self, goals: &[SavingsGoalProgress]) -> Vec<String> {
        if goals.is_empty() {
            return vec![NO_GOALS_ALERT.to_string()];
        }

        let alerts: Vec<String> = goals
            .iter()
            .filter(|g| g.progress_ratio() < BEHIND_SCHEDULE_PROGRESS)
            .map(|g| format!("{} is behind schedule.", g.name))
            .collect();

        if alerts.is_empty() {
            vec![ALL_ON_TRACK_ALERT.to_string()]
        } else {
            alerts
        }
    }

    /// History points labelled by month, plus the forecast for the month
    /// after the last history entry.
    pub fn build_prediction_series(
        &self,
        history_months: &[String],
        history_totals: &[f64],
        predicted: Option<f64>,
    ) -> Vec<ChartPoint> {
        self.chart_service
            .prediction_series(history_months, history_totals, predicted)
    }

    /// Run every derivation for one view.
    pub fn generate(&self, input: &InsightsInput<'_>) -> InsightsReport {
        let total_spending: f64 = input
            .categories
            .iter()
            .map(|c| finite_or_zero(c.amount))
            .sum();
        let total_income: f64 = input
            .income_expenses
            .iter()
            .map(|p| finite_or_zero(p.income))
            .sum();

        let top_categories = self.rank_top_categories(input.categories, self.top_n);
        let summary = self.summarize_top_categories(&top_categories, total_spending);
        let tips = self.derive_saving_tips(&top_categories, total_spending, total_income);
        let goal_alerts = self.derive_goal_alerts(input.goals);

        let prediction_series = match input.prediction {
            Some(p) => self.build_prediction_series(
                &p.history_months,
                &p.history_totals,
                p.predicted_amount,
            ),
            None => Vec::new(),
        };

        debug!(
            categories = input.categories.len(),
            goals = input.goals.len(),
            series_points = prediction_series.len(),
            "generated insights"
        );

        InsightsReport {
            top_categories,
            total_spending,
            total_income,
            summary,
            tips,
            goal_alerts,
            prediction_series,
        }
    }
}

impl Default for InsightsEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Whole-number percentages of `total`, rounded to nearest.
///
/// When rounding pushes the sum past 100, the entries that gained the most
/// from rounding up are lowered by one point each until the sum fits.
/// This departs from plain `round(amount / total * 100)` per entry: 50.5%
/// and 49.5% print as 50% and 50%, not 51% and 50%. On equal gains the
/// earlier entry is lowered first.
fn rounded_percentages(amounts: &[f64], total: f64) -> Vec<i64> {
    if total <= 0.0 {
        return vec![0; amounts.len()];
    }

    let exact: Vec<f64> = amounts.iter().map(|a| a / total * 100.0).collect();
    let mut rounded: Vec<i64> = exact.iter().map(|e| e.round() as i64).collect();

    let mut overshoot = rounded.iter().sum::<i64>() - 100;
    if overshoot > 0 {
        let mut rounded_up: Vec<usize> = (0..exact.len())
            .filter(|&i| rounded[i] as f64 > exact[i])
            .collect();
        rounded_up.sort_by(|&a, &b| {
            let gain_a = rounded[a] as f64 - exact[a];
            let gain_b = rounded[b] as f64 - exact[b];
            gain_b
                .partial_cmp(&gain_a)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        for idx in rounded_up {
            if overshoot <= 0 {
                break;
            }
            rounded[idx] -= 1;
            overshoot -= 1;
        }
    }

    rounded
}

/// Thousands-separated amount with at most two fraction digits.
/// `1234.5` → `"1,234.5"`, `1200.0` → `"1,200"`.
pub fn format_amount(amount: f64) -> String {
    let rounded = (finite_or_zero(amount) * 100.0).round() / 100.0;
    let negative = rounded < 0.0;
    let fixed = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let digits: Vec<char> = int_part.chars().collect();
    let mut out = String::with_capacity(fixed.len() + digits.len() / 3 + 1);
    if negative {
        out.push('-');
    }
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(*c);
    }

    let frac = frac_part.trim_end_matches('0');
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentages_zero_total() {
        assert_eq!(rounded_percentages(&[10.0, 20.0], 0.0), vec![0, 0]);
    }

    #[test]
    fn percentages_plain_rounding() {
        assert_eq!(rounded_percentages(&[50.0, 30.0, 20.0], 100.0), vec![50, 30, 20]);
        assert_eq!(rounded_percentages(&[1.0, 1.0, 1.0], 3.0), vec![33, 33, 33]);
    }

    #[test]
    fn percentages_overshoot_corrected() {
        // 50.5% and 49.5% both round up to 51 + 50 = 101
        let pcts = rounded_percentages(&[50.5, 49.5], 100.0);
        assert!(pcts.iter().sum::<i64>() <= 100);
        assert_eq!(pcts, vec![50, 50]);
    }

    #[test]
    fn format_amount_groups_thousands() {
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(999.0), "999");
        assert_eq!(format_amount(1000.0), "1,000");
        assert_eq!(format_amount(1234567.891), "1,234,567.89");
        assert_eq!(format_amount(1234.5), "1,234.5");
        assert_eq!(format_amount(-2500.0), "-2,500");
        assert_eq!(format_amount(f64::NAN), "0");
    }
}
