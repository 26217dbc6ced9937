// ═══════════════════════════════════════════════════════════════════
// Insights Tests: ranking, summary text, saving tips, goal alerts,
// prediction series, full report generation
// ═══════════════════════════════════════════════════════════════════

use budget_tracker_core::models::analytics::{CategoryAmount, IncomeExpensePoint, PredictionResult};
use budget_tracker_core::models::goal::SavingsGoalProgress;
use budget_tracker_core::models::insights::InsightsInput;
use budget_tracker_core::models::settings::Settings;
use budget_tracker_core::services::chart_service::FALLBACK_FORECAST_LABEL;
use budget_tracker_core::services::insights_engine::{
    InsightsEngine, ALL_ON_TRACK_ALERT, NO_BREAKDOWN_SUMMARY, NO_GOALS_ALERT, TRACK_INCOME_TIP,
    WELL_DISTRIBUTED_TIP,
};

fn cat(name: &str, amount: f64) -> CategoryAmount {
    CategoryAmount::new(name, amount)
}

fn goal(name: &str, target: f64, current: f64) -> SavingsGoalProgress {
    SavingsGoalProgress {
        id: 1,
        name: name.into(),
        target_amount: target,
        current_amount: current,
        target_date: None,
        progress_percentage: 0.0,
        days_remaining: None,
        on_track: false,
    }
}

fn months(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|s| s.to_string()).collect()
}

/// Every percentage printed in a summary line, in order.
fn percentages_in(summary: &str) -> Vec<i64> {
    summary
        .split('(')
        .skip(1)
        .filter_map(|part| part.split('%').next())
        .filter_map(|n| n.parse().ok())
        .collect()
}

// ═══════════════════════════════════════════════════════════════════
//  rank_top_categories
// ═══════════════════════════════════════════════════════════════════

mod ranking {
    use super::*;

    #[test]
    fn sorted_descending_and_truncated() {
        let engine = InsightsEngine::new();
        let cats = vec![
            cat("Travel", 200.0),
            cat("Food", 1200.0),
            cat("Rent", 900.0),
            cat("Fun", 50.0),
        ];
        let top = engine.rank_top_categories(&cats, 3);
        let names: Vec<&str> = top.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(names, vec!["Food", "Rent", "Travel"]);
    }

    #[test]
    fn result_is_subset_of_input() {
        let engine = InsightsEngine::new();
        let cats = vec![cat("A", 3.0), cat("B", 1.0), cat("C", 2.0)];
        let top = engine.rank_top_categories(&cats, 3);
        assert_eq!(top.len(), 3);
        assert!(top.iter().all(|c| cats.contains(c)));
        assert!(top.windows(2).all(|w| w[0].amount >= w[1].amount));
    }

    #[test]
    fn fewer_than_n() {
        let engine = InsightsEngine::new();
        let top = engine.rank_top_categories(&[cat("Only", 10.0)], 3);
        assert_eq!(top, vec![cat("Only", 10.0)]);
    }

    #[test]
    fn empty_input() {
        let engine = InsightsEngine::new();
        assert!(engine.rank_top_categories(&[], 3).is_empty());
    }

    #[test]
    fn ties_keep_input_order() {
        let engine = InsightsEngine::new();
        let cats = vec![cat("First", 100.0), cat("Second", 100.0), cat("Third", 100.0)];
        let top = engine.rank_top_categories(&cats, 2);
        assert_eq!(top[0].category, "First");
        assert_eq!(top[1].category, "Second");
    }

    #[test]
    fn nan_amount_sorts_as_zero() {
        let engine = InsightsEngine::new();
        let cats = vec![cat("Broken", f64::NAN), cat("Food", 10.0)];
        let top = engine.rank_top_categories(&cats, 2);
        assert_eq!(top[0].category, "Food");
    }
}

// ═══════════════════════════════════════════════════════════════════
//  summarize_top_categories
// ═══════════════════════════════════════════════════════════════════

mod summary {
    use super::*;

    #[test]
    fn empty_is_fallback() {
        let engine = InsightsEngine::new();
        assert_eq!(engine.summarize_top_categories(&[], 0.0), NO_BREAKDOWN_SUMMARY);
        assert_eq!(engine.summarize_top_categories(&[], 500.0), NO_BREAKDOWN_SUMMARY);
    }

    #[test]
    fn formats_amount_and_share() {
        let engine = InsightsEngine::new();
        let top = vec![cat("Food", 1200.0), cat("Rent", 900.0), cat("Travel", 900.0)];
        assert_eq!(
            engine.summarize_top_categories(&top, 3000.0),
            "Food: ₹1,200 (40%) • Rent: ₹900 (30%) • Travel: ₹900 (30%)"
        );
    }

    #[test]
    fn zero_total_gives_zero_percent() {
        let engine = InsightsEngine::new();
        let summary = engine.summarize_top_categories(&[cat("Food", 0.0)], 0.0);
        assert_eq!(summary, "Food: ₹0 (0%)");
    }

    #[test]
    fn percentages_never_exceed_100() {
        let engine = InsightsEngine::new();
        let top = vec![cat("A", 50.5), cat("B", 49.5)];
        let pcts = percentages_in(&engine.summarize_top_categories(&top, 100.0));
        assert_eq!(pcts.len(), 2);
        assert!(pcts.iter().sum::<i64>() <= 100);
        assert_eq!(pcts, vec![50, 50]);
    }

    #[test]
    fn percentages_of_thirds() {
        let engine = InsightsEngine::new();
        let top = vec![cat("A", 1.0), cat("B", 1.0), cat("C", 1.0)];
        let pcts = percentages_in(&engine.summarize_top_categories(&top, 3.0));
        assert_eq!(pcts, vec![33, 33, 33]);
    }

    #[test]
    fn uses_configured_currency() {
        let settings = Settings {
            currency_symbol: "$".into(),
            ..Settings::default()
        };
        let engine = InsightsEngine::from_settings(&settings);
        assert_eq!(
            engine.summarize_top_categories(&[cat("Food", 1234.5)], 1234.5),
            "Food: $1,234.5 (100%)"
        );
    }
}

// ═══════════════════════════════════════════════════════════════════
//  derive_saving_tips
// ═══════════════════════════════════════════════════════════════════

mod saving_tips {
    use super::*;

    #[test]
    fn dominant_category_gets_targeted_tip() {
        let engine = InsightsEngine::new();
        let tips = engine.derive_saving_tips(&[cat("Food", 1200.0)], 3000.0, 5000.0);
        assert_eq!(tips.category_tip, "Reduce Food by 10% to save approx ₹120.");
    }

    #[test]
    fn suggested_saving_rounded_to_whole_units() {
        let engine = InsightsEngine::new();
        let tips = engine.derive_saving_tips(&[cat("Rent", 1234.0)], 2000.0, 0.0);
        assert_eq!(tips.category_tip, "Reduce Rent by 10% to save approx ₹123.");
    }

    #[test]
    fn exactly_thirty_percent_is_not_dominant() {
        let engine = InsightsEngine::new();
        let tips = engine.derive_saving_tips(&[cat("Food", 300.0)], 1000.0, 0.0);
        assert_eq!(tips.category_tip, WELL_DISTRIBUTED_TIP);
    }

    #[test]
    fn healthy_savings_rate() {
        let engine = InsightsEngine::new();
        let tips = engine.derive_saving_tips(&[cat("Food", 1200.0)], 3000.0, 5000.0);
        assert_eq!(tips.rate_tip, "Great job! You are saving 40.0% of your income.");
    }

    #[test]
    fn low_savings_rate() {
        let engine = InsightsEngine::new();
        let tips = engine.derive_saving_tips(&[cat("Food", 1200.0)], 3000.0, 3500.0);
        assert_eq!(
            tips.rate_tip,
            "Your savings rate is 14.3%. Try to reach 20% for better financial health."
        );
    }

    #[test]
    fn no_income_asks_to_track_income() {
        let engine = InsightsEngine::new();
        let tips = engine.derive_saving_tips(&[cat("Food", 100.0)], 100.0, 0.0);
        assert_eq!(tips.rate_tip, TRACK_INCOME_TIP);
    }

    #[test]
    fn zero_spending_has_no_nan_or_inf() {
        let engine = InsightsEngine::new();
        for income in [0.0, 1000.0] {
            let tips = engine.derive_saving_tips(&[cat("Food", 0.0)], 0.0, income);
            for tip in tips.to_vec() {
                assert!(!tip.contains("NaN"), "{tip}");
                assert!(!tip.to_lowercase().contains("inf"), "{tip}");
            }
        }
    }

    #[test]
    fn non_finite_inputs_are_treated_as_zero() {
        let engine = InsightsEngine::new();
        let tips = engine.derive_saving_tips(&[cat("Food", f64::INFINITY)], f64::NAN, f64::NAN);
        assert_eq!(tips.category_tip, WELL_DISTRIBUTED_TIP);
        assert_eq!(tips.rate_tip, TRACK_INCOME_TIP);
    }

    #[test]
    fn tips_are_ordered_category_then_rate() {
        let engine = InsightsEngine::new();
        let tips = engine.derive_saving_tips(&[], 0.0, 0.0);
        assert_eq!(
            tips.to_vec(),
            vec![WELL_DISTRIBUTED_TIP.to_string(), TRACK_INCOME_TIP.to_string()]
        );
    }
}

// ═══════════════════════════════════════════════════════════════════
//  derive_goal_alerts
// ═══════════════════════════════════════════════════════════════════

mod goal_alerts {
    use super::*;

    #[test]
    fn no_goals() {
        let engine = InsightsEngine::new();
        assert_eq!(engine.derive_goal_alerts(&[]), vec![NO_GOALS_ALERT.to_string()]);
    }

    #[test]
    fn behind_goals_in_input_order() {
        let engine = InsightsEngine::new();
        let goals = vec![
            goal("Car", 10_000.0, 1_000.0),
            goal("Trip", 2_000.0, 1_500.0),
            goal("House", 50_000.0, 20_000.0),
        ];
        assert_eq!(
            engine.derive_goal_alerts(&goals),
            vec!["Car is behind schedule.".to_string(), "House is behind schedule.".to_string()]
        );
    }

    #[test]
    fn half_way_is_on_track() {
        let engine = InsightsEngine::new();
        let goals = vec![goal("Trip", 2_000.0, 1_000.0)];
        assert_eq!(engine.derive_goal_alerts(&goals), vec![ALL_ON_TRACK_ALERT.to_string()]);
    }

    #[test]
    fn zero_target_always_alerted() {
        let engine = InsightsEngine::new();
        let goals = vec![goal("Broken", 0.0, 500.0)];
        assert_eq!(
            engine.derive_goal_alerts(&goals),
            vec!["Broken is behind schedule.".to_string()]
        );
    }

    #[test]
    fn never_empty() {
        let engine = InsightsEngine::new();
        let goals = vec![goal("Done", 100.0, 150.0)];
        assert!(!engine.derive_goal_alerts(&goals).is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  build_prediction_series
// ═══════════════════════════════════════════════════════════════════

mod prediction_series {
    use super::*;

    #[test]
    fn iso_months_get_forecast_for_next_month() {
        let engine = InsightsEngine::new();
        let series = engine.build_prediction_series(
            &months(&["2024-01", "2024-02"]),
            &[100.0, 200.0],
            Some(250.0),
        );
        assert_eq!(series.len(), 3);
        assert_eq!(series[0].label, "Jan");
        assert_eq!(series[1].label, "Feb");
        assert_eq!(series[2].label, "Mar");
        assert_eq!(series[2].amount, 250.0);
        assert!(series[2].is_forecast);
        assert!(!series[0].is_forecast && !series[1].is_forecast);
    }

    #[test]
    fn empty_history_is_empty_series() {
        let engine = InsightsEngine::new();
        assert!(engine.build_prediction_series(&[], &[], Some(250.0)).is_empty());
    }

    #[test]
    fn no_prediction_keeps_labels() {
        let engine = InsightsEngine::new();
        let series = engine.build_prediction_series(&months(&["Jan", "Feb"]), &[10.0, 20.0], None);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].label, "Jan");
        assert_eq!(series[1].label, "Feb");
        assert!(series.iter().all(|p| !p.is_forecast));
    }

    #[test]
    fn month_names_advance() {
        let engine = InsightsEngine::new();
        let series = engine.build_prediction_series(&months(&["Jan", "Feb"]), &[10.0, 20.0], Some(30.0));
        assert_eq!(series.last().map(|p| p.label.as_str()), Some("Mar"));
    }

    #[test]
    fn december_rolls_over_to_january() {
        let engine = InsightsEngine::new();
        let series = engine.build_prediction_series(
            &months(&["2023-11", "2023-12"]),
            &[10.0, 20.0],
            Some(30.0),
        );
        assert_eq!(series.last().map(|p| p.label.as_str()), Some("Jan"));
    }

    #[test]
    fn unparseable_label_is_kept_and_forecast_is_generic() {
        let engine = InsightsEngine::new();
        let series = engine.build_prediction_series(&months(&["week 7"]), &[10.0], Some(12.0));
        assert_eq!(series[0].label, "week 7");
        assert_eq!(series[1].label, FALLBACK_FORECAST_LABEL);
    }

    #[test]
    fn mismatched_lengths_zero_fill_without_forecast() {
        let engine = InsightsEngine::new();
        let series = engine.build_prediction_series(&months(&["Jan", "Feb", "Mar"]), &[10.0], Some(99.0));
        assert_eq!(series.len(), 3);
        assert_eq!(series[1].amount, 0.0);
        assert_eq!(series[2].amount, 0.0);
        assert!(series.iter().all(|p| !p.is_forecast));
    }

    #[test]
    fn non_finite_prediction_is_dropped() {
        let engine = InsightsEngine::new();
        let series = engine.build_prediction_series(&months(&["Jan"]), &[10.0], Some(f64::NAN));
        assert_eq!(series.len(), 1);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  generate
// ═══════════════════════════════════════════════════════════════════

mod generate {
    use super::*;

    #[test]
    fn empty_input_is_fully_defaulted() {
        let engine = InsightsEngine::new();
        let report = engine.generate(&InsightsInput::default());
        assert!(report.top_categories.is_empty());
        assert_eq!(report.total_spending, 0.0);
        assert_eq!(report.total_income, 0.0);
        assert_eq!(report.summary, NO_BREAKDOWN_SUMMARY);
        assert_eq!(report.tips.category_tip, WELL_DISTRIBUTED_TIP);
        assert_eq!(report.tips.rate_tip, TRACK_INCOME_TIP);
        assert_eq!(report.goal_alerts, vec![NO_GOALS_ALERT.to_string()]);
        assert!(report.prediction_series.is_empty());
    }

    #[test]
    fn full_report() {
        let engine = InsightsEngine::new();
        let categories = vec![
            cat("Rent", 900.0),
            cat("Food", 1200.0),
            cat("Travel", 600.0),
            cat("Fun", 300.0),
        ];
        let income_expenses = vec![
            IncomeExpensePoint::new("2024-01", 2500.0, 1400.0),
            IncomeExpensePoint::new("2024-02", 2500.0, 1600.0),
        ];
        let goals = vec![goal("Car", 10_000.0, 1_000.0)];
        let prediction = PredictionResult {
            predicted_amount: Some(1700.0),
            history_months: months(&["2024-01", "2024-02"]),
            history_totals: vec![1400.0, 1600.0],
        };

        let report = engine.generate(&InsightsInput {
            categories: &categories,
            income_expenses: &income_expenses,
            goals: &goals,
            prediction: Some(&prediction),
        });

        assert_eq!(report.total_spending, 3000.0);
        assert_eq!(report.total_income, 5000.0);
        assert_eq!(report.top_categories.len(), 3);
        assert_eq!(report.top_categories[0].category, "Food");
        assert_eq!(
            report.summary,
            "Food: ₹1,200 (40%) • Rent: ₹900 (30%) • Travel: ₹600 (20%)"
        );
        assert_eq!(report.tips.category_tip, "Reduce Food by 10% to save approx ₹120.");
        assert_eq!(report.tips.rate_tip, "Great job! You are saving 40.0% of your income.");
        assert_eq!(report.goal_alerts, vec!["Car is behind schedule.".to_string()]);
        assert_eq!(report.prediction_series.len(), 3);
        assert_eq!(report.prediction_series[2].label, "Mar");
    }

    #[test]
    fn respects_configured_top_n() {
        let settings = Settings {
            top_categories: 1,
            ..Settings::default()
        };
        let engine = InsightsEngine::from_settings(&settings);
        let categories = vec![cat("A", 1.0), cat("B", 2.0)];
        let report = engine.generate(&InsightsInput {
            categories: &categories,
            ..InsightsInput::default()
        });
        assert_eq!(report.top_categories, vec![cat("B", 2.0)]);
        // Totals still cover every category
        assert_eq!(report.total_spending, 3.0);
    }
}
