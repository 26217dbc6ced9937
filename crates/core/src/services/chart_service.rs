use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::models::analytics::IncomeExpensePoint;
use crate::models::chart::{ChartPoint, IncomeExpenseBar, PredictionBadge};
use crate::models::lenient::finite_or_zero;

/// Label used for the forecast point when the last history month cannot be
/// interpreted at all.
pub const FALLBACK_FORECAST_LABEL: &str = "Next";

const SHORT_MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const LONG_MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Parse a month string as a calendar date.
///
/// Accepts `YYYY-MM`, `YYYY-MM-DD`, `YYYY/MM/DD`, naive ISO date-times and
/// RFC 3339 timestamps. Anything else (including pre-formatted labels such
/// as "Jan") returns `None`.
pub fn parse_month(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date);
        }
    }

    // Year-month only: anchor on the first of the month
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d") {
        return Some(date);
    }

    for fmt in [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}

/// Short English month name of a parseable month string, or the raw string
/// unchanged when it is not a date.
pub fn month_label(raw: &str) -> String {
    match parse_month(raw) {
        Some(date) => SHORT_MONTHS[date.month0() as usize].to_string(),
        None => raw.to_string(),
    }
}

/// Short name of the calendar month following `raw`.
///
/// Dates roll over year boundaries (December → January). A bare month name
/// ("Feb", "February") is advanced by name; anything else yields
/// [`FALLBACK_FORECAST_LABEL`].
pub fn next_month_label(raw: &str) -> String {
    if let Some(date) = parse_month(raw) {
        let next = date
            .with_day(1)
            .and_then(|first| first.checked_add_months(Months::new(1)));
        if let Some(next) = next {
            return SHORT_MONTHS[next.month0() as usize].to_string();
        }
    }

    match month_index_from_name(raw) {
        Some(idx) => SHORT_MONTHS[(idx + 1) % 12].to_string(),
        None => {
            debug!(label = raw, "cannot derive next month from label");
            FALLBACK_FORECAST_LABEL.to_string()
        }
    }
}

/// Zero-based month index of an English month name or abbreviation.
fn month_index_from_name(raw: &str) -> Option<usize> {
    let name = raw.trim().to_lowercase();
    if name.len() < 3 {
        return None;
    }
    if name == "sept" {
        return Some(8);
    }
    LONG_MONTHS
        .iter()
        .position(|long| *long == name || long[..3] == name)
}

/// Generates chart-ready series from already-fetched API data.
///
/// Pure computation: no I/O, never fails.
pub struct ChartService;

impl ChartService {
    pub fn new() -> Self {
        Self
    }

    /// Zip history months with totals and append the next-month forecast.
    ///
    /// - Missing totals are zero-filled.
    /// - No forecast is appended when there is no history, no (finite)
    ///   prediction, or the two history arrays differ in length.
    /// - Input order is kept; callers supply ascending months.
    pub fn prediction_series(
        &self,
        history_months: &[String],
        history_totals: &[f64],
        predicted: Option<f64>,
    ) -> Vec<ChartPoint> {
        let mut points: Vec<ChartPoint> = history_months
            .iter()
            .enumerate()
            .map(|(i, month)| {
                let amount = history_totals.get(i).copied().map(finite_or_zero).unwrap_or(0.0);
                ChartPoint::history(month_label(month), amount)
            })
            .collect();

        let consistent = history_months.len() == history_totals.len();
        if !consistent {
            debug!(
                months = history_months.len(),
                totals = history_totals.len(),
                "prediction history arrays differ in length; omitting forecast"
            );
        }

        let predicted = predicted.filter(|p| p.is_finite());
        if let (Some(amount), Some(last), true) = (predicted, history_months.last(), consistent) {
            points.push(ChartPoint::forecast(next_month_label(last), amount));
        }

        points
    }

    /// The last `window` months of income vs expenses, labelled for display.
    pub fn income_expense_bars(
        &self,
        points: &[IncomeExpensePoint],
        window: usize,
    ) -> Vec<IncomeExpenseBar> {
        let start = points.len().saturating_sub(window);
        points[start..]
            .iter()
            .map(|p| IncomeExpenseBar {
                label: month_label(&p.month),
                income: finite_or_zero(p.income),
                expenses: finite_or_zero(p.expenses),
            })
            .collect()
    }

    /// Compare the forecast with the last history month.
    ///
    /// `None` without a prediction or without history.
    pub fn prediction_badge(
        &self,
        history_totals: &[f64],
        predicted: Option<f64>,
    ) -> Option<PredictionBadge> {
        let predicted = predicted.filter(|p| p.is_finite())?;
        let last = finite_or_zero(*history_totals.last()?);

        let change_pct = if last == 0.0 {
            None
        } else {
            Some((predicted - last) / last * 100.0)
        };

        Some(PredictionBadge { last, change_pct })
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}
