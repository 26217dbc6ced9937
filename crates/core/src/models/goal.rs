use serde::{Deserialize, Serialize};

use super::lenient::{bool_or_false, f64_lenient, string_or_empty};

/// A savings goal as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoal {
    pub id: i64,

    #[serde(default, deserialize_with = "string_or_empty")]
    pub name: String,

    #[serde(default, deserialize_with = "f64_lenient")]
    pub target_amount: f64,

    #[serde(default, deserialize_with = "f64_lenient")]
    pub current_amount: f64,

    /// ISO date (`YYYY-MM-DD`), if the goal has a deadline
    #[serde(default)]
    pub target_date: Option<String>,

    #[serde(default)]
    pub created_at: Option<String>,

    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Response element of `GET /savings-goals/progress`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoalProgress {
    pub id: i64,

    #[serde(default, deserialize_with = "string_or_empty")]
    pub name: String,

    /// Expected to be positive; zero marks a malformed goal
    #[serde(default, deserialize_with = "f64_lenient")]
    pub target_amount: f64,

    #[serde(default, deserialize_with = "f64_lenient")]
    pub current_amount: f64,

    #[serde(default)]
    pub target_date: Option<String>,

    #[serde(default, deserialize_with = "f64_lenient")]
    pub progress_percentage: f64,

    #[serde(default)]
    pub days_remaining: Option<i64>,

    #[serde(default, deserialize_with = "bool_or_false")]
    pub on_track: bool,
}

impl SavingsGoalProgress {
    /// Fraction of the target reached. A non-positive target counts as no progress.
    pub fn progress_ratio(&self) -> f64 {
        if self.target_amount > 0.0 {
            let ratio = self.current_amount / self.target_amount;
            if ratio.is_finite() {
                ratio
            } else {
                0.0
            }
        } else {
            0.0
        }
    }
}

/// Body of `POST /savings-goals` and `PUT /savings-goals/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoalRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_amount: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_amount: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_date: Option<String>,
}

impl SavingsGoalRequest {
    /// A full create request.
    pub fn new(name: impl Into<String>, target_amount: f64) -> Self {
        Self {
            name: Some(name.into()),
            target_amount: Some(target_amount),
            ..Self::default()
        }
    }
}
