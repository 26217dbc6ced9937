pub mod api;
pub mod errors;
pub mod models;
pub mod services;

use api::{
    client::BudgetClient, http::HttpTransport, session::Session, traits::ApiTransport,
};
use chrono::{Datelike, NaiveDate};
use models::{
    analytics::PredictionResult,
    budget::{Budget, BudgetProgress, BudgetRequest},
    forum::{ForumPost, PostDraft},
    goal::{SavingsGoal, SavingsGoalProgress, SavingsGoalRequest},
    insights::InsightsInput,
    settings::Settings,
    transaction::{Transaction, TransactionRequest},
    user::{LoginRequest, ProfileUpdate, SignUpRequest, User},
    view::{AnalyticsView, DashboardView, ViewInput},
};
use services::{
    analytics_service::AnalyticsService,
    chart_service::ChartService,
    export::ExportService,
    insights_engine::InsightsEngine,
    user_directory::{Page, UserDirectory},
};
use tracing::{info, warn};

use errors::CoreError;

/// Main entry point for the Budget Tracker core library.
/// Holds the signed-in session, the API client and the services that turn
/// fetched data into view models.
#[must_use]
pub struct BudgetTracker {
    settings: Settings,
    session: Session,
    client: BudgetClient,
    insights_engine: InsightsEngine,
    chart_service: ChartService,
    analytics_service: AnalyticsService,
    export_service: ExportService,
    user_directory: UserDirectory,
}

impl std::fmt::Debug for BudgetTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BudgetTracker")
            .field("api_base_url", &self.settings.api_base_url)
            .field("transport", &self.client.transport_name())
            .field("session", &self.session)
            .finish()
    }
}

impl BudgetTracker {
    /// Create a tracker talking to the backend over HTTP.
    pub fn new(settings: Settings) -> Result<Self, CoreError> {
        settings.validate()?;
        let transport = HttpTransport::new(&settings);
        Ok(Self::build(settings, Box::new(transport)))
    }

    /// Create a tracker over a custom transport.
    pub fn with_transport(
        settings: Settings,
        transport: Box<dyn ApiTransport>,
    ) -> Result<Self, CoreError> {
        settings.validate()?;
        Ok(Self::build(settings, transport))
    }

    fn build(settings: Settings, transport: Box<dyn ApiTransport>) -> Self {
        Self {
            insights_engine: InsightsEngine::from_settings(&settings),
            chart_service: ChartService::new(),
            analytics_service: AnalyticsService::new(),
            export_service: ExportService::new(),
            user_directory: UserDirectory::new(),
            client: BudgetClient::new(transport),
            session: Session::new(),
            settings,
        }
    }

    // ── Session ─────────────────────────────────────────────────────

    /// Register a new account. The caller logs in separately.
    pub async fn sign_up(&self, request: &SignUpRequest) -> Result<(), CoreError> {
        if request.username.trim().is_empty() || request.password.is_empty() {
            return Err(CoreError::ValidationError(
                "Username and password are required".into(),
            ));
        }
        self.client.sign_up(request).await
    }

    /// Log in and keep the returned token for subsequent calls.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<(), CoreError> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(CoreError::ValidationError(
                "Username and password are required".into(),
            ));
        }
        let auth = self
            .client
            .login(&LoginRequest::new(username.trim(), password))
            .await?;
        self.session
            .set_token(auth.token, Some(username.trim().to_string()));
        info!(username = username.trim(), "logged in");
        Ok(())
    }

    /// Forget the token. Never fails.
    pub fn logout(&mut self) {
        if self.session.is_authenticated() {
            info!(username = self.session.username().unwrap_or_default(), "logged out");
        }
        self.session.clear();
    }

    /// Resume a session from a stored token.
    pub fn restore_session(&mut self, token: impl Into<String>) {
        self.session = Session::with_token(token);
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn insights_engine(&self) -> &InsightsEngine {
        &self.insights_engine
    }

    // ── Views ───────────────────────────────────────────────────────

    /// Everything the analytics page shows for one month.
    ///
    /// The report, goal progress and prediction are fetched independently;
    /// a failed fetch is logged, replaced by empty data and listed in
    /// `degraded`. Only a missing session is returned as an error.
    pub async fn load_analytics_view(&self, year: i32, month: u32) -> Result<AnalyticsView, CoreError> {
        validate_month(month)?;
        self.session.require_token()?;
        let mut degraded = Vec::new();

        let report = or_degraded(
            self.client.get_analytics(&self.session, year, month).await,
            ViewInput::Analytics,
            &mut degraded,
        )
        .unwrap_or_default();
        let goals = or_degraded(
            self.client.get_savings_goal_progress(&self.session).await,
            ViewInput::SavingsGoals,
            &mut degraded,
        )
        .unwrap_or_default();
        let prediction = or_degraded(
            self.client
                .predict_next_month(&self.session, self.settings.prediction_months)
                .await,
            ViewInput::Prediction,
            &mut degraded,
        );

        let summary = self.analytics_service.summary(&report);
        let insights = self.insights_engine.generate(&InsightsInput {
            categories: &report.category_breakdown,
            income_expenses: &report.income_vs_expenses,
            goals: &goals,
            prediction: prediction.as_ref(),
        });

        Ok(AnalyticsView {
            year,
            month,
            report,
            summary,
            goals,
            prediction,
            insights,
            degraded,
        })
    }

    /// Everything the dashboard shows.
    ///
    /// Profile and transactions are required and their errors are returned.
    /// Goals, the analytics report for `today`'s month and the prediction
    /// are guarded like in [`load_analytics_view`](Self::load_analytics_view).
    pub async fn load_dashboard_view(&self, today: NaiveDate) -> Result<DashboardView, CoreError> {
        let profile = self.client.get_profile(&self.session).await?;
        let transactions = self.client.get_transactions(&self.session).await?;
        let mut degraded = Vec::new();

        let goals = or_degraded(
            self.client.get_savings_goal_progress(&self.session).await,
            ViewInput::SavingsGoals,
            &mut degraded,
        )
        .unwrap_or_default();
        let report = or_degraded(
            self.client
                .get_analytics(&self.session, today.year(), today.month())
                .await,
            ViewInput::Analytics,
            &mut degraded,
        )
        .unwrap_or_default();
        let prediction = or_degraded(
            self.client
                .predict_next_month(&self.session, self.settings.prediction_months)
                .await,
            ViewInput::Prediction,
            &mut degraded,
        );

        let totals = self.analytics_service.dashboard_totals(&transactions, &goals);
        let recent_transactions = self
            .analytics_service
            .recent_transactions(&transactions, self.settings.dashboard_recent_transactions);
        let income_expense_chart = self
            .chart_service
            .income_expense_bars(&report.income_vs_expenses, self.settings.dashboard_chart_months);
        let trailing = self
            .analytics_service
            .trailing_totals(&report.income_vs_expenses, self.settings.dashboard_stats_months);

        let insights = self.insights_engine.generate(&InsightsInput {
            categories: &report.category_breakdown,
            income_expenses: &report.income_vs_expenses,
            goals: &goals,
            prediction: prediction.as_ref(),
        });
        let prediction_badge = prediction.as_ref().and_then(|p| {
            self.chart_service
                .prediction_badge(&p.history_totals, p.predicted_amount)
        });

        Ok(DashboardView {
            profile,
            totals,
            recent_transactions,
            goals,
            income_expense_chart,
            trailing,
            prediction_series: insights.prediction_series.clone(),
            prediction_badge,
            insights,
            degraded,
        })
    }

    /// Fetch a fresh prediction. Errors are returned, not guarded.
    pub async fn refresh_prediction(&self) -> Result<PredictionResult, CoreError> {
        self.client
            .predict_next_month(&self.session, self.settings.prediction_months)
            .await
    }

    // ── Profile ─────────────────────────────────────────────────────

    pub async fn profile(&self) -> Result<User, CoreError> {
        self.client.get_profile(&self.session).await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, CoreError> {
        self.client.update_profile(&self.session, update).await
    }

    // ── Transactions ────────────────────────────────────────────────

    pub async fn transactions(&self) -> Result<Vec<Transaction>, CoreError> {
        self.client.get_transactions(&self.session).await
    }

    pub async fn add_transaction(&self, request: &TransactionRequest) -> Result<Transaction, CoreError> {
        validate_amount(request.amount)?;
        self.client.create_transaction(&self.session, request).await
    }

    pub async fn update_transaction(
        &self,
        id: i64,
        request: &TransactionRequest,
    ) -> Result<Transaction, CoreError> {
        validate_amount(request.amount)?;
        self.client
            .update_transaction(&self.session, id, request)
            .await
    }

    pub async fn delete_transaction(&self, id: i64) -> Result<(), CoreError> {
        self.client.delete_transaction(&self.session, id).await
    }

    /// Fetch all transactions and render them as CSV, optionally keeping
    /// only those dated within `range` (inclusive).
    pub async fn export_transactions_csv(
        &self,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<String, CoreError> {
        let transactions = self.client.get_transactions(&self.session).await?;
        self.export_service.transactions_csv(&transactions, range)
    }

    /// Suggested download name for an export made on `today`.
    pub fn export_file_name(&self, today: NaiveDate) -> String {
        self.export_service.file_name(today)
    }

    // ── Budgets ─────────────────────────────────────────────────────

    pub async fn budgets(&self, month: u32, year: i32) -> Result<Vec<Budget>, CoreError> {
        validate_month(month)?;
        self.client.get_budgets(&self.session, month, year).await
    }

    pub async fn budget_progress(&self, month: u32, year: i32) -> Result<Vec<BudgetProgress>, CoreError> {
        validate_month(month)?;
        self.client
            .get_budget_progress(&self.session, month, year)
            .await
    }

    pub async fn set_budget(&self, request: &BudgetRequest) -> Result<Budget, CoreError> {
        validate_month(request.month)?;
        validate_amount(request.amount)?;
        self.client.create_budget(&self.session, request).await
    }

    pub async fn update_budget(&self, id: i64, request: &BudgetRequest) -> Result<Budget, CoreError> {
        validate_month(request.month)?;
        validate_amount(request.amount)?;
        self.client.update_budget(&self.session, id, request).await
    }

    pub async fn delete_budget(&self, id: i64) -> Result<(), CoreError> {
        self.client.delete_budget(&self.session, id).await
    }

    // ── Savings goals ───────────────────────────────────────────────

    pub async fn savings_goals(&self) -> Result<Vec<SavingsGoal>, CoreError> {
        self.client.get_savings_goals(&self.session).await
    }

    pub async fn savings_goal_progress(&self) -> Result<Vec<SavingsGoalProgress>, CoreError> {
        self.client.get_savings_goal_progress(&self.session).await
    }

    pub async fn create_savings_goal(&self, request: &SavingsGoalRequest) -> Result<SavingsGoal, CoreError> {
        if request.name.as_deref().map(str::trim).unwrap_or_default().is_empty() {
            return Err(CoreError::ValidationError("Goal name is required".into()));
        }
        if let Some(target) = request.target_amount {
            validate_amount(target)?;
        }
        self.client.create_savings_goal(&self.session, request).await
    }

    pub async fn update_savings_goal(
        &self,
        id: i64,
        request: &SavingsGoalRequest,
    ) -> Result<SavingsGoal, CoreError> {
        if let Some(target) = request.target_amount {
            validate_amount(target)?;
        }
        self.client
            .update_savings_goal(&self.session, id, request)
            .await
    }

    pub async fn delete_savings_goal(&self, id: i64) -> Result<(), CoreError> {
        self.client.delete_savings_goal(&self.session, id).await
    }

    /// Put money aside towards a goal.
    pub async fn add_to_savings_goal(&self, id: i64, amount: f64) -> Result<SavingsGoal, CoreError> {
        validate_amount(amount)?;
        self.client
            .add_to_savings_goal(&self.session, id, amount)
            .await
    }

    // ── Forum ───────────────────────────────────────────────────────

    /// One page of posts, decoded into title and body.
    pub async fn forum_posts(&self, page: u32) -> Result<Vec<ForumPost>, CoreError> {
        let raw = self
            .client
            .list_forum_posts(&self.session, page, self.settings.forum_page_size)
            .await?;
        Ok(raw.into_iter().map(ForumPost::from).collect())
    }

    pub async fn create_forum_post(&self, draft: &PostDraft) -> Result<(), CoreError> {
        validate_content(&draft.body, "Post body")?;
        self.client
            .create_forum_post(&self.session, &draft.encode())
            .await
    }

    /// Replace a post's body, keeping its title.
    pub async fn edit_forum_post(&self, post: &ForumPost, body: &str) -> Result<(), CoreError> {
        validate_content(body, "Post body")?;
        let content = post.draft().with_body(body).encode();
        self.client
            .update_forum_post(&self.session, post.id, &content)
            .await
    }

    pub async fn delete_forum_post(&self, id: i64) -> Result<(), CoreError> {
        self.client.delete_forum_post(&self.session, id).await
    }

    pub async fn like_forum_post(&self, id: i64) -> Result<(), CoreError> {
        self.client.like_forum_post(&self.session, id).await
    }

    pub async fn add_forum_comment(&self, post_id: i64, content: &str) -> Result<(), CoreError> {
        validate_content(content, "Comment")?;
        self.client
            .add_forum_comment(&self.session, post_id, content.trim())
            .await
    }

    pub async fn edit_forum_comment(&self, id: i64, content: &str) -> Result<(), CoreError> {
        validate_content(content, "Comment")?;
        self.client
            .update_forum_comment(&self.session, id, content.trim())
            .await
    }

    pub async fn like_forum_comment(&self, id: i64) -> Result<(), CoreError> {
        self.client.like_forum_comment(&self.session, id).await
    }

    pub async fn delete_forum_comment(&self, id: i64) -> Result<(), CoreError> {
        self.client.delete_forum_comment(&self.session, id).await
    }

    // ── Admin ───────────────────────────────────────────────────────

    /// Fetch all users, then filter and paginate them locally.
    pub async fn search_users(
        &self,
        query: &str,
        page: usize,
        page_size: usize,
    ) -> Result<Page<User>, CoreError> {
        let users = self.client.list_users(&self.session).await?;
        Ok(self.user_directory.search(&users, query, page, page_size))
    }

    pub async fn ban_user(&self, id: i64) -> Result<(), CoreError> {
        self.client.ban_user(&self.session, id).await
    }

    pub async fn unban_user(&self, id: i64) -> Result<(), CoreError> {
        self.client.unban_user(&self.session, id).await
    }

    pub async fn admin_requests(&self) -> Result<Vec<User>, CoreError> {
        self.client.list_admin_requests(&self.session).await
    }

    pub async fn approve_admin(&self, id: i64) -> Result<(), CoreError> {
        self.client.approve_admin(&self.session, id).await
    }

    pub async fn revoke_admin(&self, id: i64) -> Result<(), CoreError> {
        self.client.revoke_admin(&self.session, id).await
    }
}

/// Keep a fetched value, or record the failure and return `None`.
fn or_degraded<T>(
    result: Result<T, CoreError>,
    input: ViewInput,
    degraded: &mut Vec<ViewInput>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(input = %input, error = %e, "view input failed to load");
            degraded.push(input);
            None
        }
    }
}

fn validate_month(month: u32) -> Result<(), CoreError> {
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        Err(CoreError::ValidationError(format!(
            "Month must be between 1 and 12, got {month}"
        )))
    }
}

fn validate_amount(amount: f64) -> Result<(), CoreError> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(CoreError::ValidationError(format!(
            "Amount must be a positive number, got {amount}"
        )))
    }
}

fn validate_content(content: &str, what: &str) -> Result<(), CoreError> {
    if content.trim().is_empty() {
        Err(CoreError::ValidationError(format!("{what} cannot be empty")))
    } else {
        Ok(())
    }
}
