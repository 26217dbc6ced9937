use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::errors::CoreError;
use crate::models::analytics::{AnalyticsReport, PredictionResult};
use crate::models::budget::{Budget, BudgetProgress, BudgetRequest};
use crate::models::forum::RawForumPost;
use crate::models::goal::{SavingsGoal, SavingsGoalProgress, SavingsGoalRequest};
use crate::models::transaction::{Transaction, TransactionRequest};
use crate::models::user::{AuthResponse, LoginRequest, ProfileUpdate, SignUpRequest, User};

use super::request::ApiRequest;
use super::session::Session;
use super::traits::ApiTransport;

#[derive(Serialize)]
struct ContentBody<'a> {
    content: &'a str,
}

#[derive(Serialize)]
struct AmountBody {
    amount: f64,
}

/// Typed endpoints of the budget REST API.
///
/// Every authenticated call takes the [`Session`] explicitly and fails with
/// `NotAuthenticated` when it holds no token. List endpoints treat an empty
/// or `null` body as an empty list.
pub struct BudgetClient {
    transport: Box<dyn ApiTransport>,
}

impl BudgetClient {
    pub fn new(transport: Box<dyn ApiTransport>) -> Self {
        Self { transport }
    }

    /// Name of the underlying transport.
    pub fn transport_name(&self) -> &str {
        self.transport.name()
    }

    // ── Plumbing ────────────────────────────────────────────────────

    async fn call(&self, session: &Session, request: ApiRequest) -> Result<Value, CoreError> {
        let token = session.require_token()?;
        self.transport.send(&request, Some(token)).await
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        session: &Session,
        request: ApiRequest,
        what: &str,
    ) -> Result<T, CoreError> {
        let value = self.call(session, request).await?;
        decode(value, what)
    }

    async fn fetch_list<T: DeserializeOwned>(
        &self,
        session: &Session,
        request: ApiRequest,
        what: &str,
    ) -> Result<Vec<T>, CoreError> {
        let value = self.call(session, request).await?;
        let list: Option<Vec<T>> = decode(value, what)?;
        Ok(list.unwrap_or_default())
    }

    async fn execute(&self, session: &Session, request: ApiRequest) -> Result<(), CoreError> {
        self.call(session, request).await.map(|_| ())
    }

    // ── Auth ────────────────────────────────────────────────────────

    /// Register a new account. Does not log in.
    pub async fn sign_up(&self, request: &SignUpRequest) -> Result<(), CoreError> {
        let req = ApiRequest::post("/auth/signup").json(request)?;
        self.transport.send(&req, None).await.map(|_| ())
    }

    /// Exchange credentials for a bearer token.
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, CoreError> {
        let req = ApiRequest::post("/auth/login").json(request)?;
        let value = self.transport.send(&req, None).await?;
        let auth: AuthResponse = decode(value, "login response")?;
        if auth.token.trim().is_empty() {
            return Err(CoreError::Deserialization("Login response carried an empty token".into()));
        }
        Ok(auth)
    }

    // ── Profile ─────────────────────────────────────────────────────

    pub async fn get_profile(&self, session: &Session) -> Result<User, CoreError> {
        self.fetch(session, ApiRequest::get("/profile"), "profile").await
    }

    pub async fn update_profile(&self, session: &Session, update: &ProfileUpdate) -> Result<User, CoreError> {
        let req = ApiRequest::put("/profile").json(update)?;
        self.fetch(session, req, "profile").await
    }

    // ── Transactions ────────────────────────────────────────────────

    pub async fn get_transactions(&self, session: &Session) -> Result<Vec<Transaction>, CoreError> {
        self.fetch_list(session, ApiRequest::get("/transactions"), "transactions").await
    }

    pub async fn create_transaction(
        &self,
        session: &Session,
        request: &TransactionRequest,
    ) -> Result<Transaction, CoreError> {
        let req = ApiRequest::post("/transactions").json(request)?;
        self.fetch(session, req, "transaction").await
    }

    pub async fn update_transaction(
        &self,
        session: &Session,
        id: i64,
        request: &TransactionRequest,
    ) -> Result<Transaction, CoreError> {
        let req = ApiRequest::put(format!("/transactions/{id}")).json(request)?;
        self.fetch(session, req, "transaction").await
    }

    pub async fn delete_transaction(&self, session: &Session, id: i64) -> Result<(), CoreError> {
        self.execute(session, ApiRequest::delete(format!("/transactions/{id}"))).await
    }

    // ── Budgets ─────────────────────────────────────────────────────

    pub async fn get_budgets(&self, session: &Session, month: u32, year: i32) -> Result<Vec<Budget>, CoreError> {
        let req = ApiRequest::get("/budgets").query("month", month).query("year", year);
        self.fetch_list(session, req, "budgets").await
    }

    pub async fn create_budget(&self, session: &Session, request: &BudgetRequest) -> Result<Budget, CoreError> {
        let req = ApiRequest::post("/budgets").json(request)?;
        self.fetch(session, req, "budget").await
    }

    pub async fn update_budget(
        &self,
        session: &Session,
        id: i64,
        request: &BudgetRequest,
    ) -> Result<Budget, CoreError> {
        let req = ApiRequest::put(format!("/budgets/{id}")).json(request)?;
        self.fetch(session, req, "budget").await
    }

    pub async fn delete_budget(&self, session: &Session, id: i64) -> Result<(), CoreError> {
        self.execute(session, ApiRequest::delete(format!("/budgets/{id}"))).await
    }

    pub async fn get_budget_progress(
        &self,
        session: &Session,
        month: u32,
        year: i32,
    ) -> Result<Vec<BudgetProgress>, CoreError> {
        let req = ApiRequest::get("/budgets/progress")
            .query("month", month)
            .query("year", year);
        self.fetch_list(session, req, "budget progress").await
    }

    // ── Savings goals ───────────────────────────────────────────────

    pub async fn get_savings_goals(&self, session: &Session) -> Result<Vec<SavingsGoal>, CoreError> {
        self.fetch_list(session, ApiRequest::get("/savings-goals"), "savings goals").await
    }

    pub async fn create_savings_goal(
        &self,
        session: &Session,
        request: &SavingsGoalRequest,
    ) -> Result<SavingsGoal, CoreError> {
        let req = ApiRequest::post("/savings-goals").json(request)?;
        self.fetch(session, req, "savings goal").await
    }

    pub async fn update_savings_goal(
        &self,
        session: &Session,
        id: i64,
        request: &SavingsGoalRequest,
    ) -> Result<SavingsGoal, CoreError> {
        let req = ApiRequest::put(format!("/savings-goals/{id}")).json(request)?;
        self.fetch(session, req, "savings goal").await
    }

    pub async fn delete_savings_goal(&self, session: &Session, id: i64) -> Result<(), CoreError> {
        self.execute(session, ApiRequest::delete(format!("/savings-goals/{id}"))).await
    }

    pub async fn get_savings_goal_progress(&self, session: &Session) -> Result<Vec<SavingsGoalProgress>, CoreError> {
        self.fetch_list(session, ApiRequest::get("/savings-goals/progress"), "savings goal progress")
            .await
    }

    pub async fn add_to_savings_goal(
        &self,
        session: &Session,
        id: i64,
        amount: f64,
    ) -> Result<SavingsGoal, CoreError> {
        let req = ApiRequest::post(format!("/savings-goals/{id}/add")).json(&AmountBody { amount })?;
        self.fetch(session, req, "savings goal").await
    }

    // ── Analytics ───────────────────────────────────────────────────

    pub async fn get_analytics(&self, session: &Session, year: i32, month: u32) -> Result<AnalyticsReport, CoreError> {
        let req = ApiRequest::get("/analytics").query("year", year).query("month", month);
        let report: Option<AnalyticsReport> = self.fetch(session, req, "analytics").await?;
        Ok(report.unwrap_or_default())
    }

    pub async fn predict_next_month(&self, session: &Session, months: u32) -> Result<PredictionResult, CoreError> {
        let req = ApiRequest::get("/analytics/predict-next-month").query("months", months);
        let prediction: Option<PredictionResult> = self.fetch(session, req, "prediction").await?;
        Ok(prediction.unwrap_or_default())
    }

    // ── Admin ───────────────────────────────────────────────────────

    pub async fn list_users(&self, session: &Session) -> Result<Vec<User>, CoreError> {
        self.fetch_list(session, ApiRequest::get("/admin/users"), "users").await
    }

    pub async fn ban_user(&self, session: &Session, id: i64) -> Result<(), CoreError> {
        self.execute(session, ApiRequest::post(format!("/admin/users/{id}/ban"))).await
    }

    pub async fn unban_user(&self, session: &Session, id: i64) -> Result<(), CoreError> {
        self.execute(session, ApiRequest::post(format!("/admin/users/{id}/unban"))).await
    }

    pub async fn list_admin_requests(&self, session: &Session) -> Result<Vec<User>, CoreError> {
        self.fetch_list(session, ApiRequest::get("/admin/admin-requests"), "admin requests")
            .await
    }

    pub async fn approve_admin(&self, session: &Session, id: i64) -> Result<(), CoreError> {
        self.execute(session, ApiRequest::post(format!("/admin/admin-requests/{id}/approve")))
            .await
    }

    pub async fn revoke_admin(&self, session: &Session, id: i64) -> Result<(), CoreError> {
        self.execute(session, ApiRequest::post(format!("/admin/admin-requests/{id}/revoke")))
            .await
    }

    // ── Forum ───────────────────────────────────────────────────────

    pub async fn list_forum_posts(&self, session: &Session, page: u32, size: u32) -> Result<Vec<RawForumPost>, CoreError> {
        let req = ApiRequest::get("/forum/posts").query("page", page).query("size", size);
        self.fetch_list(session, req, "forum posts").await
    }

    pub async fn create_forum_post(&self, session: &Session, content: &str) -> Result<(), CoreError> {
        let req = ApiRequest::post("/forum/posts").json(&ContentBody { content })?;
        self.execute(session, req).await
    }

    pub async fn update_forum_post(&self, session: &Session, id: i64, content: &str) -> Result<(), CoreError> {
        let req = ApiRequest::put(format!("/forum/posts/{id}")).json(&ContentBody { content })?;
        self.execute(session, req).await
    }

    pub async fn delete_forum_post(&self, session: &Session, id: i64) -> Result<(), CoreError> {
        self.execute(session, ApiRequest::delete(format!("/forum/posts/{id}"))).await
    }

    pub async fn like_forum_post(&self, session: &Session, id: i64) -> Result<(), CoreError> {
        self.execute(session, ApiRequest::post(format!("/forum/posts/{id}/like"))).await
    }

    pub async fn add_forum_comment(&self, session: &Session, post_id: i64, content: &str) -> Result<(), CoreError> {
        let req = ApiRequest::post(format!("/forum/posts/{post_id}/comments")).json(&ContentBody { content })?;
        self.execute(session, req).await
    }

    pub async fn like_forum_comment(&self, session: &Session, id: i64) -> Result<(), CoreError> {
        self.execute(session, ApiRequest::post(format!("/forum/comments/{id}/like"))).await
    }

    pub async fn update_forum_comment(&self, session: &Session, id: i64, content: &str) -> Result<(), CoreError> {
        let req = ApiRequest::put(format!("/forum/comments/{id}")).json(&ContentBody { content })?;
        self.execute(session, req).await
    }

    pub async fn delete_forum_comment(&self, session: &Session, id: i64) -> Result<(), CoreError> {
        self.execute(session, ApiRequest::delete(format!("/forum/comments/{id}"))).await
    }
}

fn decode<T: DeserializeOwned>(value: Value, what: &str) -> Result<T, CoreError> {
    serde_json::from_value(value)
        .map_err(|e| CoreError::Deserialization(format!("Failed to parse {what}: {e}")))
}
