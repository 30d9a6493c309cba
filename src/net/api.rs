//! Typed NexusArt REST endpoints.
//!
//! Each helper builds one `ApiRequest` and decodes the answer, so pages deal
//! in DTOs rather than paths. All of them go through `ApiClient::send` and
//! therefore through the auth middleware.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Result<_, ApiError>`; pages turn failures into notices and
//! never panic on a bad response.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::http::{ApiClient, ApiRequest, Transport};
use super::types::{
    Generation, GenerationList, GenerationQuery, Invoice, NewGeneration, OnboardingSettings, Plan, RegisterData,
    ShareLink, StatsPayload, StatsPeriod, Subscription, SubscriptionRequest, Template, TemplateDraft,
    TestMessageReceipt, TokenResponse, User, UserPatch, UserStats, WhatsAppNumber,
};
use crate::error::ApiError;

fn generation_endpoint(id: i64) -> String {
    format!("/api/generations/{id}")
}

fn template_endpoint(id: i64) -> String {
    format!("/api/templates/{id}")
}

fn whatsapp_number_endpoint(id: i64) -> String {
    format!("/api/whatsapp/numbers/{id}")
}

fn generation_list_request(query: &GenerationQuery) -> ApiRequest {
    ApiRequest::get("/api/generations")
        .query_opt("page", query.page)
        .query_opt("limit", query.limit)
        .query_opt("status", query.status.map(|s| s.as_str()))
        .query_opt("search", query.search.as_deref().filter(|s| !s.trim().is_empty()))
}

impl<T: Transport> ApiClient<T> {
    // ---- auth ----

    /// `POST /api/auth/login` with form fields `username` and `password`.
    ///
    /// # Errors
    ///
    /// Fails with the classified request error.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let request = ApiRequest::post("/api/auth/login").form([("username", email), ("password", password)]);
        self.send_json(request).await
    }

    /// `POST /api/auth/register`.
    ///
    /// # Errors
    ///
    /// Fails with the classified request error.
    pub async fn register(&self, data: &RegisterData) -> Result<TokenResponse, ApiError> {
        self.send_json(ApiRequest::post("/api/auth/register").json(data)?).await
    }

    /// `GET /api/auth/me`.
    ///
    /// # Errors
    ///
    /// Fails with the classified request error.
    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.send_json(ApiRequest::get("/api/auth/me")).await
    }

    /// `PUT /api/auth/me`.
    ///
    /// # Errors
    ///
    /// Fails with the classified request error.
    pub async fn update_current_user(&self, patch: &UserPatch) -> Result<User, ApiError> {
        self.send_json(ApiRequest::put("/api/auth/me").json(patch)?).await
    }

    /// `POST /api/auth/logout`.
    ///
    /// # Errors
    ///
    /// Fails with the classified request error.
    pub async fn logout_remote(&self) -> Result<(), ApiError> {
        self.send_unit(ApiRequest::post("/api/auth/logout")).await
    }

    /// `GET /api/auth/me/stats`.
    ///
    /// # Errors
    ///
    /// Fails with the classified request error.
    pub async fn user_stats(&self) -> Result<UserStats, ApiError> {
        self.send_json(ApiRequest::get("/api/auth/me/stats")).await
    }

    /// `POST /api/users/onboarding`.
    ///
    /// # Errors
    ///
    /// Fails with the classified request error.
    pub async fn save_onboarding(&self, settings: &OnboardingSettings) -> Result<(), ApiError> {
        self.send_unit(ApiRequest::post("/api/users/onboarding").json(settings)?).await
    }

    // ---- generations ----

    /// # Errors
    ///
    /// Fails with the classified request error.
    pub async fn list_generations(&self, query: &GenerationQuery) -> Result<GenerationList, ApiError> {
        self.send_json(generation_list_request(query)).await
    }

    /// # Errors
    ///
    /// Fails with the classified request error.
    pub async fn generation(&self, id: i64) -> Result<Generation, ApiError> {
        self.send_json(ApiRequest::get(generation_endpoint(id))).await
    }

    /// # Errors
    ///
    /// Fails with the classified request error.
    pub async fn create_generation(&self, draft: &NewGeneration) -> Result<Generation, ApiError> {
        self.send_json(ApiRequest::post("/api/generations").json(draft)?).await
    }

    /// # Errors
    ///
    /// Fails with the classified request error.
    pub async fn delete_generation(&self, id: i64) -> Result<(), ApiError> {
        self.send_unit(ApiRequest::delete(generation_endpoint(id))).await
    }

    /// # Errors
    ///
    /// Fails with the classified request error.
    pub async fn share_generation(&self, id: i64) -> Result<ShareLink, ApiError> {
        let path = format!("{}/share", generation_endpoint(id));
        self.send_json(ApiRequest::post(path)).await
    }

    // ---- templates ----

    /// # Errors
    ///
    /// Fails with the classified request error.
    pub async fn list_templates(&self, category: Option<&str>) -> Result<Vec<Template>, ApiError> {
        let request = ApiRequest::get("/api/templates").query_opt("category", category);
        self.send_json(request).await
    }

    /// # Errors
    ///
    /// Fails with the classified request error.
    pub async fn template(&self, id: i64) -> Result<Template, ApiError> {
        self.send_json(ApiRequest::get(template_endpoint(id))).await
    }

    /// # Errors
    ///
    /// Fails with the classified request error.
    pub async fn create_template(&self, draft: &TemplateDraft) -> Result<Template, ApiError> {
        self.send_json(ApiRequest::post("/api/templates").json(draft)?).await
    }

    /// # Errors
    ///
    /// Fails with the classified request error.
    pub async fn update_template(&self, id: i64, draft: &TemplateDraft) -> Result<Template, ApiError> {
        self.send_json(ApiRequest::put(template_endpoint(id)).json(draft)?).await
    }

    /// # Errors
    ///
    /// Fails with the classified request error.
    pub async fn delete_template(&self, id: i64) -> Result<(), ApiError> {
        self.send_unit(ApiRequest::delete(template_endpoint(id))).await
    }

    /// # Errors
    ///
    /// Fails with the classified request error.
    pub async fn set_template_favorite(&self, id: i64, favorite: bool) -> Result<(), ApiError> {
        let path = format!("{}/favorite", template_endpoint(id));
        let payload = serde_json::json!({ "favorite": favorite });
        self.send_unit(ApiRequest::put(path).json(&payload)?).await
    }

    // ---- whatsapp ----

    /// # Errors
    ///
    /// Fails with the classified request error.
    pub async fn whatsapp_numbers(&self) -> Result<Vec<WhatsAppNumber>, ApiError> {
        self.send_json(ApiRequest::get("/api/whatsapp/numbers")).await
    }

    /// # Errors
    ///
    /// Fails with the classified request error.
    pub async fn connect_whatsapp(&self, phone_number: &str) -> Result<WhatsAppNumber, ApiError> {
        let payload = serde_json::json!({ "phone_number": phone_number });
        self.send_json(ApiRequest::post("/api/whatsapp/connect").json(&payload)?).await
    }

    /// # Errors
    ///
    /// Fails with the classified request error.
    pub async fn disconnect_whatsapp(&self, id: i64) -> Result<(), ApiError> {
        self.send_unit(ApiRequest::delete(whatsapp_number_endpoint(id))).await
    }

    /// # Errors
    ///
    /// Fails with the classified request error.
    pub async fn send_test_message(&self, phone_number: &str, message: &str) -> Result<TestMessageReceipt, ApiError> {
        let payload = serde_json::json!({ "phone_number": phone_number, "message": message });
        self.send_json(ApiRequest::post("/api/whatsapp/test").json(&payload)?).await
    }

    // ---- subscriptions ----

    /// # Errors
    ///
    /// Fails with the classified request error.
    pub async fn plans(&self) -> Result<Vec<Plan>, ApiError> {
        self.send_json(ApiRequest::get("/api/subscriptions/plans")).await
    }

    /// # Errors
    ///
    /// Fails with the classified request error.
    pub async fn current_subscription(&self) -> Result<Subscription, ApiError> {
        self.send_json(ApiRequest::get("/api/subscriptions/current")).await
    }

    /// # Errors
    ///
    /// Fails with the classified request error.
    pub async fn subscribe(&self, request: &SubscriptionRequest) -> Result<Subscription, ApiError> {
        self.send_json(ApiRequest::post("/api/subscriptions").json(request)?).await
    }

    /// # Errors
    ///
    /// Fails with the classified request error.
    pub async fn cancel_subscription(&self) -> Result<(), ApiError> {
        self.send_unit(ApiRequest::post("/api/subscriptions/cancel")).await
    }

    /// # Errors
    ///
    /// Fails with the classified request error.
    pub async fn invoices(&self) -> Result<Vec<Invoice>, ApiError> {
        self.send_json(ApiRequest::get("/api/subscriptions/invoices")).await
    }

    // ---- stats ----

    /// # Errors
    ///
    /// Fails with the classified request error.
    pub async fn dashboard_stats(&self) -> Result<StatsPayload, ApiError> {
        self.send_json(ApiRequest::get("/api/stats/dashboard")).await
    }

    /// # Errors
    ///
    /// Fails with the classified request error.
    pub async fn generation_stats(&self, period: StatsPeriod) -> Result<StatsPayload, ApiError> {
        let request = ApiRequest::get("/api/stats/generations").query("period", period.as_str());
        self.send_json(request).await
    }

    /// # Errors
    ///
    /// Fails with the classified request error.
    pub async fn engagement_stats(&self) -> Result<StatsPayload, ApiError> {
        self.send_json(ApiRequest::get("/api/stats/engagement")).await
    }
}
