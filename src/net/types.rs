//! Wire DTOs for the NexusArt REST API.
//!
//! DESIGN
//! ======
//! The backend is authoritative for every record here; the client only
//! decodes what it needs. Optional and counter fields default when absent so
//! a leaner server payload still decodes.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Subscription tier attached to a user.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanType {
    #[default]
    Trial,
    Basic,
    Professional,
    Annual,
    /// Any tier this client does not know about.
    #[serde(other)]
    Other,
}

impl PlanType {
    /// Wire name; also the id of the matching entry in the plan catalogue.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trial => "trial",
            Self::Basic => "basic",
            Self::Professional => "professional",
            Self::Annual => "annual",
            Self::Other => "other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Trial => "Trial",
            Self::Basic => "Basic",
            Self::Professional => "Professional",
            Self::Annual => "Annual",
            Self::Other => "Custom",
        }
    }
}

/// The signed-in account as returned by `/api/auth/me`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub business_name: Option<String>,
    #[serde(default)]
    pub business_sector: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub plan_type: PlanType,
    #[serde(default)]
    pub credits_used: u32,
    #[serde(default)]
    pub credits_limit: u32,
    #[serde(default)]
    pub remaining_credits: Option<u32>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub has_active_subscription: bool,
    #[serde(default)]
    pub created_at: String,
}

impl User {
    /// A trial account that has not generated anything yet.
    pub fn is_fresh_trial(&self) -> bool {
        self.plan_type == PlanType::Trial && self.credits_used == 0
    }

    /// Name to greet the user with.
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.email)
    }
}

/// Partial user update. `None` fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_sector: Option<String>,
}

impl UserPatch {
    /// Merge the present fields into `user`.
    pub fn apply_to(&self, user: &mut User) {
        if let Some(v) = &self.full_name {
            user.full_name = Some(v.clone());
        }
        if let Some(v) = &self.phone {
            user.phone = Some(v.clone());
        }
        if let Some(v) = &self.business_name {
            user.business_name = Some(v.clone());
        }
        if let Some(v) = &self.business_sector {
            user.business_sector = Some(v.clone());
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Payload for `POST /api/auth/register`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RegisterData {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub full_name: String,
    pub cpf_cnpj: String,
    pub phone: String,
    pub business_name: String,
    pub business_sector: String,
}

/// Successful login/register answer.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    pub user: User,
}

/// Aggregates from `/api/auth/me/stats`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct UserStats {
    #[serde(default)]
    pub total_generations: u32,
    #[serde(default)]
    pub generations_today: u32,
    #[serde(default)]
    pub generations_this_month: u32,
    #[serde(default)]
    pub whatsapp_numbers_count: u32,
    #[serde(default)]
    pub templates_count: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationStatus {
    #[default]
    Pending,
    Processing,
    Completed,
    Failed,
}

impl GenerationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

/// One generated art piece.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Generation {
    pub id: i64,
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub template_id: Option<i64>,
    #[serde(default)]
    pub input_type: Option<String>,
    #[serde(default)]
    pub status: GenerationStatus,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub credits_used: u32,
    #[serde(default)]
    pub downloads: u32,
    #[serde(default)]
    pub shares: u32,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub created_at: String,
}

/// Page of generations from `GET /api/generations`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GenerationList {
    #[serde(default)]
    pub generations: Vec<Generation>,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub page_size: u32,
    #[serde(default)]
    pub total_pages: u32,
}

/// Filters for `GET /api/generations`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerationQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub status: Option<GenerationStatus>,
    pub search: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct NewGeneration {
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ShareLink {
    pub share_url: String,
    #[serde(default)]
    pub share_count: u32,
}

/// Art template the generator can start from.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub style: String,
    #[serde(default)]
    pub prompt_template: String,
    #[serde(default)]
    pub preview_url: Option<String>,
    #[serde(default)]
    pub is_premium: bool,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub usage_count: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TemplateDraft {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: String,
    pub style: String,
    pub prompt_template: String,
    pub is_premium: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberStatus {
    #[default]
    Pending,
    Verified,
    Inactive,
}

/// A WhatsApp number linked to the account.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct WhatsAppNumber {
    pub id: i64,
    pub phone_number: String,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub status: NumberStatus,
    #[serde(default)]
    pub messages_received: u32,
    #[serde(default)]
    pub messages_sent: u32,
    #[serde(default)]
    pub last_used_at: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct TestMessageReceipt {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message_sid: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Payload for `POST /api/users/onboarding`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct OnboardingSettings {
    pub whatsapp_number: String,
    pub preferred_style: String,
}

/// A purchasable plan from `/api/subscriptions/plans`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Plan {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price_monthly: f64,
    #[serde(default)]
    pub price_yearly: f64,
    #[serde(default)]
    pub features: Vec<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingCycle {
    #[default]
    Monthly,
    Yearly,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    PastDue,
    Cancelled,
    Expired,
    #[default]
    Trial,
}

/// Current subscription from `/api/subscriptions/current`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Subscription {
    #[serde(default)]
    pub plan_type: PlanType,
    #[serde(default)]
    pub status: SubscriptionStatus,
    #[serde(default)]
    pub current_period_end: Option<String>,
    #[serde(default)]
    pub trial_end: Option<String>,
    #[serde(default)]
    pub credits_used: u32,
    #[serde(default)]
    pub credits_limit: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SubscriptionRequest {
    pub plan_id: String,
    pub billing_cycle: BillingCycle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method_id: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Invoice {
    pub id: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub invoice_url: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatsPeriod {
    Day,
    Week,
    Month,
    Year,
}

impl StatsPeriod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

/// Free-form aggregates from `/api/stats/*`; the shape is owned by the backend.
pub type StatsPayload = serde_json::Value;
