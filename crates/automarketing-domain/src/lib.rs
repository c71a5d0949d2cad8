//! # AutoMarketing - Domain Model
//!
//! Core entities, enums, and request shapes for product management and
//! AI-assisted marketing content. These types are shared by the persistence
//! layer, the HTTP API, and the JSON sent to the browser pages.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Language assigned to a product when the caller does not pick any.
pub const DEFAULT_TARGET_LANGUAGE: &str = "en-US";

// =============================================================================
// ENUMS
// =============================================================================

/// Go-to-market model of a product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductType {
    #[serde(rename = "B2B")]
    B2b,
    #[serde(rename = "B2C")]
    B2c,
    #[serde(rename = "B2B2C")]
    B2b2c,
}

impl ProductType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::B2b => "B2B",
            Self::B2c => "B2C",
            Self::B2b2c => "B2B2C",
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "B2B" => Ok(Self::B2b),
            "B2C" => Ok(Self::B2c),
            "B2B2C" => Ok(Self::B2b2c),
            other => Err(DomainError::InvalidEnum {
                field: "type",
                value: other.to_string(),
            }),
        }
    }
}

/// Product lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    #[default]
    Active,
    Paused,
    Archived,
}

impl ProductStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Paused => "paused",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "paused" => Ok(Self::Paused),
            "archived" => Ok(Self::Archived),
            other => Err(DomainError::InvalidEnum {
                field: "status",
                value: other.to_string(),
            }),
        }
    }
}

/// Kind of generated marketing content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Blog,
    Social,
    Email,
    LandingPage,
    VideoScript,
}

/// Editorial state of a content piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentStatus {
    Draft,
    Ready,
    Scheduled,
    Published,
    Archived,
}

/// Processing state of an AI task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AiTaskStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

// =============================================================================
// ENTITY TYPES
// =============================================================================

/// Product entity - the unit everything else is marketed around
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(rename = "type")]
    pub product_type: ProductType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_model: Option<String>,

    // Targeting
    #[serde(default)]
    pub target_markets: Vec<String>,
    #[serde(default)]
    pub target_languages: Vec<String>,

    pub status: ProductStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,

    // Content counters maintained by the database
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_content_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_content_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_engagement_rate: Option<f64>,
}

impl Product {
    /// Apply the fields present in `patch`, leaving the rest untouched.
    pub fn apply(&mut self, patch: &ProductPatch) {
        if let Some(name) = &patch.name {
            self.name.clone_from(name);
        }
        if let Some(description) = &patch.description {
            self.description.clone_from(description);
        }
        if let Some(product_type) = patch.product_type {
            self.product_type = product_type;
        }
        if let Some(category) = &patch.category {
            self.category.clone_from(category);
        }
        if let Some(price_model) = &patch.price_model {
            self.price_model.clone_from(price_model);
        }
        if let Some(markets) = &patch.target_markets {
            self.target_markets.clone_from(markets);
        }
        if let Some(languages) = &patch.target_languages {
            self.target_languages.clone_from(languages);
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(metadata) = &patch.metadata {
            self.metadata.clone_from(metadata);
        }
    }
}

/// User persona derived for a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPersona {
    pub id: Uuid,
    pub product_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    pub persona_name: String,
    pub demographics: Value,
    pub psychographics: Value,
    pub platforms: Vec<String>,
    pub content_preferences: Value,
    pub buying_triggers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_insights: Option<String>,

    pub confidence_score: f64,
    pub version: i32,
    pub is_active: bool,
}

/// Per-market research snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketAnalysis {
    pub id: Uuid,
    pub product_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub market: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trends: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub competitors: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opportunities: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword_data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_summary: Option<String>,

    pub confidence_score: f64,
}

/// Generated marketing content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentPiece {
    pub id: Uuid,
    pub product_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub content_type: ContentType,
    pub language: String,

    // Provenance
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub based_on_persona_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub based_on_analysis_ids: Option<Vec<Uuid>>,

    // SEO
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readability_score: Option<f64>,

    // Publishing
    pub status: ContentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicted_performance: Option<Value>,

    pub version: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

/// Record of a single AI generation job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiTask {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    pub task_type: String,
    pub status: AiTaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_data: Option<Value>,

    // Usage accounting
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_used: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens_used: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_usd: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,

    pub attempts: i32,
    pub max_attempts: i32,
}

// =============================================================================
// REQUEST TYPES
// =============================================================================

/// Product creation payload as received from a client.
///
/// Every field is optional at the wire level so that missing required
/// fields surface as a [`DomainError::MissingFields`] rather than a generic
/// decode failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateProductRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "type")]
    pub product_type: Option<ProductType>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub target_markets: Option<Vec<String>>,
    #[serde(default)]
    pub target_languages: Option<Vec<String>>,
}

impl CreateProductRequest {
    /// Check required fields and fill defaults.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::MissingFields`] when `name` is absent or blank,
    /// or when `type` is absent.
    pub fn validate(self) -> Result<NewProduct, DomainError> {
        let name = self
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        let (Some(name), Some(product_type)) = (name, self.product_type) else {
            return Err(DomainError::MissingFields(&["name", "type"]));
        };

        Ok(NewProduct {
            name,
            description: self.description,
            product_type,
            category: self.category,
            target_markets: self.target_markets.unwrap_or_default(),
            target_languages: self
                .target_languages
                .unwrap_or_else(|| vec![DEFAULT_TARGET_LANGUAGE.to_string()]),
            status: ProductStatus::Active,
        })
    }
}

/// Validated product ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub product_type: ProductType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub target_markets: Vec<String>,
    pub target_languages: Vec<String>,
    pub status: ProductStatus,
}

/// Partial product update. Absent fields are left unchanged.
///
/// Nullable columns use `Option<Option<T>>`: `None` leaves the column alone,
/// `Some(None)` (an explicit JSON `null`) clears it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub product_type: Option<ProductType>,
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub price_model: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_markets: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_languages: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ProductStatus>,
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub metadata: Option<Option<Value>>,
}

/// Present keys decode to `Some`, so `null` becomes `Some(None)`; absent
/// keys fall back to `default` and stay `None`.
fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl ProductPatch {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.product_type.is_none()
            && self.category.is_none()
            && self.price_model.is_none()
            && self.target_markets.is_none()
            && self.target_languages.is_none()
            && self.status.is_none()
            && self.metadata.is_none()
    }

    /// Reject patches that carry nothing or would blank the name.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyPatch`] or [`DomainError::BlankName`].
    pub fn validate(self) -> Result<Self, DomainError> {
        if self.is_empty() {
            return Err(DomainError::EmptyPatch);
        }
        if self.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(DomainError::BlankName);
        }
        Ok(self)
    }
}

// =============================================================================
// ERRORS
// =============================================================================

/// Domain-level errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(&'static [&'static str]),

    #[error("Invalid value '{value}' for field '{field}'")]
    InvalidEnum { field: &'static str, value: String },

    #[error("Update must contain at least one field")]
    EmptyPatch,

    #[error("Product name must not be blank")]
    BlankName,
}
