use serde::{Deserialize, Serialize};

use super::profile::Audience;

/// Bounds of the customer age input on the email form.
pub const MIN_CUSTOMER_AGE: u8 = 18;
pub const MAX_CUSTOMER_AGE: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentKind {
    #[serde(rename = "Social Media Post")]
    SocialMediaPost,
    #[serde(rename = "Email")]
    Email,
    #[serde(rename = "Ad Copy")]
    AdCopy,
}

impl ContentKind {
    pub const ALL: &'static [ContentKind] = &[
        ContentKind::SocialMediaPost,
        ContentKind::Email,
        ContentKind::AdCopy,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ContentKind::SocialMediaPost => "Social Media Post",
            ContentKind::Email => "Email",
            ContentKind::AdCopy => "Ad Copy",
        }
    }
}

/// Product fields shared by social media posts and ad copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductBrief {
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub product_description: String,
    pub product_audience: Audience,
    #[serde(default)]
    pub product_features: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailBrief {
    #[serde(default)]
    pub customer_name: String,
    pub customer_age: u8,
    /// Comma-separated, passed through as typed.
    #[serde(default)]
    pub customer_interests: String,
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub product_features: String,
}

/// One "Generate Content" submission. Built per call, never persisted
/// beyond the session's form memory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ContentRequest {
    #[serde(rename = "Social Media Post")]
    SocialMediaPost(ProductBrief),
    #[serde(rename = "Email")]
    Email(EmailBrief),
    #[serde(rename = "Ad Copy")]
    AdCopy(ProductBrief),
}

impl ContentRequest {
    pub fn kind(&self) -> ContentKind {
        match self {
            ContentRequest::SocialMediaPost(_) => ContentKind::SocialMediaPost,
            ContentRequest::Email(_) => ContentKind::Email,
            ContentRequest::AdCopy(_) => ContentKind::AdCopy,
        }
    }

    /// Form-level checks. Text fields are never rejected for being empty.
    pub fn validate(&self) -> Result<(), String> {
        if let ContentRequest::Email(brief) = self {
            if !(MIN_CUSTOMER_AGE..=MAX_CUSTOMER_AGE).contains(&brief.customer_age) {
                return Err(format!(
                    "customer_age must be between {MIN_CUSTOMER_AGE} and {MAX_CUSTOMER_AGE}"
                ));
            }
        }
        Ok(())
    }
}
