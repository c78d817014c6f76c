use axum::{response::Html, Json};
use serde::Serialize;

use crate::models::profile::{Audience, BrandVoice, Industry};
use crate::models::request::{ContentKind, MAX_CUSTOMER_AGE, MIN_CUSTOMER_AGE};

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// GET /
pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

#[derive(Serialize)]
pub struct FormOptions {
    pub industries: Vec<&'static str>,
    pub audiences: Vec<&'static str>,
    pub brand_voices: Vec<&'static str>,
    pub content_kinds: Vec<&'static str>,
    pub customer_age: (u8, u8),
}

/// GET /api/v1/options
/// Choices for every select box on the page, in display order.
pub async fn options_handler() -> Json<FormOptions> {
    Json(FormOptions {
        industries: Industry::ALL.iter().map(Industry::label).collect(),
        audiences: Audience::ALL.iter().map(Audience::label).collect(),
        brand_voices: BrandVoice::ALL.iter().map(BrandVoice::label).collect(),
        content_kinds: ContentKind::ALL.iter().map(ContentKind::label).collect(),
        customer_age: (MIN_CUSTOMER_AGE, MAX_CUSTOMER_AGE),
    })
}
