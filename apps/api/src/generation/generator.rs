//! Content generation — orchestrates one "Generate Content" action.
//!
//! Flow: build content prompt → generation call → extract text →
//!       build recommendation prompt → generation call → extract text.
//!
//! A hard failure (transport, non-2xx, unparseable body) on the content call
//! ends the action and the recommendation call is never made. A hard failure
//! on the recommendation call leaves the content panel in place and turns the
//! recommendation panel into an error. An empty or malformed-but-2xx reply is
//! soft: it becomes a notice panel and the action carries on, so the
//! recommendation call is made even when the content call produced nothing.

use serde::Serialize;
use tracing::{error, info};

use crate::errors::AppError;
use crate::generation::prompts::{build_content_prompt, build_recommendation_prompt};
use crate::generation::reveal::expand_paragraphs;
use crate::llm_client::{extract_generated_text, Extraction, TextGenerator};
use crate::models::profile::CompanyProfile;
use crate::models::request::ContentRequest;

pub const MISSING_RESULTS_NOTICE: &str =
    "The response does not contain the expected 'results' structure. Please check the response data.";
pub const EMPTY_CONTENT_NOTICE: &str = "No generated text found in the response.";
pub const EMPTY_RECOMMENDATIONS_NOTICE: &str =
    "No generated recommendations found in the response.";
pub const RECOMMENDATIONS_HEADING: &str = "Content Strategy Recommendations";

/// One block of output on the generation view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Panel {
    /// Text to reveal under a heading. Newlines are already paragraph breaks.
    Rendered { heading: String, text: String },
    /// The call succeeded but yielded nothing to show.
    Notice { message: String },
    /// The call failed; `message` is the user-facing banner.
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationOutcome {
    pub content: Panel,
    pub recommendations: Panel,
}

/// Runs the whole generate action.
///
/// Fails only when the content call fails; a failed recommendation call is
/// reported inside the outcome.
pub async fn generate_content(
    generator: &dyn TextGenerator,
    profile: Option<&CompanyProfile>,
    request: &ContentRequest,
) -> Result<GenerationOutcome, AppError> {
    let content = generate_primary(generator, profile, request).await?;
    let recommendations = generate_recommendations(generator, profile).await;

    Ok(GenerationOutcome {
        content,
        recommendations,
    })
}

/// The content call. Failures are logged here, at the action boundary.
pub async fn generate_primary(
    generator: &dyn TextGenerator,
    profile: Option<&CompanyProfile>,
    request: &ContentRequest,
) -> Result<Panel, AppError> {
    let kind = request.kind();

    info!("Generating {}", kind.label());
    let prompt = build_content_prompt(request, profile);
    let body = generator
        .generate(&prompt)
        .await
        .map_err(AppError::from)
        .inspect_err(|e| error!("Error generating content: {e}"))?;

    Ok(to_panel(
        extract_generated_text(&body),
        format!("Generated {}", kind.label()),
        EMPTY_CONTENT_NOTICE,
    ))
}

/// The recommendation call. Never fails: a hard failure becomes
/// [`Panel::Failed`].
pub async fn generate_recommendations(
    generator: &dyn TextGenerator,
    profile: Option<&CompanyProfile>,
) -> Panel {
    info!("Generating recommendations");
    let prompt = build_recommendation_prompt(profile);

    match generator.generate(&prompt).await.map_err(AppError::from) {
        Ok(body) => to_panel(
            extract_generated_text(&body),
            RECOMMENDATIONS_HEADING.to_string(),
            EMPTY_RECOMMENDATIONS_NOTICE,
        ),
        Err(e) => {
            error!("Error generating recommendations: {e}");
            Panel::Failed {
                message: e.banner(),
            }
        }
    }
}

fn to_panel(extraction: Extraction, heading: String, empty_notice: &str) -> Panel {
    match extraction {
        Extraction::Text(text) => Panel::Rendered {
            heading,
            text: expand_paragraphs(&text),
        },
        Extraction::EmptyText => Panel::Notice {
            message: empty_notice.to_string(),
        },
        Extraction::MissingResults => Panel::Notice {
            message: MISSING_RESULTS_NOTICE.to_string(),
        },
    }
}
