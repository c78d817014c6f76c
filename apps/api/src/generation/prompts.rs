// Prompt templates for the content generation action.
// Placeholders are `{name}`; fill with `fill_template`, never with chained
// `str::replace`, so user text containing braces is left untouched.

use crate::models::profile::CompanyProfile;
use crate::models::request::{ContentRequest, EmailBrief, ProductBrief};

/// Social media posts and ad copy.
/// Fill: {kind}, {company_name}, {brand_voice}, {product_audience},
///       {product_name}, {product_description}, {product_features}
pub const PRODUCT_PROMPT_TEMPLATE: &str = "\
Generate a high-quality {kind} focusing on revenue-generating strategies for {company_name}.
The {kind} should align with the {brand_voice} voice and target {product_audience} audience.
For the {kind}:
- Use the following product details: {product_name}, {product_description}.
- Highlight key features: {product_features}.
- Ensure that the content is engaging, persuasive, and optimized for conversions.
- Include a call-to-action relevant to {company_name}.";

/// Personalised emails.
/// Fill: {customer_name}, {customer_age}, {customer_interests}, {company_name},
///       {product_name}, {product_features}, {brand_voice}
pub const EMAIL_PROMPT_TEMPLATE: &str = "\
Write a personalized email for a customer named {customer_name}, aged {customer_age}, interested in {customer_interests}.
The email is from {company_name}, and it should promote {product_name}.
The email should:
- Address the customer directly by name.
- Mention their specific interests to create a personal connection.
- Highlight the key features and benefits of {product_name}: {product_features}.
- Encourage the customer to take action (e.g., make a purchase, learn more).
- Maintain a {brand_voice} tone.";

/// Follow-up call made after every content generation.
/// Fill: {industry}, {company_name}
pub const RECOMMENDATION_PROMPT_TEMPLATE: &str = "\
Provide three real-time actionable recommendations based on the latest trends in the {industry} industry to enhance the marketing strategy for {company_name}.";

/// Builds the content prompt for `request`.
/// An unsaved profile leaves its fields as empty spans.
pub fn build_content_prompt(request: &ContentRequest, profile: Option<&CompanyProfile>) -> String {
    let company_name = profile.map(|p| p.name.as_str()).unwrap_or_default();
    let brand_voice = profile
        .map(|p| p.brand_voice.label().to_lowercase())
        .unwrap_or_default();

    match request {
        ContentRequest::SocialMediaPost(brief) | ContentRequest::AdCopy(brief) => {
            product_prompt(request, brief, company_name, &brand_voice)
        }
        ContentRequest::Email(brief) => email_prompt(brief, company_name, &brand_voice),
    }
}

/// Builds the recommendation prompt. Only industry and company name feed it.
pub fn build_recommendation_prompt(profile: Option<&CompanyProfile>) -> String {
    let industry = profile.map(|p| p.industry.label()).unwrap_or_default();
    let company_name = profile.map(|p| p.name.as_str()).unwrap_or_default();

    fill_template(
        RECOMMENDATION_PROMPT_TEMPLATE,
        &[("industry", industry), ("company_name", company_name)],
    )
}

fn product_prompt(
    request: &ContentRequest,
    brief: &ProductBrief,
    company_name: &str,
    brand_voice: &str,
) -> String {
    let kind = request.kind().label().to_lowercase();
    fill_template(
        PRODUCT_PROMPT_TEMPLATE,
        &[
            ("kind", kind.as_str()),
            ("company_name", company_name),
            ("brand_voice", brand_voice),
            ("product_audience", brief.product_audience.label()),
            ("product_name", brief.product_name.as_str()),
            ("product_description", brief.product_description.as_str()),
            ("product_features", brief.product_features.as_str()),
        ],
    )
}

fn email_prompt(brief: &EmailBrief, company_name: &str, brand_voice: &str) -> String {
    let age = brief.customer_age.to_string();
    fill_template(
        EMAIL_PROMPT_TEMPLATE,
        &[
            ("customer_name", brief.customer_name.as_str()),
            ("customer_age", age.as_str()),
            ("customer_interests", brief.customer_interests.as_str()),
            ("company_name", company_name),
            ("product_name", brief.product_name.as_str()),
            ("product_features", brief.product_features.as_str()),
            ("brand_voice", brand_voice),
        ],
    )
}

/// Substitutes `{key}` placeholders in one left-to-right pass.
/// Unknown placeholders are kept as written; substituted values are not rescanned.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let substituted = after.find('}').and_then(|close| {
            let key = &after[..close];
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v, close))
        });

        match substituted {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
