//! Reply parsing for both generation pipelines.
//!
//! Cohort replies are parsed in three stages: strict JSON extracted from the
//! reply, then a plain-text scan for "Cohort N:" header blocks, then a single
//! fallback cohort carrying the raw reply. Creative replies are JSON-only —
//! there is no meaningful plain-text shape for a single creative object.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Title given to the last-resort cohort that wraps an unparseable reply.
pub const FALLBACK_COHORT_TITLE: &str = "Unstructured recommendations";

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("reply contains no JSON object")]
    NoJson,

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedCampaign {
    pub micro_cohorts: Vec<GeneratedCohort>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedCohort {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub demographics: String,
    /// Requested from the model for reply-shape fidelity; not persisted.
    #[serde(default)]
    pub estimated_reach: Option<String>,
    #[serde(default)]
    pub recommended_channels: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedCreative {
    pub headline: String,
    pub description: String,
    pub cta: String,
    pub image_prompt: String,
}

/// Slices the outermost `{...}` from a reply, tolerating markdown fences and
/// surrounding prose the model was told not to produce but sometimes does.
fn extract_json(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

fn cohort_header_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?im)^[\s#*]*cohort\s+\d+\s*[:.\-]\s*(.*)$").expect("valid regex")
    })
}

fn labeled_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^[\s*\-]*(title|description|demographics)\s*:\s*(.*)$")
            .expect("valid regex")
    })
}

/// Parses a cohort-generation reply. Never fails: stage 3 wraps the raw text.
pub fn parse_cohort_reply(content: &str) -> GeneratedCampaign {
    // Stage 1: strict JSON
    if let Some(json) = extract_json(content) {
        if let Ok(parsed) = serde_json::from_str::<GeneratedCampaign>(json) {
            if !parsed.micro_cohorts.is_empty() {
                return parsed;
            }
        }
    }

    // Stage 2: plain-text "Cohort N:" header blocks
    let cohorts = parse_cohort_headers(content);
    if !cohorts.is_empty() {
        return GeneratedCampaign {
            micro_cohorts: cohorts,
        };
    }

    // Stage 3: single fallback cohort holding the raw reply
    GeneratedCampaign {
        micro_cohorts: vec![GeneratedCohort {
            title: FALLBACK_COHORT_TITLE.to_string(),
            description: content.trim().to_string(),
            demographics: String::new(),
            estimated_reach: None,
            recommended_channels: None,
        }],
    }
}

/// Rebuilds cohorts from "Cohort N: Title" header blocks. Within a block,
/// "Description:" and "Demographics:" labeled lines are honored; unlabeled
/// lines accumulate into the description.
fn parse_cohort_headers(content: &str) -> Vec<GeneratedCohort> {
    let header_re = cohort_header_re();

    let headers: Vec<_> = header_re.captures_iter(content).collect();
    if headers.is_empty() {
        return Vec::new();
    }

    let mut spans = Vec::with_capacity(headers.len());
    for (i, caps) in headers.iter().enumerate() {
        let whole = caps.get(0).expect("capture 0 always present");
        let body_start = whole.end();
        let body_end = headers
            .get(i + 1)
            .map(|next| next.get(0).expect("capture 0 always present").start())
            .unwrap_or(content.len());
        let title = caps
            .get(1)
            .map(|m| m.as_str().trim().trim_matches('*').trim().to_string())
            .unwrap_or_default();
        spans.push((title, &content[body_start..body_end]));
    }

    let labeled_re = labeled_line_re();
    let mut cohorts = Vec::with_capacity(spans.len());

    for (header_title, body) in spans {
        let mut title = header_title;
        let mut description_lines: Vec<&str> = Vec::new();
        let mut demographics = String::new();

        for line in body.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            if let Some(caps) = labeled_re.captures(trimmed) {
                let value = caps.get(2).map_or("", |m| m.as_str()).trim();
                match caps.get(1).map_or("", |m| m.as_str()).to_lowercase().as_str() {
                    "title" => {
                        if title.is_empty() {
                            title = value.to_string();
                        }
                    }
                    "description" => description_lines.push(value),
                    "demographics" => demographics = value.to_string(),
                    _ => {}
                }
            } else if title.is_empty() {
                // Header carried no inline title; first free line becomes it.
                title = trimmed.trim_matches('*').trim().to_string();
            } else {
                description_lines.push(trimmed);
            }
        }

        if title.is_empty() && description_lines.is_empty() {
            continue;
        }
        if title.is_empty() {
            title = format!("Cohort {}", cohorts.len() + 1);
        }

        cohorts.push(GeneratedCohort {
            title,
            description: description_lines.join(" "),
            demographics,
            estimated_reach: None,
            recommended_channels: None,
        });
    }

    cohorts
}

/// Parses a creative-generation reply. Unlike cohorts, a parse failure here
/// is an error surfaced to the caller.
pub fn parse_creative_reply(content: &str) -> Result<GeneratedCreative, ParseError> {
    let json = extract_json(content).ok_or(ParseError::NoJson)?;
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const COHORT_JSON: &str = r#"{
        "microCohorts": [
            {
                "title": "Adventure-Seeking Professionals",
                "description": "Young professionals who prioritize unique travel experiences",
                "demographics": "25-34 years, Urban, Income $75k+",
                "estimatedReach": "1.2M",
                "recommendedChannels": ["social", "video"]
            },
            {
                "title": "Family Memory Makers",
                "description": "Parents looking to create lasting family memories",
                "demographics": "30-45 years, Suburban, Parents of young children"
            }
        ]
    }"#;

    #[test]
    fn json_reply_round_trips_cohort_count_and_fields() {
        let parsed = parse_cohort_reply(COHORT_JSON);
        assert_eq!(parsed.micro_cohorts.len(), 2);

        let first = &parsed.micro_cohorts[0];
        assert_eq!(first.title, "Adventure-Seeking Professionals");
        assert_eq!(first.demographics, "25-34 years, Urban, Income $75k+");
        assert_eq!(first.estimated_reach.as_deref(), Some("1.2M"));
        assert_eq!(
            first.recommended_channels.as_deref(),
            Some(&["social".to_string(), "video".to_string()][..])
        );

        let second = &parsed.micro_cohorts[1];
        assert_eq!(second.title, "Family Memory Makers");
        assert!(second.estimated_reach.is_none());
        assert!(second.recommended_channels.is_none());
    }

    #[test]
    fn json_survives_code_fences_and_prose() {
        let reply = format!("Here are your cohorts:\n```json\n{COHORT_JSON}\n```\nEnjoy!");
        let parsed = parse_cohort_reply(&reply);
        assert_eq!(parsed.micro_cohorts.len(), 2);
        assert_eq!(
            parsed.micro_cohorts[0].title,
            "Adventure-Seeking Professionals"
        );
    }

    #[test]
    fn header_fallback_extracts_one_cohort_per_block() {
        let reply = "\
Here are my recommendations.

Cohort 1: Adventure-Seeking Professionals
Description: Young professionals who want unique experiences.
Demographics: 25-34 years, Urban, Income $75k+

Cohort 2: Family Memory Makers
Description: Parents planning memorable trips.
They respond to value messaging.
Demographics: 30-45 years, Suburban
";
        let parsed = parse_cohort_reply(reply);
        assert_eq!(parsed.micro_cohorts.len(), 2);

        let first = &parsed.micro_cohorts[0];
        assert_eq!(first.title, "Adventure-Seeking Professionals");
        assert_eq!(
            first.description,
            "Young professionals who want unique experiences."
        );
        assert_eq!(first.demographics, "25-34 years, Urban, Income $75k+");

        let second = &parsed.micro_cohorts[1];
        assert_eq!(second.title, "Family Memory Makers");
        assert!(second.description.contains("value messaging"));
        assert_eq!(second.demographics, "30-45 years, Suburban");
    }

    #[test]
    fn header_fallback_handles_markdown_headers_without_inline_title() {
        let reply = "\
## Cohort 1:
Luxury Relaxation Seekers
Affluent individuals seeking premium experiences.

## Cohort 2:
Budget Explorers
Students and first-jobbers chasing deals.
";
        let parsed = parse_cohort_reply(reply);
        assert_eq!(parsed.micro_cohorts.len(), 2);
        assert_eq!(parsed.micro_cohorts[0].title, "Luxury Relaxation Seekers");
        assert_eq!(parsed.micro_cohorts[1].title, "Budget Explorers");
    }

    #[test]
    fn unparseable_reply_becomes_single_fallback_cohort() {
        let reply = "I could not produce cohorts for this brief, sorry.";
        let parsed = parse_cohort_reply(reply);
        assert_eq!(parsed.micro_cohorts.len(), 1);
        assert_eq!(parsed.micro_cohorts[0].title, FALLBACK_COHORT_TITLE);
        assert_eq!(parsed.micro_cohorts[0].description, reply);
    }

    #[test]
    fn empty_json_cohort_list_falls_through_to_raw_fallback() {
        let reply = r#"{"microCohorts": []}"#;
        let parsed = parse_cohort_reply(reply);
        assert_eq!(parsed.micro_cohorts.len(), 1);
        assert_eq!(parsed.micro_cohorts[0].title, FALLBACK_COHORT_TITLE);
    }

    #[test]
    fn creative_reply_parses_all_fields() {
        let reply = r#"{
            "headline": "Escape the Ordinary",
            "description": "Discover breathtaking destinations with our exclusive monsoon packages.",
            "cta": "Book Your Adventure",
            "imagePrompt": "A young professional on a mountain peak during monsoon, misty valley below"
        }"#;
        let creative = parse_creative_reply(reply).expect("should parse");
        assert_eq!(creative.headline, "Escape the Ordinary");
        assert_eq!(creative.cta, "Book Your Adventure");
        assert!(creative.image_prompt.contains("mountain peak"));
    }

    #[test]
    fn creative_reply_in_fences_parses() {
        let reply = "```json\n{\"headline\":\"H\",\"description\":\"D\",\"cta\":\"C\",\"imagePrompt\":\"P\"}\n```";
        let creative = parse_creative_reply(reply).expect("should parse");
        assert_eq!(creative.headline, "H");
    }

    #[test]
    fn creative_reply_without_json_is_an_error() {
        let err = parse_creative_reply("no structured output here").unwrap_err();
        assert!(matches!(err, ParseError::NoJson));
    }

    #[test]
    fn creative_reply_missing_required_field_is_an_error() {
        let reply = r#"{"headline": "H", "description": "D"}"#;
        assert!(parse_creative_reply(reply).is_err());
    }
}
