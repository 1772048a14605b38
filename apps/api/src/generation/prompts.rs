// All LLM prompt constants for the generation module.

use crate::models::brand::BrandGuidelinesRow;

/// System prompt for cohort generation — enforces JSON-only output.
pub const COHORT_SYSTEM: &str =
    "You generate structured marketing recommendations in JSON format only.";

/// System prompt for creative generation — enforces JSON-only output.
pub const CREATIVE_SYSTEM: &str =
    "You generate structured marketing creative recommendations in JSON format only.";

/// Cohort generation prompt template.
/// Replace: {brand_info}, {brief}, {budget}, {cohort_count}
pub const COHORT_PROMPT_TEMPLATE: &str = r#"You are a marketing strategist veteran working with the aviation sector for the last 25 years. You follow David Ogilvy advertising principles.

Based on the following brand guidelines and campaign brief, generate intelligent campaign recommendations.

---
{brand_info}

Campaign Brief:
{brief}

Budget: {budget}

---

Your task:

1. Generate {cohort_count} micro-cohorts likely to perform well for this campaign.
For each cohort, provide:
- Title
- Description (who they are and what motivates them)
- Demographic info (age, location, traits)
- Estimated reach (use placeholder if unknown)
- Recommended marketing channels

Output the results as JSON with the following structure:
{
  "microCohorts": [
    {
      "title": "Cohort title",
      "description": "Detailed description",
      "demographics": "Age, location, traits list",
      "estimatedReach": "Reach estimate",
      "recommendedChannels": ["social", "email"]
    }
  ]
}

Only return the JSON result, no other text. Ensure the JSON is valid and properly formatted."#;

/// Creative generation prompt template.
/// Replace: {brand_info}, {brief}, {cohort_title}, {cohort_description},
///          {cohort_demographics}
pub const CREATIVE_PROMPT_TEMPLATE: &str = r#"You are a marketing creative director with expertise in the aviation industry. Based on the following campaign and cohort information, generate creative recommendations.

---
{brand_info}

Campaign Brief:
{brief}

Target Cohort:
- Name: {cohort_title}
- Description: {cohort_description}
- Demographics: {cohort_demographics}

---

Your task:

Generate creative recommendation for this cohort including:
- Headline (catchy, concise headline for the ad)
- Description (compelling ad copy, 1-2 sentences)
- Call-to-Action (brief action text like "Book Now" or "Learn More")
- Image Prompt: Create a detailed visual prompt for AI image generation that represents this cohort and campaign.

For the image prompt, include:
- The setting/environment
- The main subject(s)
- Camera angle
- Lighting and time of day
- Style/mood
- Branding details
- Negative space guidance

Output as JSON with this structure:
{
  "headline": "Headline text",
  "description": "Description text",
  "cta": "Call to action text",
  "imagePrompt": "Detailed image generation prompt"
}

Only return the JSON result, no other text. Ensure the JSON is valid and properly formatted."#;

/// Substituted when a user has not filled in brand guidelines.
pub const DEFAULT_BRAND_TONE: &str = "Professional and friendly";
pub const DEFAULT_PRIMARY_COLOR: &str = "#6366F1";
pub const DEFAULT_SECONDARY_COLOR: &str = "#0EA5E9";

/// Formats the brand guidelines block embedded in both generation prompts.
/// When the user has no guidelines row, fixed defaults are substituted.
pub fn format_brand_info(brand: Option<&BrandGuidelinesRow>) -> String {
    match brand {
        Some(b) => {
            let voice_line = match b.brand_voice.as_deref() {
                Some(voice) if !voice.trim().is_empty() => format!("\n- Brand Voice: {voice}"),
                _ => String::new(),
            };
            format!(
                "Brand Guidelines:\n\
                 - Brand Name: {}\n\
                 - Tone: {}{}\n\
                 - Brand Colors: {}, {}\n\
                 - Tagline: {}\n\
                 - Do Not Use Phrases: {}",
                b.brand_name,
                b.brand_tone,
                voice_line,
                b.primary_color.as_deref().unwrap_or(DEFAULT_PRIMARY_COLOR),
                b.secondary_color
                    .as_deref()
                    .unwrap_or(DEFAULT_SECONDARY_COLOR),
                b.sample_tagline.as_deref().unwrap_or("None provided"),
                b.do_not_use_phrases.as_deref().unwrap_or("None specified"),
            )
        }
        None => format!(
            "Brand Guidelines:\n\
             - Brand Name: Unknown\n\
             - Tone: {DEFAULT_BRAND_TONE}\n\
             - Brand Colors: {DEFAULT_PRIMARY_COLOR}, {DEFAULT_SECONDARY_COLOR}\n\
             - Tagline: None provided\n\
             - Do Not Use Phrases: None specified"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn sample_brand() -> BrandGuidelinesRow {
        BrandGuidelinesRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            brand_name: "AeroNova".to_string(),
            brand_tone: "Bold and confident".to_string(),
            brand_voice: Some("First-person plural, short sentences".to_string()),
            primary_color: Some("#1D4ED8".to_string()),
            secondary_color: Some("#F59E0B".to_string()),
            sample_tagline: Some("Fly beyond.".to_string()),
            do_not_use_phrases: Some("cheap, budget".to_string()),
            logo_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn brand_info_embeds_all_fields() {
        let brand = sample_brand();
        let info = format_brand_info(Some(&brand));
        assert!(info.contains("Brand Name: AeroNova"));
        assert!(info.contains("Tone: Bold and confident"));
        assert!(info.contains("Brand Voice: First-person plural, short sentences"));
        assert!(info.contains("Brand Colors: #1D4ED8, #F59E0B"));
        assert!(info.contains("Tagline: Fly beyond."));
        assert!(info.contains("Do Not Use Phrases: cheap, budget"));
    }

    #[test]
    fn brand_info_defaults_when_guidelines_absent() {
        let info = format_brand_info(None);
        assert!(info.contains("Brand Name: Unknown"));
        assert!(info.contains("Tone: Professional and friendly"));
        assert!(info.contains("Brand Colors: #6366F1, #0EA5E9"));
        assert!(info.contains("Tagline: None provided"));
        assert!(info.contains("Do Not Use Phrases: None specified"));
    }

    #[test]
    fn brand_info_falls_back_per_missing_color() {
        let mut brand = sample_brand();
        brand.primary_color = None;
        brand.brand_voice = None;
        let info = format_brand_info(Some(&brand));
        assert!(info.contains("Brand Colors: #6366F1, #F59E0B"));
        assert!(!info.contains("Brand Voice:"));
    }

    #[test]
    fn cohort_template_placeholders_are_replaceable() {
        let prompt = COHORT_PROMPT_TEMPLATE
            .replace("{brand_info}", "Brand Guidelines: test")
            .replace("{brief}", "Promote monsoon travel packages")
            .replace("{budget}", "$5,000")
            .replace("{cohort_count}", "3");
        assert!(!prompt.contains("{brand_info}"));
        assert!(!prompt.contains("{brief}"));
        assert!(!prompt.contains("{budget}"));
        assert!(!prompt.contains("{cohort_count}"));
        assert!(prompt.contains("Promote monsoon travel packages"));
    }
}
