//! Prompt construction and the output-shape contract sent to the model.
//!
//! Pure logic: no I/O. The pipeline combines these pieces into a
//! [`crate::completion::CompletionRequest`].

use serde_json::{Value, json};

use crate::activity::{ActivityRequest, Category};

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Number of activities in a complete plan.
pub const PLAN_SIZE: usize = 9;

/// Number of `Sensory Play` activities in a complete plan.
pub const SENSORY_COUNT: usize = 5;

/// Persona the model is asked to adopt.
pub const SYSTEM_INSTRUCTION: &str = "You are a warm, helpful, and expert parenting consultant. \
You specialize in child development and Montessori-inspired home activities. Always prioritize safety.";

/// Line used when the caller did not say what materials are on hand.
pub const DEFAULT_MATERIALS_LINE: &str = "- Materials: Common household items only";

// ---------------------------------------------------------------------------
// Prompt
// ---------------------------------------------------------------------------

/// Build the user prompt for a plan request.
pub fn build_prompt(request: &ActivityRequest) -> String {
    let mut profile = format!("- Age Group: {}\n", request.age_group);
    if let Some(interests) = &request.child_interests {
        profile.push_str(&format!("- Interests/Themes: {interests}\n"));
    }
    match &request.materials_available {
        Some(materials) => {
            profile.push_str(&format!("- Available Materials at Home: {materials}\n"))
        }
        None => {
            profile.push_str(DEFAULT_MATERIALS_LINE);
            profile.push('\n');
        }
    }

    let developmental: String = Category::DEVELOPMENTAL
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{}. {c}\n", i + 1))
        .collect();

    format!(
        "I need a comprehensive activity plan for a child.

Child Profile:
{profile}
Please generate exactly {PLAN_SIZE} distinct activities organized into two main sections:

SECTION 1: Developmental Milestones ({dev_count} activities)
Generate one activity for each of these specific categories:
{developmental}
SECTION 2: Sensory Play Special ({SENSORY_COUNT} activities)
Generate {SENSORY_COUNT} distinct Sensory Play activities focusing on different senses (touch, sight, sound, etc.).
The category for all of these should be \"{sensory}\".

Requirements:
- Focus on low-prep, high-engagement ideas suitable for the home.
- Include specific safety tips relevant to the age group.
- Ensure the \"category\" field matches the specific skill (e.g., \"{fine}\") or \"{sensory}\".

Return the response as a JSON array of objects.
",
        dev_count = Category::DEVELOPMENTAL.len(),
        sensory = Category::SensoryPlay,
        fine = Category::FineMotor,
    )
}

// ---------------------------------------------------------------------------
// Output schema
// ---------------------------------------------------------------------------

/// Field names every generated item must carry.
pub const REQUIRED_FIELDS: [&str; 7] = [
    "title",
    "category",
    "description",
    "materials",
    "duration",
    "safetyTip",
    "tags",
];

/// Response schema in the model API's OpenAPI-subset dialect.
pub fn response_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "title": {
                    "type": "STRING",
                    "description": "A catchy, fun title for the activity"
                },
                "category": {
                    "type": "STRING",
                    "description": "The category: 'Fine Motor', 'Gross Motor', 'Language', 'Cognitive', or 'Sensory Play'"
                },
                "description": {
                    "type": "STRING",
                    "description": "Clear, step-by-step instructions (2-3 sentences max)"
                },
                "materials": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" },
                    "description": "List of items needed"
                },
                "duration": {
                    "type": "STRING",
                    "description": "Estimated time (e.g., '15-20 mins')"
                },
                "safetyTip": {
                    "type": "STRING",
                    "description": "Crucial safety warning or supervision advice"
                },
                "tags": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" },
                    "description": "2-3 keywords describing the activity type (e.g., 'Messy', 'Quiet', 'Outdoor')"
                }
            },
            "required": REQUIRED_FIELDS
        }
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
