//! Request composition.
//!
//! Pure construction: no I/O, no validation of the letter or theme beyond
//! emptiness.

use minijinja::{Environment, context};
use serde_json::{Value, json};

use namesmith_core::generation::{GenerationError, GenerationRequest};
use namesmith_core::name::Gender;
use namesmith_core::preference::PreferenceState;

/// Instruction template. Each optional clause disappears when its
/// preference is at the default.
const INSTRUCTION_TEMPLATE: &str = "Generate {{ count }} unique and meaningful {{ tradition }} names\
{% if gender %} for a {{ gender }}{% endif %}\
{% if letter %}, starting with the letter: {{ letter }}{% endif %}\
{% if theme %}, related to the theme or meaning: {{ theme }}{% endif %}. \
For each name give the name in its original script, a Latin transliteration, \
its meaning, its linguistic origin, its gender, and any notable cultural or \
historical significance.";

/// Returns the response schema for an array of name records.
///
/// Uses the OpenAPI subset understood by Gemini's `responseSchema`.
pub fn name_list_schema() -> Value {
    let genders: Vec<String> = Gender::ALL.iter().map(|g| g.to_string()).collect();

    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "script": {
                    "type": "STRING",
                    "description": "The name written in its original script"
                },
                "transliteration": {
                    "type": "STRING",
                    "description": "Latin-script rendering of the name"
                },
                "meaning": { "type": "STRING" },
                "origin": {
                    "type": "STRING",
                    "description": "Linguistic family or region of origin"
                },
                "gender": { "type": "STRING", "enum": genders },
                "significance": { "type": "STRING" }
            },
            "required": ["script", "transliteration", "meaning", "origin", "gender"]
        }
    })
}

/// Builds generation requests for one naming tradition.
pub struct RequestComposer {
    tradition: String,
}

impl RequestComposer {
    pub fn new(tradition: impl Into<String>) -> Self {
        Self {
            tradition: tradition.into(),
        }
    }

    pub fn compose(&self, prefs: &PreferenceState) -> Result<GenerationRequest, GenerationError> {
        let count = prefs.batch_size().get();
        let gender = prefs.gender_filter().as_gender();
        let letter = prefs.starting_letter();
        let theme = prefs.theme().map(str::to_string);

        let env = Environment::new();
        let instruction = env
            .render_str(
                INSTRUCTION_TEMPLATE,
                context! {
                    count => count,
                    tradition => &self.tradition,
                    gender => gender.map(|g| g.to_string()),
                    letter => letter.map(String::from),
                    theme => &theme,
                },
            )
            .map_err(|e| GenerationError::Compose(e.to_string()))?;

        Ok(GenerationRequest {
            instruction,
            response_schema: name_list_schema(),
            count,
            gender,
            starting_letter: letter,
            theme,
        })
    }
}
