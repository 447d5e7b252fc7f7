//! Pure half of the text-generation boundary.
//!
//! This module builds the final instruction sent to the model and cleans the text that comes
//! back. The HTTP call itself lives in the `pagewright-gemini` crate.

use crate::constants::{FIRST_GENERATION, GENERATION_PREAMBLE, GENERATION_RULES};
use crate::error::{CoreError, CoreResult};
use crate::styles::house_style;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

// SAFETY: the patterns below are constant and valid
static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```html|```").expect("code fence pattern is valid"));
static SINGLE_QUOTED_STYLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"style='([^']*)'").expect("style pattern is valid"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Whether the model creates a new fragment or rewrites the selected one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationAction {
    #[default]
    Create,
    #[serde(alias = "modify")]
    Update,
}

impl GenerationAction {
    pub fn as_str(self) -> &'static str {
        match self {
            GenerationAction::Create => "create",
            GenerationAction::Update => "update",
        }
    }
}

/// One request to the generative text service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub description: String,
    /// Serialised markup of the currently selected fragment, required for updates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub existing_template: Option<String>,
    #[serde(default)]
    pub action: GenerationAction,
}

impl GenerationRequest {
    /// Creates and validates a request.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidInput`] if the description is blank, or if `action` is
    /// [`GenerationAction::Update`] without existing markup.
    pub fn new(
        description: impl Into<String>,
        existing_template: Option<String>,
        action: GenerationAction,
    ) -> CoreResult<Self> {
        let request = Self {
            description: description.into(),
            existing_template,
            action,
        };
        request.validate()?;
        Ok(request)
    }

    /// Shorthand for a validated [`GenerationAction::Create`] request.
    pub fn create(description: impl Into<String>) -> CoreResult<Self> {
        Self::new(description, None, GenerationAction::Create)
    }

    /// Checks the request, for values that arrived through deserialisation.
    pub fn validate(&self) -> CoreResult<()> {
        if self.description.trim().is_empty() {
            return Err(CoreError::InvalidInput("description is required".into()));
        }
        if self.action == GenerationAction::Update && self.existing_markup().is_none() {
            return Err(CoreError::InvalidInput(
                "an update requires the existing template markup".into(),
            ));
        }
        Ok(())
    }

    /// The existing markup if present and not blank.
    pub fn existing_markup(&self) -> Option<&str> {
        self.existing_template
            .as_deref()
            .filter(|markup| !markup.trim().is_empty())
    }
}

/// Wraps a request in the full model instruction.
///
/// # Arguments
///
/// * `request` - The validated request.
/// * `history` - Descriptions of the previous successful generations, oldest first.
///
/// # Returns
///
/// The trimmed instruction: role preamble, the task, modification history, house style
/// tokens, output rules and the expected output shape.
pub fn build_generation_prompt(request: &GenerationRequest, history: &[String]) -> String {
    let task = match (request.action, request.existing_markup()) {
        (GenerationAction::Update, Some(existing)) => format!(
            "Modify this existing component according to these instructions: {}\nCurrent component: {}",
            request.description.trim(),
            existing
        ),
        _ => format!(
            "Create a web component for: {}",
            request.description.trim()
        ),
    };

    let history = if history.is_empty() {
        FIRST_GENERATION.to_string()
    } else {
        history.join(" -> ")
    };

    let rules: Vec<String> = GENERATION_RULES
        .iter()
        .enumerate()
        .map(|(i, rule)| format!("{}. {rule}", i + 1))
        .collect();

    format!(
        "{GENERATION_PREAMBLE}

{task}

Modification history: {history}

Styles to use: {styles}

Precise instructions:
{rules}

Expected format:
<div style=\"[appropriate styles]\">
  [content matching the description]
</div>",
        styles = house_style(),
        rules = rules.join("\n"),
    )
    .trim()
    .to_string()
}

/// Normalises raw model output into a single-line HTML fragment.
///
/// Code fences are removed, the first single-quoted `style` attribute is rewritten with
/// double quotes, whitespace runs collapse to one space, and anything before the first `<`
/// or after the last `>` is dropped.
///
/// # Errors
///
/// Returns [`CoreError::InvalidMarkup`] if the output contains no element.
pub fn clean_generated_markup(raw: &str) -> CoreResult<String> {
    let text = CODE_FENCE.replace_all(raw, "");
    let text = SINGLE_QUOTED_STYLE.replace(&text, "style=\"$1\"");
    let text = WHITESPACE.replace_all(&text, " ");
    let text = text.trim();

    match (text.find('<'), text.rfind('>')) {
        (Some(start), Some(end)) if start < end => Ok(text[start..=end].to_string()),
        _ => {
            tracing::warn!("generated output contains no HTML element");
            Err(CoreError::InvalidMarkup)
        }
    }
}

/// Editor sidebar label of a generated block: `AI: ` plus the start of the description.
pub fn block_label(description: &str) -> String {
    let prefix: String = description
        .chars()
        .take(crate::constants::BLOCK_LABEL_MAX_CHARS)
        .collect();
    format!("AI: {prefix}{}", crate::constants::ELLIPSIS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_description_is_rejected() {
        let err = GenerationRequest::create("   ").unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));
    }

    #[test]
    fn test_update_requires_existing_markup() {
        let err = GenerationRequest::new("Make it blue", None, GenerationAction::Update)
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));

        let err = GenerationRequest::new(
            "Make it blue",
            Some("  ".into()),
            GenerationAction::Update,
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));
    }

    #[test]
    fn test_action_accepts_modify_alias_and_defaults_to_create() {
        let request: GenerationRequest = serde_json::from_str(
            r#"{"description":"x","existingTemplate":"<p>a</p>","action":"modify"}"#,
        )
        .unwrap();
        assert_eq!(request.action, GenerationAction::Update);

        let request: GenerationRequest = serde_json::from_str(r#"{"description":"x"}"#).unwrap();
        assert_eq!(request.action, GenerationAction::Create);
    }

    #[test]
    fn test_create_prompt_has_all_parts() {
        let request = GenerationRequest::create("A pricing table").unwrap();
        let prompt = build_generation_prompt(&request, &[]);

        assert!(prompt.starts_with(GENERATION_PREAMBLE));
        assert!(prompt.contains("Create a web component for: A pricing table"));
        assert!(prompt.contains("Modification history: First generation"));
        assert!(prompt.contains("Styles to use: {"));
        assert!(prompt.contains("1. Generate only HTML with inline styles"));
        assert!(prompt.contains("6. Return only the HTML code"));
        assert!(prompt.ends_with("</div>"));
        assert!(!prompt.contains("Current component"));
    }

    #[test]
    fn test_update_prompt_embeds_current_markup_and_history() {
        let request = GenerationRequest::new(
            "Make it blue",
            Some("<div>Old</div>".into()),
            GenerationAction::Update,
        )
        .unwrap();
        let history = vec!["A hero".to_string(), "Add a button".to_string()];
        let prompt = build_generation_prompt(&request, &history);

        assert!(prompt.contains(
            "Modify this existing component according to these instructions: Make it blue\nCurrent component: <div>Old</div>"
        ));
        assert!(prompt.contains("Modification history: A hero -> Add a button"));
    }

    #[test]
    fn test_cleaning_strips_fences_and_collapses_whitespace() {
        let raw = "Here you go:\n```html\n<div style='color: red'>\n  <p>Hi</p>\n</div>\n```\nEnjoy";
        assert_eq!(
            clean_generated_markup(raw).unwrap(),
            "<div style=\"color: red\"> <p>Hi</p> </div>"
        );
    }

    #[test]
    fn test_cleaning_rewrites_only_the_first_single_quoted_style() {
        let raw = "<p style='a'>x</p><p style='b'>y</p>";
        assert_eq!(
            clean_generated_markup(raw).unwrap(),
            "<p style=\"a\">x</p><p style='b'>y</p>"
        );
    }

    #[test]
    fn test_cleaning_rejects_text_without_elements() {
        assert!(matches!(
            clean_generated_markup("Sorry, I cannot help with that."),
            Err(CoreError::InvalidMarkup)
        ));
        assert!(matches!(
            clean_generated_markup("> odd <"),
            Err(CoreError::InvalidMarkup)
        ));
    }

    #[test]
    fn test_block_label_keeps_twenty_characters() {
        assert_eq!(
            block_label("A hero section with a big call to action"),
            "AI: A hero section with ..."
        );
        assert_eq!(block_label("Footer"), "AI: Footer...");
    }
}
