//! Generation service: session bookkeeping around a [`TextGenerator`].

use crate::{GenerationResult, TextGenerator};
use chrono::{DateTime, Utc};
use pagewright_core::generation::{
    block_label, build_generation_prompt, clean_generated_markup, GenerationAction,
    GenerationRequest,
};
use pagewright_ids::BlockIdGenerator;
use serde::Serialize;

/// A cleaned fragment ready for the editor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedFragment {
    pub markup: String,
    /// Sidebar block id, `ai-block-<n>`.
    pub block_id: String,
    /// Sidebar block label, `AI: <start of description>...`.
    pub block_label: String,
    pub action: GenerationAction,
    pub description: String,
    pub generated_at: DateTime<Utc>,
}

/// Modification history and block numbering of one session.
///
/// Split from [`GenerationService`] so callers that share a session across tasks can build
/// the prompt and record the result under a lock while awaiting the model without one.
#[derive(Clone, Debug, Default)]
pub struct GenerationLog {
    history: Vec<String>,
    blocks: BlockIdGenerator,
}

impl GenerationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Descriptions of the successful generations so far, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Validates `request` and builds the full model instruction.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GenerationError::Core`] wrapping `InvalidInput` for an invalid request.
    pub fn prompt_for(&self, request: &GenerationRequest) -> GenerationResult<String> {
        request.validate()?;
        Ok(build_generation_prompt(request, &self.history))
    }

    /// Cleans the raw model output and records the generation.
    ///
    /// History and block numbering only advance when cleaning succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GenerationError::Core`] wrapping `InvalidMarkup` when the output holds
    /// no HTML element.
    pub fn record(
        &mut self,
        request: &GenerationRequest,
        raw_output: &str,
    ) -> GenerationResult<GeneratedFragment> {
        let markup = clean_generated_markup(raw_output)?;
        let description = request.description.trim().to_string();

        self.history.push(description.clone());
        let block_id = self.blocks.next_id();

        Ok(GeneratedFragment {
            markup,
            block_label: block_label(&description),
            block_id,
            action: request.action,
            description,
            generated_at: Utc::now(),
        })
    }
}

/// A text generator plus the session's [`GenerationLog`].
pub struct GenerationService<G> {
    generator: G,
    log: GenerationLog,
}

impl<G: TextGenerator> GenerationService<G> {
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            log: GenerationLog::new(),
        }
    }

    pub fn history(&self) -> &[String] {
        self.log.history()
    }

    /// Runs one generation end to end.
    ///
    /// # Arguments
    ///
    /// * `request` - What to create or how to modify the existing fragment.
    ///
    /// # Returns
    ///
    /// The cleaned fragment with its block id and label.
    ///
    /// # Errors
    ///
    /// Propagates request validation, transport, HTTP and markup-cleaning errors. Nothing is
    /// recorded in the history on error.
    pub async fn generate(
        &mut self,
        request: &GenerationRequest,
    ) -> GenerationResult<GeneratedFragment> {
        let prompt = self.log.prompt_for(request)?;
        let raw = self.generator.generate(&prompt).await?;
        let fragment = self.log.record(request, &raw)?;

        tracing::info!(
            "generated {} ({} chars) for '{}'",
            fragment.block_id,
            fragment.markup.len(),
            fragment.description
        );
        Ok(fragment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GenerationError;
    use async_trait::async_trait;
    use pagewright_core::CoreError;
    use std::sync::Mutex;

    /// Replays canned outputs and remembers every prompt it was given.
    struct ScriptedGenerator {
        outputs: Mutex<Vec<GenerationResult<String>>>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedGenerator {
        fn new(outputs: Vec<GenerationResult<String>>) -> Self {
            Self {
                outputs: Mutex::new(outputs.into_iter().rev().collect()),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn generate(&self, prompt: &str) -> GenerationResult<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.outputs
                .lock()
                .unwrap()
                .pop()
                .unwrap_or(Err(GenerationError::EmptyResponse))
        }
    }

    #[tokio::test]
    async fn test_generate_cleans_output_and_numbers_blocks() {
        let generator = ScriptedGenerator::new(vec![
            Ok("```html\n<section>One</section>\n```".into()),
            Ok("<section>Two</section>".into()),
        ]);
        let mut service = GenerationService::new(generator);

        let request = GenerationRequest::create("A hero section with a big call to action").unwrap();
        let first = service.generate(&request).await.unwrap();
        assert_eq!(first.markup, "<section>One</section>");
        assert_eq!(first.block_id, "ai-block-1");
        assert_eq!(first.block_label, "AI: A hero section with ...");
        assert_eq!(first.action, GenerationAction::Create);

        let second = service
            .generate(&GenerationRequest::create("Footer").unwrap())
            .await
            .unwrap();
        assert_eq!(second.block_id, "ai-block-2");
        assert_eq!(
            service.history(),
            &["A hero section with a big call to action".to_string(), "Footer".to_string()]
        );
    }

    #[tokio::test]
    async fn test_history_feeds_into_later_prompts() {
        let generator = std::sync::Arc::new(ScriptedGenerator::new(vec![
            Ok("<p>a</p>".into()),
            Ok("<p>b</p>".into()),
        ]));
        let mut service = GenerationService::new(generator.clone());

        service
            .generate(&GenerationRequest::create("Hero").unwrap())
            .await
            .unwrap();
        service
            .generate(&GenerationRequest::create("Pricing").unwrap())
            .await
            .unwrap();

        let prompts = generator.prompts.lock().unwrap();
        assert!(prompts[0].contains("Modification history: First generation"));
        assert!(prompts[1].contains("Modification history: Hero"));
    }

    #[tokio::test]
    async fn test_failures_leave_history_untouched() {
        let generator = ScriptedGenerator::new(vec![
            Err(GenerationError::Http {
                status: 500,
                body: "boom".into(),
            }),
            Ok("no markup here".into()),
        ]);
        let mut service = GenerationService::new(generator);
        let request = GenerationRequest::create("Hero").unwrap();

        let err = service.generate(&request).await.unwrap_err();
        assert!(matches!(err, GenerationError::Http { status: 500, .. }));

        let err = service.generate(&request).await.unwrap_err();
        assert!(matches!(err, GenerationError::Core(CoreError::InvalidMarkup)));

        assert!(service.history().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_request_never_reaches_the_generator() {
        let generator = std::sync::Arc::new(ScriptedGenerator::new(vec![]));
        let mut service = GenerationService::new(generator.clone());
        let request = GenerationRequest {
            description: "".into(),
            existing_template: None,
            action: GenerationAction::Create,
        };

        let err = service.generate(&request).await.unwrap_err();
        assert!(matches!(err, GenerationError::Core(CoreError::InvalidInput(_))));
        assert!(generator.prompts.lock().unwrap().is_empty());
    }

    #[test]
    fn test_log_record_advances_only_on_success() {
        let mut log = GenerationLog::new();
        let request = GenerationRequest::create("Hero").unwrap();

        assert!(log.record(&request, "plain text").is_err());
        assert!(log.history().is_empty());

        let fragment = log.record(&request, "<div>ok</div>").unwrap();
        assert_eq!(fragment.block_id, "ai-block-1");
        assert_eq!(log.history(), &["Hero".to_string()]);
    }
}
