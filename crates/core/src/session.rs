//! Authoring session: one document plus the id allocator the UI uses when a component is
//! submitted.

use crate::options::{ComponentDetails, ComponentOptions};
use crate::prompt::generate_structured_prompt;
use crate::structure::{InsertOutcome, TemplateStructure};
use pagewright_ids::ComponentIdGenerator;
use pagewright_types::ComponentId;
use serde::Serialize;

/// Result of submitting a component.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: ComponentId,
    /// The instruction to hand to the generative text service.
    pub prompt: String,
    pub outcome: InsertOutcome,
}

#[derive(Clone, Debug, Default)]
pub struct AuthoringSession {
    structure: TemplateStructure,
    ids: ComponentIdGenerator,
}

impl AuthoringSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn structure(&self) -> &TemplateStructure {
        &self.structure
    }

    /// Registers a component under a caller-chosen id.
    pub fn insert(&mut self, id: ComponentId, options: ComponentOptions) -> InsertOutcome {
        self.structure.insert(id, options)
    }

    /// The prompt `options` would produce if submitted now.
    ///
    /// `custom` components with a non-empty custom prompt use it verbatim; everything else
    /// gets the structured prompt for the current structure.
    pub fn prompt_for(&self, options: &ComponentOptions) -> String {
        match &options.details {
            ComponentDetails::Custom(custom) => match custom
                .custom_prompt
                .as_deref()
                .map(str::trim)
                .filter(|p| !p.is_empty())
            {
                Some(prompt) => prompt.to_string(),
                None => generate_structured_prompt(&self.structure, options),
            },
            _ => generate_structured_prompt(&self.structure, options),
        }
    }

    /// Submits a component: allocates a fresh id, builds the prompt against the structure as
    /// it was before the insertion, then inserts.
    ///
    /// # Returns
    ///
    /// The new id, the prompt and the placement outcome.
    pub fn submit(&mut self, options: ComponentOptions) -> Submission {
        let id = self.ids.next_id();
        let prompt = self.prompt_for(&options);
        let outcome = self.structure.insert(id.clone(), options);
        tracing::debug!("submitted component {}: {:?}", id, outcome);

        Submission {
            id,
            prompt,
            outcome,
        }
    }

    pub fn reset(&mut self) {
        self.structure.reset();
    }
}
