//! # Pagewright Core
//!
//! Core logic of the page builder's authoring assistant.
//!
//! This crate contains pure, synchronous data operations:
//! - The template structure: a forest of components with placement-aware insertion
//! - Label synthesis and prompt assembly for the generative text service
//! - The static component catalog (kinds, template types, sections, palettes)
//! - Request building and output cleaning for the generation boundary
//! - Loading component options from YAML/JSON documents
//!
//! **No I/O beyond reading options files**: HTTP calls to the model live in
//! `pagewright-gemini`, servers in `api-rest`, and command-line handling in `pagewright-cli`.

pub mod catalog;
pub mod constants;
pub mod error;
pub mod generation;
pub mod label;
pub mod options;
pub mod prompt;
pub mod session;
pub mod structure;
pub mod styles;

pub use catalog::{ComponentCategory, ComponentKind, TemplateStyle, TemplateType};
pub use error::{CoreError, CoreResult};
pub use generation::{
    block_label, build_generation_prompt, clean_generated_markup, GenerationAction,
    GenerationRequest,
};
pub use label::component_label;
pub use options::{
    load_insert_plan, load_options, parse_options_json, parse_options_yaml, ComponentDetails,
    ComponentOptions, InsertStep, Placement, PlacementKind,
};
pub use prompt::{generate_component_prompt, generate_structured_prompt};
pub use session::{AuthoringSession, Submission};
pub use structure::{
    Component, InsertOutcome, PlacementTarget, StructureViolation, TemplateStructure,
};

pub use pagewright_types::ComponentId;
