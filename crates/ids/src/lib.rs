//! Identifier allocation for the page builder.
//!
//! Two kinds of identifier are handed out during an authoring session:
//!
//! - **Component ids** name nodes of the template structure. They take the form
//!   `component-<hyphenated uuid v4>` and are globally unique, so they never collide with ids
//!   the editor assigns itself.
//! - **Block ids** name the sidebar blocks created for AI-generated fragments. They take the
//!   form `ai-block-<n>` with `n` counting from 1 within one session, which keeps them stable
//!   and readable in the editor's block manager.

mod service;

pub use service::{BlockIdGenerator, ComponentIdGenerator};
