//! Internal implementation of the identifier generators.

use pagewright_types::ComponentId;
use uuid::Uuid;

/// Prefix of every generated component id.
const COMPONENT_ID_PREFIX: &str = "component-";

/// Prefix of every generated block id.
const BLOCK_ID_PREFIX: &str = "ai-block-";

/// Allocates fresh component ids of the form `component-<uuid v4>`.
///
/// The generator is stateless: uniqueness comes from the random UUID, so one generator can be
/// shared freely or recreated per request.
#[derive(Clone, Debug, Default)]
pub struct ComponentIdGenerator;

impl ComponentIdGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generates a new component id.
    ///
    /// # Returns
    ///
    /// A [`ComponentId`] such as `component-550e8400-e29b-41d4-a716-446655440000`.
    pub fn next_id(&self) -> ComponentId {
        let raw = format!("{COMPONENT_ID_PREFIX}{}", Uuid::new_v4().hyphenated());
        // SAFETY: a prefix followed by a hyphenated UUID has no whitespace or control characters
        ComponentId::new(raw).expect("generated component ids are always valid")
    }

    /// Returns true if `id` looks like an id produced by this generator.
    pub fn is_generated(id: &ComponentId) -> bool {
        id.as_str()
            .strip_prefix(COMPONENT_ID_PREFIX)
            .is_some_and(|rest| Uuid::parse_str(rest).is_ok())
    }
}

/// Allocates sequential block ids (`ai-block-1`, `ai-block-2`, ...).
///
/// Numbering is per session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BlockIdGenerator {
    counter: u64,
}

impl BlockIdGenerator {
    /// Creates a generator whose first id is `ai-block-1`.
    pub fn new() -> Self {
        Self { counter: 0 }
    }

    /// Allocates the next block id.
    pub fn next_id(&mut self) -> String {
        self.counter += 1;
        format!("{BLOCK_ID_PREFIX}{}", self.counter)
    }

    /// Number of ids handed out so far.
    pub fn issued(&self) -> u64 {
        self.counter
    }
}
