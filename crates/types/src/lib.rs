//! Validated identifiers shared by every Pagewright crate.
//!
//! [`ComponentId`] is the opaque identifier of a template component.

/// Errors that can occur when validating a component id.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextError {
    /// The input was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,

    /// The input contained characters that are not allowed in a component id
    #[error("Invalid component id '{0}': whitespace and control characters are not allowed")]
    InvalidId(String),
}

/// Opaque identifier of a template component.
///
/// Ids are assigned by the caller (usually the editor, or
/// `pagewright_ids::ComponentIdGenerator`) and are never reused within a session. The only
/// structural guarantee is that the id is non-empty and contains no whitespace or control
/// characters, so it can be embedded in prompts, URLs and outlines unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(String);

impl ComponentId {
    /// Validates and wraps a component id.
    ///
    /// Leading and trailing whitespace is trimmed before validation.
    ///
    /// # Errors
    ///
    /// - [`TextError::Empty`] if nothing remains after trimming.
    /// - [`TextError::InvalidId`] if the id contains inner whitespace or control characters.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        if trimmed
            .chars()
            .any(|c| c.is_whitespace() || c.is_control())
        {
            return Err(TextError::InvalidId(trimmed.to_owned()));
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ComponentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ComponentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for ComponentId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for ComponentId {
    type Err = TextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComponentId::new(s)
    }
}

impl serde::Serialize for ComponentId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for ComponentId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ComponentId::new(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_id_accepts_editor_style_ids() {
        let id = ComponentId::new("component-550e8400-e29b-41d4-a716-446655440000").unwrap();
        assert_eq!(id.to_string(), "component-550e8400-e29b-41d4-a716-446655440000");
    }

    #[test]
    fn test_component_id_rejects_inner_whitespace() {
        let err = ComponentId::new("hero section").unwrap_err();
        assert_eq!(err, TextError::InvalidId("hero section".into()));
    }

    #[test]
    fn test_component_id_rejects_empty() {
        assert_eq!(ComponentId::new("   ").unwrap_err(), TextError::Empty);
    }

    #[test]
    fn test_component_id_deserialize_validates() {
        let ok: ComponentId = serde_json::from_str("\"A\"").unwrap();
        assert_eq!(ok.as_str(), "A");
        assert!(serde_json::from_str::<ComponentId>("\"\"").is_err());
    }

    #[test]
    fn test_component_ids_order_lexically() {
        let mut ids = vec![ComponentId::new("b").unwrap(), ComponentId::new("a").unwrap()];
        ids.sort();
        assert_eq!(ids[0].as_str(), "a");
    }
}
