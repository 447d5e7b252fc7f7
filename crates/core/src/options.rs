//! Component options: the configuration payload collected by the UI for one component.
//!
//! The wire form is a flat camelCase object with a `type` discriminator, e.g.
//!
//! ```yaml
//! type: team
//! title: Our people
//! hasShadow: false
//! teamMembers:
//!   - { name: Ada, role: CTO }
//! placement: { targetId: component-1, type: after }
//! ```
//!
//! In Rust the kind-specific fields live in [`ComponentDetails`], a tagged union with one
//! variant per [`ComponentKind`], so prompt assembly can match exhaustively instead of
//! probing optional fields. Shared style, content, placement and technical fields sit next
//! to it in [`ComponentOptions`].
//!
//! Documents can be read from YAML or JSON. Schema errors carry the path of the failing
//! field (via `serde_path_to_error`).

use crate::catalog::{ComponentKind, TemplateStyle, TemplateType};
use crate::constants::DEFAULT_BREAKPOINTS;
use crate::error::{CoreError, CoreResult};
use pagewright_types::ComponentId;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

// ============================================================================
// Options
// ============================================================================

/// Full configuration of a component as submitted by the UI.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentOptions {
    /// Kind-specific fields, tagged by `type`.
    #[serde(flatten)]
    pub details: ComponentDetails,

    #[serde(flatten)]
    pub style: StyleOptions,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Where the new component goes relative to an existing one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placement: Option<Placement>,

    #[serde(flatten)]
    pub technical: TechnicalOptions,
}

impl ComponentOptions {
    /// Options for `details` with every shared field at its default.
    pub fn new(details: ComponentDetails) -> Self {
        Self {
            details,
            style: StyleOptions::default(),
            title: None,
            description: None,
            placement: None,
            technical: TechnicalOptions::default(),
        }
    }

    pub fn kind(&self) -> ComponentKind {
        self.details.kind()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = Some(placement);
        self
    }

    /// The title, if set and non-empty.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.is_empty())
    }

    /// The description, if set and non-empty.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.is_empty())
    }
}

/// Kind-specific options, one variant per [`ComponentKind`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ComponentDetails {
    Section,
    Columns(ColumnLayout),
    Grid(ColumnLayout),
    Card(CardOptions),
    Team(TeamOptions),
    Timeline(TimelineOptions),
    Testimonial(TestimonialOptions),
    Form(FormOptions),
    Template(TemplateOptions),
    Custom(CustomOptions),
}

impl ComponentDetails {
    pub fn kind(&self) -> ComponentKind {
        match self {
            ComponentDetails::Section => ComponentKind::Section,
            ComponentDetails::Columns(_) => ComponentKind::Columns,
            ComponentDetails::Grid(_) => ComponentKind::Grid,
            ComponentDetails::Card(_) => ComponentKind::Card,
            ComponentDetails::Team(_) => ComponentKind::Team,
            ComponentDetails::Timeline(_) => ComponentKind::Timeline,
            ComponentDetails::Testimonial(_) => ComponentKind::Testimonial,
            ComponentDetails::Form(_) => ComponentKind::Form,
            ComponentDetails::Template(_) => ComponentKind::Template,
            ComponentDetails::Custom(_) => ComponentKind::Custom,
        }
    }
}

// ----------------------------------------------------------------------------
// Shared option groups
// ----------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    Primary,
    Secondary,
    Accent,
    Neutral,
    Brand,
}

impl ColorScheme {
    pub fn as_str(self) -> &'static str {
        match self {
            ColorScheme::Primary => "primary",
            ColorScheme::Secondary => "secondary",
            ColorScheme::Accent => "accent",
            ColorScheme::Neutral => "neutral",
            ColorScheme::Brand => "brand",
        }
    }
}

/// Visual flags shared by every component.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StyleOptions {
    /// `None` renders as the "standard" scheme.
    pub color_scheme: Option<ColorScheme>,
    pub has_background: bool,
    pub has_border: bool,
    pub has_shadow: bool,
    pub rounded: bool,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            color_scheme: Some(ColorScheme::Primary),
            has_background: true,
            has_border: false,
            has_shadow: true,
            rounded: true,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResponsiveStrategy {
    #[default]
    MobileFirst,
    DesktopFirst,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessibilityLevel {
    #[serde(rename = "A")]
    A,
    #[default]
    #[serde(rename = "AA")]
    Aa,
    #[serde(rename = "AAA")]
    Aaa,
}

impl AccessibilityLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            AccessibilityLevel::A => "A",
            AccessibilityLevel::Aa => "AA",
            AccessibilityLevel::Aaa => "AAA",
        }
    }
}

/// Responsiveness, accessibility and performance settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TechnicalOptions {
    pub responsive_strategy: ResponsiveStrategy,
    pub template_breakpoints: Vec<String>,
    pub accessibility_level: AccessibilityLevel,
    pub performance_optimizations: bool,
}

impl Default for TechnicalOptions {
    fn default() -> Self {
        Self {
            responsive_strategy: ResponsiveStrategy::MobileFirst,
            template_breakpoints: DEFAULT_BREAKPOINTS.iter().map(|b| b.to_string()).collect(),
            accessibility_level: AccessibilityLevel::Aa,
            performance_optimizations: true,
        }
    }
}

// ----------------------------------------------------------------------------
// Placement
// ----------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlacementKind {
    Before,
    After,
    Inside,
    Replace,
    #[default]
    AtEnd,
}

/// Placement descriptor: where a new component attaches relative to `target_id`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    /// An empty string on the wire means "no target".
    #[serde(
        default,
        deserialize_with = "empty_id_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub target_id: Option<ComponentId>,

    #[serde(rename = "type", default)]
    pub kind: PlacementKind,
}

impl Placement {
    pub fn at_end() -> Self {
        Self::default()
    }

    pub fn relative_to(target_id: ComponentId, kind: PlacementKind) -> Self {
        Self {
            target_id: Some(target_id),
            kind,
        }
    }
}

fn empty_id_as_none<'de, D>(deserializer: D) -> Result<Option<ComponentId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => ComponentId::new(&s)
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

// ----------------------------------------------------------------------------
// Kind-specific groups
// ----------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gap {
    Small,
    #[default]
    Medium,
    Large,
}

impl Gap {
    pub fn as_str(self) -> &'static str {
        match self {
            Gap::Small => "small",
            Gap::Medium => "medium",
            Gap::Large => "large",
        }
    }
}

/// Options of `columns` and `grid` components.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ColumnLayout {
    pub column_count: u8,
    pub gap: Gap,
    /// Text of each column (or grid item), by position. May be shorter than `column_count`.
    pub column_contents: Vec<String>,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            column_count: 3,
            gap: Gap::Medium,
            column_contents: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CardOptions {
    pub has_image: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub name: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TeamOptions {
    pub team_members: Vec<TeamMember>,
    pub has_image: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    pub date: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TimelineOptions {
    pub timeline_events: Vec<TimelineEvent>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TestimonialOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_quote: Option<String>,
    pub has_image: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormFieldType {
    #[default]
    Text,
    Email,
    Textarea,
    Select,
    Checkbox,
}

impl FormFieldType {
    pub fn as_str(self) -> &'static str {
        match self {
            FormFieldType::Text => "text",
            FormFieldType::Email => "email",
            FormFieldType::Textarea => "textarea",
            FormFieldType::Select => "select",
            FormFieldType::Checkbox => "checkbox",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub label: String,
    #[serde(rename = "type", default)]
    pub field_type: FormFieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub required: bool,
    /// Choices of a `select` field.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormOptions {
    pub form_fields: Vec<FormField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submit_button_text: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TemplateOptions {
    pub template_type: TemplateType,
    pub template_style: TemplateStyle,
    /// Palette id from [`crate::catalog::PALETTES`] or any free-form colour name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_color_scheme: Option<String>,
    /// Section ids from [`TemplateType::sections`], in page order.
    pub template_sections: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_prompt: Option<String>,
}

// ============================================================================
// Documents
// ============================================================================

/// One step of an insert plan: a component id and its options.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertStep {
    pub id: ComponentId,
    pub options: ComponentOptions,
}

/// Parse component options from YAML text.
///
/// # Errors
///
/// Returns [`CoreError::Schema`] with the path of the failing field when the YAML does not
/// match the options schema, or [`CoreError::InvalidYaml`] when it is not YAML at all.
pub fn parse_options_yaml(text: &str) -> CoreResult<ComponentOptions> {
    from_yaml(text)
}

/// Parse component options from JSON text.
///
/// # Errors
///
/// Same as [`parse_options_yaml`], with [`CoreError::InvalidJson`] for malformed JSON.
pub fn parse_options_json(text: &str) -> CoreResult<ComponentOptions> {
    from_json(text)
}

/// Load component options from a `.json`, `.yaml` or `.yml` file.
pub fn load_options(path: &Path) -> CoreResult<ComponentOptions> {
    load_document(path)
}

/// Load a list of [`InsertStep`]s from a `.json`, `.yaml` or `.yml` file.
pub fn load_insert_plan(path: &Path) -> CoreResult<Vec<InsertStep>> {
    load_document(path)
}

fn load_document<T: DeserializeOwned>(path: &Path) -> CoreResult<T> {
    let text = std::fs::read_to_string(path).map_err(CoreError::FileRead)?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        from_json(&text)
    } else {
        from_yaml(&text)
    }
}

fn from_yaml<T: DeserializeOwned>(text: &str) -> CoreResult<T> {
    // Parse to a value first so syntax errors and schema errors are reported separately.
    let value: serde_yaml::Value = serde_yaml::from_str(text).map_err(CoreError::InvalidYaml)?;
    serde_path_to_error::deserialize(value).map_err(|err| schema_error(err.path(), err.inner()))
}

fn from_json<T: DeserializeOwned>(text: &str) -> CoreResult<T> {
    let value: serde_json::Value = serde_json::from_str(text).map_err(CoreError::InvalidJson)?;
    serde_path_to_error::deserialize(value).map_err(|err| schema_error(err.path(), err.inner()))
}

fn schema_error(path: &serde_path_to_error::Path, source: &impl std::fmt::Display) -> CoreError {
    let path = path.to_string();
    let path = if path.is_empty() || path == "." {
        "<root>".to_string()
    } else {
        path
    };
    CoreError::Schema {
        path,
        message: source.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_the_authoring_panel() {
        let options = parse_options_json(r#"{"type":"section"}"#).unwrap();
        assert_eq!(options.kind(), ComponentKind::Section);
        assert_eq!(options.style, StyleOptions::default());
        assert_eq!(options.style.color_scheme, Some(ColorScheme::Primary));
        assert!(options.style.has_background);
        assert!(!options.style.has_border);
        assert_eq!(
            options.technical.template_breakpoints,
            vec!["sm", "md", "lg", "xl"]
        );
        assert_eq!(options.technical.accessibility_level, AccessibilityLevel::Aa);
        assert!(options.placement.is_none());
    }

    #[test]
    fn test_parses_flat_team_document() {
        let yaml = r#"
type: team
title: Our people
hasShadow: false
hasImage: true
teamMembers:
  - { name: Ada, role: CTO }
  - { name: Grace, role: Engineer, description: Compilers }
placement: { targetId: hero, type: after }
accessibilityLevel: AAA
"#;
        let options = parse_options_yaml(yaml).unwrap();
        assert_eq!(options.title(), Some("Our people"));
        assert!(!options.style.has_shadow);
        assert_eq!(options.technical.accessibility_level, AccessibilityLevel::Aaa);

        let placement = options.placement.as_ref().unwrap();
        assert_eq!(placement.target_id.as_ref().unwrap().as_str(), "hero");
        assert_eq!(placement.kind, PlacementKind::After);

        match &options.details {
            ComponentDetails::Team(team) => {
                assert!(team.has_image);
                assert_eq!(team.team_members.len(), 2);
                assert_eq!(team.team_members[1].description.as_deref(), Some("Compilers"));
            }
            other => panic!("expected team details, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_target_id_means_no_target() {
        let options =
            parse_options_json(r#"{"type":"card","placement":{"targetId":"","type":"inside"}}"#)
                .unwrap();
        let placement = options.placement.unwrap();
        assert!(placement.target_id.is_none());
        assert_eq!(placement.kind, PlacementKind::Inside);
    }

    #[test]
    fn test_placement_type_defaults_to_at_end() {
        let options = parse_options_json(r#"{"type":"card","placement":{}}"#).unwrap();
        assert_eq!(options.placement.unwrap().kind, PlacementKind::AtEnd);
    }

    #[test]
    fn test_unknown_type_is_a_schema_error() {
        let err = parse_options_json(r#"{"type":"carousel"}"#).unwrap_err();
        assert!(matches!(err, CoreError::Schema { .. }), "got {err:?}");
    }

    #[test]
    fn test_schema_error_reports_field_path() {
        let err = parse_options_json(r#"{"type":"section","placement":{"type":"beside"}}"#)
            .unwrap_err();
        match err {
            CoreError::Schema { path, .. } => assert!(path.contains("placement"), "path {path}"),
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_yaml_is_reported_as_yaml_error() {
        let err = parse_options_yaml("type: [unclosed").unwrap_err();
        assert!(matches!(err, CoreError::InvalidYaml(_)));
    }

    #[test]
    fn test_options_survive_serialisation() {
        let options = ComponentOptions::new(ComponentDetails::Form(FormOptions {
            form_fields: vec![FormField {
                label: "Email".into(),
                field_type: FormFieldType::Email,
                placeholder: Some("you@example.com".into()),
                required: true,
                options: vec![],
            }],
            submit_button_text: Some("Send".into()),
        }))
        .with_title("Contact");

        let json = serde_json::to_string(&options).unwrap();
        assert!(json.contains(r#""type":"form""#));
        assert!(json.contains(r#""formFields""#));
        assert_eq!(parse_options_json(&json).unwrap(), options);
    }

    #[test]
    fn test_loads_insert_plan_from_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.yaml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "- id: A\n  options: {{ type: section }}\n- id: B\n  options: {{ type: card, placement: {{ targetId: A, type: inside }} }}"
        )
        .unwrap();

        let plan = load_insert_plan(&path).unwrap();
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[1].id.as_str(), "B");
        assert_eq!(plan[1].options.kind(), ComponentKind::Card);
    }

    #[test]
    fn test_loads_options_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("options.json");
        std::fs::write(&path, r#"{"type":"custom","customPrompt":"A pricing table"}"#).unwrap();

        let options = load_options(&path).unwrap();
        assert_eq!(
            options.details,
            ComponentDetails::Custom(CustomOptions {
                custom_prompt: Some("A pricing table".into())
            })
        );
    }

    #[test]
    fn test_missing_file_is_a_read_error() {
        let err = load_options(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(matches!(err, CoreError::FileRead(_)));
    }
}
