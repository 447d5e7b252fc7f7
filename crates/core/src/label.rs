//! Human-readable component labels.

use crate::catalog::ComponentKind;
use crate::constants::{ELLIPSIS, LABEL_TITLE_MAX_CHARS};
use crate::options::{ComponentDetails, ComponentOptions};

/// Synthesises the display label of a component.
///
/// The label is the kind's display name plus at most one suffix, title first:
/// - a non-empty `title` adds `": <title>"`, truncated to 20 characters with an ellipsis;
/// - otherwise countable kinds add a count (`" (3)"`, `" (4 members)"`, ...) and templates
///   add their template type name.
pub fn component_label(options: &ComponentOptions) -> String {
    let mut label = options.kind().display_name().to_string();

    if let Some(title) = options.title() {
        label.push_str(": ");
        label.push_str(&truncate(title, LABEL_TITLE_MAX_CHARS));
        return label;
    }

    match &options.details {
        ComponentDetails::Columns(layout) | ComponentDetails::Grid(layout) => {
            label.push_str(&format!(" ({})", layout.column_count));
        }
        ComponentDetails::Team(team) => {
            label.push_str(&count_suffix(team.team_members.len(), "member", "members"));
        }
        ComponentDetails::Timeline(timeline) => {
            label.push_str(&count_suffix(timeline.timeline_events.len(), "event", "events"));
        }
        ComponentDetails::Form(form) => {
            label.push_str(&count_suffix(form.form_fields.len(), "field", "fields"));
        }
        ComponentDetails::Template(template) => {
            label.push_str(": ");
            label.push_str(template.template_type.display_name());
        }
        ComponentDetails::Section
        | ComponentDetails::Card(_)
        | ComponentDetails::Testimonial(_)
        | ComponentDetails::Custom(_) => {}
    }

    label
}

/// Display name of a kind, the stem of every label.
pub fn component_type_name(kind: ComponentKind) -> &'static str {
    kind.display_name()
}

/// Keeps the first `max_chars` characters of `text`, appending an ellipsis if anything was cut.
///
/// Counts Unicode scalar values, never splitting a character.
pub fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => format!("{}{ELLIPSIS}", &text[..byte_index]),
        None => text.to_string(),
    }
}

fn count_suffix(count: usize, singular: &str, plural: &str) -> String {
    let noun = if count == 1 { singular } else { plural };
    format!(" ({count} {noun})")
}
