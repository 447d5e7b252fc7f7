//! Prompt assembly for component generation.
//!
//! Both functions are pure: the same options (and structure) always produce byte-identical
//! text.

use crate::catalog::{palette_by_id, section_description, TemplateType};
use crate::constants::{DEVELOPER_GUIDELINES, PRESERVE_EXISTING_CLAUSE, SEO_CLAUSE};
use crate::options::{
    ColumnLayout, ComponentDetails, ComponentOptions, FormField, FormOptions, ResponsiveStrategy,
    TeamOptions, TemplateOptions, TestimonialOptions, TimelineOptions,
};
use crate::structure::TemplateStructure;

/// Builds the generation instruction for a single component.
///
/// The text is assembled in a fixed order: base clause (category and type), style clause,
/// kind-specific layout and content clauses, the free-form description, and a closing
/// technical specifications block that is always present.
///
/// # Arguments
///
/// * `options` - The component configuration. The kind is taken from `options.details`.
///
/// # Returns
///
/// The trimmed prompt text.
pub fn generate_component_prompt(options: &ComponentOptions) -> String {
    let kind = options.kind();
    let mut head = format!(
        "Generate a {} component of type {} {}",
        kind.category().display_name().to_lowercase(),
        kind.display_name(),
        style_clause(options)
    );

    let layout = layout_clause(&options.details);
    if !layout.is_empty() {
        head.push(' ');
        head.push_str(&layout);
    }
    if let Some(title) = options.title() {
        head.push_str(&format!(", titled \"{title}\""));
    }
    head.push_str(&content_clause(&options.details));
    if let Some(description) = options.description() {
        head.push_str(&format!(
            "\n\nAdditional specific instructions: \"{description}\""
        ));
    }

    format!("{}\n\n{}", head.trim(), technical_block(options))
        .trim()
        .to_string()
}

/// Builds the full instruction for inserting a component into `structure`.
///
/// The component prompt is followed by the placement clause (when the placement resolves to
/// anything), a reminder to preserve existing elements (when the structure is not empty) and
/// the developer guidelines.
///
/// # Arguments
///
/// * `structure` - The document the component will be inserted into, before insertion.
/// * `options` - The component configuration, including its placement.
pub fn generate_structured_prompt(
    structure: &TemplateStructure,
    options: &ComponentOptions,
) -> String {
    let mut prompt = generate_component_prompt(options);

    let placement = structure.describe_placement(options.placement.as_ref());
    if !placement.is_empty() {
        prompt.push_str(", ");
        prompt.push_str(&placement);
    }
    if !structure.is_empty() {
        prompt.push(' ');
        prompt.push_str(PRESERVE_EXISTING_CLAUSE);
    }

    format!("{prompt}\n\n{DEVELOPER_GUIDELINES}").trim().to_string()
}

fn style_clause(options: &ComponentOptions) -> String {
    let style = &options.style;
    let scheme = style
        .color_scheme
        .map(|scheme| scheme.as_str())
        .unwrap_or("standard");

    let mut clause = format!("with {scheme} style");
    if style.has_background {
        clause.push_str(", with background");
    }
    if style.has_border {
        clause.push_str(", with border");
    }
    if style.has_shadow {
        clause.push_str(", with shadow");
    }
    if style.rounded {
        clause.push_str(", rounded corners");
    }

    if let ComponentDetails::Template(template) = &options.details {
        clause.push_str(&format!(
            ", with a high-quality {} design",
            template.template_style.as_str()
        ));
        if let Some(scheme) = template
            .template_color_scheme
            .as_deref()
            .filter(|s| !s.is_empty())
        {
            clause.push_str(&format!(
                ", using a harmonious {} color palette with optimal contrast",
                palette_phrase(scheme)
            ));
        }
    }

    clause
}

fn palette_phrase(scheme: &str) -> String {
    match palette_by_id(scheme) {
        Some(palette) if !palette.primary.is_empty() => format!(
            "{} ({} / {})",
            palette.label.to_lowercase(),
            palette.primary,
            palette.secondary
        ),
        Some(palette) => palette.label.to_lowercase(),
        None => scheme.to_string(),
    }
}

fn layout_clause(details: &ComponentDetails) -> String {
    match details {
        ComponentDetails::Section => "structured as a full-width page section".to_string(),
        ComponentDetails::Columns(layout) => format!(
            "laid out in {} columns with a {} gap",
            layout.column_count,
            layout.gap.as_str()
        ),
        ComponentDetails::Grid(layout) => format!(
            "laid out as a grid of {} columns with a {} gap",
            layout.column_count,
            layout.gap.as_str()
        ),
        ComponentDetails::Card(card) => with_image(
            "laid out as a self-contained card",
            card.has_image,
            "with an image",
        ),
        ComponentDetails::Team(team) => with_image(
            "presenting the team members in a responsive grid",
            team.has_image,
            "with a photo of each member",
        ),
        ComponentDetails::Timeline(_) => {
            "laid out as a vertical timeline in chronological order".to_string()
        }
        ComponentDetails::Testimonial(testimonial) => with_image(
            "laid out as a highlighted testimonial quote",
            testimonial.has_image,
            "with a photo of the person",
        ),
        ComponentDetails::Form(_) => {
            "laid out as an accessible form with labelled fields".to_string()
        }
        ComponentDetails::Template(template) => format!(
            "structured as a complete and professional {} site",
            template.template_type.as_str()
        ),
        ComponentDetails::Custom(_) => String::new(),
    }
}

fn with_image(base: &str, has_image: bool, image: &str) -> String {
    if has_image {
        format!("{base} {image}")
    } else {
        base.to_string()
    }
}

fn content_clause(details: &ComponentDetails) -> String {
    match details {
        ComponentDetails::Section | ComponentDetails::Card(_) => String::new(),
        ComponentDetails::Columns(layout) => column_contents(layout, "Column"),
        ComponentDetails::Grid(layout) => column_contents(layout, "Item"),
        ComponentDetails::Team(team) => team_content(team),
        ComponentDetails::Timeline(timeline) => timeline_content(timeline),
        ComponentDetails::Testimonial(testimonial) => testimonial_content(testimonial),
        ComponentDetails::Form(form) => form_content(form),
        ComponentDetails::Template(template) => template_content(template),
        ComponentDetails::Custom(custom) => custom
            .custom_prompt
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(|p| format!("\n\nCustom instructions: \"{p}\""))
            .unwrap_or_default(),
    }
}

fn column_contents(layout: &ColumnLayout, noun: &str) -> String {
    let lines: Vec<String> = layout
        .column_contents
        .iter()
        .enumerate()
        .filter(|(_, text)| !text.trim().is_empty())
        .map(|(i, text)| format!("- {noun} {}: {}", i + 1, text.trim()))
        .collect();

    if lines.is_empty() {
        String::new()
    } else {
        format!(", with the following content:\n{}", lines.join("\n"))
    }
}

fn team_content(team: &TeamOptions) -> String {
    if team.team_members.is_empty() {
        return String::new();
    }
    let lines: Vec<String> = team
        .team_members
        .iter()
        .map(|member| match member.description.as_deref().filter(|d| !d.is_empty()) {
            Some(description) => format!("- {} ({}): {}", member.name, member.role, description),
            None => format!("- {} ({})", member.name, member.role),
        })
        .collect();
    format!(", featuring the following members:\n{}", lines.join("\n"))
}

fn timeline_content(timeline: &TimelineOptions) -> String {
    if timeline.timeline_events.is_empty() {
        return String::new();
    }
    let lines: Vec<String> = timeline
        .timeline_events
        .iter()
        .map(|event| match event.description.as_deref().filter(|d| !d.is_empty()) {
            Some(description) => format!("- {}: {} ({})", event.date, event.title, description),
            None => format!("- {}: {}", event.date, event.title),
        })
        .collect();
    format!(", with the following events:\n{}", lines.join("\n"))
}

fn testimonial_content(testimonial: &TestimonialOptions) -> String {
    let non_empty = |s: &Option<String>| s.as_deref().filter(|s| !s.is_empty()).map(str::to_string);
    let mut clause = String::new();

    if let Some(quote) = non_empty(&testimonial.person_quote) {
        clause.push_str(&format!(", quoting \"{quote}\""));
    }
    match (non_empty(&testimonial.person_name), non_empty(&testimonial.person_role)) {
        (Some(name), Some(role)) => clause.push_str(&format!(" from {name}, {role}")),
        (Some(name), None) => clause.push_str(&format!(" from {name}")),
        (None, Some(role)) => clause.push_str(&format!(" from a {role}")),
        (None, None) => {}
    }
    clause
}

fn form_content(form: &FormOptions) -> String {
    let mut clause = String::new();
    if !form.form_fields.is_empty() {
        let lines: Vec<String> = form.form_fields.iter().map(form_field_line).collect();
        clause.push_str(&format!(", with the following fields:\n{}", lines.join("\n")));
    }
    if let Some(text) = form.submit_button_text.as_deref().filter(|t| !t.is_empty()) {
        clause.push_str(&format!("\nSubmit button: \"{text}\""));
    }
    clause
}

fn form_field_line(field: &FormField) -> String {
    let mut traits = vec![field.field_type.as_str().to_string()];
    if field.required {
        traits.push("required".to_string());
    }
    if let Some(placeholder) = field.placeholder.as_deref().filter(|p| !p.is_empty()) {
        traits.push(format!("placeholder \"{placeholder}\""));
    }
    if !field.options.is_empty() {
        traits.push(format!("options: {}", field.options.join(", ")));
    }
    format!("- {} ({})", field.label, traits.join(", "))
}

fn template_content(template: &TemplateOptions) -> String {
    let mut clause = String::from(
        ", integrating the following elements with visual consistency and a unified tone:\n",
    );

    if template.template_sections.is_empty() {
        let outline: Vec<String> = template
            .template_type
            .default_outline()
            .iter()
            .map(|line| format!("- {line}"))
            .collect();
        clause.push_str(&outline.join("\n"));
    } else {
        clause.push_str(&section_lines(template.template_type, &template.template_sections));
    }
    clause
}

fn section_lines(template_type: TemplateType, sections: &[String]) -> String {
    // Positions count every requested section, including unknown ids that are skipped.
    sections
        .iter()
        .enumerate()
        .filter_map(|(i, id)| {
            template_type.section(id).map(|section| {
                format!(
                    "- Section {}: {} ({})",
                    i + 1,
                    section.label,
                    section_description(template_type, id)
                )
            })
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn technical_block(options: &ComponentOptions) -> String {
    let technical = &options.technical;

    let mut responsive = match technical.responsive_strategy {
        ResponsiveStrategy::MobileFirst => {
            "using a mobile-first approach with progressive media queries".to_string()
        }
        ResponsiveStrategy::DesktopFirst => {
            "adapted to every screen size with specific breakpoints".to_string()
        }
    };
    if technical.template_breakpoints.is_empty() {
        responsive.push_str(" at standard breakpoints");
    } else {
        responsive.push_str(&format!(
            " for breakpoints: {}",
            technical.template_breakpoints.join(", ")
        ));
    }

    let performance = if technical.performance_optimizations {
        "with performance optimizations (lazy loading, minified CSS/JS, optimized images)"
    } else {
        "no specific optimizations"
    };

    format!(
        "TECHNICAL SPECIFICATIONS:
- Responsive: {responsive}
- Accessibility: compliant with WCAG {} accessibility standards
- Performance: {performance}
- SEO: {SEO_CLAUSE}
- Compatible with all modern browsers",
        technical.accessibility_level.as_str()
    )
}
