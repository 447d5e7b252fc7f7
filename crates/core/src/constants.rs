//! Constants used throughout the Pagewright core crate.
//!
//! Fixed prompt fragments live here so label synthesis, prompt assembly and tests all agree
//! on the exact wording.

/// Maximum number of characters of a title kept in a component label.
pub const LABEL_TITLE_MAX_CHARS: usize = 20;

/// Maximum number of characters of a description kept in an editor block label.
pub const BLOCK_LABEL_MAX_CHARS: usize = 20;

/// Marker appended to truncated text.
pub const ELLIPSIS: &str = "...";

/// Breakpoints used when the caller does not provide any.
pub const DEFAULT_BREAKPOINTS: [&str; 4] = ["sm", "md", "lg", "xl"];

/// Placement clause for components appended to the end of the document.
pub const AT_END_CLAUSE: &str = "place at the end of the document";

/// Clause appended to structured prompts once the structure holds at least one component.
pub const PRESERVE_EXISTING_CLAUSE: &str = "while preserving all existing elements";

/// SEO line of the technical specifications block.
pub const SEO_CLAUSE: &str = "optimized for search engines with an appropriate semantic structure";

/// Quality guidelines appended to every structured prompt.
pub const DEVELOPER_GUIDELINES: &str = "Use the following development best practices:
1. Semantic HTML with the appropriate tags (header, nav, main, section, article, aside, footer)
2. Correct use of ARIA attributes for accessibility
3. Harmonized responsive breakpoints for every screen size
4. Smooth and subtle animations and transitions
5. Consistent color palette with sufficient contrast
6. State handling (hover, focus, active) for every interactive element";

/// Instruction shown to the model before every generation request.
pub const GENERATION_PREAMBLE: &str =
    "You are a web development expert specialized in generating modern HTML/CSS components.";

/// Output rules the generated markup must follow.
pub const GENERATION_RULES: [&str; 6] = [
    "Generate only HTML with inline styles (style=\"\")",
    "Use only the provided styles",
    "Make sure the design is responsive",
    "Create a clear and maintainable structure",
    "Generate neither comments nor script/link tags",
    "Return only the HTML code",
];

/// Placeholder when no generation happened yet in the session.
pub const FIRST_GENERATION: &str = "First generation";
