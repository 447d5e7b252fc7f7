//! Static catalog of component kinds, categories and template building blocks.
//!
//! Everything here is fixed reference data used by label synthesis, prompt assembly and the
//! UI pickers. Lookups are total: unknown template sections fall back to a generic
//! description rather than failing.

use serde::{Deserialize, Serialize};

/// Coarse authoring category a component kind belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentCategory {
    Layout,
    Content,
    Interaction,
    Templates,
    Custom,
}

impl ComponentCategory {
    pub const ALL: [ComponentCategory; 5] = [
        ComponentCategory::Layout,
        ComponentCategory::Content,
        ComponentCategory::Interaction,
        ComponentCategory::Templates,
        ComponentCategory::Custom,
    ];

    /// Human-readable category name.
    pub fn display_name(self) -> &'static str {
        match self {
            ComponentCategory::Layout => "Layout",
            ComponentCategory::Content => "Content",
            ComponentCategory::Interaction => "Interaction",
            ComponentCategory::Templates => "Templates",
            ComponentCategory::Custom => "Custom",
        }
    }

    /// Kinds offered under this category, in picker order.
    pub fn kinds(self) -> Vec<ComponentKind> {
        ComponentKind::ALL
            .into_iter()
            .filter(|kind| kind.category() == self)
            .collect()
    }
}

/// Closed enumeration of component kinds (the component `type` tag).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Section,
    Columns,
    Grid,
    Card,
    Team,
    Timeline,
    Testimonial,
    Form,
    Template,
    Custom,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 10] = [
        ComponentKind::Section,
        ComponentKind::Columns,
        ComponentKind::Grid,
        ComponentKind::Card,
        ComponentKind::Team,
        ComponentKind::Timeline,
        ComponentKind::Testimonial,
        ComponentKind::Form,
        ComponentKind::Template,
        ComponentKind::Custom,
    ];

    pub fn category(self) -> ComponentCategory {
        match self {
            ComponentKind::Section | ComponentKind::Columns | ComponentKind::Grid => {
                ComponentCategory::Layout
            }
            ComponentKind::Card
            | ComponentKind::Team
            | ComponentKind::Timeline
            | ComponentKind::Testimonial => ComponentCategory::Content,
            ComponentKind::Form => ComponentCategory::Interaction,
            ComponentKind::Template => ComponentCategory::Templates,
            ComponentKind::Custom => ComponentCategory::Custom,
        }
    }

    /// Display name used as the label stem and in prompts.
    pub fn display_name(self) -> &'static str {
        match self {
            ComponentKind::Section => "Section",
            ComponentKind::Columns => "Columns",
            ComponentKind::Grid => "Grid",
            ComponentKind::Card => "Card",
            ComponentKind::Team => "Team",
            ComponentKind::Timeline => "Timeline",
            ComponentKind::Testimonial => "Testimonial",
            ComponentKind::Form => "Form",
            ComponentKind::Template => "Full Template",
            ComponentKind::Custom => "Custom",
        }
    }

    /// Wire tag, identical to the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            ComponentKind::Section => "section",
            ComponentKind::Columns => "columns",
            ComponentKind::Grid => "grid",
            ComponentKind::Card => "card",
            ComponentKind::Team => "team",
            ComponentKind::Timeline => "timeline",
            ComponentKind::Testimonial => "testimonial",
            ComponentKind::Form => "form",
            ComponentKind::Template => "template",
            ComponentKind::Custom => "custom",
        }
    }
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of complete site a `template` component describes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateType {
    Landing,
    Blog,
    Portfolio,
    Ecommerce,
    #[default]
    Business,
}

impl TemplateType {
    pub const ALL: [TemplateType; 5] = [
        TemplateType::Landing,
        TemplateType::Blog,
        TemplateType::Portfolio,
        TemplateType::Ecommerce,
        TemplateType::Business,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TemplateType::Landing => "landing",
            TemplateType::Blog => "blog",
            TemplateType::Portfolio => "portfolio",
            TemplateType::Ecommerce => "ecommerce",
            TemplateType::Business => "business",
        }
    }

    /// Name shown in labels, e.g. `Full Template: Landing Page`.
    pub fn display_name(self) -> &'static str {
        match self {
            TemplateType::Landing => "Landing Page",
            TemplateType::Blog => "Blog",
            TemplateType::Portfolio => "Portfolio",
            TemplateType::Ecommerce => "E-commerce",
            TemplateType::Business => "Business Site",
        }
    }

    /// Sections a template of this type can contain, in page order.
    pub fn sections(self) -> &'static [SectionInfo] {
        match self {
            TemplateType::Landing => LANDING_SECTIONS,
            TemplateType::Blog => BLOG_SECTIONS,
            TemplateType::Portfolio => PORTFOLIO_SECTIONS,
            TemplateType::Ecommerce => ECOMMERCE_SECTIONS,
            TemplateType::Business => BUSINESS_SECTIONS,
        }
    }

    pub fn section(self, id: &str) -> Option<&'static SectionInfo> {
        self.sections().iter().find(|s| s.id == id)
    }

    /// Section outline used in prompts when the caller picked no explicit sections.
    pub fn default_outline(self) -> &'static [&'static str] {
        match self {
            TemplateType::Landing => &[
                "Impactful hero with a clear value proposition and a visible CTA",
                "Features section with icons and concise descriptions",
                "Customer testimonials with photos and authentic quotes",
                "Transparent, easy-to-understand pricing section",
                "Simple and accessible contact form",
            ],
            TemplateType::Blog => &[
                "Elegant header with intuitive navigation",
                "Featured articles section with optimized images",
                "Recent articles list with metadata",
                "Sidebar with categories and search",
                "Footer with important links and newsletter signup",
            ],
            TemplateType::Portfolio => &[
                "Impactful and professional personal introduction",
                "Organized project gallery with filters",
                "Skills section with visual indicators",
                "Rewarding client/employer testimonials",
                "Professional contact with complete information",
            ],
            TemplateType::Ecommerce => &[
                "Header with category navigation and cart",
                "Attractive seasonal promotional banner",
                "Featured products grid with prices and ratings",
                "Categories section with easy navigation",
                "Footer with trust information (payment, delivery)",
            ],
            TemplateType::Business => &[
                "Professional header with clear navigation",
                "Authentic and convincing \"About\" section",
                "Services presentation with customer benefits",
                "Team section highlighting expertise",
                "Strategic customer testimonials",
                "Contact with map and form",
            ],
        }
    }
}

/// Visual style of a `template` component.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateStyle {
    Minimal,
    #[default]
    Modern,
    Classic,
    Bold,
    Playful,
    Corporate,
    Creative,
}

impl TemplateStyle {
    pub const ALL: [TemplateStyle; 7] = [
        TemplateStyle::Minimal,
        TemplateStyle::Modern,
        TemplateStyle::Classic,
        TemplateStyle::Bold,
        TemplateStyle::Playful,
        TemplateStyle::Corporate,
        TemplateStyle::Creative,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TemplateStyle::Minimal => "minimal",
            TemplateStyle::Modern => "modern",
            TemplateStyle::Classic => "classic",
            TemplateStyle::Bold => "bold",
            TemplateStyle::Playful => "playful",
            TemplateStyle::Corporate => "corporate",
            TemplateStyle::Creative => "creative",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TemplateStyle::Minimal => "Minimalist",
            TemplateStyle::Modern => "Modern",
            TemplateStyle::Classic => "Classic",
            TemplateStyle::Bold => "Bold",
            TemplateStyle::Playful => "Playful",
            TemplateStyle::Corporate => "Corporate",
            TemplateStyle::Creative => "Creative",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            TemplateStyle::Minimal => "Clean design, white space, elegant typography",
            TemplateStyle::Modern => "Current trends, dynamic, subtle effects",
            TemplateStyle::Classic => "Timeless, formal, traditional structure",
            TemplateStyle::Bold => "Strong contrasts, imposing typography, striking visuals",
            TemplateStyle::Playful => "Bright colors, organic shapes, animations",
            TemplateStyle::Corporate => "Professional, structured, business oriented",
            TemplateStyle::Creative => "Unique layout, experimental, artistic",
        }
    }
}

/// One selectable section of a template type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SectionInfo {
    pub id: &'static str,
    pub label: &'static str,
    pub required: bool,
}

const fn section(id: &'static str, label: &'static str, required: bool) -> SectionInfo {
    SectionInfo {
        id,
        label,
        required,
    }
}

const LANDING_SECTIONS: &[SectionInfo] = &[
    section("hero", "Hero with CTA", true),
    section("features", "Features/Benefits", true),
    section("how-it-works", "How it works", false),
    section("testimonials", "Customer testimonials", false),
    section("pricing", "Pricing", false),
    section("faq", "Frequently asked questions", false),
    section("cta", "Secondary CTA", false),
    section("contact", "Contact form", true),
    section("trust", "Trust elements", false),
    section("footer", "Footer", true),
];

const BLOG_SECTIONS: &[SectionInfo] = &[
    section("header", "Header with navigation", true),
    section("featured", "Featured articles", true),
    section("recent", "Recent articles", true),
    section("categories", "Categories", false),
    section("sidebar", "Sidebar", false),
    section("newsletter", "Newsletter signup", false),
    section("about", "About the blog", false),
    section("popular", "Popular articles", false),
    section("footer", "Footer", true),
];

const PORTFOLIO_SECTIONS: &[SectionInfo] = &[
    section("intro", "Personal introduction", true),
    section("projects", "Projects/Work", true),
    section("skills", "Skills", true),
    section("experience", "Professional experience", false),
    section("education", "Education", false),
    section("testimonials", "Testimonials", false),
    section("services", "Services offered", false),
    section("contact", "Contact", true),
    section("footer", "Footer", true),
];

const ECOMMERCE_SECTIONS: &[SectionInfo] = &[
    section("header", "Header with navigation and cart", true),
    section("banner", "Promotional banner", false),
    section("featured", "Featured products", true),
    section("categories", "Product categories", true),
    section("bestsellers", "Best sellers", false),
    section("new-arrivals", "New arrivals", false),
    section("promo", "Special offers", false),
    section("collections", "Collections", false),
    section("testimonials", "Customer reviews", false),
    section("benefits", "Benefits (delivery, etc.)", true),
    section("newsletter", "Newsletter signup", false),
    section("instagram", "Instagram feed", false),
    section("footer", "Footer", true),
];

const BUSINESS_SECTIONS: &[SectionInfo] = &[
    section("header", "Header with navigation", true),
    section("hero", "Welcome hero", true),
    section("about", "About", true),
    section("services", "Services/Products", true),
    section("process", "Work process", false),
    section("team", "Team", false),
    section("portfolio", "Portfolio/Achievements", false),
    section("clients", "Clients/Partners", false),
    section("testimonials", "Testimonials", false),
    section("stats", "Key figures", false),
    section("blog", "Blog articles", false),
    section("contact", "Contact", true),
    section("cta", "Call-to-action", false),
    section("footer", "Footer", true),
];

/// Fallback when no detailed description exists for a section.
pub const DEFAULT_SECTION_DESCRIPTION: &str = "with an optimal layout and relevant content";

/// Detailed prompt description of a section within a template type.
pub fn section_description(template_type: TemplateType, section_id: &str) -> &'static str {
    let description = match (template_type, section_id) {
        (TemplateType::Landing, "hero") => Some(
            "with a catchy headline, an explanatory subtitle, a main CTA and a relevant illustration",
        ),
        (TemplateType::Landing, "features") => Some(
            "presenting 3-4 key features with icons, short titles and impactful descriptions",
        ),
        (TemplateType::Landing, "testimonials") => {
            Some("showing authentic testimonials with photos, names and companies")
        }
        (TemplateType::Landing, "pricing") => Some(
            "clearly comparing offers with price tables, features and action buttons",
        ),
        (TemplateType::Landing, "faq") => {
            Some("answering common objections with questions grouped by theme")
        }
        (TemplateType::Landing, "contact") => {
            Some("with a simple form, contact information and an interactive map")
        }
        (TemplateType::Blog, "header") => Some("with logo, main navigation and search"),
        (TemplateType::Blog, "featured") => {
            Some("highlighting 3 main articles with large images and excerpts")
        }
        (TemplateType::Blog, "recent") => {
            Some("listing the latest articles with date, author and reading time")
        }
        (TemplateType::Blog, "categories") => {
            Some("organized intuitively with article counters")
        }
        (TemplateType::Blog, "sidebar") => {
            Some("including search, popular articles and newsletter signup")
        }
        (TemplateType::Blog, "newsletter") => {
            Some("with a simple form and a clear value proposition")
        }
        (TemplateType::Blog, "footer") => {
            Some("with navigation links, social media and legal notices")
        }
        (TemplateType::Portfolio, "intro") => {
            Some("with a professional photo, a catchy title and a short biography")
        }
        (TemplateType::Portfolio, "projects") => {
            Some("presenting the best work with category filters")
        }
        (TemplateType::Portfolio, "skills") => Some("organized by domain with level indicators"),
        (TemplateType::Portfolio, "experience") => {
            Some("clear timeline of positions and key achievements")
        }
        (TemplateType::Portfolio, "testimonials") => {
            Some("selected testimonials from clients or collaborators")
        }
        (TemplateType::Portfolio, "contact") => {
            Some("with multiple contact channels and availability")
        }
        _ => None,
    };

    description.unwrap_or(DEFAULT_SECTION_DESCRIPTION)
}

/// A colour palette offered for templates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub id: &'static str,
    pub label: &'static str,
    pub primary: &'static str,
    pub secondary: &'static str,
}

const fn palette(
    id: &'static str,
    label: &'static str,
    primary: &'static str,
    secondary: &'static str,
) -> Palette {
    Palette {
        id,
        label,
        primary,
        secondary,
    }
}

pub const PALETTES: &[Palette] = &[
    palette("blue", "Blue", "#3B82F6", "#1E40AF"),
    palette("green", "Green", "#10B981", "#065F46"),
    palette("purple", "Purple", "#8B5CF6", "#5B21B6"),
    palette("red", "Red", "#EF4444", "#B91C1C"),
    palette("orange", "Orange", "#F97316", "#C2410C"),
    palette("teal", "Teal", "#14B8A6", "#0F766E"),
    palette("gray", "Gray", "#6B7280", "#374151"),
    palette("pink", "Pink", "#EC4899", "#BE185D"),
    palette("amber", "Amber", "#F59E0B", "#B45309"),
    palette("indigo", "Indigo", "#6366F1", "#4338CA"),
    palette("monochrome", "Monochrome", "#262626", "#737373"),
    palette("custom", "Custom", "", ""),
];

pub fn palette_by_id(id: &str) -> Option<&'static Palette> {
    PALETTES.iter().find(|p| p.id == id)
}
