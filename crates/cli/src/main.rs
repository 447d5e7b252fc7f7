use clap::{Parser, Subcommand, ValueEnum};
use pagewright_core::{
    generate_component_prompt, generate_structured_prompt, load_insert_plan, load_options,
    ComponentCategory, GenerationAction, GenerationRequest, TemplateStructure, TemplateType,
};
use pagewright_gemini::{GeminiClient, GeminiConfig, GenerationService};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "pagewright")]
#[command(about = "Pagewright page builder CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the component prompt and the structured prompt for an options file
    Prompt {
        /// Component options (.yaml, .yml or .json)
        file: PathBuf,
    },
    /// Apply a list of inserts and print the resulting outline
    Outline {
        /// List of `{ id, options }` entries (.yaml, .yml or .json)
        file: PathBuf,
    },
    /// Generate an HTML fragment with Gemini
    Generate {
        /// What to build, or how to change the existing fragment
        description: String,
        /// File holding the markup of the fragment to modify
        #[arg(long)]
        existing: Option<PathBuf>,
        /// Defaults to `update` when --existing is given, `create` otherwise
        #[arg(long, value_enum)]
        action: Option<ActionArg>,
    },
    /// List component kinds, template types and their sections
    Catalog,
}

#[derive(Clone, Copy, ValueEnum)]
enum ActionArg {
    Create,
    Update,
}

impl From<ActionArg> for GenerationAction {
    fn from(arg: ActionArg) -> Self {
        match arg {
            ActionArg::Create => GenerationAction::Create,
            ActionArg::Update => GenerationAction::Update,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pagewright=warn".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Prompt { file }) => {
            let options = load_options(&file)?;
            println!("Component prompt:\n{}\n", generate_component_prompt(&options));
            println!(
                "Structured prompt:\n{}",
                generate_structured_prompt(&TemplateStructure::new(), &options)
            );
        }
        Some(Commands::Outline { file }) => {
            let mut structure = TemplateStructure::new();
            for step in load_insert_plan(&file)? {
                let outcome = structure.insert(step.id.clone(), step.options);
                println!("{}: {:?}", step.id, outcome);
            }

            println!("\n{}", structure.outline());

            let orphans = structure.orphans();
            if !orphans.is_empty() {
                let ids: Vec<String> = orphans.iter().map(ToString::to_string).collect();
                println!("Orphans: {}", ids.join(", "));
            }

            let violations = structure.check_invariants();
            if violations.is_empty() {
                println!("Structure is consistent.");
            } else {
                for violation in &violations {
                    eprintln!("Violation: {:?}", violation);
                }
                return Err(format!("{} structural violation(s)", violations.len()).into());
            }
        }
        Some(Commands::Generate {
            description,
            existing,
            action,
        }) => {
            let existing_template = match existing {
                Some(path) => Some(std::fs::read_to_string(&path)?),
                None => None,
            };
            let mut request = GenerationRequest {
                description,
                existing_template,
                action: GenerationAction::Create,
            };
            request.action = match action {
                Some(arg) => arg.into(),
                None if request.existing_markup().is_some() => GenerationAction::Update,
                None => GenerationAction::Create,
            };

            let client = GeminiClient::new(GeminiConfig::from_env()?)?;
            let mut service = GenerationService::new(client);
            match service.generate(&request).await {
                Ok(fragment) => {
                    eprintln!("{} ({})", fragment.block_label, fragment.block_id);
                    println!("{}", fragment.markup);
                }
                Err(e) => return Err(format!("Error generating component: {}", e).into()),
            }
        }
        Some(Commands::Catalog) => {
            for category in ComponentCategory::ALL {
                let kinds: Vec<&str> = category
                    .kinds()
                    .into_iter()
                    .map(|kind| kind.as_str())
                    .collect();
                println!("{}: {}", category.display_name(), kinds.join(", "));
            }
            println!();
            for template_type in TemplateType::ALL {
                println!("{} ({})", template_type.display_name(), template_type.as_str());
                for section in template_type.sections() {
                    let marker = if section.required { " *" } else { "" };
                    println!("  - {} [{}]{}", section.label, section.id, marker);
                }
            }
        }
        None => {
            println!("Use 'pagewright --help' for commands");
        }
    }

    Ok(())
}
