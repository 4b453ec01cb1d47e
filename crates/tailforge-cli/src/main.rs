//! tailforge CLI tool.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tailforge_config::tailwind::TAILWIND_VERSION;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "tailforge")]
#[command(about = "Tailwind/daisyUI configuration generator", long_about = None)]
struct Cli {
    /// Project file
    #[arg(long, env = "TAILFORGE_PROJECT", default_value = "tailforge.kdl")]
    project: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render tailwind.config.js, the base stylesheet and theme files
    Render,
    /// Check that the project templates render
    Validate,
    /// List the configured daisyUI themes
    Themes,
    /// Render a single template with explicit values
    Template {
        /// Template file
        path: PathBuf,
        /// Placeholder value, parsed as JSON when possible
        #[arg(long = "set", value_name = "NAME=VALUE")]
        assignments: Vec<String>,
        /// JSON file with placeholder values
        #[arg(long)]
        vars: Option<PathBuf>,
        /// Write here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the Tailwind CLI download URL for this machine
    TailwindUrl {
        /// tailwind-cli-extra release
        #[arg(long, default_value = TAILWIND_VERSION)]
        version: String,
    },
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr, rendered output to stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render => {
            let config = commands::load_project(&cli.project)?;
            for written in commands::render::render(&config)? {
                println!("Wrote {} to '{}'", written.name, written.path.display());
            }
        }
        Commands::Validate => {
            let config = commands::load_project(&cli.project)?;
            commands::render::validate(&config)?;
            println!("Configuration is valid");
        }
        Commands::Themes => {
            let config = commands::load_project(&cli.project)?;
            for name in commands::theme_names(&config) {
                println!("{}", name);
            }
        }
        Commands::Template {
            path,
            assignments,
            vars,
            output,
        } => {
            let doc = commands::template::render_template(&path, vars.as_deref(), &assignments)?;
            match output {
                Some(output) => {
                    commands::write_file(&output, doc.as_str())?;
                    println!("Wrote template to '{}'", output.display());
                }
                None => print!("{}", doc),
            }
        }
        Commands::TailwindUrl { version } => {
            println!("{}", commands::tailwind_url(&version)?);
        }
    }

    Ok(())
}
