//! Command-line front end: resolve overrides, emit the build manifest, check a config.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::debug;
use serde::Serialize;

use prosetheme::{BuildManifest, DesignTokens, ResolveOptions, SiteConfig, TypographyConfig};

#[derive(Debug, Parser)]
#[command(name = "prosetheme", version, about = "Design tokens and prose typography overrides")]
struct Cli {
    /// Log debug output (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print JSON on a single line
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the typography overrides as JSON
    Resolve {
        /// Site config (YAML or JSON); the stock palette is used when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print the complete build manifest as JSON
    Manifest {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Print the CSS custom properties the overrides reference
    Vars {
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Selector the variables are declared on
        #[arg(long, default_value = ":root")]
        selector: String,
    },
    /// Print the overrides as a stylesheet
    Css {
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Selector the prose rules are scoped under
        #[arg(long, default_value = ".prose")]
        scope: String,
    },
    /// Validate a config file, including its highlight theme
    Check {
        #[arg(short, long)]
        config: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Command::Resolve { config } => {
            let (tokens, options) = tokens_and_options(config.as_deref())?;
            let typography = TypographyConfig::from_tokens(&tokens, &options)?;
            print_json(&typography, cli.compact)
        }
        Command::Manifest { config } => {
            let manifest = build_manifest(config)?;
            print_json(&manifest, cli.compact)
        }
        Command::Vars { config, selector } => {
            let (tokens, _) = tokens_and_options(config.as_deref())?;
            print!("{}", tokens.css_variables(selector));
            Ok(())
        }
        Command::Css { config, scope } => {
            let (tokens, options) = tokens_and_options(config.as_deref())?;
            let tree = prosetheme::resolve(&tokens, &options)?;
            print!("{}", tree.to_css(scope));
            Ok(())
        }
        Command::Check { config } => {
            let manifest = build_manifest(config)?;
            println!(
                "{}: ok ({} integrations, content {})",
                config.display(),
                manifest.integrations.len(),
                manifest.tailwind.content.join(", ")
            );
            Ok(())
        }
    }
}

fn tokens_and_options(config: Option<&Path>) -> Result<(DesignTokens, ResolveOptions)> {
    match config {
        Some(path) => {
            let config = load_config(path)?;
            let tokens = config.tokens()?;
            Ok((tokens, config.resolve_options()))
        }
        None => {
            debug!("no config given, using the stock palette");
            Ok((DesignTokens::gruvbox_material_dark(), ResolveOptions::default()))
        }
    }
}

fn load_config(path: &Path) -> Result<SiteConfig> {
    SiteConfig::load(path).with_context(|| format!("loading {}", path.display()))
}

fn build_manifest(path: &Path) -> Result<BuildManifest> {
    let config = load_config(path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    BuildManifest::build(&config, base_dir)
        .with_context(|| format!("building manifest for {}", path.display()))
}

fn print_json<T: Serialize>(value: &T, compact: bool) -> Result<()> {
    let text = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{}", text);
    Ok(())
}
