use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use imtheme::prelude::*;
use imtheme::services::batch::theme_path;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Parser)]
#[command(author, version, about = "Variant-aware random ImGui theme generator", long_about = None)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Folder holding generated themes
    #[arg(long, global = true)]
    themes_root: Option<PathBuf>,

    /// Seed the random source for reproducible output
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate random themes into the themes root
    Generate {
        /// Number of themes to generate
        #[arg(short, long, default_value_t = 1)]
        count: usize,
        /// Only generate the dark variant
        #[arg(long)]
        no_light: bool,
        /// Template for dark themes
        #[arg(long)]
        dark_template: Option<PathBuf>,
        /// Template for light themes
        #[arg(long)]
        light_template: Option<PathBuf>,
    },
    /// Randomize a single template into a chosen file
    Randomize {
        /// Template to randomize
        template: PathBuf,
        /// Variant to sample for
        #[arg(long, default_value = "dark")]
        variant: Variant,
        /// Destination file
        #[arg(short, long)]
        output: PathBuf,
        /// Identity token; drawn from the registry when omitted
        #[arg(long)]
        identity: Option<String>,
    },
    /// List identities already taken under the themes root
    Ids,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = SettingsRegistry::new().context("failed to load settings")?;
    init_logging(cli.verbose, settings.log_level());

    if let Some(root) = cli.themes_root.clone() {
        settings.generator.themes_root = root;
    }

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    match cli.command {
        Command::Generate {
            count,
            no_light,
            dark_template,
            light_template,
        } => {
            let mut config = settings.generator.clone();
            if no_light {
                config.light_variant = false;
            }
            if let Some(path) = dark_template {
                config.dark_template = path;
            }
            if let Some(path) = light_template {
                config.light_template = path;
            }

            let mut generator =
                BatchGenerator::from_config(config).context("failed to prepare generation")?;
            let sets = generator
                .run(count, &mut rng)
                .context("theme generation failed")?;
            for set in &sets {
                for generated in &set.themes {
                    println!(
                        "Randomized {} theme saved to {}",
                        generated.variant,
                        generated.path.display()
                    );
                }
            }
        }
        Command::Randomize {
            template,
            variant,
            output,
            identity,
        } => {
            let config = settings.generator();
            config.validate()?;
            let template = load_theme(&template)?;

            let identity = match identity {
                Some(token) => ThemeIdentity::new(token),
                None => {
                    let registry = IdentityRegistry::scan(
                        &config.themes_root,
                        config.identity_min..=config.identity_max,
                    )?;
                    ThemeIdentity::from(registry.draw(&mut rng)?)
                }
            };

            let theme = Randomizer::new()
                .with_author(config.author.clone())
                .randomize(&template, variant, &identity, &mut rng)
                .with_context(|| format!("failed to randomize {}", identity))?;
            save_theme(&output, &theme)
                .with_context(|| format!("failed to write {}", output.display()))?;
            println!("Randomized {} theme saved to {}", variant, output.display());
        }
        Command::Ids => {
            let config = settings.generator();
            let registry = IdentityRegistry::scan(
                &config.themes_root,
                config.identity_min..=config.identity_max,
            )?;
            for id in registry.taken() {
                let identity = ThemeIdentity::from(id);
                println!(
                    "{}\t{}",
                    id,
                    theme_path(&config.themes_root, &identity, Variant::Dark).display()
                );
            }
            log::info!("{} identities still free", registry.available());
        }
    }

    Ok(())
}

fn init_logging(verbose: bool, configured: Option<&str>) {
    let default = if verbose {
        "debug"
    } else {
        configured.unwrap_or("info")
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}
