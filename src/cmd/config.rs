//! Configuration view and validation commands: `leadflow config`.

use std::path::Path;

use anyhow::Result;
use leadflow::config::{CONFIG_FILE, DATASET_ENV, FOLLOW_UP_DAYS_ENV, LeadflowConfig, LeadflowToml};
use leadflow::dataset::Dataset;
use leadflow::ui::icons::{CHECK, WARNING};

use super::super::{Cli, ConfigCommands};

fn print_toml(toml: &LeadflowToml) {
    println!("[defaults]");
    println!("  follow_up_days = {}", toml.defaults.follow_up_days);
    println!("  dataset = \"{}\"", toml.defaults.dataset);
    println!();
    println!("[export]");
    println!("  leads_file = \"{}\"", toml.export.leads_file);
    println!("  users_file = \"{}\"", toml.export.users_file);
    println!();
    println!("[sources]");
    println!("  known = {:?}", toml.sources.known);
    println!();
}

pub fn cmd_config(project_dir: &Path, cli: &Cli, command: Option<ConfigCommands>) -> Result<()> {
    let config = LeadflowConfig::with_cli_args(project_dir.to_path_buf(), cli.data.clone())?;
    let config_path = config.config_path();

    match command {
        None | Some(ConfigCommands::Show) => {
            println!();
            println!("Leadflow Configuration");
            println!("======================");
            println!();

            if config_path.exists() {
                println!("Config file: {}", config_path.display());
            } else {
                println!("No {} found at {}", CONFIG_FILE, config_path.display());
                println!("Using default configuration:");
            }
            println!();
            print_toml(&config.toml);

            println!("Effective values (with env/CLI overrides):");
            println!("  dataset = \"{}\"", config.dataset_path().display());
            println!("  follow_up_days = {}", config.follow_up_days());
            println!();
            println!("Overrides: --data, {}, {}", DATASET_ENV, FOLLOW_UP_DAYS_ENV);
            if !config_path.exists() {
                println!("Run 'leadflow config init' to create a {} file.", CONFIG_FILE);
            }
            println!();
        }
        Some(ConfigCommands::Validate) => {
            println!();
            println!("Validating configuration...");
            println!();

            let mut warnings = config.validate();

            // Source list is advisory; unknown sources in the dataset only warn.
            let dataset_path = config.dataset_path();
            if dataset_path.exists() {
                let dataset = Dataset::load(&dataset_path)?;
                let (leads, _) = dataset.into_stores(config.follow_up_days())?;
                for source in config.toml.unknown_sources(&leads.sources()) {
                    warnings.push(format!(
                        "dataset uses source '{}' which is not in sources.known",
                        source
                    ));
                }
            }

            if warnings.is_empty() {
                if config_path.exists() {
                    println!("{}Configuration is valid.", CHECK);
                } else {
                    println!("{}No {} found. Using defaults (valid).", CHECK, CONFIG_FILE);
                }
            } else {
                println!("{}Configuration warnings:", WARNING);
                for warning in warnings {
                    println!("  - {}", warning);
                }
            }
            println!();
        }
        Some(ConfigCommands::Init) => {
            if config_path.exists() {
                println!("{} already exists at {}", CONFIG_FILE, config_path.display());
                println!("Delete it first if you want to recreate it.");
                return Ok(());
            }

            if !config.leadflow_dir.exists() {
                std::fs::create_dir_all(&config.leadflow_dir)?;
            }

            LeadflowToml::default().save(&config_path)?;

            println!("Created {} at {}", CONFIG_FILE, config_path.display());
            println!();
            println!("You can now customize:");
            println!("  - [defaults] follow_up_days, dataset");
            println!("  - [export] leads_file, users_file");
            println!("  - [sources] known");
            println!();
        }
    }

    Ok(())
}
