//! Configuration CLI commands.

use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use greentrace_core::config::AppConfig;
use greentrace_core::error::AppError;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
}

/// Execute config commands
pub fn execute(args: &ConfigArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => match format {
            OutputFormat::Json => output::print_json(config),
            OutputFormat::Table => {
                output::print_heading("Registry");
                output::print_kv(
                    "Transition policy",
                    &config.registry.transition_policy.to_string(),
                );
                output::print_kv("Default model", &config.registry.default_model_version);
                output::print_kv(
                    "Audit actor",
                    config.registry.audit_actor.as_deref().unwrap_or("-"),
                );

                output::print_heading("Compliance");
                output::print_kv("CSRD items", &config.compliance.csrd_total.to_string());
                output::print_kv("GRI items", &config.compliance.gri_total.to_string());
                output::print_kv("ISSB items", &config.compliance.issb_total.to_string());

                output::print_heading("Export");
                output::print_kv("Directory", &config.export.directory);
                output::print_kv("Pretty", &config.export.pretty.to_string());

                output::print_heading("Logging");
                output::print_kv("Level", &config.logging.level);
                output::print_kv("Format", &config.logging.format);
            }
        },
    }
    Ok(())
}
