//! CLI command definitions and dispatch.

pub mod categories;
pub mod config;
pub mod demo;
pub mod replay;

use std::path::Path;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use greentrace_core::config::AppConfig;
use greentrace_core::error::AppError;
use greentrace_entity::document::Document;
use greentrace_service::{AggregateMetrics, DocumentRegistry};

/// GreenTrace: sustainability document registry and audit trail
#[derive(Debug, Parser)]
#[command(name = "greentrace", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the sample documents through the registry
    Demo(demo::DemoArgs),
    /// Apply a JSON script of registry operations
    Replay(replay::ReplayArgs),
    /// List the compliance category table
    Categories,
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: &AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Demo(args) => demo::execute(args, config, self.format).await,
            Commands::Replay(args) => replay::execute(args, config, self.format).await,
            Commands::Categories => categories::execute(self.format),
            Commands::Config(args) => config::execute(args, config, self.format),
        }
    }
}

/// Document display row
#[derive(Debug, Serialize, Tabled)]
struct DocumentRow {
    /// Document ID
    id: String,
    /// Original file name
    name: String,
    /// File type
    #[tabled(rename = "type")]
    file_type: String,
    /// Status
    status: String,
    /// Category
    category: String,
    /// CO₂ impact
    #[tabled(rename = "tCO₂e")]
    co2: String,
    /// Verification
    verification: String,
}

impl From<&Document> for DocumentRow {
    fn from(doc: &Document) -> Self {
        Self {
            id: doc.id.to_string(),
            name: doc.original_name.clone(),
            file_type: doc.file_type.as_str().to_string(),
            status: doc.status.to_string(),
            category: doc.extracted_data.category.clone(),
            co2: format!("{:+.1}", doc.extracted_data.co2_impact),
            verification: doc.verification.status.to_string(),
        }
    }
}

/// Print documents and metrics, then write the export when a directory is given.
pub fn report(
    registry: &DocumentRegistry,
    export: Option<&Path>,
    format: OutputFormat,
) -> Result<(), AppError> {
    let metrics = registry.aggregate_metrics();

    match format {
        OutputFormat::Table => {
            let rows: Vec<DocumentRow> = registry
                .all_documents()
                .into_iter()
                .map(DocumentRow::from)
                .collect();
            output::print_list(&rows, format);
            print_metrics(&metrics);
        }
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct Report<'a> {
                documents: Vec<&'a Document>,
                metrics: &'a AggregateMetrics,
            }
            output::print_json(&Report {
                documents: registry.all_documents(),
                metrics: &metrics,
            });
        }
    }

    if let Some(dir) = export {
        let path = registry.write_export(Some(dir))?;
        output::print_success(&format!("Audit export written to '{}'", path.display()));
    }
    Ok(())
}

fn print_metrics(metrics: &AggregateMetrics) {
    output::print_heading("Metrics");
    output::print_kv("Total documents", &metrics.total_documents.to_string());
    output::print_kv("Processed", &metrics.processed_documents.to_string());
    output::print_kv("Verified", &metrics.verified_documents.to_string());
    output::print_kv(
        "Carbon impact",
        &format!("{:+.1} tCO₂e", metrics.total_carbon_impact),
    );
    output::print_kv(
        "Avg processing time",
        &format!("{:.0} ms", metrics.average_processing_time),
    );
    let coverage = &metrics.compliance_coverage;
    output::print_kv("CSRD coverage", &format!("{:.1}%", coverage.csrd));
    output::print_kv("GRI coverage", &format!("{:.1}%", coverage.gri));
    output::print_kv("ISSB coverage", &format!("{:.1}%", coverage.issb));
}
