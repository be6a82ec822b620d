//! Replay a JSON script of registry operations.
//!
//! A script is a JSON array of operations applied in order to a fresh
//! registry:
//!
//! ```json
//! [
//!   { "op": "upload", "ref": "bill", "name": "bill.pdf", "size": 2400000 },
//!   { "op": "status", "document": "bill", "status": "processing" },
//!   { "op": "map", "document": "bill", "category": "Energy Consumption", "amount": "€234.50" },
//!   { "op": "status", "document": "bill", "status": "completed",
//!     "extracted": { "co2Impact": 2.1, "confidence": 92 } },
//!   { "op": "verify", "document": "bill", "status": "verified", "actor": "auditor" }
//! ]
//! ```
//!
//! `document` is either a `ref` label given at intake or a literal
//! `DOC-<uuid>` identifier. Operations naming an unknown document are
//! reported and skipped.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use clap::Args;
use serde::Deserialize;
use tracing::{info, warn};

use crate::output::{self, OutputFormat};
use greentrace_core::NotFoundExt;
use greentrace_core::config::AppConfig;
use greentrace_core::error::{AppError, ErrorKind};
use greentrace_core::types::DocumentId;
use greentrace_entity::document::{
    Document, DocumentStatus, ExtractedDataPatch, FileDescriptor, UploadMethod, VerificationStatus,
};
use greentrace_service::{DocumentRegistry, RequestContext};

/// Arguments for the replay command
#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// Path to the JSON script
    #[arg(short, long)]
    pub script: PathBuf,

    /// Write the audit export into this directory
    #[arg(short, long)]
    pub export: Option<PathBuf>,
}

/// One scripted registry call.
#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
enum Operation {
    Upload {
        #[serde(rename = "ref")]
        label: Option<String>,
        name: String,
        #[serde(default)]
        size: u64,
        #[serde(default = "default_method")]
        method: UploadMethod,
        actor: Option<String>,
    },
    Capture {
        #[serde(rename = "ref")]
        label: Option<String>,
        name: String,
        actor: Option<String>,
    },
    Status {
        document: String,
        status: DocumentStatus,
        extracted: Option<ExtractedDataPatch>,
        actor: Option<String>,
    },
    Verify {
        document: String,
        status: VerificationStatus,
        notes: Option<String>,
        actor: Option<String>,
    },
    Map {
        document: String,
        category: String,
        amount: Option<String>,
        actor: Option<String>,
    },
}

fn default_method() -> UploadMethod {
    UploadMethod::File
}

/// Replays operations against one registry, tracking `ref` labels.
struct Replayer {
    registry: DocumentRegistry,
    labels: HashMap<String, DocumentId>,
    skipped: usize,
}

impl Replayer {
    fn new(config: &AppConfig) -> Self {
        Self {
            registry: DocumentRegistry::new(config),
            labels: HashMap::new(),
            skipped: 0,
        }
    }

    fn apply(&mut self, index: usize, op: Operation) -> Result<(), AppError> {
        match op {
            Operation::Upload {
                label,
                name,
                size,
                method,
                actor,
            } => {
                let doc = self
                    .registry
                    .track_upload(&context(actor), FileDescriptor::new(name, size), method);
                self.remember(label, &doc);
            }
            Operation::Capture { label, name, actor } => {
                let doc = self.registry.track_camera_capture(&context(actor), &name);
                self.remember(label, &doc);
            }
            Operation::Status {
                document,
                status,
                extracted,
                actor,
            } => {
                let Some(id) = self.resolve(index, &document) else {
                    return Ok(());
                };
                let result = self
                    .registry
                    .update_processing_status(&context(actor), id, status, extracted);
                self.settle(index, &document, result)?;
            }
            Operation::Verify {
                document,
                status,
                notes,
                actor,
            } => {
                let Some(id) = self.resolve(index, &document) else {
                    return Ok(());
                };
                let result = self
                    .registry
                    .update_verification_status(&context(actor), id, status, notes);
                self.settle(index, &document, result)?;
            }
            Operation::Map {
                document,
                category,
                amount,
                actor,
            } => {
                let Some(id) = self.resolve(index, &document) else {
                    return Ok(());
                };
                let result = self
                    .registry
                    .map_to_compliance(&context(actor), id, &category, amount);
                self.settle(index, &document, result)?;
            }
        }
        Ok(())
    }

    fn remember(&mut self, label: Option<String>, doc: &Document) {
        if let Some(label) = label {
            self.labels.insert(label, doc.id);
        }
    }

    fn resolve(&mut self, index: usize, reference: &str) -> Option<DocumentId> {
        let id = self
            .labels
            .get(reference)
            .copied()
            .or_else(|| reference.parse().ok());
        if id.is_none() {
            self.skip(index, reference);
        }
        id
    }

    /// Unknown ids are skipped; refused transitions stop the replay.
    fn settle(
        &mut self,
        index: usize,
        reference: &str,
        result: Result<Document, AppError>,
    ) -> Result<(), AppError> {
        if result.ignore_not_found()?.is_none() {
            self.skip(index, reference);
        }
        Ok(())
    }

    fn skip(&mut self, index: usize, reference: &str) {
        warn!(step = index, document = reference, "Unknown document, operation skipped");
        output::print_warning(&format!(
            "Step {index}: unknown document '{reference}', skipped"
        ));
        self.skipped += 1;
    }
}

fn context(actor: Option<String>) -> RequestContext {
    actor.map(RequestContext::actor).unwrap_or_default()
}

async fn load_script(path: &Path) -> Result<Vec<Operation>, AppError> {
    let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Validation,
            format!("Failed to read script '{}'", path.display()),
            e,
        )
    })?;
    serde_json::from_str(&raw).map_err(|e| {
        AppError::with_source(
            ErrorKind::Validation,
            format!("Invalid script '{}': {e}", path.display()),
            e,
        )
    })
}

/// Execute the replay command
pub async fn execute(
    args: &ReplayArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let operations = load_script(&args.script).await?;
    let total = operations.len();
    let mut replayer = Replayer::new(config);

    for (index, op) in operations.into_iter().enumerate() {
        replayer.apply(index + 1, op)?;
    }

    info!(
        operations = total,
        skipped = replayer.skipped,
        "Replay complete"
    );
    super::report(&replayer.registry, args.export.as_deref(), format)
}
