//! Sample document walkthrough.

use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use chrono::{DateTime, Duration, Utc};
use clap::Args;
use tracing::info;

use crate::output::OutputFormat;
use greentrace_core::config::AppConfig;
use greentrace_core::error::AppError;
use greentrace_core::traits::ManualClock;
use greentrace_entity::document::{
    DocumentStatus, EmissionScope, ExtractedDataPatch, FileDescriptor, SourcePatch, UploadMethod,
    VerificationStatus,
};
use greentrace_service::{DocumentRegistry, RequestContext, SharedRegistry};

/// Arguments for the demo command
#[derive(Debug, Args)]
pub struct DemoArgs {
    /// Write the audit export into this directory
    #[arg(short, long)]
    pub export: Option<PathBuf>,
}

/// One sample document and how far it gets through the pipeline.
struct Sample {
    name: &'static str,
    method: UploadMethod,
    size: u64,
    uploaded: &'static str,
    processing_secs: i64,
    amount: &'static str,
    category: &'static str,
    period: &'static str,
    co2_impact: f64,
    scope: EmissionScope,
    provider: &'static str,
    completed: bool,
}

/// Oldest first, so the manual clock only moves forward.
const SAMPLES: &[Sample] = &[
    Sample {
        name: "Employee_Commute_Survey.csv",
        method: UploadMethod::File,
        size: 320_000,
        uploaded: "2024-11-15T12:00:00Z",
        processing_secs: 135,
        amount: "127 responses",
        category: "Employee Transport",
        period: "Q4 2024",
        co2_impact: 0.0,
        scope: EmissionScope::Scope3,
        provider: "HR Department",
        completed: false,
    },
    Sample {
        name: "October_Water_Usage.pdf",
        method: UploadMethod::File,
        size: 1_100_000,
        uploaded: "2024-11-20T08:45:00Z",
        processing_secs: 90,
        amount: "2,340 L",
        category: "Water Usage",
        period: "October 2024",
        co2_impact: 0.4,
        scope: EmissionScope::Scope3,
        provider: "Municipal Water Authority",
        completed: true,
    },
    Sample {
        name: "Camera_Waste_Report_2024-11-22.jpg",
        method: UploadMethod::Camera,
        size: 1_800_000,
        uploaded: "2024-11-22T11:30:00Z",
        processing_secs: 225,
        amount: "1.2 tonnes",
        category: "Waste Management",
        period: "November 2024",
        co2_impact: -0.3,
        scope: EmissionScope::Scope3,
        provider: "OCR Extraction",
        completed: true,
    },
    Sample {
        name: "Supplier_Sustainability_Data.xlsx",
        method: UploadMethod::File,
        size: 850_000,
        uploaded: "2024-11-25T16:45:00Z",
        processing_secs: 130,
        amount: "23 suppliers",
        category: "Supply Chain",
        period: "Annual 2024",
        co2_impact: 0.9,
        scope: EmissionScope::Scope3,
        provider: "Manufacturing Partners",
        completed: true,
    },
    Sample {
        name: "Fleet_Fuel_Receipts_Q4.csv",
        method: UploadMethod::File,
        size: 1_200_000,
        uploaded: "2024-11-28T09:15:00Z",
        processing_secs: 82,
        amount: "156 receipts",
        category: "Transportation",
        period: "Q4 2024",
        co2_impact: 1.8,
        scope: EmissionScope::Scope1,
        provider: "Fleet Management System",
        completed: true,
    },
    Sample {
        name: "November_Energy_Bill_2024.pdf",
        method: UploadMethod::File,
        size: 2_400_000,
        uploaded: "2024-12-01T14:23:00Z",
        processing_secs: 75,
        amount: "€234.50",
        category: "Energy Consumption",
        period: "November 2024",
        co2_impact: 2.1,
        scope: EmissionScope::Scope2,
        provider: "Green Energy Solutions Ltd",
        completed: true,
    },
];

/// Execute the demo command
pub async fn execute(
    args: &DemoArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let clock = Arc::new(ManualClock::new(parse_time(SAMPLES[0].uploaded)?));
    let registry = SharedRegistry::new(DocumentRegistry::with_clock(config, clock.clone()));
    let intake = RequestContext::actor("intake");
    let reviewer = RequestContext::actor("sustainability-lead");

    for sample in SAMPLES {
        clock.set(parse_time(sample.uploaded)?);
        run_sample(&registry, &clock, sample, &intake, &reviewer).await?;
    }

    let registry = registry.read().await;
    info!(documents = registry.len(), "Demo complete");
    super::report(&registry, args.export.as_deref(), format)
}

async fn run_sample(
    registry: &SharedRegistry,
    clock: &ManualClock,
    sample: &Sample,
    intake: &RequestContext,
    reviewer: &RequestContext,
) -> Result<(), AppError> {
    let id = match sample.method {
        UploadMethod::Camera => {
            let doc = registry.track_camera_capture(intake, sample.name).await;
            let payload = Bytes::from(vec![0u8; sample.size as usize]);
            registry
                .attach_capture_payload(intake, doc.id, payload)
                .await?;
            doc.id
        }
        method => {
            registry
                .track_upload(intake, FileDescriptor::new(sample.name, sample.size), method)
                .await
                .id
        }
    };

    clock.advance(Duration::seconds(5));
    registry
        .update_processing_status(
            intake,
            id,
            DocumentStatus::Processing,
            Some(
                ExtractedDataPatch::default()
                    .period(sample.period)
                    .scope(sample.scope),
            ),
        )
        .await?;
    registry
        .update_source(
            intake,
            id,
            SourcePatch {
                provider: Some(sample.provider.to_string()),
                ..SourcePatch::default()
            },
        )
        .await?;
    registry
        .map_to_compliance(intake, id, sample.category, Some(sample.amount.to_string()))
        .await?;

    if !sample.completed {
        return Ok(());
    }

    clock.advance(Duration::seconds(sample.processing_secs));
    registry
        .update_processing_status(
            intake,
            id,
            DocumentStatus::Completed,
            Some(
                ExtractedDataPatch::default()
                    .co2_impact(sample.co2_impact)
                    .confidence(92.0),
            ),
        )
        .await?;
    registry
        .update_verification_status(
            reviewer,
            id,
            VerificationStatus::Verified,
            Some(format!("Checked against {}", sample.provider)),
        )
        .await?;
    Ok(())
}

fn parse_time(value: &str) -> Result<DateTime<Utc>, AppError> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| AppError::validation(format!("Invalid timestamp '{value}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_samples_reproduce_sample_totals() {
        let config = AppConfig::default();
        let clock = Arc::new(ManualClock::new(parse_time(SAMPLES[0].uploaded).expect("time")));
        let registry = SharedRegistry::new(DocumentRegistry::with_clock(&config, clock.clone()));
        let ctx = RequestContext::system();

        for sample in SAMPLES {
            clock.set(parse_time(sample.uploaded).expect("time"));
            run_sample(&registry, &clock, sample, &ctx, &ctx)
                .await
                .expect("sample");
        }

        let metrics = registry.aggregate_metrics().await;
        assert_eq!(metrics.total_documents, 6);
        assert_eq!(metrics.processed_documents, 5);
        assert_eq!(metrics.verified_documents, 5);
        assert!((metrics.total_carbon_impact - 4.9).abs() < 1e-9);
        assert_eq!(metrics.compliance_coverage.issb, 12.5);
    }

    #[tokio::test]
    async fn test_demo_writes_export() {
        let dir = tempfile::tempdir().expect("temp dir");
        let args = DemoArgs {
            export: Some(dir.path().to_path_buf()),
        };
        execute(&args, &AppConfig::default(), OutputFormat::Json)
            .await
            .expect("demo");
        let written = std::fs::read_dir(dir.path()).expect("read dir").count();
        assert_eq!(written, 1);
    }
}
