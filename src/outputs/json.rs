//! JSON report writer.
//!
//! The report is written pretty-printed with two-space indentation. The file
//! is first written next to its destination and then renamed into place, so
//! an interrupted write never leaves a truncated report behind.

use crate::error::AppError;
use crate::models::AggregateReport;
use std::path::Path;
use tokio::fs;
use tracing::{error, info, instrument};

/// Write `report` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`AppError::Json`] if serialization fails or [`AppError::Io`] if
/// the directory, temporary file, or rename fails.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_report(report: &AggregateReport, path: &Path) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(report)?;

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        if let Err(e) = fs::create_dir_all(dir).await {
            error!(dir = %dir.display(), error = %e, "Failed to create output dir");
            return Err(e.into());
        }
    }

    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, json.as_bytes()).await?;
    fs::rename(&tmp_path, path).await?;

    info!(
        bytes = json.len(),
        sources = report.sources.len(),
        cameras = report.metadata.total_cameras,
        "Wrote aggregate report"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::build_report;
    use crate::models::{AdapterKind, CameraRecord, CameraStatus, SourceDescriptor, SourceResult};
    use chrono::Utc;
    use serde_json::{Map, Value};

    fn report() -> AggregateReport {
        let source = SourceDescriptor::new(
            "fl_fl511",
            "FL511",
            "FL",
            "State",
            "https://fl511.com/map/mapIcons/Cameras",
            AdapterKind::System511,
        );
        let camera = CameraRecord {
            camera_id: "77".to_string(),
            name: "I-4 at SR 528".to_string(),
            latitude: Some(28.44),
            longitude: Some(-81.43),
            image_url: Some("https://fl511.com/map/Cameras/77".to_string()),
            stream_url: None,
            direction: None,
            road: None,
            status: CameraStatus::Online,
            raw_metadata: Map::new(),
        };
        build_report(
            vec![SourceResult::new(&source, vec![camera], Utc::now())],
            vec!["Georgia 511".to_string()],
            vec!["Ohio OHGO".to_string()],
        )
    }

    #[tokio::test]
    async fn test_write_report_round_trips() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("out/traffic_cameras_aggregated.json");
        let report = report();

        write_report(&report, &path).await.unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\n  \"metadata\": {"));
        let parsed: AggregateReport = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, report);
        assert!(!tmp.path().join("out/traffic_cameras_aggregated.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_written_document_shape() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("cams.json");
        write_report(&report(), &path).await.unwrap();

        let value: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["metadata"]["total_cameras"], 1);
        assert_eq!(value["metadata"]["failed_sources"][0], "Georgia 511");
        let camera = &value["sources"][0]["cameras"][0];
        assert_eq!(camera["stream_url"], Value::Null);
        assert_eq!(camera["status"], "online");
    }
}
