use serde::{Deserialize, Serialize};

use crate::core::TimelineEntry;
use crate::error::{ChartError, ChartResult};
use crate::interaction::{DragState, ScrubberState};
use crate::render::Renderer;

use super::validation::validate_config;
use super::{GanttChart, GanttChartConfig};

pub const CHART_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Parses the notebook record format: a JSON array of entry objects.
pub fn entries_from_json(input: &str) -> ChartResult<Vec<TimelineEntry>> {
    let entries: Vec<TimelineEntry> = serde_json::from_str(input)
        .map_err(|e| ChartError::InvalidData(format!("failed to parse entries json: {e}")))?;
    for entry in &entries {
        entry.validate()?;
    }
    Ok(entries)
}

pub fn entries_to_json(entries: &[TimelineEntry]) -> ChartResult<String> {
    serde_json::to_string(entries)
        .map_err(|e| ChartError::InvalidData(format!("failed to serialize entries: {e}")))
}

/// Parses and validates a camelCase options object; missing keys default.
pub fn config_from_json(input: &str) -> ChartResult<GanttChartConfig> {
    let config: GanttChartConfig = serde_json::from_str(input)
        .map_err(|e| ChartError::InvalidConfig(format!("failed to parse config: {e}")))?;
    validate_config(&config)?;
    Ok(config)
}

impl GanttChartConfig {
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to serialize config: {e}")))
    }

    /// Same as `config_from_json`.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        config_from_json(input)
    }
}

/// Serializable view of a chart's data, options and interaction state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSnapshot {
    pub entries: Vec<TimelineEntry>,
    pub config: GanttChartConfig,
    pub scrubber: Option<ScrubberState>,
    pub drag: DragState,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: ChartSnapshot,
}

impl ChartSnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = ChartSnapshotJsonContractV1 {
            schema_version: CHART_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    /// Accepts either a bare snapshot or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<ChartSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: ChartSnapshotJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
        })?;
        if payload.schema_version != CHART_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}

impl<R: Renderer> GanttChart<R> {
    #[must_use]
    pub fn snapshot(&self) -> ChartSnapshot {
        ChartSnapshot {
            entries: self.entries.clone(),
            config: self.config.clone(),
            scrubber: self.scrubber.clone(),
            drag: self.drag,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{config_from_json, entries_from_json};
    use crate::error::ChartError;

    #[test]
    fn parses_notebook_records() {
        let entries = entries_from_json(
            r#"[{"category":"a","start":0,"duration":10,"strokeColor":"black"},
                {"category":"b","subcategory":"x","start":5,"duration":10,"color":"red"}]"#,
        )
        .expect("entries parse");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].color, "steelblue");
        assert_eq!(entries[0].stroke_color.as_deref(), Some("black"));
        assert_eq!(entries[1].subcategory.as_deref(), Some("x"));
    }

    #[test]
    fn rejects_negative_duration() {
        let err = entries_from_json(r#"[{"category":"a","start":0,"duration":-1}]"#)
            .expect_err("negative duration");
        assert!(matches!(err, ChartError::InvalidData(_)));
    }

    #[test]
    fn config_keys_are_camel_case_with_defaults() {
        let config = config_from_json(r#"{"scrubberEnabled":false,"numXTicks":4}"#)
            .expect("config parse");
        assert!(!config.scrubber_enabled);
        assert_eq!(config.num_x_ticks, 4);
        assert_eq!(config.height, 300);
    }

    #[test]
    fn config_validation_runs_after_parse() {
        let err = config_from_json(r#"{"numXTicks":0}"#).expect_err("zero ticks");
        assert!(matches!(err, ChartError::InvalidConfig(_)));
    }
}
