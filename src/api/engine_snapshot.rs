use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::{Viewport, VisibleDomain};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{InteractionMode, TooltipState};
use crate::render::Renderer;

use super::ChartEngine;

/// Serializable deterministic state snapshot used by regression tests and
/// debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub viewport: Viewport,
    pub instrument: Option<String>,
    pub selection_generation: Option<u64>,
    pub series_len: usize,
    pub full_extent: Option<(f64, f64)>,
    pub visible_domain: Option<VisibleDomain>,
    pub is_zoomed: bool,
    pub price_domain: Option<(f64, f64)>,
    pub interaction_mode: InteractionMode,
    pub tooltip: Option<TooltipState>,
}

impl<R: Renderer> ChartEngine<R> {
    /// Captures the current engine state, refitting scales first.
    pub fn snapshot(&mut self) -> EngineSnapshot {
        let scales = self.refresh_scales();
        let selection = self.core.store.selection();
        EngineSnapshot {
            viewport: self.viewport(),
            instrument: selection.map(|ticket| ticket.instrument.id().to_owned()),
            selection_generation: selection.map(|ticket| ticket.generation),
            series_len: self.core.store.series().len(),
            full_extent: scales.map(|scales| scales.time.full_range()),
            visible_domain: self.core.interaction.visible_domain(),
            is_zoomed: self.core.interaction.is_zoomed(),
            price_domain: scales.map(|scales| scales.price.domain()),
            interaction_mode: self.core.interaction.mode(),
            tooltip: self.core.interaction.tooltip().cloned(),
        }
    }
}

pub const ENGINE_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Versioned envelope written by `to_json_contract_v1_pretty`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: EngineSnapshot,
}

impl EngineSnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = EngineSnapshotJsonContractV1 {
            schema_version: ENGINE_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize snapshot: {e}")))
    }

    /// Accepts either a bare snapshot or a versioned envelope.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        let value: Value = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("snapshot is not valid json: {e}")))?;

        let Some(version) = value.get("schema_version") else {
            return serde_json::from_value(value)
                .map_err(|e| ChartError::InvalidData(format!("failed to parse snapshot: {e}")));
        };
        if version.as_u64() != Some(u64::from(ENGINE_SNAPSHOT_JSON_SCHEMA_V1)) {
            return Err(ChartError::InvalidData(format!(
                "unsupported snapshot schema version: {version}"
            )));
        }
        let payload: EngineSnapshotJsonContractV1 = serde_json::from_value(value)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse snapshot contract: {e}")))?;
        Ok(payload.snapshot)
    }
}
