mod axis_label_format;
mod data_controller;
mod engine;
mod engine_config;
mod engine_core;
mod engine_init;
mod engine_snapshot;
mod interaction_controller;
mod invalidation;
mod render_frame_builder;
mod scale_coordinator;
mod snap_resolver;
mod viewport_tracker;

pub use data_controller::IngestOutcome;
pub use engine::{ChartEngine, RenderOutcome};
pub use engine_config::{ChartEngineConfig, ChartStyle};
pub use engine_snapshot::{
    ENGINE_SNAPSHOT_JSON_SCHEMA_V1, EngineSnapshot, EngineSnapshotJsonContractV1,
};
pub use invalidation::InvalidationLevel;
pub use viewport_tracker::ViewportTracker;
