//! Error types emitted by the Waymark CLI.
//!
//! Keep this error type reasonably small, as every command helper returns
//! `Result<_, CliError>`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;
use waymark_core::{DistanceMatrixError, ProximityError, TimestampError, TollError};
use waymark_data::DatasetError;
use waymark_stats::StatsError;

/// Errors emitted by the Waymark CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// A referenced input path does not exist.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Loading a dataset failed.
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    /// The segments could not form a distance table.
    #[error("failed to build distance matrix: {0}")]
    DistanceMatrix(#[from] DistanceMatrixError),
    /// The proximity search was rejected.
    #[error("proximity search failed: {0}")]
    Proximity(#[from] ProximityError),
    /// Toll configuration or trip pricing failed.
    #[error("toll pricing failed: {0}")]
    Toll(#[from] TollError),
    /// An interval carried a malformed day or time.
    #[error("coverage check failed: {0}")]
    Coverage(#[from] TimestampError),
    /// Vehicle-count aggregation failed.
    #[error("vehicle-count statistics failed: {0}")]
    Stats(#[from] StatsError),
    /// Serializing a report failed.
    #[error("failed to serialize report: {0}")]
    SerializeReport(#[source] serde_json::Error),
    /// Creating the report file failed.
    #[error("failed to create report at {path:?}: {source}")]
    CreateOutput {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Writing the report failed.
    #[error("failed to write report: {0}")]
    WriteOutput(#[source] std::io::Error),
}
