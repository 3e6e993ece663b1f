//! Input checks and JSON report emission shared by every command.

use std::io::Write;

use camino::Utf8Path;
use serde::Serialize;
use waymark_fs::create_utf8_file;

use crate::CliError;

/// Fail unless `path` names an existing regular file.
pub(crate) fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match waymark_fs::file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Write `report` as pretty JSON to `destination`, or to `writer` when no
/// destination is configured.
pub(crate) fn emit_report<T: Serialize>(
    report: &T,
    destination: Option<&Utf8Path>,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(report).map_err(CliError::SerializeReport)?;
    match destination {
        Some(path) => {
            let mut file = create_utf8_file(path).map_err(|source| CliError::CreateOutput {
                path: path.to_path_buf(),
                source,
            })?;
            write_payload(&mut file, &payload)?;
            log::info!("wrote report to {path}");
            Ok(())
        }
        None => write_payload(writer, &payload),
    }
}

fn write_payload(writer: &mut dyn Write, payload: &str) -> Result<(), CliError> {
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    writer.flush().map_err(CliError::WriteOutput)
}
