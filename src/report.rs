//! Rendering of listings and per-asset delete outcomes.

use std::io::{self, Write};

use crate::commands::delete::DeleteOutcome;
use crate::error::{ASSET_NOT_FOUND, CONNECTION_PROBLEM, SERVER_ERROR};
use crate::repository::Asset;

/// Line printed instead of a table when a listing comes back empty.
pub const NO_ASSETS_FOUND: &str = "No assets found in repository";

/// The metadata key carrying the applicable product version.
const PRODUCT_VERSION_KEY: &str = "productVersion";

/// Extracts the product version from a `key=value;` delimited metadata
/// string, stripping surrounding double quotes from the value.
pub fn product_version(applies_to: &str) -> Option<String> {
    for entry in applies_to.split(';') {
        if let Some((key, value)) = entry.split_once('=') {
            if key.trim() == PRODUCT_VERSION_KEY {
                let value = value.trim();
                let value = value
                    .strip_prefix('"')
                    .and_then(|v| v.strip_suffix('"'))
                    .unwrap_or(value);
                return Some(value.to_string());
            }
        }
    }
    None
}

/// Renders one row per asset with aligned, pipe-delimited columns:
/// id, type, product version, and `name (short description)`. An empty
/// input renders the "no assets" line instead.
pub fn format_table(assets: &[Asset]) -> String {
    if assets.is_empty() {
        return format!("{}\n", NO_ASSETS_FOUND);
    }

    let rows: Vec<[String; 4]> = assets
        .iter()
        .map(|asset| {
            let id = asset.id.clone().unwrap_or_default();
            let asset_type = asset
                .asset_type
                .map(|t| t.to_string())
                .unwrap_or_default();
            let version = asset
                .applies_to
                .as_deref()
                .and_then(product_version)
                .unwrap_or_default();
            let title = match (&asset.name, &asset.short_description) {
                (Some(name), Some(description)) => format!("{} ({})", name, description),
                (Some(name), None) => name.clone(),
                (None, Some(description)) => format!("({})", description),
                (None, None) => String::new(),
            };
            [id, asset_type, version, title]
        })
        .collect();

    let mut widths = [0usize; 3];
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.len());
        }
    }

    let mut table = String::new();
    for row in &rows {
        table.push_str(&format!(
            "{:<id_w$} | {:<type_w$} | {:<ver_w$} | {}\n",
            row[0],
            row[1],
            row[2],
            row[3],
            id_w = widths[0],
            type_w = widths[1],
            ver_w = widths[2],
        ));
    }
    table
}

/// Prints the status line (and detail line, on failure) for one outcome.
pub fn write_outcome<W: Write>(output: &mut W, outcome: &DeleteOutcome) -> io::Result<()> {
    match outcome {
        DeleteOutcome::Deleted { id } => writeln!(output, "Deleted asset {}", id),
        DeleteOutcome::NotFound { id } => {
            writeln!(output, "Asset {} not deleted", id)?;
            writeln!(output, "{}", ASSET_NOT_FOUND)
        }
        DeleteOutcome::ConnectionFailed { id } => {
            writeln!(output, "Asset {} not deleted", id)?;
            writeln!(output, "{}", CONNECTION_PROBLEM)
        }
        DeleteOutcome::ServerError { id } => {
            writeln!(output, "Asset {} not deleted", id)?;
            writeln!(output, "{}", SERVER_ERROR)
        }
        DeleteOutcome::DeletionFailed { id, reason } => {
            writeln!(output, "Asset {} not deleted", id)?;
            writeln!(output, "{}", reason)
        }
    }
}
