//! JSON export of the statistics payload.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use crate::error::{CohortError, Result};
use crate::stats::SummaryStatistics;

impl SummaryStatistics {
    /// Write the statistics payload as pretty-printed JSON.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    CohortError::Persistence(format!(
                        "Failed to create directory '{}': {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let file = File::create(path).map_err(|e| {
            CohortError::Persistence(format!(
                "Failed to create file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self).map_err(|e| {
            CohortError::Persistence(format!("Failed to serialize statistics: {}", e))
        })?;

        Ok(())
    }
}
