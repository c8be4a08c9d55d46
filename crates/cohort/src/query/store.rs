//! SQLite-backed patient table.

use std::path::Path;

use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};

use crate::error::Result;
use crate::record::PatientRecord;

const CREATE_PATIENTS: &str = "CREATE TABLE IF NOT EXISTS patients (
    patient_id TEXT NOT NULL,
    trial_site TEXT NOT NULL,
    enrollment_date TEXT NOT NULL,
    age INTEGER NOT NULL,
    adverse_event INTEGER NOT NULL,
    completed_trial INTEGER NOT NULL
)";

/// The persisted valid-record table.
///
/// Dates are stored as ISO text and booleans as 0/1 integers. The table is
/// replaced wholesale on every load; there is no incremental update path and
/// no history.
pub struct PatientStore {
    conn: Connection,
}

impl PatientStore {
    /// Open (or create) a store at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute(CREATE_PATIENTS, [])?;
        Ok(Self { conn })
    }

    /// Open an in-memory store.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute(CREATE_PATIENTS, [])?;
        Ok(Self { conn })
    }

    /// Replace the whole table with the given records, atomically.
    pub fn replace_all(&mut self, records: &[PatientRecord]) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM patients", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO patients \
                 (patient_id, trial_site, enrollment_date, age, adverse_event, completed_trial) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for record in records {
                stmt.execute(params![
                    record.patient_id,
                    record.trial_site,
                    record.enrollment_date.to_string(),
                    record.age,
                    record.adverse_event,
                    record.completed_trial,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    /// Read the persisted valid set back in insertion order.
    pub fn all_patients(&self) -> Result<Vec<PatientRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT patient_id, trial_site, enrollment_date, age, adverse_event, completed_trial \
             FROM patients ORDER BY rowid",
        )?;
        let rows = stmt.query_map([], record_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// Number of persisted records.
    pub fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM patients", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    pub(super) fn connection(&self) -> &Connection {
        &self.conn
    }
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<PatientRecord> {
    let date_text: String = row.get(2)?;
    let enrollment_date = NaiveDate::parse_from_str(&date_text, "%Y-%m-%d")
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e)))?;

    Ok(PatientRecord {
        patient_id: row.get(0)?,
        trial_site: row.get(1)?,
        enrollment_date,
        age: row.get(3)?,
        adverse_event: row.get(4)?,
        completed_trial: row.get(5)?,
    })
}
