//! Patient records and row validation.

mod patient;
mod validate;

pub use patient::{InvalidRecord, PatientRecord, RawRow};
pub use validate::RecordValidator;
