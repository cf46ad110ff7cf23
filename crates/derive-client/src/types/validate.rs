/*
[INPUT]:  Deserialized records
[OUTPUT]: Invariant checks beyond what serde enforces
[POS]:    Data layer - validate-on-construct capability shared by all records
[UPDATE]: When adding records with invariants
*/

use crate::http::{DeriveError, Result};

/// Checks run after a record is deserialized and before it reaches a caller
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

impl<T: Validate> Validate for Vec<T> {
    fn validate(&self) -> Result<()> {
        self.iter().try_for_each(Validate::validate)
    }
}

impl<T: Validate> Validate for Option<T> {
    fn validate(&self) -> Result<()> {
        self.as_ref().map_or(Ok(()), Validate::validate)
    }
}

pub(crate) fn require_non_empty(record: &str, field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DeriveError::validation(format!(
            "{record}.{field} must not be empty"
        )));
    }
    Ok(())
}
