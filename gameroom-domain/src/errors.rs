use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum NormalizeError {
    #[error("{table}: expected a list of records, found {found}")]
    NotARecordList { table: String, found: &'static str },
    #[error("{table}[{index}]: expected an object, found {found}")]
    NotAnObject {
        table: String,
        index: usize,
        found: &'static str,
    },
    #[error("{table}[{index}].{field}: {reason}")]
    MalformedField {
        table: String,
        index: usize,
        field: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReportError {
    #[error("{table}[{index}] is missing required field '{field}'")]
    MissingField {
        table: &'static str,
        field: &'static str,
        index: usize,
    },
    #[error("event '{title}' ends before it starts")]
    InvalidEventWindow { title: String },
    #[error("event '{next}' starts before event '{previous}' ends")]
    OverlappingEvents { previous: String, next: String },
    #[error("invalid report parameter: {0}")]
    InvalidParameter(String),
    #[error("dataset unavailable: {0}")]
    Dataset(#[from] NormalizeError),
    #[error("{0} was not loaded")]
    MissingDocument(&'static str),
    #[error("{document}: {reason}")]
    MalformedDocument {
        document: &'static str,
        reason: String,
    },
    #[error("{table}.{field} total does not fit in a 64-bit integer")]
    Overflow {
        table: &'static str,
        field: &'static str,
    },
}

/// Unwraps a field a report needs, reporting which record lacks it.
pub fn require<'a, T>(
    value: &'a Option<T>,
    table: &'static str,
    field: &'static str,
    index: usize,
) -> Result<&'a T, ReportError> {
    value
        .as_ref()
        .ok_or(ReportError::MissingField { table, field, index })
}

/// Adds `amount` into `total`, failing instead of wrapping.
pub fn add_amount(
    total: &mut i64,
    amount: i64,
    table: &'static str,
    field: &'static str,
) -> Result<(), ReportError> {
    *total = total
        .checked_add(amount)
        .ok_or(ReportError::Overflow { table, field })?;
    Ok(())
}
