use thiserror::Error;

pub type VizResult<T> = Result<T, VizError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum VizError {
    #[error("malformed record: field `{field}` {reason}")]
    MalformedRecord { field: String, reason: String },

    #[error("inning has no recorded balls")]
    EmptyInning,

    #[error("ball sequence spans innings {first} and {found}; expected a single inning")]
    MixedInnings { first: u8, found: u8 },

    #[error("data provider failure: {0}")]
    DataProvider(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl VizError {
    pub(crate) fn malformed(field: &str, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            field: field.to_owned(),
            reason: reason.into(),
        }
    }
}
