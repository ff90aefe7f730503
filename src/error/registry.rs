use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("invalid {field} '{value}': {reason}")]
    InvalidKey {
        field: &'static str,
        value: String,
        reason: String,
    },
}

impl RegistryError {
    pub fn invalid_key(
        field: &'static str,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidKey {
            field,
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidKey { field, .. } => field,
        }
    }
}
