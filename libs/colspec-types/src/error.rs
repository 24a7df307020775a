#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    #[error("unknown generic type '{name}', expected one of: {}", .expected.join(", "))]
    UnknownGenericType {
        name: String,
        expected: Vec<&'static str>,
    },

    #[error("unknown native type '{native}'")]
    UnknownNativeType { native: String },

    #[error("malformed type '{native}' at byte {position}: {reason}")]
    MalformedNativeType {
        native: String,
        position: usize,
        reason: String,
    },
}

impl TypeError {
    pub(crate) fn malformed(native: &str, position: usize, reason: impl Into<String>) -> Self {
        TypeError::MalformedNativeType {
            native: native.to_string(),
            position,
            reason: reason.into(),
        }
    }
}
