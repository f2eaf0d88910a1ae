use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// `signals` is absent, not a key/value mapping, or holds a non-string status.
    MalformedSnapshot { detail: String },
}

impl RenderError {
    pub fn malformed(detail: impl Into<String>) -> Self {
        RenderError::MalformedSnapshot {
            detail: detail.into(),
        }
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::MalformedSnapshot { detail } => {
                write!(f, "malformed snapshot: {detail}")
            }
        }
    }
}

impl std::error::Error for RenderError {}
