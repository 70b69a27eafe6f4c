use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DotError {
    pub(crate) offset: usize,
    pub(crate) message: String,
}

impl DotError {
    pub(crate) fn new(offset: usize, message: impl Into<String>) -> Self {
        Self {
            offset,
            message: message.into(),
        }
    }
}

impl fmt::Display for DotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dot syntax error at byte {}: {}", self.offset, self.message)
    }
}

impl std::error::Error for DotError {}
