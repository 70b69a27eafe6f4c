use std::path::PathBuf;

/// Convenience result type used across topoframes.
pub type TopoResult<T> = Result<T, TopoError>;

/// Top-level error taxonomy. Every variant maps onto a stable process exit code.
#[derive(thiserror::Error, Debug)]
pub enum TopoError {
    /// Wrong argument count or unparsable command-line arguments.
    #[error("usage error: {0}")]
    Usage(String),

    /// Neither neighbours nor connections were requested.
    #[error("no graph type selected: enable neighbours and/or connections plotting")]
    NoGraphTypeSelected,

    /// A requested file family had zero matches in the input directory.
    #[error("no input files matching '{pattern}' in '{}'", dir.display())]
    NoInputFiles {
        /// Directory that was searched.
        dir: PathBuf,
        /// Glob pattern that matched nothing.
        pattern: String,
    },

    /// Neighbours and connections file counts differ.
    #[error("found {neighbours} neighbours files but {connections} connections files")]
    CountMismatch {
        /// Number of neighbours files.
        neighbours: usize,
        /// Number of connections files.
        connections: usize,
    },

    /// The fixed step-0 reference graph is missing.
    #[error("required reference file '{}' does not exist", .0.display())]
    MissingReference(PathBuf),

    /// Malformed graph description.
    #[error("decode error: {0}")]
    Decode(String),

    /// Rasterization or image encoding failure.
    #[error("render error: {0}")]
    Render(String),

    /// Invalid render settings.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TopoError {
    /// Build a [`TopoError::Usage`] value.
    pub fn usage(msg: impl Into<String>) -> Self {
        Self::Usage(msg.into())
    }

    /// Build a [`TopoError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`TopoError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`TopoError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Process exit code reported by the command-line tools.
    ///
    /// Failures without a dedicated code (decode, render, IO) exit with `1`.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoInputFiles { .. } => 2,
            Self::MissingReference(_) => 3,
            Self::CountMismatch { .. } => 4,
            Self::NoGraphTypeSelected => 5,
            Self::Usage(_)
            | Self::Decode(_)
            | Self::Render(_)
            | Self::Validation(_)
            | Self::Other(_) => 1,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
