//! Error types

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// A widget description that cannot be displayed
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// The id is empty or only whitespace
    #[error("widget id must not be empty")]
    EmptyId,

    /// An image widget points at a file that does not exist
    #[error("image path ({}) does not exist", .path.display())]
    MissingImage {
        /// Path given as the widget value
        path: PathBuf,
    },

    /// A slider was declared without both bounds
    #[error("slider `{id}` needs both a low and a high value")]
    MissingSliderBounds {
        /// Normalized widget id
        id: String,
    },

    /// A slider's low bound is not below its high bound
    #[error("slider `{id}` has low bound {low} not below high bound {high}")]
    InvertedSliderBounds {
        /// Normalized widget id
        id: String,
        /// Lower bound
        low: i64,
        /// Upper bound
        high: i64,
    },

    /// A slider's value is not an integer inside its bounds
    #[error("slider `{id}` value `{value}` is not an integer in [{low}, {high}]")]
    SliderValue {
        /// Normalized widget id
        id: String,
        /// Offending value
        value: String,
        /// Lower bound
        low: i64,
        /// Upper bound
        high: i64,
    },

    /// A coordinate string is neither a pixel count, a percentage nor `step`
    #[error("invalid position `{0}`: expected pixels, a percentage like `50%`, or `step`")]
    InvalidPosition(String),

    /// A width or height is negative or not finite
    #[error("widget `{id}` has invalid size {value}")]
    InvalidSize {
        /// Normalized widget id
        id: String,
        /// Offending dimension
        value: f64,
    },
}

/// A widget id is already present on the screen
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("widget with id `{0}` already exists")]
pub struct DuplicateIdError(pub String);

/// Image size could not be determined
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The probing command could not be run
    #[error("failed to run image probe `{program}`: {source}")]
    Command {
        /// Program that was launched
        program: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The probe ran but its output carried no dimensions
    #[error("could not read dimensions of {} from `{output}`", .path.display())]
    Unrecognized {
        /// Probed image
        path: PathBuf,
        /// Raw probe output
        output: String,
    },

    /// No probe is configured
    #[error("no image probe available for {}", .path.display())]
    Unavailable {
        /// Image that needed probing
        path: PathBuf,
    },
}

/// A render round-trip failed
#[derive(Debug, Error)]
pub enum RenderError {
    /// The local renderer binary is missing
    #[error("renderer binary not found at {}", .0.display())]
    BinaryNotFound(PathBuf),

    /// The renderer process could not be started
    #[error("failed to launch `{program}`: {source}")]
    Spawn {
        /// Program that was launched
        program: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Writing the script or reading the reply failed
    #[error("renderer I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The renderer exited unsuccessfully
    #[error("renderer exited with {status}: {stderr}")]
    ExitStatus {
        /// Exit status reported by the OS
        status: ExitStatus,
        /// Captured standard error, trimmed
        stderr: String,
    },

    /// The reply was not UTF-8
    #[error("renderer reply is not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// The reply did not have the `<prefix>: <id>[: <value>]` shape
    #[error("malformed renderer reply `{0}`")]
    MalformedResponse(String),

    /// An image widget had no size and probing failed
    #[error(transparent)]
    Probe(#[from] ProbeError),
}

/// Any failure raised by this crate
#[derive(Debug, Error)]
pub enum Error {
    /// Widget construction failed
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A widget id collided
    #[error(transparent)]
    DuplicateId(#[from] DuplicateIdError),

    /// Rendering failed
    #[error(transparent)]
    Render(#[from] RenderError),

    /// A screen description could not be parsed
    #[error("invalid screen description: {0}")]
    Json(#[from] serde_json::Error),

    /// A screen description could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// File that was read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Result alias for fallible crate operations
pub type Result<T, E = Error> = std::result::Result<T, E>;
