use thiserror::Error;

/// Why the microphone could not be used.
///
/// None of these are fatal: the extractor drops into visual-only mode and the
/// frame loop carries on.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CaptureError {
    #[error("audio capture is not supported in this environment")]
    Unsupported,
    #[error("microphone permission denied")]
    PermissionDenied,
    #[error("no capture device available")]
    NoDevice,
    #[error("analyser setup failed: {0}")]
    Analyser(String),
    #[error("frequency snapshot unavailable: {0}")]
    Snapshot(String),
}
