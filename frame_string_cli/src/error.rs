use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Image(#[from] image::ImageError),
    #[error("Invalid settings file: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    PinLayout(#[from] frame_string::pins::Error),
    #[error(transparent)]
    Build(#[from] frame_string::Error),
    #[error("Invalid file name")]
    FileName,
    #[error("Preview image is too big to be saved")]
    PreviewSize,
}
