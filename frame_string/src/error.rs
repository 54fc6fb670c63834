use crate::{field, pins, settings};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    PinLayout(#[from] pins::Error),
    #[error(transparent)]
    Settings(#[from] settings::Error),
    #[error(transparent)]
    Field(#[from] field::Error),
}
