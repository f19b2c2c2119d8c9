//! Result and Error types for the command line

/// Type alias for Result<T, cli::Error>
pub type Result<T> = core::result::Result<T, Error>;

/// Anything that can stop a command
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed input/output stream")]
    IOError(#[from] std::io::Error),

    #[error(transparent)]
    Volume(#[from] tomokit_volume::Error),

    #[error(transparent)]
    Sample(#[from] tomokit_sample::Error),

    #[error(transparent)]
    Pick(#[from] tomokit_pick::Error),

    #[error("failed to initialise logging")]
    Logger(#[from] log::SetLoggerError),
}
