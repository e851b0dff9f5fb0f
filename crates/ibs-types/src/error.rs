use thiserror::Error;

#[derive(Error, Debug)]
pub enum IbsError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error(
        "Not all expected synchrotron radiation inputs were provided. \
         Expected: {expected:?}, provided: {provided:?}"
    )]
    MissingSynchrotronRadiationInputs {
        expected: Vec<String>,
        provided: Vec<String>,
    },

    #[error("Invalid optics: {0}")]
    InvalidOptics(String),

    #[error("Physics constraint violated: {0}")]
    PhysicsViolation(String),

    #[error("Unknown IBS formalism '{0}', expected 'nagaitsev' or 'bjorken-mtingwa'")]
    UnknownFormalism(String),

    #[error("Not implemented: {0}")]
    NotImplemented(String),

    #[error("Field map is not updatable: {0}")]
    NotUpdatable(String),

    #[error("Grid error: {0}")]
    GridError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type IbsResult<T> = Result<T, IbsError>;
