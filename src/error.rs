use thiserror::Error;

/// Message printed when no --url flag was supplied.
pub const MISSING_URL: &str = "The repository URL must be provided with --url";

/// Message prefix printed for a syntactically invalid --url value.
pub const INVALID_URL: &str = "The repository URL is not valid: ";

/// Message printed when delete mode is invoked without any asset IDs.
pub const NO_IDS_FOR_DELETE: &str = "No asset IDs were supplied";

/// Message printed when a find operation is invoked without a search term.
pub const NO_SEARCH_TERM: &str = "No search term was supplied";

/// Detail line for a transport-level failure reaching the repository.
pub const CONNECTION_PROBLEM: &str = "There was a problem connecting to the repository";

/// Detail line for a request the repository answered with a failure status.
pub const SERVER_ERROR: &str = "The repository returned an error response";

/// Detail line for an asset the repository does not know about.
pub const ASSET_NOT_FOUND: &str = "The asset was not found in the repository";

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("{}", MISSING_URL)]
    MissingUrl,

    #[error("{}{}", INVALID_URL, .0)]
    InvalidUrl(String),

    #[error("{}", NO_IDS_FOR_DELETE)]
    NoIdentifiers,

    #[error("{}", NO_SEARCH_TERM)]
    NoSearchTerm,

    #[error("One of --delete, --find, --findAndDelete or --listAll must be specified")]
    NoOperation,

    #[error("Only one of --delete, --find, --findAndDelete and --listAll may be specified")]
    TooManyOperations,

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("{}", CONNECTION_PROBLEM)]
    ConnectionProblem,

    #[error("{}: {}", SERVER_ERROR, .0)]
    ServerError(String),

    #[error("{failed} of {total} assets could not be deleted")]
    NotAllDeleted { failed: usize, total: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ClientError>;

/// Failure raised by a repository connection. Implementations of the
/// connection trait produce these; the CLI core never constructs them
/// outside of tests.
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// The backend could not be reached at all.
    #[error("connection failure: {0}")]
    Connection(String),

    /// The backend answered, but with a failure status.
    #[error("request failed with status {status}: {message}")]
    RequestFailure { status: u16, message: String },

    /// The backend refused to delete the asset.
    #[error("{0}")]
    DeletionFailed(String),

    /// The backend sent a payload that could not be understood.
    #[error("bad data from repository: {0}")]
    BadData(String),
}

/// Buckets a backend failure into the outcome class used for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    Connection,
    Server,
    NotFound,
    Deletion,
}

/// Single classification point for backend failures. Called wherever the
/// connection capability is invoked, so the rest of the client only ever
/// sees the closed set of failure classes.
pub fn classify(err: &RepositoryError) -> FailureClass {
    match err {
        RepositoryError::Connection(_) => FailureClass::Connection,
        RepositoryError::RequestFailure { status: 404, .. } => FailureClass::NotFound,
        RepositoryError::RequestFailure { .. } => FailureClass::Server,
        RepositoryError::DeletionFailed(_) => FailureClass::Deletion,
        RepositoryError::BadData(_) => FailureClass::Server,
    }
}

/// Maps a backend failure on a whole-operation call (list, search) to the
/// client error that aborts the run.
pub fn fatal(err: RepositoryError) -> ClientError {
    match classify(&err) {
        FailureClass::Connection => ClientError::ConnectionProblem,
        _ => ClientError::ServerError(err.to_string()),
    }
}
