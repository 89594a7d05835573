//! Error taxonomy and exit codes

use thiserror::Error;

/// Failure classes visible to automation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed invocation
    InvalidArgument,
    /// File open, read or write failure
    Io,
    /// Malformed publication string, imprint, signature or response
    Parse,
    /// Transport failure or timeout
    Network,
    /// Non-zero status from a service, or nothing to extend to
    Service,
    /// Negative verification result
    VerificationFailure,
    /// Required service or key not configured
    NotConfigured,
    /// Publications file authentication failure
    Crypto,
}

impl ErrorKind {
    /// Process exit code for this kind
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorKind::InvalidArgument => 3,
            ErrorKind::Parse => 4,
            ErrorKind::Network => 5,
            ErrorKind::VerificationFailure => 6,
            ErrorKind::Service => 7,
            ErrorKind::Io => 9,
            ErrorKind::Crypto => 10,
            ErrorKind::NotConfigured => 15,
        }
    }
}

/// Errors that can occur in verification and extension tasks
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid task invocation
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// I/O error on a named file
    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Required configuration missing
    #[error("{0} not configured")]
    NotConfigured(&'static str),

    /// No publication to extend to
    #[error("no publication available after signing time {0}")]
    NoSuitablePublication(u64),

    /// Types error
    #[error(transparent)]
    Types(#[from] ksi_types::Error),

    /// Crypto error
    #[error(transparent)]
    Crypto(#[from] ksi_crypto::Error),

    /// Publications file error
    #[error(transparent)]
    Publications(#[from] ksi_publications::Error),

    /// Service error
    #[error(transparent)]
    Client(#[from] ksi_client::Error),

    /// Verification error
    #[error("verification failed: {0}")]
    Verification(#[from] ksi_verify::Error),
}

impl Error {
    /// Wrap an I/O error with the path it concerns
    pub fn io(path: impl std::fmt::Display, source: std::io::Error) -> Self {
        Error::Io {
            path: path.to_string(),
            source,
        }
    }

    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Error::Io { .. } => ErrorKind::Io,
            Error::NotConfigured(_) => ErrorKind::NotConfigured,
            Error::NoSuitablePublication(_) => ErrorKind::Service,
            Error::Types(_) => ErrorKind::Parse,
            Error::Crypto(_) => ErrorKind::Crypto,
            Error::Publications(e) => publications_kind(e),
            Error::Client(e) => client_kind(e),
            Error::Verification(_) => ErrorKind::VerificationFailure,
        }
    }

    /// Process exit code for the error
    pub fn exit_code(&self) -> i32 {
        self.kind().exit_code()
    }
}

fn publications_kind(error: &ksi_publications::Error) -> ErrorKind {
    use ksi_publications::Error as E;
    match error {
        E::Json(_) | E::Unordered { .. } | E::UnsupportedVersion(_) => ErrorKind::Parse,
        E::Io(_) | E::Cache(_) => ErrorKind::Io,
        E::Unsigned | E::Authentication(_) => ErrorKind::Crypto,
    }
}

fn client_kind(error: &ksi_client::Error) -> ErrorKind {
    use ksi_client::Error as E;
    match error {
        E::Http(_) | E::Api(_) => ErrorKind::Network,
        E::InvalidResponse(_) | E::Json(_) => ErrorKind::Parse,
        E::Service { .. } => ErrorKind::Service,
        E::NotConfigured(_) | E::Config(_) => ErrorKind::NotConfigured,
        E::Publications(e) => publications_kind(e),
    }
}

/// Result type for tasks
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Error::InvalidArgument("x".into()), 3)]
    #[case(Error::Types(ksi_types::Error::InvalidImprint("x".into())), 4)]
    #[case(Error::Client(ksi_client::Error::Http("timeout".into())), 5)]
    #[case(Error::Verification(ksi_verify::Error::MissingCalendarChain), 6)]
    #[case(Error::Client(ksi_client::Error::Service { status: 1, message: None }), 7)]
    #[case(Error::NoSuitablePublication(5), 7)]
    #[case(Error::io("sig.ksig", std::io::Error::from(std::io::ErrorKind::NotFound)), 9)]
    #[case(Error::Publications(ksi_publications::Error::Unsigned), 10)]
    #[case(Error::Client(ksi_client::Error::NotConfigured("extender URL")), 15)]
    #[case(Error::Client(ksi_client::Error::Publications(ksi_publications::Error::Unsigned)), 10)]
    fn test_exit_codes(#[case] error: Error, #[case] code: i32) {
        assert_eq!(error.exit_code(), code);
    }
}
