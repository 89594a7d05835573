//! Verification plans
//!
//! Command-line flags are validated once into a [`VerifyRequest`]; the
//! verify task then dispatches on the plan without re-inspecting flags.

use crate::error::{Error, Result};
use ksi_types::DataHash;
use std::path::PathBuf;

/// Which verification procedure to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationPlan {
    /// Verify against the live calendar through the extender
    Online,
    /// Verify with embedded material, optionally confirmed by a local publications file
    Internal { publications_file: Option<PathBuf> },
    /// Verify against a user-supplied publication string
    ///
    /// When the signature is not already anchored to that publication the
    /// publications file is read from `publications_file` if given, else
    /// downloaded.
    UserPublication {
        reference: String,
        publications_file: Option<PathBuf>,
    },
}

/// Check of the signed document hash against the original input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCheck {
    /// Hash a file (`-` for standard input)
    File(PathBuf),
    /// Compare with a given imprint
    Imprint(DataHash),
}

/// Unvalidated verify options as they come from the command line
#[derive(Debug, Clone, Default)]
pub struct VerifyOptions {
    pub online: bool,
    pub publication: Option<String>,
    pub publications_file: Option<PathBuf>,
    pub input_file: Option<PathBuf>,
    pub input_imprint: Option<String>,
}

/// A validated verify invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyRequest {
    pub plan: VerificationPlan,
    /// Input checks, run in order after the plan succeeds
    pub input: Vec<InputCheck>,
}

impl VerifyRequest {
    /// Request running `plan` with no input check
    pub fn new(plan: VerificationPlan) -> Self {
        Self {
            plan,
            input: Vec::new(),
        }
    }

    /// Add an input check
    pub fn with_input(mut self, input: InputCheck) -> Self {
        self.input.push(input);
        self
    }

    /// Validate command-line options
    ///
    /// The imprint is parsed here; a malformed one is a parse error. A file
    /// and an imprint may both be given, and the file is checked first.
    pub fn from_options(options: VerifyOptions) -> Result<Self> {
        let plan = match (options.online, options.publication) {
            (true, Some(_)) => {
                return Err(Error::InvalidArgument(
                    "online verification cannot be combined with a publication string".into(),
                ))
            }
            (true, None) => {
                if options.publications_file.is_some() {
                    return Err(Error::InvalidArgument(
                        "online verification does not use a publications file".into(),
                    ));
                }
                VerificationPlan::Online
            }
            (false, Some(reference)) => VerificationPlan::UserPublication {
                reference,
                publications_file: options.publications_file,
            },
            (false, None) => VerificationPlan::Internal {
                publications_file: options.publications_file,
            },
        };

        let mut input = Vec::new();
        if let Some(path) = options.input_file {
            input.push(InputCheck::File(path));
        }
        if let Some(imprint) = options.input_imprint {
            input.push(InputCheck::Imprint(DataHash::parse_imprint(&imprint)?));
        }

        Ok(Self { plan, input })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_default_is_internal() {
        let request = VerifyRequest::from_options(VerifyOptions::default()).unwrap();
        assert_eq!(
            request,
            VerifyRequest::new(VerificationPlan::Internal {
                publications_file: None
            })
        );
    }

    #[test]
    fn test_publication_with_local_file() {
        let request = VerifyRequest::from_options(VerifyOptions {
            publication: Some("AAAAAA-C".into()),
            publications_file: Some("pubs.json".into()),
            ..Default::default()
        })
        .unwrap();
        assert!(matches!(
            request.plan,
            VerificationPlan::UserPublication {
                publications_file: Some(_),
                ..
            }
        ));
    }

    #[test]
    fn test_illegal_combinations() {
        let online_with_ref = VerifyOptions {
            online: true,
            publication: Some("x".into()),
            ..Default::default()
        };
        let online_with_file = VerifyOptions {
            online: true,
            publications_file: Some("pubs.json".into()),
            ..Default::default()
        };
        for options in [online_with_ref, online_with_file] {
            let err = VerifyRequest::from_options(options).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        }
    }

    #[test]
    fn test_file_and_imprint_both_checked() {
        let request = VerifyRequest::from_options(VerifyOptions {
            input_file: Some("doc".into()),
            input_imprint: Some(format!("SHA-256:{}", "00".repeat(32))),
            ..Default::default()
        })
        .unwrap();
        assert!(matches!(
            request.input.as_slice(),
            [InputCheck::File(_), InputCheck::Imprint(_)]
        ));
    }

    #[test]
    fn test_bad_imprint_is_parse_error() {
        let err = VerifyRequest::from_options(VerifyOptions {
            input_imprint: Some("SHA-256:zz".into()),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_imprint_parsed() {
        let request = VerifyRequest::from_options(VerifyOptions {
            input_imprint: Some(format!("sha256:{}", "ab".repeat(32))),
            ..Default::default()
        })
        .unwrap();
        assert!(matches!(request.input.as_slice(), [InputCheck::Imprint(_)]));
    }
}
