//! Command-line interface definition

use clap::{Args, Parser, Subcommand};
use ksi::client::ServiceSettings;
use std::path::PathBuf;

/// Verify and extend keyless timestamp signatures
#[derive(Parser, Debug)]
#[command(name = "ksi", author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Command,
}

/// Service options shared by every task
#[derive(Args, Debug, Default)]
pub struct GlobalOptions {
    /// Signing service URL
    #[arg(short = 'S', long = "signing-url", global = true)]
    pub signing_url: Option<String>,

    /// Extending service URL
    #[arg(short = 'X', long = "extender-url", global = true)]
    pub extender_url: Option<String>,

    /// Publications file URL
    #[arg(short = 'P', long = "publications-url", global = true)]
    pub publications_url: Option<String>,

    /// Network connect timeout in seconds
    #[arg(short = 'C', long = "connect-timeout", global = true)]
    pub connect_timeout: Option<u64>,

    /// Network transfer timeout in seconds
    #[arg(short = 'c', long = "transfer-timeout", global = true)]
    pub transfer_timeout: Option<u64>,

    /// JSON configuration file
    #[arg(long = "conf", env = "KSI_CONF", global = true)]
    pub conf: Option<PathBuf>,

    /// Directory for caching the publications file
    #[arg(long = "cache-dir", global = true)]
    pub cache_dir: Option<PathBuf>,

    /// Cache the publications file in the platform cache directory
    #[arg(long = "cache", global = true)]
    pub cache: bool,

    /// Base64 Ed25519 key the publications file must be signed with
    #[arg(long = "pub-key", global = true)]
    pub pub_key: Option<String>,

    /// Print verification details and debug logging
    #[arg(short = 'd', long = "debug", global = true)]
    pub debug: bool,
}

impl GlobalOptions {
    /// The configuration layer given on the command line
    pub fn settings(&self) -> ServiceSettings {
        ServiceSettings {
            signing_url: self.signing_url.clone(),
            extender_url: self.extender_url.clone(),
            publications_url: self.publications_url.clone(),
            connect_timeout_sec: self.connect_timeout,
            transfer_timeout_sec: self.transfer_timeout,
            publications_file_key: self.pub_key.clone(),
            cache_dir: self.cache_dir.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Verify a signature
    Verify(VerifyArgs),
    /// Extend a signature to a later publication
    Extend(ExtendArgs),
    /// Publications file operations
    Pubfile {
        #[command(subcommand)]
        command: PubfileCommand,
    },
}

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Signature file (`-` for standard input)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,

    /// Publication string to verify against
    #[arg(long = "ref")]
    pub reference: Option<String>,

    /// Local publications file
    #[arg(short = 'b', long = "publications-file")]
    pub publications_file: Option<PathBuf>,

    /// Original document to check the signature against
    #[arg(short = 'f', long = "file")]
    pub file: Option<PathBuf>,

    /// Document imprint (`<alg>:<hex>`) to check the signature against
    #[arg(short = 'F', long = "imprint")]
    pub imprint: Option<String>,

    /// Verify online against the extending service
    #[arg(long)]
    pub online: bool,

    /// Print signer identity
    #[arg(short = 'n', long = "identity")]
    pub identity: bool,

    /// Print publication references
    #[arg(short = 'r', long = "references")]
    pub references: bool,
}

impl VerifyArgs {
    /// Options for building a verification request
    pub fn options(&self) -> ksi::VerifyOptions {
        ksi::VerifyOptions {
            online: self.online,
            publication: self.reference.clone(),
            publications_file: self.publications_file.clone(),
            input_file: self.file.clone(),
            input_imprint: self.imprint.clone(),
        }
    }
}

#[derive(Args, Debug)]
pub struct ExtendArgs {
    /// Signature file (`-` for standard input)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,

    /// Output file (`-` for standard output)
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,

    /// Publication time to extend to, in seconds since the Unix epoch
    #[arg(short = 'T', long = "time")]
    pub time: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum PubfileCommand {
    /// Download (or read) and authenticate the publications file
    Verify {
        /// Local publications file instead of the configured URL
        #[arg(short = 'i', long = "input")]
        input: Option<PathBuf>,
    },
}
