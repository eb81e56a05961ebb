//! CLI argument parsing

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Main CLI application structure
#[derive(Parser, Debug)]
#[command(
    name = "vonage",
    version,
    about = "Generate application JWTs, sign and verify requests, and render NCCOs",
    long_about = "Command-line companion to the Vonage Rust SDK.\n\
                  Flags not given on the command line fall back to the settings file\n\
                  (--config) and VONAGE__* environment variables, e.g.\n\
                  VONAGE__APPLICATION__ID or VONAGE__SIGNATURE__SECRET."
)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Settings file (TOML)
    #[arg(long, short = 'c', global = true, env = "VONAGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Application JWT operations
    #[command(subcommand)]
    Jwt(JwtCommands),

    /// Compute the signature of request parameters
    Sign(SignArgs),

    /// Check the `sig` of webhook parameters (exit code 1 when invalid)
    Verify(VerifyArgs),

    /// Render call control objects
    #[command(subcommand)]
    Ncco(NccoCommands),
}

/// JWT commands
#[derive(Subcommand, Debug)]
pub enum JwtCommands {
    /// Generate a signed application JWT
    Generate(JwtGenerateArgs),
}

/// Arguments for `jwt generate`
#[derive(Args, Debug, Clone, Default)]
pub struct JwtGenerateArgs {
    /// Application ID
    #[arg(long, short = 'a')]
    pub application_id: Option<String>,

    /// Path to the application's PEM private key
    #[arg(long, short = 'k')]
    pub private_key_file: Option<PathBuf>,

    /// Token lifetime in minutes [default: 15]
    #[arg(long, short = 't')]
    pub ttl_minutes: Option<u64>,

    /// Subject (`sub`) claim
    #[arg(long)]
    pub subject: Option<String>,

    /// ACL path; repeat for several
    #[arg(long = "path", short = 'p')]
    pub paths: Vec<String>,

    /// Fixed JWT ID (UUID)
    #[arg(long)]
    pub jti: Option<String>,

    /// Not Before, unix seconds
    #[arg(long)]
    pub nbf: Option<i64>,

    /// Print header and claims as JSON alongside the token
    #[arg(long)]
    pub claims: bool,
}

/// Signer selection shared by `sign` and `verify`
#[derive(Args, Debug, Clone, Default)]
pub struct SignerArgs {
    /// Signature method: md5hash, md5hmac, sha1hmac, sha256hmac or sha512hmac
    #[arg(long, short = 'm')]
    pub method: Option<String>,

    /// Signature secret
    #[arg(long, short = 's')]
    pub secret: Option<String>,
}

/// Parameter input shared by `sign` and `verify`
#[derive(Args, Debug, Clone, Default)]
pub struct ParamArgs {
    /// Parameter as NAME=VALUE; repeat for several
    #[arg(long = "param", short = 'P')]
    pub params: Vec<String>,

    /// URL-encoded query string, e.g. "to=447700900000&text=Hi"
    #[arg(long, short = 'q')]
    pub query: Option<String>,
}

/// Arguments for `sign`
#[derive(Args, Debug, Clone, Default)]
pub struct SignArgs {
    #[command(flatten)]
    pub signer: SignerArgs,

    #[command(flatten)]
    pub input: ParamArgs,

    /// Output encoding of the signature
    #[arg(long, short = 'e', value_enum, default_value = "hex")]
    pub encoding: Encoding,

    /// Add `timestamp` and `sig` and print the signed query string instead
    #[arg(long)]
    pub signed_query: bool,
}

/// Arguments for `verify`
#[derive(Args, Debug, Clone, Default)]
pub struct VerifyArgs {
    #[command(flatten)]
    pub signer: SignerArgs,

    #[command(flatten)]
    pub input: ParamArgs,
}

/// Signature output encoding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Encoding {
    /// Lowercase hex, as sent in `sig`
    #[default]
    Hex,
    /// Standard base64
    Base64,
}

/// NCCO commands
#[derive(Subcommand, Debug)]
pub enum NccoCommands {
    /// Single talk action
    Talk(TalkArgs),

    /// Connect to a phone number
    Connect(ConnectArgs),
}

/// Arguments for `ncco talk`
#[derive(Args, Debug, Clone, Default)]
pub struct TalkArgs {
    /// Text to read
    #[arg(long)]
    pub text: String,

    /// Repetitions; 0 loops until the call ends
    #[arg(long = "loop")]
    pub loop_count: Option<String>,

    /// Named voice
    #[arg(long)]
    pub voice_name: Option<String>,

    /// Let keypad input interrupt playback
    #[arg(long)]
    pub barge_in: bool,

    /// Indent the JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Arguments for `ncco connect`
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectArgs {
    /// Number to dial
    #[arg(long)]
    pub number: String,

    /// Caller ID
    #[arg(long)]
    pub from: Option<String>,

    /// Seconds to ring before giving up
    #[arg(long)]
    pub timeout: Option<u32>,

    /// Indent the JSON output
    #[arg(long)]
    pub pretty: bool,
}
