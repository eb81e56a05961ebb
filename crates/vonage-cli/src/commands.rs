//! Command implementations
//!
//! Each command returns its stdout text so it can be exercised without a
//! process boundary.

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::DateTime;
use secrecy::ExposeSecret;
use serde_json::json;
use tracing::debug;
use vonage::auth::jwt::DEFAULT_TTL;
use vonage::auth::{Generator, Params, RequestSigner, Settings, SignMethod};
use vonage::ncco::{Connect, Ncco, PhoneEndpoint, Talk};

use crate::cli::{
    Cli, Commands, ConnectArgs, Encoding, JwtCommands, JwtGenerateArgs, NccoCommands, ParamArgs,
    SignArgs, SignerArgs, TalkArgs, VerifyArgs,
};
use crate::error::{CliError, CliResult};

/// Result of a successful command run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Text for stdout
    pub text: String,
    /// Whether the process should exit successfully
    pub success: bool,
}

impl CommandOutput {
    fn ok(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            success: true,
        }
    }
}

/// Run the parsed command line
///
/// # Errors
///
/// Returns an error if settings cannot be loaded or the command fails.
pub fn execute(cli: &Cli) -> CliResult<CommandOutput> {
    let settings = Settings::load(cli.config.as_deref())?;

    match &cli.command {
        Commands::Jwt(JwtCommands::Generate(args)) => jwt_generate(args, &settings),
        Commands::Sign(args) => sign(args, &settings),
        Commands::Verify(args) => verify(args, &settings),
        Commands::Ncco(NccoCommands::Talk(args)) => ncco_talk(args),
        Commands::Ncco(NccoCommands::Connect(args)) => ncco_connect(args),
    }
}

/// `jwt generate`
///
/// # Errors
///
/// Returns an error if the application ID or key is missing, or generation fails.
pub fn jwt_generate(args: &JwtGenerateArgs, settings: &Settings) -> CliResult<CommandOutput> {
    let application = settings.application.as_ref();

    let application_id = args
        .application_id
        .clone()
        .or_else(|| application.and_then(|a| a.id.clone()))
        .ok_or(CliError::MissingArgument {
            flag: "--application-id",
            setting: "application.id",
        })?;
    let key_path = args
        .private_key_file
        .clone()
        .or_else(|| application.and_then(|a| a.private_key_path.clone()))
        .ok_or(CliError::MissingArgument {
            flag: "--private-key-file",
            setting: "application.private_key_path",
        })?;
    let ttl = args
        .ttl_minutes
        .map(|minutes| Duration::from_secs(minutes.saturating_mul(60)))
        .or_else(|| application.map(|a| Duration::from_secs(a.token_ttl_secs)))
        .unwrap_or(DEFAULT_TTL);
    let paths = if args.paths.is_empty() {
        application.map(|a| a.acl_paths.clone()).unwrap_or_default()
    } else {
        args.paths.clone()
    };

    let mut generator = Generator::from_key_file(application_id, &key_path)?
        .with_ttl(ttl)
        .with_paths(paths);
    if let Some(subject) = args
        .subject
        .clone()
        .or_else(|| application.and_then(|a| a.subject.clone()))
    {
        generator = generator.with_subject(subject);
    }
    if let Some(jti) = &args.jti {
        generator = generator.with_jti(jti.as_str());
    }
    if let Some(nbf) = args.nbf {
        let nbf = DateTime::from_timestamp(nbf, 0)
            .ok_or_else(|| CliError::InvalidArguments(format!("--nbf {nbf} is out of range")))?;
        generator = generator.with_nbf(nbf);
    }

    let token = generator.generate()?;
    if args.claims {
        let rendered = json!({
            "token": token.as_str(),
            "header": token.header(),
            "claims": token.claims(),
        });
        return Ok(CommandOutput::ok(serde_json::to_string_pretty(&rendered)?));
    }
    Ok(CommandOutput::ok(token.into_string()))
}

/// `sign`
///
/// # Errors
///
/// Returns an error if the signer is not configured or a parameter is malformed.
pub fn sign(args: &SignArgs, settings: &Settings) -> CliResult<CommandOutput> {
    let signer = resolve_signer(&args.signer, settings)?;
    let mut params = collect_params(&args.input)?;

    if args.signed_query {
        signer.sign_params(&mut params)?;
        return Ok(CommandOutput::ok(params.to_query()));
    }

    let signature = signer.sign(&params)?;
    let text = match args.encoding {
        Encoding::Hex => hex::encode(&signature),
        Encoding::Base64 => STANDARD.encode(&signature),
    };
    Ok(CommandOutput::ok(text))
}

/// `verify`; an invalid signature is reported with `success: false`
///
/// # Errors
///
/// Returns an error if the signer is not configured, or `sig` is missing or
/// not hex.
pub fn verify(args: &VerifyArgs, settings: &Settings) -> CliResult<CommandOutput> {
    let signer = resolve_signer(&args.signer, settings)?;
    let params = collect_params(&args.input)?;

    let valid = signer.verify(&params)?;
    Ok(CommandOutput {
        text: if valid { "valid" } else { "invalid" }.to_string(),
        success: valid,
    })
}

/// `ncco talk`
///
/// # Errors
///
/// Returns an error if JSON rendering fails.
pub fn ncco_talk(args: &TalkArgs) -> CliResult<CommandOutput> {
    let mut talk = Talk::new(args.text.as_str()).with_barge_in(args.barge_in);
    if let Some(loop_count) = &args.loop_count {
        talk = talk.with_loop(loop_count.as_str());
    }
    if let Some(voice_name) = &args.voice_name {
        talk = talk.with_voice_name(voice_name.as_str());
    }
    render(&Ncco::new().with_action(talk), args.pretty)
}

/// `ncco connect`
///
/// # Errors
///
/// Returns an error if JSON rendering fails.
pub fn ncco_connect(args: &ConnectArgs) -> CliResult<CommandOutput> {
    let mut connect = Connect::new(PhoneEndpoint::new(args.number.as_str()));
    if let Some(from) = &args.from {
        connect = connect.with_from(from.as_str());
    }
    if let Some(timeout) = args.timeout {
        connect = connect.with_timeout(timeout);
    }
    render(&Ncco::new().with_action(connect), args.pretty)
}

fn render(ncco: &Ncco, pretty: bool) -> CliResult<CommandOutput> {
    let json = if pretty {
        ncco.to_json_pretty()?
    } else {
        ncco.to_json()?
    };
    Ok(CommandOutput::ok(json))
}

fn resolve_signer(args: &SignerArgs, settings: &Settings) -> CliResult<RequestSigner> {
    let signature = settings.signature.as_ref();

    let method: SignMethod = match (&args.method, signature) {
        (Some(method), _) => method.parse()?,
        (None, Some(signature)) => signature.method.parse()?,
        (None, None) => SignMethod::Md5Hash,
    };
    let secret = args
        .secret
        .clone()
        .or_else(|| {
            signature
                .and_then(|s| s.secret.as_ref())
                .map(|secret| secret.expose_secret().clone())
        })
        .ok_or(CliError::MissingArgument {
            flag: "--secret",
            setting: "signature.secret",
        })?;
    debug!(%method, "Resolved request signer");
    Ok(RequestSigner::new(method, secret))
}

/// Parse `--query` then `--param` values; later values win.
///
/// # Errors
///
/// Returns [`CliError::InvalidArguments`] for a `--param` without `=` or
/// with an empty name.
pub fn collect_params(args: &ParamArgs) -> CliResult<Params> {
    let mut params = args
        .query
        .as_deref()
        .map(Params::from_query)
        .unwrap_or_default();

    for raw in &args.params {
        let (name, value) = raw
            .split_once('=')
            .ok_or_else(|| CliError::InvalidArguments(format!("expected NAME=VALUE, got {raw:?}")))?;
        if name.is_empty() {
            return Err(CliError::InvalidArguments(format!("empty parameter name in {raw:?}")));
        }
        params.insert(name, value);
    }
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vonage::auth::ParamValue;

    #[test]
    fn test_collect_params_keeps_equals_in_value() {
        let args = ParamArgs {
            params: vec!["text=a=b".to_string()],
            query: None,
        };
        let params = collect_params(&args).unwrap();
        assert_eq!(params.get("text"), Some(&ParamValue::from("a=b")));
    }

    #[test]
    fn test_collect_params_query_then_params() {
        let args = ParamArgs {
            params: vec!["to=2".to_string()],
            query: Some("?to=1&from=NEXMO".to_string()),
        };
        let params = collect_params(&args).unwrap();
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("to"), Some(&ParamValue::from("2")));
    }

    #[test]
    fn test_resolve_signer_defaults_to_md5hash() {
        let args = SignerArgs {
            method: None,
            secret: Some("secret".to_string()),
        };
        let signer = resolve_signer(&args, &Settings::default()).unwrap();
        assert_eq!(signer.method(), SignMethod::Md5Hash);
    }
}
