// crates/trustnet-cli/src/commands/sign.rs
//
// `trustnet sign` and `trustnet verify`.
//
// `sign --request <kind>` builds the same message the daemon checks for the
// signed methods and prints an `auth` object ready to paste into params.

use clap::{Args, ValueEnum};
use serde::Serialize;

use trustnet_core::crypto::{self, Keypair};
use trustnet_rpc::handlers::auth::{self, SignedRequest};

use super::wallet;
use crate::output::{format_json, OutputFormat};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RequestKind {
    Document,
    Financial,
    TrustScore,
}

#[derive(Debug, Args)]
pub struct SignArgs {
    /// Sign an arbitrary message.
    #[arg(long, conflicts_with = "request")]
    pub message: Option<String>,

    /// Sign the message for a signed RPC method.
    #[arg(long, value_enum)]
    pub request: Option<RequestKind>,

    /// Timestamp to embed; defaults to the current unix time.
    #[arg(long)]
    pub timestamp: Option<String>,

    /// Uploaded file name, for `--request document`.
    #[arg(long)]
    pub file_name: Option<String>,
}

#[derive(Debug, Args)]
pub struct VerifyArgs {
    #[arg(long)]
    pub message: String,
    #[arg(long)]
    pub signature: String,
    #[arg(long)]
    pub address: String,
}

#[derive(Serialize)]
struct VerifyOutput<'a> {
    valid: bool,
    address: &'a str,
}

pub fn run_sign(args: &SignArgs) -> Result<(), Box<dyn std::error::Error>> {
    let keypair = wallet::load_keypair()?;
    match (&args.message, args.request) {
        (Some(message), _) => println!("{}", keypair.sign(message)?),
        (None, Some(kind)) => {
            let timestamp = args
                .timestamp
                .clone()
                .unwrap_or_else(|| chrono::Utc::now().timestamp().to_string());
            let signed = sign_request(&keypair, kind, timestamp, args.file_name.as_deref())?;
            println!("{}", format_json(&signed));
        }
        (None, None) => return Err("Pass --message or --request".into()),
    }
    Ok(())
}

pub fn run_verify(
    args: &VerifyArgs,
    format: &OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let valid = crypto::verify_signature(&args.message, &args.signature, &args.address);
    match format {
        OutputFormat::Json => println!(
            "{}",
            format_json(&VerifyOutput {
                valid,
                address: &args.address,
            })
        ),
        OutputFormat::Table => println!("{}", if valid { "valid" } else { "invalid" }),
    }
    Ok(())
}

fn request_message(
    kind: RequestKind,
    timestamp: &str,
    address: &str,
    file_name: Option<&str>,
) -> Result<String, Box<dyn std::error::Error>> {
    Ok(match kind {
        RequestKind::Document => {
            let file_name = file_name.ok_or("--file-name is required for document requests")?;
            auth::document_message(timestamp, file_name)
        }
        RequestKind::Financial => auth::financial_message(timestamp, address),
        RequestKind::TrustScore => auth::trust_score_message(timestamp, address),
    })
}

fn sign_request(
    keypair: &Keypair,
    kind: RequestKind,
    timestamp: String,
    file_name: Option<&str>,
) -> Result<SignedRequest, Box<dyn std::error::Error>> {
    let address = keypair.address();
    let message = request_message(kind, &timestamp, &address, file_name)?;
    Ok(SignedRequest {
        signature: keypair.sign(&message)?,
        address,
        timestamp,
    })
}
