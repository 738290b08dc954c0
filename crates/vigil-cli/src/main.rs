//! vigil: deterministic rule-based risk auditor.
//!
//! Emits exactly one JSON envelope on stdout per invocation:
//! `{"ok": true, "data": <report>}` on success (exit 0), or
//! `{"ok": false, "error": <message>, "details": {"code": <code>}}` on
//! failure (exit 1). All logging goes to stderr.

mod demo;
mod params;

use std::io::Read;
use std::path::Path;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use serde_json::json;

use vigil_analysis::run_audit;
use vigil_core::errors::error_code::VigilErrorCode;
use vigil_core::{AuditError, AuditOptions, DocumentKind, DocumentSource, InputError, Report, VigilConfig};

#[derive(Parser)]
#[command(name = "vigil", version, about = "Rule-based risk auditing for infrastructure changes")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Audit a Terraform plan for risky infrastructure changes
    Terraform(RunArgs),
    /// Audit Kubernetes manifests for workload security issues
    Kubernetes(RunArgs),
    /// Audit a token contract's on-chain attributes for scam signatures
    Token(RunArgs),
}

#[derive(Args)]
struct RunArgs {
    /// Audit a built-in demonstration document instead of real input
    #[arg(long, conflicts_with = "params")]
    demo: bool,

    /// Parameters as a JSON object; read from stdin when omitted
    #[arg(long, value_name = "JSON")]
    params: Option<String>,
}

fn main() -> ExitCode {
    vigil_core::tracing::init_tracing();
    let cli = Cli::parse();

    let (kind, args) = match &cli.command {
        Command::Terraform(args) => (DocumentKind::TerraformPlan, args),
        Command::Kubernetes(args) => (DocumentKind::KubernetesManifest, args),
        Command::Token(args) => (DocumentKind::TokenContract, args),
    };

    match run(kind, args) {
        Ok(report) => {
            println!("{}", json!({ "ok": true, "data": report }));
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(code = err.error_code(), "audit failed: {err}");
            println!(
                "{}",
                json!({
                    "ok": false,
                    "error": err.to_string(),
                    "details": { "code": err.error_code() }
                })
            );
            ExitCode::FAILURE
        }
    }
}

fn run(kind: DocumentKind, args: &RunArgs) -> Result<Report, AuditError> {
    // The demo is self-contained: it skips the project config layer so it
    // exits 0 regardless of working-directory state.
    if args.demo {
        let source = DocumentSource::from_inline(demo::document(kind));
        return run_audit(kind, &source, &AuditOptions::default());
    }

    let config = VigilConfig::load(Path::new("."))?;
    let raw = match &args.params {
        Some(raw) => raw.clone(),
        None => read_stdin()?,
    };
    let (source, invocation_options) = params::resolve(kind, &raw)?;
    let options = invocation_options.overlaid_on(&config.audit);
    run_audit(kind, &source, &options)
}

fn read_stdin() -> Result<String, InputError> {
    let mut raw = String::new();
    std::io::stdin()
        .read_to_string(&mut raw)
        .map_err(|source| InputError::StdinUnreadable { source })?;
    Ok(raw)
}
