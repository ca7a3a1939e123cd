//! cashindex
//!
//! Terminal front end for the cashindex payment workflow: submit a file
//! descriptor or a vote to the index, pay the quoted amount, and wait for
//! the payment confirmation push.

mod config;
mod view;

use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use cashindex_client::{
    FlowOutcome, HttpIndexApi, IndexApi, PaymentWorkflow, Submission, UploadForm, VoteForm,
    WsConfirmationChannel,
};

use crate::config::ClientConfig;
use crate::view::TerminalView;

#[derive(Parser)]
#[command(name = "cashindex", about = "Submit paid entries to the content index")]
struct Cli {
    /// Index server base URL (overrides CASHINDEX_URL).
    #[arg(long, global = true)]
    server: Option<url::Url>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a new file descriptor and pay for it.
    Upload(UploadArgs),
    /// Submit an upvote or downvote with an optional comment.
    Vote(VoteArgs),
}

#[derive(Args)]
struct UploadArgs {
    /// Content identifier to index.
    cid: String,
    /// Description shown on the index.
    description: String,
    /// Category for the entry.
    #[arg(long)]
    category: Option<String>,
}

#[derive(Args)]
struct VoteArgs {
    /// Transaction id of the entry to vote on.
    txid: String,
    /// Comment to attach to the vote.
    #[arg(long, default_value = "")]
    comment: String,
    /// Cast a downvote instead of an upvote.
    #[arg(long)]
    downvote: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cashindex_cli=info,cashindex_client=info".into()),
        )
        .init();

    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = ClientConfig::from_env()?;
    if let Some(server) = cli.server {
        config.ws_url = config::derive_ws_url(&server)?;
        config.server_url = server;
    }
    info!("index server: {}", config.server_url);

    let api = HttpIndexApi::new(config.server_url.clone());

    let submission = match cli.command {
        Commands::Upload(args) => {
            let mut form = UploadForm::new();
            form.cid = args.cid;
            form.description = args.description;
            form.category = args.category;

            let validation = api
                .validate_cid(&form.cid)
                .await
                .context("CID validation request failed")?;
            form.apply_validation(validation);
            if !form.cid_valid() {
                bail!("invalid CID: {}", form.cid);
            }
            if !form.submit_enabled() {
                bail!("{} characters remaining", form.remaining());
            }
            info!("{} characters remaining", form.remaining());
            Submission::Upload(form.to_request())
        }
        Commands::Vote(args) => {
            let mut form = VoteForm::new(args.txid, !args.downvote);
            form.comment = args.comment;
            if !form.submit_enabled() {
                bail!("{} characters remaining", form.remaining());
            }
            Submission::Vote(form.to_request())
        }
    };

    let channel = WsConfirmationChannel::new(config.ws_url.clone());
    let view = TerminalView::new(config.network);
    let mut workflow = PaymentWorkflow::new(api, channel, view);
    if config.await_timeout_secs > 0 {
        workflow = workflow.with_await_timeout(Duration::from_secs(config.await_timeout_secs));
    }

    match workflow.run(submission).await? {
        FlowOutcome::Confirmed { redirect } => {
            if let Some(redirect) = redirect {
                let target = config
                    .server_url
                    .join(redirect.trim_start_matches('/'))
                    .context("building the entry URL")?;
                println!("View your entry at {}", target);
            }
            Ok(())
        }
        FlowOutcome::TimedOut => {
            bail!("timed out waiting for the payment confirmation; run again to request a new quote")
        }
    }
}
