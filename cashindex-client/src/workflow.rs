//! The factored submit -> quote -> await-confirmation workflow.
//!
//! The upload and vote modals run the same sequence, so one
//! [`PaymentWorkflow`] drives both, parameterized by the [`Submission`] kind
//! and by a [`FlowView`] that owns the presentation (panels, QR display,
//! confirmation cue).

use std::time::Duration;

use tracing::{info, warn};

use crate::api::IndexApi;
use crate::channel::ConfirmationChannel;
use crate::error::ClientResult;
use crate::flow::{FlowState, PaymentFlow};
use crate::types::{PaymentConfirmation, PaymentQuote, UploadRequest, VoteRequest};

/// A submission to pay for.
#[derive(Debug, Clone)]
pub enum Submission {
    /// New file descriptor for the index.
    Upload(UploadRequest),
    /// Upvote/downvote with optional comment.
    Vote(VoteRequest),
}

/// View-layer surface the workflow drives.
///
/// In a browser this maps to panel visibility toggles, the QR widget and an
/// audio cue; the terminal front end prints sections and rings the bell.
pub trait FlowView {
    /// A quote arrived: hide the form, show the payment panel and QR code.
    fn payment_requested(&mut self, quote: &PaymentQuote);

    /// Payment was detected: show the success panel and play the cue.
    fn payment_received(&mut self, confirmation: &PaymentConfirmation);

    /// The modal was reset: restore the form and clear the QR display.
    fn reset(&mut self);
}

/// Outcome of a completed workflow run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowOutcome {
    /// Payment confirmed. The redirect target is present when the server
    /// reported the resulting txid.
    Confirmed { redirect: Option<String> },
    /// The optional await timeout expired; state was reset so the caller can
    /// request a fresh quote.
    TimedOut,
}

/// Drives one submission modal end to end.
pub struct PaymentWorkflow<A, C, V> {
    api: A,
    channel: C,
    view: V,
    flow: PaymentFlow,
    await_timeout: Option<Duration>,
}

impl<A, C, V> PaymentWorkflow<A, C, V>
where
    A: IndexApi,
    C: ConfirmationChannel,
    V: FlowView,
{
    pub fn new(api: A, channel: C, view: V) -> Self {
        Self {
            api,
            channel,
            view,
            flow: PaymentFlow::new(),
            await_timeout: None,
        }
    }

    /// Give up waiting for a confirmation after `timeout`.
    ///
    /// Unset by default, in which case the workflow waits forever. Setting it
    /// gives the caller a recovery path when the server push never arrives.
    pub fn with_await_timeout(mut self, timeout: Duration) -> Self {
        self.await_timeout = Some(timeout);
        self
    }

    pub fn state(&self) -> FlowState {
        self.flow.state()
    }

    /// Detail-page path for the confirmed submission, if any.
    pub fn redirect_target(&self) -> Option<String> {
        self.flow.redirect_target()
    }

    /// Submit, await the payment confirmation, and report the outcome.
    ///
    /// On submission failure the flow stays in `Idle` and the error is
    /// returned for the view layer to alert on; nothing is retried.
    pub async fn run(&mut self, submission: Submission) -> ClientResult<FlowOutcome> {
        let quote = match &submission {
            Submission::Upload(request) => self.api.submit_file(request).await?,
            Submission::Vote(request) => self.api.submit_vote(request).await?,
        };
        self.flow.begin(quote.clone())?;
        self.view.payment_requested(&quote);
        info!(
            address = %quote.payment_address,
            amount = quote.amount_to_pay,
            "awaiting payment"
        );

        self.channel.subscribe(&quote.payment_address).await?;

        let confirmation = match self.await_timeout {
            Some(timeout) => {
                match tokio::time::timeout(timeout, self.channel.next_confirmation()).await {
                    Ok(result) => result?,
                    Err(_) => {
                        warn!(
                            timeout_secs = timeout.as_secs(),
                            "gave up waiting for payment confirmation"
                        );
                        self.channel.close().await?;
                        self.flow.reset();
                        self.view.reset();
                        return Ok(FlowOutcome::TimedOut);
                    }
                }
            }
            None => self.channel.next_confirmation().await?,
        };

        self.flow.confirm(confirmation.clone());
        self.view.payment_received(&confirmation);
        self.channel.close().await?;
        info!(txid = ?confirmation.txid, "payment confirmed");

        Ok(FlowOutcome::Confirmed {
            redirect: self.flow.redirect_target(),
        })
    }

    /// Dismiss the modal: close any open channel and clear all state.
    ///
    /// The channel is closed even mid-wait, so an abandoned payment does not
    /// leave a live socket behind.
    pub async fn dismiss(&mut self) -> ClientResult<()> {
        self.channel.close().await?;
        self.flow.reset();
        self.view.reset();
        Ok(())
    }
}
