//! # cashindex-client
//!
//! Client workflow for a decentralized content index paid with Bitcoin Cash
//! micropayments. Submitting a file descriptor or an upvote/downvote comment
//! costs a small payment; this crate implements the client side of that flow:
//!
//! 1. **Submit**: post the upload or vote request to the index backend
//! 2. **Quote**: the backend answers with a payment address and amount
//! 3. **Prompt**: display the address and amount, render a QR code
//! 4. **Confirm**: open a websocket, announce the address, wait for the
//!    server's payment notification
//! 5. **Done**: reveal the success view and redirect to the new entry
//!
//! The upload and vote flows share this shape, so a single
//! [`PaymentWorkflow`] drives both, parameterized by the [`Submission`] kind
//! and by a [`FlowView`] that owns the actual presentation (panels, QR
//! display, confirmation cue).
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use cashindex_client::{
//!     HttpIndexApi, PaymentWorkflow, Submission, UploadRequest, WsConfirmationChannel,
//! };
//!
//! let api = HttpIndexApi::new("http://localhost:8080".parse()?);
//! let channel = WsConfirmationChannel::new("ws://localhost:8080/ws".parse()?);
//! let mut workflow = PaymentWorkflow::new(api, channel, view);
//!
//! let outcome = workflow
//!     .run(Submission::Upload(UploadRequest {
//!         cid: "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG".into(),
//!         description: "A very good file".into(),
//!         category: None,
//!     }))
//!     .await?;
//! ```
//!
//! Submission text is carried in a size-limited on-chain output, so the
//! [`budget`] and [`form`] modules track the remaining byte budget and gate
//! the submit action before any payment is quoted.

pub mod api;
pub mod budget;
pub mod channel;
pub mod error;
pub mod flow;
pub mod form;
pub mod page;
pub mod qr;
pub mod types;
pub mod workflow;

pub use api::{HttpIndexApi, IndexApi};
pub use budget::{encoded_len, COMMENT_BUDGET, UPLOAD_BUDGET};
pub use channel::{ConfirmationChannel, WsConfirmationChannel};
pub use error::{ClientError, ClientResult};
pub use flow::{FlowError, FlowState, PaymentFlow};
pub use form::{UploadForm, VoteForm};
pub use page::PageContext;
pub use qr::payment_uri;
pub use types::{
    Network, PaymentConfirmation, PaymentQuote, UploadRequest, ValidationResult, VoteRequest,
};
pub use workflow::{FlowOutcome, FlowView, PaymentWorkflow, Submission};

#[cfg(feature = "qrcode")]
pub use qr::{generate_data_uri, generate_qr, QrFormat, QrOptions};

/// One BCH in satoshis.
pub const SATOSHIS_PER_BCH: u64 = 100_000_000;

/// Convert BCH to satoshis.
#[inline]
pub fn bch_to_satoshis(bch: f64) -> u64 {
    (bch * SATOSHIS_PER_BCH as f64).round() as u64
}

/// Convert satoshis to BCH.
#[inline]
pub fn satoshis_to_bch(sats: u64) -> f64 {
    sats as f64 / SATOSHIS_PER_BCH as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_satoshi_conversion() {
        assert_eq!(bch_to_satoshis(1.0), SATOSHIS_PER_BCH);
        assert_eq!(bch_to_satoshis(0.001), 100_000);
        assert_eq!(satoshis_to_bch(100_000), 0.001);
    }
}
