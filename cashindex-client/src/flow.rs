//! Payment flow state machine.
//!
//! `Idle -> AwaitingPayment -> Confirmed`, with `reset` returning to `Idle`
//! from any state. The machine owns the active quote and the confirmation
//! outcome, so none of it lives in shared scope.

use thiserror::Error;

use crate::page::file_url;
use crate::types::{PaymentConfirmation, PaymentQuote};

/// States of one submission modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlowState {
    /// The form is visible and editable.
    #[default]
    Idle,
    /// A quote was issued; the payment panel is up and the channel is open.
    AwaitingPayment,
    /// Payment was detected. Terminal until the modal is reset.
    Confirmed,
}

/// Transition errors.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FlowError {
    /// A quote is already pending or confirmed; reset before submitting again.
    #[error("a payment is already pending")]
    AlreadyPending,
}

/// State machine for one submission modal.
#[derive(Debug, Default)]
pub struct PaymentFlow {
    state: FlowState,
    quote: Option<PaymentQuote>,
    confirmation: Option<PaymentConfirmation>,
}

impl PaymentFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    /// The quote being paid, while one is active.
    pub fn quote(&self) -> Option<&PaymentQuote> {
        self.quote.as_ref()
    }

    /// Accept a payment quote: `Idle -> AwaitingPayment`.
    ///
    /// Rejected while a previous quote is pending or confirmed, which is what
    /// prevents a second confirmation channel from being opened for the same
    /// modal.
    pub fn begin(&mut self, quote: PaymentQuote) -> Result<(), FlowError> {
        if self.state != FlowState::Idle {
            return Err(FlowError::AlreadyPending);
        }
        self.quote = Some(quote);
        self.state = FlowState::AwaitingPayment;
        Ok(())
    }

    /// Record an inbound confirmation: `AwaitingPayment -> Confirmed`.
    ///
    /// Returns true on the first transition only. Repeated messages are
    /// no-ops, keeping the terminal state idempotent.
    pub fn confirm(&mut self, confirmation: PaymentConfirmation) -> bool {
        if self.state != FlowState::AwaitingPayment {
            return false;
        }
        self.confirmation = Some(confirmation);
        self.state = FlowState::Confirmed;
        true
    }

    /// The confirmation received, once in `Confirmed`.
    pub fn confirmation(&self) -> Option<&PaymentConfirmation> {
        self.confirmation.as_ref()
    }

    /// Detail-page path for the confirmed submission, when the server
    /// included the resulting txid. Used by the view on explicit dismissal.
    pub fn redirect_target(&self) -> Option<String> {
        match self.state {
            FlowState::Confirmed => self
                .confirmation
                .as_ref()
                .and_then(|c| c.txid.as_deref())
                .map(file_url),
            _ => None,
        }
    }

    /// Return to `Idle` from any state, discarding the quote and the
    /// confirmation, as when the modal is reopened.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote() -> PaymentQuote {
        PaymentQuote {
            payment_address: "bchtest:xyz".into(),
            amount_to_pay: 0.001,
        }
    }

    #[test]
    fn test_happy_path() {
        let mut flow = PaymentFlow::new();
        assert_eq!(flow.state(), FlowState::Idle);
        assert!(flow.quote().is_none());

        flow.begin(quote()).unwrap();
        assert_eq!(flow.state(), FlowState::AwaitingPayment);
        assert_eq!(flow.quote().unwrap().payment_address, "bchtest:xyz");

        assert!(flow.confirm(PaymentConfirmation::received()));
        assert_eq!(flow.state(), FlowState::Confirmed);
    }

    #[test]
    fn test_double_begin_rejected() {
        let mut flow = PaymentFlow::new();
        flow.begin(quote()).unwrap();
        assert_eq!(flow.begin(quote()), Err(FlowError::AlreadyPending));

        // Still rejected after confirmation, until reset.
        flow.confirm(PaymentConfirmation::received());
        assert_eq!(flow.begin(quote()), Err(FlowError::AlreadyPending));
        flow.reset();
        assert!(flow.begin(quote()).is_ok());
    }

    #[test]
    fn test_confirm_is_idempotent() {
        let mut flow = PaymentFlow::new();
        flow.begin(quote()).unwrap();

        assert!(flow.confirm(PaymentConfirmation {
            payment_received: true,
            txid: Some("abc123".into()),
        }));
        // Repeated messages do not transition again or overwrite the txid.
        assert!(!flow.confirm(PaymentConfirmation::received()));
        assert_eq!(
            flow.confirmation().unwrap().txid.as_deref(),
            Some("abc123")
        );
    }

    #[test]
    fn test_confirm_in_idle_is_ignored() {
        let mut flow = PaymentFlow::new();
        assert!(!flow.confirm(PaymentConfirmation::received()));
        assert_eq!(flow.state(), FlowState::Idle);
    }

    #[test]
    fn test_redirect_target() {
        let mut flow = PaymentFlow::new();
        flow.begin(quote()).unwrap();
        assert_eq!(flow.redirect_target(), None);

        flow.confirm(PaymentConfirmation {
            payment_received: true,
            txid: Some("abc123".into()),
        });
        assert_eq!(flow.redirect_target().as_deref(), Some("/file/abc123"));
    }

    #[test]
    fn test_reset_from_any_state() {
        let mut flow = PaymentFlow::new();
        flow.reset();
        assert_eq!(flow.state(), FlowState::Idle);

        flow.begin(quote()).unwrap();
        flow.reset();
        assert_eq!(flow.state(), FlowState::Idle);
        assert!(flow.quote().is_none());

        flow.begin(quote()).unwrap();
        flow.confirm(PaymentConfirmation {
            payment_received: true,
            txid: Some("abc123".into()),
        });
        flow.reset();
        assert_eq!(flow.state(), FlowState::Idle);
        assert!(flow.confirmation().is_none());
        assert_eq!(flow.redirect_target(), None);
    }
}
