//! Terminal rendering of the payment-flow panels.

use cashindex_client::page::file_url;
use cashindex_client::{
    generate_qr, payment_uri, FlowView, Network, PaymentConfirmation, PaymentQuote, QrOptions,
};
use tracing::warn;

/// Renders the flow as terminal panels: a payment prompt with a scannable QR
/// code, a success panel, and the terminal bell as the confirmation cue.
pub struct TerminalView {
    network: Network,
}

impl TerminalView {
    pub fn new(network: Network) -> Self {
        Self { network }
    }
}

impl FlowView for TerminalView {
    fn payment_requested(&mut self, quote: &PaymentQuote) {
        println!();
        println!("Send {} BCH to the following address:", quote.amount_to_pay);
        println!("  {}", quote.payment_address);
        println!();
        match generate_qr(&payment_uri(quote, self.network), &QrOptions::terminal()) {
            Ok(art) => println!("{}", String::from_utf8_lossy(&art)),
            Err(e) => warn!("could not render QR code: {e}"),
        }
        println!("Waiting for payment...");
    }

    fn payment_received(&mut self, confirmation: &PaymentConfirmation) {
        // Terminal bell as the confirmation cue.
        print!("\x07");
        println!("Payment received!");
        if let Some(ref txid) = confirmation.txid {
            println!("Indexed as {}", file_url(txid));
        }
    }

    fn reset(&mut self) {
        println!("Form cleared.");
    }
}
