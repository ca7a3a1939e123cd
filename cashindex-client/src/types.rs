//! Wire types for the index backend.
//!
//! Field names follow the server's JSON exactly, so these types are drop-in
//! compatible with a running index.

use serde::{Deserialize, Serialize};

/// Bitcoin Cash network selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// Bitcoin Cash mainnet
    #[default]
    Mainnet,
    /// Bitcoin Cash testnet3
    Testnet,
    /// Regression test network
    Regtest,
}

impl Network {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Regtest => "regtest",
        }
    }

    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "mainnet" | "main" => Some(Network::Mainnet),
            "testnet" | "test" => Some(Network::Testnet),
            "regtest" | "reg" => Some(Network::Regtest),
            _ => None,
        }
    }

    /// Cashaddr URI prefix for this network.
    pub fn address_prefix(&self) -> &'static str {
        match self {
            Network::Mainnet => "bitcoincash:",
            Network::Testnet => "bchtest:",
            Network::Regtest => "bchreg:",
        }
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// File submission request (`POST /addfile`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadRequest {
    /// Content identifier of the file being indexed.
    pub cid: String,
    /// Free-text description shown on the index.
    pub description: String,
    /// Optional category, embedded into the description as an annotation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Vote submission request (`POST /vote`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteRequest {
    /// Transaction id of the index entry being voted on.
    pub txid: String,
    /// Optional comment attached to the vote.
    pub comment: String,
    /// Upvote when true, downvote when false.
    pub upvote: bool,
}

/// Payment quote issued by the backend for a pending submission.
///
/// One quote exists per submission attempt; it is discarded once payment is
/// confirmed or the modal is reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentQuote {
    /// Cashaddr address to pay.
    pub payment_address: String,
    /// Amount to pay, in BCH.
    pub amount_to_pay: f64,
}

/// Result of server-side CID validation (`POST /validatecid`).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether the CID parsed and exists.
    pub valid: bool,
    /// Binary CID length in bytes; the server omits it when invalid.
    #[serde(default)]
    pub length: usize,
}

/// Message pushed on the confirmation channel once payment is detected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentConfirmation {
    #[serde(default = "default_received")]
    pub payment_received: bool,
    /// Transaction id of the resulting index entry, when the server includes
    /// it. Retained for the post-confirmation redirect.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub txid: Option<String>,
}

fn default_received() -> bool {
    true
}

impl PaymentConfirmation {
    /// A bare confirmation with no resulting txid.
    pub fn received() -> Self {
        Self {
            payment_received: true,
            txid: None,
        }
    }

    /// Parse a raw channel payload. Any inbound message counts as a
    /// confirmation, so empty or non-JSON payloads fall back to
    /// [`PaymentConfirmation::received`].
    pub fn from_payload(payload: &str) -> Self {
        serde_json::from_str(payload).unwrap_or_else(|_| Self::received())
    }
}
