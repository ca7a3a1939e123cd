//! REST client for the index backend.
//!
//! Three endpoints back the payment flows: `/addfile` and `/vote` answer a
//! submission with a [`PaymentQuote`], and `/validatecid` gates the upload
//! form. The [`IndexApi`] trait is the seam the workflow is written against;
//! [`HttpIndexApi`] is the reqwest implementation.

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::debug;
use url::Url;

use crate::error::{ClientError, ClientResult};
use crate::types::{PaymentQuote, UploadRequest, ValidationResult, VoteRequest};

/// Backend operations used by the payment workflow.
#[async_trait]
pub trait IndexApi {
    /// Validate a CID and report its binary length.
    async fn validate_cid(&self, cid: &str) -> ClientResult<ValidationResult>;

    /// Submit a file descriptor and receive a payment quote.
    async fn submit_file(&self, request: &UploadRequest) -> ClientResult<PaymentQuote>;

    /// Submit a vote and receive a payment quote.
    async fn submit_vote(&self, request: &VoteRequest) -> ClientResult<PaymentQuote>;
}

/// [`IndexApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpIndexApi {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpIndexApi {
    /// Create a client for the index at `base_url`.
    pub fn new(base_url: Url) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing reqwest client.
    pub fn with_client(client: reqwest::Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    fn endpoint(&self, path: &str) -> ClientResult<Url> {
        Ok(self.base_url.join(path)?)
    }
}

/// Map a non-success vote response to the user-facing error. A 403 means the
/// target transaction is still unconfirmed and gets its own message; a 404
/// means the target is unknown to the index; everything else is generic.
fn vote_submit_error(status: StatusCode) -> ClientError {
    match status {
        StatusCode::FORBIDDEN => ClientError::VoteForbidden,
        StatusCode::NOT_FOUND => ClientError::FileNotFound,
        status => ClientError::SubmissionFailed {
            status: status.as_u16(),
        },
    }
}

#[async_trait]
impl IndexApi for HttpIndexApi {
    async fn validate_cid(&self, cid: &str) -> ClientResult<ValidationResult> {
        let response = self
            .client
            .post(self.endpoint("validatecid")?)
            .json(&serde_json::json!({ "cid": cid }))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ClientError::SubmissionFailed {
                status: response.status().as_u16(),
            });
        }
        Ok(response.json().await?)
    }

    async fn submit_file(&self, request: &UploadRequest) -> ClientResult<PaymentQuote> {
        let response = self
            .client
            .post(self.endpoint("addfile")?)
            .json(request)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ClientError::SubmissionFailed {
                status: response.status().as_u16(),
            });
        }
        let quote: PaymentQuote = response.json().await?;
        debug!(
            address = %quote.payment_address,
            amount = quote.amount_to_pay,
            "received payment quote for file submission"
        );
        Ok(quote)
    }

    async fn submit_vote(&self, request: &VoteRequest) -> ClientResult<PaymentQuote> {
        let response = self
            .client
            .post(self.endpoint("vote")?)
            .json(request)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(vote_submit_error(status));
        }
        let quote: PaymentQuote = response.json().await?;
        debug!(
            address = %quote.payment_address,
            amount = quote.amount_to_pay,
            upvote = request.upvote,
            "received payment quote for vote"
        );
        Ok(quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vote_status_mapping() {
        assert!(matches!(
            vote_submit_error(StatusCode::FORBIDDEN),
            ClientError::VoteForbidden
        ));
        assert!(matches!(
            vote_submit_error(StatusCode::NOT_FOUND),
            ClientError::FileNotFound
        ));
        assert!(matches!(
            vote_submit_error(StatusCode::INTERNAL_SERVER_ERROR),
            ClientError::SubmissionFailed { status: 500 }
        ));
        assert!(matches!(
            vote_submit_error(StatusCode::BAD_REQUEST),
            ClientError::SubmissionFailed { status: 400 }
        ));
    }

    #[test]
    fn test_endpoint_joining() {
        let api = HttpIndexApi::new(Url::parse("http://localhost:8080").unwrap());
        assert_eq!(
            api.endpoint("addfile").unwrap().as_str(),
            "http://localhost:8080/addfile"
        );
    }
}
