//! Form state for the upload and vote modals.
//!
//! Each form owns its validation and budget state, recomputed on every edit
//! and handed to the workflow on submit.

use crate::budget::{category_annotation, encoded_len, COMMENT_BUDGET, UPLOAD_BUDGET};
use crate::types::{UploadRequest, ValidationResult, VoteRequest};

/// State of the upload modal.
#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    /// Content identifier, as typed.
    pub cid: String,
    /// Description, as typed.
    pub description: String,
    /// Selected category, if any.
    pub category: Option<String>,
    cid_valid: bool,
    cid_length: usize,
}

impl UploadForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the result of a server-side CID validation.
    ///
    /// Callers that fail to reach the validation endpoint skip this call
    /// entirely, leaving the previous valid/length state in place; the user
    /// retries by re-editing the field.
    pub fn apply_validation(&mut self, result: ValidationResult) {
        self.cid_valid = result.valid;
        if result.valid {
            self.cid_length = result.length;
        }
    }

    /// Whether the last validation reported the CID as valid.
    pub fn cid_valid(&self) -> bool {
        self.cid_valid
    }

    /// Binary CID length reported by the last successful validation.
    pub fn cid_length(&self) -> usize {
        self.cid_length
    }

    /// Encoded length of the description plus the category annotation.
    pub fn content_len(&self) -> usize {
        let mut len = encoded_len(&self.description);
        if let Some(ref category) = self.category {
            len += encoded_len(&category_annotation(category));
        }
        len
    }

    /// Remaining byte budget; negative when the form is over budget.
    pub fn remaining(&self) -> i64 {
        UPLOAD_BUDGET as i64 - self.cid_length as i64 - self.content_len() as i64
    }

    /// Submission is enabled only for a valid CID, a non-empty description
    /// and a non-negative remaining budget.
    pub fn submit_enabled(&self) -> bool {
        self.cid_valid && !self.description.is_empty() && self.remaining() >= 0
    }

    /// Build the request body for the current form contents.
    pub fn to_request(&self) -> UploadRequest {
        UploadRequest {
            cid: self.cid.clone(),
            description: self.description.clone(),
            category: self.category.clone(),
        }
    }

    /// Clear all fields and validation state, as when the modal is reopened.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// State of the vote modal.
#[derive(Debug, Clone)]
pub struct VoteForm {
    /// Transaction id of the entry being voted on.
    pub txid: String,
    /// Comment, as typed.
    pub comment: String,
    /// Upvote when true, downvote when false.
    pub upvote: bool,
}

impl VoteForm {
    pub fn new(txid: impl Into<String>, upvote: bool) -> Self {
        Self {
            txid: txid.into(),
            comment: String::new(),
            upvote,
        }
    }

    /// Remaining comment budget; negative when over budget.
    pub fn remaining(&self) -> i64 {
        COMMENT_BUDGET as i64 - encoded_len(&self.comment) as i64
    }

    /// Votes need no comment; submission is gated on the budget alone.
    pub fn submit_enabled(&self) -> bool {
        self.remaining() >= 0
    }

    /// Build the request body for the current form contents.
    pub fn to_request(&self) -> VoteRequest {
        VoteRequest {
            txid: self.txid.clone(),
            comment: self.comment.clone(),
            upvote: self.upvote,
        }
    }

    /// Clear the comment, as when the modal is reopened. The target txid is
    /// part of the page, not the form, so it stays.
    pub fn clear(&mut self) {
        self.comment.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::UPLOAD_BUDGET;

    fn valid_cid(length: usize) -> ValidationResult {
        ValidationResult {
            valid: true,
            length,
        }
    }

    #[test]
    fn test_upload_gating() {
        let mut form = UploadForm::new();
        form.cid = "QmTest".into();
        form.description = "A very good file".into();

        // No successful validation yet.
        assert!(!form.submit_enabled());

        form.apply_validation(valid_cid(34));
        assert!(form.submit_enabled());
        assert_eq!(form.remaining(), (UPLOAD_BUDGET - 34 - 16) as i64);

        // Empty description disables submission even with a valid CID.
        form.description.clear();
        assert!(!form.submit_enabled());
    }

    #[test]
    fn test_upload_over_budget() {
        let mut form = UploadForm::new();
        form.cid = "QmTest".into();
        form.apply_validation(valid_cid(34));
        form.description = "x".repeat(UPLOAD_BUDGET - 34);
        assert_eq!(form.remaining(), 0);
        assert!(form.submit_enabled());

        form.description.push('x');
        assert_eq!(form.remaining(), -1);
        assert!(!form.submit_enabled());
    }

    #[test]
    fn test_category_annotation_counts_against_budget() {
        let mut form = UploadForm::new();
        form.cid = "QmTest".into();
        form.apply_validation(valid_cid(34));
        form.description = "desc".into();
        let without = form.remaining();

        form.category = Some("Video".into());
        // `<meta name="category" content="Video"/>` is 39 bytes.
        assert_eq!(form.remaining(), without - 39);
    }

    #[test]
    fn test_failed_validation_keeps_previous_state() {
        let mut form = UploadForm::new();
        form.cid = "QmTest".into();
        form.description = "desc".into();
        form.apply_validation(valid_cid(34));
        assert!(form.submit_enabled());

        // An invalid edit flips validity but keeps the reported length.
        form.apply_validation(ValidationResult {
            valid: false,
            length: 0,
        });
        assert!(!form.submit_enabled());
        assert_eq!(form.cid_length(), 34);
    }

    #[test]
    fn test_upload_clear_resets_everything() {
        let mut form = UploadForm::new();
        form.cid = "QmTest".into();
        form.description = "desc".into();
        form.category = Some("Video".into());
        form.apply_validation(valid_cid(34));

        form.clear();
        assert!(form.cid.is_empty());
        assert!(form.description.is_empty());
        assert!(form.category.is_none());
        assert!(!form.cid_valid());
        assert_eq!(form.cid_length(), 0);
        assert_eq!(form.remaining(), UPLOAD_BUDGET as i64);
    }

    #[test]
    fn test_vote_budget() {
        let mut form = VoteForm::new("abc123", true);
        assert_eq!(form.remaining(), COMMENT_BUDGET as i64);
        assert!(form.submit_enabled());

        form.comment = "x".repeat(COMMENT_BUDGET);
        assert!(form.submit_enabled());

        form.comment.push('x');
        assert!(!form.submit_enabled());

        form.clear();
        assert!(form.comment.is_empty());
        assert_eq!(form.txid, "abc123");
    }
}
