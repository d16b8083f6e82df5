use std::sync::Arc;

use chrono::{Duration, Utc};
use serde_json::json;

use crate::api::{ApiClient, PromoteRequest};
use crate::errors::AppError;
use crate::wallet::Signer;

use super::hashing::{description_hash, vote_hash, vote_message};
use super::slug::Slug;
use super::types::*;
use super::validate;

/// Local working copy of the editable proposal fields. The slug is a
/// computed value: it tracks the title until the user overrides it, and an
/// override is never silently clobbered by later title edits.
#[derive(Debug, Clone)]
pub struct EditBuffer {
    pub title: String,
    pub description: String,
    slug: Slug,
}

impl EditBuffer {
    fn from_proposal(proposal: &Proposal) -> Self {
        EditBuffer {
            title: proposal.title.clone(),
            description: proposal.description.clone(),
            slug: Slug::from_value(&proposal.slug, &proposal.title),
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn set_slug(&mut self, slug: &str) {
        self.slug = Slug::from_value(slug, &self.title);
    }

    pub fn slug(&self) -> String {
        self.slug.value(&self.title)
    }

    fn validate(&self) -> Result<(), AppError> {
        if let Some(message) = validate::validate_title(&self.title) {
            return Err(AppError::Validation(message));
        }
        if let Some(message) = validate::validate_description(&self.description) {
            return Err(AppError::Validation(message));
        }
        if let Some(message) = validate::validate_slug(&self.slug()) {
            return Err(AppError::Validation(message));
        }
        Ok(())
    }
}

/// Drives a single proposal through its lifecycle: edit while draft, move to
/// ready with a signed description hash, promote to active with a voting
/// window, and vote while active.
///
/// Consistency discipline: after every successful mutation the controller
/// re-fetches the canonical proposal from the server instead of merging its
/// own optimistic shape. Failures surface as an inline error string and
/// leave the displayed proposal untouched.
pub struct ProposalController {
    api: ApiClient,
    signer: Arc<dyn Signer>,
    viewer: Viewer,
    proposal: Proposal,
    author: Option<UserProfile>,
    edit: Option<EditBuffer>,
    selected_vote: Option<VoteChoice>,
    has_voted: bool,
    submitting: bool,
    error: Option<String>,
}

impl ProposalController {
    /// Fetch the proposal by slug and its creator's profile. A missing or
    /// failed proposal fetch fails closed to `NotFound`; a failed profile
    /// fetch is tolerated and only logged.
    pub async fn load(
        api: ApiClient,
        signer: Arc<dyn Signer>,
        viewer: Viewer,
        slug: &str,
    ) -> Result<Self, AppError> {
        let proposal = api.get_proposal(slug).await?.ok_or(AppError::NotFound)?;

        let author = match api.get_user(&proposal.created_by).await {
            Ok(profile) => profile,
            Err(e) => {
                log::warn!("Failed to load proposal author {}: {e}", proposal.created_by);
                None
            }
        };

        Ok(ProposalController {
            api,
            signer,
            viewer,
            proposal,
            author,
            edit: None,
            selected_vote: None,
            has_voted: false,
            submitting: false,
            error: None,
        })
    }

    pub fn proposal(&self) -> &Proposal {
        &self.proposal
    }

    pub fn author(&self) -> Option<&UserProfile> {
        self.author.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn has_voted(&self) -> bool {
        self.has_voted
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn selected_vote(&self) -> Option<VoteChoice> {
        self.selected_vote
    }

    pub fn total_votes(&self) -> u64 {
        self.proposal.votes.total()
    }

    pub fn vote_percentage(&self, choice: VoteChoice) -> u64 {
        vote_percentage(self.proposal.votes.count(choice), self.total_votes())
    }

    fn is_author(&self) -> bool {
        self.viewer.user_id == self.proposal.created_by
    }

    pub fn can_edit(&self) -> bool {
        self.is_author() && self.proposal.status.can_edit()
    }

    fn require_author(&self, action: &str) -> Result<(), AppError> {
        if self.is_author() {
            Ok(())
        } else {
            Err(AppError::PermissionDenied(action.to_string()))
        }
    }

    /// Require a connected wallet and return its account address. Checked
    /// before any network effect so a missing wallet never half-applies an
    /// action.
    fn require_wallet(&self) -> Result<String, AppError> {
        if !self.signer.is_ready() {
            return Err(AppError::Wallet("No wallet connected".to_string()));
        }
        self.signer
            .account()
            .ok_or_else(|| AppError::Wallet("Wallet has no account".to_string()))
    }

    fn require_transition(
        &self,
        to: ProposalStatus,
        action: &'static str,
    ) -> Result<(), AppError> {
        if self.proposal.status.can_transition_to(to) {
            Ok(())
        } else {
            Err(AppError::InvalidTransition {
                from: self.proposal.status.as_str(),
                action,
            })
        }
    }

    /// Re-fetch the canonical proposal from the server.
    pub async fn refresh(&mut self) -> Result<(), AppError> {
        let slug = self.proposal.slug.clone();
        self.proposal = self
            .api
            .get_proposal(&slug)
            .await?
            .ok_or(AppError::NotFound)?;
        Ok(())
    }

    /// Open the edit buffer, seeded from the current proposal.
    pub fn begin_edit(&mut self) -> Result<(), AppError> {
        self.error = None;
        if !self.proposal.status.can_edit() {
            return self.fail(AppError::InvalidTransition {
                from: self.proposal.status.as_str(),
                action: "edit",
            });
        }
        if let Err(e) = self.require_author("proposal.edit") {
            return self.fail(e);
        }
        self.edit = Some(EditBuffer::from_proposal(&self.proposal));
        Ok(())
    }

    pub fn cancel_edit(&mut self) {
        self.edit = None;
    }

    pub fn edit_buffer(&mut self) -> Option<&mut EditBuffer> {
        self.edit.as_mut()
    }

    pub fn select_vote(&mut self, choice: VoteChoice) {
        self.selected_vote = Some(choice);
    }

    fn fail<T>(&mut self, error: AppError) -> Result<T, AppError> {
        self.error = Some(error.to_string());
        Err(error)
    }

    /// Save the edit buffer: patch the full proposal merged with the edited
    /// fields plus an `updated` timestamp, then re-fetch. Status is never
    /// touched by a plain save.
    pub async fn save_edit(&mut self) -> Result<(), AppError> {
        self.error = None;
        if self.submitting {
            return self.fail(AppError::Busy);
        }
        if let Err(e) = self.require_author("proposal.edit") {
            return self.fail(e);
        }
        if !self.proposal.status.can_edit() {
            return self.fail(AppError::InvalidTransition {
                from: self.proposal.status.as_str(),
                action: "edit",
            });
        }
        let Some(edit) = self.edit.clone() else {
            return self.fail(AppError::Validation("Nothing to save".to_string()));
        };
        if let Err(e) = edit.validate() {
            return self.fail(e);
        }

        self.submitting = true;
        let result = self.do_save_edit(edit).await;
        self.submitting = false;
        if let Err(e) = &result {
            self.error = Some(e.to_string());
        }
        result
    }

    async fn do_save_edit(&mut self, edit: EditBuffer) -> Result<(), AppError> {
        let mut body = serde_json::to_value(&self.proposal)?;
        body["title"] = json!(edit.title);
        body["slug"] = json!(edit.slug());
        body["description"] = json!(edit.description);
        body["updated"] = json!(Utc::now());

        self.api.patch_proposal(&self.proposal.id, &body).await?;
        self.edit = None;
        // The saved slug is the new canonical route.
        self.proposal.slug = edit.slug();
        self.refresh().await
    }

    /// Move a draft proposal to ready: sign the description hash and attach
    /// the default 7-day voting window plus the authorship fields. Address,
    /// hash, and signature are always written together.
    pub async fn move_to_ready(&mut self) -> Result<(), AppError> {
        self.error = None;
        if self.submitting {
            return self.fail(AppError::Busy);
        }
        if let Err(e) = self.require_author("proposal.ready") {
            return self.fail(e);
        }
        if let Err(e) = self.require_transition(ProposalStatus::Ready, "move to ready") {
            return self.fail(e);
        }
        let account = match self.require_wallet() {
            Ok(account) => account,
            Err(e) => return self.fail(e),
        };

        self.submitting = true;
        let result = self.do_move_to_ready(account).await;
        self.submitting = false;
        if let Err(e) = &result {
            self.error = Some(e.to_string());
        }
        result
    }

    async fn do_move_to_ready(&mut self, account: String) -> Result<(), AppError> {
        let hash = description_hash(&self.proposal.description);
        let signature = self.signer.sign_message(&hash)?;

        let now = Utc::now();
        let body = json!({
            "status": ProposalStatus::Ready,
            "votes": VoteTally::default(),
            "startDate": now,
            "endDate": now + Duration::days(7),
            "authorAddress": account,
            "signatureHash": hash,
            "authorSignature": signature,
        });

        self.api.patch_proposal(&self.proposal.id, &body).await?;
        log::info!("Proposal {} moved to ready", self.proposal.id);
        self.refresh().await
    }

    /// Promote a ready proposal to active with a chosen start date and
    /// voting duration. Re-signs the hash of the stored description and
    /// calls the dedicated promotion endpoint.
    pub async fn promote(
        &mut self,
        date_start: chrono::DateTime<Utc>,
        duration: VotingDuration,
    ) -> Result<(), AppError> {
        self.error = None;
        if self.submitting {
            return self.fail(AppError::Busy);
        }
        if let Err(e) = self.require_author("proposal.promote") {
            return self.fail(e);
        }
        if let Err(e) = self.require_transition(ProposalStatus::Active, "promote") {
            return self.fail(e);
        }
        let account = match self.require_wallet() {
            Ok(account) => account,
            Err(e) => return self.fail(e),
        };

        self.submitting = true;
        let result = self.do_promote(account, date_start, duration).await;
        self.submitting = false;
        if let Err(e) = &result {
            self.error = Some(e.to_string());
        }
        result
    }

    async fn do_promote(
        &mut self,
        account: String,
        date_start: chrono::DateTime<Utc>,
        duration: VotingDuration,
    ) -> Result<(), AppError> {
        let hash = description_hash(&self.proposal.description);
        let signature = self.signer.sign_message(&hash)?;

        let request = PromoteRequest {
            date_start,
            date_end: duration.end_from(date_start),
            signature_hash: hash,
            author_address: account,
            author_signature: signature,
        };

        self.api.promote_proposal(&self.proposal.id, &request).await?;
        log::info!("Proposal {} promoted to active", self.proposal.id);
        self.refresh().await
    }

    /// Submit the selected vote. The wallet signs a human-readable message
    /// (not the vote hash — the server verifies this flow as-is). On success
    /// `has_voted` flips immediately; the displayed tally stays stale until
    /// the follow-up re-fetch lands.
    pub async fn submit_vote(&mut self) -> Result<(), AppError> {
        self.error = None;
        if self.submitting {
            return self.fail(AppError::Busy);
        }
        if !self.viewer.is_citizen() {
            return self.fail(AppError::PermissionDenied("proposal.vote".to_string()));
        }
        if !self.proposal.is_voting_open(Utc::now()) {
            return self.fail(AppError::Validation("Voting is not open".to_string()));
        }
        if self.has_voted {
            return self.fail(AppError::Validation("You have already voted".to_string()));
        }
        let Some(choice) = self.selected_vote else {
            return self.fail(AppError::Validation(
                "Select yes, no, or abstain first".to_string(),
            ));
        };
        if let Err(e) = self.require_wallet() {
            return self.fail(e);
        }

        self.submitting = true;
        let result = self.do_submit_vote(choice).await;
        self.submitting = false;
        if let Err(e) = &result {
            self.error = Some(e.to_string());
        }
        result
    }

    async fn do_submit_vote(&mut self, choice: VoteChoice) -> Result<(), AppError> {
        let timestamp = Utc::now();
        let signature_hash = vote_hash(
            &self.proposal.id,
            &self.viewer.user_id,
            choice,
            timestamp,
        );

        // The signature gates submission; the server stores the vote hash.
        let message = vote_message(&self.proposal.title, choice);
        self.signer.sign_message(&message)?;

        let vote = Vote {
            proposal_id: self.proposal.id.clone(),
            user_id: self.viewer.user_id.clone(),
            vote: choice,
            voting_power: self.viewer.voting_power,
            timestamp,
            signature_hash,
        };
        self.api.post_vote(&vote).await?;
        self.has_voted = true;

        // Pick up the server-side tallies; no optimistic increment.
        self.refresh().await
    }
}
