// service.rs
//
// The access-controlled poll store. Validation, ownership, the admin
// capability, and vote integrity all live here; HTTP handlers are thin
// pass-throughs and hold no copy of these rules.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::admin::AdminRegistry;
use crate::error::AppError;
use crate::events::{Invalidations, ViewInvalidation};
use crate::identity::Caller;
use crate::models::{OptionTally, Poll, Vote};
use crate::store::{RecordStore, VoteInsert};
use crate::validation::validate_poll_input;

#[derive(Clone)]
pub struct PollService {
    store: Arc<dyn RecordStore>,
    admins: Arc<AdminRegistry>,
    events: Invalidations,
}

impl PollService {
    pub fn new(
        store: Arc<dyn RecordStore>,
        admins: Arc<AdminRegistry>,
        events: Invalidations,
    ) -> Self {
        Self {
            store,
            admins,
            events,
        }
    }

    pub async fn create_poll(
        &self,
        caller: &Caller,
        question: &str,
        options: &[String],
    ) -> Result<Uuid, AppError> {
        let user = caller.require_user()?;
        let (question, options) = validate_poll_input(question, options)?;

        let poll = Poll {
            id: Uuid::new_v4(),
            owner_id: user.id.clone(),
            question,
            options,
            created_at: Utc::now(),
        };
        self.store.insert_poll(&poll).await?;

        self.events.emit(ViewInvalidation::PollListing);
        Ok(poll.id)
    }

    pub async fn update_poll(
        &self,
        caller: &Caller,
        poll_id: Uuid,
        question: &str,
        options: &[String],
    ) -> Result<(), AppError> {
        let user = caller.require_user()?;
        let (question, options) = validate_poll_input(question, options)?;

        let existing = self
            .store
            .fetch_poll(poll_id)
            .await?
            .ok_or(AppError::NotFound)?;
        if existing.owner_id != user.id {
            return Err(AppError::Forbidden("not owner".into()));
        }

        // The write re-applies the ownership filter; the read above only
        // picks the friendly error.
        let applied = self
            .store
            .update_poll_if_owner(poll_id, &user.id, &question, &options)
            .await?;
        if !applied {
            // Poll vanished between read and write.
            return Err(AppError::NotFound);
        }

        self.events.emit(ViewInvalidation::PollListing);
        Ok(())
    }

    pub async fn delete_poll(&self, caller: &Caller, poll_id: Uuid) -> Result<(), AppError> {
        let user = caller.require_user()?;

        if self.admins.is_admin(caller) {
            if !self.store.delete_poll(poll_id).await? {
                return Err(AppError::NotFound);
            }
            self.events.emit(ViewInvalidation::PollListing);
            self.events.emit(ViewInvalidation::AdminOverview);
            return Ok(());
        }

        if self.store.delete_poll_if_owner(poll_id, &user.id).await? {
            self.events.emit(ViewInvalidation::PollListing);
            return Ok(());
        }
        match self.store.fetch_poll(poll_id).await? {
            Some(_) => Err(AppError::Forbidden("not owner".into())),
            None => Err(AppError::NotFound),
        }
    }

    /// Public read: any caller, including anonymous, may fetch any poll.
    pub async fn get_poll(&self, caller: &Caller, poll_id: Uuid) -> Result<(Poll, bool), AppError> {
        let poll = self
            .store
            .fetch_poll(poll_id)
            .await?
            .ok_or(AppError::NotFound)?;
        let can_edit = caller.user().is_some_and(|u| u.id == poll.owner_id);
        Ok((poll, can_edit))
    }

    pub async fn list_own_polls(&self, caller: &Caller) -> Result<Vec<Poll>, AppError> {
        let user = caller.require_user()?;
        Ok(self.store.polls_by_owner(&user.id).await?)
    }

    pub async fn list_all_polls(&self, caller: &Caller) -> Result<Vec<Poll>, AppError> {
        caller.require_user()?;
        if !self.admins.is_admin(caller) {
            return Err(AppError::Forbidden("admin capability required".into()));
        }
        Ok(self.store.all_polls().await?)
    }

    pub async fn cast_vote(
        &self,
        caller: &Caller,
        poll_id: Uuid,
        option_index: i32,
    ) -> Result<(), AppError> {
        if option_index < 0 {
            return Err(AppError::InvalidInput("option out of range".into()));
        }

        let poll = self
            .store
            .fetch_poll(poll_id)
            .await?
            .ok_or(AppError::NotFound)?;
        if option_index as usize >= poll.options.len() {
            return Err(AppError::InvalidInput("option out of range".into()));
        }

        // Friendly pre-check only; the store constraint decides the race.
        if let Some(user) = caller.user() {
            if self.store.voter_has_voted(poll_id, &user.id).await? {
                return Err(AppError::Conflict("already voted".into()));
            }
        }

        let vote = Vote {
            id: Uuid::new_v4(),
            poll_id,
            voter_id: caller.user().map(|u| u.id.clone()),
            option_index,
            created_at: Utc::now(),
        };
        match self.store.insert_vote(&vote).await? {
            VoteInsert::Inserted => Ok(()),
            VoteInsert::DuplicateVoter => Err(AppError::Conflict("already voted".into())),
        }
    }

    pub async fn get_results(&self, poll_id: Uuid) -> Result<Vec<OptionTally>, AppError> {
        let poll = self
            .store
            .fetch_poll(poll_id)
            .await?
            .ok_or(AppError::NotFound)?;

        let counted = self.store.tally_votes(poll_id).await?;
        let mut tallies: Vec<OptionTally> = (0..poll.options.len() as i32)
            .map(|option_index| OptionTally {
                option_index,
                count: 0,
            })
            .collect();
        for (option_index, count) in counted {
            if let Some(tally) = tallies.get_mut(option_index as usize) {
                tally.count = count;
            }
        }
        Ok(tallies)
    }
}
