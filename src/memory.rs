// memory.rs
//
// In-process record store used by the test suite. Every operation runs
// under one mutex guard, which is what makes the duplicate-vote check
// and the poll/vote cascade atomic here, mirroring the constraints the
// Postgres schema enforces.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{Poll, Vote};
use crate::store::{RecordStore, StoreError, VoteInsert};

#[derive(Debug, Default)]
struct Tables {
    polls: HashMap<Uuid, Poll>,
    votes: Vec<Vote>,
}

#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    tables: Mutex<Tables>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn insert_poll(&self, poll: &Poll) -> Result<(), StoreError> {
        self.tables.lock().unwrap().polls.insert(poll.id, poll.clone());
        Ok(())
    }

    async fn fetch_poll(&self, id: Uuid) -> Result<Option<Poll>, StoreError> {
        Ok(self.tables.lock().unwrap().polls.get(&id).cloned())
    }

    async fn polls_by_owner(&self, owner_id: &str) -> Result<Vec<Poll>, StoreError> {
        let tables = self.tables.lock().unwrap();
        let mut polls: Vec<Poll> = tables
            .polls
            .values()
            .filter(|p| p.owner_id == owner_id)
            .cloned()
            .collect();
        polls.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(polls)
    }

    async fn all_polls(&self) -> Result<Vec<Poll>, StoreError> {
        let tables = self.tables.lock().unwrap();
        let mut polls: Vec<Poll> = tables.polls.values().cloned().collect();
        polls.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(polls)
    }

    async fn update_poll_if_owner(
        &self,
        id: Uuid,
        owner_id: &str,
        question: &str,
        options: &[String],
    ) -> Result<bool, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        match tables.polls.get_mut(&id) {
            Some(poll) if poll.owner_id == owner_id => {
                poll.question = question.to_string();
                poll.options = options.to_vec();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete_poll_if_owner(&self, id: Uuid, owner_id: &str) -> Result<bool, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        match tables.polls.get(&id) {
            Some(poll) if poll.owner_id == owner_id => {
                tables.polls.remove(&id);
                tables.votes.retain(|v| v.poll_id != id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete_poll(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.polls.remove(&id).is_some() {
            tables.votes.retain(|v| v.poll_id != id);
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn voter_has_voted(&self, poll_id: Uuid, voter_id: &str) -> Result<bool, StoreError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .votes
            .iter()
            .any(|v| v.poll_id == poll_id && v.voter_id.as_deref() == Some(voter_id)))
    }

    async fn insert_vote(&self, vote: &Vote) -> Result<VoteInsert, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        if let Some(voter_id) = vote.voter_id.as_deref() {
            let duplicate = tables
                .votes
                .iter()
                .any(|v| v.poll_id == vote.poll_id && v.voter_id.as_deref() == Some(voter_id));
            if duplicate {
                return Ok(VoteInsert::DuplicateVoter);
            }
        }
        tables.votes.push(vote.clone());
        Ok(VoteInsert::Inserted)
    }

    async fn tally_votes(&self, poll_id: Uuid) -> Result<Vec<(i32, i64)>, StoreError> {
        let tables = self.tables.lock().unwrap();
        let mut counts: HashMap<i32, i64> = HashMap::new();
        for vote in tables.votes.iter().filter(|v| v.poll_id == poll_id) {
            *counts.entry(vote.option_index).or_default() += 1;
        }
        let mut counts: Vec<(i32, i64)> = counts.into_iter().collect();
        counts.sort_by_key(|(index, _)| *index);
        Ok(counts)
    }
}
