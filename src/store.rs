// store.rs
//
// Contract the poll service requires from durable storage. Two
// implementations exist: Postgres (`db::PgRecordStore`) for the server
// and `memory::MemoryRecordStore` for the test suite. Both must honor
// the same atomicity guarantees:
//
//   * `insert_vote` enforces at-most-one vote per (poll, voter) for
//     present voters as part of the insert itself, not a prior check;
//   * the ownership-conditioned update/delete apply their predicate as
//     part of the write;
//   * deleting a poll removes its votes atomically.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Poll, Vote};

/// Opaque storage failure. The HTTP layer maps this to a generic 500
/// without exposing the underlying detail.
#[derive(Error, Debug)]
#[error("{0}")]
pub struct StoreError(#[from] Box<dyn std::error::Error + Send + Sync>);

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError(Box::new(e))
    }
}

/// Outcome of a vote insert, distinguished so the service can report a
/// duplicate as a conflict rather than a storage failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteInsert {
    Inserted,
    /// The store's uniqueness constraint rejected a second vote from
    /// the same voter on the same poll.
    DuplicateVoter,
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn insert_poll(&self, poll: &Poll) -> Result<(), StoreError>;

    async fn fetch_poll(&self, id: Uuid) -> Result<Option<Poll>, StoreError>;

    /// Polls owned by `owner_id`, newest first.
    async fn polls_by_owner(&self, owner_id: &str) -> Result<Vec<Poll>, StoreError>;

    /// Every poll, newest first.
    async fn all_polls(&self) -> Result<Vec<Poll>, StoreError>;

    /// Replaces question and options wholesale, gated on ownership in
    /// the write predicate. Returns false when no row matched (absent
    /// poll or non-owner).
    async fn update_poll_if_owner(
        &self,
        id: Uuid,
        owner_id: &str,
        question: &str,
        options: &[String],
    ) -> Result<bool, StoreError>;

    /// Ownership-gated delete with vote cascade. Returns false when no
    /// row matched.
    async fn delete_poll_if_owner(&self, id: Uuid, owner_id: &str) -> Result<bool, StoreError>;

    /// Unconditional delete with vote cascade (admin path). Returns
    /// false when the poll did not exist.
    async fn delete_poll(&self, id: Uuid) -> Result<bool, StoreError>;

    /// Whether a present (non-anonymous) voter already voted on this
    /// poll. Advisory only; `insert_vote` carries the real guarantee.
    async fn voter_has_voted(&self, poll_id: Uuid, voter_id: &str) -> Result<bool, StoreError>;

    async fn insert_vote(&self, vote: &Vote) -> Result<VoteInsert, StoreError>;

    /// `(option_index, count)` pairs for options with at least one
    /// vote. Indices with no votes are absent.
    async fn tally_votes(&self, poll_id: Uuid) -> Result<Vec<(i32, i64)>, StoreError>;
}
