// db.rs
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Pool, Postgres};
use uuid::Uuid;

use crate::models::{Poll, Vote};
use crate::store::{RecordStore, StoreError, VoteInsert};

pub async fn create_pool(database_url: &str) -> Result<Pool<Postgres>, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await
}

/// Postgres-backed record store. The uniqueness constraint on
/// `votes (poll_id, voter_id)` and the `ON DELETE CASCADE` foreign key
/// in the migrations carry the atomicity contracts; see migrations/.
#[derive(Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn insert_poll(&self, poll: &Poll) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO polls (id, owner_id, question, options, created_at)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(poll.id)
        .bind(&poll.owner_id)
        .bind(&poll.question)
        .bind(&poll.options)
        .bind(poll.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn fetch_poll(&self, id: Uuid) -> Result<Option<Poll>, StoreError> {
        let poll = sqlx::query_as::<_, Poll>("SELECT * FROM polls WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(poll)
    }

    async fn polls_by_owner(&self, owner_id: &str) -> Result<Vec<Poll>, StoreError> {
        let polls = sqlx::query_as::<_, Poll>(
            "SELECT * FROM polls WHERE owner_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(polls)
    }

    async fn all_polls(&self) -> Result<Vec<Poll>, StoreError> {
        let polls = sqlx::query_as::<_, Poll>("SELECT * FROM polls ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(polls)
    }

    async fn update_poll_if_owner(
        &self,
        id: Uuid,
        owner_id: &str,
        question: &str,
        options: &[String],
    ) -> Result<bool, StoreError> {
        // Ownership is part of the write predicate, not a prior read.
        let result = sqlx::query(
            "UPDATE polls SET question = $3, options = $4
             WHERE id = $1 AND owner_id = $2",
        )
        .bind(id)
        .bind(owner_id)
        .bind(question)
        .bind(options)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_poll_if_owner(&self, id: Uuid, owner_id: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM polls WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_poll(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM polls WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn voter_has_voted(&self, poll_id: Uuid, voter_id: &str) -> Result<bool, StoreError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM votes WHERE poll_id = $1 AND voter_id = $2)",
        )
        .bind(poll_id)
        .bind(voter_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn insert_vote(&self, vote: &Vote) -> Result<VoteInsert, StoreError> {
        let result = sqlx::query(
            "INSERT INTO votes (id, poll_id, voter_id, option_index, created_at)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(vote.id)
        .bind(vote.poll_id)
        .bind(&vote.voter_id)
        .bind(vote.option_index)
        .bind(vote.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(VoteInsert::Inserted),
            Err(e) if e.as_database_error().is_some_and(|d| d.is_unique_violation()) => {
                Ok(VoteInsert::DuplicateVoter)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn tally_votes(&self, poll_id: Uuid) -> Result<Vec<(i32, i64)>, StoreError> {
        let counts = sqlx::query_as::<_, (i32, i64)>(
            "SELECT option_index, COUNT(*) FROM votes
             WHERE poll_id = $1 GROUP BY option_index ORDER BY option_index",
        )
        .bind(poll_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(counts)
    }
}
