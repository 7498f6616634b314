//! Group and membership repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use coinhub_core::error::{AppError, ErrorKind};
use coinhub_core::result::AppResult;
use coinhub_entity::{Group, GroupDetails};

/// Repository for coin groups and their member lists.
#[derive(Debug, Clone)]
pub struct GroupRepository {
    pool: PgPool,
}

impl GroupRepository {
    /// Create a new group repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a group by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Group>> {
        sqlx::query_as::<_, Group>("SELECT * FROM groups WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find group", e))
    }

    /// Find the group `username` belongs to, with its members.
    ///
    /// A user in several groups gets the one they joined first.
    pub async fn find_for_member(&self, username: &str) -> AppResult<Option<GroupDetails>> {
        let group = sqlx::query_as::<_, Group>(
            "SELECT g.* FROM groups g \
             JOIN group_members m ON m.group_id = g.id \
             WHERE m.username = $1 \
             ORDER BY m.joined_at, g.id \
             LIMIT 1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find group for member", e)
        })?;

        let Some(group) = group else {
            return Ok(None);
        };

        let members = self.members(group.id).await?;
        Ok(Some(GroupDetails { group, members }))
    }

    /// Usernames of every member of a group, in join order.
    pub async fn members(&self, id: Uuid) -> AppResult<Vec<String>> {
        sqlx::query_scalar::<_, String>(
            "SELECT username FROM group_members WHERE group_id = $1 \
             ORDER BY joined_at, username",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list members", e))
    }

    /// Create a group owned by `creator`, who becomes its first member and
    /// coin holder.
    ///
    /// Returns `None` when `creator` already owns a group.
    pub async fn create(&self, creator: &str) -> AppResult<Option<Uuid>> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO groups (id, coin, creator, coin_holder) VALUES ($1, 1, $2, $2) \
             ON CONFLICT (creator) DO NOTHING \
             RETURNING id",
        )
        .bind(Uuid::new_v4())
        .bind(creator)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create group", e))?;

        let Some(id) = id else {
            return Ok(None);
        };

        sqlx::query("INSERT INTO group_members (group_id, username) VALUES ($1, $2)")
            .bind(id)
            .bind(creator)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to add group creator", e)
            })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit group creation", e)
        })?;

        Ok(Some(id))
    }

    /// Add `username` to a group. Returns `false` if already a member.
    pub async fn add_member(&self, id: Uuid, username: &str) -> AppResult<bool> {
        let result = sqlx::query(
            "INSERT INTO group_members (group_id, username) VALUES ($1, $2) \
             ON CONFLICT (group_id, username) DO NOTHING",
        )
        .bind(id)
        .bind(username)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to add member", e))?;

        Ok(result.rows_affected() == 1)
    }

    /// Check whether `username` belongs to a group.
    pub async fn is_member(&self, id: Uuid, username: &str) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM group_members WHERE group_id = $1 AND username = $2)",
        )
        .bind(id)
        .bind(username)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to check membership", e)
        })
    }

    /// Pass the coin on from `holder`.
    ///
    /// Increments the counter and hands the coin to a random member (the
    /// holder included) in a single statement. Returns the new holder, or
    /// `None` when `holder` does not currently hold the coin.
    pub async fn pass_coin(&self, id: Uuid, holder: &str) -> AppResult<Option<String>> {
        sqlx::query_scalar::<_, String>(
            "UPDATE groups SET coin = coin + 1, coin_holder = ( \
                 SELECT username FROM group_members WHERE group_id = $1 \
                 ORDER BY random() LIMIT 1 \
             ) \
             WHERE id = $1 AND coin_holder = $2 \
             RETURNING coin_holder",
        )
        .bind(id)
        .bind(holder)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to pass coin", e))
    }

    /// Remove `username` from a group.
    ///
    /// If the removed member held the coin, it goes back to the creator.
    /// Returns `false` when `username` was not a member.
    pub async fn remove_member(&self, id: Uuid, username: &str) -> AppResult<bool> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let removed = sqlx::query("DELETE FROM group_members WHERE group_id = $1 AND username = $2")
            .bind(id)
            .bind(username)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to remove member", e))?
            .rows_affected();

        if removed == 0 {
            return Ok(false);
        }

        sqlx::query(
            "UPDATE groups SET coin_holder = creator WHERE id = $1 AND coin_holder = $2",
        )
        .bind(id)
        .bind(username)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to reassign coin holder", e)
        })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit member removal", e)
        })?;

        Ok(true)
    }

    /// Delete a group and, by cascade, its memberships.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM groups WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete group", e))?;

        Ok(result.rows_affected() > 0)
    }
}
