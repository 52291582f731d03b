//! SQL repository implementations on SeaORM (PostgreSQL or SQLite).

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbConn, DbErr, EntityTrait, FromQueryResult, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, SqlErr,
};
use uuid::Uuid;

use socialapp_core::domain::{Comment, CommentFields, Like, Post, PostFields, PostWithCounts};
use socialapp_core::error::RepoError;
use socialapp_core::ports::{CommentRepository, LikeRepository, PostRepository};

use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::like::{self, Entity as LikeEntity};
use super::entity::post::{self, Entity as PostEntity};

/// SQL post repository.
pub struct SqlPostRepository {
    db: DbConn,
}

/// SQL comment repository.
pub struct SqlCommentRepository {
    db: DbConn,
}

/// SQL like repository.
pub struct SqlLikeRepository {
    db: DbConn,
}

impl SqlPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

impl SqlCommentRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

impl SqlLikeRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

fn db_err(err: DbErr) -> RepoError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => return RepoError::Constraint(msg),
        // Only inserts under a post reference another row; the post vanished.
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => return RepoError::NotFound,
        _ => {}
    }
    match err {
        e @ (DbErr::Conn(_) | DbErr::ConnectionAcquire(_)) => RepoError::Connection(e.to_string()),
        other => RepoError::Query(other.to_string()),
    }
}

#[derive(Debug, FromQueryResult)]
struct Tally {
    post_id: Uuid,
    total: i64,
}

/// Row count per post for a child table, in one grouped query.
async fn tallies<E>(conn: &DbConn, post_id: E::Column) -> Result<HashMap<Uuid, u64>, DbErr>
where
    E: EntityTrait,
    E::Column: 'static,
{
    let rows = E::find()
        .select_only()
        .column(post_id)
        .column_as(Expr::col(post_id).count(), "total")
        .group_by(post_id)
        .into_model::<Tally>()
        .all(conn)
        .await?;

    Ok(rows
        .into_iter()
        .map(|t| (t.post_id, t.total.max(0) as u64))
        .collect())
}

async fn with_counts<C>(conn: &C, post: Post) -> Result<PostWithCounts, DbErr>
where
    C: ConnectionTrait,
{
    let like_count = LikeEntity::find()
        .filter(like::Column::PostId.eq(post.id))
        .count(conn)
        .await?;
    let comment_count = CommentEntity::find()
        .filter(comment::Column::PostId.eq(post.id))
        .count(conn)
        .await?;

    Ok(PostWithCounts {
        post,
        like_count,
        comment_count,
    })
}

async fn post_exists<C>(conn: &C, id: Uuid) -> Result<bool, DbErr>
where
    C: ConnectionTrait,
{
    Ok(PostEntity::find_by_id(id).count(conn).await? > 0)
}

#[async_trait]
impl PostRepository for SqlPostRepository {
    async fn list(&self) -> Result<Vec<PostWithCounts>, RepoError> {
        let posts = PostEntity::find()
            .order_by_desc(post::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let likes = tallies::<LikeEntity>(&self.db, like::Column::PostId)
            .await
            .map_err(db_err)?;
        let comments = tallies::<CommentEntity>(&self.db, comment::Column::PostId)
            .await
            .map_err(db_err)?;

        Ok(posts
            .into_iter()
            .map(|model| PostWithCounts {
                like_count: likes.get(&model.id).copied().unwrap_or(0),
                comment_count: comments.get(&model.id).copied().unwrap_or(0),
                post: model.into(),
            })
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<PostWithCounts>, RepoError> {
        let Some(model) = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        with_counts(&self.db, model.into())
            .await
            .map(Some)
            .map_err(db_err)
    }

    async fn insert(&self, post: Post) -> Result<PostWithCounts, RepoError> {
        let active: post::ActiveModel = post.clone().into();
        PostEntity::insert(active)
            .exec_without_returning(&self.db)
            .await
            .map_err(db_err)?;

        tracing::debug!(post_id = %post.id, "Post created");
        Ok(PostWithCounts::fresh(post))
    }

    async fn update(&self, id: Uuid, fields: PostFields) -> Result<PostWithCounts, RepoError> {
        // Single-statement writes only: a read-then-write transaction deadlocks
        // on SQLite's lock upgrade. The write is guarded on the updated_at
        // that was read and retried if another writer got there first.
        loop {
            let model = PostEntity::find_by_id(id)
                .one(&self.db)
                .await
                .map_err(db_err)?
                .ok_or(RepoError::NotFound)?;
            let seen = model.updated_at;

            let mut post: Post = model.into();
            post.revise(fields.clone());

            let result = PostEntity::update_many()
                .col_expr(post::Column::Username, Expr::value(post.username.clone()))
                .col_expr(post::Column::Content, Expr::value(post.content.clone()))
                .col_expr(
                    post::Column::UpdatedAt,
                    Expr::value(DateTimeWithTimeZone::from(post.updated_at)),
                )
                .filter(post::Column::Id.eq(id))
                .filter(post::Column::UpdatedAt.eq(seen))
                .exec(&self.db)
                .await
                .map_err(db_err)?;

            if result.rows_affected == 0 {
                tracing::debug!(post_id = %id, "Post changed during update, retrying");
                continue;
            }

            tracing::debug!(post_id = %id, "Post updated");
            return with_counts(&self.db, post).await.map_err(db_err);
        }
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let result = PostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        tracing::debug!(post_id = %id, "Post deleted");
        Ok(())
    }
}

#[async_trait]
impl CommentRepository for SqlCommentRepository {
    async fn list_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let result = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .order_by_asc(comment::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find(&self, post_id: Uuid, id: Uuid) -> Result<Option<Comment>, RepoError> {
        let result = CommentEntity::find_by_id(id)
            .filter(comment::Column::PostId.eq(post_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.map(Into::into))
    }

    async fn insert(&self, comment: Comment) -> Result<Comment, RepoError> {
        // The post_id foreign key rejects a missing post (mapped to NotFound).
        let active: comment::ActiveModel = comment.clone().into();
        CommentEntity::insert(active)
            .exec_without_returning(&self.db)
            .await
            .map_err(db_err)?;

        tracing::debug!(post_id = %comment.post_id, comment_id = %comment.id, "Comment created");
        Ok(comment)
    }

    async fn update(
        &self,
        post_id: Uuid,
        id: Uuid,
        fields: CommentFields,
    ) -> Result<Comment, RepoError> {
        loop {
            let model = CommentEntity::find_by_id(id)
                .filter(comment::Column::PostId.eq(post_id))
                .one(&self.db)
                .await
                .map_err(db_err)?
                .ok_or(RepoError::NotFound)?;
            let seen = model.updated_at;

            let mut comment: Comment = model.into();
            comment.revise(fields.clone());

            let result = CommentEntity::update_many()
                .col_expr(comment::Column::Username, Expr::value(comment.username.clone()))
                .col_expr(comment::Column::Content, Expr::value(comment.content.clone()))
                .col_expr(
                    comment::Column::UpdatedAt,
                    Expr::value(DateTimeWithTimeZone::from(comment.updated_at)),
                )
                .filter(comment::Column::Id.eq(id))
                .filter(comment::Column::PostId.eq(post_id))
                .filter(comment::Column::UpdatedAt.eq(seen))
                .exec(&self.db)
                .await
                .map_err(db_err)?;

            if result.rows_affected == 0 {
                tracing::debug!(comment_id = %id, "Comment changed during update, retrying");
                continue;
            }

            tracing::debug!(post_id = %post_id, comment_id = %id, "Comment updated");
            return Ok(comment);
        }
    }

    async fn delete(&self, post_id: Uuid, id: Uuid) -> Result<(), RepoError> {
        let result = CommentEntity::delete_many()
            .filter(comment::Column::Id.eq(id))
            .filter(comment::Column::PostId.eq(post_id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        tracing::debug!(post_id = %post_id, comment_id = %id, "Comment deleted");
        Ok(())
    }
}

#[async_trait]
impl LikeRepository for SqlLikeRepository {
    async fn insert(&self, like: Like) -> Result<(), RepoError> {
        let post_id = like.post_id;
        let active: like::ActiveModel = like.into();
        let inserted = LikeEntity::insert(active)
            .on_conflict(
                OnConflict::columns([like::Column::PostId, like::Column::Username])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(db_err)?;

        // A missing post fails the foreign key above; nothing inserted means
        // the pair already exists.
        if inserted == 0 {
            return Err(RepoError::Constraint("like already exists".to_string()));
        }

        tracing::debug!(post_id = %post_id, "Post liked");
        Ok(())
    }

    async fn delete(&self, like: Like) -> Result<(), RepoError> {
        if !post_exists(&self.db, like.post_id).await.map_err(db_err)? {
            return Err(RepoError::NotFound);
        }

        let result = LikeEntity::delete_many()
            .filter(like::Column::PostId.eq(like.post_id))
            .filter(like::Column::Username.eq(like.username))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        tracing::debug!(post_id = %like.post_id, removed = result.rows_affected, "Post unliked");
        Ok(())
    }
}
