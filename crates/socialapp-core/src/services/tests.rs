use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Comment, CommentFields, Like, Post, PostFields, PostWithCounts};
use crate::error::{DomainError, RepoError};
use crate::ports::{CommentRepository, LikeRepository, PostRepository};
use crate::services::SocialService;

/// One lock over all three tables so cascades stay consistent.
#[derive(Default)]
struct Tables {
    posts: Vec<Post>,
    comments: Vec<Comment>,
    likes: HashSet<Like>,
}

#[derive(Clone, Default)]
struct FakeStore(Arc<Mutex<Tables>>);

impl Tables {
    fn counted(&self, post: &Post) -> PostWithCounts {
        PostWithCounts {
            post: post.clone(),
            like_count: self.likes.iter().filter(|l| l.post_id == post.id).count() as u64,
            comment_count: self
                .comments
                .iter()
                .filter(|c| c.post_id == post.id)
                .count() as u64,
        }
    }

    fn has_post(&self, id: Uuid) -> bool {
        self.posts.iter().any(|p| p.id == id)
    }
}

#[async_trait]
impl PostRepository for FakeStore {
    async fn list(&self) -> Result<Vec<PostWithCounts>, RepoError> {
        let t = self.0.lock().unwrap();
        let mut posts: Vec<_> = t.posts.iter().map(|p| t.counted(p)).collect();
        posts.sort_by(|a, b| b.post.created_at.cmp(&a.post.created_at));
        Ok(posts)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<PostWithCounts>, RepoError> {
        let t = self.0.lock().unwrap();
        Ok(t.posts.iter().find(|p| p.id == id).map(|p| t.counted(p)))
    }

    async fn insert(&self, post: Post) -> Result<PostWithCounts, RepoError> {
        self.0.lock().unwrap().posts.push(post.clone());
        Ok(PostWithCounts::fresh(post))
    }

    async fn update(&self, id: Uuid, fields: PostFields) -> Result<PostWithCounts, RepoError> {
        let mut t = self.0.lock().unwrap();
        let post = t
            .posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RepoError::NotFound)?;
        post.revise(fields);
        let post = post.clone();
        Ok(t.counted(&post))
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut t = self.0.lock().unwrap();
        if !t.has_post(id) {
            return Err(RepoError::NotFound);
        }
        t.posts.retain(|p| p.id != id);
        t.comments.retain(|c| c.post_id != id);
        t.likes.retain(|l| l.post_id != id);
        Ok(())
    }
}

#[async_trait]
impl CommentRepository for FakeStore {
    async fn list_by_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let t = self.0.lock().unwrap();
        Ok(t.comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect())
    }

    async fn find(&self, post_id: Uuid, id: Uuid) -> Result<Option<Comment>, RepoError> {
        let t = self.0.lock().unwrap();
        Ok(t.comments
            .iter()
            .find(|c| c.id == id && c.post_id == post_id)
            .cloned())
    }

    async fn insert(&self, comment: Comment) -> Result<Comment, RepoError> {
        let mut t = self.0.lock().unwrap();
        if !t.has_post(comment.post_id) {
            return Err(RepoError::NotFound);
        }
        t.comments.push(comment.clone());
        Ok(comment)
    }

    async fn update(
        &self,
        post_id: Uuid,
        id: Uuid,
        fields: CommentFields,
    ) -> Result<Comment, RepoError> {
        let mut t = self.0.lock().unwrap();
        let comment = t
            .comments
            .iter_mut()
            .find(|c| c.id == id && c.post_id == post_id)
            .ok_or(RepoError::NotFound)?;
        comment.revise(fields);
        Ok(comment.clone())
    }

    async fn delete(&self, post_id: Uuid, id: Uuid) -> Result<(), RepoError> {
        let mut t = self.0.lock().unwrap();
        let before = t.comments.len();
        t.comments.retain(|c| !(c.id == id && c.post_id == post_id));
        if t.comments.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl LikeRepository for FakeStore {
    async fn insert(&self, like: Like) -> Result<(), RepoError> {
        let mut t = self.0.lock().unwrap();
        if !t.has_post(like.post_id) {
            return Err(RepoError::NotFound);
        }
        if !t.likes.insert(like) {
            return Err(RepoError::Constraint("duplicate like".to_string()));
        }
        Ok(())
    }

    async fn delete(&self, like: Like) -> Result<(), RepoError> {
        let mut t = self.0.lock().unwrap();
        if !t.has_post(like.post_id) {
            return Err(RepoError::NotFound);
        }
        t.likes.remove(&like);
        Ok(())
    }
}

fn service() -> SocialService {
    let store = FakeStore::default();
    SocialService::new(
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        Arc::new(store),
    )
}

fn post_fields(username: &str, content: &str) -> PostFields {
    PostFields {
        username: username.to_string(),
        content: content.to_string(),
    }
}

fn comment_fields(username: &str, content: &str) -> CommentFields {
    CommentFields {
        username: username.to_string(),
        content: content.to_string(),
    }
}

#[tokio::test]
async fn created_post_starts_without_engagement() {
    let svc = service();
    let created = svc.create_post(post_fields("alice", "hi")).await.unwrap();

    let fetched = svc.get_post(created.post.id).await.unwrap();
    assert_eq!(fetched, created);
    assert_eq!(fetched.like_count, 0);
    assert_eq!(fetched.comment_count, 0);
    assert_eq!(fetched.post.created_at, fetched.post.updated_at);
}

#[tokio::test]
async fn missing_post_is_named_in_error() {
    let svc = service();
    let id = Uuid::new_v4();

    let err = svc.get_post(id).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::NotFound { entity_type: "Post", id: missing } if missing == id
    ));

    let err = svc
        .update_post(id, post_fields("alice", "x"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { entity_type: "Post", .. }));
}

#[tokio::test]
async fn duplicate_like_is_a_conflict() {
    let svc = service();
    let post = svc.create_post(post_fields("alice", "hi")).await.unwrap();
    let id = post.post.id;

    svc.like_post(id, "bob").await.unwrap();
    let err = svc.like_post(id, "bob").await.unwrap_err();
    assert!(matches!(err, DomainError::Conflict(ref msg) if msg == "Already liked"));

    assert_eq!(svc.get_post(id).await.unwrap().like_count, 1);
}

#[tokio::test]
async fn unlike_without_like_is_ok_but_needs_post() {
    let svc = service();
    let post = svc.create_post(post_fields("alice", "hi")).await.unwrap();

    svc.unlike_post(post.post.id, "bob").await.unwrap();

    let err = svc.unlike_post(Uuid::new_v4(), "bob").await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { entity_type: "Post", .. }));
}

#[tokio::test]
async fn comment_needs_existing_post() {
    let svc = service();
    let orphan = Uuid::new_v4();

    let err = svc
        .create_comment(orphan, comment_fields("bob", "nice"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { entity_type: "Post", .. }));
    assert!(svc.list_comments(orphan).await.unwrap().is_empty());
}

#[tokio::test]
async fn comment_lookups_are_scoped_to_parent() {
    let svc = service();
    let a = svc.create_post(post_fields("alice", "a")).await.unwrap();
    let b = svc.create_post(post_fields("alice", "b")).await.unwrap();
    let comment = svc
        .create_comment(a.post.id, comment_fields("bob", "nice"))
        .await
        .unwrap();

    let err = svc.get_comment(b.post.id, comment.id).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { entity_type: "Comment", .. }));

    let err = svc.delete_comment(b.post.id, comment.id).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { entity_type: "Comment", .. }));

    assert_eq!(svc.get_comment(a.post.id, comment.id).await.unwrap(), comment);
}

#[tokio::test]
async fn deleting_post_takes_children_with_it() {
    let svc = service();
    let post = svc.create_post(post_fields("alice", "hi")).await.unwrap();
    let id = post.post.id;
    let comment = svc
        .create_comment(id, comment_fields("bob", "nice"))
        .await
        .unwrap();
    svc.like_post(id, "bob").await.unwrap();

    svc.delete_post(id).await.unwrap();

    assert!(svc.get_post(id).await.is_err());
    assert!(svc.get_comment(id, comment.id).await.is_err());
    assert!(svc.delete_post(id).await.is_err());
}
