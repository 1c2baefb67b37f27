use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::TimeZone;
use sureddo_client::api::{
    Comment, CommentId, Error, MediaStore, NewComment, NewPost, Post, PostId, Store, Time,
};

/// In-memory stand-in for the hosted data store. Ids and timestamps are
/// assigned deterministically (the clock advances one second per insert) so
/// tests get stable ordering.
pub struct MockServer {
    posts: BTreeMap<PostId, Post>,
    comments: BTreeMap<CommentId, Comment>,
    images: BTreeMap<String, Vec<u8>>,
    next_post_id: i64,
    next_comment_id: i64,
    clock: Time,
    offline: bool,
}

impl MockServer {
    pub fn new() -> MockServer {
        MockServer {
            posts: BTreeMap::new(),
            comments: BTreeMap::new(),
            images: BTreeMap::new(),
            next_post_id: 1,
            next_comment_id: 1,
            clock: chrono::Utc
                .with_ymd_and_hms(2023, 1, 1, 0, 0, 0)
                .unwrap(),
            offline: false,
        }
    }

    /// While offline every fetch and insert fails, like an unreachable host
    pub fn test_set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }

    pub fn test_comment_count(&self) -> usize {
        self.comments.len()
    }

    pub fn test_image_count(&self) -> usize {
        self.images.len()
    }

    /// Injects a raw record, bypassing insert validation. Lets tests feed the
    /// client the kind of corrupted data (dangling or self-referencing
    /// parents) the real store should never produce.
    pub fn test_push_comment(&mut self, comment: Comment) {
        self.next_comment_id = self.next_comment_id.max(comment.id.0 + 1);
        self.comments.insert(comment.id, comment);
    }

    fn tick(&mut self) -> Time {
        self.clock = self.clock + chrono::Duration::seconds(1);
        self.clock
    }
}

#[async_trait]
impl Store for MockServer {
    async fn fetch_posts(&mut self) -> Result<Vec<Post>, Error> {
        if self.offline {
            return Err(Error::Fetch(String::from("mock server is offline")));
        }
        let mut posts = self.posts.values().cloned().collect::<Vec<_>>();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    async fn fetch_post(&mut self, post: PostId) -> Result<Post, Error> {
        if self.offline {
            return Err(Error::Fetch(String::from("mock server is offline")));
        }
        self.posts.get(&post).cloned().ok_or(Error::UnknownPost(post))
    }

    async fn insert_post(&mut self, post: NewPost) -> Result<PostId, Error> {
        if self.offline {
            return Err(Error::Insert(String::from("mock server is offline")));
        }
        post.validate()?;
        let id = PostId(self.next_post_id);
        self.next_post_id += 1;
        let created_at = self.tick();
        self.posts.insert(
            id,
            Post {
                id,
                title: post.title,
                content: post.content,
                image_url: post.image_url,
                created_at,
                avatar_url: None,
                like_count: Some(0),
                comment_count: Some(0),
            },
        );
        Ok(id)
    }

    async fn fetch_comments(&mut self, post: PostId) -> Result<Vec<Comment>, Error> {
        if self.offline {
            return Err(Error::Fetch(String::from("mock server is offline")));
        }
        let mut comments = self
            .comments
            .values()
            .filter(|c| c.post_id == post)
            .cloned()
            .collect::<Vec<_>>();
        comments.sort_by_key(|c| (c.created_at, c.id));
        Ok(comments)
    }

    async fn insert_comment(&mut self, comment: NewComment) -> Result<(), Error> {
        if self.offline {
            return Err(Error::Insert(String::from("mock server is offline")));
        }
        comment.validate()?;
        if !self.posts.contains_key(&comment.post_id) {
            return Err(Error::UnknownPost(comment.post_id));
        }
        // The parent must already exist on the same post. A freshly assigned
        // id can thus never be its own parent.
        if let Some(parent) = comment.parent_comment_id {
            match self.comments.get(&parent) {
                Some(p) if p.post_id == comment.post_id => (),
                _ => return Err(Error::UnknownParentComment(parent)),
            }
        }
        let id = CommentId(self.next_comment_id);
        self.next_comment_id += 1;
        let created_at = self.tick();
        self.comments.insert(
            id,
            Comment {
                id,
                post_id: comment.post_id,
                parent_comment_id: comment.parent_comment_id,
                content: comment.content,
                author_name: comment.author_name,
                created_at,
            },
        );
        if let Some(post) = self.posts.get_mut(&comment.post_id) {
            post.comment_count = Some(post.comment_count.unwrap_or(0) + 1);
        }
        Ok(())
    }
}

#[async_trait]
impl MediaStore for MockServer {
    async fn store_image(&mut self, path: &str, bytes: Vec<u8>) -> Result<String, Error> {
        if self.offline {
            return Err(Error::Insert(String::from("mock server is offline")));
        }
        self.images.insert(String::from(path), bytes);
        Ok(format!("mock://post-images/{}", path))
    }
}
