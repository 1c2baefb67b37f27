use async_trait::async_trait;

use crate::{Comment, Error, NewComment, NewPost, Post, PostId};

/// What the hosted data store exposes to this client. Posts come back in
/// descending `created_at` order, comments in ascending order; the store
/// assigns ids and timestamps on insert.
#[async_trait]
pub trait Store {
    async fn fetch_posts(&mut self) -> Result<Vec<Post>, Error>;
    async fn fetch_post(&mut self, post: PostId) -> Result<Post, Error>;
    async fn insert_post(&mut self, post: NewPost) -> Result<PostId, Error>;
    async fn fetch_comments(&mut self, post: PostId) -> Result<Vec<Comment>, Error>;
    async fn insert_comment(&mut self, comment: NewComment) -> Result<(), Error>;
}

/// Media storage: takes a blob, hands back a public URL.
#[async_trait]
pub trait MediaStore {
    async fn store_image(&mut self, path: &str, bytes: Vec<u8>) -> Result<String, Error>;
}
