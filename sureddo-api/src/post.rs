use crate::{Error, Time};

#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
pub struct PostId(pub i64);

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub image_url: String,
    pub created_at: Time,

    // Denormalized display data maintained by the data store
    pub avatar_url: Option<String>,
    pub like_count: Option<i64>,
    pub comment_count: Option<i64>,
}

/// Insert payload for a post. The store assigns `id` and `created_at`;
/// `image_url` is the public URL media storage returned for the uploaded file.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub image_url: String,
}

impl NewPost {
    pub fn validate(&self) -> Result<(), Error> {
        crate::validate_string(&self.title)?;
        crate::validate_string(&self.content)?;
        crate::validate_string(&self.image_url)?;
        if self.title.trim().is_empty() || self.content.trim().is_empty() {
            return Err(Error::EmptyContent);
        }
        Ok(())
    }
}
