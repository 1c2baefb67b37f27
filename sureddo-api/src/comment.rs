use crate::{Error, PostId, Time, User, UserId};

#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
pub struct CommentId(pub i64);

/// One comment record as stored. Records are created exactly once and never
/// edited or deleted; `created_at` is the sole ordering key among siblings.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Comment {
    pub id: CommentId,
    pub post_id: PostId,

    /// `None` for a top-level comment, otherwise the comment replied to
    pub parent_comment_id: Option<CommentId>,

    pub content: String,

    #[serde(rename = "author")]
    pub author_name: String,

    pub created_at: Time,
}

/// Insert payload for a comment or reply. The store assigns `id` and
/// `created_at` on insert.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct NewComment {
    pub post_id: PostId,
    pub content: String,
    pub parent_comment_id: Option<CommentId>,
    pub user_id: UserId,

    #[serde(rename = "author")]
    pub author_name: String,
}

impl NewComment {
    pub fn new(post_id: PostId, parent: Option<CommentId>, content: String, user: &User) -> Self {
        NewComment {
            post_id,
            content,
            parent_comment_id: parent,
            user_id: user.id,
            author_name: user.name.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        crate::validate_string(&self.content)?;
        crate::validate_string(&self.author_name)?;
        if self.content.trim().is_empty() {
            return Err(Error::EmptyContent);
        }
        Ok(())
    }
}
