use anyhow::{anyhow, Context};
use serde_json::json;

use crate::{CommentId, PostId};

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Unknown error: {0}")]
    Unknown(String),

    #[error("You must be logged in to comment")]
    Unauthenticated,

    #[error("Content must not be empty")]
    EmptyContent,

    #[error("Null byte in string is not allowed {0:?}")]
    NullByteInString(String),

    #[error("Unknown post {0:?}")]
    UnknownPost(PostId),

    #[error("Unknown parent comment {0:?}")]
    UnknownParentComment(CommentId),

    #[error("Failed fetching from the data store: {0}")]
    Fetch(String),

    #[error("Failed writing to the data store: {0}")]
    Insert(String),
}

impl Error {
    pub fn status_code(&self) -> http::StatusCode {
        use http::StatusCode;
        match self {
            Error::Unknown(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Unauthenticated => StatusCode::UNAUTHORIZED,
            Error::EmptyContent => StatusCode::BAD_REQUEST,
            Error::NullByteInString(_) => StatusCode::BAD_REQUEST,
            Error::UnknownPost(_) => StatusCode::NOT_FOUND,
            Error::UnknownParentComment(_) => StatusCode::NOT_FOUND,
            Error::Fetch(_) => StatusCode::BAD_GATEWAY,
            Error::Insert(_) => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn contents(&self) -> Vec<u8> {
        serde_json::to_vec(&match self {
            Error::Unknown(msg) => json!({
                "message": msg,
                "type": "unknown",
            }),
            Error::Unauthenticated => json!({
                "message": "you must be logged in to comment",
                "type": "unauthenticated",
            }),
            Error::EmptyContent => json!({
                "message": "content must not be empty",
                "type": "empty-content",
            }),
            Error::NullByteInString(s) => json!({
                "message": "there was a null byte in argument string",
                "type": "null-byte",
                "string": s,
            }),
            Error::UnknownPost(p) => json!({
                "message": "post does not exist",
                "type": "unknown-post",
                "post": p.0,
            }),
            Error::UnknownParentComment(c) => json!({
                "message": "parent comment does not exist",
                "type": "unknown-parent-comment",
                "comment": c.0,
            }),
            Error::Fetch(msg) => json!({
                "message": msg,
                "type": "fetch-failed",
            }),
            Error::Insert(msg) => json!({
                "message": msg,
                "type": "insert-failed",
            }),
        })
        .expect("serializing error contents")
    }

    pub fn parse(body: &[u8]) -> anyhow::Result<Error> {
        let data: serde_json::Value =
            serde_json::from_slice(body).context("parsing error contents")?;
        let message = || {
            String::from(
                data.get("message")
                    .and_then(|msg| msg.as_str())
                    .unwrap_or(""),
            )
        };
        Ok(
            match data
                .get("type")
                .and_then(|t| t.as_str())
                .ok_or_else(|| anyhow!("error type is not a string"))?
            {
                "unknown" => Error::Unknown(message()),
                "unauthenticated" => Error::Unauthenticated,
                "empty-content" => Error::EmptyContent,
                "null-byte" => Error::NullByteInString(String::from(
                    data.get("string").and_then(|s| s.as_str()).ok_or_else(|| {
                        anyhow!("error is a null-byte-in-string without a string")
                    })?,
                )),
                "unknown-post" => Error::UnknownPost(PostId(
                    data.get("post")
                        .and_then(|p| p.as_i64())
                        .ok_or_else(|| anyhow!("error is an unknown-post without a post id"))?,
                )),
                "unknown-parent-comment" => Error::UnknownParentComment(CommentId(
                    data.get("comment").and_then(|c| c.as_i64()).ok_or_else(|| {
                        anyhow!("error is an unknown-parent-comment without a comment id")
                    })?,
                )),
                "fetch-failed" => Error::Fetch(message()),
                "insert-failed" => Error::Insert(message()),
                _ => return Err(anyhow!("error contents has unknown type")),
            },
        )
    }
}
