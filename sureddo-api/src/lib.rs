mod comment;
mod error;
mod post;
mod store;
mod user;

pub use comment::{Comment, CommentId, NewComment};
pub use error::Error;
pub use post::{NewPost, Post, PostId};
pub use store::{MediaStore, Store};
pub use user::{User, UserId};

pub use uuid::{uuid, Uuid};
pub type Time = chrono::DateTime<chrono::Utc>;

pub const STUB_UUID: Uuid = uuid!("ffffffff-ffff-ffff-ffff-ffffffffffff");

pub fn validate_string(s: &str) -> Result<(), Error> {
    match s.contains('\0') {
        true => Err(Error::NullByteInString(String::from(s))),
        false => Ok(()),
    }
}
