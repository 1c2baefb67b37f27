mod node;
pub use node::{NodeState, SubmissionState};

mod session;
pub use session::Session;

mod thread;
pub use thread::{ThreadState, REFRESH_INTERVAL_SECS};

mod tree;
pub use tree::{build_tree, CommentNode};

pub mod api {
    pub use sureddo_api::*;
}
