use crate::{
    api::{CommentId, Error, NewComment, PostId},
    Session,
};

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SubmissionState {
    Idle,
    Pending,
    Failed(String),
}

/// Interactive state for exactly one comment, independent of its siblings and
/// parent. Keyed by comment id in [`crate::ThreadState`], never by position,
/// so it survives the wholesale forest rebuild a refresh does.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NodeState {
    /// Replies are hidden until the user asks for them
    pub collapsed: bool,
    pub composing: bool,
    pub draft: String,
    pub submission: SubmissionState,
}

impl Default for NodeState {
    fn default() -> NodeState {
        NodeState {
            collapsed: true,
            composing: false,
            draft: String::new(),
            submission: SubmissionState::Idle,
        }
    }
}

impl NodeState {
    /// Opening or cancelling the compose box leaves the draft and the
    /// collapse state alone
    pub fn toggle_composing(&mut self) {
        self.composing = !self.composing;
    }

    pub fn toggle_collapsed(&mut self) {
        self.collapsed = !self.collapsed;
    }

    pub fn set_draft(&mut self, text: String) {
        self.draft = text;
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.submission, SubmissionState::Pending)
    }

    pub fn submission_error(&self) -> Option<&str> {
        match &self.submission {
            SubmissionState::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    /// Validates the draft and builds the insert payload. Both checks happen
    /// before any gateway call: an anonymous session fails with
    /// `Unauthenticated` (the compose affordance is hidden for anonymous
    /// sessions, but a session that expired mid-compose still ends up here),
    /// a whitespace-only draft with `EmptyContent`. Either failure surfaces
    /// on `submission` and changes nothing else.
    pub fn start_submit(
        &mut self,
        session: &Session,
        post: PostId,
        parent: Option<CommentId>,
    ) -> Result<NewComment, Error> {
        let user = match session.user() {
            Some(user) => user,
            None => return Err(self.fail(Error::Unauthenticated)),
        };
        let content = self.draft.trim();
        if content.is_empty() {
            return Err(self.fail(Error::EmptyContent));
        }
        self.submission = SubmissionState::Pending;
        Ok(NewComment::new(post, parent, String::from(content), user))
    }

    /// A successful insert clears the draft and closes the compose box; a
    /// failed one keeps both so the user can re-submit explicitly.
    pub fn finish_submit(&mut self, result: &Result<(), Error>) {
        match result {
            Ok(()) => {
                self.draft.clear();
                self.composing = false;
                self.submission = SubmissionState::Idle;
            }
            Err(e) => {
                self.fail(e.clone());
            }
        }
    }

    fn fail(&mut self, e: Error) -> Error {
        self.submission = SubmissionState::Failed(e.to_string());
        e
    }
}
