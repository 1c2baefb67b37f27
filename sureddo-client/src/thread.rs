use std::collections::{HashMap, HashSet};

use crate::{
    api::{Comment, CommentId, Error, NewComment, PostId, Store},
    build_tree,
    tree::collect_ids,
    CommentNode, NodeState, Session,
};

/// Comments are re-fetched this often while a thread is on screen
pub const REFRESH_INTERVAL_SECS: i64 = 5;

/// All comment-thread state for one post: the materialized reply forest plus
/// the per-comment UI state.
///
/// UI state is keyed by comment id, so a rebuild re-associates it with the
/// same comments and only genuinely new ids start from the defaults; a poll
/// tick never collapses an open thread or blanks an in-progress draft.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ThreadState {
    post: PostId,
    forest: Vec<CommentNode>,
    nodes: HashMap<CommentId, NodeState>,

    /// State of the top-level comment form, which belongs to no comment id
    composer: NodeState,

    fetch_seq: u64,
    loaded: bool,
    last_error: Option<String>,
}

impl ThreadState {
    pub fn new(post: PostId) -> ThreadState {
        ThreadState {
            post,
            forest: Vec::new(),
            nodes: HashMap::new(),
            composer: NodeState::default(),
            fetch_seq: 0,
            loaded: false,
            last_error: None,
        }
    }

    pub fn post(&self) -> PostId {
        self.post
    }

    pub fn forest(&self) -> &[CommentNode] {
        &self.forest
    }

    /// False until the first fetch has been applied
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Registers a fetch as the most recent one and returns its sequence
    /// number, superseding every fetch still in flight.
    pub fn begin_fetch(&mut self) -> u64 {
        self.fetch_seq += 1;
        self.fetch_seq
    }

    /// Applies a completed fetch. Results of superseded fetches are dropped
    /// (last-result-wins), so overlapping timer ticks and post-insert
    /// refreshes coalesce safely. A failed fetch keeps the previous forest
    /// on screen and only surfaces the error; the timer keeps running.
    pub fn apply_fetch(&mut self, seq: u64, result: Result<Vec<Comment>, Error>) -> bool {
        if seq != self.fetch_seq {
            tracing::debug!(seq, latest = self.fetch_seq, "dropping superseded fetch");
            return false;
        }
        match result {
            Ok(records) => {
                self.forest = build_tree(&records);
                let mut present = HashSet::new();
                collect_ids(&self.forest, &mut present);
                self.nodes.retain(|id, _| present.contains(id));
                self.loaded = true;
                self.last_error = None;
            }
            Err(e) => {
                tracing::warn!(post=?self.post, err=%e, "failed refreshing comments");
                self.last_error = Some(e.to_string());
            }
        }
        true
    }

    /// A snapshot of the state for `id`, defaulted for ids seen for the
    /// first time. For rendering; mutations go through [`Self::node_mut`].
    pub fn node(&self, id: CommentId) -> NodeState {
        self.nodes.get(&id).cloned().unwrap_or_default()
    }

    pub fn node_mut(&mut self, id: CommentId) -> &mut NodeState {
        self.nodes.entry(id).or_insert_with(NodeState::default)
    }

    pub fn composer(&self) -> &NodeState {
        &self.composer
    }

    pub fn composer_mut(&mut self) -> &mut NodeState {
        &mut self.composer
    }

    pub fn start_comment(&mut self, session: &Session) -> Result<NewComment, Error> {
        let post = self.post;
        self.composer.start_submit(session, post, None)
    }

    pub fn finish_comment(&mut self, result: &Result<(), Error>) {
        self.composer.finish_submit(result);
    }

    pub fn start_reply(
        &mut self,
        session: &Session,
        parent: CommentId,
    ) -> Result<NewComment, Error> {
        let post = self.post;
        self.node_mut(parent).start_submit(session, post, Some(parent))
    }

    /// Completion of a reply submission. If `parent` vanished from the forest
    /// in the meantime the result is stale and applying it is a no-op.
    pub fn finish_reply(&mut self, parent: CommentId, result: &Result<(), Error>) {
        match self.nodes.get_mut(&parent) {
            Some(node) => node.finish_submit(result),
            None => tracing::debug!(?parent, "dropping completion for vanished comment"),
        }
    }

    /// One full refresh cycle against the store
    pub async fn refresh<S: Store>(&mut self, store: &mut S) {
        let seq = self.begin_fetch();
        let result = store.fetch_comments(self.post).await;
        self.apply_fetch(seq, result);
    }

    /// Top-level comment submission: validate, insert, then refresh
    /// immediately on success, superseding the next timer tick.
    pub async fn submit_comment<S: Store>(
        &mut self,
        store: &mut S,
        session: &Session,
    ) -> Result<(), Error> {
        let payload = self.start_comment(session)?;
        let result = store.insert_comment(payload).await;
        self.finish_comment(&result);
        if result.is_ok() {
            self.refresh(store).await;
        }
        result
    }

    /// Reply submission for one node, same cycle as [`Self::submit_comment`]
    pub async fn submit_reply<S: Store>(
        &mut self,
        store: &mut S,
        session: &Session,
        parent: CommentId,
    ) -> Result<(), Error> {
        let payload = self.start_reply(session, parent)?;
        let result = store.insert_comment(payload).await;
        self.finish_reply(parent, &result);
        if result.is_ok() {
            self.refresh(store).await;
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Time;

    fn time(secs: i64) -> Time {
        chrono::DateTime::from_timestamp(secs, 0).expect("timestamp out of range")
    }

    fn record(id: i64, parent: Option<i64>, created: i64) -> Comment {
        Comment {
            id: CommentId(id),
            post_id: PostId(1),
            parent_comment_id: parent.map(CommentId),
            content: format!("comment {}", id),
            author_name: String::from("nakameguro"),
            created_at: time(created),
        }
    }

    #[test]
    fn expanded_nodes_survive_back_to_back_refreshes() {
        let mut state = ThreadState::new(PostId(1));
        let records = vec![record(7, None, 1), record(8, Some(7), 2)];

        let seq = state.begin_fetch();
        assert!(state.apply_fetch(seq, Ok(records.clone())));
        state.node_mut(CommentId(7)).toggle_collapsed();
        state
            .node_mut(CommentId(8))
            .set_draft(String::from("half-typed reply"));

        let seq = state.begin_fetch();
        assert!(state.apply_fetch(seq, Ok(records)));
        assert!(!state.node(CommentId(7)).collapsed);
        assert_eq!(state.node(CommentId(8)).draft, "half-typed reply");
    }

    #[test]
    fn state_for_vanished_ids_is_pruned() {
        let mut state = ThreadState::new(PostId(1));
        let seq = state.begin_fetch();
        state.apply_fetch(seq, Ok(vec![record(1, None, 1), record(2, None, 2)]));
        state.node_mut(CommentId(2)).toggle_collapsed();

        let seq = state.begin_fetch();
        state.apply_fetch(seq, Ok(vec![record(1, None, 1)]));
        // id 2 is gone, so its next sighting starts from the defaults again
        assert!(state.node(CommentId(2)).collapsed);
    }

    #[test]
    fn superseded_fetches_are_dropped() {
        let mut state = ThreadState::new(PostId(1));
        let old = state.begin_fetch();
        let new = state.begin_fetch();
        assert!(!state.apply_fetch(old, Ok(vec![record(1, None, 1)])));
        assert!(state.forest().is_empty());
        assert!(!state.is_loaded());
        assert!(state.apply_fetch(new, Ok(vec![record(2, None, 2)])));
        assert_eq!(state.forest()[0].comment.id, CommentId(2));
    }

    #[test]
    fn failed_fetch_keeps_the_previous_forest() {
        let mut state = ThreadState::new(PostId(1));
        let seq = state.begin_fetch();
        state.apply_fetch(seq, Ok(vec![record(1, None, 1)]));

        let seq = state.begin_fetch();
        state.apply_fetch(seq, Err(Error::Fetch(String::from("connection reset"))));
        assert_eq!(state.forest().len(), 1);
        assert!(state.last_error().is_some());

        let seq = state.begin_fetch();
        state.apply_fetch(seq, Ok(vec![record(1, None, 1), record(2, None, 2)]));
        assert_eq!(state.forest().len(), 2);
        assert_eq!(state.last_error(), None);
    }

    #[test]
    fn stale_reply_completion_is_a_no_op() {
        let mut state = ThreadState::new(PostId(1));
        let seq = state.begin_fetch();
        state.apply_fetch(seq, Ok(vec![record(1, None, 1)]));
        state.node_mut(CommentId(1)).set_draft(String::from("hi"));

        // the node vanishes before its submission completes
        let seq = state.begin_fetch();
        state.apply_fetch(seq, Ok(vec![]));
        state.finish_reply(CommentId(1), &Ok(()));
        assert!(state.nodes.is_empty());
    }
}
