use std::collections::{HashMap, HashSet};

use crate::api::{Comment, CommentId};

/// One comment with its replies attached under it. The forest is a derived,
/// disposable view: it is rebuilt wholesale from the flat fetch result on
/// every refresh and never mutated in place.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CommentNode {
    pub comment: Comment,
    pub children: Vec<CommentNode>,
}

impl CommentNode {
    fn leaf(comment: Comment) -> CommentNode {
        CommentNode {
            comment,
            children: Vec::new(),
        }
    }

    /// Number of comments in this subtree, this one included
    pub fn len(&self) -> usize {
        1 + self.children.iter().map(CommentNode::len).sum::<usize>()
    }
}

/// Rebuilds the reply forest from the flat records `fetch_comments` returned.
///
/// The input comes pre-sorted by ascending `created_at`, so sibling order and
/// root order are just input order. A record whose `parent_comment_id` matches
/// no record in the batch is dropped, as is a record naming itself as parent;
/// neither is promoted to a root.
pub fn build_tree(records: &[Comment]) -> Vec<CommentNode> {
    let ids: HashSet<CommentId> = records.iter().map(|c| c.id).collect();
    let mut children: HashMap<CommentId, Vec<&Comment>> = HashMap::new();
    let mut roots: Vec<&Comment> = Vec::new();
    for c in records {
        match c.parent_comment_id {
            None => roots.push(c),
            Some(parent) if parent == c.id => {
                tracing::warn!(comment=?c.id, "dropping self-referencing comment");
            }
            Some(parent) if ids.contains(&parent) => {
                children.entry(parent).or_insert(Vec::new()).push(c);
            }
            Some(parent) => {
                tracing::warn!(comment=?c.id, ?parent, "dropping comment with unknown parent");
            }
        }
    }
    roots.into_iter().map(|c| attach(c, &children)).collect()
}

fn attach(comment: &Comment, children: &HashMap<CommentId, Vec<&Comment>>) -> CommentNode {
    let mut node = CommentNode::leaf(comment.clone());
    if let Some(replies) = children.get(&node.comment.id) {
        node.children = replies.iter().map(|c| attach(c, children)).collect();
    }
    node
}

pub(crate) fn collect_ids(forest: &[CommentNode], into: &mut HashSet<CommentId>) {
    for node in forest {
        into.insert(node.comment.id);
        collect_ids(&node.children, into);
    }
}
