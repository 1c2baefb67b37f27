use futures::channel::oneshot;
use sureddo_client::{
    api::{Comment, CommentId, Error, PostId},
    CommentNode, Session, ThreadState,
};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::{api, util, LoginInfo};

#[derive(Clone, PartialEq, Properties)]
pub struct CommentSectionProps {
    pub login: LoginInfo,
    pub post: PostId,
    pub session: Session,
}

pub enum CommentSectionMsg {
    Tick,
    ReceivedComments(u64, Result<Vec<Comment>, Error>),

    DraftChanged(String),
    SubmitComment,
    CommentSubmitted(Result<(), Error>),

    ToggleComposing(CommentId),
    ToggleCollapsed(CommentId),
    ReplyDraftChanged(CommentId, String),
    SubmitReply(CommentId),
    ReplySubmitted(CommentId, Result<(), Error>),
}

pub struct CommentSection {
    state: ThreadState,
    // Dropping this stops the refresh ticker
    ticker_canceller: oneshot::Receiver<()>,
}

impl CommentSection {
    fn refresh(&mut self, ctx: &Context<Self>) {
        let seq = self.state.begin_fetch();
        let login = ctx.props().login.clone();
        let post = self.state.post();
        ctx.link().send_future(async move {
            CommentSectionMsg::ReceivedComments(seq, api::fetch_comments(&login, post).await)
        });
    }
}

impl Component for CommentSection {
    type Message = CommentSectionMsg;
    type Properties = CommentSectionProps;

    fn create(ctx: &Context<Self>) -> Self {
        let (cancel, ticker_canceller) = oneshot::channel();
        spawn_local(api::start_comment_feed(ctx.link().clone(), cancel));
        let mut this = CommentSection {
            state: ThreadState::new(ctx.props().post),
            ticker_canceller,
        };
        this.refresh(ctx);
        this
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            CommentSectionMsg::Tick => {
                self.refresh(ctx);
                false
            }
            CommentSectionMsg::ReceivedComments(seq, result) => {
                self.state.apply_fetch(seq, result)
            }
            CommentSectionMsg::DraftChanged(text) => {
                self.state.composer_mut().set_draft(text);
                true
            }
            CommentSectionMsg::SubmitComment => {
                if let Ok(payload) = self.state.start_comment(&ctx.props().session) {
                    let login = ctx.props().login.clone();
                    ctx.link().send_future(async move {
                        CommentSectionMsg::CommentSubmitted(
                            api::insert_comment(&login, &payload).await,
                        )
                    });
                }
                true
            }
            CommentSectionMsg::CommentSubmitted(result) => {
                self.state.finish_comment(&result);
                if result.is_ok() {
                    // supersedes the next timer tick
                    self.refresh(ctx);
                }
                true
            }
            CommentSectionMsg::ToggleComposing(id) => {
                self.state.node_mut(id).toggle_composing();
                true
            }
            CommentSectionMsg::ToggleCollapsed(id) => {
                self.state.node_mut(id).toggle_collapsed();
                true
            }
            CommentSectionMsg::ReplyDraftChanged(id, text) => {
                self.state.node_mut(id).set_draft(text);
                true
            }
            CommentSectionMsg::SubmitReply(id) => {
                if let Ok(payload) = self.state.start_reply(&ctx.props().session, id) {
                    let login = ctx.props().login.clone();
                    ctx.link().send_future(async move {
                        CommentSectionMsg::ReplySubmitted(
                            id,
                            api::insert_comment(&login, &payload).await,
                        )
                    });
                }
                true
            }
            CommentSectionMsg::ReplySubmitted(id, result) => {
                self.state.finish_reply(id, &result);
                if result.is_ok() {
                    self.refresh(ctx);
                }
                true
            }
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.ticker_canceller.close();
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let composer = self.state.composer();
        let compose_form = match ctx.props().session.can_comment() {
            true => html! {
                <div class="comment-form mb-4">
                    <textarea
                        class="form-control"
                        rows="3"
                        placeholder="Write a comment..."
                        value={ composer.draft.clone() }
                        onchange={ ctx.link().callback(|e: web_sys::Event| {
                            let input: web_sys::HtmlTextAreaElement = e.target_unchecked_into();
                            CommentSectionMsg::DraftChanged(input.value())
                        }) }
                    />
                    <button
                        type="button"
                        class="btn btn-primary mt-2"
                        disabled={ composer.is_pending() }
                        onclick={ ctx.link().callback(|_| CommentSectionMsg::SubmitComment) }
                    >
                        { if composer.is_pending() { "Posting your comment..." } else { "Comment" } }
                    </button>
                    { for composer.submission_error().map(|e| html! {
                        <p class="text-danger">{ e.to_string() }</p>
                    }) }
                </div>
            },
            false => html! {
                <p class="text-muted">{ "You must be logged in to comment!" }</p>
            },
        };
        let fetch_error = self.state.last_error().map(|e| {
            html! {
                <div class="alert alert-warning">
                    { format!("Error refreshing comments: {}", e) }
                </div>
            }
        });
        let threads = match self.state.is_loaded() {
            false => html! { <div>{ "Loading comments..." }</div> },
            true => html! {
                <div class="comment-threads">
                    { for self.state.forest().iter().map(|node| self.view_node(ctx, node)) }
                </div>
            },
        };
        html! {
            <div class="comment-section mt-4">
                <h3 class="border-bottom pb-2">{ "Comments" }</h3>
                { compose_form }
                { for fetch_error }
                { threads }
            </div>
        }
    }
}

impl CommentSection {
    /// One comment plus, when expanded, its reply subtree. Recursion depth is
    /// whatever the thread depth is.
    fn view_node(&self, ctx: &Context<Self>, node: &CommentNode) -> Html {
        let id = node.comment.id;
        let state = self.state.node(id);
        let session = &ctx.props().session;

        let reply_button = session.can_comment().then(|| {
            html! {
                <button
                    type="button"
                    class="btn btn-link btn-sm"
                    onclick={ ctx.link().callback(move |_| CommentSectionMsg::ToggleComposing(id)) }
                >
                    { if state.composing { "Cancel" } else { "Reply" } }
                </button>
            }
        });
        let compose = (state.composing && session.can_comment()).then(|| {
            html! {
                <div class="reply-form ms-4 mb-2">
                    <textarea
                        class="form-control"
                        rows="2"
                        placeholder="Write a reply..."
                        value={ state.draft.clone() }
                        onchange={ ctx.link().callback(move |e: web_sys::Event| {
                            let input: web_sys::HtmlTextAreaElement = e.target_unchecked_into();
                            CommentSectionMsg::ReplyDraftChanged(id, input.value())
                        }) }
                    />
                    <button
                        type="button"
                        class="btn btn-primary btn-sm mt-2"
                        disabled={ state.is_pending() }
                        onclick={ ctx.link().callback(move |_| CommentSectionMsg::SubmitReply(id)) }
                    >
                        { if state.is_pending() { "Posting your reply..." } else { "Reply" } }
                    </button>
                    { for state.submission_error().map(|e| html! {
                        <p class="text-danger">{ e.to_string() }</p>
                    }) }
                </div>
            }
        });
        let toggle_replies = (!node.children.is_empty()).then(|| {
            html! {
                <button
                    type="button"
                    class="btn btn-link btn-sm ms-4"
                    onclick={ ctx.link().callback(move |_| CommentSectionMsg::ToggleCollapsed(id)) }
                >
                    { if state.collapsed { "Show Replies ▼" } else { "Hide Replies ▲" } }
                </button>
            }
        });
        let children = (!state.collapsed).then(|| {
            html! {
                <div class="replies ms-4">
                    { for node.children.iter().map(|child| self.view_node(ctx, child)) }
                </div>
            }
        });

        html! {
            <div class="comment">
                <div class="comment-card card p-3 mb-2">
                    <div class="d-flex justify-content-between mb-2">
                        <span class="fw-semibold">{ format!("@{}", node.comment.author_name) }</span>
                        <span class="text-muted">{ util::format_time(node.comment.created_at) }</span>
                    </div>
                    <p class="mb-2">{ &node.comment.content }</p>
                    { for reply_button }
                </div>
                { for compose }
                { for toggle_replies }
                { for children }
            </div>
        }
    }
}
