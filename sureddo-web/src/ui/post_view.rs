use sureddo_client::{
    api::{Error, Post, PostId},
    Session,
};
use yew::prelude::*;

use crate::{api, ui, util, LoginInfo};

#[derive(Clone, PartialEq, Properties)]
pub struct PostViewProps {
    pub login: LoginInfo,
    pub post: PostId,
    pub session: Session,
}

pub enum PostViewMsg {
    ReceivedPost(Result<Post, Error>),
}

pub struct PostView {
    post: Option<Result<Post, Error>>,
}

impl Component for PostView {
    type Message = PostViewMsg;
    type Properties = PostViewProps;

    fn create(ctx: &Context<Self>) -> Self {
        let login = ctx.props().login.clone();
        let id = ctx.props().post;
        ctx.link().send_future(async move {
            PostViewMsg::ReceivedPost(api::fetch_post(&login, id).await)
        });
        PostView { post: None }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            PostViewMsg::ReceivedPost(post) => self.post = Some(post),
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let post = match &self.post {
            None => return html! { <div>{ "Loading post..." }</div> },
            Some(Err(e)) => {
                return html! {
                    <div class="alert alert-danger">
                        { format!("Error loading post: {}", e) }
                    </div>
                }
            }
            Some(Ok(post)) => post,
        };
        html! {
            <div class="post-view">
                <h2 class="text-center mb-4">{ &post.title }</h2>
                <img src={ post.image_url.clone() } alt={ post.title.clone() } class="post-banner rounded mb-4" />
                <p class="mb-4">{ &post.content }</p>
                <p class="fst-italic text-muted">
                    { format!("Posted on: {}", util::format_time(post.created_at)) }
                </p>
                <ui::CommentSection
                    login={ ctx.props().login.clone() }
                    post={ post.id }
                    session={ ctx.props().session.clone() }
                />
            </div>
        }
    }
}
