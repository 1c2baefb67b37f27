use sureddo_client::api::{Error, Post, PostId};
use yew::prelude::*;

use crate::{api, ui, LoginInfo};

#[derive(Clone, PartialEq, Properties)]
pub struct PostListProps {
    pub login: LoginInfo,
    pub on_open: Callback<PostId>,
}

pub enum PostListMsg {
    ReceivedPosts(Result<Vec<Post>, Error>),
}

pub struct PostList {
    // None while the initial fetch is in flight
    posts: Option<Result<Vec<Post>, Error>>,
}

impl Component for PostList {
    type Message = PostListMsg;
    type Properties = PostListProps;

    fn create(ctx: &Context<Self>) -> Self {
        let login = ctx.props().login.clone();
        ctx.link().send_future(async move {
            PostListMsg::ReceivedPosts(api::fetch_posts(&login).await)
        });
        PostList { posts: None }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            PostListMsg::ReceivedPosts(posts) => self.posts = Some(posts),
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let posts = match &self.posts {
            None => return html! { <div>{ "Loading posts..." }</div> },
            Some(Err(e)) => {
                return html! {
                    <div class="alert alert-danger">
                        { format!("Error loading posts: {}", e) }
                    </div>
                }
            }
            Some(Ok(posts)) => posts,
        };
        html! {
            <div class="post-list">
                <h2 class="text-center mb-4">{ "Recent Updates" }</h2>
                { for posts.iter().map(|post| html! {
                    <ui::PostListItem post={ post.clone() } on_open={ ctx.props().on_open.clone() } />
                }) }
            </div>
        }
    }
}
