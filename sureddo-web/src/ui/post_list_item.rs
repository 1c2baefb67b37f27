use sureddo_client::api::{Post, PostId};
use yew::prelude::*;

#[derive(Clone, PartialEq, Properties)]
pub struct PostListItemProps {
    pub post: Post,
    pub on_open: Callback<PostId>,
}

#[function_component(PostListItem)]
pub fn post_list_item(p: &PostListItemProps) -> Html {
    let avatar = match &p.post.avatar_url {
        Some(url) => html! { <img src={ url.clone() } alt="User Avatar" class="avatar rounded-circle" /> },
        None => html! { <div class="avatar avatar-placeholder rounded-circle"></div> },
    };
    html! {
        <div
            class="post-card card mb-4 shadow-sm"
            onclick={ let id = p.post.id; p.on_open.reform(move |_| id) }
        >
            <div class="card-body">
                <div class="d-flex align-items-center gap-3 mb-3">
                    { avatar }
                    <div class="fw-semibold">{ &p.post.title }</div>
                </div>
                <div class="mb-2 text-muted">{ &p.post.content }</div>
                <img src={ p.post.image_url.clone() } alt={ p.post.title.clone() } class="post-banner rounded" />
                <div class="d-flex gap-4 text-muted mt-2">
                    <span>{ format!("Likes: {}", p.post.like_count.unwrap_or(0)) }</span>
                    <span>{ format!("Comments: {}", p.post.comment_count.unwrap_or(0)) }</span>
                </div>
            </div>
        </div>
    }
}
