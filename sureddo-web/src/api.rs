use anyhow::Context;
use futures::{channel::oneshot, pin_mut, select, FutureExt};
use sureddo_client::{
    api::{Comment, Error, NewComment, NewPost, Post, PostId, User, UserId, Uuid},
    REFRESH_INTERVAL_SECS,
};

use crate::{ui, LoginInfo};

async fn sleep_for(d: chrono::Duration) {
    wasm_timer::Delay::new(d.to_std().unwrap_or(std::time::Duration::from_secs(0)))
        .await
        .expect("failed sleeping")
}

/// Ticks the comment section every [`REFRESH_INTERVAL_SECS`] until it
/// unmounts and drops its end of `cancel`.
pub async fn start_comment_feed(
    feed_sender: yew::html::Scope<ui::CommentSection>,
    mut cancel: oneshot::Sender<()>,
) {
    let mut cancellation = cancel.cancellation().fuse();
    loop {
        let tick = sleep_for(chrono::Duration::seconds(REFRESH_INTERVAL_SECS)).fuse();
        pin_mut!(tick);
        select! {
            _ = cancellation => {
                tracing::debug!("stopping comment refresh ticker");
                return;
            }
            _ = tick => feed_sender.send_message(ui::CommentSectionMsg::Tick),
        }
    }
}

#[derive(serde::Deserialize)]
struct TokenResponse {
    access_token: String,
    user: TokenUser,
}

#[derive(serde::Deserialize)]
struct TokenUser {
    id: Uuid,
    #[serde(default)]
    user_metadata: UserMetadata,
}

#[derive(Default, serde::Deserialize)]
struct UserMetadata {
    user_name: Option<String>,
}

/// Signs in against the identity provider, returning login info that carries
/// the bearer token and the user record.
pub async fn auth(
    host: String,
    anon_key: String,
    email: String,
    password: String,
) -> anyhow::Result<LoginInfo> {
    let resp: TokenResponse = crate::CLIENT
        .post(format!("{}/auth/v1/token?grant_type=password", host))
        .header("apikey", &anon_key)
        .json(&serde_json::json!({ "email": email, "password": password }))
        .send()
        .await
        .context("sending sign-in request")?
        .error_for_status()
        .context("sign-in was rejected")?
        .json()
        .await
        .context("parsing sign-in response")?;
    let name = resp.user.user_metadata.user_name.unwrap_or(email);
    Ok(LoginInfo {
        host,
        anon_key,
        token: Some(resp.access_token),
        user: Some(User {
            id: UserId(resp.user.id),
            name,
        }),
    })
}

fn with_auth(login: &LoginInfo, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    let req = req.header("apikey", &login.anon_key);
    match &login.token {
        Some(token) => req.bearer_auth(token),
        None => req,
    }
}

async fn fetch<R>(login: &LoginInfo, path: &str) -> Result<R, Error>
where
    R: for<'de> serde::Deserialize<'de>,
{
    let resp = with_auth(
        login,
        crate::CLIENT.get(format!("{}/rest/v1/{}", login.host, path)),
    )
    .send()
    .await
    .map_err(|e| Error::Fetch(e.to_string()))?;
    if !resp.status().is_success() {
        return Err(Error::Fetch(format!(
            "data store answered {}",
            resp.status()
        )));
    }
    resp.json().await.map_err(|e| Error::Fetch(e.to_string()))
}

async fn insert<B>(login: &LoginInfo, table: &str, body: &B) -> Result<(), Error>
where
    B: serde::Serialize,
{
    let resp = with_auth(
        login,
        crate::CLIENT.post(format!("{}/rest/v1/{}", login.host, table)),
    )
    .header("prefer", "return=minimal")
    .json(body)
    .send()
    .await
    .map_err(|e| Error::Insert(e.to_string()))?;
    match resp.status().is_success() {
        true => Ok(()),
        false => Err(Error::Insert(format!(
            "data store answered {}",
            resp.status()
        ))),
    }
}

pub async fn fetch_posts(login: &LoginInfo) -> Result<Vec<Post>, Error> {
    fetch(login, "posts?select=*&order=created_at.desc").await
}

pub async fn fetch_post(login: &LoginInfo, post: PostId) -> Result<Post, Error> {
    let posts: Vec<Post> = fetch(login, &format!("posts?select=*&id=eq.{}", post.0)).await?;
    posts.into_iter().next().ok_or(Error::UnknownPost(post))
}

pub async fn insert_post(login: &LoginInfo, post: &NewPost) -> Result<(), Error> {
    insert(login, "posts", post).await
}

pub async fn fetch_comments(login: &LoginInfo, post: PostId) -> Result<Vec<Comment>, Error> {
    fetch(
        login,
        &format!(
            "comments?select=*&post_id=eq.{}&order=created_at.asc",
            post.0
        ),
    )
    .await
}

pub async fn insert_comment(login: &LoginInfo, comment: &NewComment) -> Result<(), Error> {
    insert(login, "comments", comment).await
}

/// Uploads a blob to media storage and returns its public URL
pub async fn upload_image(
    login: &LoginInfo,
    path: &str,
    mime: &str,
    bytes: Vec<u8>,
) -> Result<String, Error> {
    let resp = with_auth(
        login,
        crate::CLIENT.post(format!(
            "{}/storage/v1/object/post-images/{}",
            login.host, path
        )),
    )
    .header("content-type", String::from(mime))
    .body(bytes)
    .send()
    .await
    .map_err(|e| Error::Insert(e.to_string()))?;
    if !resp.status().is_success() {
        return Err(Error::Insert(format!(
            "media storage answered {}",
            resp.status()
        )));
    }
    Ok(format!(
        "{}/storage/v1/object/public/post-images/{}",
        login.host, path
    ))
}
