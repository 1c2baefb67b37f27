use sureddo_client::api::{Error, NewPost as NewPostPayload};
use yew::prelude::*;

use crate::{api, util, LoginInfo};

#[derive(Clone, PartialEq, Properties)]
pub struct NewPostProps {
    pub login: LoginInfo,
    pub on_created: Callback<()>,
}

pub enum NewPostMsg {
    TitleChanged(String),
    ContentChanged(String),
    FileChanged(Option<web_sys::File>),
    SubmitClicked,
    SubmitDone(Result<(), Error>),
}

pub struct NewPost {
    title: String,
    content: String,
    file: Option<web_sys::File>,
    pending: bool,
    error: Option<String>,
}

impl Component for NewPost {
    type Message = NewPostMsg;
    type Properties = NewPostProps;

    fn create(_ctx: &Context<Self>) -> Self {
        NewPost {
            title: String::new(),
            content: String::new(),
            file: None,
            pending: false,
            error: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            NewPostMsg::TitleChanged(t) => self.title = t,
            NewPostMsg::ContentChanged(c) => self.content = c,
            NewPostMsg::FileChanged(f) => self.file = f,
            NewPostMsg::SubmitClicked => {
                // Nothing happens until an image has been picked
                let file = match &self.file {
                    None => return false,
                    Some(file) => file.clone(),
                };
                self.pending = true;
                self.error = None;
                let login = ctx.props().login.clone();
                let (title, content) = (self.title.clone(), self.content.clone());
                ctx.link().send_future(async move {
                    NewPostMsg::SubmitDone(create_post(&login, title, content, file).await)
                });
            }
            NewPostMsg::SubmitDone(Ok(())) => {
                ctx.props().on_created.emit(());
                return false;
            }
            NewPostMsg::SubmitDone(Err(e)) => {
                self.pending = false;
                self.error = Some(e.to_string());
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let error = self.error.as_ref().map(|e| {
            html! {
                <p class="text-danger">{ e.clone() }</p>
            }
        });
        html! {
            <div class="new-post-form card p-4">
                <h2 class="mb-4">{ "Create a Post" }</h2>
                <div class="mb-3">
                    <label class="form-label" for="title">{ "Title" }</label>
                    <input
                        type="text"
                        class="form-control"
                        id="title"
                        value={ self.title.clone() }
                        onchange={ ctx.link().callback(|e: web_sys::Event| {
                            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                            NewPostMsg::TitleChanged(input.value())
                        }) }
                    />
                </div>
                <div class="mb-3">
                    <label class="form-label" for="content">{ "Content" }</label>
                    <textarea
                        class="form-control"
                        id="content"
                        rows="5"
                        value={ self.content.clone() }
                        onchange={ ctx.link().callback(|e: web_sys::Event| {
                            let input: web_sys::HtmlTextAreaElement = e.target_unchecked_into();
                            NewPostMsg::ContentChanged(input.value())
                        }) }
                    />
                </div>
                <div class="mb-3">
                    <label class="form-label" for="image">{ "Upload Image" }</label>
                    <input
                        type="file"
                        class="form-control"
                        id="image"
                        accept="image/*"
                        onchange={ ctx.link().callback(|e: web_sys::Event| {
                            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                            NewPostMsg::FileChanged(input.files().and_then(|files| files.get(0)))
                        }) }
                    />
                </div>
                { for error }
                <button
                    type="button"
                    class="btn btn-primary"
                    disabled={ self.pending }
                    onclick={ ctx.link().callback(|_| NewPostMsg::SubmitClicked) }
                >
                    { if self.pending { "Creating post..." } else { "Create Post" } }
                </button>
            </div>
        }
    }
}

/// Ships the image to media storage first, then inserts the post record
/// pointing at the returned public URL
async fn create_post(
    login: &LoginInfo,
    title: String,
    content: String,
    file: web_sys::File,
) -> Result<(), Error> {
    let bytes = util::read_file(&file).await?;
    let path = format!(
        "{}-{}-{}",
        title,
        chrono::Utc::now().timestamp_millis(),
        file.name()
    );
    let image_url = api::upload_image(login, &path, &file.type_(), bytes).await?;
    let payload = NewPostPayload {
        title,
        content,
        image_url,
    };
    payload.validate()?;
    api::insert_post(login, &payload).await
}
