use gloo_storage::{LocalStorage, Storage};
use sureddo_client::{api::PostId, Session};
use yew::prelude::*;

use crate::{ui, LoginInfo};

const KEY_LOGIN: &str = "login";

pub enum AppMsg {
    UserLogin(LoginInfo),
    Logout,
    OpenFeed,
    OpenPost(PostId),
    OpenNewPost,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum View {
    Feed,
    Post(PostId),
    NewPost,
}

pub struct App {
    login: Option<LoginInfo>,
    view: View,
}

impl App {
    fn session(&self) -> Session {
        match self.login.as_ref().and_then(|l| l.user.clone()) {
            Some(user) => Session::logged_in(user),
            None => Session::anonymous(),
        }
    }
}

impl Component for App {
    type Message = AppMsg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        App {
            login: LocalStorage::get(KEY_LOGIN).ok(),
            view: View::Feed,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            AppMsg::UserLogin(login) => {
                LocalStorage::set(KEY_LOGIN, &login).expect("failed saving login info");
                self.login = Some(login);
                self.view = View::Feed;
            }
            AppMsg::Logout => {
                LocalStorage::delete(KEY_LOGIN);
                self.login = None;
                self.view = View::Feed;
            }
            AppMsg::OpenFeed => self.view = View::Feed,
            AppMsg::OpenPost(id) => self.view = View::Post(id),
            AppMsg::OpenNewPost => self.view = View::NewPost,
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let login = match &self.login {
            None => {
                return html! {
                    <div class="container">
                        <ui::Login on_submit={ ctx.link().callback(AppMsg::UserLogin) } />
                    </div>
                }
            }
            Some(login) => login.clone(),
        };
        let user_label = match &login.user {
            Some(user) => format!("@{}", user.name),
            None => String::from("browsing anonymously"),
        };
        let main = match self.view {
            View::Feed => html! {
                <ui::PostList
                    login={ login.clone() }
                    on_open={ ctx.link().callback(AppMsg::OpenPost) }
                />
            },
            View::Post(id) => html! {
                <ui::PostView
                    login={ login.clone() }
                    post={ id }
                    session={ self.session() }
                />
            },
            View::NewPost => html! {
                <ui::NewPost
                    login={ login.clone() }
                    on_created={ ctx.link().callback(|_| AppMsg::OpenFeed) }
                />
            },
        };
        html! {
            <div class="container">
                <nav class="navbar d-flex align-items-center mb-4">
                    <button
                        type="button"
                        class="btn btn-link"
                        onclick={ ctx.link().callback(|_| AppMsg::OpenFeed) }
                    >
                        { "Home" }
                    </button>
                    <button
                        type="button"
                        class="btn btn-link"
                        onclick={ ctx.link().callback(|_| AppMsg::OpenNewPost) }
                    >
                        { "Create Post" }
                    </button>
                    <span class="ms-auto text-muted">{ user_label }</span>
                    <button
                        type="button"
                        class="btn btn-link"
                        onclick={ ctx.link().callback(|_| AppMsg::Logout) }
                    >
                        { "Logout" }
                    </button>
                </nav>
                { main }
            </div>
        }
    }
}
