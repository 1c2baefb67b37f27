use yew::prelude::*;

use crate::{api, LoginInfo};

#[derive(Clone, PartialEq, Properties)]
pub struct LoginProps {
    pub on_submit: Callback<LoginInfo>,
}

pub struct Login {
    host: String,
    anon_key: String,
    email: String,
    pass: String,
    pending: bool,
    error: Option<String>,
}

pub enum LoginMsg {
    HostChanged(String),
    KeyChanged(String),
    EmailChanged(String),
    PassChanged(String),
    SubmitClicked,
    BrowseClicked,
    AuthDone(Result<LoginInfo, String>),
}

impl Component for Login {
    type Message = LoginMsg;
    type Properties = LoginProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            host: String::new(),
            anon_key: String::new(),
            email: String::new(),
            pass: String::new(),
            pending: false,
            error: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            LoginMsg::HostChanged(h) => self.host = h,
            LoginMsg::KeyChanged(k) => self.anon_key = k,
            LoginMsg::EmailChanged(e) => self.email = e,
            LoginMsg::PassChanged(p) => self.pass = p,
            LoginMsg::SubmitClicked => {
                self.pending = true;
                self.error = None;
                let (host, anon_key) = (self.host.clone(), self.anon_key.clone());
                let (email, pass) = (self.email.clone(), self.pass.clone());
                ctx.link().send_future(async move {
                    LoginMsg::AuthDone(
                        api::auth(host, anon_key, email, pass)
                            .await
                            .map_err(|e| format!("{:#}", e)),
                    )
                });
            }
            LoginMsg::BrowseClicked => {
                ctx.props().on_submit.emit(LoginInfo {
                    host: self.host.clone(),
                    anon_key: self.anon_key.clone(),
                    token: None,
                    user: None,
                });
                return false;
            }
            LoginMsg::AuthDone(Ok(login)) => {
                ctx.props().on_submit.emit(login);
                return false;
            }
            LoginMsg::AuthDone(Err(e)) => {
                self.pending = false;
                self.error = Some(e);
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        macro_rules! callback_for {
            ($msg:ident) => {
                ctx.link().callback(|e: web_sys::Event| {
                    let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                    LoginMsg::$msg(input.value())
                })
            };
        }
        let error = self.error.as_ref().map(|e| {
            html! {
                <p class="text-danger">{ e.clone() }</p>
            }
        });
        html! {<>
            <div class="text-center my-4">
                <h1>{ "Sign in" }</h1>
            </div>
            <form class="login-form">
                <div class="input-group mb-3">
                    <label class="input-group-text col-xl-2" for="host">{ "Host" }</label>
                    <input
                        type="url"
                        class="form-control form-control-lg"
                        id="host"
                        placeholder="https://example.supabase.co"
                        value={ self.host.clone() }
                        onchange={ callback_for!(HostChanged) }
                    />
                </div>
                <div class="input-group mb-3">
                    <label class="input-group-text col-xl-2" for="anon-key">{ "Anon key" }</label>
                    <input
                        type="text"
                        class="form-control form-control-lg"
                        id="anon-key"
                        placeholder="public anon key"
                        value={ self.anon_key.clone() }
                        onchange={ callback_for!(KeyChanged) }
                    />
                </div>
                <div class="input-group mb-3">
                    <label class="input-group-text col-xl-2" for="email">{ "Email" }</label>
                    <input
                        type="email"
                        class="form-control form-control-lg"
                        id="email"
                        placeholder="you@example.org"
                        value={ self.email.clone() }
                        onchange={ callback_for!(EmailChanged) }
                    />
                </div>
                <div class="input-group mb-3">
                    <label class="input-group-text col-xl-2" for="pass">{ "Password" }</label>
                    <input
                        type="password"
                        class="form-control form-control-lg"
                        id="pass"
                        placeholder="pass"
                        value={ self.pass.clone() }
                        onchange={ callback_for!(PassChanged) }
                    />
                </div>
                { for error }
                <button
                    type="button"
                    class="btn btn-primary"
                    disabled={ self.pending }
                    onclick={ ctx.link().callback(|_| LoginMsg::SubmitClicked) }
                >
                    { if self.pending { "Signing in..." } else { "Sign in" } }
                </button>
                <button
                    type="button"
                    class="btn btn-link"
                    onclick={ ctx.link().callback(|_| LoginMsg::BrowseClicked) }
                >
                    { "Browse anonymously" }
                </button>
            </form>
        </>}
    }
}
