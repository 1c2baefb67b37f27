use sureddo_client::api::User;

mod api;
mod ui;
mod util;

lazy_static::lazy_static! {
    pub static ref CLIENT: reqwest::Client = reqwest::Client::new();
}

/// Connection and identity info for the hosted backend. `token` and `user`
/// are absent for anonymous browse sessions.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct LoginInfo {
    pub host: String,
    pub anon_key: String,
    pub token: Option<String>,
    pub user: Option<User>,
}

fn main() {
    tracing_wasm::set_as_global_default();
    yew::Renderer::<ui::App>::new().render();
}
