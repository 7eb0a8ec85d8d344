use auth::token::TokenIssuer;
use config::Config;
use service::user::UserService;

pub mod auth;
pub mod config;
pub mod middleware;
pub mod routes;
pub mod service;
pub mod store;
pub mod validation;

#[derive(Clone)]
pub struct AppState {
    pub service: UserService,
    pub tokens: TokenIssuer,
    pub config: Config,
}
