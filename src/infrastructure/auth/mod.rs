mod code_listener;
mod myanimelist;
mod shikimori;
mod token;

pub use myanimelist::MalAuth;
pub use shikimori::ShikimoriAuth;
pub use token::{OAuthToken, TokenStore};
