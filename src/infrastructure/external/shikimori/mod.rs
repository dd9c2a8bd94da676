mod client;
mod dto;
mod mapper;

pub use client::ShikimoriClient;
pub use dto::{ShikimoriTitleBrief, ShikimoriUser, ShikimoriUserRate};
pub use mapper::ShikimoriMapper;
