mod client;
mod dto;
mod mapper;

pub use client::MalClient;
pub use dto::{MalListEntry, MalListResponse, MalListStatus, MalNode, MalPaging};
pub use mapper::MalMapper;
