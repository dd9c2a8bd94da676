pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod shared;

pub use application::SyncService;
pub use domain::{Title, TitleData, TitleList, TitleRecord};
pub use shared::errors::{AppError, AppResult};
