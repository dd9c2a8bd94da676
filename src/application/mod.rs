pub mod services;

pub use services::SyncService;
