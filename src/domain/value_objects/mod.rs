mod list_source;
mod modify_type;
mod title_type;
mod watch_status;

pub use list_source::ListSource;
pub use modify_type::ModifyType;
pub use title_type::TitleType;
pub use watch_status::WatchStatus;
