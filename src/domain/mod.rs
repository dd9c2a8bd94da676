pub mod entities;
pub mod services;
pub mod title_list;
pub mod value_objects;

pub use entities::{FieldDelta, Title, TitleData, TitleRecord};
pub use title_list::TitleList;
