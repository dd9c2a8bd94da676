mod title;

pub use title::{FieldDelta, Title, TitleData, TitleRecord, COMPARABLE_FIELDS};
