mod column;
mod table;

pub use column::Column;
pub use table::Table;
