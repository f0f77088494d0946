pub mod category;
pub mod errors;
pub mod menu_item;

pub use category::Category;
pub use menu_item::MenuItem;
