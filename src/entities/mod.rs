pub mod line_items;
pub mod orders;

pub use line_items as line_item_entity;
pub use orders as order_entity;
pub use orders::OrderStatus;
