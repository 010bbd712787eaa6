pub mod flash;
pub mod order_number;
