pub mod books;
pub mod catalog;
pub mod circulation;
pub mod core;
pub mod gateway;
pub mod issued;
pub mod transactions;
pub mod utils;
