pub mod account;
pub mod api;
pub mod order;
pub mod product;
