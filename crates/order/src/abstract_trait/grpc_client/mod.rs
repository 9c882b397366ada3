mod account;
mod product;

pub use self::account::{AccountGrpcClientTrait, DynAccountGrpcClient};
pub use self::product::{DynProductGrpcClient, ProductGrpcClientTrait};
