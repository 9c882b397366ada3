mod command;
mod query;

pub use self::command::OrderCommandGrpcServiceImpl;
pub use self::query::OrderQueryGrpcServiceImpl;
