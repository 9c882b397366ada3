pub mod grpc_client;
pub mod order;
