pub mod chain;
pub mod client;
pub mod erc20;
pub mod value;

pub use alloy_contract;
pub use alloy_json_rpc;
pub use alloy_network;
pub use alloy_primitives;
pub use alloy_provider;
pub use alloy_rpc_client;
pub use alloy_rpc_types;
pub use alloy_sol_types;
pub use alloy_transport;
