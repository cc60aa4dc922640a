pub mod client;
pub mod config;
pub mod context;
pub mod session;
pub mod transfer;
pub mod utils;

pub use client::*;
pub use config::*;
pub use context::*;
pub use session::*;
pub use transfer::*;
