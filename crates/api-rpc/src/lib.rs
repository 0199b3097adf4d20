//! JSON-RPC API Layer
//!
//! Exposes the dispatch bridge to out-of-process callers over JSON-RPC 2.0.

pub mod error;
pub mod handler;
pub mod server;
pub mod types;

pub use server::{RpcServer, RpcServerConfig};
