//! Adapters - implementations of the ports against real infrastructure.

pub mod auth;
pub mod broker;
pub mod http;
pub mod postgres;
pub mod websocket;
