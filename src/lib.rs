//! TaskHub - todo backend with live change notifications.
//!
//! A REST API for users, lists and todos backed by Postgres, plus a
//! push channel: every todo update or deletion is published to a
//! durable broker queue and relayed to connected WebSocket clients.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
