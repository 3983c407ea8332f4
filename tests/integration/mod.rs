//! Integration tests for picpay-tui.
//!
//! Provides an in-process stand-in for the wallet service:
//! - `GET /wallets`, `POST /wallets`, `POST /transfer` on a random local port
//! - Switchable failure modes for each endpoint
//! - A record of every request body received

pub mod api_client;
pub mod preference_store;
pub mod server;
pub mod view_flow;
