//! PicPay TUI - A terminal client for a wallet and transfer service.
//!
//! This library provides:
//! - Wallet, creation and transfer models with account-type normalization
//! - Form models with client-side validation
//! - An HTTP client for the wallet/transfer REST API
//! - A view controller that drives submissions and the theme preference
//! - A persistent preference store

pub mod config;
pub mod controller;
pub mod domain;
pub mod infra;
