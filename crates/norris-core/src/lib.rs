//! Core types and routines for collecting Chuck Norris facts.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! remote API and the relational store are reached through the
//! [`source::FactSource`] and [`store::FactStore`] traits, so the fetch and
//! reconcile routines can be exercised against in-memory fakes.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod fact;
pub mod fetch;
pub mod harvest;
pub mod reconcile;
pub mod source;
pub mod store;

pub use error::{Error, Result};

#[cfg(test)]
mod testing;
