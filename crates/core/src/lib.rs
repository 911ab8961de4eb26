//! Copper Kettle Core - Shared types library.
//!
//! This crate provides common types used across all Copper Kettle components:
//! - `cart` - Cart state management and catalog access
//! - `cli` - Command-line tools for driving the cart
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and prices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
