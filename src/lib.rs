//! Library exports for the URL shortener application
//!
//! Exposes the codec, validator, stores and HTTP layer for the binary and
//! for integration tests.

pub mod codec;
pub mod config;
pub mod error;
pub mod handler;
pub mod model;
pub mod route;
pub mod service;
pub mod state;
pub mod store;
pub mod validator;
