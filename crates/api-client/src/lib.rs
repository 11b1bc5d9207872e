// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Retrying fetch client for upstream data providers
//!
//! This crate provides the single HTTP entry point the crawler uses to talk to
//! external APIs. Every request is a JSON `GET` with a total timeout; transient
//! failures are retried with exponential backoff and the final outcome is
//! either a JSON value or "absent".
//!
//! # Core Abstractions
//!
//! - **[`FetchClient`]**: explicitly started connection pool plus retry loop
//! - **[`FetchConfig`]**: timeout, retry budget and backoff base
//! - **[`FetchError`]**: classification of attempt failures into retryable and terminal
//! - **[`QueryValue`]**: typed query parameters normalized before transmission
//!
//! # Failure Semantics
//!
//! - HTTP 404 is terminal and yields `Ok(None)` after a single attempt
//! - Any other failure is retried up to `max_retries` times, then yields `Ok(None)`
//! - Only a precondition violation ([`FetchError::NotStarted`]) is returned as an error

pub mod client;
pub mod config;
pub mod error;
pub mod params;

pub use client::FetchClient;
pub use config::FetchConfig;
pub use error::FetchError;
pub use params::{QueryValue, normalize_params};
