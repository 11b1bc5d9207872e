// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Chainbase Web3 API integration
//!
//! This crate wraps the Chainbase account endpoints on top of the shared
//! [`api_client::FetchClient`].
//!
//! # Architecture
//!
//! - **Client**: [`chainbase::ChainbaseClient`] - token, transaction and balance lookups
//! - **Envelope**: [`chainbase::Envelope`] - validation of the `{code, message, data, next_page}` wrapper
//! - **Pagination**: [`paginator::Paginator`] - sequential `next_page` traversal with a page cap
//!
//! Every request carries the caller's [`shared_types::Credential`] in the
//! `x-api-key` header, so one client can serve many concurrent credentials.

pub mod chainbase;
pub mod paginator;

pub use chainbase::*;
pub use paginator::*;
