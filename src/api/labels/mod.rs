// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image labels API endpoint module
//!
//! Provides GET /v1/labels?imageUrl=... returning translated labels.

pub mod handler;
pub mod request;

pub use handler::labels_handler;
pub use request::LabelsQuery;
