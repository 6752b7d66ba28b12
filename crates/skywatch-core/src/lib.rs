// ABOUTME: Core types and constants for the skywatch conditions platform
// ABOUTME: Foundation crate with error handling, domain models, and fixed thresholds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Skywatch Labs

#![deny(unsafe_code)]

//! # Skywatch Core
//!
//! Foundation crate providing shared types and constants for the skywatch
//! conditions-intelligence core. This crate is designed to change infrequently,
//! enabling incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `AppResult`
//! - **models**: Domain models (`HourlySample`, `AlertEvent`, `AlertRecord`)
//! - **constants**: Fixed thresholds and defaults organized by domain

/// Unified error handling with `AppError` and the `AppResult` alias
pub mod errors;

/// Domain models shared across the workspace
pub mod models;

/// Fixed thresholds and defaults organized by domain
pub mod constants;

pub use errors::{AppError, AppResult};
pub use models::{AlertEvent, AlertRecord, HourlySample};
