//! DayFlow HRMS engine
//!
//! This crate provides the salary component calculator, attendance work-hour
//! derivation and the leave allocation ledger behind the DayFlow HRMS,
//! together with the in-memory store, role-based access policy and HTTP API
//! that expose them.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod permissions;
pub mod service;
pub mod store;
