//! Core domain types and logic.

pub mod stock;
pub mod field_registry;
pub mod numeric;
pub mod condition;
pub mod query_parser;
pub mod condition_eval;
pub mod filter;
pub mod sort;
pub mod pagination;
pub mod screen;
pub mod config_validation;
pub mod error;
