//! screener: in-memory stock fundamentals screener.
//!
//! Hexagonal architecture: query/filter/sort/paginate logic in [`domain`], port traits
//! in [`ports`], concrete implementations in [`adapters`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
