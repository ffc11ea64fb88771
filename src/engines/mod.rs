//! Search backend implementations.
//!
//! Each module provides a struct implementing [`crate::source::PageSource`].

pub mod custom_search;

pub use custom_search::CustomSearchClient;
