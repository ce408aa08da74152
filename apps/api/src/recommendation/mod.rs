//! Recommendations: catalog sources, relevance ranking and search.

pub mod catalog;
pub mod filters;
pub mod handlers;
pub mod ranker;
