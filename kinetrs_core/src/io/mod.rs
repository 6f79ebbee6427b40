//! Module for reading networks and persisting simulation results
pub mod arrays;
pub mod json;
pub mod spec_parse;
