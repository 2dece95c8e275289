//! API module for HTTP endpoints
//!
//! This module provides the REST API consumed by the blog front end.

pub mod http;
pub mod rest;
pub mod state;
