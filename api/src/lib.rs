//! DevKit HTTP API
//!
//! actix-web application exposing registration, one-time code verification,
//! password reset and username suggestion endpoints.

pub mod app;
pub mod config;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
