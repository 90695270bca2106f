//! Wire-format DTOs shared by the REST API.
//!
//! These types define the JSON contract between the dashboard and the server.
//! Discord snowflakes are serialized as strings (JavaScript numbers lose
//! precision above 2^53), using the serde helpers in `api`.

pub mod api;
pub mod auth;
pub mod config;
pub mod embed_template;
pub mod panel;
pub mod ticket;
