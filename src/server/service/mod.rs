pub mod auth;
pub mod embed_template;
pub mod panel;
pub mod permission;
pub mod ticket;
pub mod transcript;
