pub mod auth;
pub mod config;
pub mod embed_template;
pub mod panel;
pub mod ticket;

pub const AUTH_TAG: &str = "auth";
pub const CONFIG_TAG: &str = "config";
pub const TICKET_TAG: &str = "tickets";
pub const PANEL_TAG: &str = "panels";
pub const TEMPLATE_TAG: &str = "templates";
