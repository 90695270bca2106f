//! Discord bot: gateway client, slash commands, and interaction routing.
//!
//! Interactions arrive at the single `Handler` and are routed by decoded
//! `ComponentAction`/`ModalAction` variants (buttons, modals) or command
//! name (slash commands). Every handler converts its error into an
//! ephemeral reply; nothing is retried.

pub mod commands;
pub mod handler;
pub mod interaction;
pub mod start;
