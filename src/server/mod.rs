//! Server-side backend: Discord bot, REST API, and business logic.
//!
//! The backend uses Axum as the web framework, SeaORM for database
//! operations, and Serenity for Discord bot integration.
//!
//! # Architecture
//!
//! The server follows a layered architecture with clear separation of
//! concerns:
//!
//! - **Controller Layer** (`controller/`) - HTTP request handlers, access control, and DTO conversion
//! - **Service Layer** (`service/`) - Business logic orchestration between controllers, bot, and data layer
//! - **Data Layer** (`data/`) - Database operations and state-machine guards
//! - **Model Layer** (`model/`) - Domain enums and operation-specific parameter types
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//! - **Middleware** (`middleware/`) - JWT authentication and permission-tier guards
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared application state (DB, HTTP clients, rate limiter)
//! - **Startup** (`startup`) - Initialization of database and HTTP clients
//! - **Router** (`router`) - Axum route configuration and API documentation
//! - **Scheduler** (`scheduler/`) - Auto-close timers and the hourly inactivity sweep
//! - **Cache** (`cache/`) - Bounded in-process caches (ticket-creation rate limiter)
//! - **Bot** (`bot/`) - Discord gateway client, slash commands, and interaction routing

pub mod bot;
pub mod cache;
pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod middleware;
pub mod model;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;
