//! Factory methods for creating test data.
//!
//! Each entity has a `Factory` struct for customization and a `create_*`
//! convenience function for quick default creation. Factories insert rows
//! directly through the entity ActiveModels, bypassing repository guards, so
//! tests can stage any state (including ones the repositories would refuse
//! to produce).
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     // Create with defaults
//!     let ticket = factory::ticket::create_ticket(&db, 100).await?;
//!     let config = factory::ticket_config::create_config(&db, 100).await?;
//!
//!     // Customize with the builder
//!     let stale = factory::ticket::TicketFactory::new(&db, 100)
//!         .user_id(42)
//!         .last_activity_at(chrono::Utc::now() - chrono::Duration::hours(100))
//!         .build()
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

pub mod embed_template;
pub mod helpers;
pub mod panel;
pub mod staff_role;
pub mod ticket;
pub mod ticket_config;
pub mod ticket_type;

// Re-export commonly used factory functions for concise usage
pub use embed_template::create_embed_template;
pub use panel::create_panel;
pub use staff_role::create_staff_role;
pub use ticket::create_ticket;
pub use ticket_config::create_config;
pub use ticket_type::create_ticket_type;
