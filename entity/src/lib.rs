pub mod prelude;

pub mod embed_template;
pub mod embed_template_field;
pub mod guild_tag;
pub mod modal_field;
pub mod panel;
pub mod panel_button;
pub mod staff_role;
pub mod ticket;
pub mod ticket_config;
pub mod ticket_reopen;
pub mod ticket_tag;
pub mod ticket_type;
