mod embed_template;
mod panel;
mod staff_role;
mod ticket;
mod ticket_config;
mod ticket_type;
