pub mod embed_template;
pub mod guild_tag;
pub mod panel;
pub mod staff_role;
pub mod ticket;
pub mod ticket_config;
pub mod ticket_type;

#[cfg(test)]
mod test;
