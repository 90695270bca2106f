pub use super::embed_template::Entity as EmbedTemplate;
pub use super::embed_template_field::Entity as EmbedTemplateField;
pub use super::guild_tag::Entity as GuildTag;
pub use super::modal_field::Entity as ModalField;
pub use super::panel::Entity as Panel;
pub use super::panel_button::Entity as PanelButton;
pub use super::staff_role::Entity as StaffRole;
pub use super::ticket::Entity as Ticket;
pub use super::ticket_config::Entity as TicketConfig;
pub use super::ticket_reopen::Entity as TicketReopen;
pub use super::ticket_tag::Entity as TicketTag;
pub use super::ticket_type::Entity as TicketType;
