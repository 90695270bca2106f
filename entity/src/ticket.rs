use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "ticket")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub guild_id: String,
    /// Sequential per guild, allocated at creation time.
    pub ticket_id: i32,
    pub user_id: String,
    #[sea_orm(unique)]
    pub channel_id: String,
    pub ticket_type: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub reason: Option<String>,
    pub status: String,
    pub assignee_id: Option<String>,
    pub priority: String,
    pub closed_by: Option<String>,
    pub closed_at: Option<DateTimeUtc>,
    pub deleted: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub last_activity_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::ticket_tag::Entity")]
    TicketTag,
    #[sea_orm(has_many = "super::ticket_reopen::Entity")]
    TicketReopen,
}

impl Related<super::ticket_tag::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TicketTag.def()
    }
}

impl Related<super::ticket_reopen::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TicketReopen.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
