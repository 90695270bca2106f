use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct EmbedTemplateDto {
    pub id: i32,
    pub name: String,
    pub message_content: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub color: Option<i32>,
    pub author_name: Option<String>,
    pub author_icon_url: Option<String>,
    pub footer_text: Option<String>,
    pub footer_icon_url: Option<String>,
    pub image_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub uses: i32,
    pub fields: Vec<EmbedTemplateFieldDto>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct EmbedTemplateFieldDto {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// Create/update payload for an embed template. URL-bearing fields are
/// validated server-side before save.
#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct SaveEmbedTemplateDto {
    pub name: String,
    pub message_content: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub color: Option<i32>,
    pub author_name: Option<String>,
    pub author_icon_url: Option<String>,
    pub footer_text: Option<String>,
    pub footer_icon_url: Option<String>,
    pub image_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub fields: Vec<EmbedTemplateFieldDto>,
}
