use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;

use crate::{
    model::embed_template::{EmbedTemplateDto, EmbedTemplateFieldDto, SaveEmbedTemplateDto},
    server::{
        controller::TEMPLATE_TAG,
        data::embed_template::{EmbedFieldParams, EmbedTemplateParams, EmbedTemplateRepository},
        error::AppError,
        middleware::auth::{AuthGuard, Tier},
        service::embed_template::EmbedTemplateService,
        state::AppState,
    },
};

/// Get all embed templates for a guild.
///
/// # Access Control
/// - `Moderator`
#[utoipa::path(
    get,
    path = "/api/guilds/{guild_id}/templates",
    tag = TEMPLATE_TAG,
    params(
        ("guild_id" = u64, Path, description = "Discord guild ID")
    ),
    responses(
        (status = 200, description = "Templates with fields", body = Vec<EmbedTemplateDto>),
        (status = 401, description = "Not authenticated", body = crate::model::api::ErrorDto)
    ),
)]
pub async fn list_templates(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(guild_id): Path<u64>,
) -> Result<impl IntoResponse, AppError> {
    let _user = AuthGuard::new(&state)
        .require(&headers, guild_id, Tier::Moderator)
        .await?;

    let repo = EmbedTemplateRepository::new(&state.db);

    let mut dtos = Vec::new();
    for template in repo.list_by_guild(guild_id).await? {
        let fields = repo.fields(template.id).await?;
        dtos.push(template_to_dto(template, fields));
    }

    Ok((StatusCode::OK, Json(dtos)))
}

/// Create an embed template.
///
/// # Access Control
/// - `Moderator`
#[utoipa::path(
    post,
    path = "/api/guilds/{guild_id}/templates",
    tag = TEMPLATE_TAG,
    params(
        ("guild_id" = u64, Path, description = "Discord guild ID")
    ),
    request_body = SaveEmbedTemplateDto,
    responses(
        (status = 201, description = "Created template", body = EmbedTemplateDto),
        (status = 400, description = "Validation failure", body = crate::model::api::ErrorDto)
    ),
)]
pub async fn create_template(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(guild_id): Path<u64>,
    Json(payload): Json<SaveEmbedTemplateDto>,
) -> Result<impl IntoResponse, AppError> {
    let _user = AuthGuard::new(&state)
        .require(&headers, guild_id, Tier::Moderator)
        .await?;

    let service = EmbedTemplateService::new(&state.db);
    let template = service
        .create(guild_id, dto_to_params(payload), Utc::now())
        .await?;

    let repo = EmbedTemplateRepository::new(&state.db);
    let fields = repo.fields(template.id).await?;

    Ok((StatusCode::CREATED, Json(template_to_dto(template, fields))))
}

/// Update an embed template.
///
/// # Access Control
/// - `Moderator`
#[utoipa::path(
    put,
    path = "/api/guilds/{guild_id}/templates/{template_id}",
    tag = TEMPLATE_TAG,
    params(
        ("guild_id" = u64, Path, description = "Discord guild ID"),
        ("template_id" = i32, Path, description = "Template ID")
    ),
    request_body = SaveEmbedTemplateDto,
    responses(
        (status = 200, description = "Updated template", body = EmbedTemplateDto),
        (status = 404, description = "No such template", body = crate::model::api::ErrorDto)
    ),
)]
pub async fn update_template(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((guild_id, template_id)): Path<(u64, i32)>,
    Json(payload): Json<SaveEmbedTemplateDto>,
) -> Result<impl IntoResponse, AppError> {
    let _user = AuthGuard::new(&state)
        .require(&headers, guild_id, Tier::Moderator)
        .await?;

    let service = EmbedTemplateService::new(&state.db);
    let template = service
        .update(guild_id, template_id, dto_to_params(payload), Utc::now())
        .await?;

    let repo = EmbedTemplateRepository::new(&state.db);
    let fields = repo.fields(template.id).await?;

    Ok((StatusCode::OK, Json(template_to_dto(template, fields))))
}

/// Delete an embed template.
///
/// # Access Control
/// - `Moderator`
#[utoipa::path(
    delete,
    path = "/api/guilds/{guild_id}/templates/{template_id}",
    tag = TEMPLATE_TAG,
    params(
        ("guild_id" = u64, Path, description = "Discord guild ID"),
        ("template_id" = i32, Path, description = "Template ID")
    ),
    responses(
        (status = 204, description = "Template deleted"),
        (status = 404, description = "No such template", body = crate::model::api::ErrorDto)
    ),
)]
pub async fn delete_template(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((guild_id, template_id)): Path<(u64, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let _user = AuthGuard::new(&state)
        .require(&headers, guild_id, Tier::Moderator)
        .await?;

    let service = EmbedTemplateService::new(&state.db);
    service.delete(guild_id, template_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

fn dto_to_params(dto: SaveEmbedTemplateDto) -> EmbedTemplateParams {
    EmbedTemplateParams {
        name: dto.name,
        message_content: dto.message_content,
        title: dto.title,
        description: dto.description,
        color: dto.color,
        author_name: dto.author_name,
        author_icon_url: dto.author_icon_url,
        footer_text: dto.footer_text,
        footer_icon_url: dto.footer_icon_url,
        image_url: dto.image_url,
        thumbnail_url: dto.thumbnail_url,
        fields: dto
            .fields
            .into_iter()
            .map(|f| EmbedFieldParams {
                name: f.name,
                value: f.value,
                inline: f.inline,
            })
            .collect(),
    }
}

fn template_to_dto(
    template: entity::embed_template::Model,
    fields: Vec<entity::embed_template_field::Model>,
) -> EmbedTemplateDto {
    EmbedTemplateDto {
        id: template.id,
        name: template.name,
        message_content: template.message_content,
        title: template.title,
        description: template.description,
        color: template.color,
        author_name: template.author_name,
        author_icon_url: template.author_icon_url,
        footer_text: template.footer_text,
        footer_icon_url: template.footer_icon_url,
        image_url: template.image_url,
        thumbnail_url: template.thumbnail_url,
        uses: template.uses,
        fields: fields
            .into_iter()
            .map(|f| EmbedTemplateFieldDto {
                name: f.name,
                value: f.value,
                inline: f.inline,
            })
            .collect(),
    }
}
