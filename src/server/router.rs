use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    controller::{auth, config, embed_template, panel, ticket},
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(info(
    title = "Ticketboard API",
    description = "Dashboard REST API mirroring the bot's ticket operations"
))]
struct ApiDoc;

pub fn router() -> Router<AppState> {
    let (router, api) = OpenApiRouter::<AppState>::with_openapi(ApiDoc::openapi())
        .routes(routes!(auth::login))
        .routes(routes!(auth::get_user))
        .routes(routes!(config::get_config, config::update_config))
        .routes(routes!(ticket::list_tickets))
        .routes(routes!(ticket::get_ticket, ticket::delete_ticket))
        .routes(routes!(ticket::close_ticket))
        .routes(routes!(ticket::reopen_ticket))
        .routes(routes!(ticket::assign_ticket))
        .routes(routes!(ticket::get_transcript))
        .routes(routes!(panel::list_panels, panel::create_panel))
        .routes(routes!(panel::delete_panel))
        .routes(routes!(
            embed_template::list_templates,
            embed_template::create_template
        ))
        .routes(routes!(
            embed_template::update_template,
            embed_template::delete_template
        ))
        .split_for_parts();

    router.merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", api))
}
