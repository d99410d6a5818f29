use actix_web::{get, post, web, HttpResponse};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

use crate::api::models::{
    required, AvatarList, ContextCreated, ContextList, ContextListQuery, CreateContextRequest,
};
use crate::config::AppConfig;
use crate::error::ProxyError;
use crate::upstream::{models::Pagination, ApiKeyAuth, AuthStrategy, AvatarApi, BearerAuth};

/// The three create-context entry points differ only in how they authenticate
/// and whether the context is bound to an avatar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateVariant {
    /// Server API key.
    ApiKey,
    /// `session_token` from the request body.
    SessionToken,
    /// Server API key, `avatar_id` required.
    AvatarLinked,
}

async fn create_context_with(
    variant: CreateVariant,
    config: &AppConfig,
    api: &dyn AvatarApi,
    mut req: CreateContextRequest,
) -> Result<HttpResponse, ProxyError> {
    let api_key = || Box::new(ApiKeyAuth::new(&config.upstream.api_key)) as Box<dyn AuthStrategy>;

    let (auth, avatar_id) = match variant {
        CreateVariant::ApiKey => (api_key(), None),
        CreateVariant::SessionToken => {
            let token = required(req.session_token.as_deref(), "session_token")?;
            (Box::new(BearerAuth::new(token)) as Box<dyn AuthStrategy>, None)
        }
        CreateVariant::AvatarLinked => {
            let avatar_id = required(req.avatar_id.as_deref(), "avatar_id")?.to_string();
            (api_key(), Some(avatar_id))
        }
    };
    // Never forwarded, whatever the route
    req.session_token = None;

    let payload = req.into_payload(avatar_id)?;
    let context = api.create_context(auth.as_ref(), &payload).await?;

    info!(?variant, "Context created");
    Ok(HttpResponse::Ok().json(ContextCreated {
        success: true,
        context,
    }))
}

#[post("/context")]
pub async fn create_context(
    config: web::Data<AppConfig>,
    api: web::Data<Arc<dyn AvatarApi>>,
    req: web::Json<CreateContextRequest>,
) -> Result<HttpResponse, ProxyError> {
    create_context_with(CreateVariant::ApiKey, &config, api.get_ref().as_ref(), req.into_inner()).await
}

#[get("/context")]
pub async fn list_contexts(
    config: web::Data<AppConfig>,
    api: web::Data<Arc<dyn AvatarApi>>,
    query: web::Query<ContextListQuery>,
) -> Result<HttpResponse, ProxyError> {
    let auth = ApiKeyAuth::new(&config.upstream.api_key);
    let pagination: Pagination = query.into_inner().into();
    let contexts = api.list_contexts(&auth, &pagination).await?;

    Ok(HttpResponse::Ok().json(ContextList {
        success: true,
        contexts,
    }))
}

#[post("/contexts")]
pub async fn create_context_with_session(
    config: web::Data<AppConfig>,
    api: web::Data<Arc<dyn AvatarApi>>,
    req: web::Json<CreateContextRequest>,
) -> Result<HttpResponse, ProxyError> {
    create_context_with(
        CreateVariant::SessionToken,
        &config,
        api.get_ref().as_ref(),
        req.into_inner(),
    )
    .await
}

#[post("/avatars")]
pub async fn create_avatar_context(
    config: web::Data<AppConfig>,
    api: web::Data<Arc<dyn AvatarApi>>,
    req: web::Json<CreateContextRequest>,
) -> Result<HttpResponse, ProxyError> {
    create_context_with(
        CreateVariant::AvatarLinked,
        &config,
        api.get_ref().as_ref(),
        req.into_inner(),
    )
    .await
}

#[get("/avatars")]
pub async fn list_avatars(api: web::Data<Arc<dyn AvatarApi>>) -> Result<HttpResponse, ProxyError> {
    let data = api.list_public_avatars().await?;

    let avatars = match data.get("results") {
        Some(Value::Array(results)) => results.clone(),
        _ => Vec::new(),
    };

    Ok(HttpResponse::Ok().json(AvatarList {
        success: true,
        avatars,
    }))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_context)
        .service(list_contexts)
        .service(create_context_with_session)
        .service(create_avatar_context)
        .service(list_avatars);
}
