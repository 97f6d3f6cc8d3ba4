use std::sync::Arc;

use actix_web::{post, web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    middleware::get_request_id,
    models::{
        domain::{content::DEFAULT_STUDY_PLAN_TITLE, TopicOutline},
        dto::request::{
            CompleteFlowRequest, CurateTopicsRequest, EvaluateQuizRequest,
            ExportMarkdownRequest, GenerateContentRequest, SingleTopicRequest, TopicRequest,
        },
    },
};

fn request_label(req: &HttpRequest) -> String {
    get_request_id(req).unwrap_or_else(|| "-".to_string())
}

#[post("/generate-topics")]
pub async fn generate_topics(
    state: web::Data<Arc<AppState>>,
    req: HttpRequest,
    request: web::Json<TopicRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!("[{}] Generating topics", request_label(&req));

    let outline = state
        .study_plan_service
        .generate_topics(&request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(outline))
}

#[post("/generate-quiz")]
pub async fn generate_quiz(
    state: web::Data<Arc<AppState>>,
    req: HttpRequest,
    request: web::Json<TopicOutline>,
) -> Result<HttpResponse, AppError> {
    log::info!(
        "[{}] Generating quiz for {} topics",
        request_label(&req),
        request.len()
    );

    let quiz = state
        .study_plan_service
        .generate_quiz(&request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(quiz))
}

#[post("/evaluate-quiz")]
pub async fn evaluate_quiz(
    state: web::Data<Arc<AppState>>,
    req: HttpRequest,
    request: web::Json<EvaluateQuizRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!(
        "[{}] Evaluating {} answers",
        request_label(&req),
        request.answers.len()
    );

    let understanding = state.study_plan_service.evaluate_quiz(&request)?;
    Ok(HttpResponse::Ok().json(understanding))
}

#[post("/curate-topics")]
pub async fn curate_topics(
    state: web::Data<Arc<AppState>>,
    req: HttpRequest,
    request: web::Json<CurateTopicsRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!("[{}] Curating topics", request_label(&req));

    let curated = state
        .study_plan_service
        .curate_topics(&request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(curated))
}

#[post("/generate-content")]
pub async fn generate_content(
    state: web::Data<Arc<AppState>>,
    req: HttpRequest,
    request: web::Json<GenerateContentRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;
    log::info!(
        "[{}] Generating content for {} topics",
        request_label(&req),
        request.list_of_topics.len()
    );

    let (outline, scores) = request.into_inner().into_parts();
    let content = state
        .study_plan_service
        .generate_content(&outline, scores.as_ref())
        .await?;
    Ok(HttpResponse::Ok().json(content))
}

#[post("/generate-single-topic")]
pub async fn generate_single_topic(
    state: web::Data<Arc<AppState>>,
    req: HttpRequest,
    request: web::Json<SingleTopicRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!(
        "[{}] Generating content for topic '{}'",
        request_label(&req),
        request.topic.topic
    );

    let content = state
        .study_plan_service
        .generate_single_topic(&request.topic)
        .await?;
    Ok(HttpResponse::Ok().json(content))
}

#[post("/complete-flow")]
pub async fn complete_flow(
    state: web::Data<Arc<AppState>>,
    req: HttpRequest,
    request: web::Json<CompleteFlowRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!("[{}] Running complete study plan flow", request_label(&req));

    let response = state.pipeline.run(&request).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/export-markdown")]
pub async fn export_markdown(
    req: HttpRequest,
    request: web::Json<ExportMarkdownRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    let title = request
        .title
        .as_deref()
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .unwrap_or(DEFAULT_STUDY_PLAN_TITLE);

    log::info!(
        "[{}] Exporting {} topics as markdown",
        request_label(&req),
        request.content.len()
    );

    Ok(HttpResponse::Ok()
        .content_type("text/markdown; charset=utf-8")
        .body(request.content.to_markdown(title)))
}
