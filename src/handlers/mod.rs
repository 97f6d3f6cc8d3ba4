pub mod document_handler;
pub mod health_handler;
pub mod study_plan_handler;

use actix_web::web;

use crate::errors::AppError;

pub use document_handler::{delete_vector_files, upload_files};
pub use health_handler::{health_check, health_check_ready, index};
pub use study_plan_handler::{
    complete_flow, curate_topics, evaluate_quiz, export_markdown, generate_content,
    generate_quiz, generate_single_topic, generate_topics,
};

const JSON_BODY_LIMIT: usize = 4 * 1024 * 1024;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(index)
        .service(health_check)
        .service(health_check_ready)
        .service(generate_topics)
        .service(generate_quiz)
        .service(evaluate_quiz)
        .service(curate_topics)
        .service(generate_content)
        .service(generate_single_topic)
        .service(complete_flow)
        .service(export_markdown)
        .service(upload_files)
        .service(delete_vector_files);
}

/// Malformed JSON bodies are reported like any other validation failure,
/// with the decoder's message naming the offending field.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_BODY_LIMIT)
        .error_handler(|err, _req| {
            log::warn!("Rejected request body: {}", err);
            AppError::ValidationError(err.to_string()).into()
        })
}
