use crate::services::pipeline_service::PipelineStep;

const TOPIC_GENERATION_TIMEOUT: u64 = 300;
const QUIZ_GENERATION_TIMEOUT: u64 = 300;
const EVALUATION_TIMEOUT: u64 = 5;
const CURATION_TIMEOUT: u64 = 300;
const CONTENT_GENERATION_TIMEOUT: u64 = 900;

pub fn create_study_plan_steps() -> Vec<PipelineStep> {
    vec![
        generate_topics_step(),
        generate_quiz_step(),
        evaluate_quiz_step(),
        curate_topics_step(),
        generate_content_step(),
    ]
}

fn generate_topics_step() -> PipelineStep {
    PipelineStep::new("generate_topics")
        .with_description("Outline the subject into main topics with subtopics")
        .with_timeout(TOPIC_GENERATION_TIMEOUT)
}

fn generate_quiz_step() -> PipelineStep {
    PipelineStep::new("generate_quiz")
        .with_description("Generate multiple choice questions covering every topic")
        .with_timeout(QUIZ_GENERATION_TIMEOUT)
}

fn evaluate_quiz_step() -> PipelineStep {
    PipelineStep::new("evaluate_quiz")
        .with_description("Score the submitted answers into per-topic understanding")
        .with_timeout(EVALUATION_TIMEOUT)
}

fn curate_topics_step() -> PipelineStep {
    PipelineStep::new("curate_topics")
        .with_description("Reorder topics from least to best understood")
        .with_timeout(CURATION_TIMEOUT)
}

fn generate_content_step() -> PipelineStep {
    PipelineStep::new("generate_content")
        .with_description("Write study material for the curated topics")
        .with_timeout(CONTENT_GENERATION_TIMEOUT)
}
