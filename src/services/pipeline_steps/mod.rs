pub mod study_plan_steps;
