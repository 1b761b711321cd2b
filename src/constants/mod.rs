pub mod prompts;
pub mod report_labels;
