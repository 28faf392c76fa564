//! Prompt text and reply handling, free of I/O

pub mod prompt;
pub mod response;

pub use prompt::{extraction_prompt, system_role};
pub use response::{message_content, parse_extraction, strip_code_fences};
