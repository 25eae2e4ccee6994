//! Plan generation: prompt construction and response validation.

pub mod parser;
pub mod prompt;

pub use parser::{ResponseParseError, parse_activities, validate_plan_shape};
pub use prompt::{
    DEFAULT_MODEL, PLAN_SIZE, REQUIRED_FIELDS, SENSORY_COUNT, SYSTEM_INSTRUCTION, build_prompt,
    response_schema,
};
