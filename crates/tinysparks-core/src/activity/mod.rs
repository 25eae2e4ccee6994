//! Activity data model: age groups, categories, requests, and records.

pub mod id;
pub mod sections;
pub mod types;

pub use id::assign_ids;
pub use sections::PlanSections;
pub use types::{
    Activity, ActivityDraft, ActivityRequest, AgeGroup, AgeGroupParseError, Category,
    CategoryParseError,
};
