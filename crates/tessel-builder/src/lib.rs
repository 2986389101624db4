mod builder;
mod description;
mod error;

pub use builder::WorkflowBuilder;
pub use description::WorkflowDescription;
pub use error::BuildError;
