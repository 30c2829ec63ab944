pub mod summarize;
pub mod system;
