pub mod filter;
pub mod types;

pub use filter::visible_tasks;
pub use types::{Breakdown, BreakdownSource, BreakdownStep, Task};
