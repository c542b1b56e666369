pub mod recommendations;

pub use recommendations::{LookupPolicy, RecommendationService};
