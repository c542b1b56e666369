pub mod recommendation;

pub use recommendation::Recommendation;
