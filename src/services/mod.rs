pub mod collaborative;
pub mod features;
pub mod hybrid;
pub mod recommendations;
pub mod similarity;

pub use collaborative::{CollaborativeRanker, DuplicatePolicy};
pub use features::FeatureTable;
pub use hybrid::HybridRanker;
pub use recommendations::RecommendationService;
