pub mod aggregator;
pub mod buckets;
pub mod shares;
pub mod types;

pub use aggregator::{compute_population, compute_statistics};
pub use buckets::{AgeBracket, Continent, GenderBucket};
pub use shares::{score_share_breakdown, score_shares};
pub use types::{BucketShare, MovieStatistics, PopulationBreakdown, ScoreShareBreakdown};
