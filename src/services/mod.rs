pub mod server;
pub mod statistics;

pub use server::{ServerService, serve_on};
pub use statistics::{RemoteStatistics, StatisticsService};
