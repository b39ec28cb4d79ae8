pub mod similarity;
pub mod store_stats;
