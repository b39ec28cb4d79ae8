pub mod ingest;
pub mod retrieve;
pub mod store_facade;
