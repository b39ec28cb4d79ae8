pub mod chunker;
pub mod normalize;
pub mod references;
