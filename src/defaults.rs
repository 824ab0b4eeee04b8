// src/defaults.rs

// Assembly Parameters
pub const READ_LENGTH: usize = 100;
pub const KMER: usize = 63;
pub const MIN_CONTIG_LENGTH: usize = 101;
pub const MIN_NODE_FREQUENCY: u32 = 3;
pub const MAX_CONTIG_SIZE: usize = 10_000;

// Driver Bounds
pub const MAX_CONTIGS: usize = 50_000;
pub const MAX_PATHS_FROM_ROOT: usize = 5_000;

// Pool Sizing
pub const NODES_PER_BLOCK: usize = 10_000;
pub const KMERS_PER_BLOCK: usize = 10_000;
pub const READS_PER_BLOCK: usize = 10_000;

// Other Constants
pub const VERBOSITY: i32 = 3;
pub const READ_PROGRESS_INTERVAL: usize = 100_000;
