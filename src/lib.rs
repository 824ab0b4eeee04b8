pub mod asm_opt;
pub mod assemble;
pub mod contig; // Bounded DFS contig enumeration and FASTA emission
pub mod defaults;
pub mod graph; // K-mer table, graph builder, pruner
pub mod pool; // Block pools for reads, k-mers and nodes
pub mod reads; // Whitespace-token read-file scanner
pub mod utils;
