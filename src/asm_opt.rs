// src/asm_opt.rs
//
// Assembly options shared by the graph builder, pruner and contig
// enumerator. Fixed for the duration of one assemble() call.

use crate::defaults;

#[derive(Debug, Clone)]
pub struct AsmOpt {
    pub read_length: usize,
    /// K-mer window width; must not exceed `read_length`.
    pub kmer: usize,
    /// Contigs shorter than this are dropped at emission.
    pub min_contig_length: usize,
    /// Pruning floor: nodes observed fewer times than this are weak.
    pub min_node_frequency: u32,
    /// Hard cap on the in-progress contig buffer; exceeding it fails
    /// the whole assembly.
    pub max_contig_size: usize,
    /// Global emitted-contig cap; hitting it truncates the output.
    pub max_contigs: usize,
    /// Branch budget per root; exhausting it skips the root.
    pub max_paths_from_root: usize,
    /// Abort the assembly when any path revisits a node.
    pub stop_on_repeat: bool,
}

#[path = "asm_opt_test.rs"]
mod asm_opt_test;

impl Default for AsmOpt {
    fn default() -> Self {
        AsmOpt {
            read_length: defaults::READ_LENGTH,
            kmer: defaults::KMER,
            min_contig_length: defaults::MIN_CONTIG_LENGTH,
            min_node_frequency: defaults::MIN_NODE_FREQUENCY,
            max_contig_size: defaults::MAX_CONTIG_SIZE,
            max_contigs: defaults::MAX_CONTIGS,
            max_paths_from_root: defaults::MAX_PATHS_FROM_ROOT,
            stop_on_repeat: false,
        }
    }
}

impl AsmOpt {
    pub fn validate(&self) -> Result<(), String> {
        if self.read_length == 0 {
            return Err("Read length must be at least 1".to_string());
        }
        if self.kmer == 0 {
            return Err("K-mer length must be at least 1".to_string());
        }
        if self.kmer > self.read_length {
            return Err(format!(
                "K-mer length {} exceeds read length {}",
                self.kmer, self.read_length
            ));
        }
        if self.min_node_frequency == 0 {
            return Err("Minimum node frequency must be at least 1".to_string());
        }
        if self.max_contig_size == 0 {
            return Err("Maximum contig size must be at least 1".to_string());
        }
        if self.max_contigs == 0 {
            return Err("Maximum contig count must be at least 1".to_string());
        }
        if self.max_paths_from_root < 2 {
            return Err("Maximum paths from root must be at least 2".to_string());
        }
        Ok(())
    }
}
