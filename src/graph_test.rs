// src/graph_test.rs

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{djb2, Graph};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::HashSet;
    use std::io;

    fn build(k: usize, read_len: usize, reads: &[&[u8]]) -> Graph {
        let mut graph = Graph::new(k, read_len);
        for read in reads {
            graph.add_read(read).unwrap();
        }
        graph
    }

    fn random_reads(n: usize, read_len: usize, seed: u64) -> Vec<Vec<u8>> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..n)
            .map(|_| {
                (0..read_len)
                    .map(|_| b"ACGT"[rng.gen_range(0..4)])
                    .collect()
            })
            .collect()
    }

    // --- djb2 Tests ---

    #[test]
    fn test_djb2_reference_values() {
        assert_eq!(djb2(b""), 0);
        // h("A") = ((0 << 5) + 0) ^ 65
        assert_eq!(djb2(b"A"), 65);
        // h("AC") = ((65 << 5) + 65) ^ 67
        assert_eq!(djb2(b"AC"), (65u64 * 33) ^ 67);
    }

    #[test]
    fn test_djb2_distinguishes_kmers() {
        assert_ne!(djb2(b"AAT"), djb2(b"ATA"));
        assert_ne!(djb2(b"AAA"), djb2(b"AAC"));
    }

    // --- Builder Tests ---

    #[test]
    fn test_linear_chain() {
        let graph = build(3, 5, &[b"AAATT"]);
        assert_eq!(graph.node_count(), 3);

        let aaa = graph.lookup(b"AAA").unwrap();
        let aat = graph.lookup(b"AAT").unwrap();
        let att = graph.lookup(b"ATT").unwrap();

        assert_eq!(graph.node(aaa).to_nodes, vec![aat]);
        assert_eq!(graph.node(aat).to_nodes, vec![att]);
        assert!(graph.node(att).to_nodes.is_empty());
        assert!(graph.node(aaa).from_nodes.is_empty());
        assert_eq!(graph.node(att).from_nodes, vec![aat]);

        for seq in [b"AAA", b"AAT", b"ATT"] {
            let node = graph.node(graph.lookup(seq).unwrap());
            assert_eq!(node.frequency, 1);
            assert!(!node.has_multiple_unique_reads);
        }
    }

    #[test]
    fn test_interning_counts_distinct_windows() {
        // AAAAA yields a single distinct 3-mer observed three times.
        let graph = build(3, 5, &[b"AAAAA"]);
        assert_eq!(graph.node_count(), 1);
        let aaa = graph.lookup(b"AAA").unwrap();
        assert_eq!(graph.node(aaa).frequency, 3);
    }

    #[test]
    fn test_interning_matches_distinct_substrings_random() {
        let k = 5;
        let reads = random_reads(50, 20, 42);
        let refs: Vec<&[u8]> = reads.iter().map(|r| r.as_slice()).collect();
        let graph = build(k, 20, &refs);

        let mut expected: HashSet<&[u8]> = HashSet::new();
        for read in &reads {
            for window in read.windows(k) {
                expected.insert(window);
            }
        }
        assert_eq!(graph.node_count(), expected.len());
        for window in expected {
            assert!(graph.lookup(window).is_some());
        }
    }

    #[test]
    fn test_adjacency_symmetry_random() {
        let reads = random_reads(30, 12, 7);
        let refs: Vec<&[u8]> = reads.iter().map(|r| r.as_slice()).collect();
        let graph = build(4, 12, &refs);

        let ids: Vec<_> = graph.table.iter().map(|(_, id)| id).collect();
        assert!(!ids.is_empty());
        for &id in &ids {
            let node = graph.node(id);
            for &to in &node.to_nodes {
                assert!(graph.node(to).from_nodes.contains(&id));
            }
            for &from in &node.from_nodes {
                assert!(graph.node(from).to_nodes.contains(&id));
            }
        }
    }

    #[test]
    fn test_duplicate_links_suppressed() {
        // Both reads traverse AAA -> AAT; the edge is recorded once.
        let graph = build(3, 5, &[b"AAATT", b"AAATG"]);
        let aaa = graph.lookup(b"AAA").unwrap();
        let aat = graph.lookup(b"AAT").unwrap();
        assert_eq!(graph.node(aaa).to_nodes, vec![aat]);
        assert_eq!(graph.node(aat).from_nodes, vec![aaa]);
        assert_eq!(graph.node(aat).to_nodes.len(), 2);
    }

    #[test]
    fn test_identical_reads_count_as_distinct() {
        // Byte-identical reads land in distinct slots, which is enough
        // to flip the uniqueness flag.
        let graph = build(3, 5, &[b"AAATT", b"AAATT"]);
        let aaa = graph.lookup(b"AAA").unwrap();
        let node = graph.node(aaa);
        assert_eq!(node.frequency, 2);
        assert!(node.has_multiple_unique_reads);
    }

    #[test]
    fn test_single_read_never_sets_uniqueness() {
        // A repeated k-mer within one read bumps frequency only.
        let graph = build(3, 6, &[b"AAAAAA"]);
        let aaa = graph.lookup(b"AAA").unwrap();
        let node = graph.node(aaa);
        assert_eq!(node.frequency, 4);
        assert!(!node.has_multiple_unique_reads);
    }

    #[test]
    fn test_wrong_read_length_rejected() {
        let mut graph = Graph::new(3, 5);
        let err = graph.add_read(b"AAAT").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert_eq!(graph.read_count(), 0);
    }

    // --- Pruner Tests ---

    #[test]
    fn test_prune_removes_low_frequency_nodes() {
        // AAA/AAT/ATT seen twice (distinct slots), ATG once.
        let graph = {
            let mut g = build(3, 5, &[b"AAATT", b"AAATT", b"AAATG"]);
            g.prune(2);
            g
        };
        assert!(graph.lookup(b"AAA").is_some());
        assert!(graph.lookup(b"AAT").is_some());
        assert!(graph.lookup(b"ATT").is_some());
        assert!(graph.lookup(b"ATG").is_none());

        // The surviving neighbor's adjacency no longer mentions ATG.
        let aat = graph.lookup(b"AAT").unwrap();
        let att = graph.lookup(b"ATT").unwrap();
        assert_eq!(graph.node(aat).to_nodes, vec![att]);
    }

    #[test]
    fn test_prune_removes_single_read_nodes() {
        // Every k-mer here has frequency >= 3 but only one backing read.
        let mut graph = build(3, 9, &[b"AAAAAAAAA"]);
        let aaa = graph.lookup(b"AAA").unwrap();
        assert_eq!(graph.node(aaa).frequency, 7);
        graph.prune(3);
        assert_eq!(graph.node_count(), 0);
    }

    #[test]
    fn test_prune_min_freq_one_waives_uniqueness() {
        let mut graph = build(3, 5, &[b"AAATT"]);
        graph.prune(1);
        assert_eq!(graph.node_count(), 3);
    }

    #[test]
    fn test_prune_exposes_new_roots() {
        // CAATT once, AATTG three times: pruning CAA makes AAT a root.
        let mut graph = build(
            3,
            5,
            &[b"CAATT", b"AATTG", b"AATTG", b"AATTG"],
        );
        graph.prune(3);
        assert!(graph.lookup(b"CAA").is_none());
        let aat = graph.lookup(b"AAT").unwrap();
        assert!(graph.node(aat).from_nodes.is_empty());
        let roots = graph.root_nodes();
        assert_eq!(roots, vec![aat]);
    }

    #[test]
    fn test_frequency_floor_after_prune_random() {
        let reads = random_reads(60, 10, 11);
        let refs: Vec<&[u8]> = reads.iter().map(|r| r.as_slice()).collect();
        let mut graph = build(3, 10, &refs);
        graph.prune(3);
        // Dense random 3-mers over 60 reads leave survivors.
        assert!(graph.node_count() > 0);
        for (_, id) in graph.table.iter() {
            let node = graph.node(id);
            assert!(node.frequency >= 3);
            assert!(node.has_multiple_unique_reads);
        }
    }

    // --- Determinism Tests ---

    #[test]
    fn test_root_order_is_reproducible() {
        // Sparse 6-mer space: most reads start a chain of their own,
        // so roots exist and their order must match run to run.
        let reads = random_reads(20, 12, 3);
        let refs: Vec<&[u8]> = reads.iter().map(|r| r.as_slice()).collect();

        let collect_roots = |refs: &[&[u8]]| -> Vec<Vec<u8>> {
            let mut g = build(6, 12, refs);
            g.prune(1);
            g.root_nodes()
                .into_iter()
                .map(|id| g.kmer(g.node(id).kmer).to_vec())
                .collect()
        };
        let roots = collect_roots(&refs);
        let roots_again = collect_roots(&refs);
        assert_eq!(roots, roots_again);
        assert!(!roots.is_empty());
    }
}
