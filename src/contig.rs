// src/contig.rs
//
// Bounded depth-first contig enumeration. Each root gets an explicit
// stack of in-progress paths; traversing an edge contributes the first
// base of the departing node, and a path ending at a sink appends that
// node's full k-mer. Cycles are caught per path with a visited set, so
// two different paths may still cross the same node.

use crate::asm_opt::AsmOpt;
use crate::graph::Graph;
use crate::pool::{KmerId, NodeId};
use std::collections::HashSet;
use std::io::{self, Write};

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Status {
    Ok,
    TooManyPathsFromRoot,
    TooManyContigs,
    StoppedOnRepeat,
}

#[derive(Clone)]
pub struct Contig {
    pub seq: Vec<u8>,
    pub is_repeat: bool,
    pub curr_node: NodeId,
    visited: HashSet<KmerId>,
}

#[path = "contig_test.rs"]
mod contig_test;

impl Contig {
    fn new(root: NodeId) -> Self {
        Contig {
            seq: Vec::new(),
            is_repeat: false,
            curr_node: root,
            visited: HashSet::new(),
        }
    }
}

/// Write one finished contig, or in shadow mode only account for it.
/// Contigs below the minimum length are dropped and consume no id.
fn output_contig<W: Write>(
    contig: &Contig,
    contig_count: &mut usize,
    out: &mut W,
    prefix: &str,
    min_contig_length: usize,
    shadow: bool,
) -> io::Result<()> {
    if contig.seq.len() < min_contig_length {
        return Ok(());
    }
    if !shadow {
        if contig.is_repeat {
            writeln!(out, ">{}_{}_repeat", prefix, *contig_count)?;
        } else {
            writeln!(out, ">{}_{}", prefix, *contig_count)?;
        }
        out.write_all(&contig.seq)?;
        out.write_all(b"\n")?;
    }
    *contig_count += 1;
    Ok(())
}

/// Enumerate every source-to-sink path from `root`, emitting qualifying
/// contigs to `out`. In shadow mode all bookkeeping runs but nothing is
/// written; `contig_count` still advances so the caller can validate the
/// global contig cap before committing output.
///
/// Branch accounting is coarse: every successor taken, first or cloned,
/// charges one path against `max_paths_from_root`.
pub fn build_contigs<W: Write>(
    graph: &Graph,
    root: NodeId,
    contig_count: &mut usize,
    out: &mut W,
    prefix: &str,
    opt: &AsmOpt,
    shadow: bool,
) -> io::Result<Status> {
    let mut status = Status::Ok;
    let mut stack: Vec<Contig> = vec![Contig::new(root)];
    let mut paths_from_root = 1usize;

    while status == Status::Ok {
        let mut contig = match stack.pop() {
            Some(contig) => contig,
            None => break,
        };
        let node = graph.node(contig.curr_node);

        if contig.visited.contains(&node.kmer) {
            contig.is_repeat = true;
            if opt.stop_on_repeat {
                status = Status::StoppedOnRepeat;
            } else {
                output_contig(
                    &contig,
                    contig_count,
                    out,
                    prefix,
                    opt.min_contig_length,
                    shadow,
                )?;
            }
        } else if node.to_nodes.is_empty() {
            // Sink: the path ends here and the node contributes its
            // whole k-mer rather than a single base.
            contig.seq.extend_from_slice(graph.kmer(node.kmer));
            output_contig(
                &contig,
                contig_count,
                out,
                prefix,
                opt.min_contig_length,
                shadow,
            )?;
        } else {
            contig.seq.push(graph.kmer(node.kmer)[0]);
            if contig.seq.len() >= opt.max_contig_size {
                return Err(io::Error::new(
                    io::ErrorKind::Other,
                    format!(
                        "contig exceeded {} bytes at node {}",
                        opt.max_contig_size,
                        String::from_utf8_lossy(graph.kmer(node.kmer))
                    ),
                ));
            }
            contig.visited.insert(node.kmer);

            // Advance along the first successor in place; clone the
            // path for every further successor.
            contig.curr_node = node.to_nodes[0];
            paths_from_root += 1;
            stack.push(contig);
            let base = stack.len() - 1;
            for &succ in &node.to_nodes[1..] {
                let mut branch = stack[base].clone();
                branch.curr_node = succ;
                stack.push(branch);
                paths_from_root += 1;
            }
        }

        if *contig_count >= opt.max_contigs {
            status = Status::TooManyContigs;
        }
        if paths_from_root >= opt.max_paths_from_root {
            status = Status::TooManyPathsFromRoot;
        }
    }

    // Remaining stack entries are dropped here when a bound fired
    // mid-enumeration.
    Ok(status)
}
