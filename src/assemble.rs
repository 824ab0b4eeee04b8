// src/assemble.rs
//
// One assemble() call owns its graph, pools and output file end to end:
// ingest reads, prune, enumerate contigs per root with a validating
// shadow pass, and truncate the output wholesale when a global bound
// trips. Regions are independent; batch mode just runs one call per
// input file on a worker pool.

use crate::asm_opt::AsmOpt;
use crate::contig::{build_contigs, Status};
use crate::graph::Graph;
use crate::utils;
use rayon::prelude::*;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Assemble one region read file into FASTA contigs at `output`.
/// Returns the number of contigs written; after a truncating abort the
/// output file is empty and the count is 0.
pub fn assemble(input: &Path, output: &Path, prefix: &str, opt: &AsmOpt) -> io::Result<usize> {
    opt.validate()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    let start_real = utils::realtime();
    let start_cpu = utils::cputime();
    log::info!("Assembling: {} -> {}", input.display(), output.display());

    let mut graph = Graph::new(opt.kmer, opt.read_length);
    let reader = utils::xzopen(input)?;
    let num_reads = graph.build_from_reader(reader)?;
    log::info!(
        "{} reads, {} distinct k-mers",
        num_reads,
        graph.node_count()
    );

    graph.prune(opt.min_node_frequency);
    let roots = graph.root_nodes();
    log::info!(
        "{} nodes after pruning, {} root nodes",
        graph.node_count(),
        roots.len()
    );

    let mut out = BufWriter::new(File::create(output)?);
    let mut contig_count = 0usize;
    let mut truncate_output = false;

    for root in roots {
        // Shadow pass first: identical traversal and accounting,
        // nothing written. Only a clean pass commits output.
        let mut shadow_count = contig_count;
        let mut status =
            build_contigs(&graph, root, &mut shadow_count, &mut out, prefix, opt, true)?;
        if status == Status::Ok {
            status = build_contigs(&graph, root, &mut contig_count, &mut out, prefix, opt, false)?;
        }

        match status {
            Status::Ok => {}
            Status::TooManyPathsFromRoot => {
                let node = graph.node(root);
                log::warn!(
                    "Too many paths from root {}: {}",
                    prefix,
                    String::from_utf8_lossy(graph.kmer(node.kmer))
                );
            }
            Status::TooManyContigs => {
                log::warn!("Too many contigs: {}", prefix);
            }
            Status::StoppedOnRepeat => {
                log::warn!("Stopped on repeat: {}", prefix);
            }
        }

        if status == Status::TooManyContigs || status == Status::StoppedOnRepeat {
            contig_count = 0;
            truncate_output = true;
            break;
        }
    }

    out.flush()?;
    drop(out);

    if truncate_output {
        // Callers must never see partial output from an aborted run.
        File::create(output)?;
    }

    log::info!(
        "Done assembling ({:.2}s real, {:.2}s cpu): {} -> {}",
        utils::realtime() - start_real,
        utils::cputime() - start_cpu,
        input.display(),
        output.display()
    );

    Ok(contig_count)
}

/// Assemble many independent region files concurrently. Each input gets
/// its own graph, pools and `<stem>.fa` output under `out_dir`, with the
/// stem doubling as the contig prefix. Returns the total contig count.
pub fn assemble_batch(inputs: &[PathBuf], out_dir: &Path, opt: &AsmOpt) -> io::Result<usize> {
    std::fs::create_dir_all(out_dir)?;

    let counts: Vec<io::Result<usize>> = inputs
        .par_iter()
        .map(|input| {
            let stem = input
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("region");
            let output = out_dir.join(format!("{}.fa", stem));
            assemble(input, &output, stem, opt)
        })
        .collect();

    let mut total = 0usize;
    for count in counts {
        total += count?;
    }
    Ok(total)
}
