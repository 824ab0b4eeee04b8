use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use ferrous_assemble::{asm_opt::AsmOpt, assemble, defaults};

#[derive(Parser)]
#[command(name = "ferrous-assemble")]
#[command(about = "Local de Bruijn graph assembler for short-read regions", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct AssemblyArgs {
    // ===== Assembly Parameters =====
    /// Read length (every input read must have exactly this length)
    #[arg(short = 'l', long, value_name = "INT", default_value_t = defaults::READ_LENGTH)]
    read_length: usize,

    /// K-mer length
    #[arg(short = 'k', long, value_name = "INT", default_value_t = defaults::KMER)]
    kmer: usize,

    /// Minimum length of an emitted contig
    #[arg(short = 'c', long, value_name = "INT", default_value_t = defaults::MIN_CONTIG_LENGTH)]
    min_contig_length: usize,

    /// Minimum k-mer frequency for a node to survive pruning
    #[arg(short = 'f', long, value_name = "INT", default_value_t = defaults::MIN_NODE_FREQUENCY)]
    min_node_frequency: u32,

    /// Maximum size of an in-progress contig in bytes
    #[arg(long, value_name = "INT", default_value_t = defaults::MAX_CONTIG_SIZE)]
    max_contig_size: usize,

    // ===== Bounds =====
    /// Maximum emitted contigs before the assembly aborts
    #[arg(short = 'C', long, value_name = "INT", default_value_t = defaults::MAX_CONTIGS)]
    max_contigs: usize,

    /// Maximum branches explored per root before the root is skipped
    #[arg(short = 'P', long, value_name = "INT", default_value_t = defaults::MAX_PATHS_FROM_ROOT)]
    max_paths_from_root: usize,

    /// Abort the assembly when any path revisits a node
    #[arg(short = 'r', long)]
    stop_on_repeat: bool,

    /// Verbose level: 1=error, 2=warning, 3=message, 4+=debugging
    #[arg(short = 'v', long, value_name = "INT", default_value_t = defaults::VERBOSITY)]
    verbosity: i32,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble one region read file into FASTA contigs
    Assemble {
        /// Input read file (whitespace-delimited reads; .gz supported; - for stdin)
        #[arg(value_name = "READS")]
        input: PathBuf,

        /// Output FASTA file
        #[arg(value_name = "OUT.FA")]
        output: PathBuf,

        /// Contig name prefix
        #[arg(short = 'p', long, value_name = "STR", default_value = "contig")]
        prefix: String,

        #[command(flatten)]
        asm: AssemblyArgs,
    },

    /// Assemble many region read files concurrently
    Batch {
        /// Input read files, one region each
        #[arg(value_name = "READS", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory (one <stem>.fa per input)
        #[arg(short = 'o', long, value_name = "DIR", default_value = ".")]
        out_dir: PathBuf,

        /// Number of threads (default: all available cores)
        #[arg(short = 't', long, value_name = "INT")]
        threads: Option<usize>,

        #[command(flatten)]
        asm: AssemblyArgs,
    },
}

fn init_logger(verbosity: i32) {
    let log_level = match verbosity {
        v if v <= 1 => log::LevelFilter::Error,
        2 => log::LevelFilter::Warn,
        3 => log::LevelFilter::Info,
        4 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn build_opt(asm: &AssemblyArgs) -> AsmOpt {
    let opt = AsmOpt {
        read_length: asm.read_length,
        kmer: asm.kmer,
        min_contig_length: asm.min_contig_length,
        min_node_frequency: asm.min_node_frequency,
        max_contig_size: asm.max_contig_size,
        max_contigs: asm.max_contigs,
        max_paths_from_root: asm.max_paths_from_root,
        stop_on_repeat: asm.stop_on_repeat,
    };

    if let Err(e) = opt.validate() {
        log::error!("{}", e);
        std::process::exit(1);
    }
    opt
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Assemble {
            input,
            output,
            prefix,
            asm,
        } => {
            init_logger(asm.verbosity);
            let opt = build_opt(&asm);

            match assemble::assemble(&input, &output, &prefix, &opt) {
                Ok(count) => {
                    log::info!("Wrote {} contigs to {}", count, output.display());
                }
                Err(e) => {
                    log::error!("Assembly failed: {}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Batch {
            inputs,
            out_dir,
            threads,
            asm,
        } => {
            init_logger(asm.verbosity);
            let opt = build_opt(&asm);

            let mut num_threads = threads.unwrap_or_else(num_cpus::get);
            if num_threads < 1 {
                log::warn!("Invalid thread count {}, using 1 thread", num_threads);
                num_threads = 1;
            }

            match rayon::ThreadPoolBuilder::new()
                .num_threads(num_threads)
                .build_global()
            {
                Ok(_) => {
                    log::debug!("Built global thread pool with {} threads", num_threads);
                }
                Err(e) => {
                    log::warn!(
                        "Failed to configure thread pool: {} (may already be initialized)",
                        e
                    );
                }
            }

            log::info!(
                "Assembling {} regions on {} threads",
                inputs.len(),
                num_threads
            );

            match assemble::assemble_batch(&inputs, &out_dir, &opt) {
                Ok(total) => {
                    log::info!(
                        "Wrote {} contigs across {} regions to {}",
                        total,
                        inputs.len(),
                        out_dir.display()
                    );
                }
                Err(e) => {
                    log::error!("Batch assembly failed: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
}
