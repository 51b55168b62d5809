//! voicenorm CLI - speech text normalization
//!
//! Command-line interface for the voicenorm text front end

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use voicenorm::{
    pipeline::CleanerMode,
    text::{Tokenizer, VoiceTokenizer},
    Config, Error, LexiconStore, Result, TextFrontend,
};

#[derive(Parser)]
#[command(
    name = "voicenorm",
    about = "Text normalization front end for speech synthesis",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize text into speakable form
    Normalize {
        /// Text to normalize
        #[arg(short, long, conflicts_with = "input")]
        text: Option<String>,

        /// Input text file, one utterance per line
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Configuration file path (YAML or JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Only lowercase and collapse whitespace
        #[arg(long)]
        basic: bool,

        /// Print the text after every stage
        #[arg(long)]
        trace: bool,
    },

    /// Normalize text and print token ids
    Encode {
        /// Text to encode
        #[arg(short, long)]
        text: String,

        /// Configuration file path (YAML or JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Vocabulary JSON, overriding the configured one
        #[arg(long)]
        vocab: Option<PathBuf>,
    },

    /// Generate default configuration file
    InitConfig {
        /// Output path for config file
        #[arg(short, long, default_value = "voicenorm.yaml")]
        output: PathBuf,
    },

    /// Show information about the system
    Info {
        /// Configuration file path (YAML or JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Run benchmarks
    Benchmark {
        /// Number of iterations
        #[arg(short, long, default_value = "100")]
        iterations: usize,
    },
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Normalize {
            text,
            input,
            config,
            basic,
            trace,
        } => {
            let (mut cfg, explicit) = load_config(config.as_deref())?;
            if basic {
                cfg.pipeline.cleaners = CleanerMode::Basic;
            }
            let frontend = build_frontend(&cfg, explicit)?;

            let lines: Vec<String> = match (text, input) {
                (Some(text), _) => vec![text],
                (None, Some(path)) => {
                    log::info!("Input file: {}", path.display());
                    std::fs::read_to_string(&path)?
                        .lines()
                        .filter(|l| !l.trim().is_empty())
                        .map(str::to_string)
                        .collect()
                }
                (None, None) => {
                    return Err(Error::Config("either --text or --input is required".into()))
                }
            };

            if trace {
                for line in &lines {
                    for (stage, output) in frontend.trace(line) {
                        println!("{:<28} {}", stage.name(), output);
                    }
                    println!();
                }
            } else {
                let start = Instant::now();
                for normalized in frontend.normalize_batch(&lines) {
                    println!("{}", normalized);
                }
                log::info!(
                    "Normalized {} line(s) in {:.2}ms",
                    lines.len(),
                    start.elapsed().as_secs_f64() * 1000.0
                );
            }
        }

        Commands::Encode {
            text,
            config,
            vocab,
        } => {
            let (mut cfg, explicit) = load_config(config.as_deref())?;
            if vocab.is_some() {
                cfg.tokenizer.vocab_path = vocab;
            }
            let frontend = build_frontend(&cfg, explicit)?;
            let tokenizer = VoiceTokenizer::from_config(cfg.tokenizer.clone())?;

            let normalized = frontend.normalize(&text);
            let encoding = tokenizer.encode(&normalized)?;

            println!("Normalized: {}", normalized);
            println!("Token ids:  {:?}", encoding.ids);
            if !encoding.unresolved.is_empty() {
                println!("Unresolved: {:?}", encoding.unresolved);
            }
        }

        Commands::InitConfig { output } => {
            log::info!("Creating default configuration...");

            Config::create_default(&output)?;

            println!("✓ Configuration saved to: {}", output.display());
        }

        Commands::Info { config } => {
            let (cfg, explicit) = load_config(config.as_deref())?;
            let frontend = build_frontend(&cfg, explicit)?;
            let lexicon = frontend.lexicon();

            println!("voicenorm - Text Normalization Front End");
            println!("========================================");
            println!("Version: {}", voicenorm::VERSION);
            println!("Platform: {}", std::env::consts::OS);
            println!("Architecture: {}", std::env::consts::ARCH);
            println!();
            println!("Lexicon:");
            println!("  Acronyms: {}", lexicon.acronym_count());
            println!("  Initialisms: {}", lexicon.initialism_count());
            println!("  Common words: {}", lexicon.common_word_count());
            println!("  Emoticons: {}", lexicon.emoticon_count());
            println!();
            println!("Pipeline:");
            println!("  Cleaners: {:?}", cfg.pipeline.cleaners);
            println!("  Stages: {}", frontend.stages().len());
            println!(
                "  Abbreviation threshold: {}",
                cfg.pipeline.abbreviation_confidence_threshold
            );
            println!(
                "  Model calls: {} concurrent, {}ms timeout",
                cfg.models.max_concurrent_calls, cfg.models.timeout_ms
            );
            println!();
            println!("CPU Cores: {}", num_cpus::get());
            println!("Physical Cores: {}", num_cpus::get_physical());
        }

        Commands::Benchmark { iterations } => {
            log::info!("Running benchmarks ({} iterations)...", iterations);

            let cfg = Config::default();
            let frontend = build_frontend(&cfg, false)?;
            let tokenizer = VoiceTokenizer::from_config(cfg.tokenizer.clone())?;

            benchmark_normalization(&frontend, iterations);
            benchmark_tokenization(&frontend, &tokenizer, iterations)?;

            println!("✓ Benchmarks complete");
        }
    }

    Ok(())
}

/// Load the configuration named on the command line, or the defaults.
/// The flag says whether a file was given.
fn load_config(path: Option<&Path>) -> Result<(Config, bool)> {
    match path {
        Some(path) => {
            let is_json = path
                .extension()
                .map(|ext| ext.eq_ignore_ascii_case("json"))
                .unwrap_or(false);
            let cfg = if is_json {
                Config::load_json(path)?
            } else {
                Config::load(path)?
            };
            Ok((cfg, true))
        }
        None => Ok((Config::default(), false)),
    }
}

/// Without a config file the lexicon compiled into the binary is used
fn build_frontend(cfg: &Config, explicit: bool) -> Result<TextFrontend> {
    if explicit {
        return TextFrontend::new(cfg);
    }

    cfg.validate()?;
    let lexicon = Arc::new(LexiconStore::bundled()?);
    Ok(TextFrontend::with_lexicon(lexicon, cfg.pipeline.clone()).with_gate(cfg.models.gate()))
}

const SAMPLE_TEXTS: &[&str] = &[
    "The quick brown fox jumps over the lazy dog.",
    "NASA paid $5.50 for 12,000 GIFs on the 21st of May 2005.",
    "Visit https://example.com/docs?page=2 for the FAQ :)",
    "Dr. Smith's CY23 report: 3.5 km at 10:30, up 12% vs. last year.",
];

fn benchmark_normalization(frontend: &TextFrontend, iterations: usize) {
    println!("\nNormalization Benchmark");
    println!("-----------------------");

    let start = Instant::now();
    for _ in 0..iterations {
        for text in SAMPLE_TEXTS {
            let _ = frontend.normalize(text);
        }
    }
    let elapsed = start.elapsed();

    let total_chars: usize = SAMPLE_TEXTS.iter().map(|t| t.len()).sum();
    let per_iter = elapsed.as_secs_f32() / iterations.max(1) as f32;
    println!("  Texts: {}", SAMPLE_TEXTS.len());
    println!("  Total characters: {}", total_chars);
    println!("  Iterations: {}", iterations);
    println!("  Total time: {:.3}s", elapsed.as_secs_f32());
    println!("  Per iteration: {:.3}ms", per_iter * 1000.0);
    println!(
        "  Throughput: {:.0} chars/sec",
        (total_chars * iterations) as f32 / elapsed.as_secs_f32()
    );

    let start = Instant::now();
    for _ in 0..iterations {
        let _ = frontend.normalize_batch(SAMPLE_TEXTS);
    }
    println!(
        "  Batch per iteration: {:.3}ms",
        start.elapsed().as_secs_f32() * 1000.0 / iterations.max(1) as f32
    );
}

fn benchmark_tokenization(
    frontend: &TextFrontend,
    tokenizer: &VoiceTokenizer,
    iterations: usize,
) -> Result<()> {
    println!("\nTokenization Benchmark");
    println!("----------------------");

    let normalized: Vec<String> = frontend.normalize_batch(SAMPLE_TEXTS);

    let start = Instant::now();
    let mut tokens = 0;
    for _ in 0..iterations {
        for text in &normalized {
            tokens += tokenizer.encode(text)?.ids.len();
        }
    }
    let elapsed = start.elapsed();

    println!("  Iterations: {}", iterations);
    println!("  Total time: {:.3}s", elapsed.as_secs_f32());
    println!(
        "  Throughput: {:.0} tokens/sec",
        tokens as f32 / elapsed.as_secs_f32()
    );
    Ok(())
}
