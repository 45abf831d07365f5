use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use psyfeat::{
    default_featurizers, execute_stage3, load_cache, read_metadata_table, save_cache,
    timing_featurizers, PipelineConfig, Stage3Config, Transcript, TranscriptPipeline,
};

#[derive(Parser)]
#[command(name = "psyfeat")]
#[command(author, version, about = "Psychotherapy transcript featurization", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Featurize every transcript listed in a metadata table
    Featurize {
        /// Tab-separated metadata table with a transcript path column
        #[arg(short, long)]
        metadata: PathBuf,

        /// Output file for the long feature table (TSV)
        #[arg(short, long, default_value = "transcripts.tsv")]
        out: PathBuf,

        /// Reuse featurized transcripts from the cache file, writing it if absent
        #[arg(long)]
        use_cache: bool,

        /// Location of the transcript cache
        #[arg(long, default_value = "transcripts.json")]
        cache_path: PathBuf,

        /// LIWC dictionary (.dic), overriding PSYFEAT_LIWC_PATH
        #[arg(long)]
        liwc: Option<PathBuf>,

        /// Polarity lexicon, overriding PSYFEAT_EMOLEX_PATH
        #[arg(long)]
        emolex: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Parse and repair a single transcript and print it
    Inspect {
        /// Transcript file
        #[arg(short, long)]
        input: PathBuf,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Featurize {
            metadata,
            out,
            use_cache,
            cache_path,
            liwc,
            emolex,
            verbose,
        } => {
            setup_logging(verbose);
            let mut config = PipelineConfig::from_env()?;
            if let Some(path) = liwc {
                config.liwc_path = path;
            }
            if let Some(path) = emolex {
                config.emolex_path = path;
            }
            featurize(&config, metadata, out, use_cache, cache_path)
        }
        Commands::Inspect { input, verbose } => {
            setup_logging(verbose);
            inspect(&PipelineConfig::from_env()?, input)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn featurize(
    config: &PipelineConfig,
    metadata: PathBuf,
    out: PathBuf,
    use_cache: bool,
    cache_path: PathBuf,
) -> Result<()> {
    let transcripts = if use_cache && cache_path.exists() {
        info!("Loading cached transcripts from {:?}", cache_path);
        load_cache(&cache_path)?
    } else {
        let featurizers = default_featurizers(config)?;
        let pipeline = TranscriptPipeline::from_config(config, featurizers);

        let paths = read_metadata_table(&metadata, &config.path_column)?;
        info!("Processing {} transcripts...", paths.len());

        let batch = pipeline.process_batch(&paths)?;
        if use_cache {
            info!("Caching transcripts to {:?}", cache_path);
            save_cache(&cache_path, &batch.transcripts)?;
        }
        batch.transcripts
    };

    let result = execute_stage3(&transcripts, &out, &Stage3Config::default())?;

    info!(
        "Complete: {} transcripts, {} rows written to {:?}",
        transcripts.len(),
        result.rows_written,
        result.output_path
    );

    Ok(())
}

fn inspect(config: &PipelineConfig, input: PathBuf) -> Result<()> {
    let pipeline = TranscriptPipeline::from_config(config, timing_featurizers());
    let transcript = pipeline
        .process_file(&input)?
        .with_context(|| format!("Could not extract session id/number from {:?}", input))?;

    println!("Session {} ({:?})", transcript.session_id, transcript.session_number);
    println!("==================");
    println!("{}", transcript);
    println!();

    println!("Speaker Statistics");
    println!("------------------");
    print_speaker_stats(&transcript);

    Ok(())
}

fn print_speaker_stats(transcript: &Transcript) {
    for speaker in transcript.speakers() {
        let turns: Vec<_> = transcript
            .utterances
            .iter()
            .filter(|u| u.speaker.as_deref() == Some(speaker))
            .collect();
        let words: usize = turns.iter().map(|u| u.word_count()).sum();
        let durations: Vec<f64> = turns.iter().filter_map(|u| u.duration_secs()).collect();
        let avg_duration = if durations.is_empty() {
            0.0
        } else {
            durations.iter().sum::<f64>() / durations.len() as f64
        };

        println!(
            "Speaker {}: {} turns, {} words, avg turn {:.1}s",
            speaker,
            turns.len(),
            words,
            avg_duration
        );
    }
}
