pub mod config;
pub mod error;
pub mod featurizers;
pub mod io;
pub mod models;
pub mod parsing;
pub mod pipeline;
pub mod stages;

pub use config::PipelineConfig;
pub use error::PipelineError;
pub use featurizers::{default_featurizers, timing_featurizers, Featurizer};
pub use io::{load_cache, read_metadata_table, save_cache, to_rows, to_tsv, write_tsv};
pub use models::{FeatureMap, FeatureRow, Transcript, Utterance};
pub use parsing::{extract_line, extract_path, normalize};
pub use pipeline::{BatchResult, TranscriptPipeline};
pub use stages::{
    execute_stage0, execute_stage1, execute_stage2, execute_stage3, Stage0Config, Stage1Config,
    Stage3Config,
};
