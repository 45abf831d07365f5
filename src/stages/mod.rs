pub mod stage0_parse;
pub mod stage1_repair;
pub mod stage2_featurize;
pub mod stage3_render;

pub use stage0_parse::*;
pub use stage1_repair::*;
pub use stage2_featurize::*;
pub use stage3_render::*;
