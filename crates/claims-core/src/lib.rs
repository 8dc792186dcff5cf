//! Claim data assembly and the scenario validation pipeline.

pub mod assemble;
pub mod matrix;
pub mod merge;
pub mod pipeline;

pub use assemble::{AssemblyInput, assemble, join_service_lines};
pub use matrix::{ANY_ANTIGEN, DEFAULT_MATRIX, MatrixCase};
pub use merge::{coalesce, merge_payer_switch, merge_provider_override};
pub use pipeline::ScenarioPipeline;
