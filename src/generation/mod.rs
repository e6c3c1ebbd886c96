//! AI task drafting: prompt rendering, the two-step completion pipeline,
//! cleanup of the generated text and the mapping onto task creation.

pub mod draft;
pub mod error;
pub mod generator;
pub mod lookup;
pub mod post_process;
pub mod prompt;
pub mod provider;
pub mod tone;

pub use draft::{to_task_input, Draft, TaskCreateInput};
pub use error::{GenerationError, ProviderError};
pub use generator::{DraftGenerator, GenerationConfig};
pub use lookup::ProjectLookup;
pub use post_process::{clean, CleanedBody, CleanedDraft};
pub use prompt::{build_prompt, build_title_prompt, ProjectContext};
pub use provider::CompletionProvider;
pub use tone::Tone;
