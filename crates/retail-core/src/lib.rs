pub mod cleaners;
pub mod dedupe;
pub mod error;
pub mod frame;
pub mod frame_builder;
pub mod pipeline;
pub mod raw;
pub mod references;

pub use cleaners::clean_entity;
pub use dedupe::dedupe_frame_by_keys;
pub use error::{CleaningError, Result};
pub use frame::{CleanedFrame, EntityFrame};
pub use frame_builder::assemble_frame;
pub use pipeline::{BatchEntry, clean_batch};
pub use raw::{RawColumn, RawTable};
pub use references::ReferenceKeys;
