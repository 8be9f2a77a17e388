//! Guided-tour steps
//!
//! A language owns one ordered [`Step`] list. The list is stored as a JSON
//! array in display order and is only ever replaced as a whole.

pub mod defaults;
pub mod export;
pub mod model;
pub mod record;
pub mod visibility;

pub use defaults::{materialize_defaults, DefaultStepDefinition, MaterializedDefaults, DEFAULT_STEPS};
pub use export::{StepExportDocument, EXPORT_FORMAT_VERSION};
pub use model::{ensure_unique_ids, Step, StepDraft, StepPosition};
pub use record::{decode_record, encode_steps, DecodedRecord, StepRecordMigrator};
pub use visibility::{filter_enabled, filter_visible, is_enabled, is_visible_to_groups};
