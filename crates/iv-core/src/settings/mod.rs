//! Global and per-user tour settings
//!
//! Everything here decodes from or encodes to the string values kept in the
//! config store. Reads are recomputed on every request; nothing is cached.

pub mod flag;
pub mod languages;
pub mod model;
pub mod visibility;

pub use flag::{encode_flag, parse_stored_flag, FlagValue};
pub use languages::{encode_enabled_languages, parse_enabled_languages, sanitize_enabled_languages};
pub use model::{
    parse_version, GlobalSettings, GlobalSettingsPatch, UserPreference, UserPreferencePatch,
    INITIAL_WIZARD_VERSION,
};
pub use visibility::{EffectiveVisibility, HiddenReason};
