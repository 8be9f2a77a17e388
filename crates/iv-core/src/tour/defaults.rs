//! Compiled-in tour used until an admin stores a list of their own.

use crate::l10n::{TextSource, Translator};
use crate::tour::model::{Step, StepPosition};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultStepDefinition {
    pub id: &'static str,
    pub attach_to: &'static str,
    pub position: StepPosition,
}

impl DefaultStepDefinition {
    pub fn title_key(&self) -> String {
        format!("step_{}_title", self.id)
    }

    pub fn text_key(&self) -> String {
        format!("step_{}_text", self.id)
    }
}

const fn centered(id: &'static str) -> DefaultStepDefinition {
    DefaultStepDefinition {
        id,
        attach_to: "",
        position: StepPosition::Right,
    }
}

pub const DEFAULT_STEPS: &[DefaultStepDefinition] = &[
    centered("welcome"),
    DefaultStepDefinition {
        id: "files",
        attach_to: r#"[data-id="files"], #appmenu li[data-id="files"], a[href*="/apps/files"]"#,
        position: StepPosition::Right,
    },
    DefaultStepDefinition {
        id: "calendar",
        attach_to: r#"[data-id="calendar"], #appmenu li[data-id="calendar"], a[href*="/apps/calendar"]"#,
        position: StepPosition::Right,
    },
    DefaultStepDefinition {
        id: "search",
        attach_to: r#"button[aria-label="Unified search"], .header-menu__trigger, .unified-search__trigger"#,
        position: StepPosition::Bottom,
    },
    centered("intro"),
    centered("features"),
    centered("tips"),
    centered("complete"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializedDefaults {
    pub steps: Vec<Step>,
    /// Keys the requested catalog lacked, in step order.
    pub missing_translations: Vec<String>,
}

/// Builds the default list in one language, every step enabled and visible to all.
pub fn materialize_defaults(translator: &Translator) -> MaterializedDefaults {
    let mut missing_translations = Vec::new();
    let mut lookup = |key: String| {
        let translated = translator.translate(&key);
        if translated.source != TextSource::Requested {
            missing_translations.push(key);
        }
        translated.text
    };

    let steps = DEFAULT_STEPS
        .iter()
        .map(|definition| Step {
            id: definition.id.to_string(),
            title: lookup(definition.title_key()),
            text: lookup(definition.text_key()),
            attach_to: definition.attach_to.to_string(),
            position: definition.position,
            enabled: true,
            visible_to_groups: Vec::new(),
        })
        .collect();

    MaterializedDefaults {
        steps,
        missing_translations,
    }
}
