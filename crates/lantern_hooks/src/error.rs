//! Hook binding error types.
//!
//! These errors surface at binding time, before any event is ever
//! dispatched. They indicate programming mistakes and are meant to abort
//! startup loudly rather than be handled.

use crate::hook::HookTag;

/// Errors detected while binding handlers to the hook schema.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HookError {
    /// A handler was bound under a name that is not a declared tag.
    #[error(
        "no hook named `{name}`{}; valid hooks: {}",
        suggestion_text(.suggestion),
        valid_tag_list()
    )]
    UnknownHook {
        /// The offending handler name.
        name: String,
        /// The closest valid tag name, if any is plausibly close.
        suggestion: Option<&'static str>,
    },

    /// An exhaustive dispatcher is missing a handler for a declared tag.
    #[error("exhaustive dispatcher is missing a handler for `{0}`")]
    MissingHandler(HookTag),
}

fn suggestion_text(suggestion: &Option<&'static str>) -> String {
    match suggestion {
        Some(tag) => format!(" (did you mean `{tag}`?)"),
        None => String::new(),
    }
}

fn valid_tag_list() -> String {
    HookTag::ALL
        .iter()
        .map(|tag| tag.name())
        .collect::<Vec<_>>()
        .join(", ")
}
