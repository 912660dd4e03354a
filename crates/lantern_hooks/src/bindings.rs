//! Handler registration.
//!
//! [`HookBindings`] is a builder inserting handlers into a tag-keyed table.
//! The typed `on_*` methods take the tag as part of the method name, so a
//! misspelled tag is a compile error. The string-keyed path
//! ([`HookBindings::on_named`]) validates the name eagerly and suggests the
//! nearest valid tag on a miss — binding mistakes must surface before any
//! event is dispatched.

use std::collections::BTreeMap;

use crate::error::HookError;
use crate::hook::{EntityInfo, FrameInfo, Hook, HookTag, SceneInfo};

/// One bound handler, stored per tag.
///
/// The variants mirror the data families: a handler either takes the tag's
/// unwrapped data record, nothing (empty-data tags), or the full [`Hook`]
/// payload (the form used when one handler serves several tags, or when the
/// binding came in by name).
#[derive(Debug)]
pub(crate) enum BoundHandler<R> {
    Bare(fn(&mut R)),
    Frame(fn(&mut R, FrameInfo)),
    Scene(fn(&mut R, &SceneInfo)),
    Entity(fn(&mut R, &EntityInfo)),
    Payload(fn(&mut R, &Hook)),
}

/// Builder collecting handlers for a receiver type `R` before the
/// dispatcher is built.
///
/// Binding the same tag twice replaces the earlier handler (last
/// registration wins).
#[derive(Debug)]
pub struct HookBindings<R> {
    pub(crate) handlers: BTreeMap<HookTag, BoundHandler<R>>,
}

impl<R> Default for HookBindings<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> HookBindings<R> {
    /// Create an empty binding table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: BTreeMap::new(),
        }
    }

    // ── Typed per-tag bindings ──────────────────────────────────────────

    /// Handle `game_init`.
    #[must_use]
    pub fn on_game_init(mut self, handler: fn(&mut R)) -> Self {
        self.handlers.insert(HookTag::GameInit, BoundHandler::Bare(handler));
        self
    }

    /// Handle `game_deinit`.
    #[must_use]
    pub fn on_game_deinit(mut self, handler: fn(&mut R)) -> Self {
        self.handlers.insert(HookTag::GameDeinit, BoundHandler::Bare(handler));
        self
    }

    /// Handle `frame_start`.
    #[must_use]
    pub fn on_frame_start(mut self, handler: fn(&mut R, FrameInfo)) -> Self {
        self.handlers.insert(HookTag::FrameStart, BoundHandler::Frame(handler));
        self
    }

    /// Handle `frame_end`.
    #[must_use]
    pub fn on_frame_end(mut self, handler: fn(&mut R, FrameInfo)) -> Self {
        self.handlers.insert(HookTag::FrameEnd, BoundHandler::Frame(handler));
        self
    }

    /// Handle `scene_before_load`.
    #[must_use]
    pub fn on_scene_before_load(mut self, handler: fn(&mut R, &SceneInfo)) -> Self {
        self.handlers
            .insert(HookTag::SceneBeforeLoad, BoundHandler::Scene(handler));
        self
    }

    /// Handle `scene_load`.
    #[must_use]
    pub fn on_scene_load(mut self, handler: fn(&mut R, &SceneInfo)) -> Self {
        self.handlers.insert(HookTag::SceneLoad, BoundHandler::Scene(handler));
        self
    }

    /// Handle `scene_unload`.
    #[must_use]
    pub fn on_scene_unload(mut self, handler: fn(&mut R, &SceneInfo)) -> Self {
        self.handlers.insert(HookTag::SceneUnload, BoundHandler::Scene(handler));
        self
    }

    /// Handle `entity_created`.
    #[must_use]
    pub fn on_entity_created(mut self, handler: fn(&mut R, &EntityInfo)) -> Self {
        self.handlers
            .insert(HookTag::EntityCreated, BoundHandler::Entity(handler));
        self
    }

    /// Handle `entity_destroyed`.
    #[must_use]
    pub fn on_entity_destroyed(mut self, handler: fn(&mut R, &EntityInfo)) -> Self {
        self.handlers
            .insert(HookTag::EntityDestroyed, BoundHandler::Entity(handler));
        self
    }

    // ── Full-payload bindings ───────────────────────────────────────────

    /// Handle `tag` with a full-payload handler.
    ///
    /// The handler receives the entire [`Hook`] and can inspect the tag
    /// itself, which also lets one handler be bound under several tags.
    #[must_use]
    pub fn on_hook(mut self, tag: HookTag, handler: fn(&mut R, &Hook)) -> Self {
        self.handlers.insert(tag, BoundHandler::Payload(handler));
        self
    }

    /// Handle the tag named `name` with a full-payload handler.
    ///
    /// This is the entry point for handler names that arrive as strings
    /// (plugin manifests, script exports).
    ///
    /// # Errors
    ///
    /// Returns [`HookError::UnknownHook`] if `name` is not a declared tag,
    /// naming the offender, suggesting the nearest valid tag, and listing
    /// all valid tags.
    pub fn on_named(self, name: &str, handler: fn(&mut R, &Hook)) -> Result<Self, HookError> {
        match HookTag::from_name(name) {
            Some(tag) => Ok(self.on_hook(tag, handler)),
            None => Err(HookError::UnknownHook {
                name: name.to_string(),
                suggestion: nearest_tag(name),
            }),
        }
    }
}

/// The valid tag name closest to `name`, when it is close enough to look
/// like a typo rather than an unrelated identifier.
fn nearest_tag(name: &str) -> Option<&'static str> {
    let (best, distance) = HookTag::ALL
        .iter()
        .map(|tag| (tag.name(), edit_distance(name, tag.name())))
        .min_by_key(|&(_, distance)| distance)?;
    // Allow roughly one typo per four characters.
    if distance <= name.len().max(4) / 4 + 1 {
        Some(best)
    } else {
        None
    }
}

/// Levenshtein distance over bytes (tag names are ASCII).
fn edit_distance(a: &str, b: &str) -> usize {
    let a = a.as_bytes();
    let b = b.as_bytes();
    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, &ca) in a.iter().enumerate() {
        let mut previous_diagonal = row[0];
        row[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitution = previous_diagonal + usize::from(ca != cb);
            previous_diagonal = row[j + 1];
            row[j + 1] = substitution.min(previous_diagonal + 1).min(row[j] + 1);
        }
    }
    row[b.len()]
}
