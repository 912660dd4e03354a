//! The hook payload schema: tags and their data records.
//!
//! The tag names and field shapes below are the public contract plugin
//! authors bind against; they must stay stable.

/// Per-frame timing data, carried by `frame_start` and `frame_end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    /// Monotonically increasing frame counter.
    pub frame: u64,
    /// Delta time since the last frame, in seconds.
    pub dt: f64,
}

/// Scene identification, carried by the three scene tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneInfo {
    /// The scene's declared name.
    pub name: String,
}

impl SceneInfo {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Entity identification, carried by `entity_created` and `entity_destroyed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityInfo {
    /// The entity in its bridged 64-bit form.
    pub entity: u64,
    /// The prefab the entity was instantiated from, if any.
    pub prefab: Option<String>,
}

impl EntityInfo {
    #[must_use]
    pub fn new(entity: u64) -> Self {
        Self {
            entity,
            prefab: None,
        }
    }
}

/// One lifecycle event, carrying exactly one tag's data.
///
/// Constructed transiently by the event source immediately before dispatch
/// and consumed synchronously by handlers; never retained.
#[derive(Debug, Clone, PartialEq)]
pub enum Hook {
    GameInit,
    GameDeinit,
    FrameStart(FrameInfo),
    FrameEnd(FrameInfo),
    SceneBeforeLoad(SceneInfo),
    SceneLoad(SceneInfo),
    SceneUnload(SceneInfo),
    EntityCreated(EntityInfo),
    EntityDestroyed(EntityInfo),
}

impl Hook {
    /// The tag this payload carries data for.
    #[must_use]
    pub const fn tag(&self) -> HookTag {
        match self {
            Hook::GameInit => HookTag::GameInit,
            Hook::GameDeinit => HookTag::GameDeinit,
            Hook::FrameStart(_) => HookTag::FrameStart,
            Hook::FrameEnd(_) => HookTag::FrameEnd,
            Hook::SceneBeforeLoad(_) => HookTag::SceneBeforeLoad,
            Hook::SceneLoad(_) => HookTag::SceneLoad,
            Hook::SceneUnload(_) => HookTag::SceneUnload,
            Hook::EntityCreated(_) => HookTag::EntityCreated,
            Hook::EntityDestroyed(_) => HookTag::EntityDestroyed,
        }
    }
}

/// The shape of data a tag carries, used to validate bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFamily {
    /// No data (`game_init`, `game_deinit`).
    Empty,
    /// [`FrameInfo`].
    Frame,
    /// [`SceneInfo`].
    Scene,
    /// [`EntityInfo`].
    Entity,
}

/// The closed set of event tags.
///
/// Declaration order here is the canonical order (`HookTag::ALL`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HookTag {
    GameInit,
    GameDeinit,
    FrameStart,
    FrameEnd,
    SceneBeforeLoad,
    SceneLoad,
    SceneUnload,
    EntityCreated,
    EntityDestroyed,
}

impl HookTag {
    /// Every tag, in declaration order.
    pub const ALL: [HookTag; 9] = [
        HookTag::GameInit,
        HookTag::GameDeinit,
        HookTag::FrameStart,
        HookTag::FrameEnd,
        HookTag::SceneBeforeLoad,
        HookTag::SceneLoad,
        HookTag::SceneUnload,
        HookTag::EntityCreated,
        HookTag::EntityDestroyed,
    ];

    /// The tag's stable string name, as plugin manifests spell it.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            HookTag::GameInit => "game_init",
            HookTag::GameDeinit => "game_deinit",
            HookTag::FrameStart => "frame_start",
            HookTag::FrameEnd => "frame_end",
            HookTag::SceneBeforeLoad => "scene_before_load",
            HookTag::SceneLoad => "scene_load",
            HookTag::SceneUnload => "scene_unload",
            HookTag::EntityCreated => "entity_created",
            HookTag::EntityDestroyed => "entity_destroyed",
        }
    }

    /// Parse a tag from its string name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<HookTag> {
        HookTag::ALL.into_iter().find(|tag| tag.name() == name)
    }

    /// The data record family this tag carries.
    #[must_use]
    pub const fn data_family(self) -> DataFamily {
        match self {
            HookTag::GameInit | HookTag::GameDeinit => DataFamily::Empty,
            HookTag::FrameStart | HookTag::FrameEnd => DataFamily::Frame,
            HookTag::SceneBeforeLoad | HookTag::SceneLoad | HookTag::SceneUnload => {
                DataFamily::Scene
            }
            HookTag::EntityCreated | HookTag::EntityDestroyed => DataFamily::Entity,
        }
    }
}

impl std::fmt::Display for HookTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
