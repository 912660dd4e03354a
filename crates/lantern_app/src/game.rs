//! The game loop.
//!
//! Hook emission order per operation:
//!
//! - `start` → `game_init`
//! - `frame(dt)` → `frame_start`, begin frame, sync, end frame, `frame_end`
//! - `load_scene` → `scene_before_load` (before any mutation), `scene_load`
//! - `unload_scene` → `scene_unload`
//! - `spawn` → `entity_created`
//! - `despawn` → `entity_destroyed` (auto-untracks), then world despawn
//! - `shutdown` → `scene_unload` if a scene is loaded, then `game_deinit`

use lantern_ecs::{Entity, Registry, World};
use lantern_hooks::{Dispatcher, EntityInfo, FrameInfo, Hook, HookStack, SceneInfo};
use lantern_render::hooks::lifecycle_dispatcher;
use lantern_render::{GraphicsBackend, RenderPipeline};
use tracing::{debug, info};

/// A running game instance: world state, hook receivers, render pipeline,
/// and the frame counter.
pub struct Game<G: GraphicsBackend> {
    world: World,
    pipeline: RenderPipeline<G>,
    hooks: HookStack,
    /// Internal wiring: untracks entities when `entity_destroyed` fires.
    lifecycle: Dispatcher<RenderPipeline<G>>,
    frame: u64,
    scene: Option<String>,
}

impl<G: GraphicsBackend> Game<G> {
    /// Create a game around a graphics backend.
    #[must_use]
    pub fn new(backend: G) -> Self {
        Self {
            world: World::new(),
            pipeline: RenderPipeline::new(backend),
            hooks: HookStack::new(),
            lifecycle: lifecycle_dispatcher(),
            frame: 0,
            scene: None,
        }
    }

    // ── Accessors ───────────────────────────────────────────────────────

    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[must_use]
    pub fn pipeline(&self) -> &RenderPipeline<G> {
        &self.pipeline
    }

    pub fn pipeline_mut(&mut self) -> &mut RenderPipeline<G> {
        &mut self.pipeline
    }

    /// The hook stack; push plugin receivers here before [`Game::start`].
    pub fn hooks_mut(&mut self) -> &mut HookStack {
        &mut self.hooks
    }

    /// Completed-frame counter.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Name of the currently loaded scene, if any.
    #[must_use]
    pub fn scene(&self) -> Option<&str> {
        self.scene.as_deref()
    }

    // ── Lifecycle ───────────────────────────────────────────────────────

    /// Emit `game_init`.
    pub fn start(&mut self) {
        info!("game starting");
        self.hooks.emit(&Hook::GameInit);
    }

    /// Unload any loaded scene, then emit `game_deinit`.
    pub fn shutdown(&mut self) {
        if self.scene.is_some() {
            self.unload_scene();
        }
        info!(frames = self.frame, "game shutting down");
        self.hooks.emit(&Hook::GameDeinit);
    }

    /// Run one frame: `frame_start`, render sync, `frame_end`.
    pub fn frame(&mut self, dt: f64) {
        let info = FrameInfo {
            frame: self.frame,
            dt,
        };
        self.hooks.emit(&Hook::FrameStart(info));

        self.pipeline.begin_frame();
        self.pipeline.sync(&self.world);
        self.pipeline.end_frame();

        self.hooks.emit(&Hook::FrameEnd(info));
        self.frame += 1;
    }

    /// Load a scene by name, unloading the previous one first.
    ///
    /// `scene_before_load` fires before any state changes; `scene_load`
    /// fires once the scene is installed. The actual population of the
    /// world from scene data is the loader's job and happens between the
    /// two, driven by the `scene_load` receivers.
    pub fn load_scene(&mut self, name: impl Into<String>) {
        let name = name.into();
        if self.scene.is_some() {
            self.unload_scene();
        }
        debug!(scene = %name, "loading scene");
        self.hooks
            .emit(&Hook::SceneBeforeLoad(SceneInfo::new(name.clone())));
        self.scene = Some(name.clone());
        self.hooks.emit(&Hook::SceneLoad(SceneInfo::new(name)));
    }

    /// Unload the current scene, if any, emitting `scene_unload`.
    pub fn unload_scene(&mut self) {
        if let Some(name) = self.scene.take() {
            debug!(scene = %name, "unloading scene");
            self.hooks.emit(&Hook::SceneUnload(SceneInfo::new(name)));
        }
    }

    /// Spawn an entity, emitting `entity_created`.
    pub fn spawn(&mut self, prefab: Option<&str>) -> Entity {
        let entity = self.world.spawn();
        self.hooks.emit(&Hook::EntityCreated(EntityInfo {
            entity: entity.to_bits(),
            prefab: prefab.map(str::to_string),
        }));
        entity
    }

    /// Despawn an entity, emitting `entity_destroyed` first so receivers
    /// (and the pipeline's auto-untrack) still see it as live.
    ///
    /// A stale handle is a no-op: despawn notifications can race with
    /// script-driven destruction, and redundant cleanup must stay safe.
    pub fn despawn(&mut self, entity: Entity) {
        if !self.world.exists(entity) {
            return;
        }
        let hook = Hook::EntityDestroyed(EntityInfo::new(entity.to_bits()));
        self.hooks.emit(&hook);
        self.lifecycle.emit(&mut self.pipeline, &hook);
        // exists() was checked above, so this cannot fail.
        let _ = self.world.despawn(entity);
    }
}
