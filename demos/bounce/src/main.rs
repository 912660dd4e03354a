//! # bounce — lantern demo
//!
//! A ball bounces between two walls for a few simulated seconds while a
//! text entity shows the bounce count. Exercises the whole support layer:
//! hook stack with a plugin receiver, entity lifecycle hooks, dirty
//! tracking, and per-frame render sync into a recording backend.
//!
//! Run with `RUST_LOG=debug` to watch the pipeline's tracking decisions.

use anyhow::Result;
use glam::Vec2;
use lantern_app::Game;
use lantern_ecs::{Color, Entity, Position, Registry, Shape, Text};
use lantern_hooks::{FrameInfo, HookBindings, SceneInfo};
use lantern_render::{RecordingBackend, VisualKind};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Plugin receiver: counts frames and scene loads, proving the hook stack
/// observes the same events game logic does.
#[derive(Default)]
struct StatsPlugin {
    frames: u64,
    scenes: Vec<String>,
}

/// The ball's motion state, owned by the demo's "script".
struct Ball {
    entity: Entity,
    velocity: Vec2,
}

const WALL_X: f32 = 80.0;

fn main() -> Result<()> {
    // Initialise structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("bounce=info".parse()?))
        .init();

    let mut game = Game::new(RecordingBackend::new());

    game.hooks_mut().push(
        StatsPlugin::default(),
        HookBindings::new()
            .on_frame_start(|stats: &mut StatsPlugin, info: FrameInfo| {
                stats.frames = info.frame + 1;
            })
            .on_scene_load(|stats: &mut StatsPlugin, scene: &SceneInfo| {
                stats.scenes.push(scene.name.clone());
            })
            .on_game_deinit(|stats: &mut StatsPlugin| {
                info!(
                    frames = stats.frames,
                    scenes = ?stats.scenes,
                    "stats plugin report"
                );
            })
            .build(),
    );

    game.start();
    game.load_scene("court");

    // Set up the ball and the score readout.
    let ball_entity = game.spawn(Some("ball"));
    game.world_mut()
        .insert(ball_entity, Position::new(0.0, 0.0));
    game.world_mut()
        .insert(ball_entity, Shape::circle(8.0, Color::WHITE));
    game.pipeline_mut().track(ball_entity, VisualKind::Shape)?;

    let score_entity = game.spawn(Some("score"));
    game.world_mut()
        .insert(score_entity, Position::new(0.0, 40.0));
    game.world_mut().insert(score_entity, Text::new("bounces: 0"));
    game.pipeline_mut().track(score_entity, VisualKind::Text)?;

    let mut ball = Ball {
        entity: ball_entity,
        velocity: Vec2::new(60.0, 0.0),
    };
    let mut bounces = 0u32;

    // Five simulated seconds at 60 fps.
    let dt = 1.0 / 60.0;
    for _ in 0..300 {
        // Script step: move the ball, bounce off the walls.
        let position = game
            .world()
            .get::<Position>(ball.entity)
            .copied()
            .unwrap_or_default();
        let mut next = position.0 + ball.velocity * dt as f32;
        if next.x.abs() > WALL_X {
            ball.velocity.x = -ball.velocity.x;
            next.x = next.x.clamp(-WALL_X, WALL_X);
            bounces += 1;
            game.world_mut()
                .insert(score_entity, Text::new(format!("bounces: {bounces}")));
            game.pipeline_mut().mark_position_dirty(score_entity);
        }
        game.world_mut().insert(ball.entity, Position(next));
        game.pipeline_mut().mark_position_dirty(ball.entity);

        game.frame(dt);
    }

    game.despawn(ball.entity);
    game.shutdown();

    let backend = game.pipeline().backend();
    info!(
        frames = game.frame_count(),
        bounces,
        backend_calls = backend.calls().len(),
        live_visuals = backend.live_visuals(),
        "demo finished"
    );
    Ok(())
}
