use std::time::Duration;

use anyhow::{bail, Result};
use glam::Vec3;
use log::{debug, info};

mod core;
mod engine;
mod game;

use engine::game_loop::GameLoop;
use engine::input::{Action, Axis, InputManager, PlayerInput, PlayerSlot};
use engine::physics::FlatGroundMotor;
use game::arena::Arena;
use game::characters::{AnimationParams, Character, BASE_CONFIG};
use game::combat;
use game::course::{Course, PickupKind, BASE_COURSE};
use game::enemies::{standard_kinds, EnemySpawner, DEFAULT_RESPAWN_DELAY};
use game::events::GameEvent;

/// Seed for enemy kinds and patrols
const MATCH_SEED: u64 = 0x5EED;

/// Stop the demo even if nobody finishes
const MAX_FRAMES: u64 = 30_000;

/// Irregular frame times the demo host feeds the loop (milliseconds)
const FRAME_PATTERN_MS: [u64; 4] = [16, 17, 17, 33];

/// Loads the next level once the race is decided
trait SceneLoader {
    fn load(&mut self, scene: &str) -> Result<()>;
}

/// Scene loader for the headless demo
struct LoggingSceneLoader;

impl SceneLoader for LoggingSceneLoader {
    fn load(&mut self, scene: &str) -> Result<()> {
        info!("Loading scene '{}'", scene);
        Ok(())
    }
}

/// Scripted stand-in for a human player
struct Bot {
    slot: PlayerSlot,
    lane_x: f32,
    jump_zone: (f32, f32),
}

impl Bot {
    fn drive(&self, arena: &Arena, input: &mut PlayerInput) {
        for action in [Action::Jump, Action::Attack, Action::SelectItem, Action::Throw] {
            input.release(action);
        }

        let Some(character) = arena.character(self.slot) else {
            input.set_axis(Axis::MoveX, 0.0);
            input.set_axis(Axis::MoveY, 0.0);
            return;
        };
        let position = character.position();
        let config = character.config();

        input.set_axis(Axis::MoveY, 1.0);
        input.set_axis(Axis::MoveX, (self.lane_x - position.x).clamp(-1.0, 1.0));

        let enemy_in_reach =
            combat::nearest_target(position, arena.enemies(), config.attack_range).is_some();
        if enemy_in_reach && character.stamina().current() >= config.attack_stamina_cost {
            input.press(Action::Attack);
        }

        if position.z > self.jump_zone.0 && position.z < self.jump_zone.1 {
            input.press(Action::Jump);
        }

        let items = character.items();
        if items.is_selected() {
            input.press(Action::Throw);
        } else if items.is_full() {
            input.press(Action::SelectItem);
        }
    }
}

fn build_course() -> Result<Course> {
    let mut course = Course::new(BASE_COURSE)?;
    course
        .add_pickup(PickupKind::Mushroom, Vec3::new(-2.0, 0.0, 4.0))
        .add_pickup(PickupKind::Mushroom, Vec3::new(-2.0, 0.0, 6.0))
        .add_pickup(PickupKind::Mushroom, Vec3::new(-2.0, 0.0, 8.0))
        .add_pickup(PickupKind::Stamina(10.0), Vec3::new(2.0, 0.0, 6.0))
        .add_checkpoint(Vec3::new(-2.0, 0.0, 18.0))
        .add_checkpoint(Vec3::new(2.0, 0.0, 18.0))
        .add_obstacle(Vec3::new(2.0, 0.0, 26.0))
        .add_checkpoint(Vec3::new(0.0, 0.0, 34.0))
        .set_finish(Vec3::new(0.0, 0.0, 48.0));
    Ok(course)
}

fn build_arena() -> Result<Arena> {
    let spawn_points = vec![Vec3::new(-2.0, 0.0, 12.0), Vec3::new(2.0, 0.0, 12.0)];
    let spawner = EnemySpawner::new(standard_kinds(), spawn_points, DEFAULT_RESPAWN_DELAY, MATCH_SEED)?;
    let mut arena = Arena::new(build_course()?, spawner);

    for (slot, name, spawn) in [
        (PlayerSlot::One, "Red", Vec3::new(-2.0, 0.0, 0.0)),
        (PlayerSlot::Two, "Blue", Vec3::new(2.0, 0.0, 0.0)),
    ] {
        let character = Character::new(slot, name, BASE_CONFIG, spawn, 0.0);
        arena.add_player(
            character,
            Box::new(FlatGroundMotor::new(spawn)),
            Box::new(AnimationParams::with_standard_clips()),
        )?;
    }
    Ok(arena)
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::StaminaChanged { .. } | GameEvent::VisibilityChanged { .. } => {
            debug!("{event}")
        }
        _ => info!("{event}"),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Rusted Rush...");

    let mut arena = build_arena()?;
    let mut inputs = InputManager::new();
    let mut game_loop = GameLoop::new();
    let mut scenes = LoggingSceneLoader;
    let bots = [
        Bot {
            slot: PlayerSlot::One,
            lane_x: -2.0,
            jump_zone: (24.0, 24.5),
        },
        Bot {
            slot: PlayerSlot::Two,
            lane_x: 2.0,
            jump_zone: (24.0, 24.5),
        },
    ];

    for event in arena.drain_events() {
        log_event(&event);
    }

    let mut frame = 0u64;
    while !arena.is_over() {
        if frame >= MAX_FRAMES {
            bail!("race did not finish within {MAX_FRAMES} frames");
        }
        let frame_time = Duration::from_millis(FRAME_PATTERN_MS[(frame % 4) as usize]);
        frame += 1;

        let ticks = game_loop.advance(frame_time);
        for _ in 0..ticks {
            for bot in &bots {
                bot.drive(&arena, inputs.player_mut(bot.slot));
            }
            arena.tick(game_loop.fixed_timestep(), &inputs);
            inputs.update();

            for event in arena.drain_events() {
                log_event(&event);
            }
            if arena.is_over() {
                break;
            }
        }
    }

    info!(
        "Race over after {:.1}s ({} ticks, {})",
        arena.time(),
        game_loop.tick_count(),
        arena.course().countdown().display()
    );
    for slot in PlayerSlot::ALL {
        if let Some(character) = arena.character(slot) {
            info!(
                "{} {}: {} kills, {} respawns",
                slot,
                character.name(),
                character.kill_count(),
                character.respawn_count()
            );
        }
    }

    match arena.winner() {
        Some(winner) => {
            info!("{} wins", winner);
            scenes.load("next_level")?;
        }
        None => {
            info!("Time's Up!");
            scenes.load("main_menu")?;
        }
    }

    Ok(())
}
