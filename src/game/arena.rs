// Arena - both players, enemies, thrown items and the course in one tick

use glam::Vec3;

use crate::engine::input::{Action, InputManager, PlayerSlot};
use crate::engine::physics::PhysicalMotor;
use crate::game::characters::{AnimationSink, ArcStep, Character, ThrownItem};
use crate::game::combat::{self, AttackOutcome};
use crate::game::course::Course;
use crate::game::enemies::{Enemy, EnemyId, EnemySpawner, EnemyStrike};
use crate::game::events::GameEvent;
use crate::game::GameError;

/// A character together with the host objects it drives
pub struct PlayerRig {
    pub character: Character,
    pub motor: Box<dyn PhysicalMotor>,
    pub animator: Box<dyn AnimationSink>,
}

/// The whole match state
pub struct Arena {
    players: [Option<PlayerRig>; 2],
    enemies: Vec<Enemy>,
    spawner: EnemySpawner,
    thrown: Vec<ThrownItem>,
    course: Course,
    /// Simulated seconds since the match started
    time: f32,
    events: Vec<GameEvent>,
}

impl Arena {
    /// Create the arena and place the level-start enemies
    pub fn new(course: Course, mut spawner: EnemySpawner) -> Self {
        let enemies = spawner.spawn_all();
        let events = enemies
            .iter()
            .map(|enemy| GameEvent::EnemySpawned {
                enemy: enemy.id(),
                kind: enemy.kind(),
                position: enemy.position(),
            })
            .collect();

        Self {
            players: [None, None],
            enemies,
            spawner,
            thrown: Vec::new(),
            course,
            time: 0.0,
            events,
        }
    }

    /// Put a player into the arena, replacing whoever held the slot
    pub fn add_player(
        &mut self,
        character: Character,
        motor: Box<dyn PhysicalMotor>,
        animator: Box<dyn AnimationSink>,
    ) -> Result<(), GameError> {
        character.config().validate()?;
        let slot = character.slot();
        log::info!("{} ({}) joined", slot, character.name());
        self.players[slot.index()] = Some(PlayerRig {
            character,
            motor,
            animator,
        });
        Ok(())
    }

    /// Take a player out of the arena
    pub fn remove_player(&mut self, slot: PlayerSlot) -> Result<PlayerRig, GameError> {
        let rig = self.players[slot.index()]
            .take()
            .ok_or(GameError::MissingPlayer(slot))?;
        self.course.forget(slot);
        log::info!("{} left", slot);
        Ok(rig)
    }

    pub fn player(&self, slot: PlayerSlot) -> Result<&PlayerRig, GameError> {
        self.players[slot.index()]
            .as_ref()
            .ok_or(GameError::MissingPlayer(slot))
    }

    pub fn player_mut(&mut self, slot: PlayerSlot) -> Result<&mut PlayerRig, GameError> {
        self.players[slot.index()]
            .as_mut()
            .ok_or(GameError::MissingPlayer(slot))
    }

    pub fn character(&self, slot: PlayerSlot) -> Option<&Character> {
        self.players[slot.index()].as_ref().map(|rig| &rig.character)
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn enemy(&self, id: EnemyId) -> Result<&Enemy, GameError> {
        self.enemies
            .iter()
            .find(|enemy| enemy.id() == id)
            .ok_or(GameError::UnknownEnemy(id))
    }

    pub fn thrown_items(&self) -> &[ThrownItem] {
        &self.thrown
    }

    pub fn course(&self) -> &Course {
        &self.course
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn winner(&self) -> Option<PlayerSlot> {
        self.course.winner()
    }

    /// The race is over once someone finished or the timer ran out
    pub fn is_over(&self) -> bool {
        self.winner().is_some() || self.course.countdown().is_expired()
    }

    fn positions(&self) -> [Option<Vec3>; 2] {
        PlayerSlot::ALL.map(|slot| self.character(slot).map(Character::position))
    }

    fn kill_counts(&self) -> [u32; 2] {
        PlayerSlot::ALL.map(|slot| self.character(slot).map_or(0, Character::kill_count))
    }

    /// Run one simulation tick
    pub fn tick(&mut self, dt: f32, inputs: &InputManager) {
        self.time += dt;

        self.tick_characters(dt, inputs);
        self.handle_actions(inputs);
        self.advance_thrown_items(dt);
        self.tick_enemies(dt);
        self.despawn_and_respawn(dt);
        self.update_course(dt);
        self.collect_events();
    }

    fn tick_characters(&mut self, dt: f32, inputs: &InputManager) {
        for slot in PlayerSlot::ALL {
            if let Some(rig) = self.players[slot.index()].as_mut() {
                rig.animator.advance(dt);
                rig.character.tick(
                    dt,
                    inputs.player(slot),
                    rig.motor.as_mut(),
                    rig.animator.as_mut(),
                );
            }
        }
    }

    fn handle_actions(&mut self, inputs: &InputManager) {
        let positions = self.positions();

        for slot in PlayerSlot::ALL {
            let input = inputs.player(slot);
            let Some(rig) = self.players[slot.index()].as_mut() else {
                continue;
            };

            if input.just_pressed(Action::SelectItem) {
                rig.character.toggle_item_selection();
            }

            if input.just_pressed(Action::Attack) {
                let outcome =
                    combat::attempt_attack(&mut rig.character, &mut self.enemies, rig.animator.as_mut());
                if let AttackOutcome::Hit {
                    enemy,
                    health,
                    max_health,
                    killed,
                } = outcome
                {
                    self.events.push(GameEvent::EnemyDamaged {
                        enemy,
                        health,
                        max_health,
                    });
                    if killed {
                        self.events.push(GameEvent::EnemyDied {
                            enemy,
                            killer: Some(slot),
                        });
                    }
                }
            }

            if input.just_pressed(Action::Throw) {
                let target = slot.other();
                if let Some(item) =
                    rig.character
                        .try_throw(target, positions[target.index()], rig.animator.as_mut())
                {
                    self.thrown.push(item);
                }
            }
        }
    }

    fn advance_thrown_items(&mut self, dt: f32) {
        let positions = self.positions();
        let mut landed = Vec::new();

        self.thrown.retain_mut(|item| {
            match item.advance(dt, positions[item.target().index()]) {
                ArcStep::InFlight(_) => true,
                ArcStep::Arrived(_) => {
                    landed.push((item.thrower(), item.target()));
                    false
                }
                ArcStep::Aborted => {
                    log::warn!("{}, mushroom dropped", GameError::MissingTarget(item.target()));
                    false
                }
            }
        });

        for (from, target) in landed {
            if let Some(rig) = self.players[target.index()].as_mut() {
                rig.character.apply_item_hit(rig.animator.as_mut());
                self.events.push(GameEvent::ItemLanded { from, target });
            }
        }
    }

    fn tick_enemies(&mut self, dt: f32) {
        let players: Vec<(PlayerSlot, Vec3)> = PlayerSlot::ALL
            .into_iter()
            .filter_map(|slot| self.character(slot).map(|c| (slot, c.position())))
            .collect();

        let now = self.time;
        let rng = self.spawner.rng_mut();
        let strikes: Vec<EnemyStrike> = self
            .enemies
            .iter_mut()
            .filter_map(|enemy| enemy.tick(dt, now, &players, &mut *rng))
            .collect();

        for strike in strikes {
            let Some(rig) = self.players[strike.target.index()].as_mut() else {
                continue;
            };
            rig.character
                .receive_strike(rig.animator.as_mut(), strike.source, strike.damage);
        }
    }

    fn despawn_and_respawn(&mut self, dt: f32) {
        let mut removed = Vec::new();
        self.enemies.retain(|enemy| {
            if enemy.should_remove() {
                removed.push((enemy.id(), enemy.original_position()));
                false
            } else {
                true
            }
        });

        for (enemy, position) in removed {
            self.events.push(GameEvent::EnemyRemoved { enemy });
            self.spawner.schedule_respawn(position);
        }

        for enemy in self.spawner.tick(dt) {
            self.events.push(GameEvent::EnemySpawned {
                enemy: enemy.id(),
                kind: enemy.kind(),
                position: enemy.position(),
            });
            self.enemies.push(enemy);
        }
    }

    fn update_course(&mut self, dt: f32) {
        for rig in self.players.iter_mut().flatten() {
            self.course
                .update_character(&mut rig.character, rig.motor.as_mut());
        }
        let kills = self.kill_counts();
        self.course.tick(dt, kills);
    }

    fn collect_events(&mut self) {
        for rig in self.players.iter_mut().flatten() {
            self.events.extend(rig.character.drain_events());
        }
        self.events.extend(self.course.drain_events());
    }

    /// Take every event produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
