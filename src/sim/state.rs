//! Game state and board setup
//!
//! Everything a running game needs lives here: the entity registry, lives,
//! the brick counter, the seeded RNG and the current phase. All mutation of
//! the shared counters and the extra-paddle slot goes through these methods.

use std::collections::BTreeSet;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::ball::{Ball, BallTag};
use super::context::GameContext;
use super::entity::{Body, Brick, EntityId, EntityKind};
use super::factory::StrategyFactory;
use super::lives::Lives;
use super::paddle::Paddle;
use super::phase::GamePhase;
use super::registry::EntityRegistry;
use crate::config::GameConfig;
use crate::consts::*;
use crate::platform::SoundHandle;

/// Something the host may want to react to (sound, HUD, logging)
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    BrickBroken { id: EntityId, remaining: u32 },
    HeartSpawned(EntityId),
    LifeGained { lives: u8 },
    LifeLost { lives: u8 },
    PuckSpawned(EntityId),
    ExtraPaddleSpawned(EntityId),
    ExtraPaddleExpired(EntityId),
    TurboStarted,
    TurboEnded,
    CollisionSound(SoundHandle),
    BallReset,
    GameWon,
    GameLost,
}

/// Complete state of one game
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed this game was built from
    pub seed: u64,
    pub rng: Pcg32,
    pub config: GameConfig,
    pub ctx: GameContext,
    pub registry: EntityRegistry,
    pub lives: Lives,
    pub bricks_remaining: u32,
    pub main_ball: EntityId,
    pub main_paddle: EntityId,
    pub phase: GamePhase,
    /// Events since the host last drained them
    pub events: Vec<GameEvent>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Pairs overlapping at the end of the last tick, smaller id first
    pub(crate) contacts: BTreeSet<(EntityId, EntityId)>,
}

impl GameState {
    /// Build a fresh board
    pub fn new(config: GameConfig, ctx: GameContext, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut registry = EntityRegistry::new();
        let playfield = ctx.playfield;
        let visuals = ctx.visuals;

        // Walls: left, top, right. The bottom is open.
        for (pos, size) in [
            (Vec2::ZERO, Vec2::new(WALL_WIDTH, playfield.y)),
            (Vec2::ZERO, Vec2::new(playfield.x, WALL_WIDTH)),
            (Vec2::new(playfield.x, 0.0), Vec2::new(WALL_WIDTH, playfield.y)),
        ] {
            registry.add(Body::new(pos, size, Default::default()), EntityKind::Wall);
        }

        let paddle_pos = Vec2::new(
            (playfield.x - PADDLE_WIDTH) / 2.0,
            playfield.y - PADDLE_FLOOR_OFFSET,
        );
        let main_paddle = registry.add(
            Body::new(paddle_pos, Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT), visuals.paddle),
            EntityKind::Paddle(Paddle::main(playfield.x, ctx.tuning.paddle_speed)),
        );

        let brick_length = config.brick_length(playfield.x);
        let factory = StrategyFactory::new(brick_length);
        let brick_size = Vec2::new(brick_length, BRICK_HEIGHT);
        let mut bricks = 0;
        for row in 0..config.brick_rows {
            let y = WALL_WIDTH + BRICK_GAP + row as f32 * (BRICK_HEIGHT + BRICK_GAP);
            for col in 0..config.bricks_per_row {
                let x = WALL_WIDTH + BRICK_GAP + col as f32 * (brick_length + BRICK_GAP);
                let pos = Vec2::new(x, y);
                let strategy = factory.draw(&mut rng, STRATEGY_TABLE_SIZE, pos);
                log::debug!("Brick ({row}, {col}) strategy: {:?}", strategy.kind());
                registry.add(
                    Body::new(pos, brick_size, visuals.brick),
                    EntityKind::Brick(Brick { strategy }),
                );
                bricks += 1;
            }
        }

        let mut ball_body = Body::new(Vec2::ZERO, Vec2::splat(BALL_SIZE), visuals.ball)
            .with_velocity(launch_velocity(&mut rng, ctx.tuning.ball_speed));
        ball_body.set_center(playfield * 0.5);
        let main_ball = registry.add(
            ball_body,
            EntityKind::Ball(Ball::new(BallTag::Main, visuals.collision_sound)),
        );

        let mut lives = Lives::new();
        for _ in 0..ctx.tuning.initial_lives {
            lives.add_heart(&mut registry, visuals.heart, playfield);
        }

        log::info!(
            "Board ready: {} rows x {} bricks (length {brick_length}), {} lives, seed {seed}",
            config.brick_rows,
            config.bricks_per_row,
            lives.left()
        );

        Self {
            seed,
            rng,
            config,
            ctx,
            registry,
            lives,
            bricks_remaining: bricks,
            main_ball,
            main_paddle,
            phase: GamePhase::Playing,
            events: Vec::new(),
            time_ticks: 0,
            contacts: BTreeSet::new(),
        }
    }

    /// Start over with a fresh board, reseeding from the running RNG
    pub fn restart(&mut self) {
        let seed: u64 = self.rng.random();
        log::info!("Restarting with seed {seed}");
        *self = Self::new(self.config, self.ctx.clone(), seed);
    }

    /// Remove a brick; the counter only drops if the brick was still there
    pub fn remove_brick(&mut self, id: EntityId) -> bool {
        let is_brick = self.registry.get(id).is_some_and(|e| e.kind.is_brick());
        if !is_brick || !self.registry.remove(id) {
            return false;
        }
        debug_assert!(self.bricks_remaining > 0, "brick counter underflow");
        self.bricks_remaining = self.bricks_remaining.saturating_sub(1);
        self.events.push(GameEvent::BrickBroken {
            id,
            remaining: self.bricks_remaining,
        });
        true
    }

    /// Drop a collectable heart from `pos`
    pub fn spawn_falling_heart(&mut self, pos: Vec2) -> EntityId {
        let body = Body::new(pos, Vec2::splat(HEART_SIZE), self.ctx.visuals.heart)
            .with_velocity(Vec2::new(0.0, self.ctx.tuning.heart_fall_speed));
        let id = self.registry.add(body, EntityKind::Heart);
        self.events.push(GameEvent::HeartSpawned(id));
        id
    }

    /// Create the extra paddle in the middle of the playfield
    ///
    /// Returns None without side effects if one is already active.
    pub fn spawn_extra_paddle(&mut self) -> Option<EntityId> {
        if self.registry.extra_paddle().is_some() {
            return None;
        }
        let size = Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT);
        let mut body = Body::new(Vec2::ZERO, size, self.ctx.visuals.paddle);
        body.set_center(self.ctx.playfield * 0.5);
        let tuning = &self.ctx.tuning;
        let paddle = Paddle::extra(self.ctx.playfield.x, tuning.paddle_speed, tuning.extra_paddle_max_hits);
        let id = self.registry.add(body, EntityKind::Paddle(paddle));
        self.registry.set_extra_paddle(Some(id));
        log::debug!("Extra paddle {id} spawned");
        self.events.push(GameEvent::ExtraPaddleSpawned(id));
        Some(id)
    }

    /// Release one puck from `pos` at a random downward angle
    pub fn spawn_puck(&mut self, pos: Vec2) -> EntityId {
        let angle = self.rng.random_range(0.0..std::f32::consts::PI);
        let vel = Vec2::new(angle.cos(), angle.sin()) * self.ctx.tuning.puck_speed;
        let body = Body::new(pos, Vec2::splat(PUCK_SIZE), self.ctx.visuals.puck).with_velocity(vel);
        let ball = Ball::new(BallTag::Puck, self.ctx.visuals.collision_sound);
        let id = self.registry.add(body, EntityKind::Ball(ball));
        self.events.push(GameEvent::PuckSpawned(id));
        id
    }

    /// Boost `ball_id` if it is the main ball and not already boosted
    pub fn activate_turbo(&mut self, ball_id: EntityId) -> bool {
        let factor = self.ctx.tuning.turbo_factor;
        let turbo_visual = self.ctx.visuals.turbo_ball;
        let Some(entity) = self.registry.get_mut(ball_id) else {
            return false;
        };
        let EntityKind::Ball(ball) = &mut entity.kind else {
            return false;
        };
        if !ball.activate_turbo(&mut entity.body, factor, turbo_visual) {
            return false;
        }
        log::debug!("Turbo on for ball {ball_id}");
        self.events.push(GameEvent::TurboStarted);
        true
    }

    /// Grant a life; no-op once the heart cap is reached
    pub fn add_heart(&mut self) -> bool {
        let added = self
            .lives
            .add_heart(&mut self.registry, self.ctx.visuals.heart, self.ctx.playfield);
        if added {
            log::debug!("Life gained, {} left", self.lives.left());
            self.events.push(GameEvent::LifeGained {
                lives: self.lives.left(),
            });
        }
        added
    }

    /// Take a life and put the ball back in play
    pub fn lose_life(&mut self) -> bool {
        if !self.lives.lose_life(&mut self.registry) {
            return false;
        }
        log::debug!("Life lost, {} left", self.lives.left());
        self.events.push(GameEvent::LifeLost {
            lives: self.lives.left(),
        });
        self.reset_ball();
        true
    }

    /// Recenter the main ball with a fresh launch velocity
    pub fn reset_ball(&mut self) {
        let factor = self.ctx.tuning.turbo_factor;
        let center = self.ctx.playfield * 0.5;
        let vel = launch_velocity(&mut self.rng, self.ctx.tuning.ball_speed);
        let Some(entity) = self.registry.get_mut(self.main_ball) else {
            return;
        };
        if let EntityKind::Ball(ball) = &mut entity.kind {
            if ball.cancel_turbo(&mut entity.body, factor) {
                self.events.push(GameEvent::TurboEnded);
            }
        }
        entity.body.set_center(center);
        entity.body.vel = vel;
        self.events.push(GameEvent::BallReset);
    }

    /// Whether the main ball has dropped below the playfield
    pub fn main_ball_fell_out(&self) -> bool {
        self.registry
            .get(self.main_ball)
            .is_some_and(|e| e.body.center().y > self.ctx.playfield.y)
    }
}

/// Diagonal launch: fixed speed on both axes, heading down, random side
fn launch_velocity(rng: &mut Pcg32, speed: f32) -> Vec2 {
    let vx = if rng.random_bool(0.5) { -speed } else { speed };
    Vec2::new(vx, speed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::HandleTable;
    use crate::tuning::Tuning;

    fn new_state(config: GameConfig, seed: u64) -> GameState {
        let mut assets = HandleTable::default();
        let ctx = GameContext::new(Vec2::new(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT), Tuning::default(), &mut assets);
        GameState::new(config, ctx, seed)
    }

    #[test]
    fn test_initial_board() {
        let state = new_state(GameConfig::default(), 42);
        assert_eq!(state.bricks_remaining, 56);
        assert_eq!(state.registry.count(|e| e.kind.is_brick()), 56);
        assert_eq!(state.registry.count(|e| e.kind == EntityKind::Wall), 3);
        assert_eq!(state.registry.count(|e| e.kind == EntityKind::LifeIcon), 3);
        assert_eq!(state.lives.left(), 3);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.registry.extra_paddle(), None);

        let ball = state.registry.get(state.main_ball).unwrap();
        assert_eq!(ball.body.center(), Vec2::new(350.0, 250.0));
        assert_eq!(ball.body.vel.x.abs(), BALL_SPEED);
        assert_eq!(ball.body.vel.y, BALL_SPEED);
    }

    #[test]
    fn test_bricks_fit_between_walls() {
        let state = new_state(GameConfig::new(3, 12).unwrap(), 1);
        for entity in state.registry.iter().filter(|e| e.kind.is_brick()) {
            assert!(entity.body.pos.x >= WALL_WIDTH);
            assert!(entity.body.pos.x + entity.body.size.x <= PLAYFIELD_WIDTH - WALL_WIDTH);
        }
    }

    #[test]
    fn test_same_seed_same_board() {
        let a = new_state(GameConfig::default(), 1234);
        let b = new_state(GameConfig::default(), 1234);
        let strategies = |s: &GameState| {
            s.registry
                .iter()
                .filter_map(|e| match &e.kind {
                    EntityKind::Brick(b) => Some(b.strategy.clone()),
                    _ => None,
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(strategies(&a), strategies(&b));
    }

    #[test]
    fn test_remove_brick_twice_counts_once() {
        let mut state = new_state(GameConfig::default(), 9);
        let brick = state.registry.iter().find(|e| e.kind.is_brick()).unwrap().id;

        assert!(state.remove_brick(brick));
        assert!(!state.remove_brick(brick));
        assert_eq!(state.bricks_remaining, 55);
    }

    #[test]
    fn test_remove_brick_ignores_non_bricks() {
        let mut state = new_state(GameConfig::default(), 9);
        let ball = state.main_ball;
        assert!(!state.remove_brick(ball));
        assert!(state.registry.contains(ball));
        assert_eq!(state.bricks_remaining, 56);
    }

    #[test]
    fn test_heart_cap_from_game_state() {
        let mut state = new_state(GameConfig::default(), 5);
        assert!(state.add_heart());
        assert_eq!(state.lives.left(), HEART_CAP);
        let entities = state.registry.len();

        for _ in 0..20 {
            assert!(!state.add_heart());
        }
        assert_eq!(state.lives.left(), HEART_CAP);
        assert_eq!(state.registry.len(), entities);
    }

    #[test]
    fn test_reset_ball_clears_turbo() {
        let mut state = new_state(GameConfig::default(), 5);
        assert!(state.activate_turbo(state.main_ball));
        state.reset_ball();

        let ball = state.registry.get(state.main_ball).unwrap();
        let EntityKind::Ball(b) = &ball.kind else {
            panic!("main ball missing");
        };
        assert!(!b.is_turbo());
        assert_eq!(ball.body.visual, state.ctx.visuals.ball);
        assert_eq!(ball.body.vel.y, BALL_SPEED);
        assert_eq!(ball.body.center(), Vec2::new(350.0, 250.0));
    }

    #[test]
    fn test_extra_paddle_slot_reopens_after_removal() {
        let mut state = new_state(GameConfig::default(), 5);
        let first = state.spawn_extra_paddle().unwrap();
        assert_eq!(state.spawn_extra_paddle(), None);

        assert!(state.registry.remove(first));
        assert_eq!(state.registry.extra_paddle(), None);
        let second = state.spawn_extra_paddle().unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_restart_rebuilds_board() {
        let mut state = new_state(GameConfig::new(2, 2).unwrap(), 77);
        let brick = state.registry.iter().find(|e| e.kind.is_brick()).unwrap().id;
        state.remove_brick(brick);
        state.lose_life();
        state.restart();

        assert_eq!(state.bricks_remaining, 4);
        assert_eq!(state.lives.left(), INITIAL_LIVES);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_ne!(state.seed, 77);
    }
}
