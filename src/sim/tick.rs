//! Fixed timestep simulation tick
//!
//! One tick: move everything, dispatch collisions that started this tick,
//! drop pickups and pucks that left the playfield, then evaluate the phase.

use super::collision::{Contact, box_contact};
use super::entity::{EntityId, EntityKind};
use super::phase::{self, GamePhase};
use super::state::{GameEvent, GameState};
use super::strategy::CollisionStrategy;
use crate::platform::{InputSource, Key};

/// Keys held during a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
}

impl InputSource for TickInput {
    fn is_key_down(&self, key: Key) -> bool {
        match key {
            Key::Left => self.left,
            Key::Right => self.right,
        }
    }
}

/// Advance the game state by one fixed timestep
pub fn tick<I: InputSource + ?Sized>(state: &mut GameState, input: &I, dt: f32) {
    if state.phase != GamePhase::Playing {
        return;
    }
    state.time_ticks += 1;

    move_entities(state, input, dt);
    resolve_collisions(state);
    cull_out_of_bounds(state);
    phase::evaluate(state);
}

fn move_entities<I: InputSource + ?Sized>(state: &mut GameState, input: &I, dt: f32) {
    for entity in state.registry.iter_mut() {
        match &entity.kind {
            EntityKind::Paddle(paddle) => {
                let mover = paddle.mover;
                mover.steer(&mut entity.body, input);
                entity.body.advance(dt);
                mover.clamp(&mut entity.body);
            }
            EntityKind::Ball(_) | EntityKind::Heart => entity.body.advance(dt),
            EntityKind::Wall | EntityKind::Brick(_) | EntityKind::LifeIcon => {}
        }
    }
}

fn resolve_collisions(state: &mut GameState) {
    let mut overlapping: Vec<(EntityId, EntityId, Contact)> = Vec::new();
    {
        let entities: Vec<_> = state.registry.iter().collect();
        for (i, a) in entities.iter().enumerate() {
            for b in &entities[i + 1..] {
                if !a.collides_with(b) {
                    continue;
                }
                if let Some(contact) = box_contact(a.body.pos, a.body.size, b.body.pos, b.body.size) {
                    overlapping.push((a.id, b.id, contact));
                }
            }
        }
    }

    // Only pairs that were apart last tick count as a new collision
    let previous = std::mem::take(&mut state.contacts);
    for (a, b, contact) in overlapping {
        state.contacts.insert((a, b));
        if !previous.contains(&(a, b)) {
            dispatch(state, a, b, contact);
        }
    }
}

/// Run both sides' collision handlers; `contact.normal` points toward `a`
fn dispatch(state: &mut GameState, a: EntityId, b: EntityId, contact: Contact) {
    let (Some(ea), Some(eb)) = (state.registry.get(a), state.registry.get(b)) else {
        // Removed earlier this tick
        return;
    };
    log::trace!("Collision {a} <-> {b}");

    // A brick's strategy runs after the other side has reacted
    if ea.kind.is_brick() && !eb.kind.is_brick() {
        on_collision_enter(state, b, a, contact.flipped());
        on_collision_enter(state, a, b, contact);
    } else {
        on_collision_enter(state, a, b, contact);
        on_collision_enter(state, b, a, contact.flipped());
    }
}

/// Follow-up work once the registry borrow is released
enum Reaction {
    Nothing,
    PaddleUsedUp,
    HeartCaught,
    Strategy(CollisionStrategy),
}

/// Handle `id` colliding with `other`; `contact.normal` points toward `id`
fn on_collision_enter(state: &mut GameState, id: EntityId, other: EntityId, contact: Contact) {
    let Some(other_is_ball) = state.registry.get(other).map(|e| e.kind.is_ball()) else {
        return;
    };
    let factor = state.ctx.tuning.turbo_factor;
    let max_turbo_collisions = state.ctx.tuning.turbo_max_collisions;

    let reaction = {
        let Some(entity) = state.registry.get_mut(id) else {
            return;
        };
        match &mut entity.kind {
            EntityKind::Ball(ball) => {
                state.events.push(GameEvent::CollisionSound(ball.sound));
                if ball.on_collision_enter(&mut entity.body, contact.normal, factor, max_turbo_collisions) {
                    log::debug!("Turbo off for ball {id}");
                    state.events.push(GameEvent::TurboEnded);
                }
                Reaction::Nothing
            }
            EntityKind::Paddle(paddle) => {
                if other_is_ball && paddle.on_ball_hit() {
                    Reaction::PaddleUsedUp
                } else {
                    Reaction::Nothing
                }
            }
            EntityKind::Heart => Reaction::HeartCaught,
            EntityKind::Brick(brick) => Reaction::Strategy(brick.strategy.clone()),
            EntityKind::Wall | EntityKind::LifeIcon => Reaction::Nothing,
        }
    };

    match reaction {
        Reaction::Nothing => {}
        Reaction::PaddleUsedUp => {
            // Removing the occupant also vacates the extra-paddle slot
            if state.registry.remove(id) {
                log::debug!("Extra paddle {id} used up");
                state.events.push(GameEvent::ExtraPaddleExpired(id));
            }
        }
        Reaction::HeartCaught => {
            if state.registry.remove(id) {
                state.add_heart();
            }
        }
        Reaction::Strategy(strategy) => strategy.on_collision(state, id, other),
    }
}

/// Remove hearts and pucks whose center has passed the playfield bottom
fn cull_out_of_bounds(state: &mut GameState) {
    let floor = state.ctx.playfield.y;
    let gone: Vec<EntityId> = state
        .registry
        .iter()
        .filter(|e| match &e.kind {
            EntityKind::Heart => true,
            EntityKind::Ball(ball) => ball.is_puck(),
            _ => false,
        })
        .filter(|e| e.body.center().y > floor)
        .map(|e| e.id)
        .collect();
    for id in gone {
        state.registry.remove(id);
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::consts::*;
    use crate::platform::HandleTable;
    use crate::sim::context::GameContext;
    use crate::sim::phase::Outcome;
    use crate::sim::strategy::DoubleStrategy;
    use crate::{GameConfig, Tuning};

    fn new_state(config: GameConfig, seed: u64) -> GameState {
        let mut assets = HandleTable::default();
        let ctx = GameContext::new(Vec2::new(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT), Tuning::default(), &mut assets);
        GameState::new(config, ctx, seed)
    }

    fn place_ball(state: &mut GameState, pos: Vec2, vel: Vec2) {
        let ball = state.registry.get_mut(state.main_ball).unwrap();
        ball.body.pos = pos;
        ball.body.vel = vel;
    }

    fn only_brick(state: &GameState) -> EntityId {
        state.registry.iter().find(|e| e.kind.is_brick()).unwrap().id
    }

    #[test]
    fn test_ball_breaks_last_brick_and_wins() {
        // One brick spanning the whole row at y = 11..26
        let mut state = new_state(GameConfig::new(1, 1).unwrap(), 12345);
        let brick = only_brick(&state);
        place_ball(&mut state, Vec2::new(300.0, 25.0), Vec2::new(100.0, -100.0));

        tick(&mut state, &TickInput::default(), SIM_DT);

        assert!(!state.registry.contains(brick));
        assert_eq!(state.bricks_remaining, 0);
        assert_eq!(state.phase, GamePhase::AwaitingReplayChoice(Outcome::Won));
        let ball = state.registry.get(state.main_ball).unwrap();
        assert!(ball.body.vel.y > 0.0, "ball bounced off the brick");
        assert!(
            state
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::CollisionSound(_)))
        );
    }

    #[test]
    fn test_double_strategy_counts_brick_once() {
        let mut state = new_state(GameConfig::new(1, 1).unwrap(), 1);
        let brick = only_brick(&state);
        if let EntityKind::Brick(b) = &mut state.registry.get_mut(brick).unwrap().kind {
            b.strategy = CollisionStrategy::Double(DoubleStrategy::new(vec![
                CollisionStrategy::Basic,
                CollisionStrategy::Basic,
                CollisionStrategy::Basic,
            ]));
        }
        place_ball(&mut state, Vec2::new(300.0, 25.0), Vec2::new(100.0, -100.0));

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.bricks_remaining, 0);
        let broken = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::BrickBroken { .. }))
            .count();
        assert_eq!(broken, 1);
    }

    #[test]
    fn test_extra_paddle_expires_after_four_hits() {
        let mut state = new_state(GameConfig::new(1, 8).unwrap(), 7);
        let paddle = state.spawn_extra_paddle().unwrap();
        let input = TickInput::default();

        // Paddle spans y = 242.5..257.5; hit it from above, then pull away
        for hit in 1..=4 {
            place_ball(&mut state, Vec2::new(340.0, 224.0), Vec2::new(0.0, 60.0));
            tick(&mut state, &input, SIM_DT);
            if hit < 4 {
                let extra = state.registry.get(paddle).unwrap();
                let EntityKind::Paddle(p) = &extra.kind else {
                    panic!("extra paddle missing");
                };
                assert_eq!(p.ball_hits(), hit);
            }
            place_ball(&mut state, Vec2::new(340.0, 150.0), Vec2::new(0.0, -1.0));
            tick(&mut state, &input, SIM_DT);
        }

        assert!(!state.registry.contains(paddle));
        assert_eq!(state.registry.extra_paddle(), None);
        assert!(state.events.contains(&GameEvent::ExtraPaddleExpired(paddle)));
        assert!(state.spawn_extra_paddle().is_some());
    }

    #[test]
    fn test_paddle_catches_heart() {
        let mut state = new_state(GameConfig::default(), 3);
        // Main paddle spans x = 300..400, y = 470..485
        let heart = state.spawn_falling_heart(Vec2::new(340.0, 460.0));

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(!state.registry.contains(heart));
        assert_eq!(state.lives.left(), 4);
        assert_eq!(state.lives.counter().text, "4");
    }

    #[test]
    fn test_missed_heart_and_pucks_leave_playfield() {
        let mut state = new_state(GameConfig::default(), 3);
        let heart = state.spawn_falling_heart(Vec2::new(20.0, 495.0));
        let puck = state.spawn_puck(Vec2::new(600.0, 495.0));
        if let Some(p) = state.registry.get_mut(puck) {
            p.body.vel = Vec2::new(0.0, 100.0);
        }

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(!state.registry.contains(heart));
        assert!(!state.registry.contains(puck));
        assert_eq!(state.lives.left(), 3);
    }

    fn main_ball_turbo(state: &GameState) -> (bool, u32) {
        match &state.registry.get(state.main_ball).unwrap().kind {
            EntityKind::Ball(b) => (b.is_turbo(), b.turbo_collisions()),
            _ => panic!("main ball missing"),
        }
    }

    #[test]
    fn test_turbo_brick_hit_is_not_counted() {
        // Two bricks, x = 11..349 and 350..688; the second keeps the game going
        let mut state = new_state(GameConfig::new(1, 2).unwrap(), 21);
        let brick = only_brick(&state);
        if let EntityKind::Brick(b) = &mut state.registry.get_mut(brick).unwrap().kind {
            b.strategy = CollisionStrategy::Turbo;
        }
        let input = TickInput::default();
        place_ball(&mut state, Vec2::new(100.0, 25.0), Vec2::new(100.0, -100.0));
        tick(&mut state, &input, SIM_DT);

        assert!(!state.registry.contains(brick));
        assert_eq!(main_ball_turbo(&state), (true, 0));
        let ball = state.registry.get(state.main_ball).unwrap();
        assert!((ball.body.vel - Vec2::new(140.0, 140.0)).length() < 1e-3);
        assert_eq!(ball.body.visual, state.ctx.visuals.turbo_ball);

        // Bounce off the left wall (x = 0..10), then move clear
        let turbo_speed = BALL_SPEED * TURBO_FACTOR;
        for hit in 1..=TURBO_MAX_COLLISIONS + 1 {
            place_ball(&mut state, Vec2::new(9.0, 300.0), Vec2::new(-turbo_speed, 0.0));
            tick(&mut state, &input, SIM_DT);
            if hit > TURBO_MAX_COLLISIONS {
                break;
            }
            assert_eq!(main_ball_turbo(&state), (true, hit));
            place_ball(&mut state, Vec2::new(200.0, 300.0), Vec2::ZERO);
            tick(&mut state, &input, SIM_DT);
        }

        // Seventh counted collision reflects, then undoes the boost
        assert_eq!(main_ball_turbo(&state), (false, 0));
        assert!(state.events.contains(&GameEvent::TurboEnded));
        let ball = state.registry.get(state.main_ball).unwrap();
        assert!((ball.body.vel - Vec2::new(BALL_SPEED, 0.0)).length() < 1e-3);
        assert_eq!(ball.body.visual, state.ctx.visuals.ball);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_paddles_follow_input() {
        let mut state = new_state(GameConfig::default(), 3);
        let extra = state.spawn_extra_paddle().unwrap();
        let main_x = state.registry.get(state.main_paddle).unwrap().body.pos.x;
        let extra_x = state.registry.get(extra).unwrap().body.pos.x;

        let input = TickInput {
            right: true,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);

        let step = PADDLE_SPEED * SIM_DT;
        let main = state.registry.get(state.main_paddle).unwrap();
        assert!((main.body.pos.x - (main_x + step)).abs() < 1e-3);
        let extra = state.registry.get(extra).unwrap();
        assert!((extra.body.pos.x - (extra_x + step)).abs() < 1e-3);
    }

    #[test]
    fn test_paused_phases_do_not_tick() {
        let mut state = new_state(GameConfig::default(), 3);
        state.phase = GamePhase::Terminated;
        let before = state.registry.get(state.main_ball).unwrap().body.pos;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.registry.get(state.main_ball).unwrap().body.pos, before);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = new_state(GameConfig::default(), 99999);
        let mut state2 = new_state(GameConfig::default(), 99999);

        let inputs = [
            TickInput {
                left: true,
                ..Default::default()
            },
            TickInput::default(),
            TickInput {
                right: true,
                ..Default::default()
            },
        ];

        for i in 0..3000 {
            let input = &inputs[(i / 100) % inputs.len()];
            tick(&mut state1, input, SIM_DT);
            tick(&mut state2, input, SIM_DT);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.bricks_remaining, state2.bricks_remaining);
        assert_eq!(state1.lives.left(), state2.lives.left());
        assert_eq!(state1.phase, state2.phase);
        assert_eq!(state1.registry.len(), state2.registry.len());
        let pos = |s: &GameState| s.registry.get(s.main_ball).map(|e| e.body.pos);
        assert_eq!(pos(&state1), pos(&state2));
    }
}
