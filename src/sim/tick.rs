//! Per-frame update step and session state machine
//!
//! `tick` is what the render driver calls once per frame: it applies that
//! frame's input, then runs `update`. Every timer is counted in ticks here, so
//! a session is fully reproducible from its seed and input sequence.

use super::autopilot;
use super::collision::{fatal_collision, is_grounded, is_landing, resolve_landing, touches_lava};
use super::generator::{generate_next, needs_spawn, seed_flappy_pairs, spawn_distance};
use super::particles::update_particles;
use super::state::{DeathCause, GameEvent, GameMode, GamePhase, GameState, TransitionMarker};
use crate::consts::*;
use crate::settings::{ColorSet, Difficulty, DifficultyProfile};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump pressed this frame (space, click, tap)
    pub jump: bool,
    /// Pointer or touch currently held
    pub pointer_down: bool,
    /// Pause toggle
    pub pause: bool,
    /// Demo mode - the autopilot plays the game
    pub autopilot: bool,
}

/// Scroll speed for a score: grows linearly, capped
pub fn scroll_speed(score: u32, profile: &DifficultyProfile) -> f32 {
    (profile.base_speed + score as f32 * SPEED_INCREMENT).min(MAX_GAME_SPEED)
}

/// Apply one frame of input, then advance the simulation
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.pause {
        toggle_pause(state);
    }
    state.pointer_down = input.pointer_down;

    let mut jump = input.jump;
    if input.autopilot {
        jump |= match state.phase {
            GamePhase::Menu => true,
            GamePhase::Won => !state.win_grace.is_active(),
            GamePhase::Playing => autopilot::wants_jump(state),
            _ => false,
        };
    }
    if jump {
        handle_jump(state);
    }

    update(state);
}

/// Advance the session by one frame. Gameplay only moves while `Playing`;
/// the countdown and win-grace timers run in their own phases.
pub fn update(state: &mut GameState) {
    match state.phase {
        GamePhase::Countdown => {
            if state.countdown.tick() {
                reset_game(state);
            }
            return;
        }
        GamePhase::Won => {
            state.win_grace.tick();
            return;
        }
        GamePhase::Playing => {}
        GamePhase::Menu | GamePhase::Paused => return,
    }

    state.time_ticks += 1;

    // Held pointer keeps jumping whenever the player touches ground
    if state.mode == GameMode::Normal && state.pointer_down {
        try_jump(state);
    }

    let profile = state.profile();
    state.game_speed = scroll_speed(state.score, &profile);
    state.platform_distance = spawn_distance(state.game_speed);

    state.player.integrate();

    // Flappy mode has a ceiling; top pillars hang from y = 0
    if state.mode == GameMode::Flappy && state.player.pos.y < 0.0 {
        state.player.pos.y = 0.0;
        state.player.velocity = state.player.velocity.max(0.0);
    }

    let lava_y = state.viewport.lava_y;
    if touches_lava(&state.player, lava_y) {
        state.player.pos.y = lava_y - state.player.size.y;
        state.player.velocity = 0.0;
        die(state, DeathCause::Lava);
        return;
    }

    // Reverse order so removal keeps the remaining indices valid
    let speed = state.game_speed;
    let mut grounded = false;
    for i in (0..state.obstacles.len()).rev() {
        state.obstacles[i].x -= speed;

        if state.obstacles[i].right() <= 0.0 {
            let mut passed = state.obstacles.remove(i);
            if passed.counts_for_score() && !passed.scored {
                passed.scored = true;
                award_point(state);
            }
            continue;
        }

        let obstacle = &state.obstacles[i];
        if is_landing(&state.player, obstacle) {
            let was_airborne = state.player.jumping;
            resolve_landing(&mut state.player, obstacle);
            if was_airborne {
                state.push_event(GameEvent::Landed);
            }
            grounded = true;
        } else if is_grounded(&state.player, obstacle) {
            grounded = true;
        }

        if let Some(cause) = fatal_collision(&state.player, &state.obstacles[i], speed) {
            die(state, cause);
            return;
        }
    }

    if !grounded {
        state.player.jumping = true;
    }

    // Cosmetics
    if state.player.jumping {
        state.player.rotation += SPIN_PER_TICK;
    } else {
        state.player.rotation = 0.0;
    }
    state.player.record_trail();
    update_particles(state);

    if needs_spawn(state) {
        generate_next(state);
    }

    advance_mode_transition(state);
    check_win(state);
}

/// Count one passed obstacle; pays coins at every interval
fn award_point(state: &mut GameState) {
    state.score += 1;
    state.push_event(GameEvent::Scored(state.score));

    if state.score % COIN_SCORE_INTERVAL == 0 {
        let coins = state.profile().coin_reward;
        state.wallet.coins += coins;
        state.push_event(GameEvent::CoinsAwarded(coins));
        log::debug!("Score {}: +{} coins ({} total)", state.score, coins, state.wallet.coins);
    }
}

/// Bring in the transition marker once the threshold is hit; switch modes when it reaches the player
fn advance_mode_transition(state: &mut GameState) {
    if state.mode != GameMode::Normal {
        return;
    }

    if state.marker.is_none() && state.score >= FLAPPY_SCORE_THRESHOLD {
        log::info!("Score {}: flappy mode incoming", state.score);
        state.marker = Some(TransitionMarker {
            x: state.viewport.width,
        });
        return;
    }

    let Some(marker) = state.marker.as_mut() else {
        return;
    };
    marker.x -= state.game_speed;
    if marker.x > state.player.pos.x {
        return;
    }

    state.marker = None;
    state.obstacles.clear();
    state.mode = GameMode::Flappy;
    seed_flappy_pairs(state);

    // Launch the player upward so the first pair is reachable without a landing
    state.player.velocity = FLAP_FORCE;
    state.player.jumping = true;

    state.push_event(GameEvent::ModeChanged(GameMode::Flappy));
    log::info!("Switched to flappy mode at score {}", state.score);
}

fn check_win(state: &mut GameState) {
    if state.score < WIN_SCORE {
        return;
    }
    let bonus = state.profile().win_bonus;
    state.phase = GamePhase::Won;
    state.wallet.coins += bonus;
    state.wallet.wins += 1;
    state.win_grace.start(WIN_GRACE_TICKS);
    state.push_event(GameEvent::Won);
    log::info!(
        "Won on {} (+{} coins, {} wins total)",
        state.difficulty.as_str(),
        bonus,
        state.wallet.wins
    );
}

fn die(state: &mut GameState, cause: DeathCause) {
    log::info!("Run {} ended at score {}: {:?}", state.runs, state.score, cause);
    state.push_event(GameEvent::Died(cause));
    start_countdown(state);
}

/// Enter the countdown phase. A countdown already running is replaced, so only
/// one reset ever fires.
pub fn start_countdown(state: &mut GameState) {
    state.phase = GamePhase::Countdown;
    state.countdown.start(COUNTDOWN_TICKS);
}

/// Jump if standing on something (normal mode) or flap (flappy mode)
fn try_jump(state: &mut GameState) -> bool {
    let velocity = match state.mode {
        GameMode::Normal => {
            let grounded = state
                .obstacles
                .iter()
                .any(|o| is_grounded(&state.player, o));
            if !grounded {
                return false;
            }
            JUMP_FORCE
        }
        GameMode::Flappy => FLAP_FORCE,
    };
    state.player.velocity = velocity;
    state.player.jumping = true;
    state.push_event(GameEvent::Jumped);
    true
}

/// Discrete jump action. Doubles as start (from the menu) and replay (after a win).
pub fn handle_jump(state: &mut GameState) {
    match state.phase {
        GamePhase::Menu => start_game(state),
        GamePhase::Paused | GamePhase::Countdown => {}
        GamePhase::Won => {
            if state.win_grace.is_active() {
                log::debug!("Replay ignored during win grace");
            } else {
                reset_game(state);
            }
        }
        GamePhase::Playing => {
            try_jump(state);
        }
    }
}

/// Leave the menu and begin the first run
pub fn start_game(state: &mut GameState) {
    if state.phase != GamePhase::Menu {
        return;
    }
    log::info!("Starting game on {}", state.difficulty.as_str());
    state.push_event(GameEvent::Started);
    reset_game(state);
}

/// Fresh run: clears the track, timers and score, places the start platform
pub fn reset_game(state: &mut GameState) {
    state.phase = GamePhase::Playing;
    state.mode = GameMode::Normal;
    state.marker = None;
    state.countdown.cancel();
    state.win_grace.cancel();
    state.score = 0;
    state.game_speed = state.profile().base_speed;
    state.platform_distance = INITIAL_PLATFORM_DISTANCE;
    state.obstacles.clear();
    state.particles.clear();
    state.player.reset();
    state.runs += 1;

    // Start platform, then fill the view so later spawns land off screen
    generate_next(state);
    while needs_spawn(state) {
        generate_next(state);
    }

    state.push_event(GameEvent::Reset);
    log::debug!("Run {} ready", state.runs);
}

/// Pause or resume. Only a running game can pause; the countdown cannot be paused.
pub fn toggle_pause(state: &mut GameState) {
    match state.phase {
        GamePhase::Playing => {
            state.phase = GamePhase::Paused;
            state.push_event(GameEvent::Paused);
        }
        GamePhase::Paused => {
            state.phase = GamePhase::Playing;
            state.push_event(GameEvent::Resumed);
        }
        phase => log::debug!("Pause ignored in {:?}", phase),
    }
}

/// Host visibility changed; hiding a running game pauses it
pub fn set_visibility(state: &mut GameState, visible: bool) {
    if !visible && state.phase == GamePhase::Playing {
        log::info!("Auto-paused (hidden)");
        toggle_pause(state);
    }
}

/// Change difficulty. Rejected mid-run and mid-countdown; returns whether it applied.
pub fn set_difficulty(state: &mut GameState, difficulty: Difficulty) -> bool {
    match state.phase {
        GamePhase::Menu | GamePhase::Paused | GamePhase::Won => {
            state.difficulty = difficulty;
            log::info!("Difficulty set to {}", difficulty.as_str());
            true
        }
        GamePhase::Playing | GamePhase::Countdown => {
            log::debug!("Difficulty change rejected in {:?}", state.phase);
            false
        }
    }
}

pub fn set_color_set(state: &mut GameState, colors: ColorSet) {
    state.color_set = colors;
}

pub fn set_pointer_down(state: &mut GameState, down: bool) {
    state.pointer_down = down;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::Wallet;
    use crate::platform::Viewport;
    use crate::sim::generator::{min_gap, push_flappy_pair};
    use crate::sim::state::{Obstacle, ObstacleKind, Spike};
    use glam::Vec2;
    use proptest::prelude::*;

    fn new_state(seed: u64) -> GameState {
        GameState::new(seed, Viewport::default(), Difficulty::Normal, Wallet::default())
    }

    fn playing(seed: u64) -> GameState {
        let mut state = new_state(seed);
        start_game(&mut state);
        state
    }

    fn wide_platform(state: &mut GameState, y: f32) -> Obstacle {
        Obstacle {
            id: state.next_entity_id(),
            kind: ObstacleKind::Platform,
            x: 0.0,
            y,
            width: 10_000.0,
            height: PLATFORM_THICKNESS,
            spikes: Vec::new(),
            scored: false,
        }
    }

    /// Track that keeps the player on a long, safe floor
    fn safe_track(state: &mut GameState) {
        let floor = wide_platform(state, START_PLATFORM_Y);
        state.obstacles = vec![floor];
        state.player.pos.y = START_PLATFORM_Y - PLAYER_SIZE;
        state.player.prev_y = state.player.pos.y;
        state.player.velocity = 0.0;
    }

    #[test]
    fn test_menu_to_playing() {
        let mut state = new_state(1);
        update(&mut state);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.time_ticks, 0);

        tick(&mut state, &TickInput { jump: true, ..Default::default() });
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.obstacles[0].x, START_PLATFORM_X - state.game_speed);
        assert!(state.obstacles.len() >= 2);
        assert!(state.events().contains(&GameEvent::Started));
    }

    #[test]
    fn test_base_speed_at_score_zero() {
        let mut state = playing(2);
        update(&mut state);
        assert_eq!(state.game_speed, Difficulty::Normal.profile().base_speed);
        assert_eq!(state.platform_distance, spawn_distance(state.game_speed));
    }

    #[test]
    fn test_speed_is_capped() {
        let profile = Difficulty::Insane.profile();
        assert_eq!(scroll_speed(10_000, &profile), MAX_GAME_SPEED);
        assert!((scroll_speed(10, &profile) - (profile.base_speed + 1.0)).abs() < 1e-5);
    }

    #[test]
    fn test_player_lands_on_start_platform() {
        let mut state = playing(3);
        for _ in 0..60 {
            update(&mut state);
        }
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.velocity, 0.0);
        assert_eq!(state.player.bottom(), START_PLATFORM_Y);
        assert!(!state.player.jumping);
        assert!(state.drain_events().contains(&GameEvent::Landed));
    }

    #[test]
    fn test_jump_only_from_ground() {
        let mut state = playing(4);
        // Mid-air at start: no jump
        handle_jump(&mut state);
        assert_eq!(state.player.velocity, 0.0);

        for _ in 0..60 {
            update(&mut state);
        }
        handle_jump(&mut state);
        assert_eq!(state.player.velocity, JUMP_FORCE);
        assert!(state.player.jumping);
    }

    #[test]
    fn test_held_pointer_rejumps_on_landing() {
        let mut state = playing(5);
        safe_track(&mut state);
        set_pointer_down(&mut state, true);
        update(&mut state);
        assert!(state.player.velocity < 0.0);
        let jumps = |s: &mut GameState| {
            s.drain_events()
                .into_iter()
                .filter(|e| *e == GameEvent::Jumped)
                .count()
        };
        assert_eq!(jumps(&mut state), 1);

        // Full arc is 40 ticks; the held pointer jumps again on touchdown
        for _ in 0..45 {
            update(&mut state);
        }
        assert_eq!(jumps(&mut state), 1);
    }

    fn platform_at(state: &mut GameState, x: f32, width: f32) -> Obstacle {
        Obstacle {
            x,
            width,
            ..wide_platform(state, START_PLATFORM_Y)
        }
    }

    #[test]
    fn test_walking_into_min_gap_falls() {
        let mut state = playing(23);
        safe_track(&mut state);
        let gap = min_gap(state.profile().base_speed);
        let near = platform_at(&mut state, 0.0, 120.0);
        let far = platform_at(&mut state, 120.0 + gap, 2_000.0);
        state.obstacles = vec![near, far];

        for _ in 0..120 {
            update(&mut state);
            if state.phase != GamePhase::Playing {
                break;
            }
        }
        assert_eq!(state.phase, GamePhase::Countdown);
        assert!(state.events().contains(&GameEvent::Died(DeathCause::Lava)));
    }

    #[test]
    fn test_player_sized_gap_is_walkable() {
        let mut state = playing(24);
        safe_track(&mut state);
        let near = platform_at(&mut state, 0.0, 120.0);
        let far = platform_at(&mut state, 120.0 + PLAYER_SIZE, 2_000.0);
        state.obstacles = vec![near, far];

        for _ in 0..60 {
            update(&mut state);
        }
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.bottom(), START_PLATFORM_Y);
    }

    #[test]
    fn test_lava_contact_starts_countdown() {
        let mut state = playing(6);
        state.obstacles.clear();
        state.player.pos.y = state.viewport.lava_y - PLAYER_SIZE - 0.1;
        update(&mut state);
        assert_eq!(state.phase, GamePhase::Countdown);
        assert_eq!(state.player.bottom(), state.viewport.lava_y);
        assert!(state.events().contains(&GameEvent::Died(DeathCause::Lava)));
    }

    #[test]
    fn test_spike_kills() {
        let mut state = playing(7);
        safe_track(&mut state);
        // Spike apex right under the player's center after one scroll step
        let speed = state.profile().base_speed;
        state.obstacles[0].spikes.push(Spike {
            relative_x: PLAYER_X + speed,
            width: 30.0,
            height: 20.0,
        });
        update(&mut state);
        assert_eq!(state.phase, GamePhase::Countdown);
        assert!(state.events().contains(&GameEvent::Died(DeathCause::Spike)));
    }

    #[test]
    fn test_pillar_face_kills() {
        let mut state = playing(8);
        safe_track(&mut state);
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id,
            kind: ObstacleKind::Pillar { texture: None },
            x: PLAYER_X + PLAYER_SIZE + 1.0,
            y: 150.0,
            width: 80.0,
            height: state.viewport.lava_y - 150.0,
            spikes: Vec::new(),
            scored: false,
        });
        update(&mut state);
        assert_eq!(state.phase, GamePhase::Countdown);
        assert!(state.events().contains(&GameEvent::Died(DeathCause::PillarSide)));
    }

    #[test]
    fn test_obstacle_removed_and_scored_at_zero_edge() {
        let mut state = playing(9);
        safe_track(&mut state);
        let speed = state.profile().base_speed;
        let id = state.next_entity_id();
        // Right edge lands exactly on x = 0 this tick
        state.obstacles.insert(
            0,
            Obstacle {
                id,
                kind: ObstacleKind::Platform,
                x: speed - 50.0,
                y: 200.0,
                width: 50.0,
                height: PLATFORM_THICKNESS,
                spikes: Vec::new(),
                scored: false,
            },
        );
        update(&mut state);
        assert_eq!(state.score, 1);
        assert!(state.obstacles.iter().all(|o| o.id != id));
        assert!(state.events().contains(&GameEvent::Scored(1)));
    }

    #[test]
    fn test_coins_paid_at_interval() {
        let mut state = playing(10);
        safe_track(&mut state);
        state.score = COIN_SCORE_INTERVAL - 1;
        let id = state.next_entity_id();
        state.obstacles.insert(
            0,
            Obstacle {
                id,
                kind: ObstacleKind::Platform,
                x: -60.0,
                y: 200.0,
                width: 50.0,
                height: PLATFORM_THICKNESS,
                spikes: Vec::new(),
                scored: false,
            },
        );
        update(&mut state);
        assert_eq!(state.score, COIN_SCORE_INTERVAL);
        assert_eq!(state.wallet.coins, Difficulty::Normal.profile().coin_reward);
    }

    #[test]
    fn test_marker_switches_to_flappy() {
        let mut state = playing(11);
        safe_track(&mut state);
        state.score = FLAPPY_SCORE_THRESHOLD;

        update(&mut state);
        let marker = state.marker.expect("marker spawned");
        assert_eq!(marker.x, state.viewport.width);
        assert_eq!(state.mode, GameMode::Normal);

        // Walk the marker right up to the player
        state.marker = Some(TransitionMarker {
            x: state.player.pos.x + 1.0,
        });
        update(&mut state);
        assert_eq!(state.mode, GameMode::Flappy);
        assert!(state.marker.is_none());
        assert_eq!(state.obstacles.len(), 2 * FLAPPY_SEED_PAIRS);
        assert!(state.obstacles.iter().all(|o| o.is_flappy()));
        assert!(state.events().contains(&GameEvent::ModeChanged(GameMode::Flappy)));
    }

    #[test]
    fn test_flappy_mode_flaps_in_mid_air() {
        let mut state = playing(12);
        state.mode = GameMode::Flappy;
        state.obstacles.clear();
        state.player.velocity = 5.0;
        handle_jump(&mut state);
        assert_eq!(state.player.velocity, FLAP_FORCE);
    }

    #[test]
    fn test_flappy_ceiling_holds_player_on_screen() {
        let mut state = playing(25);
        state.mode = GameMode::Flappy;
        state.obstacles.clear();
        state.player.pos.y = 5.0;
        for _ in 0..30 {
            handle_jump(&mut state);
            update(&mut state);
            assert!(state.player.pos.y >= 0.0);
            assert_eq!(state.phase, GamePhase::Playing);
        }
        assert_eq!(state.player.pos.y, 0.0);
        assert_eq!(state.player.velocity, 0.0);
    }

    #[test]
    fn test_flappy_ceiling_cannot_skip_a_pair() {
        let mut state = playing(26);
        state.mode = GameMode::Flappy;
        state.obstacles.clear();
        let speed = state.profile().base_speed;
        push_flappy_pair(&mut state, PLAYER_X + speed);
        state.player.pos.y = -50.0;
        state.player.velocity = FLAP_FORCE;

        update(&mut state);
        assert_eq!(state.player.pos.y, 0.0);
        assert_eq!(state.phase, GamePhase::Countdown);
        assert!(state.events().contains(&GameEvent::Died(DeathCause::FlappyPillar)));
    }

    #[test]
    fn test_new_obstacles_spawn_off_screen() {
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        for seed in 0..20 {
            let mut state = playing(seed);
            for _ in 0..3_000 {
                let known: Vec<u32> = state.obstacles.iter().map(|o| o.id).collect();
                let (runs, mode) = (state.runs, state.mode);
                tick(&mut state, &input);
                // Resets and the mode switch lay out a fresh track on purpose
                if state.runs != runs || state.mode != mode {
                    continue;
                }
                for ob in state.obstacles.iter().filter(|o| !known.contains(&o.id)) {
                    assert!(
                        ob.x >= state.viewport.width,
                        "seed {seed}: {:?} spawned at x={}",
                        ob.kind,
                        ob.x
                    );
                }
            }
        }
    }

    #[test]
    fn test_reset_leaves_no_spawn_pending() {
        let state = playing(27);
        assert!(state.obstacles.len() >= 2);
        assert!(!needs_spawn(&state));
    }

    #[test]
    fn test_win_rewards_once() {
        let mut state = playing(13);
        safe_track(&mut state);
        state.score = WIN_SCORE;
        let profile = state.profile();

        update(&mut state);
        assert_eq!(state.phase, GamePhase::Won);
        assert_eq!(state.wallet.coins, profile.win_bonus);
        assert_eq!(state.wallet.wins, 1);

        for _ in 0..10 {
            update(&mut state);
        }
        assert_eq!(state.wallet.coins, profile.win_bonus);
        assert_eq!(state.wallet.wins, 1);
        assert_eq!(
            state.drain_events().iter().filter(|e| **e == GameEvent::Won).count(),
            1
        );
    }

    #[test]
    fn test_replay_ignored_during_win_grace() {
        let mut state = playing(14);
        safe_track(&mut state);
        state.score = WIN_SCORE;
        update(&mut state);
        let runs = state.runs;

        handle_jump(&mut state);
        assert_eq!(state.phase, GamePhase::Won);

        for _ in 0..WIN_GRACE_TICKS {
            update(&mut state);
        }
        handle_jump(&mut state);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.runs, runs + 1);
    }

    #[test]
    fn test_restarted_countdown_resets_once() {
        let mut state = playing(15);
        let runs = state.runs;
        start_countdown(&mut state);
        for _ in 0..TICKS_PER_SECOND {
            update(&mut state);
        }
        start_countdown(&mut state);
        for _ in 0..COUNTDOWN_TICKS - 1 {
            update(&mut state);
            assert_eq!(state.phase, GamePhase::Countdown);
        }
        assert_eq!(state.runs, runs);

        update(&mut state);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.runs, runs + 1);
        assert_eq!(
            state.events().iter().filter(|e| **e == GameEvent::Reset).count(),
            2
        );
    }

    #[test]
    fn test_countdown_blocks_pause_and_jump() {
        let mut state = playing(16);
        start_countdown(&mut state);
        toggle_pause(&mut state);
        assert_eq!(state.phase, GamePhase::Countdown);
        handle_jump(&mut state);
        assert_eq!(state.phase, GamePhase::Countdown);
        assert!(!set_difficulty(&mut state, Difficulty::Hard));
    }

    #[test]
    fn test_tick_pause() {
        let mut state = playing(17);
        let input = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.phase, GamePhase::Paused);
        let frozen = state.time_ticks;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.time_ticks, frozen);

        // Difficulty can change while paused
        assert!(set_difficulty(&mut state, Difficulty::Easy));

        tick(&mut state, &input);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.time_ticks, frozen + 1);
        assert_eq!(state.game_speed, Difficulty::Easy.profile().base_speed);
    }

    #[test]
    fn test_hidden_game_pauses() {
        let mut state = playing(18);
        set_visibility(&mut state, false);
        assert_eq!(state.phase, GamePhase::Paused);
        // Becoming visible again does not resume on its own
        set_visibility(&mut state, true);
        assert_eq!(state.phase, GamePhase::Paused);
    }

    #[test]
    fn test_difficulty_rejected_mid_run() {
        let mut state = playing(19);
        assert!(!set_difficulty(&mut state, Difficulty::Insane));
        assert_eq!(state.difficulty, Difficulty::Normal);
    }

    #[test]
    fn test_color_set_any_time() {
        let mut state = playing(20);
        start_countdown(&mut state);
        set_color_set(&mut state, ColorSet::Gold);
        assert_eq!(state.color_set, ColorSet::Gold);
    }

    #[test]
    fn test_autopilot_starts_from_menu() {
        let mut state = new_state(21);
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_determinism() {
        let mut a = playing(99_999);
        let mut b = playing(99_999);
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        for _ in 0..2_000 {
            tick(&mut a, &input);
            tick(&mut b, &input);
        }
        assert_eq!(a.score, b.score);
        assert_eq!(a.runs, b.runs);
        assert_eq!(a.player.pos, b.player.pos);
        assert_eq!(a.obstacles.len(), b.obstacles.len());
    }

    proptest! {
        #[test]
        fn prop_fall_speed_never_exceeds_max(
            seed in any::<u64>(),
            presses in proptest::collection::vec(any::<bool>(), 1..400),
        ) {
            let mut state = playing(seed);
            for jump in presses {
                tick(&mut state, &TickInput { jump, ..Default::default() });
                prop_assert!(state.player.velocity <= MAX_FALL_SPEED);
            }
        }

        #[test]
        fn prop_obstacles_scroll_by_speed(
            seed in any::<u64>(),
            ticks in 1usize..300,
        ) {
            let mut state = playing(seed);
            let input = TickInput { autopilot: true, ..Default::default() };
            for _ in 0..ticks {
                let before: Vec<(u32, f32)> =
                    state.obstacles.iter().map(|o| (o.id, o.x)).collect();
                let (phase, mode) = (state.phase, state.mode);
                tick(&mut state, &input);
                if phase != GamePhase::Playing
                    || state.phase != GamePhase::Playing
                    || state.mode != mode
                {
                    continue;
                }
                for (id, x) in before {
                    if let Some(ob) = state.obstacles.iter().find(|o| o.id == id) {
                        prop_assert_eq!(ob.x, x - state.game_speed);
                    }
                }
            }
        }
    }

    #[test]
    fn test_player_x_is_fixed() {
        let mut state = playing(22);
        for _ in 0..200 {
            tick(&mut state, &TickInput { autopilot: true, ..Default::default() });
            assert_eq!(state.player.pos.x, PLAYER_X);
        }
        assert_eq!(state.player.size, Vec2::splat(PLAYER_SIZE));
    }
}
