//! Behavioural properties of the learning opponent

use numguess::{
    LearningOpponent, OpponentConfig, QTable,
    game::{Difficulty, GameSession},
};

fn opponent(min: i64, max: i64, epsilon: f64, seed: u64) -> LearningOpponent {
    let config = OpponentConfig::new(min, max).with_exploration_rate(epsilon);
    LearningOpponent::with_table(config, QTable::new(250))
        .expect("valid config")
        .with_seed(seed)
}

#[test]
fn test_exploitation_is_floor_midpoint_everywhere() {
    let mut agent = opponent(1, 200, 0.0, 1);
    for low in 1..=200 {
        for high in (low..=200).step_by(7) {
            assert_eq!(
                agent.choose_action(low, high).unwrap(),
                (low + high) / 2,
                "interval [{low}, {high}]"
            );
        }
    }
}

#[test]
fn test_exploration_stays_within_bounds() {
    let mut agent = opponent(1, 200, 1.0, 2);
    for (low, high) in [(1, 200), (1, 1), (37, 38), (150, 199)] {
        for _ in 0..1_000 {
            let guess = agent.choose_action(low, high).unwrap();
            assert!(
                (low..=high).contains(&guess),
                "{guess} outside [{low}, {high}]"
            );
        }
    }
}

#[test]
fn test_exploration_covers_interval() {
    let mut agent = opponent(1, 100, 1.0, 3);
    let mut seen = [false; 10];
    for _ in 0..2_000 {
        let guess = agent.choose_action(11, 20).unwrap();
        seen[(guess - 11) as usize] = true;
    }
    assert!(seen.iter().all(|hit| *hit));
}

#[test]
fn test_decay_sequence_is_geometric() {
    let config = OpponentConfig::new(1, 100)
        .with_exploration_rate(0.8)
        .with_exploration_decay(0.9);
    let mut agent = LearningOpponent::with_table(config, QTable::new(250)).unwrap();

    let mut previous = agent.exploration_rate();
    for n in 1..=200 {
        agent.decay();
        let current = agent.exploration_rate();
        assert!(current <= previous);
        assert!(current >= 0.0);
        assert!((current - 0.8 * 0.9f64.powi(n)).abs() < 1e-12);
        previous = current;
    }
}

#[test]
fn test_update_on_zero_table_scales_reward() {
    for (state, action, reward) in [(1, 1, 100.0), (10, 30, -1.0), (200, 5, 7.5)] {
        let mut agent = opponent(1, 200, 0.0, 4);
        agent.update(state, action, reward, state);
        let expected = reward * 0.1;
        assert!((agent.value(state, action) - expected).abs() < 1e-12);
        assert_eq!(agent.q_table().visited(), 1);
    }
}

#[test]
fn test_update_bootstraps_from_next_row() {
    let mut agent = opponent(1, 100, 0.0, 5);
    // Seed row of state 20 with a positive value
    agent.update(20, 20, 100.0, 20);
    assert!((agent.value(20, 20) - 10.0).abs() < 1e-12);

    // Q(10,10) = 0 + 0.1 * (-1 + 0.9 * 10 - 0) = 0.8
    agent.update(10, 10, -1.0, 20);
    assert!((agent.value(10, 10) - 0.8).abs() < 1e-12);
}

#[test]
fn test_next_state_beyond_capacity_uses_last_row() {
    let config = OpponentConfig::new(1, 1_000).with_exploration_rate(0.0);
    let mut table = QTable::new(250);
    table.set(249, 3, 50.0);
    let mut agent = LearningOpponent::with_table(config, table).unwrap();

    agent.update(5, 5, 0.0, 900);

    // target = 0 + 0.9 * 50, Q(5,5) = 0.1 * 45
    assert!((agent.value(5, 5) - 4.5).abs() < 1e-12);
}

#[test]
fn test_state_and_action_beyond_capacity_are_clamped() {
    let config = OpponentConfig::new(1, 1_000).with_exploration_rate(0.0);
    let mut agent = LearningOpponent::with_table(config, QTable::new(250)).unwrap();
    agent.update(800, 900, 10.0, 800);
    assert!((agent.q_table().get(249, 249) - 1.0).abs() < 1e-12);
}

#[test]
fn test_end_to_end_scenario() {
    let mut agent = opponent(1, 100, 0.0, 6);

    assert_eq!(agent.choose_action(1, 100).unwrap(), 50);
    agent.update(50, 50, -1.0, 50);
    assert!((agent.q_table().get(49, 49) - (-0.1)).abs() < 1e-12);
    assert_eq!(agent.choose_action(51, 100).unwrap(), 75);
}

#[test]
fn test_versus_round_uses_degenerate_update() {
    let mut agent = opponent(1, 100, 0.0, 7);
    let mut session = GameSession::with_secret(Difficulty::Medium, 90, true).unwrap();

    let first = session.opponent_turn(&mut agent).unwrap();
    let second = session.opponent_turn(&mut agent).unwrap();
    assert_eq!((first.guess, second.guess), (50, 75));

    // Only the diagonal entries of the guessed values were touched
    assert_eq!(agent.q_table().visited(), 2);
    assert!((agent.value(50, 50) + 0.1).abs() < 1e-12);
    assert!((agent.value(75, 75) + 0.1).abs() < 1e-12);
    assert!((agent.exploration_rate() - 0.0).abs() < 1e-12);
}

#[test]
fn test_empty_interval_never_yields_a_guess() {
    let mut agent = opponent(1, 100, 1.0, 8);
    assert!(agent.choose_action(60, 59).is_err());
}
