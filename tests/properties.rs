use proptest::prelude::*;
use rock_drift::sim::{GamePhase, GameState, TickInput, tick, wrap};

fn arb_input() -> impl Strategy<Value = TickInput> {
    (any::<bool>(), any::<bool>(), any::<bool>(), prop::bool::weighted(0.3)).prop_map(
        |(rotate_left, rotate_right, thrust, fire)| TickInput {
            rotate_left,
            rotate_right,
            thrust,
            fire,
            ..Default::default()
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn run_invariants_hold(seed in any::<u64>(), inputs in prop::collection::vec(arb_input(), 1..400)) {
        let mut state = GameState::new(seed);

        for input in &inputs {
            let (score, lives, level) = (state.score, state.lives, state.level);
            tick(&mut state, input);

            prop_assert!(state.score >= score);
            prop_assert!(state.lives <= lives);
            prop_assert!(state.lives + 1 >= lives, "at most one life per tick");
            prop_assert_eq!(state.phase == GamePhase::GameOver, state.lives == 0);
            prop_assert!(state.level == level || state.level == level + 1);
            if state.level == level + 1 {
                prop_assert_eq!(state.asteroids.len() as u32, 3 + state.level);
            }

            prop_assert!(!state.asteroids.is_empty());
            for rock in &state.asteroids {
                prop_assert_eq!(rock.radius, state.tuning.radius_for(rock.size));
                prop_assert!(rock.pos.x >= 0.0 && rock.pos.x < state.tuning.width);
                prop_assert!(rock.pos.y >= 0.0 && rock.pos.y < state.tuning.height);
            }
            for bullet in &state.bullets {
                prop_assert!(bullet.life > 0);
            }
            prop_assert!(state.ship.vel.length() <= state.tuning.ship_max_speed + 1e-3);
            prop_assert!(state.ship.pos.x >= 0.0 && state.ship.pos.x <= state.tuning.width);
            prop_assert!(state.ship.pos.y >= 0.0 && state.ship.pos.y <= state.tuning.height);
        }
    }

    #[test]
    fn wrap_stays_in_range(value in -1.0e6f32..1.0e6, min in -500.0f32..500.0, span in 1.0f32..2000.0) {
        let max = min + span;
        let w = wrap(value, min, max);
        prop_assert!(w >= min && w < max, "wrap({value}, {min}, {max}) = {w}");
    }
}
