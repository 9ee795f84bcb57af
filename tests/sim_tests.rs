use broadside::{simulate, simulate_game, Difficulty, GameConfig, TOTAL_SHIP_CELLS};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[test]
fn test_every_tier_finishes() {
    for size in [7, 10] {
        let config = GameConfig::new(size).unwrap();
        for d in Difficulty::ALL {
            let mut rng = SmallRng::seed_from_u64(100 + size as u64);
            let shots = simulate_game(d, &config, &mut rng);
            assert!(shots >= TOTAL_SHIP_CELLS, "{} took {}", d, shots);
            assert!(shots <= size * size, "{} took {}", d, shots);
        }
    }
}

#[test]
fn test_report_is_consistent() {
    let config = GameConfig::default();
    let mut rng = SmallRng::seed_from_u64(1);
    let report = simulate(Difficulty::Medium, &config, 12, &mut rng);
    assert_eq!(report.games, 12);
    assert_eq!(report.shots.len(), 12);
    assert_eq!(report.board_size, 10);
    assert_eq!(report.min_shots, *report.shots.iter().min().unwrap());
    assert_eq!(report.max_shots, *report.shots.iter().max().unwrap());
    let mean = report.shots.iter().sum::<usize>() as f64 / 12.0;
    assert!((report.mean_shots - mean).abs() < 1e-9);
    assert!(report.min_shots as f64 <= report.mean_shots);
    assert!(report.mean_shots <= report.max_shots as f64);
}

#[test]
fn test_same_seed_same_games() {
    let config = GameConfig::default();
    let a = simulate(Difficulty::Hard, &config, 3, &mut SmallRng::seed_from_u64(5));
    let b = simulate(Difficulty::Hard, &config, 3, &mut SmallRng::seed_from_u64(5));
    assert_eq!(a, b);
}

#[test]
fn test_zero_games() {
    let report = simulate(
        Difficulty::Easy,
        &GameConfig::default(),
        0,
        &mut SmallRng::seed_from_u64(0),
    );
    assert_eq!(report.mean_shots, 0.0);
    assert!(report.shots.is_empty());
}
