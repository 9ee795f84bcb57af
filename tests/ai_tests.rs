use broadside::{
    hard_move, heatmap, place_specific, resolve_shot, Cell, Difficulty, Fleet, Grid, Orientation,
    Outcome, ShipId, Targeting, ROSTER,
};
use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn fire(targeting: &mut Targeting, grid: &mut Grid, fleet: &mut Fleet, rng: &mut SmallRng) -> ((usize, usize), Outcome) {
    let (r, c) = targeting.choose_move(grid, fleet, rng).unwrap();
    let outcome = resolve_shot(grid, fleet, r, c).unwrap();
    targeting.update_memory(grid, (r, c), outcome);
    ((r, c), outcome)
}

#[test]
fn test_difficulty_parse() {
    assert_eq!("easy".parse::<Difficulty>(), Ok(Difficulty::Easy));
    assert_eq!("M".parse::<Difficulty>(), Ok(Difficulty::Medium));
    assert_eq!("hard".parse::<Difficulty>(), Ok(Difficulty::Hard));
    assert!("brutal".parse::<Difficulty>().is_err());
    assert_eq!(Difficulty::default(), Difficulty::Easy);
    assert_eq!(Difficulty::Hard.to_string(), "hard");
}

#[test]
fn test_exhausted_board_has_no_move() {
    let mut rng = SmallRng::seed_from_u64(9);
    let mut grid = Grid::new(7);
    let mut fleet = Fleet::new();
    for (r, c) in grid.coords().collect::<Vec<_>>() {
        resolve_shot(&mut grid, &mut fleet, r, c).unwrap();
    }
    for d in Difficulty::ALL {
        let mut targeting = Targeting::new(d);
        assert_eq!(targeting.choose_move(&grid, &fleet, &mut rng), None, "{}", d);
    }
}

#[test]
fn test_every_tier_only_picks_open_cells() {
    let mut rng = SmallRng::seed_from_u64(11);
    for d in Difficulty::ALL {
        let mut grid = Grid::new(7);
        let mut fleet = Fleet::new();
        place_specific(&mut grid, &mut fleet, ShipId(2), ROSTER[2], 3, 2, Orientation::Horizontal)
            .unwrap();
        let mut targeting = Targeting::new(d);
        for _ in 0..49 {
            let Some((r, c)) = targeting.choose_move(&grid, &fleet, &mut rng) else {
                break;
            };
            assert!(grid.is_targetable(r, c), "{} picked {:?}", d, (r, c));
            let outcome = resolve_shot(&mut grid, &mut fleet, r, c).unwrap();
            targeting.update_memory(&grid, (r, c), outcome);
        }
        assert_eq!(grid.targetable().count(), 0);
    }
}

#[test]
fn test_medium_queues_neighbours_after_hit() {
    let mut rng = SmallRng::seed_from_u64(5);
    let mut grid = Grid::new(10);
    let mut fleet = Fleet::new();
    place_specific(&mut grid, &mut fleet, ShipId(1), ROSTER[1], 4, 3, Orientation::Horizontal)
        .unwrap();
    let mut targeting = Targeting::new(Difficulty::Medium);

    let outcome = resolve_shot(&mut grid, &mut fleet, 4, 4).unwrap();
    targeting.update_memory(&grid, (4, 4), outcome);
    let Targeting::Medium(memory) = &targeting else {
        panic!("expected medium state");
    };
    assert!(!memory.is_hunting());
    assert_eq!(memory.history(), &[(4, 4)]);
    let queued: Vec<_> = memory.queue().copied().collect();
    assert_eq!(queued, vec![(3, 4), (5, 4), (4, 3), (4, 5)]);

    let next = targeting.choose_move(&grid, &fleet, &mut rng).unwrap();
    assert_eq!(next, (3, 4));
}

#[test]
fn test_medium_follows_line() {
    let mut grid = Grid::new(10);
    let mut fleet = Fleet::new();
    place_specific(&mut grid, &mut fleet, ShipId(1), ROSTER[1], 4, 3, Orientation::Horizontal)
        .unwrap();
    let mut targeting = Targeting::new(Difficulty::Medium);
    for coord in [(4, 4), (4, 5)] {
        let outcome = resolve_shot(&mut grid, &mut fleet, coord.0, coord.1).unwrap();
        targeting.update_memory(&grid, coord, outcome);
    }
    let Targeting::Medium(memory) = &targeting else {
        panic!("expected medium state");
    };
    let queued: Vec<_> = memory.queue().copied().take(2).collect();
    assert_eq!(queued, vec![(4, 3), (4, 6)]);
}

#[test]
fn test_medium_forgets_after_sink() {
    let mut rng = SmallRng::seed_from_u64(21);
    let mut grid = Grid::new(10);
    let mut fleet = Fleet::new();
    place_specific(&mut grid, &mut fleet, ShipId(4), ROSTER[4], 6, 6, Orientation::Vertical)
        .unwrap();
    let mut targeting = Targeting::new(Difficulty::Medium);

    let outcome = resolve_shot(&mut grid, &mut fleet, 6, 6).unwrap();
    targeting.update_memory(&grid, (6, 6), outcome);
    // Chase the queue until the destroyer goes down.
    loop {
        let (_, outcome) = fire(&mut targeting, &mut grid, &mut fleet, &mut rng);
        if outcome.sunk().is_some() {
            break;
        }
    }
    let Targeting::Medium(memory) = &targeting else {
        panic!("expected medium state");
    };
    assert!(memory.is_hunting());
    assert!(memory.history().is_empty());
}

#[test]
fn test_medium_hunts_on_parity() {
    let mut rng = SmallRng::seed_from_u64(2);
    let grid = Grid::new(10);
    let fleet = Fleet::new();
    let mut targeting = Targeting::new(Difficulty::Medium);
    for _ in 0..50 {
        let (r, c) = targeting.choose_move(&grid, &fleet, &mut rng).unwrap();
        assert_eq!((r + c) % 2, 0);
    }
}

#[test]
fn test_heatmap_empty_board() {
    let grid = Grid::new(10);
    let heat = heatmap(&grid, &[2]);
    assert_eq!(heat.get(0, 0), 2);
    assert_eq!(heat.get(5, 5), 4);
    assert_eq!(heat.max(), 4);
}

#[test]
fn test_heatmap_respects_misses() {
    let mut grid = Grid::new(7);
    let mut fleet = Fleet::new();
    resolve_shot(&mut grid, &mut fleet, 0, 1).unwrap();
    let heat = heatmap(&grid, &[2]);
    // Only the vertical placement is left at the corner.
    assert_eq!(heat.get(0, 0), 1);
    assert_eq!(heat.get(0, 1), 0);
}

#[test]
fn test_hard_takes_hottest_cell() {
    let mut rng = SmallRng::seed_from_u64(1);
    let grid = Grid::new(7);
    let lengths: Vec<usize> = ROSTER.iter().map(|d| d.length()).collect();
    let heat = heatmap(&grid, &lengths);
    let (r, c) = hard_move(&grid, &lengths, &mut rng).unwrap();
    assert_eq!(heat.get(r, c), heat.max());
    // Ties resolve to the first cell in row-major order.
    let first = grid.coords().find(|&(rr, cc)| heat.get(rr, cc) == heat.max()).unwrap();
    assert_eq!((r, c), first);
}

#[test]
fn test_hard_two_wounded_ships_fall_back() {
    let mut rng = SmallRng::seed_from_u64(4);
    let mut grid = Grid::new(10);
    let mut fleet = Fleet::new();
    place_specific(&mut grid, &mut fleet, ShipId(2), ROSTER[2], 0, 0, Orientation::Horizontal)
        .unwrap();
    place_specific(&mut grid, &mut fleet, ShipId(3), ROSTER[3], 7, 7, Orientation::Vertical)
        .unwrap();
    resolve_shot(&mut grid, &mut fleet, 0, 0).unwrap();
    resolve_shot(&mut grid, &mut fleet, 8, 7).unwrap();

    let heat = heatmap(&grid, &fleet.remaining_lengths());
    assert_eq!(heat.max(), 0);
    let (r, c) = hard_move(&grid, &fleet.remaining_lengths(), &mut rng).unwrap();
    assert!(grid.is_targetable(r, c));
}

#[test]
fn test_medium_forgets_second_wounded_ship() {
    // Sinking one ship clears all leads, including open hits on a neighbour.
    let mut grid = Grid::new(10);
    let mut fleet = Fleet::new();
    place_specific(&mut grid, &mut fleet, ShipId(4), ROSTER[4], 0, 0, Orientation::Horizontal)
        .unwrap();
    place_specific(&mut grid, &mut fleet, ShipId(2), ROSTER[2], 1, 0, Orientation::Horizontal)
        .unwrap();
    let mut targeting = Targeting::new(Difficulty::Medium);
    for coord in [(1, 0), (0, 0), (0, 1)] {
        let outcome = resolve_shot(&mut grid, &mut fleet, coord.0, coord.1).unwrap();
        targeting.update_memory(&grid, coord, outcome);
    }

    assert!(fleet.get(ShipId(4)).unwrap().is_sunk());
    assert_eq!(grid.get(1, 0), Some(Cell::Hit));
    let Targeting::Medium(memory) = &targeting else {
        panic!("expected medium state");
    };
    assert!(memory.is_hunting());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn medium_stays_on_wounded_ship(
        seed in any::<u64>(),
        kind in 0usize..5,
        row in 0usize..10,
        col in 0usize..10,
        horizontal in any::<bool>(),
    ) {
        let orientation = if horizontal { Orientation::Horizontal } else { Orientation::Vertical };
        let mut grid = Grid::new(10);
        let mut fleet = Fleet::new();
        prop_assume!(
            place_specific(&mut grid, &mut fleet, ShipId(kind), ROSTER[kind], row, col, orientation).is_ok()
        );
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut targeting = Targeting::new(Difficulty::Medium);

        for _ in 0..100 {
            let open_hits: Vec<_> = grid.find(Cell::Hit).collect();
            let Some((r, c)) = targeting.choose_move(&grid, &fleet, &mut rng) else {
                break;
            };
            if !open_hits.is_empty() {
                prop_assert!(
                    open_hits.iter().any(|&(hr, hc)| hr == r || hc == c),
                    "{:?} strays from hits {:?}",
                    (r, c),
                    open_hits
                );
            }
            let outcome = resolve_shot(&mut grid, &mut fleet, r, c).unwrap();
            targeting.update_memory(&grid, (r, c), outcome);
            if outcome.sunk().is_some() {
                break;
            }
        }
        prop_assert!(fleet.all_sunk());
    }

    #[test]
    fn hard_shoots_next_to_single_hit(
        seed in any::<u64>(),
        row in 0usize..10,
        col in 0usize..10,
        horizontal in any::<bool>(),
    ) {
        let orientation = if horizontal { Orientation::Horizontal } else { Orientation::Vertical };
        let mut grid = Grid::new(10);
        let mut fleet = Fleet::new();
        prop_assume!(
            place_specific(&mut grid, &mut fleet, ShipId(4), ROSTER[4], row, col, orientation).is_ok()
        );
        let outcome = resolve_shot(&mut grid, &mut fleet, row, col).unwrap();
        prop_assert_eq!(outcome, Outcome::Hit { sunk: None });

        let open_neighbours: Vec<_> = grid
            .neighbors(row, col)
            .into_iter()
            .filter(|&(r, c)| grid.is_targetable(r, c))
            .collect();
        prop_assume!(!open_neighbours.is_empty());

        // Whole roster still afloat.
        let lengths: Vec<usize> = ROSTER.iter().map(|d| d.length()).collect();
        let mut rng = SmallRng::seed_from_u64(seed);
        let choice = hard_move(&grid, &lengths, &mut rng).unwrap();
        prop_assert!(open_neighbours.contains(&choice), "{:?} not next to {:?}", choice, (row, col));
        prop_assert_eq!(grid.get(row, col), Some(Cell::Hit));
    }
}
