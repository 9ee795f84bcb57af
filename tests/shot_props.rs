use broadside::{fleet_defeated, place_random, resolve_shot, Cell, ShotError};
use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn rank(cell: Cell) -> u8 {
    match cell {
        Cell::Empty | Cell::Occupied(_) => 0,
        Cell::Miss | Cell::Hit => 1,
        Cell::Sunk => 2,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn shots_only_move_cells_forward(
        seed in any::<u64>(),
        shots in prop::collection::vec((0usize..10, 0usize..10), 1..120),
    ) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let (mut grid, mut fleet) = place_random(10, &mut rng).unwrap();

        for (r, c) in shots {
            let before = grid.clone();
            let fleet_before = fleet.clone();
            let was_open = grid.is_targetable(r, c);
            let result = resolve_shot(&mut grid, &mut fleet, r, c);

            if was_open {
                prop_assert!(result.is_ok());
                prop_assert!(!grid.is_targetable(r, c));
            } else {
                prop_assert_eq!(result, Err(ShotError::AlreadyTargeted));
                prop_assert_eq!(&grid, &before);
                prop_assert_eq!(&fleet, &fleet_before);
            }
            for (rr, cc) in grid.coords() {
                prop_assert!(rank(grid.get(rr, cc).unwrap()) >= rank(before.get(rr, cc).unwrap()));
            }
            for ship in fleet.ships() {
                prop_assert_eq!(ship.is_sunk(), ship.hits() == ship.length());
                for &(sr, sc) in ship.cells() {
                    if ship.is_sunk() {
                        prop_assert_eq!(grid.get(sr, sc), Some(Cell::Sunk));
                    }
                }
            }
            prop_assert_eq!(fleet_defeated(&fleet), fleet.ships().all(|s| s.is_sunk()));
        }
    }
}
