use broadside::{
    fleet_defeated, place_random, place_specific, resolve_shot, Cell, Fleet, Grid, Orientation,
    Outcome, ShipId, ShotError, ROSTER,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn destroyer_at_origin() -> (Grid, Fleet) {
    let mut grid = Grid::new(10);
    let mut fleet = Fleet::new();
    place_specific(&mut grid, &mut fleet, ShipId(4), ROSTER[4], 0, 0, Orientation::Horizontal)
        .unwrap();
    (grid, fleet)
}

#[test]
fn test_miss_then_already_targeted() {
    let (mut grid, mut fleet) = destroyer_at_origin();
    assert_eq!(resolve_shot(&mut grid, &mut fleet, 5, 5), Ok(Outcome::Miss));
    assert_eq!(grid.get(5, 5), Some(Cell::Miss));

    let before = (grid.clone(), fleet.clone());
    assert_eq!(
        resolve_shot(&mut grid, &mut fleet, 5, 5),
        Err(ShotError::AlreadyTargeted)
    );
    assert_eq!((grid, fleet), before);
}

#[test]
fn test_hit_then_sink() {
    let (mut grid, mut fleet) = destroyer_at_origin();

    let first = resolve_shot(&mut grid, &mut fleet, 0, 0).unwrap();
    assert_eq!(first, Outcome::Hit { sunk: None });
    assert_eq!(grid.get(0, 0), Some(Cell::Hit));
    assert_eq!(fleet.get(ShipId(4)).unwrap().hits(), 1);
    assert!(!fleet_defeated(&fleet));

    let second = resolve_shot(&mut grid, &mut fleet, 0, 1).unwrap();
    assert_eq!(second, Outcome::Hit { sunk: Some(ShipId(4)) });
    assert_eq!(grid.get(0, 0), Some(Cell::Sunk));
    assert_eq!(grid.get(0, 1), Some(Cell::Sunk));
    assert!(fleet.get(ShipId(4)).unwrap().is_sunk());
    assert!(fleet_defeated(&fleet));

    assert_eq!(
        resolve_shot(&mut grid, &mut fleet, 0, 1),
        Err(ShotError::AlreadyTargeted)
    );
}

#[test]
fn test_out_of_bounds() {
    let (mut grid, mut fleet) = destroyer_at_origin();
    assert_eq!(
        resolve_shot(&mut grid, &mut fleet, 10, 2),
        Err(ShotError::OutOfBounds { row: 10, col: 2 })
    );
    assert_eq!(grid.targetable().count(), 100);
}

#[test]
fn test_sinking_whole_fleet() {
    let mut rng = SmallRng::seed_from_u64(3);
    let (mut grid, mut fleet) = place_random(10, &mut rng).unwrap();
    let cells: Vec<_> = fleet.ships().flat_map(|s| s.cells().to_vec()).collect();
    let mut sunk = 0;
    for (i, (r, c)) in cells.iter().copied().enumerate() {
        assert!(!fleet_defeated(&fleet));
        let outcome = resolve_shot(&mut grid, &mut fleet, r, c).unwrap();
        assert!(outcome.is_hit());
        if outcome.sunk().is_some() {
            sunk += 1;
        }
        assert_eq!(fleet_defeated(&fleet), i + 1 == cells.len());
    }
    assert_eq!(sunk, ROSTER.len());
    assert_eq!(grid.find(Cell::Sunk).count(), 17);
    assert_eq!(fleet.remaining_lengths(), Vec::<usize>::new());
}
