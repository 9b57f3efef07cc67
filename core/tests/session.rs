use std::collections::{BTreeSet, VecDeque};

use minefield_core::*;

fn revealed_events(events: &[Event]) -> Vec<Coord2> {
    events
        .iter()
        .filter_map(|event| match *event {
            Event::Revealed { cell, .. } => Some(cell),
            _ => None,
        })
        .collect()
}

/// Zero-count region around `start` plus its numbered border, computed straight from the grid.
fn expected_cascade(grid: &Grid, start: Coord2) -> BTreeSet<Coord2> {
    let mut region = BTreeSet::from([start]);
    let mut queue = VecDeque::from([start]);

    while let Some(coords) = queue.pop_front() {
        if grid[coords].adjacent_mine_count() != 0 {
            continue;
        }
        for &neighbor in grid[coords].neighbors() {
            if !grid[neighbor].is_mine() && region.insert(neighbor) {
                queue.push_back(neighbor);
            }
        }
    }

    region
}

#[test]
fn neighbor_count_follows_position() {
    for (rows, columns) in [(2, 2), (2, 7), (5, 5), (9, 4)] {
        let grid = Grid::build(rows, columns).unwrap();

        for cell in grid.iter() {
            let (row, column) = cell.coords();
            let row_span = 3 - usize::from(row == 0) - usize::from(row == rows - 1);
            let column_span = 3 - usize::from(column == 0) - usize::from(column == columns - 1);
            let expected = row_span * column_span - 1;

            assert!([3, 5, 8].contains(&expected));
            assert_eq!(cell.neighbors().len(), expected, "{rows}x{columns} at {row},{column}");
        }
    }
}

#[test]
fn first_reveal_never_detonates() {
    for seed in 0..64 {
        for config in [GameConfig::beginner(), GameConfig::expert()] {
            let start = ((seed % 9) as Coord, (seed * 7 % 9) as Coord);
            let mut game = GameSession::new(config, seed).unwrap();

            let outcome = game.reveal(start).unwrap();

            assert_ne!(outcome, RevealOutcome::HitMine, "seed {seed}");
            assert_eq!(game.mines().len(), usize::from(config.mines));
            assert!(!game.mines().contains(&start));
            for neighbor in game.grid().neighbors(start).unwrap() {
                assert!(!game.mines().contains(neighbor));
            }
            assert!(game
                .drain_events()
                .iter()
                .all(|event| !matches!(event, Event::Detonated { .. })));
        }
    }
}

#[test]
fn cascade_reveals_region_and_border_once() {
    for seed in 0..16 {
        let mut game = GameSession::new(GameConfig::expert(), seed).unwrap();

        game.reveal((8, 15)).unwrap();

        let events = game.drain_events();
        let revealed = revealed_events(&events);
        let unique: BTreeSet<Coord2> = revealed.iter().copied().collect();
        assert_eq!(unique.len(), revealed.len(), "a cell was revealed twice");
        assert_eq!(unique, expected_cascade(game.grid(), (8, 15)));
        assert_eq!(game.ledger().revealed(), &unique);
    }
}

#[test]
fn revealing_twice_emits_once() {
    let config = GameConfig::new(4, 4, 2).unwrap();
    let mut game =
        GameSession::with_placer(config, FixedMinePlacer::new([(0, 3), (3, 3)])).unwrap();

    game.reveal((3, 0)).unwrap();
    let first = game.drain_events();
    assert_eq!(game.reveal((3, 0)).unwrap(), RevealOutcome::NoChange);

    assert_eq!(
        revealed_events(&first)
            .iter()
            .filter(|&&cell| cell == (3, 0))
            .count(),
        1
    );
    assert!(game.drain_events().is_empty());
}

#[test]
fn clearing_every_safe_cell_wins() {
    for seed in 0..8 {
        let mut game = GameSession::new(GameConfig::intermediate(), seed).unwrap();
        game.reveal((0, 0)).unwrap();

        let safe: Vec<Coord2> = game
            .grid()
            .iter()
            .filter(|cell| !cell.is_mine())
            .map(Cell::coords)
            .collect();
        for coords in safe {
            game.reveal(coords).unwrap();
        }

        assert_eq!(game.outcome(), Outcome::Victory);
        assert_eq!(game.revealed_count(), GameConfig::intermediate().safe_cells());
        let events = game.drain_events();
        let victory = events.iter().position(|event| *event == Event::Victory).unwrap();
        let exposed: BTreeSet<Coord2> = events[victory + 1..]
            .iter()
            .map(|event| match *event {
                Event::MineExposed { cell, flagged } => {
                    assert!(!flagged);
                    cell
                }
                other => panic!("unexpected event after victory: {other:?}"),
            })
            .collect();
        assert_eq!(&exposed, game.mines());
    }
}

#[test]
fn single_mine_board_wins_only_without_wrong_flags() {
    let config = GameConfig::new(3, 3, 1).unwrap();
    let mut game = GameSession::with_placer(config, FixedMinePlacer::new([(1, 2)])).unwrap();

    game.reveal((1, 0)).unwrap();
    game.toggle_flag((2, 2)).unwrap();
    game.toggle_flag((1, 2)).unwrap();
    game.reveal((0, 2)).unwrap();
    assert_eq!(game.outcome(), Outcome::InProgress);
    assert_eq!(game.ledger().incorrect_flags().len(), 1);

    game.toggle_flag((2, 2)).unwrap();
    game.reveal((2, 2)).unwrap();

    assert_eq!(game.outcome(), Outcome::Victory);
    assert_eq!(game.revealed_count(), 8);
}

#[test]
fn defeat_is_final() {
    // a wall of mines down column 6 keeps the opening from clearing the board
    let layout = (0..9).map(|row| (row, 6)).chain([(8, 8)]);
    let mut game =
        GameSession::with_placer(GameConfig::beginner(), FixedMinePlacer::new(layout)).unwrap();
    assert_eq!(game.reveal((4, 4)).unwrap(), RevealOutcome::Revealed);
    let mine = *game.mines().first().unwrap();
    game.drain_events();

    assert_eq!(game.reveal(mine).unwrap(), RevealOutcome::HitMine);
    assert_eq!(game.outcome(), Outcome::Defeat);

    let events = game.drain_events();
    assert_eq!(events[0], Event::Detonated { cell: mine });
    assert_eq!(events[1], Event::Defeat);
    let exposed = events
        .iter()
        .filter(|event| matches!(event, Event::MineExposed { .. }))
        .count();
    assert_eq!(exposed, game.mines().len() - 1);
    assert!(
        game.grid()
            .iter()
            .filter(|cell| cell.is_mine())
            .all(|cell| cell.state().is_revealed())
    );

    for cell in game.grid().iter().map(Cell::coords).collect::<Vec<_>>() {
        assert_eq!(game.reveal(cell).unwrap(), RevealOutcome::NoChange);
        assert_eq!(game.toggle_flag(cell).unwrap(), MarkOutcome::NoChange);
    }
    assert_eq!(game.quit(), RevealOutcome::NoChange);
    assert!(game.drain_events().is_empty());
    assert_eq!(game.outcome(), Outcome::Defeat);
}

#[test]
fn construction_bounds_mine_count() {
    assert_eq!(
        GameSession::new(GameConfig::new_unchecked(4, 5, 20), 0).err(),
        Some(GameError::InvalidMineCount {
            mines: 20,
            cells: 20
        })
    );
    assert!(GameSession::new(GameConfig::new_unchecked(4, 5, 19), 0).is_ok());
    assert!(matches!(
        GameSession::new(GameConfig::new_unchecked(0, 5, 0), 0),
        Err(GameError::InvalidDimensions { .. })
    ));
}

#[test]
fn densest_board_still_opens_safely() {
    let mut game = GameSession::new(GameConfig::new(4, 5, 19).unwrap(), 3).unwrap();

    assert_eq!(game.reveal((2, 2)).unwrap(), RevealOutcome::Won);
    assert_eq!(game.mines().len(), 19);
}

#[test]
fn same_seed_replays_same_events() {
    let play = || {
        let mut game = GameSession::new(GameConfig::intermediate(), 77).unwrap();
        game.reveal((5, 5)).unwrap();
        game.toggle_flag((0, 15)).unwrap();
        game.quit();
        game.drain_events()
    };

    assert_eq!(play(), play());
}

#[test]
fn events_serialize_for_presentation() {
    let event = Event::Revealed {
        cell: (2, 3),
        adjacent_mines: 1,
    };

    assert_eq!(
        serde_json::to_string(&event).unwrap(),
        r#"{"Revealed":{"cell":[2,3],"adjacent_mines":1}}"#
    );
    assert_eq!(serde_json::to_string(&Event::Victory).unwrap(), r#""Victory""#);
}
