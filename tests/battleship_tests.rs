use duo_games::{
    AttackResult, BattleshipBoard, BattleshipMove, BattleshipOutcome, BattleshipState, Cell,
    ErrorKind, GameError, Match, MatchId, MatchResult, Orientation, Phase, PlayerId, ShipKind,
    Shot, BOARD_SIZE, FLEET,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn players() -> [PlayerId; 2] {
    [PlayerId::from("ann"), PlayerId::from("bob")]
}

/// Each ship on its own row, starting at column 0.
fn row_fleet(board: &BattleshipBoard) -> BattleshipBoard {
    FLEET.iter().enumerate().fold(board.clone(), |b, (i, &kind)| {
        assert!(b.is_valid_placement(kind, i * 2, 0, Orientation::Horizontal));
        b.place_ship(kind, i * 2, 0, Orientation::Horizontal)
    })
}

fn place_row_fleet(game: &Match<BattleshipState>, player: &PlayerId, rng: &mut SmallRng) -> Match<BattleshipState> {
    let mut game = game.clone();
    for (i, &kind) in FLEET.iter().enumerate() {
        let mv = BattleshipMove::PlaceShip {
            kind,
            row: i * 2,
            col: 0,
            orientation: Orientation::Horizontal,
        };
        game = game.apply(player, &mv, rng, 0).unwrap().0;
    }
    game
}

fn active_match(rng: &mut SmallRng) -> Match<BattleshipState> {
    let [a, b] = players();
    let state = BattleshipState::new(&[a.clone(), b.clone()]);
    let mut game = Match::new(MatchId::from("m1"), [a.clone(), b.clone()], state, 0).unwrap();
    game = place_row_fleet(&game, &a, rng);
    game = place_row_fleet(&game, &b, rng);
    game = game.apply(&a, &BattleshipMove::ConfirmFleet, rng, 0).unwrap().0;
    game.apply(&b, &BattleshipMove::ConfirmFleet, rng, 0).unwrap().0
}

#[test]
fn test_destroyer_scenario() {
    let board = BattleshipBoard::new();
    assert!(board.is_valid_placement(ShipKind::Destroyer, 0, 0, Orientation::Horizontal));
    let board = board.place_ship(ShipKind::Destroyer, 0, 0, Orientation::Horizontal);
    for c in 0..2 {
        assert_eq!(
            board.cell(0, c).unwrap(),
            Some(Cell::Ship { kind: ShipKind::Destroyer, hit: false })
        );
    }
    assert_eq!(board.cell(0, 2).unwrap(), None);

    let (board, first) = board.attack(0, 0);
    assert_eq!(first, AttackResult::Hit);
    let (board, second) = board.attack(0, 1);
    assert_eq!(second, AttackResult::Sunk(ShipKind::Destroyer));
    // The rest of the fleet was never placed.
    assert!(!board.all_ships_sunk());
}

#[test]
fn test_placement_rejects_overflow_and_overlap() {
    let board = BattleshipBoard::new();
    assert!(!board.is_valid_placement(ShipKind::Carrier, 0, 6, Orientation::Horizontal));
    assert!(!board.is_valid_placement(ShipKind::Carrier, 6, 0, Orientation::Vertical));
    assert!(board.is_valid_placement(ShipKind::Carrier, 0, 5, Orientation::Horizontal));
    assert!(!board.is_valid_placement(ShipKind::Cruiser, BOARD_SIZE, 0, Orientation::Horizontal));

    let board = board.place_ship(ShipKind::Carrier, 4, 2, Orientation::Horizontal);
    assert!(!board.is_valid_placement(ShipKind::Submarine, 2, 4, Orientation::Vertical));
    assert!(board.is_valid_placement(ShipKind::Submarine, 5, 4, Orientation::Vertical));
}

#[test]
fn test_miss_then_already_attacked() {
    let board = row_fleet(&BattleshipBoard::new());
    let (board, result) = board.attack(9, 9);
    assert_eq!(result, AttackResult::Miss);
    assert_eq!(board.cell(9, 9).unwrap(), Some(Cell::Miss));

    let (again, result) = board.attack(9, 9);
    assert_eq!(result, AttackResult::AlreadyAttacked);
    assert_eq!(again, board);

    let (outside, result) = board.attack(BOARD_SIZE, 0);
    assert_eq!(result, AttackResult::Invalid);
    assert_eq!(outside, board);
}

#[test]
fn test_all_ships_sunk_after_every_segment_hit() {
    let mut board = row_fleet(&BattleshipBoard::new());
    assert!(board.all_ships_placed());
    let mut hits = 0;
    let mut sunk = Vec::new();
    for (i, &kind) in FLEET.iter().enumerate() {
        for c in 0..kind.size() {
            assert!(!board.all_ships_sunk());
            let (next, result) = board.attack(i * 2, c);
            assert!(result.is_hit());
            if let AttackResult::Sunk(k) = result {
                sunk.push(k);
            }
            board = next;
            hits += 1;
        }
    }
    assert_eq!(hits, 17);
    assert_eq!(sunk, FLEET.to_vec());
    assert!(board.all_ships_sunk());
    assert_eq!(board.remaining_ship_count(), 0);
}

#[test]
fn test_remove_ship_frees_cells() {
    let board = BattleshipBoard::new().place_ship(ShipKind::Cruiser, 3, 3, Orientation::Vertical);
    assert!(board.has_ship(ShipKind::Cruiser));
    let board = board.remove_ship(ShipKind::Cruiser);
    assert!(!board.has_ship(ShipKind::Cruiser));
    assert_eq!(board.cells().count_occupied(), 0);
}

#[test]
fn test_random_fleet_is_complete() {
    let mut rng = SmallRng::seed_from_u64(7);
    let board = BattleshipBoard::new().place_fleet_randomly(&mut rng).unwrap();
    assert!(board.all_ships_placed());
    assert_eq!(board.cells().count_occupied(), 17);
    assert_eq!(board.afloat_kinds(), FLEET.to_vec());
}

#[test]
fn test_setup_flow() {
    let mut rng = SmallRng::seed_from_u64(1);
    let [a, b] = players();
    let state = BattleshipState::new(&[a.clone(), b.clone()]);
    let game = Match::new(MatchId::from("setup"), [a.clone(), b.clone()], state, 0).unwrap();
    assert_eq!(game.phase(), Phase::Setup);

    // Attacks wait for both fleets.
    let err = game
        .apply(&a, &BattleshipMove::Attack { row: 0, col: 0 }, &mut rng, 0)
        .unwrap_err();
    assert_eq!(err, GameError::WrongPhase);

    let err = game.apply(&a, &BattleshipMove::ConfirmFleet, &mut rng, 0).unwrap_err();
    assert_eq!(err, GameError::FleetIncomplete);

    // Setup moves are not turn-bound: the second participant may go first.
    let (game, outcome) = game.apply(&b, &BattleshipMove::AutoPlace, &mut rng, 0).unwrap();
    assert_eq!(outcome, BattleshipOutcome::AutoPlaced);
    let (game, outcome) = game.apply(&b, &BattleshipMove::ConfirmFleet, &mut rng, 0).unwrap();
    assert_eq!(outcome, BattleshipOutcome::Confirmed { battle_started: false });
    assert!(game.state().is_confirmed(&b));

    let locked = game.apply(&b, &BattleshipMove::RemoveShip { kind: ShipKind::Carrier }, &mut rng, 0);
    assert_eq!(locked.unwrap_err(), GameError::FleetLocked);

    let game = place_row_fleet(&game, &a, &mut rng);
    let dup = BattleshipMove::PlaceShip {
        kind: ShipKind::Destroyer,
        row: 9,
        col: 0,
        orientation: Orientation::Horizontal,
    };
    assert_eq!(
        game.apply(&a, &dup, &mut rng, 0).unwrap_err(),
        GameError::ShipAlreadyPlaced(ShipKind::Destroyer)
    );

    let (game, outcome) = game.apply(&a, &BattleshipMove::ConfirmFleet, &mut rng, 0).unwrap();
    assert_eq!(outcome, BattleshipOutcome::Confirmed { battle_started: true });
    assert_eq!(game.phase(), Phase::Active);
    assert_eq!(game.current_turn(), Some(&a));
}

#[test]
fn test_invalid_placement_is_rejected() {
    let mut rng = SmallRng::seed_from_u64(2);
    let [a, b] = players();
    let state = BattleshipState::new(&[a.clone(), b.clone()]);
    let game = Match::new(MatchId::from("p"), [a.clone(), b], state, 0).unwrap();
    let mv = BattleshipMove::PlaceShip {
        kind: ShipKind::Battleship,
        row: 8,
        col: 0,
        orientation: Orientation::Vertical,
    };
    let err = game.apply(&a, &mv, &mut rng, 0).unwrap_err();
    assert_eq!(err, GameError::InvalidPlacement { kind: ShipKind::Battleship, row: 8, col: 0 });
    assert_eq!(err.kind(), ErrorKind::InvalidInput);

    let remove = BattleshipMove::RemoveShip { kind: ShipKind::Battleship };
    assert_eq!(
        game.apply(&a, &remove, &mut rng, 0).unwrap_err(),
        GameError::ShipNotPlaced(ShipKind::Battleship)
    );
}

#[test]
fn test_attack_passes_turn_on_hit_and_miss() {
    let mut rng = SmallRng::seed_from_u64(3);
    let [a, b] = players();
    let game = active_match(&mut rng);

    let (game, outcome) = game
        .apply(&a, &BattleshipMove::Attack { row: 0, col: 0 }, &mut rng, 0)
        .unwrap();
    assert_eq!(outcome, BattleshipOutcome::Attack(AttackResult::Hit));
    assert_eq!(game.current_turn(), Some(&b));
    assert_eq!(game.state().board(&a).unwrap().shot_at(0, 0).unwrap(), Some(Shot::Hit));

    let (game, outcome) = game
        .apply(&b, &BattleshipMove::Attack { row: 9, col: 9 }, &mut rng, 0)
        .unwrap();
    assert_eq!(outcome, BattleshipOutcome::Attack(AttackResult::Miss));
    assert_eq!(game.current_turn(), Some(&a));
    assert_eq!(game.state().board(&b).unwrap().shot_at(9, 9).unwrap(), Some(Shot::Miss));
}

#[test]
fn test_repeat_attack_keeps_turn_and_state() {
    let mut rng = SmallRng::seed_from_u64(4);
    let [a, b] = players();
    let game = active_match(&mut rng);
    let game = game.apply(&a, &BattleshipMove::Attack { row: 9, col: 9 }, &mut rng, 0).unwrap().0;
    let game = game.apply(&b, &BattleshipMove::Attack { row: 9, col: 9 }, &mut rng, 0).unwrap().0;

    let err = game
        .apply(&a, &BattleshipMove::Attack { row: 9, col: 9 }, &mut rng, 0)
        .unwrap_err();
    assert_eq!(err, GameError::AlreadyAttacked { row: 9, col: 9 });
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert_eq!(game.current_turn(), Some(&a));

    let err = game
        .apply(&a, &BattleshipMove::Attack { row: 0, col: BOARD_SIZE }, &mut rng, 0)
        .unwrap_err();
    assert!(matches!(err, GameError::Grid(_)));
}

#[test]
fn test_sinking_last_ship_wins() {
    let mut rng = SmallRng::seed_from_u64(5);
    let [a, b] = players();
    let mut game = active_match(&mut rng);
    let targets: Vec<(usize, usize)> = FLEET
        .iter()
        .enumerate()
        .flat_map(|(i, kind)| (0..kind.size()).map(move |c| (i * 2, c)))
        .collect();
    let misses = (0..BOARD_SIZE).map(|c| (9, c));

    for (n, ((row, col), (mr, mc))) in targets.iter().copied().zip(misses.cycle()).enumerate() {
        let (next, _) = game.apply(&a, &BattleshipMove::Attack { row, col }, &mut rng, 0).unwrap();
        game = next;
        if n + 1 == targets.len() {
            break;
        }
        // b misses along rows 9 and 7, which hold no ships.
        let (mr, mc) = if n < BOARD_SIZE { (mr, mc) } else { (mr - 2, mc) };
        game = game.apply(&b, &BattleshipMove::Attack { row: mr, col: mc }, &mut rng, 0).unwrap().0;
    }

    assert_eq!(game.phase(), Phase::Ended);
    assert_eq!(game.result(), Some(&MatchResult::Winner(a.clone())));
    assert_eq!(game.current_turn(), None);
    assert!(game.state().board(&b).unwrap().all_ships_sunk());

    let err = game
        .apply(&b, &BattleshipMove::Attack { row: 5, col: 5 }, &mut rng, 0)
        .unwrap_err();
    assert_eq!(err, GameError::MatchEnded);
}
