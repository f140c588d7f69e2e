use duo_games::{create_empty_grid, is_valid_coord, Grid, GridError};

#[test]
fn test_new_grid_is_empty() {
    let grid: Grid<u8> = create_empty_grid(4);
    assert_eq!(grid.size(), 4);
    assert_eq!(grid.count_occupied(), 0);
    for r in 0..4 {
        for c in 0..4 {
            assert!(grid.is_empty_at(r, c).unwrap());
        }
    }
}

#[test]
fn test_get_set_take() {
    let mut grid = Grid::new(3);
    grid.set(1, 2, 'x').unwrap();
    assert_eq!(grid.get(1, 2).unwrap(), Some(&'x'));
    assert!(!grid.is_empty_at(1, 2).unwrap());

    assert_eq!(grid.take(1, 2).unwrap(), Some('x'));
    assert_eq!(grid.get(1, 2).unwrap(), None);
    assert_eq!(grid.take(1, 2).unwrap(), None);
}

#[test]
fn test_out_of_bounds() {
    let mut grid: Grid<u8> = Grid::new(10);
    let err = grid.get(10, 0).unwrap_err();
    assert_eq!(err, GridError::OutOfBounds { row: 10, col: 0, size: 10 });
    assert!(grid.set(0, 10, 1).is_err());
    assert!(grid.index_of(3, 11).is_err());
    assert!(grid.coord_of(100).is_err());
}

#[test]
fn test_index_and_coord_roundtrip() {
    let grid: Grid<u8> = Grid::new(11);
    assert_eq!(grid.index_of(5, 5).unwrap(), 60);
    assert_eq!(grid.coord_of(60).unwrap(), (5, 5));
    assert_eq!(grid.coord_of(120).unwrap(), (10, 10));
}

#[test]
fn test_from_iter_and_iter_occupied() {
    let grid = Grid::from_iter(4, [((0, 1), 'a'), ((3, 3), 'b')]).unwrap();
    let cells: Vec<_> = grid.iter_occupied().map(|(pos, v)| (pos, *v)).collect();
    assert_eq!(cells, vec![((0, 1), 'a'), ((3, 3), 'b')]);

    let bad = Grid::from_iter(4, [((4, 0), 'a')]);
    assert!(matches!(bad, Err(GridError::OutOfBounds { .. })));
}

#[test]
fn test_is_valid_coord() {
    assert!(is_valid_coord(10, 0, 0));
    assert!(is_valid_coord(10, 9, 9));
    assert!(!is_valid_coord(10, 10, 0));
    assert!(!is_valid_coord(0, 0, 0));
}
