//! Integration tests for the game registry and sessions

use std::sync::Arc;
use std::thread;

use checkers_core::{Board, Color, Message, Move, Piece, Position, Rejection, RuleSet};
use checkers_session::{GameRegistry, GameResult, GameSession, SessionError};

fn p(row: i8, cell: i8) -> Position {
    Position::new(row, cell)
}

fn mv(from: (i8, i8), to: (i8, i8)) -> Move {
    Move::new(p(from.0, from.1), p(to.0, to.1))
}

#[test]
fn test_opening_exchange() {
    let registry = GameRegistry::new();
    let id = registry.new_game("alice", "bob").unwrap();

    let msg = registry.submit_move(id, Color::Red, mv((5, 2), (4, 3))).unwrap();
    assert_eq!(msg, Message::turn_ends(Color::White));
    registry.submit_move(id, Color::White, mv((2, 5), (3, 4))).unwrap();

    // Red's piece on (4,3) now has a capture, so its quiet move is refused
    let msg = registry.submit_move(id, Color::Red, mv((4, 3), (3, 2))).unwrap();
    assert_eq!(msg, Message::from(Rejection::JumpRequired));

    let game = registry.get(id).unwrap();
    let before = game.lock().unwrap().board().clone();
    let msg = registry.submit_move(id, Color::Red, mv((4, 3), (2, 5))).unwrap();
    assert!(!msg.is_error());

    let game = game.lock().unwrap();
    assert_ne!(game.board(), &before);
    assert_eq!(game.board().count(Color::White), 11);
    assert_eq!(game.turn(), Color::White);
    assert_eq!(game.moves_played(), 3);
}

#[test]
fn test_tournament_rules_reject_other_quiet_moves() {
    let registry = GameRegistry::with_rules(RuleSet::tournament());
    let id = registry.new_game("alice", "bob").unwrap();
    registry.submit_move(id, Color::Red, mv((5, 2), (4, 3))).unwrap();
    registry.submit_move(id, Color::White, mv((2, 5), (3, 4))).unwrap();

    let msg = registry.submit_move(id, Color::Red, mv((5, 0), (4, 1))).unwrap();
    assert_eq!(msg, Message::from(Rejection::JumpRequired));
}

#[test]
fn test_multi_jump_must_be_finished() {
    let mut board = Board::empty();
    board.place(p(5, 0), Piece::man(Color::Red)).unwrap();
    board.place(p(7, 0), Piece::man(Color::Red)).unwrap();
    board.place(p(4, 1), Piece::man(Color::White)).unwrap();
    board.place(p(2, 3), Piece::man(Color::White)).unwrap();
    board.place(p(0, 7), Piece::man(Color::White)).unwrap();
    let mut game = GameSession::from_board(1, "alice", "bob", RuleSet::default(), board, Color::Red);

    let msg = game.submit(Color::Red, mv((5, 0), (3, 2))).unwrap();
    assert_eq!(msg, Message::must_continue(p(3, 2)));
    assert_eq!(game.turn(), Color::Red);
    assert_eq!(game.pending_jump(), Some(p(3, 2)));

    let msg = game.submit(Color::Red, mv((7, 0), (6, 1))).unwrap();
    assert_eq!(msg, Message::error("You must continue jumping!"));
    let msg = game.submit(Color::Red, mv((3, 2), (2, 1))).unwrap();
    assert_eq!(msg, Message::from(Rejection::JumpRequired));
    let msg = game.submit(Color::White, mv((0, 7), (1, 6))).unwrap();
    assert_eq!(msg, Message::error("It is not your turn!"));

    let msg = game.submit(Color::Red, mv((3, 2), (1, 4))).unwrap();
    assert_eq!(msg, Message::turn_ends(Color::White));
    assert_eq!(game.pending_jump(), None);
    assert_eq!(game.moves_played(), 1);
    assert_eq!(game.board().count(Color::White), 1);
    assert_eq!(game.result(), GameResult::Ongoing);
}

#[test]
fn test_views_are_oriented_per_player() {
    let registry = GameRegistry::new();
    let id = registry.new_game("alice", "bob").unwrap();
    registry.submit_move(id, Color::Red, mv((5, 0), (4, 1))).unwrap();

    let red = registry.view_for(id, Color::Red).unwrap();
    let white = registry.view_for(id, Color::White).unwrap();
    assert_eq!(red[4][1], Some(Piece::man(Color::Red)));
    assert_eq!(white[3][6], Some(Piece::man(Color::Red)));
    assert_eq!(white[0][1], Some(Piece::man(Color::Red)));
    assert_eq!(white[7][0], Some(Piece::man(Color::White)));
    assert_eq!(white[2][7], None);
}

#[test]
fn test_unknown_game_move() {
    let registry = GameRegistry::new();
    assert!(matches!(
        registry.submit_move(3, Color::Red, mv((5, 0), (4, 1))),
        Err(SessionError::UnknownGame(3))
    ));
}

#[test]
fn test_concurrent_games() {
    let registry = Arc::new(GameRegistry::new());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let id = registry
                    .new_game(&format!("red{}", i), &format!("white{}", i))
                    .unwrap();
                let msg = registry.submit_move(id, Color::Red, mv((5, 0), (4, 1))).unwrap();
                assert!(!msg.is_error());
                id
            })
        })
        .collect();

    let mut ids: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    ids.sort_unstable();
    assert_eq!(ids, (1..=8).collect::<Vec<_>>());
    assert_eq!(registry.len().unwrap(), 8);

    for id in ids {
        let game = registry.get(id).unwrap();
        assert_eq!(game.lock().unwrap().turn(), Color::White);
    }
}
