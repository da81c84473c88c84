//! Turn resolution: roll classification, redirect chains and policies.

use proptest::prelude::*;
use strictly_goose::{
    AnimationEvent, Board, BoardFormatError, Cell, CellKind, CellRecord, DoubleRollPolicy,
    Landing, Player, RollClass, ScriptedDice, TurnEngine, UnderflowPolicy, classify_roll,
};

fn board(number_of_cells: usize, records: Vec<CellRecord>) -> Board {
    Board::new(number_of_cells, records, UnderflowPolicy::Reject).unwrap()
}

fn play(board: &Board, from: usize, faces: &[u8]) -> (Player, strictly_goose::TurnOutcome) {
    play_with(board, from, faces, DoubleRollPolicy::RollAgain)
}

fn play_with(
    board: &Board,
    from: usize,
    faces: &[u8],
    policy: DoubleRollPolicy,
) -> (Player, strictly_goose::TurnOutcome) {
    let mut player = Player::new("A", 1);
    let engine = TurnEngine::new(board, policy);
    // Walk the token to `from` over a plain board first
    if from > 0 {
        let plain = Board::new(board.number_of_cells(), Vec::new(), UnderflowPolicy::Reject).unwrap();
        let walker = TurnEngine::new(&plain, policy);
        let mut left = from;
        while left > 0 {
            let step = left.min(6) as u8;
            walker
                .resolve_turn(&mut player, ScriptedDice::new([step]).unwrap())
                .unwrap();
            left -= step as usize;
        }
    }
    assert_eq!(*player.position(), from);
    let outcome = engine
        .resolve_turn(&mut player, ScriptedDice::new(faces.to_vec()).unwrap())
        .unwrap();
    (player, outcome)
}

#[test]
fn test_overshoot_example() {
    // N = 19, finish 20, 17 + 6 bounces back to 17
    assert_eq!(
        classify_roll(17, 6, 20),
        RollClass::Overshoot {
            landing: 17,
            excess: 3
        }
    );
    assert_eq!(classify_roll(14, 6, 20), RollClass::Win);
    assert_eq!(classify_roll(13, 6, 20), RollClass::Within { landing: 19 });
}

#[test]
fn test_go_forward_walks_each_cell() {
    let board = board(19, vec![CellRecord::new(4, CellKind::GoForward { offset: 3 }, "Il ponte")]);
    let (player, outcome) = play(&board, 0, &[4]);

    assert_eq!(*player.position(), 7);
    assert_eq!(
        outcome.events(),
        [
            AnimationEvent::Dice { value: 4 },
            AnimationEvent::walk([1, 2, 3, 4]),
            AnimationEvent::message("Il ponte"),
            AnimationEvent::walk([5, 6, 7]),
            AnimationEvent::message("La casella 7 e' vuota"),
        ]
    );
}

#[test]
fn test_chain_resolves_to_resting_cell() {
    let board = board(
        19,
        vec![
            CellRecord::new(4, CellKind::GoForward { offset: 3 }, "Avanti"),
            CellRecord::new(7, CellKind::Teleport { destination: 12 }, "Vai"),
            CellRecord::new(12, CellKind::GoBack { offset: 2 }, "Indietro"),
        ],
    );
    let (player, outcome) = play(&board, 0, &[4]);

    assert_eq!(outcome.final_index(), 10);
    assert_eq!(*player.position(), 10);
    assert_eq!(
        outcome.events(),
        [
            AnimationEvent::Dice { value: 4 },
            AnimationEvent::walk([1, 2, 3, 4]),
            AnimationEvent::message("Avanti"),
            AnimationEvent::walk([5, 6, 7]),
            AnimationEvent::message("Vai"),
            AnimationEvent::walk([12]),
            AnimationEvent::message("Indietro"),
            AnimationEvent::walk([11, 10]),
            AnimationEvent::message("La casella 10 e' vuota"),
        ]
    );
}

#[test]
fn test_long_acyclic_chain_terminates() {
    let records = (1..10)
        .map(|i| CellRecord::new(i, CellKind::GoForward { offset: 1 }, "Avanti"))
        .collect();
    let board = board(10, records);
    let (player, outcome) = play(&board, 0, &[1]);

    assert_eq!(*player.position(), 10);
    let walks = outcome
        .events()
        .iter()
        .filter(|e| matches!(e, AnimationEvent::Move { .. }))
        .count();
    assert_eq!(walks, 10);
}

#[test]
fn test_redirect_cycle_rejected_at_load() {
    let records = vec![
        CellRecord::new(4, CellKind::GoForward { offset: 2 }, "Avanti"),
        CellRecord::new(6, CellKind::GoBack { offset: 2 }, "Indietro"),
    ];
    let result = Board::new(10, records, UnderflowPolicy::Reject);
    assert_eq!(result, Err(BoardFormatError::RedirectCycle { cycle: vec![4, 6] }));
}

#[test]
fn test_stop_sets_wait_and_suppresses_rolls() {
    let board = board(10, vec![CellRecord::new(3, CellKind::Stop { wait_turns: 2 }, "Fermo")]);
    let engine = TurnEngine::new(&board, DoubleRollPolicy::RollAgain);
    let mut player = Player::new("A", 1);
    let mut dice = ScriptedDice::new([3, 2]).unwrap();

    engine.resolve_turn(&mut player, &mut dice).unwrap();
    assert_eq!(*player.wait_turns(), 2);

    for _ in 0..2 {
        let outcome = engine.resolve_turn(&mut player, &mut dice).unwrap();
        assert!(outcome.is_idle());
        assert_eq!(*player.position(), 3);
    }
    assert_eq!(dice.rolls(), 1);

    let outcome = engine.resolve_turn(&mut player, &mut dice).unwrap();
    assert_eq!(outcome.rolls(), [2]);
    assert_eq!(*player.position(), 5);
}

#[test]
fn test_redirect_onto_stop_applies_wait() {
    let board = board(
        10,
        vec![
            CellRecord::new(2, CellKind::Teleport { destination: 6 }, "Vai"),
            CellRecord::new(6, CellKind::Stop { wait_turns: 1 }, "Fermo"),
        ],
    );
    let (player, _) = play(&board, 0, &[2]);
    assert_eq!(*player.position(), 6);
    assert_eq!(*player.wait_turns(), 1);
}

#[test]
fn test_double_roll_policies() {
    let board = board(10, vec![CellRecord::new(3, CellKind::DoubleRoll, "Doppio")]);

    let (player, outcome) = play_with(&board, 0, &[3, 4], DoubleRollPolicy::RollAgain);
    assert_eq!(outcome.rolls(), [3, 4]);
    assert_eq!(*player.position(), 7);
    assert_eq!(*player.bonus_turns(), 0);

    let (player, outcome) = play_with(&board, 0, &[3, 4], DoubleRollPolicy::ExtraTurn);
    assert_eq!(outcome.rolls(), [3]);
    assert_eq!(*player.position(), 3);
    assert_eq!(*player.bonus_turns(), 1);
}

#[test]
fn test_go_back_underflow_policies() {
    let records = vec![CellRecord::new(3, CellKind::GoBack { offset: 5 }, "Frana")];

    let rejected = Board::new(10, records.clone(), UnderflowPolicy::Reject);
    assert_eq!(
        rejected,
        Err(BoardFormatError::RedirectOutOfRange {
            index: 3,
            target: -2,
            number_of_cells: 10
        })
    );

    let clamped = Board::new(10, records, UnderflowPolicy::Clamp).unwrap();
    let (player, outcome) = play(&clamped, 0, &[3]);
    assert_eq!(*player.position(), 0);
    assert_eq!(
        &outcome.events()[2..],
        [
            AnimationEvent::message("Frana"),
            AnimationEvent::walk([2, 1, 0]),
            AnimationEvent::message("La casella 0 e' la partenza"),
        ]
    );
}

#[test]
fn test_teleport_beyond_track_rejected() {
    let records = vec![CellRecord::new(3, CellKind::Teleport { destination: 11 }, "Vai")];
    let result = Board::new(10, records, UnderflowPolicy::Reject);
    assert!(matches!(
        result,
        Err(BoardFormatError::RedirectOutOfRange { index: 3, target: 11, .. })
    ));
}

#[test]
fn test_go_forward_onto_finish_cell_rests() {
    // Redirects can reach N but never the finish
    let board = board(10, vec![CellRecord::new(8, CellKind::GoForward { offset: 2 }, "Avanti")]);
    let (player, outcome) = play(&board, 2, &[6]);
    assert!(!outcome.is_win());
    assert_eq!(*player.position(), 10);
}

#[test]
fn test_bounce_onto_redirect_follows_the_chain() {
    let board = board(10, vec![CellRecord::new(9, CellKind::GoBack { offset: 4 }, "Giu")]);
    let (player, outcome) = play(&board, 10, &[3]);

    assert_eq!(*player.position(), 5);
    assert_eq!(
        outcome.events(),
        [
            AnimationEvent::Dice { value: 3 },
            AnimationEvent::walk([11, 10, 9]),
            AnimationEvent::message("Giu"),
            AnimationEvent::walk([8, 7, 6, 5]),
            AnimationEvent::message("La casella 5 e' vuota"),
        ]
    );
}

#[test]
fn test_bounce_onto_stop_sets_wait() {
    let board = board(10, vec![CellRecord::new(9, CellKind::Stop { wait_turns: 2 }, "La locanda")]);
    let (player, outcome) = play(&board, 10, &[3]);

    assert_eq!(*player.position(), 9);
    assert_eq!(*player.wait_turns(), 2);
    assert_eq!(
        &outcome.events()[1..],
        [
            AnimationEvent::walk([11, 10, 9]),
            AnimationEvent::message("La locanda"),
        ]
    );
}

fn cell_kind() -> impl Strategy<Value = CellKind> {
    prop_oneof![
        Just(CellKind::Start),
        Just(CellKind::Regular),
        (0u32..5).prop_map(|wait_turns| CellKind::Stop { wait_turns }),
        (1usize..10).prop_map(|offset| CellKind::GoForward { offset }),
        (1usize..10).prop_map(|offset| CellKind::GoBack { offset }),
        (0usize..30).prop_map(|destination| CellKind::Teleport { destination }),
        Just(CellKind::DoubleRoll),
    ]
}

proptest! {
    #[test]
    fn test_resting_cells_are_fixed_points(index in 0usize..50, roll in 1u8..=6, wait_turns in 0u32..5) {
        for kind in [CellKind::Start, CellKind::Regular, CellKind::Stop { wait_turns }] {
            let cell = Cell::new(index, kind, "");
            prop_assert_eq!(cell.resolve_landing(roll), Landing::Rest);
            prop_assert_eq!(cell.target_index(roll), index as i64);
        }
    }

    #[test]
    fn test_redirects_ignore_the_roll(index in 10usize..40, kind in cell_kind(), a in 1u8..=6, b in 1u8..=6) {
        let cell = Cell::new(index, kind, "");
        prop_assert_eq!(cell.target_index(a), cell.target_index(b));
        let expected = match kind {
            CellKind::GoForward { offset } => (index + offset) as i64,
            CellKind::GoBack { offset } => index as i64 - offset as i64,
            CellKind::Teleport { destination } => destination as i64,
            _ => index as i64,
        };
        prop_assert_eq!(cell.target_index(a), expected);
    }

    #[test]
    fn test_overshoot_arithmetic(track_limit in 7usize..120, dice in 1u8..=6, back in 1usize..7) {
        prop_assume!(back <= track_limit);
        let before = track_limit - back;
        match classify_roll(before, dice, track_limit) {
            RollClass::Win => prop_assert_eq!(before + dice as usize, track_limit),
            RollClass::Within { landing } => {
                prop_assert_eq!(landing, before + dice as usize);
                prop_assert!(landing < track_limit);
            }
            RollClass::Overshoot { landing, excess } => {
                prop_assert_eq!((track_limit - before) + excess, dice as usize);
                prop_assert_eq!(landing, track_limit as i64 - excess as i64);
                prop_assert!(landing >= track_limit as i64 - 6);
            }
        }
    }

    #[test]
    fn test_exact_roll_always_wins(number_of_cells in 6usize..40, dice in 1u8..=6) {
        let board = Board::new(number_of_cells, Vec::new(), UnderflowPolicy::Reject).unwrap();
        let from = board.track_limit() - dice as usize;
        let (player, outcome) = play(&board, from, &[dice]);
        prop_assert!(outcome.is_win());
        prop_assert_eq!(outcome.final_index(), board.track_limit());
        prop_assert_eq!(*player.position(), from);
    }
}
