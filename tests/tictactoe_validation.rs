//! Test suite for the Tic-Tac-Toe board model
//! Validates turn order, move legality and outcome detection

use std::collections::HashSet;

use noughts::tictactoe::{Action, BoardState, Cell, GameOutcome, Player, initial_state};

/// Every state reachable from the empty board by legal play, stopping at
/// decided positions
fn reachable_states() -> Vec<BoardState> {
    let mut seen = HashSet::new();
    let mut stack = vec![initial_state()];
    let mut states = Vec::new();

    while let Some(state) = stack.pop() {
        if !seen.insert(state.encode()) {
            continue;
        }
        states.push(state);
        if state.check_outcome().is_some() {
            continue;
        }
        for action in state.legal_actions() {
            stack.push(state.apply_action(action).unwrap());
        }
    }

    states
}

mod turn_order {
    use super::*;

    #[test]
    fn x_moves_first_on_empty_board() {
        assert_eq!(initial_state().whose_turn(), Some(Player::X));
    }

    #[test]
    fn turns_alternate_in_every_reachable_state() {
        for state in reachable_states() {
            let Some(mover) = state.whose_turn() else {
                assert_eq!(state.occupied_count(), 9);
                continue;
            };
            assert!(state.occupied_count() < 9);

            for action in state.legal_actions() {
                assert_eq!(action.player, mover);
                let next = state.apply_action(action).unwrap();
                if next.occupied_count() < 9 {
                    assert_eq!(next.whose_turn(), Some(mover.opponent()));
                } else {
                    assert_eq!(next.whose_turn(), None);
                }
            }
        }
    }

    #[test]
    fn piece_counts_stay_balanced() {
        for state in reachable_states() {
            let x = state.cells().iter().filter(|&&c| c == Cell::X).count();
            let o = state.cells().iter().filter(|&&c| c == Cell::O).count();
            assert!(x == o || x == o + 1, "unbalanced board {}", state.encode());
        }
    }

    #[test]
    fn reachable_state_count_matches_known_total() {
        // 5478 legal positions in standard Tic-Tac-Toe
        assert_eq!(reachable_states().len(), 5478);
    }
}

mod move_legality {
    use super::*;

    #[test]
    fn legal_actions_always_apply() {
        for state in reachable_states() {
            for action in state.legal_actions() {
                assert!(
                    state.apply_action(action).is_ok(),
                    "legal action {action} failed on {}",
                    state.encode()
                );
            }
        }
    }

    #[test]
    fn occupied_cell_is_rejected() {
        let state = initial_state().play(4).unwrap();
        for player in [Player::X, Player::O] {
            let err = state.apply_action(Action::new(player, 4)).unwrap_err();
            assert!(matches!(err, noughts::Error::InvalidMove { position: 4 }));
        }
    }

    #[test]
    fn applying_never_mutates_parent() {
        let parent = BoardState::from_string("X___O____").unwrap();
        let snapshot = parent;
        for action in parent.legal_actions() {
            let _ = parent.apply_action(action).unwrap();
        }
        assert_eq!(parent, snapshot);
    }

    #[test]
    fn top_row_scenario() {
        // X at {0, 1}, O at {3, 4}: counts are equal so X moves
        let state = BoardState::from_string("XX_OO____").unwrap();
        assert_eq!(state.whose_turn(), Some(Player::X));

        let actions = state.legal_actions();
        let positions: Vec<usize> = actions.iter().map(|a| a.position).collect();
        assert_eq!(positions, vec![2, 5, 6, 7, 8]);
        assert!(actions.iter().all(|a| a.player == Player::X));

        let next = state.apply_action(Action::new(Player::X, 2)).unwrap();
        assert_eq!(next.check_outcome(), Some(GameOutcome::Win(Player::X)));
    }
}

mod outcomes {
    use super::*;

    #[test]
    fn empty_board_is_undecided() {
        assert_eq!(initial_state().check_outcome(), None);
    }

    #[test]
    fn full_boards_without_lines_are_draws() {
        let mut draws = 0;
        for state in reachable_states() {
            if state.occupied_count() == 9 && state.winner().is_none() {
                assert_eq!(state.check_outcome(), Some(GameOutcome::Draw));
                draws += 1;
            }
        }
        // Distinct drawn final positions
        assert_eq!(draws, 16);
    }

    #[test]
    fn completing_a_line_wins_for_the_mover() {
        for state in reachable_states() {
            if state.check_outcome().is_some() {
                continue;
            }
            for action in state.legal_actions() {
                let next = state.apply_action(action).unwrap();
                if let Some(GameOutcome::Win(winner)) = next.check_outcome() {
                    assert_eq!(winner, action.player);
                }
            }
        }
    }

    #[test]
    fn terminal_position_counts() {
        let mut x_wins = 0;
        let mut o_wins = 0;
        for state in reachable_states() {
            match state.check_outcome() {
                Some(GameOutcome::Win(Player::X)) => x_wins += 1,
                Some(GameOutcome::Win(Player::O)) => o_wins += 1,
                _ => {}
            }
        }
        assert_eq!(x_wins, 626);
        assert_eq!(o_wins, 316);
    }

    #[test]
    fn double_line_on_final_move() {
        // X X X
        // X O O
        // X O O
        let state = BoardState::from_string("XXXXOOXOO").unwrap();
        assert_eq!(state.whose_turn(), None);
        assert_eq!(state.check_outcome(), Some(GameOutcome::Win(Player::X)));
    }
}
