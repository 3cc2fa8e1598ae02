//! Behaviour of the minimax engine on known positions and in full games

use noughts::{
    pipeline::{
        Agent, MinimaxAgent, OpponentKind, RandomAgent, SimulationConfig, SimulationPipeline,
    },
    search::{Minimax, SearchResult, TieBreak, choose_move, score_state},
    tictactoe::{Action, BoardState, GameOutcome, Player, initial_state},
};

fn self_play(tie_break: TieBreak) -> (BoardState, Option<GameOutcome>) {
    let engine = Minimax::new(tie_break);
    let mut state = initial_state();
    while state.check_outcome().is_none() {
        let action = engine.choose_move(&state).unwrap();
        assert!(state.is_empty(action.position));
        state = state.apply_action(action).unwrap();
    }
    (state, state.check_outcome())
}

#[test]
fn perfect_self_play_is_a_draw() {
    for tie_break in [TieBreak::ActionOrder, TieBreak::Depth] {
        let (final_state, outcome) = self_play(tie_break);
        assert_eq!(
            outcome,
            Some(GameOutcome::Draw),
            "self-play with {tie_break} ended as {final_state}"
        );
    }
}

#[test]
fn empty_board_is_a_draw_under_perfect_play() {
    assert_eq!(score_state(&initial_state(), 0).score, 0);
}

#[test]
fn engine_reply_to_every_opening_is_legal_and_holds() {
    for opening in 0..9 {
        let state = initial_state().play(opening).unwrap();
        let action = choose_move(&state).unwrap();
        assert_eq!(action.player, Player::O);
        assert_ne!(action.position, opening);
        assert!(state.is_empty(action.position));

        let after = state.apply_action(action).unwrap();
        assert!(
            score_state(&after, 0).score <= 0,
            "reply {action} to opening {opening} loses"
        );
    }
}

#[test]
fn engine_takes_immediate_win_over_block() {
    // X X _
    // O O _
    // X _ _
    let state = BoardState::from_string("XX_OO_X__").unwrap();
    assert_eq!(state.whose_turn(), Some(Player::O));

    let action = choose_move(&state).unwrap();
    assert_eq!(action, Action::new(Player::O, 5));
}

#[test]
fn engine_blocks_open_threat() {
    // X _ _
    // _ O _
    // X _ _
    let state = BoardState::from_string("X___O_X__").unwrap();
    let action = choose_move(&state).unwrap();
    assert_eq!(action, Action::new(Player::O, 3));
}

#[test]
fn depth_grows_one_move_before_a_forced_win() {
    let winning = BoardState::from_string("XX_OO_X__")
        .unwrap()
        .play(5)
        .unwrap();
    assert_eq!(winning.check_outcome(), Some(GameOutcome::Win(Player::O)));

    let before = BoardState::from_string("XX_OO_X__").unwrap();
    let before_result = score_state(&before, 0);
    let winning_result = score_state(&winning, 0);

    assert_eq!(before_result.score, -1);
    assert_eq!(winning_result, SearchResult::new(-1, 0));
    assert!(before_result.depth > winning_result.depth);
}

#[test]
fn depth_policy_delays_a_forced_loss() {
    // O to move and lost: blocking 8 only postpones X's fork at 6.
    // X O _
    // _ X _
    // _ _ _
    let state = BoardState::from_string("XO__X____").unwrap();
    assert_eq!(state.whose_turn(), Some(Player::O));

    let delaying = Minimax::new(TieBreak::Depth).decide(&state).unwrap();
    assert_eq!(delaying.action, Action::new(Player::O, 8));
    assert_eq!(delaying.result, SearchResult::new(1, 4));

    let faithful = Minimax::new(TieBreak::ActionOrder).decide(&state).unwrap();
    assert_eq!(faithful.result.score, 1);
}

#[test]
fn engine_never_loses_to_random_x() {
    let config = SimulationConfig {
        num_games: 40,
        seed: Some(2024),
        opponent: OpponentKind::Random,
        engine_player: Player::O,
        tie_break: TieBreak::ActionOrder,
    };
    let mut engine = MinimaxAgent::new("Minimax".to_string(), config.tie_break);
    let mut opponent = RandomAgent::with_seed("Random".to_string(), 0);

    let result = SimulationPipeline::new(config)
        .run_with(&mut engine, &mut opponent)
        .unwrap();

    assert_eq!(result.total_games, 40);
    assert_eq!(result.losses, 0);
    assert_eq!(result.wins + result.draws, 40);
    assert!(result.wins > 0, "random play should lose at least once");
}

#[test]
fn engine_as_x_never_loses_to_random_o() {
    let config = SimulationConfig {
        num_games: 4,
        seed: Some(99),
        opponent: OpponentKind::Random,
        engine_player: Player::X,
        tie_break: TieBreak::Depth,
    };
    let result = SimulationPipeline::new(config).run().unwrap();
    assert_eq!(result.losses, 0);
    for game in &result.games {
        assert_eq!(game.moves[0].player, Player::X);
    }
}

#[test]
fn seeded_random_agent_is_reproducible_across_runs() {
    let config = SimulationConfig {
        num_games: 5,
        seed: Some(7),
        opponent: OpponentKind::Random,
        ..SimulationConfig::default()
    };
    let first = SimulationPipeline::new(config.clone()).run().unwrap();
    let second = SimulationPipeline::new(config).run().unwrap();

    let moves = |r: &noughts::pipeline::SimulationResult| -> Vec<Vec<usize>> {
        r.games
            .iter()
            .map(|g| g.moves.iter().map(|a| a.position).collect())
            .collect()
    };
    assert_eq!(moves(&first), moves(&second));
}

#[test]
fn minimax_agent_refuses_finished_game() {
    let mut agent = MinimaxAgent::new("Minimax".to_string(), TieBreak::default());
    let won = BoardState::from_string("XXXOO____").unwrap();
    assert!(matches!(
        agent.select_action(&won),
        Err(noughts::Error::GameOver)
    ));
}
