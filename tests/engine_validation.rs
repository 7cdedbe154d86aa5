//! End-to-end validation of the engine contracts: terminal behavior, the
//! evaluation symmetry guarantees, move-ordering, and a full orchestrated
//! session driving both personalities.

use adaptive_chess_engine::{
    evaluation, AdaptiveEngine, AnyEngine, GameSession, HyperbolicConfig, HyperbolicEngine, Player,
};
use chess::{Board, MoveGen};
use std::str::FromStr;

const STALEMATE_FEN: &str = "7k/5Q2/8/8/8/8/8/K7 b - - 0 1";
const FOOLS_MATE_FEN: &str = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3";

#[test]
fn no_legal_moves_means_no_move_for_either_engine() {
    for fen in [STALEMATE_FEN, FOOLS_MATE_FEN] {
        let board = Board::from_str(fen).unwrap();
        assert_eq!(MoveGen::new_legal(&board).len(), 0, "fixture {}", fen);

        let mut adaptive = AdaptiveEngine::with_seed(1);
        assert_eq!(adaptive.choose_move(&board), None);

        let mut hyperbolic = HyperbolicEngine::with_seed(HyperbolicConfig::default(), 1);
        assert_eq!(hyperbolic.choose_move(&board), None);
    }
}

#[test]
fn adaptive_evaluation_is_antisymmetric_under_color_swap() {
    // With style unknown the evaluation is pure material, so a position and
    // its color-mirrored counterpart score as exact negatives.
    let engine = AdaptiveEngine::with_seed(1);
    let pairs = [
        ("4k3/8/8/8/8/8/8/R3K3 w - - 0 1", "r3k3/8/8/8/8/8/8/4K3 b - - 0 1"),
        (
            "4k3/pppp4/8/8/8/8/2Q5/4K3 w - - 0 1",
            "4k3/2q5/8/8/8/8/PPPP4/4K3 b - - 0 1",
        ),
    ];
    for (fen, mirrored_fen) in pairs {
        let board = Board::from_str(fen).unwrap();
        let mirrored = Board::from_str(mirrored_fen).unwrap();
        let eval = engine.evaluate_board(&board);
        let mirrored_eval = engine.evaluate_board(&mirrored);
        assert!(
            (eval + mirrored_eval).abs() < 1e-6,
            "{} vs {}: {} and {}",
            fen,
            mirrored_fen,
            eval,
            mirrored_eval
        );
    }
}

#[test]
fn move_ordering_ranks_promotions_captures_checks_quiet() {
    // White has promotions on a8, the capture exd7, the check Rh8+, and
    // plenty of quiet moves all in one position.
    let board = Board::from_str("4k3/P2p4/4P3/8/8/8/8/K6R w - - 0 1").unwrap();
    let mut moves: Vec<_> = MoveGen::new_legal(&board).collect();
    moves.sort_by(|a, b| {
        evaluation::move_heuristic(&board, *b)
            .partial_cmp(&evaluation::move_heuristic(&board, *a))
            .unwrap()
    });

    let scores: Vec<f32> = moves
        .iter()
        .map(|&mv| evaluation::move_heuristic(&board, mv))
        .collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]), "not sorted: {:?}", scores);

    // Promotions (15) lead, the pawn capture (11) follows, the rook check
    // (5) sits above every quiet move (0)
    assert_eq!(scores[0], 15.0);
    assert!(scores.contains(&11.0));
    assert!(scores.contains(&5.0));
    assert_eq!(*scores.last().unwrap(), 0.0);
    let capture_at = scores.iter().position(|&s| s == 11.0).unwrap();
    let check_at = scores.iter().position(|&s| s == 5.0).unwrap();
    let quiet_at = scores.iter().position(|&s| s == 0.0).unwrap();
    assert!(capture_at < check_at && check_at < quiet_at);
}

#[test]
fn opening_move_is_always_legal() {
    let board = Board::default();
    for seed in 0..20 {
        let mut engine = AdaptiveEngine::with_seed(seed);
        engine.set_skill_estimate(9.0);
        let san = engine.choose_move(&board).expect("opening move");
        assert!(
            adaptive_chess_engine::parse_san(&board, &san).is_some(),
            "seed {} produced illegal move {}",
            seed,
            san
        );
    }
}

#[test]
fn orchestrated_session_runs_both_personalities() {
    let mut session = GameSession::new(
        AnyEngine::Adaptive(AdaptiveEngine::with_seed(3)),
        Player::White,
    );
    let mut opponent =
        HyperbolicEngine::with_seed(HyperbolicConfig { temperature: 1.0, risk_factor: 1.0 }, 4);

    for _ in 0..4 {
        if session.is_over() {
            break;
        }
        let record = session.play_engine_move().unwrap();
        let Some(record) = record else { break };
        assert_eq!(record.player, Player::White);
        assert!(record.evaluation.is_finite());

        if session.is_over() {
            break;
        }
        let position = session.position();
        let Some(reply) = opponent.choose_move(&position) else {
            break;
        };
        let record = session.apply_opponent_move(&reply, 0.5).unwrap();
        assert_eq!(record.player, Player::Black);
    }

    assert!(!session.records().is_empty());
    let estimate = session.skill_estimate();
    assert!((1.0..=10.0).contains(&estimate), "estimate {}", estimate);

    // Records alternate strictly and were never reordered
    for pair in session.records().windows(2) {
        assert_ne!(pair[0].player, pair[1].player);
    }
}

#[test]
fn session_records_serialize_to_json() {
    let mut session = GameSession::new(
        AnyEngine::Adaptive(AdaptiveEngine::with_seed(5)),
        Player::Black,
    );
    session.apply_opponent_move("d4", 2.0).unwrap();
    session.play_engine_move().unwrap();

    let json = serde_json::to_string(session.records()).unwrap();
    assert!(json.contains("\"san\":\"d4\""));
    assert!(json.contains("\"player\":\"White\""));
}
