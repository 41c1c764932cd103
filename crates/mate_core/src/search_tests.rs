use super::*;
use cozy_chess::Move;

/// Back-rank mate: Ra8#
const BACK_RANK_MATE_IN_1: &str = "6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1";
/// Smothered mate: Qg8+ Rxg8 Nf7#
const SMOTHERED_MATE_IN_2: &str = "3r3k/6pp/7N/8/8/1Q6/8/6K1 w - - 0 1";
/// Black already mated, black to move
const MATED: &str = "R5k1/5ppp/8/8/8/8/8/6K1 b - - 1 1";
const STALEMATE: &str = "k7/2K5/1Q6/8/8/8/8/8 b - - 0 1";
/// Black to move: a7 pawn moves allow Rb8#, but Kg8 and the g/h pawn moves escape
const DEFENDER_CAN_ESCAPE: &str = "7k/p5pp/8/8/8/8/8/1R4K1 b - - 0 1";
/// Black to move: only a6 or a5, and both allow Rb8#
const DEFENDER_ALWAYS_MATED: &str = "7k/p4K1p/7P/8/8/8/8/1R6 b - - 0 1";

fn pos(fen: &str) -> Position {
    Position::from_fen(fen).expect("test FEN should parse")
}

/// Replay a SAN line from `pos` and report whether it ends in checkmate.
fn replays_to_mate(pos: &mut Position, line: &[String]) -> bool {
    match line.split_first() {
        None => pos.state() == GameState::Checkmate,
        Some((san, rest)) => {
            let Some(mv) = pos.legal_moves().into_iter().find(|&mv| pos.san(mv) == *san) else {
                return false;
            };
            let mut child = pos.play(mv);
            replays_to_mate(&mut child, rest)
        }
    }
}

#[test]
fn test_plies_for_mate() {
    assert_eq!(plies_for_mate(1), Ok(1));
    assert_eq!(plies_for_mate(4), Ok(7));
    assert_eq!(plies_for_mate(MAX_MATE_IN), Ok(253));
    assert_eq!(plies_for_mate(0), Err(SearchError::InvalidMateDistance(0)));
    assert_eq!(
        plies_for_mate(MAX_MATE_IN + 1),
        Err(SearchError::InvalidMateDistance(MAX_MATE_IN + 1))
    );
}

#[test]
fn test_back_rank_mate_in_one() {
    let mut pos = pos(BACK_RANK_MATE_IN_1);
    let line = find_mate(&mut pos, 1).unwrap();
    assert_eq!(line.outcome, Outcome::ForcedMate);
    assert_eq!(line.moves, vec!["Ra8#".to_string()]);
}

#[test]
fn test_startpos_has_no_mate_in_one() {
    let mut pos = Position::startpos();
    let line = find_mate(&mut pos, 1).unwrap();
    assert_eq!(line.outcome, Outcome::NoForcedMate);
    assert!(line.moves.is_empty());
}

#[test]
fn test_startpos_has_no_mate_in_two() {
    let mut pos = Position::startpos();
    let line = find_mate(&mut pos, 2).unwrap();
    assert!(!line.is_mate());
    assert!(line.moves.is_empty());
}

#[test]
fn test_smothered_mate_in_two() {
    let mut pos = pos(SMOTHERED_MATE_IN_2);

    let short = find_mate(&mut pos, 1).unwrap();
    assert_eq!(short.outcome, Outcome::NoForcedMate, "no mate in one here");

    let line = find_mate(&mut pos, 2).unwrap();
    assert_eq!(line.outcome, Outcome::ForcedMate);
    assert_eq!(line.moves.len(), 3, "line {:?}", line.moves);
    assert!(line.moves[2].ends_with('#'), "line {:?}", line.moves);
    assert!(
        replays_to_mate(&mut pos, &line.moves),
        "line {:?} should replay to checkmate",
        line.moves
    );
}

#[test]
fn test_shorter_mate_is_not_padded() {
    // Only Ra8# mates; any other first move lets Black make luft
    let mut pos = pos(BACK_RANK_MATE_IN_1);
    let line = find_mate(&mut pos, 2).unwrap();
    assert!(line.is_mate());
    assert_eq!(line.moves, vec!["Ra8#".to_string()]);
}

#[test]
fn test_terminal_checkmate_belongs_to_previous_mover() {
    let mut pos = pos(MATED);
    // Defender to move and mated: the attacker just delivered it
    let line = search(&mut pos, 0, false);
    assert_eq!(line.outcome, Outcome::ForcedMate);
    assert!(line.moves.is_empty());

    // Attacker to move and mated: no forced mate for the attacker
    let line = search(&mut pos, 3, true);
    assert_eq!(line.outcome, Outcome::NoForcedMate);
}

#[test]
fn test_stalemate_and_zero_depth_are_dead_ends() {
    let mut stalemate = pos(STALEMATE);
    assert!(!search(&mut stalemate, 5, false).is_mate());
    assert!(!search(&mut stalemate, 5, true).is_mate());

    let mut pos = pos(BACK_RANK_MATE_IN_1);
    assert!(!search(&mut pos, 0, true).is_mate());
}

/// Whether playing `mv` leaves the attacker a mate within `depth` plies.
fn reply_is_mated(pos: &mut Position, mv: Move, depth: u8) -> bool {
    let mut child = pos.play(mv);
    search(&mut child, depth, true).is_mate()
}

fn find_san(pos: &Position, san: &str) -> Move {
    pos.legal_moves()
        .into_iter()
        .find(|&mv| pos.san(mv) == san)
        .unwrap_or_else(|| panic!("{san} should be legal in {pos}"))
}

#[test]
fn test_defender_escapes_with_a_later_reply() {
    let mut pos = pos(DEFENDER_CAN_ESCAPE);

    // Pawn replies come first in generation order and lose to Rb8#
    let mated = find_san(&pos, "a6");
    assert!(reply_is_mated(&mut pos, mated, 1));
    let escape = find_san(&pos, "Kg8");
    assert!(!reply_is_mated(&mut pos, escape, 1));

    let line = search(&mut pos, 2, false);
    assert_eq!(line.outcome, Outcome::NoForcedMate);
    assert!(line.moves.is_empty());
    assert_eq!(pos.fen(), DEFENDER_CAN_ESCAPE);
}

#[test]
fn test_defender_mated_after_every_reply() {
    let mut pos = pos(DEFENDER_ALWAYS_MATED);
    let replies = pos.legal_moves();
    assert_eq!(replies.len(), 2, "only the a-pawn can move");
    for &mv in &replies {
        assert!(reply_is_mated(&mut pos, mv, 1), "{} should lose", pos.san(mv));
    }

    // The line goes through the last reply examined
    let last = replies[replies.len() - 1];
    let line = search(&mut pos, 2, false);
    assert_eq!(line.outcome, Outcome::ForcedMate);
    assert_eq!(line.moves, vec![pos.san(last), "Rb8#".to_string()]);
}

#[test]
fn test_search_leaves_position_untouched() {
    for fen in [BACK_RANK_MATE_IN_1, SMOTHERED_MATE_IN_2, MATED, STALEMATE] {
        let mut pos = pos(fen);
        let fen_before = pos.fen();
        let moves_before = pos.legal_moves();

        let _ = find_mate(&mut pos, 2).unwrap();

        assert_eq!(pos.fen(), fen_before);
        assert_eq!(pos.legal_moves(), moves_before);
        assert_eq!(pos.ply(), 0);
    }

    let mut pos = Position::startpos();
    let _ = find_mate(&mut pos, 2).unwrap();
    assert_eq!(pos.fen(), Position::startpos().fen());
}

#[test]
fn test_search_is_deterministic() {
    let mut pos = pos(SMOTHERED_MATE_IN_2);
    let mut searcher = MateSearcher::new();

    let first = searcher.find_mate(&mut pos, 2).unwrap();
    let first_nodes = searcher.nodes();
    let second = searcher.find_mate(&mut pos, 2).unwrap();

    assert_eq!(first, second);
    assert_eq!(searcher.nodes(), first_nodes, "node count resets per search");
    assert!(first_nodes > 1);
}

#[test]
fn test_invalid_mate_distance() {
    let mut pos = Position::startpos();
    assert_eq!(
        find_mate(&mut pos, 0),
        Err(SearchError::InvalidMateDistance(0))
    );
}
