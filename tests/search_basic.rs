use pretty_assertions::assert_eq;
use searchkit::board::{Board, BoardState, Cell, Player, Square};
use searchkit::io::{parse_input, InputError};
use searchkit::search::eval::{Evaluator, RowWeights, KING_FACTOR, MAX_ROW_WEIGHT};
use searchkit::search::{alphabeta, minimax, search, Algorithm, Decision, SearchParams};

fn sq(s: &str) -> Square { s.parse().expect("valid square") }

fn one_each() -> Board {
    let mut b = Board::empty();
    b.set(sq("C2"), Cell::Man(Player::Star));
    b.set(sq("F7"), Cell::Man(Player::Circle));
    b
}

// Only the row one step from each side's home row counts.
fn second_row_only() -> RowWeights { RowWeights([0, 1, 0, 0, 0, 0, 0, 0]) }

#[test]
fn evaluator_sign_follows_maximizing_player() {
    let mut b = Board::empty();
    b.set(sq("C2"), Cell::Man(Player::Star));
    b.set(sq("F8"), Cell::Man(Player::Circle));
    assert_eq!(Evaluator::new(second_row_only(), Player::Star).evaluate(&b), 1);
    assert_eq!(Evaluator::new(second_row_only(), Player::Circle).evaluate(&b), -1);
}

#[test]
fn kings_count_double() {
    let mut b = Board::empty();
    b.set(sq("C2"), Cell::King(Player::Star));
    assert_eq!(Evaluator::new(second_row_only(), Player::Star).evaluate(&b), 2);
}

#[test]
fn depth_one_picks_best_static_move() {
    for max in [Player::Star, Player::Circle] {
        let root = BoardState::new(one_each(), max);
        let eval = Evaluator::new(RowWeights([0, 0, 1, 0, 0, 0, 0, 0]), max);
        // brute force: first move with the highest static value
        let mut expected: Option<(String, i32)> = None;
        for m in root.legal_moves() {
            let v = eval.evaluate(root.apply(&m).board());
            if expected.as_ref().map_or(true, |(_, best)| v > *best) { expected = Some((m.to_string(), v)); }
        }
        let (mv, value) = expected.expect("moves exist");
        for algorithm in [Algorithm::Minimax, Algorithm::AlphaBeta] {
            let res = search(&root, &eval, SearchParams { algorithm, depth: 1 });
            assert_eq!(res.decision.notation(), mv, "{max} {algorithm}");
            assert_eq!(res.decision.myopic(), value);
            assert_eq!(res.decision.farsighted(), value);
        }
    }
}

#[test]
fn depth_zero_is_pass_with_root_value() {
    let mut b = Board::empty();
    b.set(sq("C2"), Cell::Man(Player::Star));
    b.set(sq("D6"), Cell::Man(Player::Circle));
    let root = BoardState::new(b, Player::Star);
    let eval = Evaluator::new(RowWeights([0, 0, 5, 0, 0, 0, 0, 0]), Player::Star);
    // Circle's man on D6 is two rows from home, Star's on C2 only one.
    assert_eq!(eval.evaluate(root.board()), -5);
    for algorithm in [Algorithm::Minimax, Algorithm::AlphaBeta] {
        let res = search(&root, &eval, SearchParams { algorithm, depth: 0 });
        assert_eq!(res.decision, Decision::Pass { utility: -5 });
        assert_eq!(res.nodes, 1);
    }
}

#[test]
fn no_legal_move_at_root_passes() {
    let mut b = Board::empty();
    b.set(sq("A8"), Cell::Man(Player::Star)); // on its promotion row, yet still a man: no forward square
    b.set(sq("H1"), Cell::Man(Player::Circle));
    let root = BoardState::new(b, Player::Star);
    let eval = Evaluator::new(RowWeights([1, 1, 1, 1, 1, 1, 1, 1]), Player::Star);
    let mm = minimax::search(&root, &eval, 3);
    let ab = alphabeta::search(&root, &eval, 3);
    assert_eq!(mm.decision, Decision::Pass { utility: 0 });
    assert_eq!(mm.decision.notation(), "pass");
    assert_eq!(ab, mm);
}

#[test]
fn forced_capture_is_taken() {
    let mut b = Board::empty();
    b.set(sq("C3"), Cell::Man(Player::Star));
    b.set(sq("G3"), Cell::Man(Player::Star));
    b.set(sq("D4"), Cell::Man(Player::Circle));
    let root = BoardState::new(b, Player::Star);
    let eval = Evaluator::new(RowWeights([1, 2, 3, 4, 5, 6, 7, 8]), Player::Star);
    let res = alphabeta::search(&root, &eval, 2);
    let mv = res.decision.best_move().expect("a move");
    assert_eq!(mv.to_string(), "C3-E5");
    assert_eq!(mv.captured, vec![sq("D4")]);
}

#[test]
fn myopic_matches_state_after_chosen_move() {
    let root = BoardState::startpos(Player::Circle);
    let eval = Evaluator::new(RowWeights([0, 3, 1, 4, 1, 5, 9, 2]), Player::Circle);
    let res = minimax::search(&root, &eval, 3);
    let Decision::Move { mv, myopic, .. } = &res.decision else { panic!("start position has moves") };
    let child = root.apply(mv);
    assert_eq!(eval.evaluate(child.board()), *myopic);
    assert_eq!(child.last_move(), Some(mv));
}

fn opening_input(weights: &str) -> String {
    format!("Star\nMINIMAX\n1\n{}{}\n", Board::starting(), weights)
}

#[test]
fn huge_row_weights_are_rejected_before_search() {
    let text = opening_input("1000000000,1000000000,1000000000,0,0,0,0,0");
    assert_eq!(parse_input(&text).err(), Some(InputError::WeightOutOfRange(1_000_000_000)));
}

#[test]
fn extreme_accepted_weights_search_without_overflow() {
    let w = MAX_ROW_WEIGHT;
    let input = parse_input(&opening_input(&format!("{w},{},{w},{},{w},{},{w},{}", -w, -w, -w, -w))).expect("weights at the bound");
    let root = input.root();
    let eval = input.evaluator();
    let mm = minimax::search(&root, &eval, 3);
    let ab = alphabeta::search(&root, &eval, 3);
    assert_eq!(ab.decision, mm.decision);

    // Every square a king at the largest weight: no moves, and the total still fits.
    let full = Board::from_cells([[Cell::King(Player::Star); 8]; 8]);
    let eval = Evaluator::new(RowWeights([w; 8]), Player::Circle);
    let res = search(&BoardState::new(full, Player::Star), &eval, SearchParams { algorithm: Algorithm::AlphaBeta, depth: 4 });
    assert_eq!(res.decision, Decision::Pass { utility: -64 * KING_FACTOR * w });
}
