//! Tests for the click-by-click move selection machine.

use qchess_tui::game::selection::{
    CANDIDATE_SOURCE_HIGHLIGHT, CANDIDATE_TARGET_HIGHLIGHT, CHOSEN_HIGHLIGHT,
};
use qchess_tui::game::{ActionTemplate, ClickOutcome, Phase, Selection, Square, SquareSet};

fn sq(file: u8, rank: u8) -> Square {
    Square::new(file, rank)
}

fn tpl(sources: &[(u8, u8)], targets: &[(u8, u8)]) -> ActionTemplate {
    ActionTemplate::new(
        sources.iter().map(|&(f, r)| sq(f, r)).collect(),
        targets.iter().map(|&(f, r)| sq(f, r)).collect(),
    )
}

/// A pawn with a single push, a double push, and the split over both,
/// plus a knight move, plus a merge of two superposed rooks.
fn templates() -> Vec<ActionTemplate> {
    vec![
        tpl(&[(5, 2)], &[(5, 3)]),
        tpl(&[(5, 2)], &[(5, 4)]),
        tpl(&[(5, 2)], &[(5, 3), (5, 4)]),
        tpl(&[(2, 1)], &[(3, 3)]),
        tpl(&[(4, 4)], &[(4, 5)]),
        tpl(&[(6, 4)], &[(6, 5)]),
        tpl(&[(4, 4), (6, 4)], &[(5, 5)]),
    ]
}

#[test]
fn test_initial_candidates_cover_all_sources() {
    let templates = templates();
    let selection = Selection::new(&templates);
    assert_eq!(selection.phase(), Phase::Idle);
    for square in [sq(5, 2), sq(2, 1), sq(4, 4), sq(6, 4)] {
        assert!(selection.candidate_sources().contains(square));
    }
    assert!(selection.candidate_targets().is_empty());
}

#[test]
fn test_source_click_reveals_targets() {
    let templates = templates();
    let mut selection = Selection::new(&templates);
    let outcome = selection.on_square_clicked(sq(5, 2), false, &templates);
    assert_eq!(outcome, ClickOutcome::Updated);
    assert!(selection.candidate_targets().contains(sq(5, 3)));
    assert!(selection.candidate_targets().contains(sq(5, 4)));
    assert_eq!(selection.phase(), Phase::SelectingTargets);
}

#[test]
fn test_re_click_is_idempotent() {
    let templates = templates();
    let mut selection = Selection::new(&templates);
    selection.on_square_clicked(sq(5, 2), false, &templates);
    let before = selection.candidate_targets().clone();
    let outcome = selection.on_square_clicked(sq(5, 2), false, &templates);
    assert_eq!(outcome, ClickOutcome::Unchanged);
    assert_eq!(selection.candidate_targets(), &before);
    assert_eq!(selection.chosen_sources(), &[sq(5, 2)]);
}

#[test]
fn test_unmatched_click_cancels() {
    let templates = templates();
    let mut selection = Selection::new(&templates);
    selection.on_square_clicked(sq(5, 2), false, &templates);
    let outcome = selection.on_square_clicked(sq(1, 1), false, &templates);
    assert_eq!(outcome, ClickOutcome::Cancelled);
    assert!(selection.chosen_sources().is_empty());
    // Candidates are back to the full source list.
    assert!(selection.candidate_sources().contains(sq(2, 1)));
    assert!(selection.candidate_targets().is_empty());
}

#[test]
fn test_plain_target_click_commits() {
    let templates = templates();
    let mut selection = Selection::new(&templates);
    selection.on_square_clicked(sq(5, 2), false, &templates);
    let outcome = selection.on_square_clicked(sq(5, 3), false, &templates);
    assert_eq!(
        outcome,
        ClickOutcome::Commit {
            sources: vec![sq(5, 2)],
            targets: vec![sq(5, 3)],
        }
    );
    assert_eq!(selection.phase(), Phase::Idle);
    assert!(selection.candidate_sources().is_empty());
}

#[test]
fn test_modifier_target_click_selects_split() {
    let templates = templates();
    let mut selection = Selection::new(&templates);
    selection.on_square_clicked(sq(5, 2), false, &templates);
    // With the modifier held, the remaining split square is forced.
    let outcome = selection.on_square_clicked(sq(5, 3), true, &templates);
    assert_eq!(
        outcome,
        ClickOutcome::Commit {
            sources: vec![sq(5, 2)],
            targets: vec![sq(5, 3), sq(5, 4)],
        }
    );
}

#[test]
fn test_merge_needs_modifier_for_second_source() {
    let templates = templates();
    let mut selection = Selection::new(&templates);
    selection.on_square_clicked(sq(4, 4), false, &templates);
    assert!(selection.candidate_sources().contains(sq(6, 4)));

    // Without the modifier the second rook square is not a target, so
    // the click cancels the selection.
    let outcome = selection.on_square_clicked(sq(6, 4), false, &templates);
    assert_eq!(outcome, ClickOutcome::Cancelled);
}

#[test]
fn test_merge_commits_through_shared_target() {
    let templates = templates();
    let mut selection = Selection::new(&templates);
    selection.on_square_clicked(sq(4, 4), false, &templates);
    let outcome = selection.on_square_clicked(sq(6, 4), true, &templates);
    assert_eq!(outcome, ClickOutcome::Updated);
    // Two sources chosen: only the merge template remains.
    assert!(selection.candidate_targets().contains(sq(5, 5)));
    assert_eq!(selection.candidate_targets().len(), 1);

    let outcome = selection.on_square_clicked(sq(5, 5), false, &templates);
    assert_eq!(
        outcome,
        ClickOutcome::Commit {
            sources: vec![sq(4, 4), sq(6, 4)],
            targets: vec![sq(5, 5)],
        }
    );
}

#[test]
fn test_merge_source_order_does_not_matter() {
    let templates = templates();
    let mut selection = Selection::new(&templates);
    selection.on_square_clicked(sq(6, 4), false, &templates);
    selection.on_square_clicked(sq(4, 4), true, &templates);
    assert!(selection.candidate_targets().contains(sq(5, 5)));
}

#[test]
fn test_reset_repopulates_candidates() {
    let templates = templates();
    let mut selection = Selection::new(&templates);
    selection.on_square_clicked(sq(5, 2), false, &templates);
    selection.on_square_clicked(sq(5, 3), false, &templates);

    let next = vec![tpl(&[(3, 3)], &[(3, 4)])];
    selection.reset(&next);
    assert_eq!(selection.phase(), Phase::Idle);
    assert!(selection.candidate_sources().contains(sq(3, 3)));
    assert_eq!(selection.candidate_sources().len(), 1);
}

#[test]
fn test_highlights_empty_without_selection() {
    let templates = templates();
    let selection = Selection::new(&templates);
    assert!(selection.highlights().is_empty());
}

#[test]
fn test_highlights_layer_chosen_on_top() {
    let templates = templates();
    let mut selection = Selection::new(&templates);
    selection.on_square_clicked(sq(5, 2), false, &templates);
    let overlays = selection.highlights();
    assert!(overlays.contains(&(sq(5, 3), CANDIDATE_TARGET_HIGHLIGHT)));
    // The chosen square comes last so it wins on overlap.
    assert_eq!(overlays.last(), Some(&(sq(5, 2), CHOSEN_HIGHLIGHT)));

    selection.reset(&templates);
    selection.on_square_clicked(sq(4, 4), false, &templates);
    let overlays = selection.highlights();
    assert!(overlays.contains(&(sq(6, 4), CANDIDATE_SOURCE_HIGHLIGHT)));
}

#[test]
fn test_square_set_algebra() {
    let a: SquareSet = [sq(1, 1), sq(2, 2), sq(3, 3)].into_iter().collect();
    let b: SquareSet = [sq(2, 2)].into_iter().collect();

    assert!(a.contains_all(&b));
    assert!(!b.contains_all(&a));
    assert_eq!(a.difference(&a), SquareSet::new());
    assert_eq!(a.union(&b), a);
    assert_eq!(a.difference(&b).len(), 2);
    assert_eq!(b.only(), Some(sq(2, 2)));
    assert_eq!(a.only(), None);
}

#[test]
fn test_template_matching_is_order_insensitive() {
    let template = tpl(&[(4, 4), (6, 4)], &[(5, 5)]);
    assert!(template.sources_contain(&[sq(6, 4), sq(4, 4)]));
    assert!(template.sources_contain(&[sq(6, 4)]));
    assert!(!template.sources_contain(&[sq(6, 4), sq(1, 1)]));
    let remaining: Vec<Square> = template.remaining_sources(&[sq(6, 4)]).collect();
    assert_eq!(remaining, vec![sq(4, 4)]);
}
