//! Click-by-click assembly of a move from the engine's legal templates.
//!
//! The machine never derives legality itself: the current [`ActionTemplate`]
//! list is the sole oracle, and every click only narrows it. Candidate sets
//! are recomputed from scratch after each transition, never patched.

use super::action::{ActionTemplate, SquareSet};
use super::renderer::Rgb;
use super::types::Square;

/// Highlight for squares that may be clicked as a (further) source.
pub const CANDIDATE_SOURCE_HIGHLIGHT: Rgb = (46, 204, 113);
/// Highlight for squares that may be clicked as a (further) target.
pub const CANDIDATE_TARGET_HIGHLIGHT: Rgb = (52, 152, 219);
/// Highlight for squares already chosen.
pub const CHOSEN_HIGHLIGHT: Rgb = (241, 196, 15);

/// Where the machine currently is in assembling a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No source chosen yet.
    Idle,
    /// At least one source chosen, target side not started.
    SelectingSources,
    /// Sources complete, accumulating targets.
    SelectingTargets,
}

/// Result of feeding one click to the machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Re-click of an already chosen square; state unchanged.
    Unchanged,
    /// The selection advanced; highlights should be redrawn.
    Updated,
    /// The click matched nothing legal; the selection was cleared.
    Cancelled,
    /// The selection became a complete, unambiguous move.
    Commit {
        /// Chosen source squares, in click order.
        sources: Vec<Square>,
        /// Chosen target squares, in click order.
        targets: Vec<Square>,
    },
}

/// The selection state machine.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    chosen_sources: Vec<Square>,
    chosen_targets: Vec<Square>,
    candidate_sources: SquareSet,
    candidate_targets: SquareSet,
}

impl Selection {
    /// Creates an idle selection with candidates drawn from `templates`.
    pub fn new(templates: &[ActionTemplate]) -> Self {
        let mut selection = Self::default();
        selection.recompute(templates);
        selection
    }

    /// Clears the selection and repopulates candidates from `templates`.
    /// Called when a fresh legal-action list arrives.
    pub fn reset(&mut self, templates: &[ActionTemplate]) {
        self.chosen_sources.clear();
        self.chosen_targets.clear();
        self.recompute(templates);
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        if self.chosen_sources.is_empty() {
            Phase::Idle
        } else if self.chosen_targets.is_empty() && !self.candidate_sources.is_empty() {
            Phase::SelectingSources
        } else {
            Phase::SelectingTargets
        }
    }

    /// Chosen sources so far, in click order.
    pub fn chosen_sources(&self) -> &[Square] {
        &self.chosen_sources
    }

    /// Chosen targets so far, in click order.
    pub fn chosen_targets(&self) -> &[Square] {
        &self.chosen_targets
    }

    /// Squares currently clickable as a source.
    pub fn candidate_sources(&self) -> &SquareSet {
        &self.candidate_sources
    }

    /// Squares currently clickable as a target.
    pub fn candidate_targets(&self) -> &SquareSet {
        &self.candidate_targets
    }

    /// Feeds one square click to the machine.
    ///
    /// `allow_second` is the modifier flag from the pointer event: it opts
    /// into the entangled cases (a second source for a merge, a second
    /// target for a split). Without it a chosen target commits immediately.
    pub fn on_square_clicked(
        &mut self,
        square: Square,
        allow_second: bool,
        templates: &[ActionTemplate],
    ) -> ClickOutcome {
        // Idempotent re-click.
        if self.chosen_sources.contains(&square) || self.chosen_targets.contains(&square) {
            return ClickOutcome::Unchanged;
        }

        let is_source = self.candidate_sources.contains(square);
        let is_target = self.candidate_targets.contains(square);

        let may_add_source = self.chosen_sources.is_empty()
            || (self.chosen_sources.len() == 1 && allow_second);

        if is_source && may_add_source {
            self.chosen_sources.push(square);
            self.recompute(templates);
            ClickOutcome::Updated
        } else if is_target {
            self.chosen_targets.push(square);
            self.recompute(templates);

            if self.chosen_targets.len() == 2 || self.candidate_targets.is_empty() {
                return self.commit();
            }
            if !allow_second {
                // A single-target template for the chosen squares always
                // exists: split and merge templates are combinations of
                // ordinary single moves.
                return self.commit();
            }
            if let Some(forced) = self.candidate_targets.only() {
                // Only one continuation square remains; take it.
                self.chosen_targets.push(forced);
                return self.commit();
            }
            ClickOutcome::Updated
        } else {
            self.chosen_sources.clear();
            self.chosen_targets.clear();
            self.recompute(templates);
            ClickOutcome::Cancelled
        }
    }

    /// Highlights for the current state, in overlay order: candidate
    /// sources, then candidate targets, then chosen squares (later entries
    /// win on overlap).
    pub fn highlights(&self) -> Vec<(Square, Rgb)> {
        let mut overlays = Vec::new();
        if self.chosen_sources.is_empty() {
            // No selection in progress: nothing to highlight.
            return overlays;
        }
        overlays.extend(
            self.candidate_sources
                .iter()
                .map(|sq| (sq, CANDIDATE_SOURCE_HIGHLIGHT)),
        );
        overlays.extend(
            self.candidate_targets
                .iter()
                .map(|sq| (sq, CANDIDATE_TARGET_HIGHLIGHT)),
        );
        overlays.extend(
            self.chosen_sources
                .iter()
                .chain(self.chosen_targets.iter())
                .map(|sq| (*sq, CHOSEN_HIGHLIGHT)),
        );
        overlays
    }

    fn commit(&mut self) -> ClickOutcome {
        let sources = std::mem::take(&mut self.chosen_sources);
        let targets = std::mem::take(&mut self.chosen_targets);
        self.candidate_sources.clear();
        self.candidate_targets.clear();
        ClickOutcome::Commit { sources, targets }
    }

    /// Recomputes both candidate sets from the template list and the chosen
    /// squares. One uniform rule: every template whose source set contains
    /// the chosen sources contributes its remaining sources while the
    /// source side is incomplete, and its remaining targets once the source
    /// side matches exactly.
    fn recompute(&mut self, templates: &[ActionTemplate]) {
        self.candidate_sources.clear();
        self.candidate_targets.clear();

        for template in templates {
            if !template.sources_contain(&self.chosen_sources) {
                continue;
            }
            if template.sources.len() > self.chosen_sources.len() {
                if self.chosen_targets.is_empty() {
                    self.candidate_sources
                        .extend(template.remaining_sources(&self.chosen_sources));
                }
                continue;
            }
            // Source side complete for this template.
            if !template.targets_contain(&self.chosen_targets) {
                continue;
            }
            if template.targets.len() > self.chosen_targets.len() {
                self.candidate_targets
                    .extend(template.remaining_targets(&self.chosen_targets));
            }
        }
    }
}
