//! Player slot strategies and their engine-side initialization.
//!
//! Strategies other than `Human` run inside the engine; the client only
//! names them at setup and delegates their turns with an empty `/api/run/`
//! request.

use crate::client::{AgentConfig, EngineApi};
use anyhow::Result;
use clap::ValueEnum;
use std::fmt;
use tracing::info;

/// Named strategy for a player slot, matching the engine's agent catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    /// Moves come from the local selection machine.
    Human,
    /// Engine agent: uniformly random legal move.
    Random,
    /// Engine agent: greedy one-ply evaluation.
    Greedy,
    /// Engine agent: minimax search.
    Minimax,
    /// Engine agent: alpha-beta search.
    AlphaBeta,
    /// Engine agent: beam search.
    BeamSearch,
}

impl Strategy {
    /// Whether this slot is driven by local pointer input.
    pub fn is_human(self) -> bool {
        self == Strategy::Human
    }

    /// The model name the engine resolves to an agent class.
    pub fn model_name(self) -> &'static str {
        match self {
            Strategy::Human => "Human",
            Strategy::Random => "Random",
            Strategy::Greedy => "Greedy",
            Strategy::Minimax => "Minimax",
            Strategy::AlphaBeta => "AlphaBeta",
            Strategy::BeamSearch => "BeamSearch",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.model_name())
    }
}

/// One of the two player slots.
#[derive(Debug, Clone)]
pub struct PlayerSlot {
    /// Engine slot index, 1 (white) or 2 (black).
    pub index: u8,
    /// The slot's strategy.
    pub strategy: Strategy,
    /// Resolved configuration returned by the engine at initialization.
    pub config: Option<AgentConfig>,
}

impl PlayerSlot {
    /// Creates an uninitialized slot.
    pub fn new(index: u8, strategy: Strategy) -> Self {
        Self {
            index,
            strategy,
            config: None,
        }
    }

    /// Registers the slot's strategy with the engine and stores the
    /// resolved configuration.
    pub async fn initialize<C: EngineApi + ?Sized>(&mut self, client: &C) -> Result<()> {
        let config = client
            .init_player(self.index, self.strategy.model_name(), None)
            .await?;
        info!(index = self.index, strategy = %self.strategy, "player slot ready");
        self.config = Some(config);
        Ok(())
    }
}
