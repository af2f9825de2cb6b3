//! Typed HTTP client for the remote quantum chess engine.
//!
//! The engine owns all rules, legality and search; this client only moves
//! the REST shapes back and forth. Failures come back as `anyhow` errors
//! with enough context for the turn loop to surface them.

use crate::game::{ActionTemplate, Board, CapturePools, Piece, Placement, Square, Winner};
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, info, instrument};

/// Raw reply shapes and their decoding into domain types.
pub mod wire {
    use super::*;
    use crate::game::{Color, PieceName};

    /// The `chessboard` map as the engine sends it: `"<file><rank>"` keys
    /// mapping to `[color, name, occupancy]` triples.
    pub type BoardMap = HashMap<String, (Color, PieceName, f64)>;

    /// Reply to `/api/run/`.
    #[derive(Debug, Deserialize)]
    pub struct MoveReply {
        /// Updated board.
        pub chessboard: BoardMap,
        /// Updated capture pools.
        pub dead: CapturePools,
        /// Human-readable move record.
        pub record: String,
        /// 0 ongoing, 1 white, 2 black, -1 draw.
        pub game_over: i8,
    }

    /// Reply to `/api/undo/` and `/api/load/{id}/`.
    #[derive(Debug, Deserialize)]
    pub struct BoardReply {
        /// Board after the operation.
        pub chessboard: BoardMap,
        /// Capture pools after the operation.
        pub dead: CapturePools,
    }

    /// Decodes the engine's board map into a [`Board`].
    pub fn decode_board(map: &BoardMap) -> Result<Board> {
        map.iter()
            .map(|(key, (color, name, occupancy))| {
                let square = decode_square_key(key)
                    .with_context(|| format!("bad board key {key:?}"))?;
                Ok((
                    square,
                    Piece {
                        color: *color,
                        name: *name,
                        occupancy: *occupancy,
                    },
                ))
            })
            .collect()
    }

    /// Decodes a `"<file><rank>"` key into a square.
    pub fn decode_square_key(key: &str) -> Result<Square> {
        let mut digits = key.chars().map(|c| c.to_digit(10));
        let (file, rank) = match (digits.next(), digits.next(), digits.next()) {
            (Some(Some(file)), Some(Some(rank)), None) => (file as u8, rank as u8),
            _ => bail!("expected two digits"),
        };
        let square = Square::new(file, rank);
        if !square.in_bounds() {
            bail!("square {square} out of bounds");
        }
        Ok(square)
    }
}

/// A committed move as returned by the engine.
#[derive(Debug, Clone)]
pub struct MoveOutcome {
    /// The new board.
    pub board: Board,
    /// The new capture pools.
    pub captured: CapturePools,
    /// Human-readable move record.
    pub record: String,
    /// Game-over indicator.
    pub winner: Winner,
}

/// Resolved configuration of an engine-side agent. Per base key the map may
/// carry `<key>.optional` (allowed string values) or `<key>.range`
/// (`[min, max]`) companions describing the editable domain.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AgentConfig(pub serde_json::Map<String, Value>);

impl AgentConfig {
    /// The current value of `key`, if present.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Allowed string values for `key`, from its `.optional` companion.
    pub fn options(&self, key: &str) -> Option<Vec<String>> {
        self.0.get(&format!("{key}.optional")).and_then(|v| {
            v.as_array().map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.as_str().map(str::to_owned))
                    .collect()
            })
        })
    }

    /// Numeric `[min, max]` bounds for `key`, from its `.range` companion.
    pub fn range(&self, key: &str) -> Option<(f64, f64)> {
        let bounds = self.0.get(&format!("{key}.range"))?.as_array()?;
        match bounds.as_slice() {
            [min, max] => Some((min.as_f64()?, max.as_f64()?)),
            _ => None,
        }
    }
}

/// The engine operations the turn loop depends on. [`EngineClient`] is the
/// production implementation; tests substitute scripted engines.
#[async_trait]
pub trait EngineApi: Send + Sync {
    /// Lists the strategies the engine offers for player slots.
    async fn agents(&self) -> Result<Vec<String>>;

    /// Initializes player slot `index` (1 or 2) with a named strategy, or
    /// updates its configuration. Returns the resolved configuration.
    async fn init_player(
        &self,
        index: u8,
        model: &str,
        config: Option<&AgentConfig>,
    ) -> Result<AgentConfig>;

    /// Starts a new game from a free-placement layout.
    async fn init_board(&self, placements: &[Placement]) -> Result<()>;

    /// Fetches the legal action templates for the side to move.
    async fn actions(&self) -> Result<Vec<ActionTemplate>>;

    /// Executes one step. `action` carries the human's chosen
    /// (sources, targets); `None` delegates the move to the engine-side
    /// agent for the current slot.
    async fn run(&self, action: Option<(&[Square], &[Square])>) -> Result<MoveOutcome>;

    /// Undoes the last committed move, returning the engine-confirmed
    /// previous board and pools.
    async fn undo(&self) -> Result<(Board, CapturePools)>;

    /// Loads a saved position by id, returning its board and pools.
    async fn load(&self, id: i64) -> Result<(Board, CapturePools)>;

    /// Saves the current position under `name`.
    async fn save(&self, name: &str) -> Result<()>;

    /// Ends the current game on the engine side.
    async fn end(&self) -> Result<()>;
}

/// HTTP client for the engine.
#[derive(Debug, Clone)]
pub struct EngineClient {
    base_url: String,
    client: reqwest::Client,
}

impl EngineClient {
    /// Creates a client for the engine at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl EngineApi for EngineClient {
    #[instrument(skip(self))]
    async fn agents(&self) -> Result<Vec<String>> {
        let agents: Vec<String> = self
            .client
            .get(self.url("/api/agents/"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .context("decoding agent list")?;
        debug!(count = agents.len(), "fetched agent list");
        Ok(agents)
    }

    #[instrument(skip(self))]
    async fn load(&self, id: i64) -> Result<(Board, CapturePools)> {
        let reply: wire::BoardReply = self
            .client
            .get(self.url(&format!("/api/load/{id}/")))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .context("decoding load reply")?;
        let board = wire::decode_board(&reply.chessboard)?;
        info!(id, "position loaded");
        Ok((board, reply.dead))
    }

    #[instrument(skip(self), fields(name = %name))]
    async fn save(&self, name: &str) -> Result<()> {
        self.client
            .get(self.url(&format!("/api/save/{name}/")))
            .send()
            .await?
            .error_for_status()
            .context("saving position")?;
        info!("position saved");
        Ok(())
    }

    #[instrument(skip(self, config), fields(model = %model))]
    async fn init_player(
        &self,
        index: u8,
        model: &str,
        config: Option<&AgentConfig>,
    ) -> Result<AgentConfig> {
        let body = serde_json::json!({
            "model": model,
            "config": config.map(|c| Value::Object(c.0.clone())),
        });
        let resolved: AgentConfig = self
            .client
            .post(self.url(&format!("/api/init_player/{index}/")))
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .context("decoding player configuration")?;
        info!(index, "player slot initialized");
        Ok(resolved)
    }

    #[instrument(skip(self, placements), fields(pieces = placements.len()))]
    async fn init_board(&self, placements: &[Placement]) -> Result<()> {
        let data: Vec<Value> = placements
            .iter()
            .map(|p| {
                serde_json::json!([
                    [p.color.to_string(), p.name.to_string()],
                    p.places,
                ])
            })
            .collect();
        self.client
            .post(self.url("/api/init_chessboard/"))
            .json(&serde_json::json!({ "data": data }))
            .send()
            .await?
            .error_for_status()
            .context("initializing board")?;
        info!("board initialized");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn actions(&self) -> Result<Vec<ActionTemplate>> {
        let raw: Vec<(Vec<Square>, Vec<Square>)> = self
            .client
            .get(self.url("/api/actions/"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .context("decoding action templates")?;
        debug!(count = raw.len(), "fetched legal actions");
        Ok(raw
            .into_iter()
            .map(|(sources, targets)| ActionTemplate::new(sources, targets))
            .collect())
    }

    #[instrument(skip(self, action), fields(delegated = action.is_none()))]
    async fn run(&self, action: Option<(&[Square], &[Square])>) -> Result<MoveOutcome> {
        let body = match action {
            Some((sources, targets)) => serde_json::json!({
                "source": sources,
                "target": targets,
            }),
            None => serde_json::json!({ "source": null, "target": null }),
        };
        let response = self
            .client
            .post(self.url("/api/run/"))
            .json(&body)
            .send()
            .await?;
        if !response.status().is_success() {
            bail!("engine rejected the move: {}", response.status());
        }
        let reply: wire::MoveReply = response.json().await.context("decoding move reply")?;
        let board = wire::decode_board(&reply.chessboard)?;
        info!(record = %reply.record, game_over = reply.game_over, "move executed");
        Ok(MoveOutcome {
            board,
            captured: reply.dead,
            record: reply.record,
            winner: Winner::from_code(reply.game_over),
        })
    }

    #[instrument(skip(self))]
    async fn undo(&self) -> Result<(Board, CapturePools)> {
        let reply: wire::BoardReply = self
            .client
            .get(self.url("/api/undo/"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .context("decoding undo reply")?;
        let board = wire::decode_board(&reply.chessboard)?;
        info!("undo applied by engine");
        Ok((board, reply.dead))
    }

    #[instrument(skip(self))]
    async fn end(&self) -> Result<()> {
        self.client
            .get(self.url("/api/end/"))
            .send()
            .await?
            .error_for_status()
            .context("ending game")?;
        info!("game ended");
        Ok(())
    }
}
