mod actions;
mod analytics;
mod batch;
mod battle;
mod config;
mod error;
mod limits;
mod log;
mod ranges;
mod rng;
mod state;
mod tuning;
mod types;

#[cfg(feature = "browser")]
mod sandbox;

#[cfg(test)]
mod tests;

pub use actions::{apply_action, can_afford, play_cost, resolve_card, LastingEffect, ResolvedCard};
pub use analytics::*;
pub use batch::*;
pub use battle::BattleEngine;
pub use config::{AnalyticsConfig, Threshold};
pub use error::{BalanceError, BalanceResult};
pub use limits::{BattleLimits, DEFAULT_MAX_TURNS, STALEMATE_TURNS};
pub use ranges::*;
pub use rng::{BattleRng, XorShiftRng};
pub use state::*;
pub use tuning::*;
pub use types::*;

#[cfg(feature = "browser")]
pub use sandbox::*;
