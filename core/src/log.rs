//! Logging utilities
//!
//! Thin helpers over the `log` facade so call sites stay short. The host
//! decides where records go (console in the browser, a subscriber in `sim`).

#![allow(unused)]

const TARGET: &str = "deckforge";

/// Log an info message
#[inline(always)]
pub fn info(msg: &str) {
    ::log::info!(target: TARGET, "{}", msg);
}

/// Log a warning message
#[inline(always)]
pub fn warn(msg: &str) {
    ::log::warn!(target: TARGET, "{}", msg);
}

/// Log a debug message with a label
#[inline(always)]
pub fn debug(label: &str, msg: &str) {
    ::log::debug!(target: TARGET, "[{}] {}", label, msg);
}

/// Log an action being performed
#[inline(always)]
pub fn action(name: &str, details: &str) {
    ::log::trace!(target: TARGET, "{}: {}", name, details);
}

/// Log a one-line summary of both heroes
#[inline(always)]
pub fn battle_summary(turn: u32, hero1_health: f64, hero2_health: f64, finished: bool) {
    ::log::debug!(
        target: TARGET,
        "turn={} hero1_hp={} hero2_hp={} finished={}",
        turn,
        hero1_health,
        hero2_health,
        finished
    );
}
