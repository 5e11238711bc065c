//! Frame driver
//!
//! Holds the only mutable state of the dashboard (last known total, fetch
//! bookkeeping, animation clock) in one explicit struct and recomputes a
//! [`Frame`] on every tick or total change. Single-threaded; every frame is
//! an independent O(1) recomputation.

use serde::{Deserialize, Serialize};

use crate::error::FetchError;
use crate::iceberg::{IcebergEngine, IcebergStats, Scene, VisualState};
use crate::rank::{Milestone, RankProgress};

/// Fixed-step animation clock.
///
/// Time is derived from the tick count, so it never accumulates rounding
/// drift however long the dashboard stays open.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationClock {
    ticks: u64,
    step: f64,
}

impl AnimationClock {
    pub fn new(step: f64) -> Self {
        Self { ticks: 0, step }
    }

    /// Advance one tick and return the new time
    pub fn advance(&mut self) -> f64 {
        self.ticks = self.ticks.saturating_add(1);
        self.time()
    }

    pub fn time(&self) -> f64 {
        self.ticks as f64 * self.step
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn reset(&mut self) {
        self.ticks = 0;
    }
}

/// Identifies one fetch of the authoritative total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FetchTicket(u64);

/// What the portfolio service returned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    /// Total points, if the portfolio carries one
    pub total_points: Option<u64>,
}

/// How a fetch completion was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The service total was adopted
    Updated(u64),
    /// The fetch failed or was empty; this total was substituted
    Fallback(u64),
    /// The ticket was superseded or cancelled; nothing changed
    Stale,
}

/// Point total bookkeeping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointsState {
    last_known: Option<u64>,
    fallback: u64,
    pending: Option<FetchTicket>,
    next_ticket: u64,
}

impl PointsState {
    /// `fallback` is used until a fetch succeeds and whenever one comes
    /// back empty (typically the profile's own point count)
    pub fn new(fallback: u64) -> Self {
        Self {
            last_known: None,
            fallback,
            pending: None,
            next_ticket: 0,
        }
    }

    /// Total to lay out right now
    pub fn total(&self) -> u64 {
        self.last_known.unwrap_or(self.fallback)
    }

    pub fn last_known(&self) -> Option<u64> {
        self.last_known
    }

    pub fn fallback(&self) -> u64 {
        self.fallback
    }

    /// A fetch is in flight
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Replace the fallback total (e.g. when the session profile changes)
    pub fn set_fallback(&mut self, fallback: u64) {
        self.fallback = fallback;
    }

    /// Push-style change notification
    pub fn set_total(&mut self, total: u64) {
        self.last_known = Some(total);
    }

    /// Start a fetch; any fetch still in flight becomes stale
    pub fn begin_fetch(&mut self) -> FetchTicket {
        let ticket = FetchTicket(self.next_ticket);
        self.next_ticket += 1;
        if let Some(old) = self.pending.replace(ticket) {
            log::debug!("Fetch {:?} superseded by {:?}", old, ticket);
        } else {
            log::debug!("Fetch {:?} started", ticket);
        }
        ticket
    }

    /// Drop the in-flight fetch, if any
    pub fn cancel_fetch(&mut self) {
        if let Some(ticket) = self.pending.take() {
            log::debug!("Fetch {:?} cancelled", ticket);
        }
    }

    /// Apply a fetch result. Never fails: errors fall back to the last
    /// known total, then to the fallback.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<PortfolioSnapshot, FetchError>,
    ) -> FetchOutcome {
        if self.pending != Some(ticket) {
            log::debug!("Ignoring stale fetch {:?}", ticket);
            return FetchOutcome::Stale;
        }
        self.pending = None;

        match result {
            Ok(PortfolioSnapshot {
                total_points: Some(total),
            }) => {
                self.last_known = Some(total);
                FetchOutcome::Updated(total)
            }
            Ok(PortfolioSnapshot { total_points: None }) => {
                self.last_known = Some(self.fallback);
                FetchOutcome::Fallback(self.fallback)
            }
            Err(err) => {
                let total = self.total();
                log::warn!("Error loading portfolio: {}; using {} points", err, total);
                FetchOutcome::Fallback(total)
            }
        }
    }
}

/// Everything consumers need for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub tick: u64,
    pub time: f64,
    pub total: u64,
    pub loading: bool,
    pub rank: RankProgress,
    pub milestones: Vec<Milestone>,
    pub visual: VisualState,
    pub stats: IcebergStats,
    pub scene: Scene,
}

/// Explicit dashboard state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardState {
    pub points: PointsState,
    pub clock: AnimationClock,
    pub running: bool,
}

impl DashboardState {
    pub fn new(engine: &IcebergEngine) -> Self {
        let config = engine.config();
        Self {
            points: PointsState::new(config.default_points),
            clock: AnimationClock::new(config.time_step),
            running: true,
        }
    }
}

/// Compute the frame for the current state without advancing time
pub fn frame(engine: &IcebergEngine, state: &DashboardState) -> Frame {
    let total = state.points.total();
    let signed = i64::try_from(total).unwrap_or(i64::MAX);
    let time = state.clock.time();
    let visual = engine.visual_state(signed, time);

    Frame {
        tick: state.clock.ticks(),
        time,
        total,
        loading: state.points.is_loading(),
        rank: engine.rank(total),
        milestones: engine.milestones(total),
        stats: engine.stats(signed, &visual),
        scene: engine.scene(&visual),
        visual,
    }
}

/// Advance the clock one step and compute the frame. Returns `None` once
/// the dashboard has been torn down.
pub fn tick(engine: &IcebergEngine, state: &mut DashboardState) -> Option<Frame> {
    if !state.running {
        return None;
    }
    state.clock.advance();
    Some(frame(engine, state))
}

/// Engine plus state, for hosts that want a single owner
#[derive(Debug, Clone)]
pub struct Dashboard {
    engine: IcebergEngine,
    state: DashboardState,
}

impl Dashboard {
    pub fn new(engine: IcebergEngine) -> Self {
        let state = DashboardState::new(&engine);
        Self { engine, state }
    }

    pub fn engine(&self) -> &IcebergEngine {
        &self.engine
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn points_mut(&mut self) -> &mut PointsState {
        &mut self.state.points
    }

    /// Tick source callback
    pub fn tick(&mut self) -> Option<Frame> {
        tick(&self.engine, &mut self.state)
    }

    /// Total-change callback: recompute without advancing time. Returns
    /// `None` once the dashboard has been torn down.
    pub fn refresh(&self) -> Option<Frame> {
        self.state.running.then(|| frame(&self.engine, &self.state))
    }

    /// Start fetching the authoritative total
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.state.points.begin_fetch()
    }

    /// Deliver a fetch result and recompute while running
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<PortfolioSnapshot, FetchError>,
    ) -> (FetchOutcome, Option<Frame>) {
        let outcome = self.state.points.complete_fetch(ticket, result);
        (outcome, self.refresh())
    }

    /// Record a pushed total. After teardown the total is kept for
    /// [`Dashboard::resume`] but no frame is computed.
    pub fn set_total(&mut self, total: u64) -> Option<Frame> {
        self.state.points.set_total(total);
        self.refresh()
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    /// Stop the tick source: cancels any fetch, resets the clock, and makes
    /// further ticks and refreshes no-ops
    pub fn teardown(&mut self) {
        if !self.state.running {
            return;
        }
        self.state.running = false;
        self.state.points.cancel_fetch();
        log::info!("Dashboard stopped after {} ticks", self.state.clock.ticks());
        self.state.clock.reset();
    }

    /// Restart after a teardown
    pub fn resume(&mut self) {
        self.state.running = true;
    }
}
