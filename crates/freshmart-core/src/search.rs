//! # Debounced Search Policy
//!
//! Pure decision logic for the live product search box: when to actually
//! run a search, and whether a finished search's results are still worth
//! showing.
//!
//! ## Why a Policy and Not a Timer
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Debounced Search, Decomposed                          │
//! │                                                                         │
//! │  keystroke "r"  ──► set_query ──► Debounce { fire_at: t+300ms }        │
//! │  keystroke "ri" ──► set_query ──► Debounce { fire_at: t'+300ms }       │
//! │                          (first ticket is now stale)                   │
//! │                                                                         │
//! │  timer fires ──► should_fire(ticket, now)? ──► run the query           │
//! │  query done  ──► accept(ticket)? ──► show results : drop them          │
//! │                                                                         │
//! │  The caller owns the clock and the timer; this module owns every       │
//! │  decision. That keeps the race rules testable without sleeping.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Queries shorter than the minimum length never run; they clear the result
//! list instead. Results for a superseded query are discarded, never
//! rendered, no matter when their search finishes.

use crate::{MIN_SEARCH_QUERY_LEN, SEARCH_DEBOUNCE_MS};

/// Identifies one generation of the query text. Results are only accepted
/// while their ticket is still the latest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket(u64);

/// What the caller should do after a query edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryAction {
    /// Query is below the minimum length: clear results, run nothing.
    Clear,
    /// Schedule a search for this ticket once the debounce window passes.
    Debounce {
        ticket: SearchTicket,
        /// Absolute time (caller's clock, milliseconds) when the search may run.
        fire_at_ms: u64,
    },
}

/// Debounce and staleness state for one search box.
#[derive(Debug)]
pub struct SearchSession {
    query: String,
    generation: u64,
    min_query_len: usize,
    debounce_ms: u64,
}

impl Default for SearchSession {
    fn default() -> Self {
        SearchSession::new(MIN_SEARCH_QUERY_LEN, SEARCH_DEBOUNCE_MS)
    }
}

impl SearchSession {
    /// Creates a session with explicit thresholds.
    pub fn new(min_query_len: usize, debounce_ms: u64) -> Self {
        SearchSession {
            query: String::new(),
            generation: 0,
            min_query_len,
            debounce_ms,
        }
    }

    /// The current query text.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Records a query edit at time `now_ms` and returns what to do.
    ///
    /// Every edit bumps the generation, so any search still pending for the
    /// previous text becomes stale immediately.
    pub fn set_query(&mut self, query: impl Into<String>, now_ms: u64) -> QueryAction {
        self.query = query.into();
        self.generation += 1;

        if self.query_too_short() {
            return QueryAction::Clear;
        }

        QueryAction::Debounce {
            ticket: SearchTicket(self.generation),
            fire_at_ms: now_ms + self.debounce_ms,
        }
    }

    /// Whether a scheduled search may run now.
    ///
    /// False when the debounce window has not elapsed or when a later edit
    /// superseded the ticket.
    pub fn should_fire(&self, ticket: SearchTicket, fire_at_ms: u64, now_ms: u64) -> bool {
        ticket.0 == self.generation && now_ms >= fire_at_ms
    }

    /// Whether finished results for this ticket may be shown.
    pub fn accept(&self, ticket: SearchTicket) -> bool {
        ticket.0 == self.generation
    }

    /// Re-runs the current query immediately, skipping the debounce window.
    ///
    /// Returns `None` when the query is below the minimum length.
    pub fn refresh(&mut self) -> Option<SearchTicket> {
        if self.query_too_short() {
            return None;
        }
        self.generation += 1;
        Some(SearchTicket(self.generation))
    }

    // Length is counted in characters, not bytes, so one multibyte
    // character is still one keystroke
    fn query_too_short(&self) -> bool {
        self.query.chars().count() < self.min_query_len
    }

    /// Clears the query and invalidates everything in flight.
    pub fn clear(&mut self) {
        self.query.clear();
        self.generation += 1;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
