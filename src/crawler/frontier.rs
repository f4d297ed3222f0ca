//! Crawl frontier: five FIFO work queues plus the seen-airport set
//!
//! Each hierarchy level owns one queue; insertion order is visitation order.
//! Airport codes are additionally tracked in a process-lifetime seen set so
//! that the same airport linked from multiple listing pages is fetched once.
//! Refilling a level is the controller's job and only happens while that
//! level's queue is empty.

use std::collections::{HashSet, VecDeque};
use thiserror::Error;

/// One level of the directory hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Continent,
    Country,
    State,
    Page,
    Airport,
}

/// Errors that can occur on frontier operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrontierError {
    #[error("dequeue from empty {0:?} queue")]
    EmptyQueue(Level),
}

/// Pending work items across all hierarchy levels
#[derive(Debug, Default)]
pub struct Frontier {
    continents: VecDeque<String>,
    countries: VecDeque<String>,
    states: VecDeque<String>,
    pages: VecDeque<String>,
    airports: VecDeque<String>,
    seen_airports: HashSet<String>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    fn queue(&self, level: Level) -> &VecDeque<String> {
        match level {
            Level::Continent => &self.continents,
            Level::Country => &self.countries,
            Level::State => &self.states,
            Level::Page => &self.pages,
            Level::Airport => &self.airports,
        }
    }

    fn queue_mut(&mut self, level: Level) -> &mut VecDeque<String> {
        match level {
            Level::Continent => &mut self.continents,
            Level::Country => &mut self.countries,
            Level::State => &mut self.states,
            Level::Page => &mut self.pages,
            Level::Airport => &mut self.airports,
        }
    }

    pub fn is_empty(&self, level: Level) -> bool {
        self.queue(level).is_empty()
    }

    pub fn len(&self, level: Level) -> usize {
        self.queue(level).len()
    }

    /// Adds a token to the back of a level's queue
    ///
    /// Enqueueing an airport code already in the seen set is a no-op;
    /// otherwise the code joins both the queue and the seen set. Other
    /// levels are not deduplicated.
    pub fn enqueue(&mut self, level: Level, token: String) {
        if level == Level::Airport {
            if self.seen_airports.contains(&token) {
                return;
            }
            self.seen_airports.insert(token.clone());
        }
        self.queue_mut(level).push_back(token);
    }

    /// Removes and returns the front token of a level's queue
    ///
    /// Callers must check [`is_empty`](Self::is_empty) first; dequeueing an
    /// empty level is an error.
    pub fn dequeue(&mut self, level: Level) -> Result<String, FrontierError> {
        self.queue_mut(level)
            .pop_front()
            .ok_or(FrontierError::EmptyQueue(level))
    }

    /// Whether an airport code has ever been enqueued
    pub fn has_seen_airport(&self, code: &str) -> bool {
        self.seen_airports.contains(code)
    }
}
