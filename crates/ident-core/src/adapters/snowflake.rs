//! # Snowflake Identifiers
//!
//! 64-bit, time-sortable identifiers:
//!
//! ```text
//! | 0 | timestamp: 40 bits | node: 10 bits | sequence: 13 bits |
//! ```
//!
//! The timestamp counts milliseconds since a configurable epoch. An id is
//! valid iff its top bit is clear and its timestamp is non-zero, so the
//! all-zero id is never valid.
//!
//! ## Sequencing
//!
//! Within one millisecond the sequence increments. When it overflows the
//! source moves to the next logical millisecond instead of sleeping, and
//! the clock catches up later. A clock that runs backwards keeps the last
//! issued tick, so ids never decrease.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::errors::ConfigError;
use crate::ports::outbound::{ExplodedId, IdInspector, IdSource, IdSourceError};

// =============================================================================
// CONSTANTS
// =============================================================================

/// Timestamp field width.
pub const TIMESTAMP_BITS: u32 = 40;

/// Node field width.
pub const NODE_BITS: u32 = 10;

/// Sequence field width.
pub const SEQUENCE_BITS: u32 = 13;

/// Largest node id (1023).
pub const MAX_NODE: u16 = (1 << NODE_BITS) - 1;

/// Largest per-tick sequence number (8191).
pub const MAX_SEQUENCE: u16 = (1 << SEQUENCE_BITS) - 1;

/// Largest timestamp (ms since epoch).
pub const MAX_TIMESTAMP: u64 = (1 << TIMESTAMP_BITS) - 1;

/// Default epoch: 2021-01-01T00:00:00Z in Unix milliseconds.
pub const DEFAULT_EPOCH_MS: u64 = 1_609_459_200_000;

const NODE_SHIFT: u32 = SEQUENCE_BITS;
const TIMESTAMP_SHIFT: u32 = SEQUENCE_BITS + NODE_BITS;
const TOP_BIT: u64 = 1 << 63;

// =============================================================================
// LAYOUT
// =============================================================================

/// Bit layout of a snowflake id. Stateless.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SnowflakeLayout;

impl SnowflakeLayout {
    /// Pack the fields into an id. Out-of-range fields are masked.
    pub const fn compose(timestamp: u64, node: u16, sequence: u16) -> u64 {
        ((timestamp & MAX_TIMESTAMP) << TIMESTAMP_SHIFT)
            | (((node & MAX_NODE) as u64) << NODE_SHIFT)
            | (sequence & MAX_SEQUENCE) as u64
    }
}

impl IdInspector for SnowflakeLayout {
    fn explode(&self, id: u64) -> ExplodedId {
        let timestamp = (id >> TIMESTAMP_SHIFT) & MAX_TIMESTAMP;
        ExplodedId {
            timestamp,
            node: ((id >> NODE_SHIFT) as u16) & MAX_NODE,
            sequence: (id as u16) & MAX_SEQUENCE,
            valid: id & TOP_BIT == 0 && timestamp > 0,
        }
    }
}

// =============================================================================
// CLOCKS
// =============================================================================

/// Wall-clock source in Unix milliseconds.
pub trait Clock: Send {
    /// Current time.
    fn now_ms(&self) -> u64;
}

/// `SystemTime` backed clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Manually driven clock. Clones share the same reading.
#[derive(Clone, Debug, Default)]
pub struct FixedClock {
    now: Arc<AtomicU64>,
}

impl FixedClock {
    /// Clock reading `now_ms`.
    pub fn new(now_ms: u64) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(now_ms)),
        }
    }

    /// Set the reading.
    pub fn set(&self, now_ms: u64) {
        self.now.store(now_ms, Ordering::SeqCst);
    }

    /// Move the reading forward.
    pub fn advance(&self, ms: u64) {
        self.now.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

// =============================================================================
// OPTIONS
// =============================================================================

/// Id source settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnowflakeOptions {
    /// Node id, 0..=1023
    pub node: u16,
    /// Epoch in Unix milliseconds
    pub epoch_ms: u64,
}

impl Default for SnowflakeOptions {
    fn default() -> Self {
        Self {
            node: 0,
            epoch_ms: DEFAULT_EPOCH_MS,
        }
    }
}

impl SnowflakeOptions {
    /// Options for `node` with the default epoch.
    pub fn with_node(node: u16) -> Self {
        Self {
            node,
            ..Self::default()
        }
    }

    /// Check field ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.node > MAX_NODE {
            return Err(ConfigError::NodeOutOfRange {
                node: self.node,
                max: MAX_NODE,
            });
        }
        Ok(())
    }
}

// =============================================================================
// SEQUENCE
// =============================================================================

/// Monotonic snowflake id source.
#[derive(Debug)]
pub struct SnowflakeSequence<C: Clock = SystemClock> {
    clock: C,
    options: SnowflakeOptions,
    /// Tick of the last issued id (may run ahead of the clock)
    last_tick: u64,
    /// Sequence of the last issued id
    sequence: u16,
    /// Highest tick read from the clock
    observed: u64,
}

impl SnowflakeSequence<SystemClock> {
    /// Source driven by the system clock.
    pub fn new(options: SnowflakeOptions) -> Result<Self, ConfigError> {
        Self::with_clock(options, SystemClock)
    }
}

impl<C: Clock> SnowflakeSequence<C> {
    /// Source driven by `clock`.
    pub fn with_clock(options: SnowflakeOptions, clock: C) -> Result<Self, ConfigError> {
        options.validate()?;
        debug!(
            "[ident] snowflake sequence: node={} epoch_ms={}",
            options.node, options.epoch_ms
        );
        Ok(Self {
            clock,
            options,
            last_tick: 0,
            sequence: 0,
            observed: 0,
        })
    }

    /// Active options.
    pub fn options(&self) -> &SnowflakeOptions {
        &self.options
    }
}

impl<C: Clock> IdSource for SnowflakeSequence<C> {
    fn next_id(&mut self) -> Result<u64, IdSourceError> {
        let now_ms = self.clock.now_ms();
        if now_ms <= self.options.epoch_ms {
            return Err(IdSourceError::ClockBeforeEpoch {
                now_ms,
                epoch_ms: self.options.epoch_ms,
            });
        }
        let tick = now_ms - self.options.epoch_ms;

        if tick < self.observed {
            debug!(
                "[ident] clock moved backwards by {}ms, holding tick {}",
                self.observed - tick,
                self.last_tick
            );
        } else {
            self.observed = tick;
        }

        if tick > self.last_tick {
            self.last_tick = tick;
            self.sequence = 0;
        } else if self.sequence == MAX_SEQUENCE {
            self.last_tick += 1;
            self.sequence = 0;
            warn!("[ident] sequence overflow, borrowing tick {}", self.last_tick);
        } else {
            self.sequence += 1;
        }

        if self.last_tick > MAX_TIMESTAMP {
            return Err(IdSourceError::Exhausted {
                timestamp: self.last_tick,
                max: MAX_TIMESTAMP,
            });
        }

        Ok(SnowflakeLayout::compose(
            self.last_tick,
            self.options.node,
            self.sequence,
        ))
    }
}
