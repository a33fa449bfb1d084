//! Session-scoped delayed events
//!
//! Respawns and staggered spawns are scheduled against simulated time.
//! Every entry is stamped with the queue's generation; `cancel_all` bumps the
//! generation, so nothing scheduled before a reset can fire afterwards.

#[derive(Debug, Clone)]
struct Pending<K> {
    remaining: f32,
    generation: u64,
    kind: K,
}

/// Queue of delayed events of kind `K`
#[derive(Debug, Clone)]
pub struct Timers<K> {
    generation: u64,
    pending: Vec<Pending<K>>,
}

impl<K> Default for Timers<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Timers<K> {
    pub fn new() -> Self {
        Self {
            generation: 0,
            pending: Vec::new(),
        }
    }

    /// Current generation (bumped by every `cancel_all`)
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Fire `kind` after `delay` seconds of simulated time
    pub fn schedule(&mut self, delay: f32, kind: K) {
        self.pending.push(Pending {
            remaining: delay.max(0.0),
            generation: self.generation,
            kind,
        });
    }

    /// Drop everything pending and start a new generation.
    /// Returns how many events were discarded.
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        self.generation += 1;
        dropped
    }

    /// Advance by `dt` and return the events that came due, earliest first.
    /// Events due at the same moment keep their scheduling order.
    pub fn advance(&mut self, dt: f32) -> Vec<K> {
        for p in &mut self.pending {
            p.remaining -= dt;
        }

        let (mut due, waiting): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|p| p.remaining <= 0.0);
        self.pending = waiting;

        due.sort_by(|a, b| a.remaining.total_cmp(&b.remaining));
        let generation = self.generation;
        due.into_iter()
            .filter(|p| p.generation == generation)
            .map(|p| p.kind)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
