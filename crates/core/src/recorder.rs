//! Append-only log of rebase occurrences.

use elastic_types::RebaseEvent;

/// One record per effective rebase, in exact insertion order. No records
/// exist for cooldown or no-op outcomes.
#[derive(Debug, Clone, Default)]
pub struct EventRecorder {
    events: Vec<RebaseEvent>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, event: RebaseEvent) {
        self.events.push(event);
    }

    /// All recorded events in insertion order
    pub fn events(&self) -> &[RebaseEvent] {
        &self.events
    }

    /// Events recorded during the given epoch
    pub fn events_for_epoch(&self, epoch: u64) -> impl Iterator<Item = &RebaseEvent> {
        self.events.iter().filter(move |event| event.epoch == epoch)
    }

    pub fn latest(&self) -> Option<&RebaseEvent> {
        self.events.last()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(epoch: u64, timestamp: i64) -> RebaseEvent {
        RebaseEvent {
            epoch,
            observed_price: 2,
            target_price: 1,
            supply_before: 100,
            supply_after: 101,
            delta: 1,
            timestamp,
        }
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut recorder = EventRecorder::new();
        recorder.record(event(1, 100));
        recorder.record(event(2, 200));
        recorder.record(event(2, 260));

        let timestamps: Vec<i64> = recorder.events().iter().map(|e| e.timestamp).collect();
        assert_eq!(timestamps, vec![100, 200, 260]);
        assert_eq!(recorder.latest().unwrap().timestamp, 260);
    }

    #[test]
    fn test_query_by_epoch() {
        let mut recorder = EventRecorder::new();
        recorder.record(event(1, 100));
        recorder.record(event(2, 200));
        recorder.record(event(2, 260));

        assert_eq!(recorder.events_for_epoch(2).count(), 2);
        assert_eq!(recorder.events_for_epoch(1).count(), 1);
        assert_eq!(recorder.events_for_epoch(9).count(), 0);
    }
}
