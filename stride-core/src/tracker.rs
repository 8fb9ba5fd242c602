//! Step tracker
//!
//! Owns the live step count and the [`TrackingState`], drives the sensor
//! registration and pushes readouts to the display. Collaborators are
//! injected at construction; nothing is looked up globally.
//!
//! Invalid calls (step while idle, start while tracking, stop while idle)
//! are no-ops that return `false`. Only operations that write the summary
//! store can fail, and only with a [`StoreError`].

use stride_hal::{FlashStorage, SensorEvent, StepSensor};

use crate::convert::DerivedMetrics;
use crate::readout::{Readout, StatusLine};
use crate::state::{Event, TrackingState};
use crate::summary::{PersistedSummary, StoreError, SummaryStore};
use crate::traits::MetricsDisplay;

/// Step count loaded by the synthetic mock run
pub const MOCK_STEPS: u32 = 1000;

/// Step tracker
pub struct Tracker<S, F, D> {
    sensor: S,
    store: SummaryStore<F>,
    display: D,
    state: TrackingState,
    steps: u32,
    /// Captured once at construction
    sensor_present: bool,
    show_status: bool,
}

impl<S, F, D> Tracker<S, F, D>
where
    S: StepSensor,
    F: FlashStorage,
    D: MetricsDisplay,
{
    /// Create an idle tracker
    ///
    /// Probes the sensor once. A tracker without a sensor still works: it
    /// can be started, it just never receives steps.
    pub fn new(sensor: S, store: SummaryStore<F>, display: D) -> Self {
        let sensor_present = sensor.is_present();

        if !sensor_present {
            #[cfg(feature = "defmt")]
            defmt::warn!("No step sensor available, tracking will not count steps");
        }

        Self {
            sensor,
            store,
            display,
            state: TrackingState::Idle,
            steps: 0,
            sensor_present,
            show_status: true,
        }
    }

    /// Enable or disable the "Tracking started/stopped" status lines
    pub fn with_status_lines(mut self, enabled: bool) -> Self {
        self.show_status = enabled;
        self
    }

    /// Current state
    pub fn state(&self) -> TrackingState {
        self.state
    }

    /// Steps counted in the current (or last) session
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Estimates for the current step count
    pub fn metrics(&self) -> DerivedMetrics {
        DerivedMetrics::from_steps(self.steps)
    }

    /// Current step count with its estimates
    pub fn readout(&self) -> Readout {
        Readout::from_steps(self.steps)
    }

    /// Whether the sensor was present at construction
    pub fn sensor_present(&self) -> bool {
        self.sensor_present
    }

    /// Access the summary store
    pub fn store_mut(&mut self) -> &mut SummaryStore<F> {
        &mut self.store
    }

    /// Begin a new session
    ///
    /// Resets the count to zero and registers the sensor. Ignored while
    /// already tracking.
    pub fn start(&mut self) -> bool {
        let Some(next) = self.state.next_state(Event::Start) else {
            return false;
        };

        self.steps = 0;
        self.state = next;
        self.sync_sensor();

        #[cfg(feature = "defmt")]
        defmt::debug!("Tracking started (sensor present: {})", self.sensor_present);

        if self.show_status {
            self.display.show_status(StatusLine::TrackingStarted);
        }
        true
    }

    /// Count one step and push the new readout
    ///
    /// Ignored while idle.
    pub fn on_step_event(&mut self) -> bool {
        let Some(next) = self.state.next_state(Event::Step) else {
            return false;
        };

        self.state = next;
        self.steps = self.steps.saturating_add(1);
        self.display.show_readout(&self.readout());
        true
    }

    /// Handle a raw sensor notification
    ///
    /// Accuracy changes carry no step information and are dropped.
    pub fn on_sensor_event(&mut self, event: SensorEvent) -> bool {
        match event {
            SensorEvent::Step => self.on_step_event(),
            SensorEvent::AccuracyChanged(_) => false,
        }
    }

    /// Process every pending sensor event in FIFO order
    ///
    /// `events` is polled until it runs dry, so a non-blocking receive
    /// wrapped in [`core::iter::from_fn`] drains a queue. Returns the number
    /// of steps that were counted.
    pub fn drain<I>(&mut self, events: I) -> u32
    where
        I: IntoIterator<Item = SensorEvent>,
    {
        let mut counted = 0;
        for event in events {
            if self.on_sensor_event(event) {
                counted += 1;
            }
        }
        counted
    }

    /// End the session and persist its totals
    ///
    /// Unregisters the sensor before saving. Ignored while idle, so a
    /// second stop writes nothing. On a storage error the tracker is
    /// already idle.
    pub async fn stop(&mut self) -> Result<bool, StoreError> {
        let Some(next) = self.state.next_state(Event::Stop) else {
            return Ok(false);
        };

        self.state = next;
        self.sync_sensor();

        #[cfg(feature = "defmt")]
        defmt::debug!("Tracking stopped after {} steps", self.steps);

        if self.show_status {
            self.display.show_status(StatusLine::TrackingStopped);
        }

        self.persist().await?;
        Ok(true)
    }

    /// Load [`MOCK_STEPS`] without the sensor and persist immediately
    ///
    /// Leaves the tracking state untouched: a running session keeps
    /// counting from the mocked value.
    pub async fn mock_run(&mut self) -> Result<(), StoreError> {
        self.state = self.state.transition(Event::MockRun);
        self.steps = MOCK_STEPS;
        self.display.show_readout(&self.readout());

        #[cfg(feature = "defmt")]
        defmt::debug!("Mock run loaded {} steps", MOCK_STEPS);

        self.persist().await
    }

    /// Read the persisted summary and present it
    pub async fn show_summary(&mut self) -> PersistedSummary {
        let summary = self.store.read().await;
        self.display.show_summary(&summary);
        summary
    }

    /// Dispatch an event to the matching operation
    ///
    /// Returns whether the event had an effect.
    pub async fn handle(&mut self, event: Event) -> Result<bool, StoreError> {
        match event {
            Event::Start => Ok(self.start()),
            Event::Step => Ok(self.on_step_event()),
            Event::Stop => self.stop().await,
            Event::MockRun => self.mock_run().await.map(|()| true),
            Event::ShowSummary => {
                self.show_summary().await;
                Ok(true)
            }
        }
    }

    /// Register or unregister the sensor to match the current state
    fn sync_sensor(&mut self) {
        let wanted = self.state.sensor_registered();
        if wanted == self.sensor.is_registered() {
            return;
        }
        if wanted {
            self.sensor.register();
        } else {
            self.sensor.unregister();
        }
    }

    async fn persist(&mut self) -> Result<(), StoreError> {
        let metrics = self.metrics();
        self.store
            .write(self.steps, metrics.distance_km, metrics.calories_kcal)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockFlash, MockSensor, RecordingDisplay};
    use embassy_futures::block_on;
    use heapless::spsc::Queue;

    type TestTracker = Tracker<MockSensor, MockFlash, RecordingDisplay>;

    fn tracker() -> TestTracker {
        Tracker::new(
            MockSensor::new(),
            SummaryStore::new(MockFlash::new()),
            RecordingDisplay::new(),
        )
    }

    fn persisted(tracker: &mut TestTracker) -> PersistedSummary {
        block_on(tracker.store_mut().read())
    }

    fn writes(tracker: &mut TestTracker) -> usize {
        tracker.store_mut().storage_mut().writes()
    }

    fn assert_summary(summary: PersistedSummary, steps: u32, distance: f32, calories: f32) {
        assert_eq!(summary.steps, steps);
        assert!((summary.distance_km - distance).abs() < 1e-6);
        assert!((summary.calories_kcal - calories).abs() < 1e-4);
    }

    #[test]
    fn test_starts_idle() {
        let tracker = tracker();
        assert_eq!(tracker.state(), TrackingState::Idle);
        assert_eq!(tracker.steps(), 0);
        assert!(tracker.sensor_present());
    }

    #[test]
    fn test_start_then_stop_persists_zero() {
        let mut tracker = tracker();
        assert!(tracker.start());
        assert!(block_on(tracker.stop()).unwrap());

        assert_summary(persisted(&mut tracker), 0, 0.0, 0.0);
        // Three values bracketed by two commit marker writes
        assert_eq!(writes(&mut tracker), 5);
    }

    #[test]
    fn test_thousand_steps_session() {
        let mut tracker = tracker();
        tracker.start();
        for _ in 0..1000 {
            assert!(tracker.on_step_event());
        }
        block_on(tracker.stop()).unwrap();

        assert_summary(persisted(&mut tracker), 1000, 0.775, 40.0);
        assert_eq!(tracker.display.readouts.len(), 1000);
    }

    #[test]
    fn test_step_while_idle_ignored() {
        let mut tracker = tracker();
        assert!(!tracker.on_step_event());
        assert_eq!(tracker.steps(), 0);
        assert!(tracker.display.readouts.is_empty());
        assert_eq!(writes(&mut tracker), 0);
    }

    #[test]
    fn test_step_after_stop_ignored() {
        let mut tracker = tracker();
        tracker.start();
        tracker.on_step_event();
        block_on(tracker.stop()).unwrap();

        assert!(!tracker.on_step_event());
        assert_eq!(tracker.steps(), 1);
    }

    #[test]
    fn test_double_start_does_not_reset() {
        let mut tracker = tracker();
        assert!(tracker.start());
        tracker.on_step_event();
        tracker.on_step_event();

        assert!(!tracker.start());
        assert_eq!(tracker.steps(), 2);
        assert_eq!(tracker.sensor.register_calls, 1);
        assert_eq!(tracker.display.statuses, [StatusLine::TrackingStarted]);
    }

    #[test]
    fn test_double_stop_writes_once() {
        let mut tracker = tracker();
        tracker.start();
        tracker.on_step_event();

        assert!(block_on(tracker.stop()).unwrap());
        let after_first = writes(&mut tracker);
        assert!(!block_on(tracker.stop()).unwrap());

        assert_eq!(writes(&mut tracker), after_first);
        assert_eq!(tracker.sensor.unregister_calls, 1);
    }

    #[test]
    fn test_stop_while_idle_writes_nothing() {
        let mut tracker = tracker();
        assert!(!block_on(tracker.stop()).unwrap());
        assert_eq!(writes(&mut tracker), 0);
    }

    #[test]
    fn test_new_session_resets_count() {
        let mut tracker = tracker();
        tracker.start();
        for _ in 0..5 {
            tracker.on_step_event();
        }
        block_on(tracker.stop()).unwrap();

        tracker.start();
        assert_eq!(tracker.steps(), 0);
        tracker.on_step_event();
        block_on(tracker.stop()).unwrap();

        assert_eq!(persisted(&mut tracker).steps, 1);
    }

    #[test]
    fn test_sensor_registration_follows_state() {
        let mut tracker = tracker();
        assert!(!tracker.sensor.is_registered());
        tracker.start();
        assert!(tracker.sensor.is_registered());
        block_on(tracker.stop()).unwrap();
        assert!(!tracker.sensor.is_registered());
    }

    #[test]
    fn test_mock_run_from_idle() {
        let mut tracker = tracker();
        block_on(tracker.mock_run()).unwrap();

        assert_eq!(tracker.state(), TrackingState::Idle);
        assert_summary(persisted(&mut tracker), 1000, 0.775, 40.0);

        let readout = tracker.display.last_readout().copied().unwrap();
        assert_eq!(readout.steps_text().as_str(), "1000 steps");
        assert_eq!(readout.distance_text().as_str(), "0.78 km");
        assert_eq!(readout.calories_text().as_str(), "40.00 kcal");
    }

    #[test]
    fn test_mock_run_while_tracking() {
        let mut tracker = tracker();
        tracker.start();
        for _ in 0..7 {
            tracker.on_step_event();
        }
        block_on(tracker.mock_run()).unwrap();

        assert_eq!(tracker.state(), TrackingState::Tracking);
        assert!(tracker.sensor.is_registered());
        assert_summary(persisted(&mut tracker), 1000, 0.775, 40.0);

        // Counting continues from the mocked value
        tracker.on_step_event();
        assert_eq!(tracker.steps(), 1001);
    }

    #[test]
    fn test_mock_run_overwrites_previous_session() {
        let mut tracker = tracker();
        tracker.start();
        tracker.on_step_event();
        block_on(tracker.stop()).unwrap();

        block_on(tracker.mock_run()).unwrap();
        assert_summary(persisted(&mut tracker), 1000, 0.775, 40.0);
        assert_eq!(tracker.store_mut().storage_mut().stored_keys(), 4);
    }

    #[test]
    fn test_show_summary_reads_store() {
        let mut tracker = tracker();
        let empty = block_on(tracker.show_summary());
        assert_eq!(empty, PersistedSummary::default());

        block_on(tracker.mock_run()).unwrap();
        let summary = block_on(tracker.show_summary());
        assert_eq!(summary.steps, 1000);
        assert_eq!(tracker.display.summaries.len(), 2);
    }

    #[test]
    fn test_status_lines() {
        let mut tracker = tracker();
        tracker.start();
        block_on(tracker.stop()).unwrap();
        assert_eq!(
            tracker.display.statuses,
            [StatusLine::TrackingStarted, StatusLine::TrackingStopped]
        );

        let mut quiet = Tracker::new(
            MockSensor::new(),
            SummaryStore::new(MockFlash::new()),
            RecordingDisplay::new(),
        )
        .with_status_lines(false);
        quiet.start();
        block_on(quiet.stop()).unwrap();
        assert!(quiet.display.statuses.is_empty());
    }

    #[test]
    fn test_drain_in_fifo_order() {
        let mut queue: Queue<SensorEvent, 8> = Queue::new();
        let (mut tx, mut rx) = queue.split();

        let mut tracker = tracker();
        tracker.start();

        tx.enqueue(SensorEvent::Step).unwrap();
        tx.enqueue(SensorEvent::AccuracyChanged(3)).unwrap();
        tx.enqueue(SensorEvent::Step).unwrap();
        tx.enqueue(SensorEvent::Step).unwrap();

        assert_eq!(tracker.drain(core::iter::from_fn(|| rx.dequeue())), 3);
        assert_eq!(tracker.steps(), 3);
        assert!(rx.dequeue().is_none());

        let counts: std::vec::Vec<u32> =
            tracker.display.readouts.iter().map(|r| r.steps).collect();
        assert_eq!(counts, [1, 2, 3]);
    }

    #[test]
    fn test_drain_while_idle_discards() {
        let mut queue: Queue<SensorEvent, 4> = Queue::new();
        let (mut tx, mut rx) = queue.split();

        let mut tracker = tracker();
        tx.enqueue(SensorEvent::Step).unwrap();
        tx.enqueue(SensorEvent::Step).unwrap();

        assert_eq!(tracker.drain(core::iter::from_fn(|| rx.dequeue())), 0);
        assert_eq!(tracker.steps(), 0);
    }

    #[test]
    fn test_missing_sensor_stays_tracking() {
        let mut tracker = Tracker::new(
            MockSensor::absent(),
            SummaryStore::new(MockFlash::new()),
            RecordingDisplay::new(),
        );
        assert!(!tracker.sensor_present());

        assert!(tracker.start());
        assert_eq!(tracker.state(), TrackingState::Tracking);
        assert_eq!(tracker.steps(), 0);
    }

    #[test]
    fn test_storage_failure_still_stops() {
        let mut flash = MockFlash::new();
        flash.fail_writes(true);
        let mut tracker = Tracker::new(
            MockSensor::new(),
            SummaryStore::new(flash),
            RecordingDisplay::new(),
        );

        tracker.start();
        assert!(block_on(tracker.stop()).is_err());
        assert_eq!(tracker.state(), TrackingState::Idle);
    }

    #[test]
    fn test_handle_dispatch() {
        let mut tracker = tracker();
        assert!(!block_on(tracker.handle(Event::Step)).unwrap());
        assert!(block_on(tracker.handle(Event::Start)).unwrap());
        assert!(block_on(tracker.handle(Event::Step)).unwrap());
        assert!(!block_on(tracker.handle(Event::Start)).unwrap());
        assert!(block_on(tracker.handle(Event::Stop)).unwrap());
        assert!(!block_on(tracker.handle(Event::Stop)).unwrap());
        assert!(block_on(tracker.handle(Event::ShowSummary)).unwrap());

        assert_eq!(tracker.display.summaries[0].steps, 1);
    }

    #[test]
    fn test_failed_stop_never_mixes_sessions() {
        let mut flash = MockFlash::new();
        // Mock run takes writes 1-5; the stop fails on its distance value
        flash.fail_on_write(8);
        let mut tracker = Tracker::new(
            MockSensor::new(),
            SummaryStore::new(flash),
            RecordingDisplay::new(),
        );

        block_on(tracker.mock_run()).unwrap();
        tracker.start();
        for _ in 0..5 {
            tracker.on_step_event();
        }
        assert_eq!(
            block_on(tracker.stop()),
            Err(StoreError::Flash(stride_hal::FlashError::Full))
        );

        assert_eq!(persisted(&mut tracker), PersistedSummary::default());
        assert_eq!(
            block_on(tracker.store_mut().try_read()),
            Err(StoreError::Incomplete)
        );
    }

    #[test]
    fn test_registration_is_not_repeated() {
        let mut tracker = tracker();
        tracker.start();
        block_on(tracker.mock_run()).unwrap();
        block_on(tracker.stop()).unwrap();
        block_on(tracker.stop()).unwrap();

        assert_eq!(tracker.sensor.register_calls, 1);
        assert_eq!(tracker.sensor.unregister_calls, 1);
    }
}
