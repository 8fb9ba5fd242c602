//! Step sensor abstractions
//!
//! A step sensor is an external collaborator that reports discrete step
//! increments while registered. Delivery itself happens through a queue
//! owned by the application, so the trait only covers capability and
//! registration.

/// Notifications produced by a step sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorEvent {
    /// One step was detected
    Step,
    /// Sensor reported a new accuracy level (0 = unreliable, 3 = high)
    AccuracyChanged(u8),
}

/// Trait for step counter sensors
///
/// Implementations wrap the concrete sensor (pedometer IC interrupt line,
/// accelerometer step detector, ...). While registered, the sensor pushes
/// [`SensorEvent`]s to its consumer; after `unregister` it must stop.
pub trait StepSensor {
    /// Check if the host actually has a usable step sensor
    fn is_present(&self) -> bool;

    /// Begin delivering step events
    fn register(&mut self);

    /// Stop delivering step events
    fn unregister(&mut self);

    /// Check if the sensor is currently delivering events
    fn is_registered(&self) -> bool;
}
