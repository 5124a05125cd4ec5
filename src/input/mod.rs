//! Input samples handed over by the capture harness

mod event;

pub use event::{raw_intervals, DeviceClass, Position, TimedEvent, TimedSample};
