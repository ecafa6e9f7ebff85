//! Behavioural scenarios for the volume description engine.

mod describe;
