//! Typed diary events and the hub that dispatches them.
//!
//! Observers (per-meal lists, day summaries, metrics) subscribe to one
//! [`EventHub`] and react to [`DiaryEvent`]s.

mod event;
mod hub;

pub use event::DiaryEvent;
pub use hub::EventHub;
