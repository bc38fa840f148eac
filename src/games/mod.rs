//! The five arcade cabinets
//!
//! Each game is `config` (tuning), `state` (value-type snapshot and events) and
//! `tick` (pure engine: `tick` plus discrete actions). Nothing here renders,
//! plays audio or reads input devices.

pub mod breaker;
pub mod slalom;
pub mod sniper;
pub mod snowball;
pub mod village;

pub use breaker::BreakerState;
pub use slalom::SlalomState;
pub use sniper::SniperState;
pub use snowball::SnowballState;
pub use village::VillageState;
