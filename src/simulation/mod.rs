//! Synthetic rate history: weekday random walks, anchored backward
//! construction, and the trend/seasonal overlays.

pub mod generator;
pub mod overlay;
