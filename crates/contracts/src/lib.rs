//! Wire contracts shared by the SugarBI frontend and the analytics API.
//!
//! Every type here mirrors a JSON shape the backend produces or accepts.
//! Optional backend fields stay `Option` and are normalised once, at the
//! gateway boundary, instead of being guarded at every consumption site.

pub mod dashboards;
pub mod domain;
pub mod shared;
pub mod system;
pub mod usecases;
