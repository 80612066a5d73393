//! Whole-tree felling for voxel worlds.
//!
//! Chopping the base log of a tree with an axe discovers the connected trunk,
//! branches and leaves, removes them with drops, wears the axe for every log
//! and hurts the actor for every log felled after the axe broke.

mod config;
mod coord;
mod discovery;
mod effects;
mod executor;
mod feller;
mod session;
mod sparse;
mod view;
mod wear;

pub use config::*;
pub use coord::*;
pub use discovery::*;
pub use effects::*;
pub use executor::*;
pub use feller::*;
pub use session::*;
pub use sparse::*;
pub use view::*;
pub use wear::*;
