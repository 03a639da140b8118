//! Radial and closed-form strategies

mod circle;
mod grid;
mod hub;

pub use circle::CircleLayout;
pub use grid::GridLayout;
pub use hub::{select_hub, HubPlan, HubRadialLayout};
