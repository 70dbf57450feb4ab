mod actor;
mod building;
mod notice;
mod snow;
mod state;

pub use actor::{Actor, Behavior, CourierState};
pub use building::{town_layout, Building};
pub use notice::DeliveryNotice;
pub use snow::{Snowfield, Snowflake};
pub use state::TownState;

/// Logical size of the town canvas. Drawing and movement both work in
/// these units; the window is created at the same size.
pub const TOWN_WIDTH: f32 = 1600.0;
pub const TOWN_HEIGHT: f32 = 800.0;
