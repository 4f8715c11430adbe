pub mod animation;
pub mod camera;
pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod navigator;
pub mod overlay;
pub mod physics;
pub mod scene;
pub mod state;
pub mod timeline;

pub use animation::*;
pub use camera::*;
pub use config::*;
pub use controller::*;
pub use error::*;
pub use events::*;
pub use navigator::*;
pub use overlay::*;
pub use physics::*;
pub use scene::*;
pub use state::*;
pub use timeline::*;
