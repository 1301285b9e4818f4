pub mod config;
pub mod constants;
pub mod controller;
pub mod drag;
pub mod error;
pub mod gamepad;
pub mod handle;
pub mod hit_test;
pub mod math;
pub mod mesh;
pub mod session;
pub mod status;

pub use config::*;
pub use constants::*;
pub use controller::*;
pub use drag::*;
pub use error::*;
pub use gamepad::*;
pub use handle::*;
pub use hit_test::*;
pub use math::*;
pub use mesh::*;
pub use session::*;
pub use status::*;
