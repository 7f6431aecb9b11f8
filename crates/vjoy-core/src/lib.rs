pub mod color;
pub mod direction;
pub mod error;
pub mod event;
pub mod fade;
pub mod geometry;
pub mod input;
pub mod joystick;
pub mod paint;
pub mod state;
pub mod style;
pub mod surface;

pub use color::{Paint, Rgba, parse_css_color};
pub use direction::Direction;
pub use error::ConfigError;
pub use event::{Callbacks, JoystickEvent};
pub use fade::Fade;
pub use geometry::{Displacement, Point, polar_clamp};
pub use input::{InputModality, Phase, PointerSample};
pub use joystick::{Joystick, Placement};
pub use paint::{DrawOp, FramePlan, execute, plan_frame};
pub use state::PointerState;
pub use style::{FloatRange, JoystickStyle, Position, StyleOptions, UnknownKeyPolicy};
pub use surface::{RecordingSurface, Surface};
