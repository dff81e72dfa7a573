//! Time-driven leaderboard reveal engine: layout, progress mapping, drawing,
//! effects, and the frame scheduler that ties them together.

pub mod bars;
pub mod constants;
pub mod fireworks;
pub mod fit;
pub mod highlight;
pub mod layout;
pub mod progress;
pub mod scheduler;
pub mod state;
pub mod surface;
pub mod terminal;
pub mod testing;

pub use bars::BoardTheme;
pub use layout::BoardLayout;
pub use scheduler::{Engine, EnginePhase};
pub use surface::{RasterSurface, Rgba};
pub use terminal::TerminalSurface;
