pub mod commands;
pub mod engine;
pub mod input;
pub mod tools;

pub use commands::BoardCommand;
pub use engine::{BoardEngine, BoardMutation};
pub use input::InputEvent;
pub use tools::{DragTool, PenTool, Tool};
