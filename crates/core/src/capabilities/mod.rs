//! Built-in tools
//!
//! Each tool lives in its own file together with its typed arguments.
//! Tools are registered with the `ToolRegistry` via `BuiltinTool`.

mod email;
mod weather;

pub use email::{SendEmailArgs, SendEmailTool};
pub use weather::{GetWeatherArgs, GetWeatherTool};
