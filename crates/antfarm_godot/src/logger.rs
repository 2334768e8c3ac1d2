//! GodotLogger implementation
//!
//! Bridges Rust logging to Godot's godot_print!/godot_warn!/godot_error!.
//! Level filter и timestamp уже применены в antfarm_simulation::logger.

use antfarm_simulation::{LogLevel, LogPrinter};

pub struct GodotLogger;

impl LogPrinter for GodotLogger {
    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Error => godot::prelude::godot_error!("[{}] {}", level.as_str(), message),
            LogLevel::Warning => godot::prelude::godot_warn!("[{}] {}", level.as_str(), message),
            LogLevel::Debug | LogLevel::Info => {
                godot::prelude::godot_print!("[{}] {}", level.as_str(), message)
            }
        }
    }
}
