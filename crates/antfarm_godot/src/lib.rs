use godot::prelude::*;

mod actor;
mod body;
mod logger;

/// GDExtension entry point (регистрирует класс Actor)
struct AntfarmExtension;

#[gdextension]
unsafe impl ExtensionLibrary for AntfarmExtension {}
