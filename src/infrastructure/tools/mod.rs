//! Tool infrastructure: registry and tool implementations

mod builtin;
mod dynamic;
mod in_memory;

pub use builtin::{
    builtin_tools, ChangeSkyboxTool, PlaySoundEffectTool, SetPlayerAttributeTool, SpawnEntityTool,
};
pub use dynamic::DynamicTool;
pub use in_memory::InMemoryToolRegistry;
