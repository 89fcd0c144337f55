//! Built-in game-world tools
//!
//! Each tool validates its input format and answers with an observation
//! string. Malformed input yields a soft "Error -" observation instead of a
//! hard failure so the agent loop can read the problem and retry.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::tool::Tool;

/// Sets an attribute on the player character
///
/// Input format: `attribute=value`, e.g. `speed=10` or `health=100`.
#[derive(Debug, Default)]
pub struct SetPlayerAttributeTool;

#[async_trait]
impl Tool for SetPlayerAttributeTool {
    fn name(&self) -> &str {
        "set_player_attribute"
    }

    fn description(&self) -> &str {
        "Sets an attribute for the player character. Input should be in the format \
         'attribute_name=value' (e.g., 'speed=10', 'health=100', 'mana=50')."
    }

    async fn invoke(&self, input: &str) -> String {
        let input = input.trim();

        let Some((attribute, value)) = input.split_once('=') else {
            return "Error - Invalid format for set_player_attribute. Expected 'attribute_name=value'."
                .to_string();
        };

        let attribute = attribute.trim();
        let value = value.trim();

        if attribute.is_empty() || value.is_empty() {
            return "Error - Attribute name or value cannot be empty.".to_string();
        }

        format!("Player attribute '{}' set to '{}'.", attribute, value)
    }
}

/// Spawns an entity in the game world
///
/// Input format: `entity_type,x,y,z` with numeric coordinates.
#[derive(Debug, Default)]
pub struct SpawnEntityTool;

#[async_trait]
impl Tool for SpawnEntityTool {
    fn name(&self) -> &str {
        "spawn_entity"
    }

    fn description(&self) -> &str {
        "Spawns an entity in the game world. Input should be in the format \
         'entity_type,x,y,z' (e.g., 'goblin,10,0,5', 'health_potion,0,1,0')."
    }

    async fn invoke(&self, input: &str) -> String {
        let parts: Vec<&str> = input.trim().split(',').map(str::trim).collect();

        if parts.len() != 4 {
            return "Error - Invalid format for spawn_entity. Expected 'entity_type,x,y,z'."
                .to_string();
        }

        let (entity_type, coords) = (parts[0], &parts[1..]);

        if entity_type.is_empty() {
            return "Error - Entity type cannot be empty.".to_string();
        }

        if coords.iter().any(|c| c.parse::<f64>().is_err()) {
            return "Error - Invalid coordinates for spawn_entity. x, y, z must be numbers."
                .to_string();
        }

        format!(
            "Entity '{}' spawned at coordinates ({}, {}, {}).",
            entity_type, coords[0], coords[1], coords[2]
        )
    }
}

/// Changes the skybox theme or color
#[derive(Debug, Default)]
pub struct ChangeSkyboxTool;

#[async_trait]
impl Tool for ChangeSkyboxTool {
    fn name(&self) -> &str {
        "change_skybox"
    }

    fn description(&self) -> &str {
        "Changes the skybox in the game. Input should be a skybox theme or color \
         (e.g., 'night_sky', 'crimson_sunset', 'blue')."
    }

    async fn invoke(&self, input: &str) -> String {
        let theme = input.trim();

        if theme.is_empty() {
            return "Error - Skybox theme/color cannot be empty.".to_string();
        }

        format!("Skybox changed to '{}'.", theme)
    }
}

/// Plays a named sound effect
#[derive(Debug, Default)]
pub struct PlaySoundEffectTool;

#[async_trait]
impl Tool for PlaySoundEffectTool {
    fn name(&self) -> &str {
        "play_sound_effect"
    }

    fn description(&self) -> &str {
        "Plays a sound effect. Input should be the name of the sound effect \
         (e.g., 'explosion', 'player_jump', 'door_open')."
    }

    async fn invoke(&self, input: &str) -> String {
        let sound = input.trim();

        if sound.is_empty() {
            return "Error - Sound effect name cannot be empty.".to_string();
        }

        format!("Sound effect '{}' played.", sound)
    }
}

/// All built-in tools, in their canonical registration order
pub fn builtin_tools() -> Vec<Arc<dyn Tool>> {
    vec![
        Arc::new(SetPlayerAttributeTool),
        Arc::new(SpawnEntityTool),
        Arc::new(ChangeSkyboxTool),
        Arc::new(PlaySoundEffectTool),
    ]
}
