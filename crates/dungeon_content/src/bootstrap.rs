//! Builds the environment scripts run against.

use dungeon_foundation::Result;
use dungeon_semantic::{BuilderConfig, DslEnvironment};
use log::info;

use crate::animation::AnimationBuilder;
use crate::components::{HealthComponent, PositionComponent, VelocityComponent};
use crate::graphs::DungeonGraphBuilder;
use crate::quest::Quest;

/// Builds the game environment with the default builder configuration.
///
/// # Errors
///
/// Returns an error if any game type cannot be mirrored.
pub fn game_environment() -> Result<DslEnvironment> {
    game_environment_with_config(BuilderConfig::default())
}

/// Builds the game environment with a custom builder configuration.
///
/// Adapters are registered before the types that reference them.
///
/// # Errors
///
/// Returns an error if any game type cannot be mirrored.
pub fn game_environment_with_config(config: BuilderConfig) -> Result<DslEnvironment> {
    let mut env = DslEnvironment::with_config(config);

    env.register_adapters::<AnimationBuilder>()?;
    env.register_adapters::<DungeonGraphBuilder>()?;

    env.register::<VelocityComponent>()?;
    env.register::<HealthComponent>()?;
    env.register::<PositionComponent>()?;
    env.register::<Quest>()?;

    info!("game environment ready with {} types", env.type_names().len());
    Ok(env)
}
