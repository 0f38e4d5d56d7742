use crate::errors::NavResult;
use crate::level::{LevelContext, LevelDefinition};
use crate::pathfinding::LevelNavigation;
use crate::resources::{NavConfig, NavSettings};
use bevy::prelude::*;

/// Keeps a `LevelNavigation` resource in step with the loaded `LevelContext`.
pub struct NavigationPlugin;

impl Plugin for NavigationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_configured_level).add_systems(
            PreUpdate,
            rebuild_navigation.run_if(
                resource_exists_and_changed::<LevelContext>
                    .or(resource_exists_and_changed::<NavConfig>),
            ),
        );
    }
}

/// Load the level named in the settings unless one was inserted already
fn load_configured_level(
    mut commands: Commands,
    context: Option<Res<LevelContext>>,
    nav_config: Option<Res<NavConfig>>,
) {
    if context.is_some() {
        return;
    }
    let settings = nav_config
        .map(|config| config.settings.clone())
        .unwrap_or_default();

    info!("Attempting to load level from: {}", settings.level_file_path);
    match load_level(&settings) {
        Ok(context) => commands.insert_resource(context),
        Err(err) => warn!("No level loaded, navigation unavailable: {err}"),
    }
}

pub fn load_level(settings: &NavSettings) -> NavResult<LevelContext> {
    LevelDefinition::load_from_file(&settings.level_file_path)?.into_context()
}

fn rebuild_navigation(
    mut commands: Commands,
    context: Option<Res<LevelContext>>,
    nav_config: Option<Res<NavConfig>>,
) {
    let Some(context) = context else {
        return;
    };
    let settings = nav_config
        .map(|config| config.settings.clone())
        .unwrap_or_default();

    match build_navigation(&context, &settings) {
        Ok(navigation) => {
            info!(
                "Level navigation ready: {} vertices, {} path edges",
                navigation.vertices().len(),
                navigation.paths().num_edges()
            );
            commands.insert_resource(navigation);
        }
        Err(err) => {
            error!("Failed to build level navigation: {err}");
            commands.remove_resource::<LevelNavigation>();
        }
    }
}

pub fn build_navigation(context: &LevelContext, settings: &NavSettings) -> NavResult<LevelNavigation> {
    let offset = settings.footprint_offset()?;
    LevelNavigation::build(context, offset, settings.max_span())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::NavError;
    use crate::level::TileGrid;

    fn context(rows: &[&str]) -> LevelContext {
        LevelContext::new(TileGrid::from_rows(rows, 16).unwrap(), vec![]).unwrap()
    }

    fn app() -> App {
        let mut app = App::new();
        app.add_plugins(NavigationPlugin);
        app
    }

    #[test]
    fn test_navigation_built_when_level_inserted() {
        let mut app = app();
        app.update();
        assert!(app.world().get_resource::<LevelNavigation>().is_none());

        app.insert_resource(context(&["...", ".#.", "..."]));
        app.update();

        let navigation = app.world().resource::<LevelNavigation>();
        assert_eq!(navigation.vertices().len(), 4);
        assert_eq!(navigation.max_span(), NavSettings::default().max_span());
    }

    #[test]
    fn test_navigation_replaced_on_new_level() {
        let mut app = app();
        app.insert_resource(context(&["...", ".#.", "..."]));
        app.update();
        assert_eq!(app.world().resource::<LevelNavigation>().vertices().len(), 4);

        app.insert_resource(context(&[".....", ".#.#.", "....."]));
        app.update();
        assert_eq!(app.world().resource::<LevelNavigation>().vertices().len(), 8);
    }

    #[test]
    fn test_bad_footprint_removes_navigation() {
        let mut app = app();
        app.insert_resource(context(&["...", ".#.", "..."]));
        app.update();
        assert!(app.world().get_resource::<LevelNavigation>().is_some());

        // Anchor outside the agent's own footprint
        let mut config = NavConfig::default();
        config.settings.agent_footprint_ul = IVec2::new(2, 2);
        config.settings.agent_footprint_dr = IVec2::new(4, 4);
        app.insert_resource(config);
        app.update();
        assert!(app.world().get_resource::<LevelNavigation>().is_none());
    }

    #[test]
    fn test_missing_level_file_is_reported() {
        let mut settings = NavSettings::default();
        settings.level_file_path = "does_not_exist/missing.bin".to_string();
        assert!(matches!(
            load_level(&settings),
            Err(NavError::LevelFileNotFound { .. })
        ));
    }

    #[test]
    fn test_build_navigation_uses_settings() {
        let mut settings = NavSettings::default();
        settings.agent_footprint_ul = IVec2::ZERO;
        settings.agent_footprint_dr = IVec2::ZERO;
        let navigation = build_navigation(&context(&["...", ".#.", "..."]), &settings).unwrap();
        assert_eq!(navigation.paths().num_edges(), 4);
    }
}
