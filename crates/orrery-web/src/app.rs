//! Bevy application setup

use bevy::prelude::*;
use orrery_core::{ConfigError, OrreryConfig};
use orrery_scene::{OrreryContext, OrreryScenePlugin};

/// Build the app for the current target without running it
pub fn build(config: OrreryConfig) -> Result<App, ConfigError> {
    let page = config.page.clone();
    let context = OrreryContext::new(config)?;

    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Orrery".to_string(),
            canvas: Some(page.canvas.clone()),
            fit_canvas_to_parent: true,
            prevent_default_event_handling: false,
            ..default()
        }),
        ..default()
    }))
    .insert_resource(context)
    .add_plugins(OrreryScenePlugin);

    #[cfg(target_arch = "wasm32")]
    crate::dom::attach(&mut app, &page);

    #[cfg(not(target_arch = "wasm32"))]
    app.add_plugins(orrery_scene::overlay::OverlayPlugin);

    Ok(app)
}

pub fn run(config: OrreryConfig) -> Result<AppExit, ConfigError> {
    Ok(build(config)?.run())
}
