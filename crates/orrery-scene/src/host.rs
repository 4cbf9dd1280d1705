//! Delivery of page commands to the attached host

use bevy::prelude::*;
use orrery_core::HostPage;
use tracing::trace;

use crate::{OrreryContext, OrrerySet};

/// The page the scene is embedded in; optional, since an overlay may read state directly
#[derive(Resource)]
pub struct PageHost(pub Box<dyn HostPage + Send + Sync>);

pub struct HostPlugin;

impl Plugin for HostPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, flush_page_commands.in_set(OrrerySet::Host));
    }
}

fn flush_page_commands(mut ctx: ResMut<OrreryContext>, host: Option<ResMut<PageHost>>) {
    let commands = ctx.drain_page_commands();
    match host {
        Some(mut host) => {
            for command in &commands {
                host.0.apply(command);
            }
        }
        None => {
            for command in &commands {
                trace!(?command, "No page host attached");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_core::{OrreryConfig, PageCommand, PageState};
    use std::sync::{Arc, Mutex};

    /// Records every command it is handed
    struct Recorder(Arc<Mutex<Vec<PageCommand>>>);

    impl HostPage for Recorder {
        fn apply(&mut self, command: &PageCommand) {
            if let Ok(mut seen) = self.0.lock() {
                seen.push(command.clone());
            }
        }
    }

    #[test]
    fn test_commands_reach_host() {
        let mut config = OrreryConfig::default();
        config.starfield.count = 10;
        let seen = Arc::new(Mutex::new(Vec::new()));

        let mut app = App::new();
        app.insert_resource(OrreryContext::new(config).unwrap())
            .insert_resource(PageHost(Box::new(Recorder(seen.clone()))))
            .add_systems(Update, flush_page_commands);

        app.world_mut()
            .resource_mut::<OrreryContext>()
            .select("contact".into());
        app.update();

        let mut mirror = PageState::default();
        for command in seen.lock().unwrap().iter() {
            mirror.apply(command);
        }
        assert_eq!(&mirror, app.world().resource::<OrreryContext>().page());
        assert!(mirror.back_visible);
    }
}
