//! The application context
//!
//! One [`Orrery`] owns every piece of mutable state for the lifetime of the
//! page. The per-frame driver calls [`Orrery::tick`], input handlers call the
//! pointer and navigation methods, and the attached host drains the page
//! commands those calls produce.

use glam::Vec2;
use std::time::Duration;
use tracing::{debug, info};

use crate::body::OrbitalBodySet;
use crate::config::{ConfigError, OrreryConfig};
use crate::controls::{rig_from_config, CameraPose, CameraRig, RigInput};
use crate::navigation::{
    Destination, NavigationEvent, NavigationRequest, NavigationState, Navigator, SectionId,
};
use crate::page::{Cursor, PageCommand, PageOutbox, PageState};
use crate::picking::{pick, HoverController, HoverOutcome, PointerState, Ray, Viewport};
use crate::plasma::SunSurface;
use crate::schedule::{DeferredTask, Scheduler};
use crate::starfield::Starfield;

pub struct Orrery {
    config: OrreryConfig,
    bodies: OrbitalBodySet,
    starfield: Starfield,
    sun: SunSurface,
    navigator: Navigator,
    hover: HoverController,
    scheduler: Scheduler,
    rig: Box<dyn CameraRig>,
    viewport: Viewport,
    page: PageOutbox,
    frames: u64,
}

impl Orrery {
    pub fn new(config: OrreryConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let bodies = OrbitalBodySet::from_definitions(&config.bodies, config.motion.spin_step);
        let starfield = Starfield::from_config(&config.starfield);
        let navigator = Navigator::new(Duration::from_millis(config.navigation.guard_interval_ms));
        let hover = HoverController::new(Vec2::from_array(config.navigation.tooltip_offset));

        let mut scheduler = Scheduler::new();
        scheduler.schedule_after(
            Duration::from_millis(config.navigation.loading_delay_ms),
            DeferredTask::HideLoading,
        );

        info!(
            bodies = bodies.len(),
            stars = starfield.points().len(),
            "Orrery initialized"
        );

        Ok(Self {
            sun: SunSurface::new(&config.sun),
            rig: rig_from_config(&config.camera),
            bodies,
            starfield,
            navigator,
            hover,
            scheduler,
            viewport: Viewport::default(),
            page: PageOutbox::default(),
            frames: 0,
            config,
        })
    }

    pub fn config(&self) -> &OrreryConfig {
        &self.config
    }

    pub fn bodies(&self) -> &OrbitalBodySet {
        &self.bodies
    }

    pub fn starfield(&self) -> &Starfield {
        &self.starfield
    }

    pub fn sun(&self) -> &SunSurface {
        &self.sun
    }

    pub fn navigation(&self) -> &NavigationState {
        self.navigator.state()
    }

    pub fn page(&self) -> &PageState {
        self.page.state()
    }

    pub fn pointer(&self) -> PointerState {
        self.hover.pointer()
    }

    pub fn rig(&self) -> &dyn CameraRig {
        self.rig.as_ref()
    }

    pub fn camera_pose(&self) -> CameraPose {
        self.rig.pose()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Frames ticked since startup
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// One frame: deferred tasks, sun, bodies, starfield, camera, in that order
    pub fn tick(&mut self, dt: f32, input: &RigInput) -> CameraPose {
        for task in self.scheduler.advance(f64::from(dt.max(0.0))) {
            self.run_task(task);
        }

        let dt = dt.clamp(0.0, self.config.motion.max_frame_delta);
        self.sun.advance(dt);
        if self.navigator.state().is_overview() {
            self.bodies.advance(dt * self.config.motion.reference_fps);
        }
        self.starfield.advance();
        let pose = self.rig.update(input);

        self.frames += 1;
        pose
    }

    fn run_task(&mut self, task: DeferredTask) {
        match task {
            DeferredTask::SettleTransition(ticket) => {
                if let Some(NavigationEvent::Arrived(to)) =
                    self.navigator.apply(NavigationRequest::Settle(ticket))
                {
                    info!(?to, "Navigation settled");
                }
            }
            DeferredTask::HideLoading => {
                debug!("Hiding loading indicator");
                self.page.issue(PageCommand::HideLoading);
            }
        }
    }

    /// Pointer moved over the surface; `ray` is the camera ray through it, if the engine produced one
    pub fn pointer_moved(&mut self, client: Vec2, ray: Option<Ray>) -> Option<HoverOutcome> {
        if !self.navigator.state().is_overview() {
            return None;
        }

        let outcome = self
            .hover
            .hover(client, ray.as_ref(), &self.viewport, &mut self.bodies);
        match &outcome {
            HoverOutcome::Over {
                name, tooltip_at, ..
            } => {
                self.page.issue(PageCommand::ShowTooltip {
                    text: name.clone(),
                    position: *tooltip_at,
                });
                self.page.issue(PageCommand::SetCursor(Cursor::Pointer));
            }
            HoverOutcome::Clear => {
                self.page.issue(PageCommand::HideTooltip);
                self.page.issue(PageCommand::SetCursor(Cursor::Default));
            }
        }
        Some(outcome)
    }

    /// Click on the surface; returns whether it started a transition
    pub fn clicked(&mut self, client: Vec2, ray: Option<Ray>) -> bool {
        if !self.navigator.state().is_overview() {
            return false;
        }
        self.hover.track(client, &self.viewport);

        let section = ray
            .and_then(|ray| pick(&ray, &self.bodies))
            .and_then(|hit| self.bodies.get(hit.index))
            .map(|body| body.section.clone());
        match section {
            Some(section) => self.select(section),
            None => false,
        }
    }

    /// Request the named section; returns whether a transition started
    pub fn select(&mut self, section: SectionId) -> bool {
        self.request(NavigationRequest::Select(section))
    }

    /// Request the overview; returns whether a transition started
    pub fn back(&mut self) -> bool {
        self.request(NavigationRequest::Back)
    }

    fn request(&mut self, request: NavigationRequest) -> bool {
        let Some(NavigationEvent::Departed { to, ticket }) = self.navigator.apply(request) else {
            return false;
        };

        self.scheduler.schedule_after(
            self.navigator.guard_interval(),
            DeferredTask::SettleTransition(ticket),
        );

        match to {
            Destination::Section(id) => {
                if self.bodies.find_section(&id).is_none() {
                    debug!(section = %id, "No body for section");
                }
                self.bodies.set_highlight(None);
                self.page.issue(PageCommand::HideTooltip);
                self.page.issue(PageCommand::SetCursor(Cursor::Default));
                self.page.issue(PageCommand::SetBackVisible(true));
                self.page.issue(PageCommand::ActivateSection(Some(id)));
            }
            Destination::Overview => {
                self.page.issue(PageCommand::SetBackVisible(false));
                self.page.issue(PageCommand::ActivateSection(None));
            }
        }
        true
    }

    pub fn resize(&mut self, viewport: Viewport) {
        debug!(width = viewport.size.x, height = viewport.size.y, "Viewport resized");
        self.viewport = viewport;
    }

    pub fn drain_page_commands(&mut self) -> Vec<PageCommand> {
        self.page.drain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use glam::Vec3;
    use std::f32::consts::TAU;

    const FRAME: f32 = 1.0 / 60.0;

    fn orrery() -> Orrery {
        let mut config = OrreryConfig::default();
        config.starfield.count = 100;
        config.starfield.seed = Some(7);
        Orrery::new(config).unwrap()
    }

    fn idle(orrery: &mut Orrery, frames: usize) {
        for _ in 0..frames {
            orrery.tick(FRAME, &RigInput::default());
        }
    }

    /// Straight down through the named body's current position
    fn ray_onto(orrery: &Orrery, name: &str) -> Ray {
        let body = orrery.bodies().iter().find(|b| b.name == name).unwrap();
        Ray::new(body.position() + Vec3::Y * 40.0, Vec3::NEG_Y).unwrap()
    }

    fn empty_ray() -> Ray {
        Ray::new(Vec3::new(0.0, 40.0, 40.0), Vec3::Y).unwrap()
    }

    fn angles(orrery: &Orrery) -> Vec<f32> {
        orrery.bodies().iter().map(|b| b.angle()).collect()
    }

    #[test]
    fn test_overview_ticks_advance_angles() {
        let mut orrery = orrery();
        let initial = angles(&orrery);
        idle(&mut orrery, 600);

        for (body, start) in orrery.bodies().iter().zip(initial) {
            let expected = (start + 600.0 * body.angular_speed).rem_euclid(TAU);
            assert_abs_diff_eq!(body.angle(), expected, epsilon = 1e-3);
            let p = body.position();
            assert_abs_diff_eq!(p.x.hypot(p.z), body.orbit_radius, epsilon = 1e-4);
        }
        assert_eq!(orrery.frames(), 600);
    }

    #[test]
    fn test_bodies_frozen_outside_overview() {
        let mut orrery = orrery();
        assert!(orrery.select("projects".into()));
        let frozen = angles(&orrery);

        idle(&mut orrery, 10);
        assert!(orrery.navigation().is_transitioning());
        assert_eq!(angles(&orrery), frozen);

        idle(&mut orrery, 60);
        assert_eq!(orrery.navigation().section(), Some(&SectionId::new("projects")));
        assert_eq!(angles(&orrery), frozen);
    }

    #[test]
    fn test_hover_over_projects() {
        let mut orrery = orrery();
        let ray = ray_onto(&orrery, "Projects");
        let outcome = orrery.pointer_moved(Vec2::new(300.0, 200.0), Some(ray));

        assert!(matches!(outcome, Some(HoverOutcome::Over { index: 1, .. })));
        let page = orrery.page();
        let tooltip = page.tooltip.as_ref().unwrap();
        assert_eq!(tooltip.text, "Projects");
        assert_eq!(tooltip.position, Vec2::new(315.0, 170.0));
        assert_eq!(page.cursor, Cursor::Pointer);

        for body in orrery.bodies().iter() {
            assert_eq!(body.is_highlighted(), body.name == "Projects");
        }

        orrery.pointer_moved(Vec2::new(10.0, 10.0), Some(empty_ray()));
        assert!(orrery.page().tooltip.is_none());
        assert_eq!(orrery.page().cursor, Cursor::Default);
        assert_eq!(orrery.bodies().highlighted(), None);
    }

    #[test]
    fn test_click_contact_opens_section() {
        let mut orrery = orrery();
        let ray = ray_onto(&orrery, "Contact");
        assert!(orrery.clicked(Vec2::new(100.0, 100.0), Some(ray)));
        assert!(orrery.navigation().is_transitioning());

        idle(&mut orrery, 17);
        assert!(orrery.navigation().is_transitioning());
        idle(&mut orrery, 2);

        assert_eq!(orrery.navigation(), &NavigationState::Section("contact".into()));
        let page = orrery.page();
        assert_eq!(page.active_section, Some(SectionId::new("contact")));
        assert!(page.back_visible);
        assert!(page.tooltip.is_none());
    }

    #[test]
    fn test_click_on_nothing_stays_in_overview() {
        let mut orrery = orrery();
        assert!(!orrery.clicked(Vec2::ZERO, Some(empty_ray())));
        assert!(!orrery.clicked(Vec2::ZERO, None));
        assert!(orrery.navigation().is_overview());
    }

    #[test]
    fn test_input_ignored_while_transitioning() {
        let mut orrery = orrery();
        let contact = ray_onto(&orrery, "Contact");
        let home = ray_onto(&orrery, "Home");
        assert!(orrery.clicked(Vec2::ZERO, Some(contact)));
        let state = orrery.navigation().clone();

        assert!(!orrery.clicked(Vec2::ZERO, Some(home)));
        assert!(!orrery.select("home".into()));
        assert!(!orrery.back());
        assert_eq!(orrery.pointer_moved(Vec2::ZERO, Some(home)), None);
        assert_eq!(orrery.navigation(), &state);
        assert_eq!(orrery.bodies().highlighted(), None);

        idle(&mut orrery, 30);
        assert_eq!(orrery.navigation().section(), Some(&SectionId::new("contact")));
    }

    #[test]
    fn test_hover_and_click_disabled_in_section() {
        let mut orrery = orrery();
        orrery.select("home".into());
        idle(&mut orrery, 30);

        let ray = ray_onto(&orrery, "Projects");
        assert_eq!(orrery.pointer_moved(Vec2::ZERO, Some(ray)), None);
        assert!(!orrery.clicked(Vec2::ZERO, Some(ray)));
        assert!(orrery.page().tooltip.is_none());
        assert_eq!(orrery.bodies().highlighted(), None);
    }

    #[test]
    fn test_select_back_returns_to_clean_overview() {
        let mut orrery = orrery();
        let ray = ray_onto(&orrery, "Home");
        orrery.pointer_moved(Vec2::ZERO, Some(ray));
        assert_eq!(orrery.bodies().highlighted(), Some(0));

        assert!(orrery.select("home".into()));
        idle(&mut orrery, 30);
        assert!(orrery.back());
        idle(&mut orrery, 30);

        assert_eq!(orrery.navigation(), &NavigationState::Overview);
        assert_eq!(orrery.bodies().highlighted(), None);
        let page = orrery.page();
        assert_eq!(page.active_section, None);
        assert!(!page.back_visible);
        assert!(page.tooltip.is_none());
    }

    #[test]
    fn test_starfield_turns_in_every_state() {
        let mut orrery = orrery();
        let mut last = orrery.starfield().rotation();
        let mut step = |orrery: &mut Orrery| {
            orrery.tick(FRAME, &RigInput::default());
            assert!(orrery.starfield().rotation() > last);
            last = orrery.starfield().rotation();
        };

        step(&mut orrery);
        orrery.select("publications".into());
        step(&mut orrery);
        for _ in 0..30 {
            step(&mut orrery);
        }
        assert!(orrery.navigation().section().is_some());
        step(&mut orrery);
    }

    #[test]
    fn test_sun_time_always_advances() {
        let mut orrery = orrery();
        orrery.select("home".into());
        idle(&mut orrery, 60);
        assert_abs_diff_eq!(orrery.sun().elapsed(), 0.5, epsilon = 1e-3);
    }

    #[test]
    fn test_long_frames_are_clamped() {
        let mut orrery = orrery();
        let start = orrery.bodies().get(0).unwrap().angle();
        orrery.tick(30.0, &RigInput::default());
        let moved = orrery.bodies().get(0).unwrap().angle() - start;
        assert_abs_diff_eq!(moved, 0.001 * 0.25 * 60.0, epsilon = 1e-5);
    }

    #[test]
    fn test_loading_hidden_once_after_delay() {
        let mut orrery = orrery();
        assert!(orrery.page().loading_visible);
        idle(&mut orrery, 60);
        assert!(orrery.page().loading_visible);
        idle(&mut orrery, 40);
        assert!(!orrery.page().loading_visible);

        let commands = orrery.drain_page_commands();
        assert_eq!(
            commands.iter().filter(|c| **c == PageCommand::HideLoading).count(),
            1
        );
    }

    #[test]
    fn test_page_commands_for_section_round_trip() {
        let mut orrery = orrery();
        orrery.drain_page_commands();

        orrery.select("projects".into());
        assert_eq!(
            orrery.drain_page_commands(),
            vec![
                PageCommand::SetBackVisible(true),
                PageCommand::ActivateSection(Some("projects".into())),
            ]
        );

        idle(&mut orrery, 30);
        orrery.drain_page_commands();
        orrery.back();
        assert_eq!(
            orrery.drain_page_commands(),
            vec![
                PageCommand::SetBackVisible(false),
                PageCommand::ActivateSection(None),
            ]
        );
    }

    #[test]
    fn test_unknown_section_still_navigates() {
        let mut orrery = orrery();
        assert!(orrery.select("blog".into()));
        idle(&mut orrery, 30);
        assert_eq!(orrery.navigation().section(), Some(&SectionId::new("blog")));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = OrreryConfig::default();
        config.bodies.clear();
        assert!(Orrery::new(config).is_err());
    }

    #[test]
    fn test_resize_updates_pointer_normalization() {
        let mut orrery = orrery();
        orrery.resize(Viewport::new(400.0, 200.0));
        orrery.pointer_moved(Vec2::new(200.0, 100.0), None);
        assert_eq!(orrery.pointer().ndc, Vec2::ZERO);
    }
}
