//! Native page chrome drawn with egui
//!
//! Stands in for the surrounding web page when the scene runs as a desktop
//! app: a nav bar, the hover tooltip, the back button, a content window for
//! the open section and the loading veil. It reads page state straight from
//! the context and sends navigation through [`HostRequests`] like any other host.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPlugin, EguiPrimaryContextPass};
use orrery_core::{Cursor, PageState, SectionId};

use crate::controls::PointerCapture;
use crate::navigation::{HostRequest, HostRequests};
use crate::OrreryContext;

pub struct OverlayPlugin;

impl Plugin for OverlayPlugin {
    fn build(&self, app: &mut App) {
        // bevy_egui only enables its picking integration when PickingPlugin is already present
        if !app.is_plugin_added::<bevy_picking::PickingPlugin>() {
            app.add_plugins(bevy_picking::DefaultPickingPlugins);
        }
        app.add_plugins(EguiPlugin::default())
            .add_systems(EguiPrimaryContextPass, overlay_ui);
    }
}

/// Title and body text for the window of an open section
fn section_content(ctx: &OrreryContext, section: &SectionId) -> (String, String) {
    let body = ctx
        .bodies()
        .find_section(section)
        .and_then(|index| ctx.bodies().get(index));
    match body {
        Some(body) => (
            body.name.clone(),
            body.summary
                .clone()
                .unwrap_or_else(|| format!("The {} section.", body.name)),
        ),
        None => (section.to_string(), String::new()),
    }
}

fn overlay_ui(
    mut contexts: EguiContexts,
    ctx: Res<OrreryContext>,
    requests: Res<HostRequests>,
    mut capture: ResMut<PointerCapture>,
) {
    let Ok(egui_ctx) = contexts.ctx_mut() else { return };
    let page: &PageState = ctx.page();

    // Nav bar
    egui::TopBottomPanel::top("orrery_nav").show(egui_ctx, |ui| {
        ui.horizontal(|ui| {
            ui.heading("Orrery");
            ui.separator();
            for body in ctx.bodies().iter() {
                let active = page.active_section.as_ref() == Some(&body.section);
                if ui.selectable_label(active, &body.name).clicked() {
                    requests.push(HostRequest::Select(body.section.clone()));
                }
            }
        });
    });

    if page.back_visible {
        egui::Area::new(egui::Id::new("orrery_back"))
            .anchor(egui::Align2::LEFT_TOP, egui::vec2(16.0, 48.0))
            .show(egui_ctx, |ui| {
                if ui.button("← Back").clicked() {
                    requests.push(HostRequest::Back);
                }
            });
    }

    if let Some(section) = &page.active_section {
        let (title, text) = section_content(&ctx, section);
        egui::Window::new(title)
            .id(egui::Id::new("orrery_content"))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(egui_ctx, |ui| {
                ui.set_min_width(320.0);
                ui.label(text);
            });
    }

    if let Some(tooltip) = &page.tooltip {
        egui::Area::new(egui::Id::new("orrery_tooltip"))
            .order(egui::Order::Tooltip)
            .interactable(false)
            .fixed_pos(egui::pos2(tooltip.position.x, tooltip.position.y))
            .show(egui_ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.label(&tooltip.text);
                });
            });
    }

    if page.cursor == Cursor::Pointer {
        egui_ctx.set_cursor_icon(egui::CursorIcon::PointingHand);
    }

    if page.loading_visible {
        let screen = egui_ctx.screen_rect();
        egui::Area::new(egui::Id::new("orrery_loading"))
            .order(egui::Order::Foreground)
            .fixed_pos(screen.min)
            .show(egui_ctx, |ui| {
                ui.painter()
                    .rect_filled(screen, 0.0, egui::Color32::from_black_alpha(235));
                ui.painter().text(
                    screen.center(),
                    egui::Align2::CENTER_CENTER,
                    "Loading...",
                    egui::FontId::proportional(24.0),
                    egui::Color32::WHITE,
                );
                ui.allocate_rect(screen, egui::Sense::click());
            });
    }

    capture.ui_wants_pointer = egui_ctx.wants_pointer_input() || egui_ctx.is_pointer_over_area();
}
