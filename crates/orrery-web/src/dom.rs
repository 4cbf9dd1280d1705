//! Host page interop
//!
//! The page owns the tooltip, back button, content panels, nav links and
//! loading screen. Every element is optional: anything missing from the page
//! is skipped without complaint.

use orrery_core::OrreryConfig;
use tracing::{info, warn};

/// Configuration from the page's inline `<script id="orrery-config">` block, or defaults
pub fn inline_config() -> OrreryConfig {
    let Some(text) = js_interop::inline_config_text() else {
        return OrreryConfig::default();
    };

    match OrreryConfig::from_toml_str(&text) {
        Ok(config) => {
            info!(bodies = config.bodies.len(), "Loaded inline configuration");
            config
        }
        Err(e) => {
            warn!(error = %e, "Inline configuration rejected, using defaults");
            OrreryConfig::default()
        }
    }
}

// ============================================================================
// JavaScript Interop (WASM only)
// ============================================================================

#[cfg(target_arch = "wasm32")]
mod js_interop {
    use bevy::prelude::*;
    use orrery_core::config::PageConfig;
    use orrery_core::{HostPage, PageCommand, SectionId};
    use orrery_scene::{HostRequest, HostRequests, PageHost};
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use web_sys::{Document, Element, HtmlElement};

    const CONFIG_SCRIPT_ID: &str = "orrery-config";
    const ACTIVE: &str = "active";
    const SHOW: &str = "show";
    const HIDDEN: &str = "hidden";

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn select_one(document: &Document, selector: &str) -> Option<Element> {
        document.query_selector(selector).ok().flatten()
    }

    fn select_all(document: &Document, selector: &str) -> Vec<Element> {
        let Ok(nodes) = document.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn set_style(element: &Element, property: &str, value: &str) {
        if let Some(html) = element.dyn_ref::<HtmlElement>() {
            html.style().set_property(property, value).ok();
        }
    }

    fn set_class(element: &Element, class: &str, on: bool) {
        let classes = element.class_list();
        if on {
            classes.add_1(class).ok();
        } else {
            classes.remove_1(class).ok();
        }
    }

    pub fn inline_config_text() -> Option<String> {
        document()?
            .get_element_by_id(CONFIG_SCRIPT_ID)?
            .text_content()
    }

    /// Applies page commands to the live DOM; holds no element handles between calls
    pub struct DomHost {
        page: PageConfig,
    }

    impl DomHost {
        fn activate_section(&self, document: &Document, section: Option<&SectionId>) {
            if let Some(container) = select_one(document, &self.page.content_container) {
                set_class(&container, ACTIVE, section.is_some());
            }

            for panel in select_all(document, &self.page.section_selector) {
                let matches = section.is_some_and(|id| panel.id() == id.as_str());
                set_class(&panel, ACTIVE, matches);
            }

            for link in select_all(document, &self.page.nav_link_selector) {
                let matches = section.is_some_and(|id| {
                    link.get_attribute(&self.page.section_attribute).as_deref() == Some(id.as_str())
                });
                set_class(&link, ACTIVE, matches);
            }
        }
    }

    impl HostPage for DomHost {
        fn apply(&mut self, command: &PageCommand) {
            let Some(document) = document() else { return };

            match command {
                PageCommand::ShowTooltip { text, position } => {
                    if let Some(tooltip) = document.get_element_by_id(&self.page.tooltip_id) {
                        tooltip.set_text_content(Some(text));
                        set_style(&tooltip, "left", &format!("{}px", position.x));
                        set_style(&tooltip, "top", &format!("{}px", position.y));
                        set_class(&tooltip, SHOW, true);
                    }
                }
                PageCommand::HideTooltip => {
                    if let Some(tooltip) = document.get_element_by_id(&self.page.tooltip_id) {
                        set_class(&tooltip, SHOW, false);
                    }
                }
                PageCommand::SetCursor(cursor) => {
                    if let Some(canvas) = select_one(&document, &self.page.canvas) {
                        set_style(&canvas, "cursor", cursor.css());
                    }
                }
                PageCommand::SetBackVisible(visible) => {
                    if let Some(back) = document.get_element_by_id(&self.page.back_button_id) {
                        set_style(&back, "display", if *visible { "block" } else { "none" });
                    }
                }
                PageCommand::ActivateSection(section) => {
                    self.activate_section(&document, section.as_ref());
                }
                PageCommand::HideLoading => {
                    if let Some(loading) = document.get_element_by_id(&self.page.loading_id) {
                        set_class(&loading, HIDDEN, true);
                    }
                }
            }
        }
    }

    /// Attach the DOM host and route nav link and back button clicks into the scene
    pub fn attach(app: &mut App, page: &PageConfig) {
        let requests = app.world().resource::<HostRequests>().clone();
        if let Some(document) = document() {
            wire_controls(&document, page, &requests);
        } else {
            tracing::warn!("No document, page controls not wired");
        }
        app.insert_resource(PageHost(Box::new(DomHost { page: page.clone() })));
    }

    fn listen(element: &Element, handler: impl FnMut(web_sys::Event) + 'static) {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(_)>);
        element
            .add_event_listener_with_callback(
                "click",
                closure.as_ref().unchecked_ref::<js_sys::Function>(),
            )
            .ok();
        closure.forget();
    }

    fn wire_controls(document: &Document, page: &PageConfig, requests: &HostRequests) {
        let links = select_all(document, &page.nav_link_selector);
        for link in &links {
            let requests = requests.clone();
            let attribute = page.section_attribute.clone();
            let target = link.clone();
            listen(link, move |event: web_sys::Event| {
                event.prevent_default();
                if let Some(section) = target.get_attribute(&attribute) {
                    requests.push(HostRequest::Select(SectionId::new(section)));
                }
            });
        }

        if let Some(back) = document.get_element_by_id(&page.back_button_id) {
            let requests = requests.clone();
            listen(&back, move |_event: web_sys::Event| {
                requests.push(HostRequest::Back);
            });
        }

        tracing::info!(links = links.len(), "Page controls wired");
    }
}

// Non-WASM stubs
#[cfg(not(target_arch = "wasm32"))]
mod js_interop {
    /// No page to read from outside the browser
    pub fn inline_config_text() -> Option<String> {
        None
    }
}

#[cfg(target_arch = "wasm32")]
pub use js_interop::attach;
