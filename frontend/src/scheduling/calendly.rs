use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::{Function, Object, Reflect};
use web_sys::{Document, Element, HtmlElement};

use crate::config;
use crate::scheduling::poller::{self, MountError, MountPoller, PollSettings, TimeoutScheduler, WidgetHost};

const CONTAINER_ID: &str = "calendly-container";
const PLACEHOLDER_ID: &str = "calendly-placeholder";

const GLOBAL: &str = "Calendly";
const INIT_FN: &str = "initInlineWidget";

/// Inline Calendly embed inside `#calendly-container`.
pub struct CalendlyHost {
    url: String,
    container: Element,
    placeholder: Option<Element>,
}

impl CalendlyHost {
    pub fn new(url: String, container: Element, placeholder: Option<Element>) -> Self {
        Self { url, container, placeholder }
    }

    fn initializer(&self) -> Result<(JsValue, Function), MountError> {
        let window = web_sys::window().ok_or_else(|| MountError::MissingInitializer("no window".to_string()))?;
        let calendly = Reflect::get(&window, &JsValue::from_str(GLOBAL))
            .map_err(|e| MountError::MissingInitializer(format!("{:?}", e)))?;
        if calendly.is_undefined() || calendly.is_null() {
            return Err(MountError::MissingInitializer(GLOBAL.to_string()));
        }
        let init = Reflect::get(&calendly, &JsValue::from_str(INIT_FN))
            .map_err(|e| MountError::MissingInitializer(format!("{:?}", e)))?
            .dyn_into::<Function>()
            .map_err(|_| MountError::MissingInitializer(INIT_FN.to_string()))?;
        Ok((calendly, init))
    }

    fn options(&self) -> Result<Object, JsValue> {
        let options = Object::new();
        Reflect::set(&options, &"url".into(), &JsValue::from_str(&self.url))?;
        Reflect::set(&options, &"parentElement".into(), &self.container)?;
        Reflect::set(&options, &"prefill".into(), &Object::new())?;
        Reflect::set(&options, &"utm".into(), &Object::new())?;
        Ok(options)
    }

    // The embed does not size its own frame reliably.
    fn size_frame(&self) {
        let Some(frame) = self
            .container
            .query_selector("iframe")
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        else {
            return;
        };
        let style = frame.style();
        let _ = style.set_property("min-width", "100%");
        let _ = style.set_property("min-height", config::WIDGET_MIN_HEIGHT);
    }
}

impl WidgetHost for CalendlyHost {
    fn initializer_ready(&self) -> bool {
        self.initializer().is_ok()
    }

    fn mount(&self) -> Result<(), MountError> {
        let (calendly, init) = self.initializer()?;
        if let Some(placeholder) = &self.placeholder {
            placeholder.remove();
        }
        let options = self
            .options()
            .map_err(|e| MountError::Initializer(format!("{:?}", e)))?;
        init.call1(&calendly, &options)
            .map_err(|e| MountError::Initializer(format!("{:?}", e)))?;
        self.size_frame();
        log::info!("Scheduling widget mounted");
        Ok(())
    }
}

/// Starts polling for the Calendly script. Without a container nothing is
/// polled and `None` comes back.
pub fn mount_into_page(document: &Document, url: &str) -> Option<Rc<RefCell<MountPoller<CalendlyHost>>>> {
    let Some(container) = document.get_element_by_id(CONTAINER_ID) else {
        log::debug!("No #{} on this page, skipping scheduling widget", CONTAINER_ID);
        return None;
    };
    let placeholder = document.get_element_by_id(PLACEHOLDER_ID);
    let host = CalendlyHost::new(url.to_string(), container, placeholder);
    Some(poller::start(MountPoller::new(host, PollSettings::default()), Rc::new(TimeoutScheduler)))
}
