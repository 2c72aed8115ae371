use web_sys::{Document, Event};

use crate::dom;

const TOGGLE_ID: &str = "nav-toggle";
const LINKS_ID: &str = "nav-links";
const TOGGLE_ACTIVE: &str = "nav__toggle--active";
const LINKS_OPEN: &str = "nav__links--open";

/// Mobile menu: the burger opens/closes the list, following a link closes it.
pub fn bind(document: &Document) {
    let (Some(toggle), Some(links)) = (
        document.get_element_by_id(TOGGLE_ID),
        document.get_element_by_id(LINKS_ID),
    ) else {
        return;
    };

    {
        let (button, list) = (toggle.clone(), links.clone());
        dom::listen(&toggle, "click", move |_: Event| {
            dom::toggle_class(&button, TOGGLE_ACTIVE);
            dom::toggle_class(&list, LINKS_OPEN);
        });
    }

    let Ok(anchors) = links.query_selector_all("a") else {
        return;
    };
    for anchor in dom::elements(anchors) {
        let (button, list) = (toggle.clone(), links.clone());
        dom::listen(&anchor, "click", move |_: Event| {
            dom::remove_class(&button, TOGGLE_ACTIVE);
            dom::remove_class(&list, LINKS_OPEN);
        });
    }
}
