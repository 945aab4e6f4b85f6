use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use swumeta_core::{EWidgetError, WidgetResult};
use swumeta_core::ports::{SListenerId, TElement, TPage};

use super::echarts::SEChartsWidget;
use super::web::{document, window, TErgonomicDocument, TToWidgetError};

#[derive(Clone, Debug)]
pub struct SWebElement(pub HtmlElement);

#[derive(Default)]
struct SResizeListeners {
    next_id: u32,
    closures: HashMap<SListenerId, Closure<dyn Fn()>>,
}

/// The live document behind the renderer ports.
#[derive(Clone, Default)]
pub struct SWebPage {
    resize_listeners: Rc<RefCell<SResizeListeners>>,
}

impl SWebPage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TElement for SWebElement {
    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) -> WidgetResult<()> {
        self.0.set_attribute(name, value).to_dom_err()
    }

    fn add_class(&self, class: &str) -> WidgetResult<()> {
        self.0.class_list().add_1(class).to_dom_err()
    }

    fn set_text(&self, text: &str) {
        self.0.set_text_content(Some(text));
    }

    fn append_child(&self, child: &Self) -> WidgetResult<()> {
        self.0.append_child(&child.0).to_dom_err()?;
        Ok(())
    }

    fn clear_children(&self) {
        self.0.set_inner_html("");
    }

    fn set_style_property(&self, property: &str, value: &str) -> WidgetResult<()> {
        self.0.style().set_property(property, value).to_dom_err()
    }
}

impl TPage for SWebPage {
    type Element = SWebElement;
    type Chart = SEChartsWidget;

    fn get_element_by_id(&self, id: &str) -> Option<SWebElement> {
        document().get_typed_element_by_id::<HtmlElement>(id).map(SWebElement)
    }

    fn query_selector_all(&self, selector: &str) -> WidgetResult<Vec<SWebElement>> {
        let elems = document().query_typed_selector_all::<HtmlElement>(selector)?;
        Ok(elems.into_iter().map(SWebElement).collect())
    }

    fn create_element(&self, tag: &str) -> WidgetResult<SWebElement> {
        let elem = document().create_element(tag).to_dom_err()?;

        match elem.dyn_into::<HtmlElement>() {
            Ok(res) => Ok(SWebElement(res)),
            Err(_) => Err(EWidgetError::Dom(format!("created a <{}> that is not an HTML element", tag))),
        }
    }

    fn init_chart(&self, container: &SWebElement) -> WidgetResult<SEChartsWidget> {
        SEChartsWidget::init(&container.0)
    }

    fn add_resize_listener(&self, listener: Box<dyn Fn()>) -> WidgetResult<SListenerId> {
        let closure = Closure::wrap(listener);
        window().add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref()).to_dom_err()?;

        let mut listeners = self.resize_listeners.borrow_mut();
        listeners.next_id += 1;
        let id = SListenerId(listeners.next_id);
        listeners.closures.insert(id, closure);

        Ok(id)
    }

    fn remove_resize_listener(&self, id: SListenerId) {
        let closure = self.resize_listeners.borrow_mut().closures.remove(&id);

        if let Some(closure) = closure {
            if let Err(e) = window().remove_event_listener_with_callback("resize", closure.as_ref().unchecked_ref()) {
                weberror!("could not remove resize listener: {:?}", e);
            }
        }
    }

    fn log_error(&self, message: &str) {
        weberror!("{}", message);
    }
}
