// -- in-memory page used by the renderer tests

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use async_trait::async_trait;
use serde_json::Value;

use crate::bar_chart::{SLoadingOptions, STooltipFormatter};
use crate::error::{EWidgetError, WidgetResult};
use crate::ports::{SListenerId, TChartWidget, TElement, TJsonFetcher, TPage};

const ROOT: usize = 0;

#[derive(Default)]
struct SFakeNode {
    tag: String,
    attributes: BTreeMap<String, String>,
    classes: Vec<String>,
    style: BTreeMap<String, String>,
    text: String,
    children: Vec<usize>,
}

#[derive(Default)]
struct SFakeDom {
    nodes: Vec<SFakeNode>,
}

#[derive(Clone)]
pub struct SFakeElement {
    dom: Rc<RefCell<SFakeDom>>,
    index: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub enum EChartCall {
    ShowLoading(SLoadingOptions),
    HideLoading,
    SetOption(Value),
    SetTooltip,
    Resize,
    Dispose,
}

#[derive(Clone, Default)]
pub struct SFakeChart {
    calls: Rc<RefCell<Vec<EChartCall>>>,
    tooltip: Rc<RefCell<Option<STooltipFormatter>>>,
}

pub struct SFakePage {
    dom: Rc<RefCell<SFakeDom>>,
    charts: RefCell<Vec<SFakeChart>>,
    listeners: RefCell<Vec<(SListenerId, Rc<dyn Fn()>)>>,
    next_listener: Cell<u32>,
    errors: RefCell<Vec<String>>,
}

#[derive(Default)]
pub struct SFakeFetcher {
    responses: HashMap<String, WidgetResult<String>>,
    requests: RefCell<Vec<String>>,
}

impl SFakeDom {
    fn push(&mut self, tag: &str) -> usize {
        self.nodes.push(SFakeNode {
            tag: String::from(tag),
            ..Default::default()
        });
        self.nodes.len() - 1
    }

    // -- document order, detached nodes are not visited
    fn attached(&self) -> Vec<usize> {
        let mut result = Vec::new();
        let mut stack = vec![ROOT];
        while let Some(idx) = stack.pop() {
            result.push(idx);
            for child in self.nodes[idx].children.iter().rev() {
                stack.push(*child);
            }
        }
        result
    }

    fn matches(&self, idx: usize, selector: &str) -> bool {
        let node = &self.nodes[idx];
        if let Some(class) = selector.strip_prefix('.') {
            node.classes.iter().any(|c| c == class)
        }
        else if let Some(id) = selector.strip_prefix('#') {
            node.attributes.get("id").map(|v| v == id).unwrap_or(false)
        }
        else {
            node.tag == selector
        }
    }

    fn outer_html(&self, idx: usize) -> String {
        let node = &self.nodes[idx];

        let mut html = format!("<{}", node.tag);
        if !node.classes.is_empty() {
            html.push_str(format!(" class=\"{}\"", node.classes.join(" ")).as_str());
        }
        for (name, value) in &node.attributes {
            html.push_str(format!(" {}=\"{}\"", name, value).as_str());
        }
        if !node.style.is_empty() {
            let style : Vec<String> = node.style.iter().map(|(k, v)| format!("{}: {};", k, v)).collect();
            html.push_str(format!(" style=\"{}\"", style.join(" ")).as_str());
        }

        if node.tag == "img" {
            html.push_str("/>");
            return html;
        }

        html.push('>');
        html.push_str(node.text.as_str());
        for child in &node.children {
            html.push_str(self.outer_html(*child).as_str());
        }
        html.push_str(format!("</{}>", node.tag).as_str());
        html
    }
}

impl SFakeElement {
    pub fn tag(&self) -> String {
        self.dom.borrow().nodes[self.index].tag.clone()
    }

    pub fn classes(&self) -> Vec<String> {
        self.dom.borrow().nodes[self.index].classes.clone()
    }

    pub fn style(&self, property: &str) -> Option<String> {
        self.dom.borrow().nodes[self.index].style.get(property).cloned()
    }

    pub fn children(&self) -> Vec<SFakeElement> {
        self.dom.borrow().nodes[self.index].children.iter()
            .map(|idx| SFakeElement { dom: self.dom.clone(), index: *idx })
            .collect()
    }

    pub fn outer_html(&self) -> String {
        self.dom.borrow().outer_html(self.index)
    }
}

impl TElement for SFakeElement {
    fn attribute(&self, name: &str) -> Option<String> {
        self.dom.borrow().nodes[self.index].attributes.get(name).cloned()
    }

    fn set_attribute(&self, name: &str, value: &str) -> WidgetResult<()> {
        self.dom.borrow_mut().nodes[self.index].attributes.insert(String::from(name), String::from(value));
        Ok(())
    }

    fn add_class(&self, class: &str) -> WidgetResult<()> {
        let mut dom = self.dom.borrow_mut();
        let classes = &mut dom.nodes[self.index].classes;
        if !classes.iter().any(|c| c == class) {
            classes.push(String::from(class));
        }
        Ok(())
    }

    fn set_text(&self, text: &str) {
        let mut dom = self.dom.borrow_mut();
        let node = &mut dom.nodes[self.index];
        node.children.clear();
        node.text = String::from(text);
    }

    fn append_child(&self, child: &Self) -> WidgetResult<()> {
        if child.index == self.index {
            return Err(EWidgetError::Dom(String::from("cannot append an element to itself")));
        }

        let mut dom = self.dom.borrow_mut();
        for node in dom.nodes.iter_mut() {
            node.children.retain(|c| *c != child.index);
        }
        dom.nodes[self.index].children.push(child.index);
        Ok(())
    }

    fn clear_children(&self) {
        let mut dom = self.dom.borrow_mut();
        let node = &mut dom.nodes[self.index];
        node.children.clear();
        node.text.clear();
    }

    fn set_style_property(&self, property: &str, value: &str) -> WidgetResult<()> {
        self.dom.borrow_mut().nodes[self.index].style.insert(String::from(property), String::from(value));
        Ok(())
    }
}

impl SFakeChart {
    pub fn calls(&self) -> Vec<EChartCall> {
        self.calls.borrow().clone()
    }

    pub fn count<F: Fn(&EChartCall) -> bool>(&self, f: F) -> usize {
        self.calls.borrow().iter().filter(|c| f(*c)).count()
    }

    pub fn tooltip(&self) -> Option<STooltipFormatter> {
        self.tooltip.borrow().clone()
    }
}

impl TChartWidget for SFakeChart {
    fn show_loading(&self, loading: &SLoadingOptions) -> WidgetResult<()> {
        self.calls.borrow_mut().push(EChartCall::ShowLoading(loading.clone()));
        Ok(())
    }

    fn hide_loading(&self) {
        self.calls.borrow_mut().push(EChartCall::HideLoading);
    }

    fn set_option(&self, option: &Value) -> WidgetResult<()> {
        self.calls.borrow_mut().push(EChartCall::SetOption(option.clone()));
        Ok(())
    }

    fn set_tooltip(&self, tooltip: STooltipFormatter) -> WidgetResult<()> {
        self.calls.borrow_mut().push(EChartCall::SetTooltip);
        *self.tooltip.borrow_mut() = Some(tooltip);
        Ok(())
    }

    fn resize(&self) {
        self.calls.borrow_mut().push(EChartCall::Resize);
    }

    fn dispose(&self) {
        self.calls.borrow_mut().push(EChartCall::Dispose);
    }
}

impl SFakePage {
    pub fn new() -> Self {
        let mut dom = SFakeDom::default();
        dom.push("body");

        Self {
            dom: Rc::new(RefCell::new(dom)),
            charts: RefCell::new(Vec::new()),
            listeners: RefCell::new(Vec::new()),
            next_listener: Cell::new(1),
            errors: RefCell::new(Vec::new()),
        }
    }

    /// Creates an element with `id` attached directly under the body.
    pub fn add_element(&self, tag: &str, id: &str) -> SFakeElement {
        let index = {
            let mut dom = self.dom.borrow_mut();
            let index = dom.push(tag);
            dom.nodes[index].attributes.insert(String::from("id"), String::from(id));
            dom.nodes[ROOT].children.push(index);
            index
        };

        SFakeElement { dom: self.dom.clone(), index }
    }

    pub fn charts(&self) -> Vec<SFakeChart> {
        self.charts.borrow().clone()
    }

    pub fn resize_listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn fire_resize(&self) {
        let listeners : Vec<Rc<dyn Fn()>> = self.listeners.borrow().iter().map(|(_, l)| l.clone()).collect();
        for listener in listeners {
            listener();
        }
    }

    pub fn logged_errors(&self) -> Vec<String> {
        self.errors.borrow().clone()
    }
}

impl TPage for SFakePage {
    type Element = SFakeElement;
    type Chart = SFakeChart;

    fn get_element_by_id(&self, id: &str) -> Option<SFakeElement> {
        let dom = self.dom.borrow();
        dom.attached().into_iter()
            .find(|idx| dom.nodes[*idx].attributes.get("id").map(|v| v == id).unwrap_or(false))
            .map(|index| SFakeElement { dom: self.dom.clone(), index })
    }

    fn query_selector_all(&self, selector: &str) -> WidgetResult<Vec<SFakeElement>> {
        let dom = self.dom.borrow();
        Ok(dom.attached().into_iter()
            .filter(|idx| *idx != ROOT && dom.matches(*idx, selector))
            .map(|index| SFakeElement { dom: self.dom.clone(), index })
            .collect())
    }

    fn create_element(&self, tag: &str) -> WidgetResult<SFakeElement> {
        let index = self.dom.borrow_mut().push(tag);
        Ok(SFakeElement { dom: self.dom.clone(), index })
    }

    fn init_chart(&self, _container: &SFakeElement) -> WidgetResult<SFakeChart> {
        let chart = SFakeChart::default();
        self.charts.borrow_mut().push(chart.clone());
        Ok(chart)
    }

    fn add_resize_listener(&self, listener: Box<dyn Fn()>) -> WidgetResult<SListenerId> {
        let id = SListenerId(self.next_listener.get());
        self.next_listener.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, Rc::from(listener)));
        Ok(id)
    }

    fn remove_resize_listener(&self, id: SListenerId) {
        self.listeners.borrow_mut().retain(|(listener_id, _)| *listener_id != id);
    }

    fn log_error(&self, message: &str) {
        self.errors.borrow_mut().push(String::from(message));
    }
}

impl SFakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, url: &str, body: &str) -> Self {
        self.responses.insert(String::from(url), Ok(String::from(body)));
        self
    }

    pub fn fail(mut self, url: &str, err: EWidgetError) -> Self {
        self.responses.insert(String::from(url), Err(err));
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

#[async_trait(?Send)]
impl TJsonFetcher for SFakeFetcher {
    async fn get_text(&self, url: &str) -> WidgetResult<String> {
        self.requests.borrow_mut().push(String::from(url));

        match self.responses.get(url) {
            Some(response) => response.clone(),
            None => Err(EWidgetError::fetch("Not Found", "Server responded with status 404")),
        }
    }
}
