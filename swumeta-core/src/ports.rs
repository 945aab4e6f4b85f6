//! Host capabilities the renderers are written against.
//!
//! The browser client implements these over `web_sys` and ECharts; the tests
//! implement them over an in-memory document.

use async_trait::async_trait;

use crate::bar_chart::{SLoadingOptions, STooltipFormatter};
use crate::error::WidgetResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SListenerId(pub u32);

pub trait TElement: Clone {
    fn attribute(&self, name: &str) -> Option<String>;
    fn set_attribute(&self, name: &str, value: &str) -> WidgetResult<()>;
    fn add_class(&self, class: &str) -> WidgetResult<()>;
    fn set_text(&self, text: &str);
    fn append_child(&self, child: &Self) -> WidgetResult<()>;
    fn clear_children(&self);
    fn set_style_property(&self, property: &str, value: &str) -> WidgetResult<()>;
}

pub trait TChartWidget: Clone + 'static {
    fn show_loading(&self, loading: &SLoadingOptions) -> WidgetResult<()>;
    fn hide_loading(&self);
    fn set_option(&self, option: &serde_json::Value) -> WidgetResult<()>;
    fn set_tooltip(&self, tooltip: STooltipFormatter) -> WidgetResult<()>;
    fn resize(&self);
    fn dispose(&self);
}

pub trait TPage {
    type Element: TElement;
    type Chart: TChartWidget;

    fn get_element_by_id(&self, id: &str) -> Option<Self::Element>;
    fn query_selector_all(&self, selector: &str) -> WidgetResult<Vec<Self::Element>>;
    fn create_element(&self, tag: &str) -> WidgetResult<Self::Element>;

    fn init_chart(&self, container: &Self::Element) -> WidgetResult<Self::Chart>;

    fn add_resize_listener(&self, listener: Box<dyn Fn()>) -> WidgetResult<SListenerId>;
    fn remove_resize_listener(&self, id: SListenerId);

    // -- the browser console, or whatever diagnostic sink the host has
    fn log_error(&self, message: &str);
}

#[async_trait(?Send)]
pub trait TJsonFetcher {
    /// GETs `url` and returns the response body. Non-OK statuses are `EWidgetError::Fetch`.
    async fn get_text(&self, url: &str) -> WidgetResult<String>;
}
