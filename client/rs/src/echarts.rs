use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use swumeta_core::WidgetResult;
use swumeta_core::bar_chart::{SLoadingOptions, STooltipFormatter};
use swumeta_core::ports::TChartWidget;

use super::web::{to_js_value, TToWidgetError};

// -- ECharts is loaded by the page as a global script
#[wasm_bindgen]
extern "C" {
    #[derive(Clone, Debug)]
    pub type ECharts;

    #[wasm_bindgen(catch, js_namespace = echarts, js_name = init)]
    fn echarts_init(dom: &HtmlElement) -> Result<ECharts, JsValue>;

    #[wasm_bindgen(method, js_name = showLoading)]
    fn show_loading(this: &ECharts, opts: &JsValue);

    #[wasm_bindgen(method, js_name = hideLoading)]
    fn hide_loading(this: &ECharts);

    #[wasm_bindgen(catch, method, js_name = setOption)]
    fn set_option(this: &ECharts, option: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(method)]
    fn resize(this: &ECharts);

    #[wasm_bindgen(method)]
    fn dispose(this: &ECharts);
}

type TooltipClosure = Closure<dyn Fn(JsValue) -> String>;

#[derive(Clone)]
pub struct SEChartsWidget {
    instance: ECharts,
    // -- kept alive for as long as ECharts may call it
    tooltip_formatter: Rc<RefCell<Option<TooltipClosure>>>,
}

// -- axis-triggered tooltips hand the formatter an array of hovered points
fn hovered_index(params: &JsValue) -> Option<usize> {
    let point = if js_sys::Array::is_array(params) {
        js_sys::Array::from(params).get(0)
    }
    else {
        params.clone()
    };

    let index = js_sys::Reflect::get(&point, &JsValue::from_str("dataIndex")).ok()?.as_f64()?;
    if index < 0.0 {
        return None;
    }

    Some(index as usize)
}

fn js_set(target: &js_sys::Object, key: &str, value: &JsValue) -> WidgetResult<()> {
    js_sys::Reflect::set(target, &JsValue::from_str(key), value).to_dom_err()?;
    Ok(())
}

impl SEChartsWidget {
    pub fn init(container: &HtmlElement) -> WidgetResult<Self> {
        let instance = echarts_init(container).to_dom_err()?;

        Ok(Self {
            instance,
            tooltip_formatter: Rc::new(RefCell::new(None)),
        })
    }

    pub fn instance(&self) -> &ECharts {
        &self.instance
    }
}

impl TChartWidget for SEChartsWidget {
    fn show_loading(&self, loading: &SLoadingOptions) -> WidgetResult<()> {
        let opts = to_js_value(loading)?;
        self.instance.show_loading(&opts);
        Ok(())
    }

    fn hide_loading(&self) {
        self.instance.hide_loading();
    }

    fn set_option(&self, option: &serde_json::Value) -> WidgetResult<()> {
        let js_option = to_js_value(option)?;
        self.instance.set_option(&js_option).to_dom_err()
    }

    fn set_tooltip(&self, tooltip: STooltipFormatter) -> WidgetResult<()> {
        let closure : TooltipClosure = Closure::new(move |params: JsValue| {
            hovered_index(&params)
                .and_then(|index| tooltip.format(index))
                .unwrap_or_default()
        });

        let tooltip_obj = js_sys::Object::new();
        js_set(&tooltip_obj, "formatter", closure.as_ref())?;
        let option = js_sys::Object::new();
        js_set(&option, "tooltip", &tooltip_obj)?;

        self.instance.set_option(&option).to_dom_err()?;

        // -- replacing drops the previous formatter, which ECharts no longer references
        *self.tooltip_formatter.borrow_mut() = Some(closure);
        Ok(())
    }

    fn resize(&self) {
        self.instance.resize();
    }

    fn dispose(&self) {
        self.instance.dispose();
        self.tooltip_formatter.borrow_mut().take();
    }
}
