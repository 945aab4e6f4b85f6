use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use swumeta_core as core;
use swumeta_core::bar_chart::{self, SBarChart};
use swumeta_core::ports::TChartWidget;
use swumeta_core::winrates;

macro_rules! weberror {
    ( $( $t:tt )* ) => {
        web_sys::console::error_1(&format!( $( $t )* ).into());
    }
}

mod dom;
mod echarts;
mod server_api;
mod web;

use dom::{SWebElement, SWebPage};
use server_api::SServerApi;
use web::{document, from_js_value, TToJsError};

/// Returned to JS by `createHorizontalBarChart`. Dropping it on the JS side without calling
/// `dispose` keeps the chart and its resize listener for the life of the page.
#[wasm_bindgen(js_name = BarChartHandle)]
pub struct SBarChartHandle {
    page: SWebPage,
    chart: Rc<SBarChart<SWebPage>>,
}

#[wasm_bindgen(js_class = BarChartHandle)]
impl SBarChartHandle {
    #[wasm_bindgen(getter)]
    pub fn instance(&self) -> JsValue {
        JsValue::from(self.chart.chart().instance().clone())
    }

    pub fn resize(&self) {
        self.chart.chart().resize();
    }

    pub fn dispose(&self) {
        self.chart.dispose(&self.page);
    }
}

#[wasm_bindgen(js_name = createHorizontalBarChart)]
pub fn create_horizontal_bar_chart(container_id: &str, data_url: &str, options: JsValue) -> Option<SBarChartHandle> {
    let page = SWebPage::new();

    let overrides = match from_js_value::<core::SChartOptionsOverride>(&options) {
        Ok(o) => o,
        Err(e) => {
            weberror!("Ignoring chart options for \"{}\": {}", container_id, e);
            core::SChartOptionsOverride::default()
        }
    };

    let chart = Rc::new(bar_chart::create_horizontal_bar_chart(&page, container_id, &overrides)?);

    let load_page = page.clone();
    let load_chart = chart.clone();
    let data_url = String::from(data_url);
    spawn_local(async move {
        bar_chart::load_bar_chart_data(&load_page, &load_chart, &SServerApi, data_url.as_str()).await;
    });

    Some(SBarChartHandle {
        page,
        chart,
    })
}

#[wasm_bindgen(js_name = initWinratesMatrix)]
pub fn init_winrates_matrix(elem: web_sys::HtmlElement) {
    let page = SWebPage::new();
    let container = SWebElement(elem);

    spawn_local(async move {
        winrates::init_winrates_matrix(&page, &SServerApi, &container).await;
    });
}

fn init_all_winrates_matrices() -> core::WidgetResult<usize> {
    let containers = winrates::discover_winrates_containers(&SWebPage::new())?;
    let count = containers.len();

    for container in containers {
        init_winrates_matrix(container.0);
    }

    Ok(count)
}

#[wasm_bindgen(js_name = initWinratesMatrices)]
pub fn init_winrates_matrices() -> Result<(), JsError> {
    init_all_winrates_matrices().to_jserr()?;
    Ok(())
}

#[wasm_bindgen(js_name = generateColorPalette)]
pub fn generate_color_palette(count: usize) -> js_sys::Array {
    let mut rng = rand::thread_rng();

    core::palette::generate_color_palette(count, &mut rng)
        .into_iter()
        .map(|c| JsValue::from_str(c.as_str()))
        .collect()
}

fn on_page_ready() {
    if let Err(e) = init_all_winrates_matrices() {
        weberror!("could not look up winrates matrices: {}", e);
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let document = document();

    if document.ready_state() == "loading" {
        let closure = Closure::<dyn Fn()>::new(on_page_ready);
        document.add_event_listener_with_callback("DOMContentLoaded", closure.as_ref().unchecked_ref())?;
        // -- the page only becomes ready once
        closure.forget();
    }
    else {
        on_page_ready();
    }

    Ok(())
}
