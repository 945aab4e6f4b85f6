use async_trait::async_trait;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen::JsCast;
use web_sys::{Request, RequestInit, RequestMode, Response};

use swumeta_core::{EWidgetError, WidgetResult};
use swumeta_core::ports::TJsonFetcher;

use super::web::{js_message, window};

#[derive(Clone, Copy, Debug, Default)]
pub struct SServerApi;

fn network_err(e: wasm_bindgen::JsValue) -> EWidgetError {
    EWidgetError::fetch("error", js_message(&e).as_str())
}

fn check_err(resp: &Response) -> WidgetResult<()> {
    if !resp.ok() {
        let msg = format!("Server responded with status {}", resp.status());
        return Err(EWidgetError::fetch(resp.status_text().as_str(), msg.as_str()));
    }

    Ok(())
}

async fn get(url: &str) -> WidgetResult<Response> {
    let window = window();

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);

    let request = Request::new_with_str_and_init(url, &opts).map_err(network_err)?;
    request.headers().set("Accept", "application/json").map_err(network_err)?;

    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await.map_err(network_err)?;
    let resp : Response = resp_value.dyn_into().map_err(network_err)?;

    check_err(&resp)?;

    Ok(resp)
}

#[async_trait(?Send)]
impl TJsonFetcher for SServerApi {
    async fn get_text(&self, url: &str) -> WidgetResult<String> {
        let resp = get(url).await?;

        let text_promise = resp.text().map_err(network_err)?;
        let text = JsFuture::from(text_promise).await.map_err(network_err)?;

        Ok(text.as_string().unwrap_or_default())
    }
}
