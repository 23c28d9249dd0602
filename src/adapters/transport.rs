//! Fetch Transport
//!
//! `window.fetch` with an `AbortController` armed by a timer.

use std::cell::Cell;
use std::rc::Rc;

use async_trait::async_trait;
use gloo_timers::callback::Timeout;
use js_sys::Uint8Array;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, Headers, Request, RequestInit, Response};

use flywheel_core::http::{HttpRequest, HttpResponse, Transport, TransportError};

pub struct FetchTransport;

fn js_error(value: JsValue) -> TransportError {
    TransportError::Network(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}

#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let window = web_sys::window().ok_or_else(|| TransportError::Network("no window".to_string()))?;
        let controller = AbortController::new().map_err(js_error)?;

        let headers = Headers::new().map_err(js_error)?;
        for (name, value) in &request.headers {
            headers.set(name, value).map_err(js_error)?;
        }

        let init = RequestInit::new();
        init.set_method(request.method.as_str());
        init.set_headers(&headers);
        init.set_signal(Some(&controller.signal()));
        if let Some(body) = &request.body {
            init.set_body(&JsValue::from_str(&body.to_string()));
        }
        let js_request = Request::new_with_str_and_init(&request.full_url(), &init).map_err(js_error)?;

        // Aborts the fetch (or the body read) once the deadline passes
        let timed_out = Rc::new(Cell::new(false));
        let deadline = {
            let timed_out = timed_out.clone();
            let controller = controller.clone();
            Timeout::new(request.timeout_ms, move || {
                timed_out.set(true);
                controller.abort();
            })
        };

        let fail = |e: JsValue| {
            if timed_out.get() {
                TransportError::Timeout
            } else {
                js_error(e)
            }
        };

        let response: Response = JsFuture::from(window.fetch_with_request(&js_request))
            .await
            .map_err(fail)?
            .dyn_into()
            .map_err(js_error)?;
        let status = response.status();
        let buffer = JsFuture::from(response.array_buffer().map_err(js_error)?)
            .await
            .map_err(fail)?;
        drop(deadline);

        Ok(HttpResponse {
            status,
            body: Uint8Array::new(&buffer).to_vec(),
        })
    }
}
