//! REST helpers for the config probe and the chat stream.
//!
//! Client-side (csr): real HTTP calls via `gloo-net`, with the chat body read
//! chunk by chunk through the browser `ReadableStream` reader.
//! Elsewhere: stubs returning an error since these endpoints are only
//! meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Result<_, ChatError>` outputs instead of panics; the session
//! turns every error into a visible notice.

#![allow(clippy::unused_async)]

use futures::stream::LocalBoxStream;

use super::types::{ChatError, ConfigStatus};

pub const CONFIG_PATH: &str = "/api/config";
pub const CHAT_PATH: &str = "/api/chat";
pub const HEALTH_PATH: &str = "/api/health";

/// Response body of the chat endpoint as a stream of raw byte chunks.
pub type ChunkStream = LocalBoxStream<'static, Result<Vec<u8>, ChatError>>;

#[cfg(not(feature = "csr"))]
fn unavailable() -> ChatError {
    ChatError::Network("not available outside the browser".to_owned())
}

/// Probe `GET {base}/api/config`.
///
/// # Errors
///
/// Returns an error on network failure, a non-2xx status (`HTTP {status}:
/// {status text}`), or a body that is not a config payload.
pub async fn fetch_config_status(base: &str) -> Result<ConfigStatus, ChatError> {
    #[cfg(feature = "csr")]
    {
        let url = crate::util::base_path::api_url(base, CONFIG_PATH);
        leptos::logging::log!("checking config at {url}");
        let resp = gloo_net::http::Request::get(&url)
            .send()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;
        leptos::logging::log!("config response status: {}", resp.status());
        if !resp.ok() {
            return Err(ChatError::Status { status: resp.status(), body: resp.status_text() });
        }
        let config: ConfigStatus = resp
            .json()
            .await
            .map_err(|e| ChatError::Payload(e.to_string()))?;
        leptos::logging::log!(
            "config: success={} deployment_id={} api_token={} endpoint={:?}",
            config.success,
            config.has_deployment_id,
            config.has_api_token,
            config.has_endpoint
        );
        Ok(config)
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = base;
        Err(unavailable())
    }
}

/// Send `POST {base}/api/chat` and return the response body stream.
///
/// # Errors
///
/// Returns an error on network failure, or `HTTP {status}: {body}` when the
/// server answers with a non-2xx status.
pub async fn open_chat_stream(base: String, message: String) -> Result<ChunkStream, ChatError> {
    #[cfg(feature = "csr")]
    {
        use futures::StreamExt;

        use super::types::ChatRequest;

        let url = crate::util::base_path::api_url(&base, CHAT_PATH);
        leptos::logging::log!("sending message to {url}");
        let resp = gloo_net::http::Request::post(&url)
            .json(&ChatRequest { message })
            .map_err(|e| ChatError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;
        leptos::logging::log!("chat response status: {}", resp.status());

        if !resp.ok() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(ChatError::Status { status, body });
        }

        let Some(body) = resp.body() else {
            return Ok(futures::stream::empty().boxed_local());
        };
        let reader = body_reader(&body);
        Ok(futures::stream::unfold(Some(reader), |reader| async move {
            let reader = reader?;
            match read_chunk(&reader).await {
                Ok(Some(bytes)) => Some((Ok(bytes), Some(reader))),
                Ok(None) => None,
                Err(e) => Some((Err(e), None)),
            }
        })
        .boxed_local())
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (base, message);
        Err(unavailable())
    }
}

#[cfg(feature = "csr")]
fn body_reader(body: &web_sys::ReadableStream) -> web_sys::ReadableStreamDefaultReader {
    use wasm_bindgen::JsCast;

    body.get_reader().unchecked_into::<web_sys::ReadableStreamDefaultReader>()
}

/// Await one `reader.read()`; `None` once the body is done.
#[cfg(feature = "csr")]
async fn read_chunk(reader: &web_sys::ReadableStreamDefaultReader) -> Result<Option<Vec<u8>>, ChatError> {
    use wasm_bindgen::JsValue;

    let result = wasm_bindgen_futures::JsFuture::from(reader.read())
        .await
        .map_err(|e| ChatError::Body(js_error_message(&e)))?;

    let done = js_sys::Reflect::get(&result, &JsValue::from_str("done"))
        .map_err(|e| ChatError::Body(js_error_message(&e)))?
        .as_bool()
        .unwrap_or(false);
    if done {
        return Ok(None);
    }

    let value = js_sys::Reflect::get(&result, &JsValue::from_str("value"))
        .map_err(|e| ChatError::Body(js_error_message(&e)))?;
    Ok(Some(js_sys::Uint8Array::new(&value).to_vec()))
}

#[cfg(feature = "csr")]
fn js_error_message(value: &wasm_bindgen::JsValue) -> String {
    use wasm_bindgen::JsCast;

    value
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{value:?}"))
}
