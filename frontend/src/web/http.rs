//! HTTP 请求封装模块
//!
//! 基于 `web_sys::fetch` 实现逻辑层的 `HttpClient` 适配器。

use newscase_core::error::{ClientError, ClientResult};
use newscase_core::request::{HttpClient, HttpRequest, HttpResponse};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

/// 浏览器 fetch 客户端
#[derive(Clone, Copy, Default)]
pub struct FetchClient;

#[async_trait::async_trait(?Send)]
impl HttpClient for FetchClient {
    async fn send(&self, req: HttpRequest) -> ClientResult<HttpResponse> {
        let headers = Headers::new()
            .map_err(|e| ClientError::network(format!("创建 Headers 失败: {:?}", e)))?;
        for (key, value) in &req.headers {
            headers
                .set(key, value)
                .map_err(|e| ClientError::network(format!("设置 Header 失败: {:?}", e)))?;
        }

        let opts = RequestInit::new();
        opts.set_method(req.method.as_str());
        opts.set_headers(&headers.into());
        if let Some(body) = &req.body {
            opts.set_body(&JsValue::from_str(body));
        }

        let request = Request::new_with_str_and_init(&req.url, &opts)
            .map_err(|e| ClientError::network(format!("{:?}", e)))?;

        let window =
            web_sys::window().ok_or_else(|| ClientError::network("无法获取 window 对象"))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| ClientError::network(format!("{:?}", e)))?;
        let response: Response = resp_value
            .dyn_into()
            .map_err(|e| ClientError::parse(format!("Response 类型转换失败: {:?}", e)))?;

        let status = response.status();
        let text_promise = response
            .text()
            .map_err(|e| ClientError::parse(format!("{:?}", e)))?;
        let text = JsFuture::from(text_promise)
            .await
            .map_err(|e| ClientError::parse(format!("{:?}", e)))?;

        Ok(HttpResponse {
            status,
            body: text.as_string().unwrap_or_default(),
        })
    }
}
