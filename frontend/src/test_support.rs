//! 测试用的内存实现

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;

use crate::api::AdminApi;
use crate::error::{ApiError, ApiResult};
use crate::session::TokenStore;
use crate::web::{HttpClient, HttpRequest, HttpResponse};

pub const API_BASE: &str = "http://backend.test/api";
pub const MOCK_BASE: &str = "http://mock.test/users";

/// 按顺序返回预置响应，并记录收到的请求
#[derive(Clone, Default)]
pub struct MockHttpClient {
    pub requests: Rc<RefCell<Vec<HttpRequest>>>,
    responses: Rc<RefCell<VecDeque<ApiResult<HttpResponse>>>>,
}

impl MockHttpClient {
    pub fn respond(&self, response: HttpResponse) -> &Self {
        self.responses.borrow_mut().push_back(Ok(response));
        self
    }

    pub fn respond_json(&self, status: u16, body: &str) -> &Self {
        self.respond(HttpResponse::new(status, body))
    }

    pub fn fail(&self, message: &str) -> &Self {
        self.responses
            .borrow_mut()
            .push_back(Err(ApiError::Network(message.to_string())));
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests
            .borrow()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

#[async_trait(?Send)]
impl HttpClient for MockHttpClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        self.requests.borrow_mut().push(req);
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("no response queued".to_string())))
    }
}

pub fn mock_api() -> (AdminApi<MockHttpClient>, MockHttpClient) {
    let client = MockHttpClient::default();
    let api = AdminApi::new(API_BASE.to_string(), MOCK_BASE.to_string(), client.clone());
    (api, client)
}

/// 模拟浏览器 localStorage，克隆后共享同一份数据，用来模拟重启后读取
#[derive(Clone, Default)]
pub struct MemoryTokenStore {
    token: Rc<RefCell<Option<String>>>,
}

impl MemoryTokenStore {
    pub fn with_token(token: &str) -> Self {
        let store = Self::default();
        store.save(token);
        store
    }

    pub fn peek(&self) -> Option<String> {
        self.token.borrow().clone()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn save(&self, token: &str) {
        *self.token.borrow_mut() = Some(token.to_string());
    }

    fn remove(&self) {
        self.token.borrow_mut().take();
    }
}
