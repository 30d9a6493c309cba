//! In-memory doubles shared by unit tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::error::ApiError;
use crate::net::http::{ApiResponse, Transport, WireRequest};
use crate::net::types::{PlanType, User};
use crate::state::session::Navigator;

#[derive(Default)]
struct Script {
    responses: RefCell<VecDeque<Result<ApiResponse, ApiError>>>,
    sent: RefCell<Vec<WireRequest>>,
}

/// Transport that replays queued responses and records what was sent.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    script: Rc<Script>,
}

impl ScriptedTransport {
    pub fn respond(&self, status: u16, body: serde_json::Value) -> &Self {
        self.script
            .responses
            .borrow_mut()
            .push_back(Ok(ApiResponse::new(status, body.to_string())));
        self
    }

    pub fn fail(&self, error: ApiError) -> &Self {
        self.script.responses.borrow_mut().push_back(Err(error));
        self
    }

    pub fn sent(&self) -> Vec<WireRequest> {
        self.script.sent.borrow().clone()
    }

    pub fn last_sent(&self) -> WireRequest {
        self.sent().pop().expect("no request was sent")
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, request: WireRequest) -> Result<ApiResponse, ApiError> {
        self.script.sent.borrow_mut().push(request);
        self.script
            .responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Transport("no scripted response".to_owned())))
    }
}

/// Navigator that remembers every path it was sent to.
#[derive(Clone, Default)]
pub struct RecordingNavigator {
    paths: Rc<RefCell<Vec<String>>>,
}

impl RecordingNavigator {
    pub fn paths(&self) -> Vec<String> {
        self.paths.borrow().clone()
    }

    pub fn last(&self) -> Option<String> {
        self.paths.borrow().last().cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.paths.borrow_mut().push(path.to_owned());
    }
}

pub fn sample_user(plan_type: PlanType, credits_used: u32) -> User {
    User {
        id: 1,
        email: "joao@x.com".to_owned(),
        full_name: Some("João".to_owned()),
        plan_type,
        credits_used,
        credits_limit: 50,
        is_active: true,
        ..User::default()
    }
}
