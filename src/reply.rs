use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

pub const NAME_REQUIRED: &str = "请输入你的昵称！";
pub const MESSAGE_REQUIRED: &str = "请输入留言内容！";
pub const INTERNAL_ERROR: &str = "服务器内部错误，请稍后再试";

pub const JSON_UTF8: &str = "application/json; charset=utf-8";

/// JSON body returned by the submit endpoint: `{"code": .., "msg": ..}`.
///
/// `code` carries the outcome. The transport status stays 200 unless the
/// request hit the internal-error path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    pub code: u16,
    pub msg: String,
}

impl Reply {
    pub fn ok(name: &str) -> Self {
        Reply {
            code: 200,
            msg: format!("提交成功！感谢 {name} 的留言"),
        }
    }

    pub fn bad_request(msg: &str) -> Self {
        Reply {
            code: 400,
            msg: msg.to_string(),
        }
    }

    pub fn internal_error() -> Self {
        Reply {
            code: 500,
            msg: INTERNAL_ERROR.to_string(),
        }
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        match serde_json::to_string(&self) {
            Ok(body) => ([(header::CONTENT_TYPE, JSON_UTF8)], body).into_response(),
            Err(e) => {
                tracing::error!("Failed to serialize reply: {e}");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
