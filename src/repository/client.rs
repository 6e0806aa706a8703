use crate::repository::traits::{ObjectInfo, ObjectRepository, ObjectSpec};
use crate::{PangenomeError, Result};
use serde_json::{json, Value};
use std::time::Duration;

/// JSON-RPC client for a remote workspace service
pub struct WorkspaceClient {
    url: String,
    token: Option<String>,
    client: reqwest::blocking::Client,
}

impl WorkspaceClient {
    pub fn new(url: &str, token: Option<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(1800))
            .build()
            .map_err(|e| PangenomeError::Repository(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            url: url.to_string(),
            token,
            client,
        })
    }

    fn call(&self, method: &str, params: Value) -> Result<Value> {
        let body = json!({
            "version": "1.1",
            "method": format!("Workspace.{}", method),
            "params": [params],
            "id": uuid::Uuid::new_v4().to_string(),
        });

        let mut request = self.client.post(&self.url).json(&body);
        if let Some(token) = &self.token {
            request = request.header("Authorization", token);
        }

        let response = request
            .send()
            .map_err(|e| PangenomeError::Repository(format!("{} request failed: {}", method, e)))?;
        let status = response.status();
        let payload: Value = response.json().map_err(|e| {
            PangenomeError::Repository(format!("{} returned invalid JSON ({}): {}", method, status, e))
        })?;

        parse_rpc_response(method, payload)
    }
}

/// Unwrap the first result of a JSON-RPC response, surfacing service errors
fn parse_rpc_response(method: &str, mut payload: Value) -> Result<Value> {
    if let Some(error) = payload.get("error").filter(|e| !e.is_null()) {
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("unknown error");
        let detail = error.get("error").and_then(Value::as_str).unwrap_or("");
        return Err(PangenomeError::Repository(format!(
            "{} failed: {}{}{}",
            method,
            message,
            if detail.is_empty() { "" } else { "\n" },
            detail
        )));
    }

    payload
        .get_mut("result")
        .and_then(|result| result.get_mut(0))
        .map(Value::take)
        .ok_or_else(|| PangenomeError::Repository(format!("{} returned no result", method)))
}

/// Workspaces are addressed by numeric id or by name
fn workspace_identity(workspace: &str) -> (&'static str, Value) {
    match workspace.parse::<u64>() {
        Ok(id) => ("id", json!(id)),
        Err(_) => ("workspace", json!(workspace)),
    }
}

impl ObjectRepository for WorkspaceClient {
    fn fetch(&self, reference: &str) -> Result<Value> {
        tracing::debug!("Fetching {} from {}", reference, self.url);
        let mut result = self.call("get_objects2", json!({ "objects": [{ "ref": reference }] }))?;

        result
            .get_mut("data")
            .and_then(|data| data.get_mut(0))
            .and_then(|object| object.get_mut("data"))
            .map(Value::take)
            .ok_or_else(|| PangenomeError::Repository(format!("Object {} has no data", reference)))
    }

    fn save(&self, workspace: &str, object: &ObjectSpec) -> Result<ObjectInfo> {
        tracing::debug!("Saving {} into workspace {}", object.name, workspace);
        let (key, identity) = workspace_identity(workspace);
        let mut params = json!({ "objects": [object] });
        params[key] = identity;

        let result = self.call("save_objects", params)?;
        let info = result
            .get(0)
            .ok_or_else(|| PangenomeError::Repository("save_objects returned no info".to_string()))?;
        ObjectInfo::from_tuple(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rpc_error_is_reported() {
        let payload = json!({
            "version": "1.1",
            "error": {"name": "JSONRPCError", "code": -32500, "message": "Object 1/2/3 not found"}
        });
        let err = parse_rpc_response("get_objects2", payload).unwrap_err();
        assert!(err.to_string().contains("Object 1/2/3 not found"));
    }

    #[test]
    fn test_rpc_result_unwrapped() {
        let payload = json!({"version": "1.1", "result": [{"data": []}]});
        assert_eq!(parse_rpc_response("get_objects2", payload).unwrap(), json!({"data": []}));
    }

    #[test]
    fn test_workspace_identity() {
        assert_eq!(workspace_identity("42"), ("id", json!(42)));
        assert_eq!(workspace_identity("my_ws"), ("workspace", json!("my_ws")));
    }
}
