//! Plugin request / response messages and their payload encoding.

use serde::{Deserialize, Serialize};

use crate::adr::{DecisionRequest, DecisionResult};
use crate::config::WireFormat;
use crate::error::CodecError;

/// Calls a host can make into the plugin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PluginRequest {
    Id,
    Name,
    Handle(DecisionRequest),
}

/// Answers sent back for each [`PluginRequest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PluginResponse {
    Id(String),
    Name(String),
    Handle(DecisionResult),
    Error(String),
}

pub fn decode_request(payload: &[u8], format: WireFormat) -> Result<PluginRequest, CodecError> {
    match format {
        WireFormat::Json => serde_json::from_slice(payload).map_err(|_| CodecError::Decode),
        WireFormat::Postcard => postcard::from_bytes(payload).map_err(|_| CodecError::Decode),
    }
}

pub fn encode_request(req: &PluginRequest, format: WireFormat) -> Result<Vec<u8>, CodecError> {
    match format {
        WireFormat::Json => serde_json::to_vec(req).map_err(|_| CodecError::Encode),
        WireFormat::Postcard => postcard::to_allocvec(req).map_err(|_| CodecError::Encode),
    }
}

pub fn decode_response(payload: &[u8], format: WireFormat) -> Result<PluginResponse, CodecError> {
    match format {
        WireFormat::Json => serde_json::from_slice(payload).map_err(|_| CodecError::Decode),
        WireFormat::Postcard => postcard::from_bytes(payload).map_err(|_| CodecError::Decode),
    }
}

pub fn encode_response(resp: &PluginResponse, format: WireFormat) -> Result<Vec<u8>, CodecError> {
    match format {
        WireFormat::Json => serde_json::to_vec(resp).map_err(|_| CodecError::Encode),
        WireFormat::Postcard => postcard::to_allocvec(resp).map_err(|_| CodecError::Encode),
    }
}
