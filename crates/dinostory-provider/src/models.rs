//! Request payloads for the provider's `outputs` endpoint.
//!
//! Responses are read as untyped JSON in `parsing.rs` because the provider
//! has shipped several shapes for the same field.

use serde::Serialize;

use crate::config::ModelRef;

/// Body of `POST .../outputs`.
#[derive(Debug, Serialize)]
pub struct OutputsRequest<'a> {
    pub user_app_id: UserAppId<'a>,
    pub inputs: Vec<Input<'a>>,
}

#[derive(Debug, Serialize)]
pub struct UserAppId<'a> {
    pub user_id: &'a str,
    pub app_id: &'a str,
}

#[derive(Debug, Serialize)]
pub struct Input<'a> {
    pub data: InputData<'a>,
}

#[derive(Debug, Serialize)]
pub struct InputData<'a> {
    pub text: TextInput<'a>,
}

/// The two accepted encodings of a text input.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum TextInput<'a> {
    /// `"text": { "raw": "..." }`
    Raw { raw: &'a str },
    /// `"text": "..."`
    Plain(&'a str),
}

impl<'a> OutputsRequest<'a> {
    /// A single-input request against `model`.
    pub fn single(model: &'a ModelRef, text: TextInput<'a>) -> Self {
        Self {
            user_app_id: UserAppId {
                user_id: &model.user_id,
                app_id: &model.app_id,
            },
            inputs: vec![Input {
                data: InputData { text },
            }],
        }
    }
}
