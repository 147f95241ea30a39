//! Transport contracts shared by the server and the client.
//!
//! Route constants and the JSON bodies exchanged with the story and speech
//! endpoints. Keep this free of framework types so both the axum adapter
//! and the reqwest client can depend on it.

pub mod http;
