//! URL construction for the provider's model `outputs` endpoint.

use url::Url;

use crate::config::ModelRef;
use crate::error::ProviderResult;

/// `{base}/users/{user}/apps/{app}/models/{model}/versions/{version}/outputs`,
/// with every identifier percent-encoded.
pub fn build_outputs_url(base_url: &str, model: &ModelRef) -> ProviderResult<Url> {
    let url = format!(
        "{}/users/{}/apps/{}/models/{}/versions/{}/outputs",
        base_url.trim_end_matches('/'),
        urlencoding::encode(&model.user_id),
        urlencoding::encode(&model.app_id),
        urlencoding::encode(&model.model_id),
        urlencoding::encode(&model.version_id),
    );
    Ok(Url::parse(&url)?)
}
