//! Domain expert construction from profiles.

use crate::config::{Profile, ProviderKind};
use crate::error::Result;
use sbmn_domain::traits::DomainExpert;
use sbmn_llm::{gemini, ollama, GeminiProvider, LlmExpert, MockProvider, OllamaProvider};
use tracing::info;

/// Default model for Ollama profiles without one.
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3.2";

/// Build the domain expert described by a profile.
///
/// Fails only when the profile cannot be turned into a provider, e.g. a
/// missing API key. Once built, the expert never fails: unreachable
/// providers answer with the communication-error sentinel.
pub fn build_expert(profile: &Profile) -> Result<Box<dyn DomainExpert>> {
    let expert: Box<dyn DomainExpert> = match profile.provider {
        ProviderKind::Mock => Box::new(LlmExpert::new(MockProvider::default())),
        ProviderKind::Ollama => {
            let endpoint = profile.endpoint.as_deref().unwrap_or(ollama::DEFAULT_ENDPOINT);
            let model = profile.model.as_deref().unwrap_or(DEFAULT_OLLAMA_MODEL);
            let mut provider = OllamaProvider::new(endpoint, model);
            if let Some(retries) = profile.max_retries {
                provider = provider.with_max_retries(retries);
            }
            Box::new(LlmExpert::new(provider))
        }
        ProviderKind::Gemini => {
            let key_env = profile
                .api_key_env
                .as_deref()
                .unwrap_or(gemini::DEFAULT_API_KEY_ENV);
            let model = profile.model.as_deref().unwrap_or(gemini::DEFAULT_MODEL);
            let mut provider = GeminiProvider::from_env(key_env, model)?;
            if let Some(endpoint) = &profile.endpoint {
                provider = provider.with_base_url(endpoint.as_str());
            }
            Box::new(LlmExpert::new(provider))
        }
    };

    info!("Using {} expert", profile.provider);
    Ok(expert)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CliError;
    use sbmn_domain::{ProcessContext, ResponseFormat};

    #[test]
    fn test_mock_expert_answers() {
        let expert = build_expert(&Profile::new(ProviderKind::Mock)).unwrap();
        let context = ProcessContext::new("Vendas", "Varejo");
        assert_eq!(expert.ask(&context, "?", ResponseFormat::Binary), "Sim");
    }

    #[test]
    fn test_gemini_without_key_fails() {
        let mut profile = Profile::new(ProviderKind::Gemini);
        profile.api_key_env = Some("SBMN_TEST_UNSET_API_KEY".to_string());
        assert!(matches!(build_expert(&profile), Err(CliError::Llm(_))));
    }

    #[test]
    fn test_unreachable_ollama_fails_soft() {
        let mut profile = Profile::new(ProviderKind::Ollama);
        profile.endpoint = Some("http://localhost:99999".to_string());
        profile.max_retries = Some(1);
        let expert = build_expert(&profile).unwrap();

        let context = ProcessContext::new("Vendas", "Varejo");
        assert_eq!(
            expert.ask(&context, "?", ResponseFormat::Binary),
            sbmn_llm::COMMUNICATION_ERROR_ANSWER
        );
    }
}
