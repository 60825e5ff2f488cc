//! Simulated domain expert
//!
//! Wraps any `LlmProvider` as a `DomainExpert`. The expert is primed with a
//! persona for the process under analysis and an instruction matching the
//! expected answer format, then asked the interview question.
//!
//! Provider failures never propagate: they are logged and replaced by
//! [`COMMUNICATION_ERROR_ANSWER`], which the analyst is expected to reject.

use sbmn_domain::traits::{ChatTurn, DomainExpert, LlmProvider};
use sbmn_domain::{ProcessContext, ResponseFormat};
use std::fmt::Display;
use tracing::{debug, warn};

/// Answer recorded when the expert could not be reached
pub const COMMUNICATION_ERROR_ANSWER: &str = "Erro na comunicação com o especialista.";

const EXPERT_ACKNOWLEDGEMENT: &str =
    "Entendido. Estou pronto para ajudar como especialista de domínio.";

const BINARY_INSTRUCTION: &str = "Responda apenas 'Sim' ou 'Não' quando a pergunta for binária. \
Se precisar de mais contexto ou achar a pergunta ambígua, peça esclarecimentos.";

const ENUMERATION_INSTRUCTION: &str = "Para a próxima pergunta, você deve responder indicando \
quais das opções são possíveis: 'apenas A', 'apenas B', 'ambos A e B', ou uma combinação \
dessas (por exemplo, 'apenas A e ambos').";

/// Build the conversation sent to the language model for one question
///
/// The persona is sent as an interviewer turn followed by a fixed model
/// acknowledgement, then the question itself.
pub fn expert_conversation(
    context: &ProcessContext,
    question: &str,
    format: ResponseFormat,
) -> Vec<ChatTurn> {
    let mut persona = format!(
        "Você é um especialista de domínio do processo '{}' no setor de '{}'. \
Eu farei perguntas sobre dependências e exclusões de tarefas (AFOs) para modelar um processo. ",
        context.process_name, context.domain
    );
    persona.push_str(match format {
        ResponseFormat::Binary => BINARY_INSTRUCTION,
        ResponseFormat::OpenEnumeration => ENUMERATION_INSTRUCTION,
    });

    vec![
        ChatTurn::user(persona),
        ChatTurn::model(EXPERT_ACKNOWLEDGEMENT),
        ChatTurn::user(question),
    ]
}

/// Domain expert backed by a language model
pub struct LlmExpert<P> {
    provider: P,
}

impl<P> LlmExpert<P> {
    /// Create a new expert over a provider
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// The underlying provider
    pub fn provider(&self) -> &P {
        &self.provider
    }
}

impl<P> DomainExpert for LlmExpert<P>
where
    P: LlmProvider,
    P::Error: Display,
{
    fn ask(&self, context: &ProcessContext, question: &str, format: ResponseFormat) -> String {
        let conversation = expert_conversation(context, question, format);

        match self.provider.generate(&conversation) {
            Ok(answer) => {
                let answer = answer.trim().to_string();
                debug!("Expert answered {} chars", answer.len());
                answer
            }
            Err(e) => {
                warn!(
                    "Expert unavailable for process '{}': {}",
                    context.process_name, e
                );
                COMMUNICATION_ERROR_ANSWER.to_string()
            }
        }
    }
}
