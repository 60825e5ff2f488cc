//! Question templates
//!
//! Each question type has one fixed template with `{a}` and `{b}`
//! placeholders. The exclusion template is chosen by the configured
//! polarity so the wording always matches the classifier's answer mapping.

use crate::Language;
use sbmn_domain::{OrderedPair, QuestionType, XorPolarity};

/// Renders question text for a pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionTemplates {
    language: Language,
    polarity: XorPolarity,
}

impl QuestionTemplates {
    /// Create templates for a language and exclusion polarity
    pub fn new(language: Language, polarity: XorPolarity) -> Self {
        Self { language, polarity }
    }

    /// Raw template for a question type
    pub fn template(&self, question: QuestionType) -> &'static str {
        match (self.language, question) {
            (Language::Pt, QuestionType::DependencyInitial | QuestionType::Dependency) => PT_DEPENDENCY,
            (Language::Pt, QuestionType::DependencyComplementary) => PT_DEPENDENCY_COMPLEMENTARY,
            (Language::Pt, QuestionType::Exclusion) => match self.polarity {
                XorPolarity::CanCoOccur => PT_XOR_CAN,
                XorPolarity::CannotCoOccur => PT_XOR_CANNOT,
            },
            (Language::Pt, QuestionType::Union) => PT_UNION,
            (Language::En, QuestionType::DependencyInitial | QuestionType::Dependency) => EN_DEPENDENCY,
            (Language::En, QuestionType::DependencyComplementary) => EN_DEPENDENCY_COMPLEMENTARY,
            (Language::En, QuestionType::Exclusion) => match self.polarity {
                XorPolarity::CanCoOccur => EN_XOR_CAN,
                XorPolarity::CannotCoOccur => EN_XOR_CANNOT,
            },
            (Language::En, QuestionType::Union) => EN_UNION,
        }
    }

    /// Open question asked once every pair has been questioned
    pub fn closing(&self) -> &'static str {
        match self.language {
            Language::Pt => PT_CLOSING,
            Language::En => EN_CLOSING,
        }
    }

    /// Question text for a pair
    pub fn render(&self, question: QuestionType, pair: &OrderedPair) -> String {
        fill(self.template(question), pair.a.name(), pair.b.name())
    }
}

/// Substitute placeholders in one pass, so names containing `{a}`/`{b}`
/// are left alone
fn fill(template: &str, a: &str, b: &str) -> String {
    let mut out = String::with_capacity(template.len() + 2 * (a.len() + b.len()));
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        if let Some(after) = tail.strip_prefix("{a}") {
            out.push_str(a);
            rest = after;
        } else if let Some(after) = tail.strip_prefix("{b}") {
            out.push_str(b);
            rest = after;
        } else {
            out.push('{');
            rest = &tail[1..];
        }
    }

    out.push_str(rest);
    out
}

const PT_DEPENDENCY: &str = "A tarefa '{b}' depende de '{a}' para ocorrer?";

const PT_DEPENDENCY_COMPLEMENTARY: &str =
    "Essa dependência é obrigatória? Ou seja, '{b}' só pode começar se '{a}' tiver ocorrido?";

const PT_XOR_CAN: &str = "As tarefas '{a}' e '{b}' podem ocorrer juntas no mesmo fluxo de processo?";

const PT_XOR_CANNOT: &str =
    "As tarefas '{a}' e '{b}' NÃO podem ocorrer juntas no mesmo fluxo de processo?";

const PT_UNION: &str = "Considerando as tarefas '{a}' e '{b}', por favor, me diga qual (ou quais) \
das seguintes situações são possíveis neste processo:
- Apenas '{a}' ocorre
- Apenas '{b}' ocorre
- Ambos '{a}' e '{b}' ocorrem";

const EN_DEPENDENCY: &str = "Does task '{b}' depend on '{a}' in order to occur?";

const EN_DEPENDENCY_COMPLEMENTARY: &str =
    "Is this dependency mandatory? That is, can '{b}' only start if '{a}' has occurred?";

const EN_XOR_CAN: &str = "Can tasks '{a}' and '{b}' occur together in the same process flow?";

const EN_XOR_CANNOT: &str = "Can tasks '{a}' and '{b}' NOT occur together in the same process flow?";

const EN_UNION: &str = "Considering tasks '{a}' and '{b}', please tell me which of the following \
situations are possible in this process:
- Only '{a}' occurs
- Only '{b}' occurs
- Both '{a}' and '{b}' occur";

const PT_CLOSING: &str = "Há mais alguma atividade, evento ou restrição importante que devemos \
considerar para este processo?";

const EN_CLOSING: &str =
    "Is there any other activity, event or constraint we should consider for this process?";

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> OrderedPair {
        OrderedPair::new("Receber Pedido", "Validar Pagamento")
    }

    #[test]
    fn test_dependency_question_asks_about_b() {
        let templates = QuestionTemplates::new(Language::Pt, XorPolarity::CanCoOccur);
        assert_eq!(
            templates.render(QuestionType::DependencyInitial, &pair()),
            "A tarefa 'Validar Pagamento' depende de 'Receber Pedido' para ocorrer?"
        );
        assert_eq!(
            templates.render(QuestionType::Dependency, &pair()),
            templates.render(QuestionType::DependencyInitial, &pair())
        );
    }

    #[test]
    fn test_xor_wording_follows_polarity() {
        let can = QuestionTemplates::new(Language::Pt, XorPolarity::CanCoOccur);
        let cannot = QuestionTemplates::new(Language::Pt, XorPolarity::CannotCoOccur);

        let can_text = can.render(QuestionType::Exclusion, &pair());
        let cannot_text = cannot.render(QuestionType::Exclusion, &pair());

        assert!(can_text.contains("podem ocorrer juntas"));
        assert!(!can_text.contains("NÃO"));
        assert!(cannot_text.contains("NÃO podem ocorrer juntas"));
    }

    #[test]
    fn test_union_lists_three_options() {
        let templates = QuestionTemplates::new(Language::En, XorPolarity::CanCoOccur);
        let text = templates.render(QuestionType::Union, &pair());
        assert!(text.contains("Only 'Receber Pedido' occurs"));
        assert!(text.contains("Only 'Validar Pagamento' occurs"));
        assert!(text.contains("Both 'Receber Pedido' and 'Validar Pagamento' occur"));
    }

    #[test]
    fn test_no_placeholder_left() {
        for language in [Language::Pt, Language::En] {
            for polarity in [XorPolarity::CanCoOccur, XorPolarity::CannotCoOccur] {
                let templates = QuestionTemplates::new(language, polarity);
                for question in [
                    QuestionType::DependencyInitial,
                    QuestionType::DependencyComplementary,
                    QuestionType::Exclusion,
                    QuestionType::Union,
                    QuestionType::Dependency,
                ] {
                    let text = templates.render(question, &pair());
                    assert!(!text.contains("{a}") && !text.contains("{b}"), "{}", text);
                }
            }
        }
    }

    #[test]
    fn test_closing_question_follows_language() {
        let pt = QuestionTemplates::new(Language::Pt, XorPolarity::CanCoOccur);
        let en = QuestionTemplates::new(Language::En, XorPolarity::CannotCoOccur);
        assert!(pt.closing().starts_with("Há mais alguma atividade"));
        assert!(en.closing().starts_with("Is there any other activity"));
    }

    #[test]
    fn test_fill_single_pass() {
        assert_eq!(fill("{a} -> {b}", "{b}", "x"), "{b} -> x");
        assert_eq!(fill("{c} {a}", "1", "2"), "{c} 1");
    }
}
