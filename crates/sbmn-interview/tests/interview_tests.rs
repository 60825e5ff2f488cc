//! End-to-end interview scenarios driven through the mock expert

use proptest::prelude::*;
use sbmn_domain::{
    OrderedPair, QuestionType, RecordingPolicy, RelationKind, UnionOption, UnionSelection,
    Validation, XorPolarity,
};
use sbmn_gatekeeper::{FindingKind, Gatekeeper};
use sbmn_interview::{
    InterviewConfig, Interviewer, NextPrompt, Phase, QuestionTemplates, Session,
};
use sbmn_llm::{LlmExpert, MockProvider};

type MockInterviewer = Interviewer<LlmExpert<MockProvider>>;

fn interviewer(config: InterviewConfig) -> MockInterviewer {
    Interviewer::new(
        LlmExpert::new(MockProvider::new("Sim")),
        Gatekeeper::default_config(),
        config,
    )
}

fn next_question(next: &NextPrompt) -> Option<(OrderedPair, QuestionType)> {
    match next {
        NextPrompt::Ask(prompt) => Some((prompt.pair.clone(), prompt.question_type)),
        NextPrompt::Done => None,
    }
}

#[test]
fn scenario_two_activities_extended_dependency_branch() {
    let interviewer = interviewer(InterviewConfig::extended());
    let mut session = interviewer
        .start("Vendas", "Varejo", &["Receber Pedido", "Validar Pagamento"])
        .unwrap();

    assert_eq!(
        session.pending_pairs(),
        &[
            OrderedPair::new("Receber Pedido", "Validar Pagamento"),
            OrderedPair::new("Validar Pagamento", "Receber Pedido"),
        ]
    );

    let first = session.current_prompt().unwrap();
    assert_eq!(first.question_type, QuestionType::DependencyInitial);
    assert_eq!(
        first.question,
        "A tarefa 'Validar Pagamento' depende de 'Receber Pedido' para ocorrer?"
    );
    assert_eq!(first.expert_answer, "Sim");

    let outcome = interviewer
        .submit_validation(&mut session, Validation::yes(), "")
        .unwrap();

    // Deferred until the complementary question resolves
    assert!(outcome.recorded.is_none());
    assert_eq!(
        next_question(&outcome.next),
        Some((
            OrderedPair::new("Receber Pedido", "Validar Pagamento"),
            QuestionType::DependencyComplementary
        ))
    );
}

#[test]
fn scenario_extended_negative_dependency_skips_complementary() {
    let interviewer = interviewer(InterviewConfig::extended());
    let mut session = interviewer.start("Vendas", "Varejo", &["A", "B"]).unwrap();

    let outcome = interviewer
        .submit_validation(&mut session, Validation::no(), "")
        .unwrap();

    assert_eq!(outcome.recorded.unwrap().kind, RelationKind::NoDependency);
    assert_eq!(
        next_question(&outcome.next),
        Some((OrderedPair::new("A", "B"), QuestionType::Exclusion))
    );
}

#[test]
fn scenario_simplified_negative_dependency_records_nothing() {
    let interviewer = interviewer(InterviewConfig::simplified());
    let mut session = interviewer
        .start("Vendas", "Varejo", &["Receber Pedido", "Validar Pagamento"])
        .unwrap();
    assert_eq!(
        session.current_prompt().unwrap().question_type,
        QuestionType::Dependency
    );

    let outcome = interviewer
        .submit_validation(&mut session, Validation::no(), "")
        .unwrap();

    assert!(outcome.recorded.is_none());
    assert!(session.relations().is_empty());
    assert_eq!(
        next_question(&outcome.next),
        Some((
            OrderedPair::new("Receber Pedido", "Validar Pagamento"),
            QuestionType::Exclusion
        ))
    );
}

#[test]
fn scenario_simplified_exclusion_uses_cannot_co_occur_wording() {
    let interviewer = interviewer(InterviewConfig::simplified());
    let mut session = interviewer.start("Vendas", "Varejo", &["A", "B"]).unwrap();

    interviewer
        .submit_validation(&mut session, Validation::yes(), "")
        .unwrap();
    let prompt = session.current_prompt().unwrap();
    assert!(prompt.question.contains("NÃO podem ocorrer juntas"));

    // "cannot co-occur" answered affirmatively is an exclusion
    let outcome = interviewer
        .submit_validation(&mut session, Validation::yes(), "")
        .unwrap();
    assert_eq!(outcome.recorded.unwrap().kind, RelationKind::Exclusive);

    // DEP(A, B) then XOR(A, B)
    assert_eq!(outcome.findings.len(), 1);
}

#[test]
fn scenario_affirmative_only_keeps_negative_answers_that_assert_constraints() {
    let config = InterviewConfig {
        recording: RecordingPolicy::AffirmativeOnly,
        ..InterviewConfig::extended()
    };
    assert_eq!(config.xor_polarity, XorPolarity::CanCoOccur);
    assert!(config.validate().is_ok());

    let interviewer = interviewer(config);
    let mut session = interviewer.start("Vendas", "Varejo", &["A", "B"]).unwrap();

    // DEP_INITIAL "Sim" defers to the complementary question
    let outcome = interviewer
        .submit_validation(&mut session, Validation::yes(), "")
        .unwrap();
    assert!(outcome.recorded.is_none());

    // "Não" to the complementary question is a conditional dependency
    let outcome = interviewer
        .submit_validation(&mut session, Validation::no(), "")
        .unwrap();
    assert_eq!(outcome.recorded.unwrap().kind, RelationKind::ConditionalDependency);

    // "Não" to "can they co-occur?" is an exclusion
    let outcome = interviewer
        .submit_validation(&mut session, Validation::no(), "")
        .unwrap();
    assert_eq!(outcome.recorded.unwrap().kind, RelationKind::Exclusive);

    interviewer
        .submit_validation(&mut session, Validation::Union(UnionSelection::all()), "")
        .unwrap();

    // Next pair: "Não" to DEP_INITIAL and "Sim" to co-occurrence are dropped
    for validation in [Validation::no(), Validation::yes()] {
        let outcome = interviewer
            .submit_validation(&mut session, validation, "")
            .unwrap();
        assert!(outcome.recorded.is_none());
    }

    let kinds: Vec<RelationKind> = session.relations().iter().map(|r| r.kind).collect();
    assert_eq!(
        kinds,
        vec![
            RelationKind::ConditionalDependency,
            RelationKind::Exclusive,
            RelationKind::InclusiveUnion,
        ]
    );
}

#[test]
fn scenario_dependency_then_reversed_exclusion_raises_one_finding() {
    let interviewer = interviewer(InterviewConfig::extended());
    let mut session = interviewer.start("Vendas", "Varejo", &["A", "B"]).unwrap();

    // (A, B): DEP_INITIAL yes, DEP_COMPLEMENTARY yes -> DEP
    interviewer
        .submit_validation(&mut session, Validation::yes(), "")
        .unwrap();
    let dep = interviewer
        .submit_validation(&mut session, Validation::yes(), "")
        .unwrap();
    assert_eq!(dep.recorded.unwrap().kind, RelationKind::StrictDependency);
    assert!(dep.findings.is_empty());

    // (A, B): can co-occur, union
    interviewer
        .submit_validation(&mut session, Validation::yes(), "")
        .unwrap();
    interviewer
        .submit_validation(&mut session, Validation::Union(UnionSelection::all()), "")
        .unwrap();

    // (B, A): DEP_INITIAL no, then "can co-occur" no -> XOR
    interviewer
        .submit_validation(&mut session, Validation::no(), "")
        .unwrap();
    let xor = interviewer
        .submit_validation(&mut session, Validation::no(), "")
        .unwrap();

    let relation = xor.recorded.unwrap();
    assert_eq!(relation.kind, RelationKind::Exclusive);
    assert_eq!(relation.pair(), OrderedPair::new("B", "A"));

    assert_eq!(xor.findings.len(), 1);
    let finding = &xor.findings[0];
    assert_eq!(finding.kind, FindingKind::EquivalentOperators);
    let message = finding.message();
    assert!(message.contains("'A'"));
    assert!(message.contains("'B'"));
    assert!(message.contains("DEP"));
    assert!(message.contains("XOR"));
}

#[test]
fn scenario_union_selections() {
    let interviewer = interviewer(InterviewConfig::extended());
    let mut session = interviewer.start("Vendas", "Varejo", &["A", "B"]).unwrap();

    // (A, B): straight to UNION
    interviewer
        .submit_validation(&mut session, Validation::no(), "")
        .unwrap();
    interviewer
        .submit_validation(&mut session, Validation::yes(), "")
        .unwrap();
    assert_eq!(
        session.current_prompt().unwrap().question_type,
        QuestionType::Union
    );

    let partial = interviewer
        .submit_validation(
            &mut session,
            Validation::Union(UnionSelection::from_options(&[
                UnionOption::OnlyA,
                UnionOption::OnlyB,
            ])),
            "",
        )
        .unwrap();
    assert_eq!(partial.recorded.unwrap().kind, RelationKind::PartialUnion);

    // (B, A): straight to UNION, all three ticked
    interviewer
        .submit_validation(&mut session, Validation::no(), "")
        .unwrap();
    interviewer
        .submit_validation(&mut session, Validation::yes(), "")
        .unwrap();
    for option in UnionOption::ALL {
        session.stage_union_option(option, true);
    }
    let inclusive = interviewer.submit_staged_union(&mut session, "").unwrap();
    assert_eq!(inclusive.recorded.unwrap().kind, RelationKind::InclusiveUnion);
    assert_eq!(inclusive.next, NextPrompt::Done);
}

#[test]
fn scenario_empty_union_is_partial() {
    let interviewer = interviewer(InterviewConfig::extended());
    let mut session = interviewer.start("Vendas", "Varejo", &["A", "B"]).unwrap();

    interviewer
        .submit_validation(&mut session, Validation::no(), "")
        .unwrap();
    interviewer
        .submit_validation(&mut session, Validation::yes(), "")
        .unwrap();
    let outcome = interviewer.submit_staged_union(&mut session, "").unwrap();

    let relation = outcome.recorded.unwrap();
    assert_eq!(relation.kind, RelationKind::PartialUnion);
    assert_eq!(relation.validation_text(), "Nenhuma das opções selecionadas");
}

#[test]
fn scenario_expert_question_uses_templates() {
    let config = InterviewConfig::extended();
    let templates = QuestionTemplates::new(config.language, config.xor_polarity);
    let pair = OrderedPair::new("A", "B");

    let mut provider = MockProvider::new("Sim");
    provider.add_response(templates.render(QuestionType::DependencyInitial, &pair), "Não");

    let interviewer = Interviewer::new(
        LlmExpert::new(provider),
        Gatekeeper::default_config(),
        config,
    );
    let session = interviewer.start("Vendas", "Varejo", &["A", "B"]).unwrap();
    assert_eq!(session.current_prompt().unwrap().expert_answer, "Não");
}

fn assert_pristine(session: &Session) {
    assert_eq!(session.phase(), Phase::Introduction);
    assert!(session.activities().is_empty());
    assert!(session.pending_pairs().is_empty());
    assert!(session.relations().is_empty());
    assert!(session.findings().is_empty());
    assert_eq!(session.pair_index(), 0);
    assert!(session.current_prompt().is_none());
    assert!(session.staged_union().is_empty());
    assert!(session.summary().relations.is_empty());
}

proptest! {
    #[test]
    fn prop_reset_returns_to_empty_state(
        n in 2usize..5,
        answers in prop::collection::vec(any::<bool>(), 0..20),
        simplified in any::<bool>(),
    ) {
        let config = if simplified {
            InterviewConfig::simplified()
        } else {
            InterviewConfig::extended()
        };
        let interviewer = interviewer(config);
        let names: Vec<String> = (0..n).map(|i| format!("Atividade {}", i)).collect();
        let mut session = interviewer.start("Processo", "Setor", names.as_slice()).unwrap();
        prop_assert_eq!(session.pending_pairs().len(), n * (n - 1));

        for yes in answers {
            if session.is_done() {
                break;
            }
            let validation = match session.question() {
                QuestionType::Union => Validation::Union(UnionSelection::all()),
                _ if yes => Validation::yes(),
                _ => Validation::no(),
            };
            session.stage_union_option(UnionOption::OnlyA, yes);
            interviewer.submit_validation(&mut session, validation, "nota").unwrap();
        }

        session.reset();
        assert_pristine(&session);
    }
}
