//! Core Interviewer implementation

use crate::config::InterviewConfig;
use crate::error::InterviewError;
use crate::input::distinct_activities;
use crate::prompt::QuestionTemplates;
use crate::session::{Phase, Session};
use crate::types::{NextPrompt, Prompt, StepOutcome};
use sbmn_domain::traits::DomainExpert;
use sbmn_domain::{
    classify, generate_pairs, ProcessContext, Relation, Sequencer, Step, StepError, Transition,
    Validation,
};
use sbmn_gatekeeper::Gatekeeper;
use tracing::{debug, info};

/// The Interviewer drives sessions through their question cycles
pub struct Interviewer<E>
where
    E: DomainExpert,
{
    expert: E,
    gatekeeper: Gatekeeper,
    config: InterviewConfig,
    templates: QuestionTemplates,
}

impl<E> Interviewer<E>
where
    E: DomainExpert,
{
    /// Create a new Interviewer
    pub fn new(expert: E, gatekeeper: Gatekeeper, config: InterviewConfig) -> Self {
        let templates = QuestionTemplates::new(config.language, config.xor_polarity);
        Self {
            expert,
            gatekeeper,
            config,
            templates,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &InterviewConfig {
        &self.config
    }

    /// Question templates in use
    pub fn templates(&self) -> &QuestionTemplates {
        &self.templates
    }

    /// The domain expert
    pub fn expert(&self) -> &E {
        &self.expert
    }

    /// Start an interview and ask the expert the first question
    ///
    /// # Errors
    ///
    /// - [`InterviewError::MissingField`] if the process name or domain is blank
    /// - [`InterviewError::DuplicateActivity`] under [`DuplicatePolicy::Reject`](crate::DuplicatePolicy::Reject)
    /// - [`InterviewError::InsufficientActivities`] if fewer than two distinct
    ///   non-empty activities remain
    pub fn start<S: AsRef<str>>(
        &self,
        process_name: &str,
        domain: &str,
        activities: &[S],
    ) -> Result<Session, InterviewError> {
        self.config.validate().map_err(InterviewError::Config)?;

        let process_name = process_name.trim();
        if process_name.is_empty() {
            return Err(InterviewError::MissingField("process_name"));
        }
        let domain = domain.trim();
        if domain.is_empty() {
            return Err(InterviewError::MissingField("domain"));
        }

        let activities = distinct_activities(activities, self.config.duplicates)?;
        if activities.len() < 2 {
            return Err(InterviewError::InsufficientActivities {
                found: activities.len(),
            });
        }

        let pairs = generate_pairs(&activities);
        let mut session = Session::new();
        session.phase = Phase::Interviewing;
        session.context = ProcessContext::new(process_name, domain);
        session.sequencer = Sequencer::new(pairs, self.config.cycle);
        session.activities = activities;

        info!(
            "Starting interview {} for process '{}': {} activities, {} pairs",
            session.id(),
            process_name,
            session.activities.len(),
            session.sequencer.total_pairs()
        );

        session.prompt = self.prepare_prompt(&session);
        Ok(session)
    }

    /// Submit the analyst's validation of the current question
    ///
    /// Classifies the validation, records the relation the recording policy
    /// admits, runs the consistency checks, advances to the next question,
    /// and asks the expert about it.
    ///
    /// # Errors
    ///
    /// - [`InterviewError::NotStarted`] before [`Interviewer::start`]
    /// - [`InterviewError::Step`] if the interview is over or the validation
    ///   does not fit the question; the session is left untouched
    pub fn submit_validation(
        &self,
        session: &mut Session,
        validation: Validation,
        note: &str,
    ) -> Result<StepOutcome, InterviewError> {
        let prompt = match (session.phase, session.prompt.as_ref()) {
            (Phase::Introduction, _) => return Err(InterviewError::NotStarted),
            (Phase::Closing, _) | (Phase::Interviewing, None) => {
                return Err(StepError::Finished.into())
            }
            (Phase::Interviewing, Some(prompt)) => prompt.clone(),
        };

        let kind = classify(prompt.question_type, &validation, self.config.xor_polarity)?;

        let recorded = kind
            .filter(|kind| self.config.recording.admits(*kind))
            .map(|kind| {
                Relation::new(
                    &prompt.pair,
                    kind,
                    prompt.expert_answer.as_str(),
                    validation,
                    note.trim(),
                )
            });

        let transition = session.sequencer.advance(&validation)?;

        let mut findings = Vec::new();
        if let Some(relation) = &recorded {
            session.relations.push(relation.clone());
            debug!(
                "Recorded {} for {} ({} relations)",
                relation.kind,
                prompt.pair,
                session.relations.len()
            );
            findings = self.gatekeeper.check(relation, &session.relations);
            session.findings.extend(findings.iter().cloned());
        }

        session.staged_union = Default::default();

        let next = match transition {
            Transition::Done => {
                info!(
                    "Interview {} complete: {} relations, {} findings",
                    session.id(),
                    session.relations.len(),
                    session.findings.len()
                );
                session.phase = Phase::Closing;
                session.prompt = None;
                NextPrompt::Done
            }
            Transition::Question(_) | Transition::Pair(_) => {
                session.prompt = self.prepare_prompt(session);
                match &session.prompt {
                    Some(prompt) => NextPrompt::Ask(prompt.clone()),
                    None => NextPrompt::Done,
                }
            }
        };

        Ok(StepOutcome {
            recorded,
            findings,
            next,
        })
    }

    /// Submit the union options staged on the session
    pub fn submit_staged_union(
        &self,
        session: &mut Session,
        note: &str,
    ) -> Result<StepOutcome, InterviewError> {
        let selection = session.staged_union();
        self.submit_validation(session, Validation::Union(selection), note)
    }

    /// Record the analyst's answer to the closing question
    ///
    /// Only accepted once every pair has been questioned. A later call
    /// replaces the earlier note.
    pub fn close(&self, session: &mut Session, note: &str) -> Result<(), InterviewError> {
        match session.phase {
            Phase::Introduction => Err(InterviewError::NotStarted),
            Phase::Interviewing => Err(InterviewError::InProgress),
            Phase::Closing => {
                session.closing_note = note.trim().to_string();
                debug!("Closing note recorded for {}", session.id());
                Ok(())
            }
        }
    }

    /// Render the current question and ask the expert about it
    fn prepare_prompt(&self, session: &Session) -> Option<Prompt> {
        match session.sequencer.current() {
            Step::Ask { pair, question } => {
                let text = self.templates.render(question, pair);
                let format = question.response_format();
                let expert_answer = self.expert.ask(&session.context, &text, format);

                debug!(
                    "Asking {} for {} ({}/{})",
                    question,
                    pair,
                    session.sequencer.pair_index() + 1,
                    session.sequencer.total_pairs()
                );

                Some(Prompt {
                    pair: pair.clone(),
                    pair_index: session.sequencer.pair_index(),
                    total_pairs: session.sequencer.total_pairs(),
                    question_type: question,
                    question: text,
                    format,
                    expert_answer,
                })
            }
            Step::Done => None,
        }
    }
}
