//! Pair/question sequencer
//!
//! Walks every ordered pair through its question cycle. The pair list is
//! fixed at construction and traversed in order; answers only decide which
//! question comes next within a pair, never which pair.
//!
//! Extended cycle transitions:
//!
//! ```text
//! DEP_INITIAL --Sim--> DEP_COMPLEMENTARY --> XOR --> UNION --> next pair
//! DEP_INITIAL --Não-------------------------^
//! ```
//!
//! Simplified cycle: `DEPENDENCY --> XOR --> next pair`.

use crate::{Answer, OrderedPair, QuestionCycle, QuestionType, StepError, Validation};

/// What the sequencer is waiting for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step<'a> {
    /// Ask `question` about `pair`
    Ask {
        /// Pair under analysis
        pair: &'a OrderedPair,
        /// Question to ask
        question: QuestionType,
    },

    /// Every pair has been questioned
    Done,
}

/// Result of advancing the sequencer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Same pair, next question
    Question(QuestionType),

    /// Moved on to the pair at this index
    Pair(usize),

    /// No pairs left
    Done,
}

/// State machine over (pair, question type)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequencer {
    pairs: Vec<OrderedPair>,
    pair_index: usize,
    question: QuestionType,
    cycle: QuestionCycle,
    initial_dependency: Option<Answer>,
}

impl Sequencer {
    /// Create a sequencer positioned on the first question of the first pair
    pub fn new(pairs: Vec<OrderedPair>, cycle: QuestionCycle) -> Self {
        Self {
            pairs,
            pair_index: 0,
            question: cycle.first(),
            cycle,
            initial_dependency: None,
        }
    }

    /// A sequencer with no pairs (already done)
    pub fn empty(cycle: QuestionCycle) -> Self {
        Self::new(Vec::new(), cycle)
    }

    /// The current step
    pub fn current(&self) -> Step<'_> {
        match self.pairs.get(self.pair_index) {
            Some(pair) => Step::Ask {
                pair,
                question: self.question,
            },
            None => Step::Done,
        }
    }

    /// Whether every pair has been questioned
    pub fn is_done(&self) -> bool {
        self.pair_index >= self.pairs.len()
    }

    /// Advance past the current question using the analyst's validation
    ///
    /// # Errors
    ///
    /// - [`StepError::Finished`] if there is no current question
    /// - [`StepError::ValidationMismatch`] if the validation does not fit the
    ///   current question; the sequencer is left untouched
    pub fn advance(&mut self, validation: &Validation) -> Result<Transition, StepError> {
        if self.is_done() {
            return Err(StepError::Finished);
        }

        let expected = self.question.response_format();
        if validation.format() != expected {
            return Err(StepError::ValidationMismatch {
                question: self.question,
                expected,
            });
        }

        let next = match (self.cycle, self.question) {
            (QuestionCycle::Extended, QuestionType::DependencyInitial) => {
                let answer = validation.answer();
                self.initial_dependency = answer;
                match answer {
                    Some(Answer::Affirmative) => Some(QuestionType::DependencyComplementary),
                    _ => Some(QuestionType::Exclusion),
                }
            }
            (QuestionCycle::Extended, QuestionType::DependencyComplementary) => {
                Some(QuestionType::Exclusion)
            }
            (QuestionCycle::Extended, QuestionType::Exclusion) => Some(QuestionType::Union),
            (QuestionCycle::Simplified, QuestionType::Dependency) => Some(QuestionType::Exclusion),
            (QuestionCycle::Extended, QuestionType::Union)
            | (QuestionCycle::Simplified, QuestionType::Exclusion) => None,
            // A question outside the cycle cannot be current; close the pair.
            (_, _) => None,
        };

        match next {
            Some(question) => {
                self.question = question;
                Ok(Transition::Question(question))
            }
            None => Ok(self.next_pair()),
        }
    }

    fn next_pair(&mut self) -> Transition {
        self.pair_index += 1;
        self.question = self.cycle.first();
        self.initial_dependency = None;

        if self.is_done() {
            Transition::Done
        } else {
            Transition::Pair(self.pair_index)
        }
    }

    /// All pairs, in traversal order
    pub fn pairs(&self) -> &[OrderedPair] {
        &self.pairs
    }

    /// Index of the pair under analysis
    pub fn pair_index(&self) -> usize {
        self.pair_index
    }

    /// Total number of pairs
    pub fn total_pairs(&self) -> usize {
        self.pairs.len()
    }

    /// Question type the sequencer is positioned on
    pub fn question(&self) -> QuestionType {
        self.question
    }

    /// Cycle in use
    pub fn cycle(&self) -> QuestionCycle {
        self.cycle
    }

    /// Answer to the initial dependency question of the current pair, kept
    /// until the pair is closed
    pub fn initial_dependency(&self) -> Option<Answer> {
        self.initial_dependency
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{generate_pairs, Activity, UnionSelection};
    use proptest::prelude::*;

    fn two_pairs() -> Vec<OrderedPair> {
        vec![OrderedPair::new("A", "B"), OrderedPair::new("B", "A")]
    }

    fn union() -> Validation {
        Validation::Union(UnionSelection::all())
    }

    #[test]
    fn test_initial_state() {
        let sequencer = Sequencer::new(two_pairs(), QuestionCycle::Extended);
        assert_eq!(sequencer.pair_index(), 0);
        assert_eq!(sequencer.question(), QuestionType::DependencyInitial);
        assert!(sequencer.initial_dependency().is_none());
        match sequencer.current() {
            Step::Ask { pair, question } => {
                assert_eq!(pair, &OrderedPair::new("A", "B"));
                assert_eq!(question, QuestionType::DependencyInitial);
            }
            Step::Done => panic!("Expected a question"),
        }
    }

    #[test]
    fn test_affirmative_initial_asks_complementary() {
        let mut sequencer = Sequencer::new(two_pairs(), QuestionCycle::Extended);
        let transition = sequencer.advance(&Validation::yes()).unwrap();
        assert_eq!(transition, Transition::Question(QuestionType::DependencyComplementary));
        assert_eq!(sequencer.initial_dependency(), Some(Answer::Affirmative));
    }

    #[test]
    fn test_negative_initial_skips_complementary() {
        let mut sequencer = Sequencer::new(two_pairs(), QuestionCycle::Extended);
        let transition = sequencer.advance(&Validation::no()).unwrap();
        assert_eq!(transition, Transition::Question(QuestionType::Exclusion));
    }

    #[test]
    fn test_full_extended_pair() {
        let mut sequencer = Sequencer::new(two_pairs(), QuestionCycle::Extended);
        sequencer.advance(&Validation::yes()).unwrap();
        sequencer.advance(&Validation::yes()).unwrap();
        assert_eq!(
            sequencer.advance(&Validation::no()).unwrap(),
            Transition::Question(QuestionType::Union)
        );
        assert_eq!(sequencer.advance(&union()).unwrap(), Transition::Pair(1));
        assert_eq!(sequencer.question(), QuestionType::DependencyInitial);
        assert!(sequencer.initial_dependency().is_none());
    }

    #[test]
    fn test_done_after_last_pair() {
        let mut sequencer = Sequencer::new(vec![OrderedPair::new("A", "B")], QuestionCycle::Simplified);
        assert_eq!(
            sequencer.advance(&Validation::no()).unwrap(),
            Transition::Question(QuestionType::Exclusion)
        );
        assert_eq!(sequencer.advance(&Validation::no()).unwrap(), Transition::Done);
        assert!(sequencer.is_done());
        assert_eq!(sequencer.current(), Step::Done);
        assert_eq!(sequencer.advance(&Validation::no()), Err(StepError::Finished));
    }

    #[test]
    fn test_mismatch_leaves_state_untouched() {
        let mut sequencer = Sequencer::new(two_pairs(), QuestionCycle::Extended);
        let before = sequencer.clone();
        let result = sequencer.advance(&union());
        assert!(matches!(result, Err(StepError::ValidationMismatch { .. })));
        assert_eq!(sequencer, before);
    }

    #[test]
    fn test_empty_sequencer_is_done() {
        let sequencer = Sequencer::empty(QuestionCycle::Extended);
        assert!(sequencer.is_done());
        assert_eq!(sequencer.total_pairs(), 0);
    }

    /// Answer the current question from a pool of booleans, counting steps per pair
    fn run(cycle: QuestionCycle, n: usize, answers: &[bool]) -> Vec<usize> {
        let activities: Vec<Activity> = (0..n).map(|i| Activity::new(format!("T{}", i))).collect();
        let mut sequencer = Sequencer::new(generate_pairs(&activities), cycle);
        let mut steps = vec![0; sequencer.total_pairs()];
        let mut visited = Vec::new();
        let mut i = 0;

        while let Step::Ask { pair, question } = sequencer.current() {
            if visited.last() != Some(pair) {
                visited.push(pair.clone());
            }
            steps[sequencer.pair_index()] += 1;
            let validation = match question.response_format() {
                crate::ResponseFormat::Binary if answers[i % answers.len()] => Validation::yes(),
                crate::ResponseFormat::Binary => Validation::no(),
                crate::ResponseFormat::OpenEnumeration => union(),
            };
            sequencer.advance(&validation).unwrap();
            i += 1;
        }

        assert_eq!(visited, sequencer.pairs().to_vec());
        steps
    }

    proptest! {
        #[test]
        fn prop_extended_cycle_step_bounds(n in 2usize..6, answers in prop::collection::vec(any::<bool>(), 1..16)) {
            let steps = run(QuestionCycle::Extended, n, &answers);
            prop_assert_eq!(steps.len(), n * (n - 1));
            for count in steps {
                prop_assert!((3..=4).contains(&count));
            }
        }

        #[test]
        fn prop_simplified_cycle_two_steps(n in 2usize..6, answers in prop::collection::vec(any::<bool>(), 1..16)) {
            let steps = run(QuestionCycle::Simplified, n, &answers);
            prop_assert!(steps.iter().all(|count| *count == 2));
        }
    }
}
