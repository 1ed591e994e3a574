//! Mock test assembly.
//!
//! Plans a topic mix with the quota allocator, then fills each topic's quota
//! from that topic's question pool with the sampler.

use std::collections::HashMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::allocation::{allocate_counts, AllocationMethod};
use crate::model::{Question, QuestionBank, QuotaResult};
use crate::sampler::sample;

/// One topic's share of a mock test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MockSection {
    pub topic: String,
    /// The planned quota for this topic.
    pub quota: QuotaResult,
    pub questions: Vec<Question>,
    /// Quota the topic's pool could not cover.
    pub shortfall: u32,
}

/// A mock test drawn from a question bank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MockTest {
    pub bank_id: String,
    pub method: AllocationMethod,
    /// Questions asked for.
    pub requested: u32,
    pub sections: Vec<MockSection>,
}

/// Result of grading a set of answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizScore {
    pub correct: u32,
    /// Questions that received an answer.
    pub answered: u32,
    pub total: u32,
    /// `correct / total` in percent, one decimal place.
    pub percent: f64,
}

impl MockTest {
    /// All questions in section order.
    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.sections.iter().flat_map(|s| s.questions.iter())
    }

    /// Number of questions actually drawn.
    pub fn len(&self) -> usize {
        self.sections.iter().map(|s| s.questions.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total quota the bank could not cover.
    pub fn shortfall(&self) -> u32 {
        self.sections.iter().map(|s| s.shortfall).sum()
    }

    /// Grade answers keyed by question id (value = chosen option index).
    ///
    /// Unanswered questions count as wrong; answers to questions outside the
    /// test are ignored.
    pub fn grade(&self, answers: &HashMap<String, usize>) -> QuizScore {
        let mut correct = 0u32;
        let mut answered = 0u32;
        let mut total = 0u32;
        for question in self.questions() {
            total += 1;
            if let Some(&choice) = answers.get(&question.id) {
                answered += 1;
                if question.is_correct(choice) {
                    correct += 1;
                }
            }
        }
        let percent = if total == 0 {
            0.0
        } else {
            (correct as f64 / total as f64 * 1000.0).round() / 10.0
        };
        QuizScore {
            correct,
            answered,
            total,
            percent,
        }
    }
}

/// Build a mock test of `total` questions spread across the bank's topics.
///
/// Topics are allocated in bank order. A topic whose pool is smaller than its
/// quota contributes every question it has and records the shortfall.
pub fn build_mock_test<R: Rng + ?Sized>(
    bank: &QuestionBank,
    total: u32,
    method: AllocationMethod,
    rng: &mut R,
) -> MockTest {
    let counts = allocate_counts(&bank.categories(), total, method);

    // Quotas are paired with topics by position; names are not looked up again.
    let sections = bank
        .topics
        .iter()
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .map(|(topic, count)| {
            let questions = sample(&topic.questions, count as usize, &mut *rng);
            let shortfall = count.saturating_sub(questions.len() as u32);
            if shortfall > 0 {
                tracing::warn!(
                    "topic '{}' has {} question(s) for a quota of {}",
                    topic.name,
                    topic.questions.len(),
                    count
                );
            }
            MockSection {
                topic: topic.name.clone(),
                quota: QuotaResult {
                    name: topic.name.clone(),
                    count,
                    weightage_percent: topic.weightage_percent,
                },
                questions,
                shortfall,
            }
        })
        .collect();

    MockTest {
        bank_id: bank.id.clone(),
        method,
        requested: total,
        sections,
    }
}

/// Draw `count` practice questions from a single topic.
///
/// Returns `None` when the bank has no such topic.
pub fn practice_topic<R: Rng + ?Sized>(
    bank: &QuestionBank,
    topic: &str,
    count: usize,
    rng: &mut R,
) -> Option<Vec<Question>> {
    bank.topic(topic).map(|t| sample(&t.questions, count, &mut *rng))
}
