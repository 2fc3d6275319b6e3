//! Score explanation for reports and diagnostics.
//!
//! `analyze` re-walks the schedule from scratch and records which talks
//! are involved in every match, grouped per constraint and per talk.

use std::fmt;

use smallvec::SmallVec;
use talkforge_core::{HardSoftScore, Schedule};

use crate::constraint::ConstraintKind;
use crate::evaluator::for_each_match;

/// One violation: a constraint and the talks (by index) that break it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintMatch {
    pub kind: ConstraintKind,
    pub talks: SmallVec<[usize; 2]>,
}

impl ConstraintMatch {
    pub fn score(&self) -> HardSoftScore {
        self.kind.weight()
    }
}

/// All matches of one constraint.
#[derive(Debug, Clone)]
pub struct ConstraintAnalysis {
    pub kind: ConstraintKind,
    pub score: HardSoftScore,
    pub matches: Vec<ConstraintMatch>,
}

impl ConstraintAnalysis {
    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }
}

/// Matches involving one talk.
#[derive(Debug, Clone)]
pub struct Indictment {
    pub talk: usize,
    pub score: HardSoftScore,
    pub matches: Vec<ConstraintMatch>,
}

impl Indictment {
    pub fn match_count(&self) -> usize {
        self.matches.len()
    }
}

/// Breakdown of a schedule's score.
#[derive(Debug, Clone)]
pub struct ScoreExplanation {
    pub score: HardSoftScore,
    /// One entry per constraint, in `ConstraintKind::ALL` order.
    pub constraint_analyses: Vec<ConstraintAnalysis>,
    /// Talks holding no placement.
    pub unassigned: Vec<usize>,
    talk_ids: Vec<String>,
}

impl ScoreExplanation {
    pub fn analysis(&self, kind: ConstraintKind) -> &ConstraintAnalysis {
        &self.constraint_analyses[kind.index()]
    }

    pub fn total_match_count(&self) -> usize {
        self.constraint_analyses.iter().map(|a| a.match_count()).sum()
    }

    pub fn non_zero_constraints(&self) -> Vec<&ConstraintAnalysis> {
        self.constraint_analyses
            .iter()
            .filter(|a| a.match_count() > 0)
            .collect()
    }

    /// Per-talk indictments, worst first.
    pub fn indictments(&self) -> Vec<Indictment> {
        let mut by_talk: Vec<Indictment> = (0..self.talk_ids.len())
            .map(|talk| Indictment {
                talk,
                score: HardSoftScore::ZERO,
                matches: Vec::new(),
            })
            .collect();
        for analysis in &self.constraint_analyses {
            for m in &analysis.matches {
                for &talk in &m.talks {
                    let indictment = &mut by_talk[talk];
                    indictment.score += m.score();
                    indictment.matches.push(m.clone());
                }
            }
        }
        by_talk.retain(|i| !i.matches.is_empty());
        by_talk.sort_by(|a, b| a.score.cmp(&b.score).then_with(|| a.talk.cmp(&b.talk)));
        by_talk
    }

    /// Talk id for a talk index used in matches.
    pub fn talk_id(&self, talk: usize) -> &str {
        &self.talk_ids[talk]
    }
}

impl fmt::Display for ScoreExplanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Score: {}", self.score)?;
        for analysis in &self.constraint_analyses {
            let level = if analysis.kind.is_hard() { "hard" } else { "soft" };
            writeln!(
                f,
                "  {} ({level}): {} match(es)",
                analysis.name(),
                analysis.match_count()
            )?;
            for m in &analysis.matches {
                let ids: Vec<&str> = m.talks.iter().map(|&t| self.talk_id(t)).collect();
                writeln!(f, "    {}", ids.join(", "))?;
            }
        }
        if !self.unassigned.is_empty() {
            let ids: Vec<&str> = self.unassigned.iter().map(|&t| self.talk_id(t)).collect();
            writeln!(f, "  Unassigned: {}", ids.join(", "))?;
        }
        Ok(())
    }
}

/// Explains the score of a schedule constraint by constraint.
pub fn analyze(schedule: &Schedule) -> ScoreExplanation {
    let mut constraint_analyses: Vec<ConstraintAnalysis> = ConstraintKind::ALL
        .iter()
        .map(|&kind| ConstraintAnalysis {
            kind,
            score: HardSoftScore::ZERO,
            matches: Vec::new(),
        })
        .collect();

    let mut score = HardSoftScore::ZERO;
    for_each_match(schedule, |talks, matches| {
        for kind in matches.iter() {
            let analysis = &mut constraint_analyses[kind.index()];
            analysis.score += kind.weight();
            analysis.matches.push(ConstraintMatch {
                kind,
                talks: SmallVec::from_slice(talks),
            });
        }
        score += matches.impact();
    });

    ScoreExplanation {
        score,
        constraint_analyses,
        unassigned: schedule.unassigned_talks().collect(),
        talk_ids: schedule
            .problem()
            .talks()
            .iter()
            .map(|t| t.id.clone())
            .collect(),
    }
}
