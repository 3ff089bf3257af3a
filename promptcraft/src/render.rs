//! Plain-text rendering of API data for the terminal.

use promptcraft_api::endpoints::auth::{Role, User};
use promptcraft_api::endpoints::challenges::{Challenge, ChallengeStats};
use promptcraft_api::endpoints::evaluations::{Attempt, EvaluationResult};
use promptcraft_api::endpoints::leaderboard::{ChallengeLeaderboardEntry, LeaderboardEntry, UserRank};
use promptcraft_api::grading::{count_words, format_score, percentage, Grade};
use promptcraft_api::PageMeta;
use std::fmt::Write;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn user(user: &User) -> String {
    let role = match user.role {
        Role::Admin => " (admin)",
        Role::User => "",
    };
    format!(
        "{} <{}>{}\nAttempts: {}  Best: {}  Average: {}\n",
        user.username,
        user.email,
        role,
        user.total_attempts,
        format_score(user.best_score),
        format_score(user.average_score),
    )
}

pub fn user_list(users: &[User]) -> String {
    if users.is_empty() {
        return "No users.\n".to_string();
    }

    let mut out = String::new();
    for u in users {
        let role = match u.role {
            Role::Admin => "admin",
            Role::User => "user",
        };
        let _ = writeln!(
            out,
            "{:<26} {:<20} {:<30} {:<5} {} attempts",
            u.id, u.username, u.email, role, u.total_attempts
        );
    }
    out
}

pub fn challenge_list(challenges: &[Challenge], meta: Option<&PageMeta>) -> String {
    if challenges.is_empty() {
        return "No challenges found.\n".to_string();
    }

    let mut out = String::new();
    for c in challenges {
        let _ = writeln!(
            out,
            "{:<26} {} [{} / {}] ~{} min",
            c.id, c.title, c.category, c.difficulty, c.estimated_minutes
        );
    }
    if let Some(meta) = meta {
        let _ = writeln!(out, "{}", page_footer(meta));
    }
    out
}

pub fn challenge_detail(challenge: &Challenge, stats: Option<&ChallengeStats>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", challenge.title);
    let _ = writeln!(
        out,
        "{} / {} / ~{} min",
        challenge.category, challenge.difficulty, challenge.estimated_minutes
    );
    if !challenge.tags.is_empty() {
        let _ = writeln!(out, "Tags: {}", challenge.tags.join(", "));
    }
    let _ = writeln!(out, "\n{}", challenge.instruction);

    if !challenge.tips.is_empty() {
        let _ = writeln!(out, "\nTips:");
        for tip in &challenge.tips {
            let _ = writeln!(out, "  - {}", tip);
        }
    }

    if let Some(stats) = stats {
        let _ = writeln!(
            out,
            "\n{} attempts, average {}, best {}",
            stats.total_attempts,
            format_score(stats.average_score),
            format_score(stats.best_score)
        );
        let total = stats.grade_distribution.total();
        for grade in Grade::ALL {
            let count = stats.grade_distribution.count(grade);
            let _ = writeln!(
                out,
                "  {} {:>4} {:>3}%",
                grade,
                count,
                percentage(count as f64, total as f64)
            );
        }
    }
    out
}

pub fn evaluation(result: &EvaluationResult) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Score: {}/10  Grade: {}",
        format_score(result.total_score),
        result.grade
    );
    for (dimension, score) in result.breakdown() {
        let _ = writeln!(
            out,
            "  {:<13} {:>4}  {}",
            dimension.label(),
            format_score(score),
            dimension.description()
        );
    }

    if !result.strengths.is_empty() {
        let _ = writeln!(out, "\nStrengths:");
        for s in &result.strengths {
            let _ = writeln!(out, "  + {}", s);
        }
    }
    if !result.suggestions.is_empty() {
        let _ = writeln!(out, "\nSuggestions:");
        for s in &result.suggestions {
            let _ = writeln!(out, "  - {}", s);
        }
    }
    let _ = writeln!(out, "\n{} words", result.word_count);
    out
}

pub fn attempt_list(attempts: &[Attempt], meta: Option<&PageMeta>) -> String {
    if attempts.is_empty() {
        return "No attempts yet.\n".to_string();
    }

    let mut out = String::new();
    for a in attempts {
        let _ = writeln!(
            out,
            "{:<26} {}  {:>4} {}  {}",
            a.id,
            a.created_at.format(DATE_FORMAT),
            format_score(a.result.total_score),
            a.result.grade,
            a.challenge_id
        );
    }
    if let Some(meta) = meta {
        let _ = writeln!(out, "{}", page_footer(meta));
    }
    out
}

pub fn attempt_detail(attempt: &Attempt) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Attempt {} on {} ({})",
        attempt.id,
        attempt.challenge_id,
        attempt.created_at.format(DATE_FORMAT)
    );
    let _ = writeln!(out, "\n{}\n", attempt.prompt_text.trim_end());
    out.push_str(&evaluation(&attempt.result));
    out
}

pub fn leaderboard(entries: &[LeaderboardEntry]) -> String {
    if entries.is_empty() {
        return "Leaderboard is empty.\n".to_string();
    }

    let mut out = String::new();
    for e in entries {
        let _ = writeln!(
            out,
            "#{:<4} {:<20} best {:>4}  avg {:>4}  ({} attempts)",
            e.rank,
            e.username,
            format_score(e.best_score),
            format_score(e.average_score),
            e.total_attempts
        );
    }
    out
}

pub fn challenge_leaderboard(entries: &[ChallengeLeaderboardEntry]) -> String {
    if entries.is_empty() {
        return "Nobody has attempted this challenge yet.\n".to_string();
    }

    let mut out = String::new();
    for e in entries {
        let _ = writeln!(
            out,
            "#{:<4} {:<20} {:>4} {}  {}",
            e.rank,
            e.username,
            format_score(e.total_score),
            e.grade,
            e.created_at.format(DATE_FORMAT)
        );
    }
    out
}

pub fn rank(rank: &UserRank) -> String {
    if rank.total == 0 || rank.rank == 0 {
        return "Not ranked yet. Submit an attempt to join the leaderboard.\n".to_string();
    }
    format!(
        "Rank {} of {} (top {}%)\n",
        rank.rank,
        rank.total,
        percentage(rank.rank as f64, rank.total as f64)
    )
}

/// Shown before submitting so the user sees what is being sent.
pub fn prompt_summary(prompt: &str) -> String {
    format!("Submitting {} words...\n", count_words(prompt))
}

fn page_footer(meta: &PageMeta) -> String {
    let mut footer = format!("Page {} of {} ({} total)", meta.page, meta.total_pages, meta.total);
    if meta.has_next() {
        footer.push_str(", use --page for more");
    }
    footer
}

#[cfg(test)]
mod tests {
    use super::*;
    use promptcraft_api::endpoints::evaluations::EvaluatorType;

    fn result() -> EvaluationResult {
        EvaluationResult {
            total_score: 8.24,
            grade: Grade::A,
            clarity_score: 9.0,
            specificity_score: 8.0,
            context_score: 7.5,
            structure_score: 8.0,
            completeness_score: 8.7,
            suggestions: vec!["Name the target framework".into()],
            strengths: vec![],
            evaluator_type: EvaluatorType::Heuristic,
            word_count: 120,
        }
    }

    #[test]
    fn evaluation_lists_every_dimension() {
        let text = evaluation(&result());
        assert!(text.starts_with("Score: 8.2/10  Grade: A\n"));
        assert!(text.contains("Clarity"));
        assert!(text.contains("Completeness"));
        assert!(text.contains("  - Name the target framework"));
        assert!(!text.contains("Strengths:"));
        assert!(text.ends_with("120 words\n"));
    }

    #[test]
    fn rank_shows_share() {
        assert_eq!(
            rank(&UserRank { rank: 3, total: 40 }),
            "Rank 3 of 40 (top 8%)\n"
        );
        assert!(rank(&UserRank { rank: 0, total: 0 }).starts_with("Not ranked"));
    }

    #[test]
    fn empty_lists_say_so() {
        assert_eq!(challenge_list(&[], None), "No challenges found.\n");
        assert_eq!(attempt_list(&[], None), "No attempts yet.\n");
        assert_eq!(leaderboard(&[]), "Leaderboard is empty.\n");
        assert_eq!(user_list(&[]), "No users.\n");
    }

    #[test]
    fn prompt_summary_counts_words() {
        assert_eq!(prompt_summary("  write a\nREST api "), "Submitting 4 words...\n");
    }
}
