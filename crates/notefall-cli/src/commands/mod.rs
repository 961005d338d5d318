//! CLI command implementations.

pub mod generate;
pub mod play;
pub mod simulate;

use notefall_core::{JudgmentTier, Rank, ResultSummary};
use owo_colors::{OwoColorize, Style};

/// Terminal color for a judgment tier
pub fn tier_style(tier: JudgmentTier) -> Style {
    match tier {
        JudgmentTier::Perfect => Style::new().cyan().bold(),
        JudgmentTier::Great => Style::new().green(),
        JudgmentTier::Good => Style::new().yellow(),
        JudgmentTier::Bad => Style::new().bright_red(),
        JudgmentTier::Miss => Style::new().red(),
    }
}

fn rank_style(rank: Rank) -> Style {
    match rank {
        Rank::S => Style::new().bright_yellow().bold(),
        Rank::A => Style::new().green().bold(),
        Rank::B | Rank::C => Style::new().bold(),
        Rank::D | Rank::E => Style::new().dimmed(),
    }
}

/// Multi-line result screen
pub fn format_summary(summary: &ResultSummary) -> Vec<String> {
    let mut lines = vec![
        format!("Score:     {}", summary.score),
        format!("Max Combo: {}", summary.max_combo),
    ];
    for tier in JudgmentTier::ALL {
        lines.push(format!(
            "{:<10} {}",
            format!("{}:", tier.short_name()).style(tier_style(tier)),
            summary.counts.get(tier)
        ));
    }
    lines.push(format!(
        "Accuracy:  {:.2}% ({} / {} notes)",
        summary.accuracy_percent(),
        summary.counts.total(),
        summary.total_notes
    ));
    lines.push(format!(
        "Rank:      {}",
        summary.rank.short_name().style(rank_style(summary.rank))
    ));
    lines
}
