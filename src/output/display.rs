//! Display functions for command results

use super::formatters::{colored_feedback, create_progress_bar, source_label};
use crate::commands::{BenchmarkResult, CandidatesReport, SolveResult};
use crate::core::to_emoji;
use crate::solver::GuessSource;
use colored::Colorize;

/// Print the result of solving a word
pub fn print_solve_result(result: &SolveResult, verbose: bool) {
    println!("\n{}", "─".repeat(60).cyan());
    println!(
        "Solving: {}",
        result.target.to_uppercase().bright_yellow().bold()
    );
    println!("{}", "─".repeat(60).cyan());

    for (i, step) in result.guesses.iter().enumerate() {
        let turn = i + 1;
        println!(
            "\nTurn {}: {} {}",
            turn,
            colored_feedback(&step.word, &step.feedback),
            to_emoji(&step.feedback)
        );
        println!(
            "  Candidates: {} → {}",
            step.candidates_before, step.candidates_after
        );

        if verbose {
            println!("  Source:     {}", source_label(&step.source));
            if let GuessSource::Oracle { explanation } = &step.source
                && !explanation.is_empty()
            {
                println!("  Why:        {}", explanation.italic());
            }
        }
    }

    println!();
    if result.success {
        println!(
            "{}",
            format!("✅ Solved in {} guesses!", result.guesses.len())
                .green()
                .bold()
        );
    } else if result.exhausted {
        println!(
            "{}",
            "❌ No candidates left; the target is not in the word list"
                .red()
                .bold()
        );
    } else {
        println!(
            "{}",
            format!("❌ Failed to solve in {} guesses", result.guesses.len())
                .red()
                .bold()
        );
    }
}

/// Print the survivors of a set of rounds
pub fn print_candidates_report(report: &CandidatesReport) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(
        " {} after {} {}",
        "CANDIDATES".bright_cyan().bold(),
        report.rounds,
        if report.rounds == 1 { "round" } else { "rounds" }
    );
    println!("{}", "═".repeat(60).cyan());

    println!("\n🔎 {}", "Constraints:".bright_cyan().bold());
    for line in report.summary.to_string().lines() {
        println!("   {line}");
    }

    println!(
        "\n📊 {} {}",
        "Remaining:".bright_cyan().bold(),
        report.candidate_count.to_string().bright_yellow().bold()
    );

    if report.top.is_empty() {
        println!("\n{}", "No word in the list fits this feedback.".red());
        return;
    }

    let best = report.top.first().map_or(0, |(_, score)| *score);
    println!("\n🏆 {}", "Top candidates:".bright_cyan().bold());
    for (i, (word, score)) in report.top.iter().enumerate() {
        let bar = create_progress_bar(*score as f64, best as f64, 20);
        println!(
            "   {:>3}. {}  {} {score}",
            i + 1,
            word.to_uppercase().bright_white().bold(),
            bar.green()
        );
    }
}

/// Print the result of a benchmark
pub fn print_benchmark_result(result: &BenchmarkResult) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "BENCHMARK RESULTS".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    println!("\n📊 {}", "Performance:".bright_cyan().bold());
    println!("   Words tested:     {}", result.total_words);
    println!(
        "   Solved:           {}",
        format!("{}/{}", result.solved, result.total_words).green()
    );
    println!(
        "   Average guesses:  {}",
        format!("{:.2}", result.average_guesses)
            .bright_yellow()
            .bold()
    );
    println!(
        "   Best case:        {}",
        format!("{}", result.min_guesses).green()
    );
    println!(
        "   Worst case:       {}",
        format!("{}", result.max_guesses).yellow()
    );
    println!("   Oracle guesses:   {}", result.oracle_guesses);
    println!("   Time taken:       {:.2}s", result.duration.as_secs_f64());
    println!("   Words/second:     {:.1}", result.words_per_second);

    if result.total_words > 0 {
        println!("\n📈 {}", "Distribution:".bright_cyan().bold());
        for (&guess_count, &count) in &result.distribution {
            let pct = (count as f64 / result.total_words as f64) * 100.0;
            let bar = create_progress_bar(pct, 100.0, 40);
            println!("   {guess_count}: {} {count:4} ({pct:5.1}%)", bar.green());
        }
    }

    if !result.failures.is_empty() {
        println!(
            "\n⚠️  {} ({})",
            "Failures:".red().bold(),
            result.failures.len()
        );
        for word in &result.failures {
            println!("   - {}", word.to_uppercase());
        }
    }
}
