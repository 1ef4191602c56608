//! Progress reporting while a query runs

use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use snapstudy_application::ProgressNotifier;
use snapstudy_domain::{ProviderId, QueryPhase};
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress with indicatif bars, one per phase
pub struct ProgressReporter {
    multi: MultiProgress,
    phase_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            phase_bar: Mutex::new(None),
        }
    }

    fn phase_style() -> ProgressStyle {
        ProgressStyle::with_template(
            "{spinner:.green} {prefix:.bold.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=>-")
    }

    fn provider_status(provider: ProviderId, success: bool) -> String {
        if success {
            format!("{} {}", "v".green(), provider)
        } else {
            format!("{} {}", "x".red(), provider)
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_phase_start(&self, phase: QueryPhase, total_tasks: usize) {
        let pb = self.multi.add(ProgressBar::new(total_tasks as u64));
        pb.set_style(Self::phase_style());
        pb.set_prefix(phase.display_name());
        pb.set_message("waiting...");
        pb.enable_steady_tick(Duration::from_millis(120));

        if let Ok(mut slot) = self.phase_bar.lock()
            && let Some(previous) = slot.replace(pb)
        {
            previous.finish_and_clear();
        }
    }

    fn on_provider_complete(&self, _phase: QueryPhase, provider: ProviderId, success: bool) {
        if let Ok(slot) = self.phase_bar.lock()
            && let Some(pb) = slot.as_ref()
        {
            pb.set_message(Self::provider_status(provider, success));
            pb.inc(1);
        }
    }

    fn on_phase_complete(&self, phase: QueryPhase) {
        if let Ok(mut slot) = self.phase_bar.lock()
            && let Some(pb) = slot.take()
        {
            pb.finish_with_message(format!("{} complete", phase.display_name()).green().to_string());
        }
    }

    fn on_timeout(&self, phase: QueryPhase) {
        if let Ok(mut slot) = self.phase_bar.lock()
            && let Some(pb) = slot.take()
        {
            pb.abandon_with_message(format!("{} timed out", phase.display_name()).yellow().to_string());
        }
    }
}

/// Plain text progress (no bars), for non-interactive terminals
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_phase_start(&self, phase: QueryPhase, total_tasks: usize) {
        eprintln!(
            "{} {} ({} providers)",
            "->".cyan(),
            phase.display_name().bold(),
            total_tasks
        );
    }

    fn on_provider_complete(&self, _phase: QueryPhase, provider: ProviderId, success: bool) {
        if success {
            eprintln!("  {} {}", "v".green(), provider);
        } else {
            eprintln!("  {} {} (failed)", "x".red(), provider);
        }
    }

    fn on_phase_complete(&self, _phase: QueryPhase) {}

    fn on_timeout(&self, phase: QueryPhase) {
        eprintln!("  {} {} timed out", "!".yellow(), phase.display_name());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reporter_survives_out_of_order_callbacks() {
        let reporter = ProgressReporter::new();
        reporter.on_provider_complete(QueryPhase::FanningOut, ProviderId::Groq, true);
        reporter.on_phase_complete(QueryPhase::FanningOut);

        reporter.on_phase_start(QueryPhase::FanningOut, 2);
        reporter.on_phase_start(QueryPhase::SingleProvider, 1);
        reporter.on_provider_complete(QueryPhase::SingleProvider, ProviderId::Groq, false);
        reporter.on_timeout(QueryPhase::SingleProvider);

        assert!(reporter.phase_bar.lock().unwrap().is_none());
    }
}
