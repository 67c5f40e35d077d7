use std::fmt;
use std::ops::ControlFlow;
use std::time::{Duration, Instant};

use argmatch_common::{AttributedGraph, Config};
use argmatch_subgraph::{ConfigError, Matcher, SearchStats, Solution};
use serde::Serialize;
use tracing::debug;

/// Averages over the trials of one benchmark run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BenchReport {
    /// Solutions found by the last trial.
    pub solutions: u64,
    /// Complete trials run.
    pub trials: u64,
    /// Seconds per trial, setup included.
    pub avg_total_secs: f64,
    /// Seconds from the start of a trial to its first solution, averaged
    /// over all trials; zero when there is no solution.
    pub avg_first_secs: f64,
    /// Counters of the last trial.
    #[serde(skip)]
    pub stats: SearchStats,
    /// Configuration every trial ran with.
    pub config: Config,
}

impl fmt::Display for BenchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.solutions, self.avg_total_secs, self.avg_first_secs)
    }
}

/// Run complete trials of `pattern` in `target` until `budget` has elapsed.
///
/// Every trial classifies both graphs, orders the pattern and enumerates all
/// solutions from scratch. At least one trial always runs.
///
/// # Errors
/// A [`ConfigError`] if the search cannot be set up.
pub fn run_trials<N, E>(
    pattern: &AttributedGraph<N, E>,
    target: &AttributedGraph<N, E>,
    config: Config,
    budget: Duration,
) -> Result<BenchReport, ConfigError>
where
    N: PartialEq + Clone,
    E: PartialEq,
{
    let start = Instant::now();
    let mut trials = 0u64;
    let mut first_total = Duration::ZERO;

    let last = loop {
        trials += 1;
        let trial_start = Instant::now();
        let mut first: Option<Duration> = None;

        let matcher = Matcher::new(pattern, target, config);
        let outcome = matcher.run(&mut |_: &Solution<'_>| {
            if first.is_none() {
                first = Some(trial_start.elapsed());
            }
            ControlFlow::Continue(())
        })?;
        first_total += first.unwrap_or(Duration::ZERO);

        if start.elapsed() >= budget {
            break outcome;
        }
    };

    let elapsed = start.elapsed();
    debug!(trials, ?elapsed, "benchmark finished");
    Ok(BenchReport {
        solutions: last.solutions,
        trials,
        avg_total_secs: elapsed.as_secs_f64() / trials as f64,
        avg_first_secs: first_total.as_secs_f64() / trials as f64,
        stats: last.stats,
        config,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use argmatch_common::{Empty, GraphBuilder};

    fn cycle(n: usize) -> AttributedGraph<i32, Empty> {
        let mut b = GraphBuilder::new();
        for _ in 0..n {
            b.insert_node(1);
        }
        for i in 0..n {
            b.insert_edge(i, (i + 1) % n, Empty).unwrap();
        }
        b.build()
    }

    #[test]
    fn zero_budget_runs_one_trial() {
        let report = run_trials(&cycle(3), &cycle(3), Config::default(), Duration::ZERO).unwrap();
        assert_eq!(report.trials, 1);
        assert_eq!(report.solutions, 3);
        assert!(report.avg_first_secs <= report.avg_total_secs);
    }

    #[test]
    fn no_solution_reports_zero_first_time() {
        let report = run_trials(&cycle(4), &cycle(3), Config::default(), Duration::ZERO).unwrap();
        assert_eq!(report.solutions, 0);
        assert!(report.avg_first_secs.abs() < f64::EPSILON);
    }

    #[test]
    fn budget_repeats_trials() {
        let report =
            run_trials(&cycle(3), &cycle(6), Config::default(), Duration::from_millis(20)).unwrap();
        assert!(report.trials >= 1);
        // A 3-cycle does not fit in a 6-cycle.
        assert_eq!(report.solutions, 0);
    }

    #[test]
    fn report_formats() {
        let report = BenchReport {
            solutions: 4,
            trials: 2,
            avg_total_secs: 0.5,
            avg_first_secs: 0.125,
            stats: SearchStats::default(),
            config: Config::default(),
        };
        assert_eq!(report.to_string(), "4 0.5 0.125");

        let json = serde_json::to_value(report).unwrap();
        assert_eq!(json["solutions"], 4);
        assert_eq!(json["avg_first_secs"], 0.125);
        assert_eq!(json["config"]["match_kind"], "Monomorphism");
        assert!(json.get("stats").is_none());
    }
}
