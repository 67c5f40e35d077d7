use argmatch_common::AttributedGraph;

use crate::{ClassId, Classes};

/// Estimate of how likely a pattern node of some class is to match a random
/// target node. Lower means rarer, and rarer nodes are placed earlier.
///
/// Implementations must be pure: the same inputs always give the same value.
pub trait MatchProbability {
    /// `populations[class]` is the number of target nodes the class may map
    /// onto and `target_size` the target's node count.
    fn probability(&self, class: ClassId, populations: &[usize], target_size: usize) -> f64;
}

/// Fraction of target nodes a class may map onto.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClassPopulationProbability;

impl MatchProbability for ClassPopulationProbability {
    fn probability(&self, class: ClassId, populations: &[usize], target_size: usize) -> f64 {
        if target_size == 0 {
            return 0.0;
        }
        let population = populations.get(class).copied().unwrap_or(0);
        population as f64 / target_size as f64
    }
}

/// Class population scaled by the share of target nodes whose total degree
/// reaches the class's total degree.
///
/// Class populations already account for the attribute and the per-direction
/// degrees; the extra factor favours classes whose degree is high relative to
/// the whole target, which are usually the most constraining.
#[derive(Clone, Debug, Default)]
pub struct DegreeWeightedProbability {
    /// Share of target nodes with at least the class's total degree, per
    /// pattern class.
    weights: Vec<f64>,
}

impl DegreeWeightedProbability {
    /// Precompute the degree weights of every class of `pattern_classes`
    /// over `target`.
    pub fn new<N, E>(pattern_classes: &Classes<N>, target: &AttributedGraph<N, E>) -> Self {
        let mut degrees: Vec<usize> = target
            .nodes()
            .map(|node| target.successors(node).len() + target.predecessors(node).len())
            .collect();
        degrees.sort_unstable();

        let size = degrees.len();
        let weights = (0..pattern_classes.class_count())
            .map(|class| {
                if size == 0 {
                    return 0.0;
                }
                let signature = pattern_classes.signature(class);
                let wanted = signature.in_degree + signature.out_degree;
                let below = degrees.partition_point(|&degree| degree < wanted);
                (size - below) as f64 / size as f64
            })
            .collect();
        Self { weights }
    }
}

impl MatchProbability for DegreeWeightedProbability {
    fn probability(&self, class: ClassId, populations: &[usize], target_size: usize) -> f64 {
        let weight = self.weights.get(class).copied().unwrap_or(0.0);
        ClassPopulationProbability.probability(class, populations, target_size) * weight
    }
}
