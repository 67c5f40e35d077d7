use argmatch_common::{AttributedGraph, Config, NodeId, OrderingStrategy};
use tracing::info;

use crate::{
    ClassPopulationProbability, Classes, CollectAll, ConfigError, CountOnly,
    DegreeWeightedProbability, FirstN, Mapping, NodeClassifier, NodeSorter, SearchOutcome,
    SearchProblem, Visitor,
};

/// Visiting order for `pattern` using the estimate selected by `ordering`.
pub fn visiting_order<N, E>(
    pattern: &AttributedGraph<N, E>,
    target: &AttributedGraph<N, E>,
    pattern_classes: &Classes<N>,
    target_classes: &Classes<N>,
    ordering: OrderingStrategy,
) -> Vec<NodeId>
where
    N: PartialEq,
{
    let populations = pattern_classes.compatible_populations(target_classes);
    let classes = pattern_classes.as_slice();
    let target_size = target.node_count();
    match ordering {
        OrderingStrategy::ClassPopulation => NodeSorter::new(ClassPopulationProbability)
            .sort_nodes(pattern, classes, &populations, target_size),
        OrderingStrategy::DegreeWeighted => {
            NodeSorter::new(DegreeWeightedProbability::new(pattern_classes, target))
                .sort_nodes(pattern, classes, &populations, target_size)
        }
    }
}

/// Everything needed to search one pattern in one target: both
/// classifications and the visiting order.
#[derive(Clone, Debug)]
pub struct Matcher<'a, N, E> {
    pattern: &'a AttributedGraph<N, E>,
    target: &'a AttributedGraph<N, E>,
    pattern_classes: Classes<N>,
    target_classes: Classes<N>,
    order: Vec<NodeId>,
    config: Config,
}

impl<'a, N, E> Matcher<'a, N, E>
where
    N: PartialEq + Clone,
    E: PartialEq,
{
    /// Classify both graphs and order the pattern.
    pub fn new(pattern: &'a AttributedGraph<N, E>, target: &'a AttributedGraph<N, E>, config: Config) -> Self {
        Self::with_target_classes(pattern, target, NodeClassifier::classify(target), config)
    }

    /// Like [`Self::new`], reusing a classification of `target`.
    pub fn with_target_classes(
        pattern: &'a AttributedGraph<N, E>,
        target: &'a AttributedGraph<N, E>,
        target_classes: Classes<N>,
        config: Config,
    ) -> Self {
        let pattern_classes = NodeClassifier::classify_against(pattern, &target_classes);
        let order = visiting_order(pattern, target, &pattern_classes, &target_classes, config.ordering);
        Self {
            pattern,
            target,
            pattern_classes,
            target_classes,
            order,
            config,
        }
    }

    /// Classes of the pattern nodes, drawn from the target table.
    #[must_use]
    pub const fn pattern_classes(&self) -> &Classes<N> {
        &self.pattern_classes
    }

    /// Classes of the target nodes.
    #[must_use]
    pub const fn target_classes(&self) -> &Classes<N> {
        &self.target_classes
    }

    /// The visiting order.
    #[must_use]
    pub fn order(&self) -> &[NodeId] {
        &self.order
    }

    /// The configuration in use.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// A validated search problem over this matcher's inputs.
    ///
    /// # Errors
    /// A [`ConfigError`] if the inputs are inconsistent.
    pub fn problem(&self) -> Result<SearchProblem<'_, N, E>, ConfigError> {
        SearchProblem::new(
            self.pattern,
            self.target,
            &self.pattern_classes,
            &self.target_classes,
            &self.order,
            &self.config,
        )
    }

    /// Run the search with a caller supplied visitor.
    ///
    /// # Errors
    /// A [`ConfigError`] if the inputs are inconsistent.
    pub fn run<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<SearchOutcome, ConfigError> {
        Ok(self.problem()?.run(visitor))
    }

    /// All mappings, or the first `limit` when the configuration sets one.
    ///
    /// # Errors
    /// A [`ConfigError`] if the inputs are inconsistent.
    pub fn find_all(&self) -> Result<Vec<Mapping>, ConfigError> {
        let problem = self.problem()?;
        let mappings = match self.config.limit {
            Some(0) => Vec::new(),
            Some(limit) => {
                let mut first = FirstN::new(limit);
                problem.run(&mut first);
                first.mappings
            }
            None => {
                let mut all = CollectAll::default();
                problem.run(&mut all);
                all.mappings
            }
        };
        info!(found = mappings.len(), "subgraph search complete");
        Ok(mappings)
    }

    /// Number of mappings, ignoring any limit.
    ///
    /// # Errors
    /// A [`ConfigError`] if the inputs are inconsistent.
    pub fn count(&self) -> Result<u64, ConfigError> {
        let mut counter = CountOnly::default();
        self.run(&mut counter)?;
        Ok(counter.count)
    }
}

/// Find the mappings of `pattern` into `target` under `config`.
///
/// # Errors
/// A [`ConfigError`] if the inputs are inconsistent.
pub fn find_subgraphs<N, E>(
    pattern: &AttributedGraph<N, E>,
    target: &AttributedGraph<N, E>,
    config: Config,
) -> Result<Vec<Mapping>, ConfigError>
where
    N: PartialEq + Clone,
    E: PartialEq,
{
    Matcher::new(pattern, target, config).find_all()
}
