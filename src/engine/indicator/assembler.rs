use std::sync::Arc;
use tracing::{debug, info};

use crate::engine::errors::ValidationError;
use crate::engine::filter::{
    FilterSpec, FragmentBuilder, Predicate, Principal, ScopeProvider, StaticPredicate,
};
use crate::engine::indicator::definition::IndicatorDefinition;
use crate::engine::indicator::query::{AggregateQuery, Grouping, GroupingPeriod};
use crate::shared::datetime::Clock;

/// Interprets an `IndicatorDefinition` plus caller filters into an `AggregateQuery`.
pub struct QueryAssembler {
    scope: Arc<dyn ScopeProvider>,
    clock: Arc<dyn Clock>,
    incomplete_data_key: String,
}

impl QueryAssembler {
    pub fn new(scope: Arc<dyn ScopeProvider>, clock: Arc<dyn Clock>, incomplete_data_key: &str) -> Self {
        Self {
            scope,
            clock,
            incomplete_data_key: incomplete_data_key.to_string(),
        }
    }

    /// Conjunct order is fixed: scope, static predicates, group-date presence,
    /// then filter fragments sorted by filter name. The assembled query is
    /// therefore independent of the order filters were supplied in.
    pub fn assemble(
        &self,
        principal: &Principal,
        definition: &IndicatorDefinition,
        filters: &FilterSpec,
        grouped_by: Option<GroupingPeriod>,
    ) -> Result<AggregateQuery, ValidationError> {
        let mut bound = Vec::with_capacity(filters.len());
        for (name, value) in filters.iter() {
            let binding = definition
                .binding(name)
                .ok_or_else(|| ValidationError::UnknownFilter {
                    indicator: definition.name.clone(),
                    filter: name.to_string(),
                })?;
            bound.push((binding, value));
        }
        bound.sort_by(|a, b| a.0.name.cmp(&b.0.name));

        let mut fragments: Vec<Option<Predicate>> = Vec::new();
        fragments.push(self.scope.scope_fragment(principal, &definition.scope_alias));
        fragments.extend(
            definition
                .static_predicates
                .iter()
                .cloned()
                .map(|p| Some(Predicate::Static(p))),
        );
        if grouped_by.is_some() {
            fragments.push(Some(Predicate::Static(StaticPredicate::Present(
                definition.date_column.clone(),
            ))));
        }
        for (binding, value) in bound {
            fragments.push(FragmentBuilder::filter_fragment(binding, value)?);
        }

        let predicate = Predicate::all_of(fragments);
        let query = AggregateQuery {
            indicator: definition.name.clone(),
            lookup_key: definition.lookup_key.clone(),
            source: definition.source.clone(),
            predicate,
            dimension: definition.dimension.clone(),
            grouping: grouped_by.map(|period| Grouping {
                period,
                column: definition.date_column.clone(),
            }),
            as_of: self.clock.today(),
            incomplete_data_key: self.incomplete_data_key.clone(),
        };

        debug!(
            target: "indicator_engine::assembler",
            indicator = %query.indicator,
            conjuncts = query.conjuncts().len(),
            "Assembled predicate"
        );
        info!(
            target: "indicator_engine::assembler",
            indicator = %query.indicator,
            user = %principal.user_name,
            grouped_by = ?grouped_by,
            "Indicator query assembled"
        );
        Ok(query)
    }
}
