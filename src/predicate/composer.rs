//! Filter-tree composition
//!
//! Siblings are folded left to right with their parent's operator:
//! `(((first op s1) op s2) op s3)`. Each sibling's own subtree is
//! composed first. There is no precedence between And and Or at one
//! level; grouping comes only from nesting.

use tracing::{debug, trace};

use super::builder::PredicateBuilder;
use super::errors::PredicateResult;
use super::expr::{Expr, Predicate};
use super::filter::{FilterExpression, LogicalOperator};
use crate::config::EngineConfig;
use crate::reflect::{Record, Reflect, TypeInfo};

/// Composes filter trees into one predicate
#[derive(Debug, Clone, Default)]
pub struct FilterComposer {
    builder: PredicateBuilder,
}

impl FilterComposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builder(builder: PredicateBuilder) -> Self {
        Self { builder }
    }

    pub fn with_config(config: &EngineConfig) -> Self {
        Self::with_builder(PredicateBuilder::with_config(config))
    }

    pub fn builder(&self) -> &PredicateBuilder {
        &self.builder
    }

    pub fn compose<T: Reflect + Record>(
        &self,
        expr: &FilterExpression,
    ) -> PredicateResult<Predicate<T>> {
        let element = T::type_info();
        let composed = self.compose_expr(&element, expr)?;
        trace!(element = element.name, filters = expr.filter_count(), %composed, "filter composed");
        Ok(Predicate::from_expr(composed))
    }

    pub fn compose_expr(&self, element: &TypeInfo, expr: &FilterExpression) -> PredicateResult<Expr> {
        let first = &expr.first;
        let mut result = self
            .builder
            .build_expr(element, &first.path, first.operator, &first.arguments)?;

        let operator = match expr.logical_operator {
            Some(operator) => operator,
            None => {
                if !expr.others.is_empty() {
                    debug!(
                        path = %first.path,
                        ignored = expr.others.len(),
                        "siblings without a logical operator are ignored"
                    );
                }
                return Ok(result);
            }
        };

        for sibling in &expr.others {
            let next = self.compose_expr(element, sibling)?;
            result = match operator {
                LogicalOperator::And => result.and(next),
                LogicalOperator::Or => result.or(next),
            };
        }

        Ok(result)
    }
}
