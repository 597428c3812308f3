//! Compilation and the compiled pipeline object.
//!
//! `compile` runs the whole planning chain once: resolve each callback's
//! signature, validate the stage set against the options, unify the extra
//! parameters, pick a strategy, hash the plan, emit the report. The result
//! is a `CompiledPipeline` whose `invoke` body is a single static dispatch
//! on the pre-selected strategy.

use std::time::{SystemTime, UNIX_EPOCH};

use tracing::debug;

use triage_core::prelude::{
    hash_serde, introspect, Cardinality, CompileReport, Error, Hash256, PipelineConfig,
    PipelineId, Result, StageSet, Value,
};
use triage_planner::{select_strategy, unify, validate, PipelineShape, Strategy, UnifiedSignature};
use triage_stages::ordering::{self, OrderingEval};
use triage_stages::{
    OrderingStage, PredicateStage, ResolvedExtras, StageDescriptor, TransformStage,
};

use crate::call::{resolve, Call, Input, Output};

/// A pipeline specialized at definition time for one stage set + options.
#[derive(Debug)]
pub struct CompiledPipeline {
    id: PipelineId,
    strategy: Strategy,
    unified: UnifiedSignature,
    reverse: bool,
    fixed: Option<usize>,
    predicate: Option<PredicateStage>,
    ordering: Option<OrderingStage>,
    transform: Option<TransformStage>,
    plan_hash: Hash256,
    report: CompileReport,
}

/// Compile `stages` + `config` into one specialized pipeline.
pub fn compile(stages: StageSet, config: PipelineConfig) -> Result<CompiledPipeline> {
    let stages = resolve_signatures(stages);
    validate(&stages, &config)?;
    let unified = unify(&stages, &config)?;
    let strategy = select_strategy(PipelineShape::of(&stages, &config));
    let plan_hash = hash_serde(&(stages.specs(), &config, strategy))?;
    let id = PipelineId::fresh();

    let report = CompileReport::new(
        id,
        plan_hash,
        strategy.name(),
        config.receiver_binding,
        now_ms(),
    )
    .with_signature_summary(
        unified.extra_positional,
        unified.keyword_names(),
        unified.var_positional,
        unified.var_keyword,
    );

    debug!(pipeline = %id, strategy = %strategy, plan = %plan_hash, "compiled pipeline");

    let fixed = match config.cardinality {
        Cardinality::Fixed(k) => Some(k),
        _ => None,
    };
    let ordering = match (stages.order_key, stages.order_cmp) {
        (Some(cb), _) => Some(OrderingStage::Key(cb)),
        (None, Some(cb)) => Some(OrderingStage::Comparator(cb)),
        (None, None) => None,
    };

    Ok(CompiledPipeline {
        id,
        strategy,
        unified,
        reverse: config.reverse,
        fixed,
        predicate: stages.predicate.map(PredicateStage::new),
        ordering,
        transform: stages.transform.map(TransformStage::new),
        plan_hash,
        report,
    })
}

/// Replace each declared signature with its resolved form (unknown return
/// markers decided, with a warning).
fn resolve_signatures(mut stages: StageSet) -> StageSet {
    for slot in [
        &mut stages.predicate,
        &mut stages.order_key,
        &mut stages.order_cmp,
        &mut stages.transform,
    ] {
        if let Some(cb) = slot.as_mut() {
            let resolved = introspect(cb);
            cb.signature = resolved;
        }
    }
    stages
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

impl CompiledPipeline {
    pub fn id(&self) -> PipelineId {
        self.id
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn unified(&self) -> &UnifiedSignature {
        &self.unified
    }

    pub fn plan_hash(&self) -> Hash256 {
        self.plan_hash
    }

    pub fn report(&self) -> &CompileReport {
        &self.report
    }

    /// Run one invocation: resolve the extras against the unified signature,
    /// then dispatch on the compiled strategy.
    pub fn invoke(&self, input: Input, call: &Call) -> Result<Output> {
        let (count, extras) = resolve(&self.unified, call)?;
        match input {
            Input::Single(value) => {
                if self.unified.collection {
                    return Err(Error::Invocation(
                        "collection pipeline invoked with a single value".to_string(),
                    ));
                }
                Ok(Output::Single(self.eval_single(value, &extras)?))
            }
            Input::Collection(items) => {
                let limit = self.fixed.or(count);
                Ok(Output::Sequence(self.eval_collection(
                    items, limit, &extras,
                )?))
            }
        }
    }

    /// Collection invocation with no extra arguments.
    pub fn run(&self, items: Vec<Value>) -> Result<Vec<Value>> {
        match self.invoke(Input::Collection(items), &Call::new())? {
            Output::Sequence(out) => Ok(out),
            Output::Single(_) => Err(Error::Invocation(
                "collection invocation produced a single value".to_string(),
            )),
        }
    }

    /// Single-value invocation with no extra arguments.
    pub fn run_single(&self, value: Value) -> Result<Value> {
        match self.invoke(Input::Single(value), &Call::new())? {
            Output::Single(out) => Ok(out),
            Output::Sequence(_) => Err(Error::Invocation(
                "single-value invocation produced a sequence".to_string(),
            )),
        }
    }

    fn eval_single(&self, value: Value, extras: &ResolvedExtras) -> Result<Value> {
        match &self.transform {
            Some(t) => t.apply_single(&t.bind(extras), value),
            None => Ok(value),
        }
    }

    fn eval_collection(
        &self,
        items: Vec<Value>,
        limit: Option<usize>,
        extras: &ResolvedExtras,
    ) -> Result<Vec<Value>> {
        let survivors = match self.strategy {
            Strategy::SingleValue => {
                return Err(Error::Invocation(
                    "single-value pipeline invoked with a collection".to_string(),
                ))
            }
            Strategy::Identity => items,
            Strategy::Truncate => {
                let mut items = items;
                if let Some(k) = limit {
                    items.truncate(k);
                }
                items
            }
            Strategy::FilterOnly => self.filter(items, None, extras)?,
            Strategy::FilterTruncate => self.filter(items, limit, extras)?,
            Strategy::Sort => {
                let items = self.filter(items, None, extras)?;
                self.order(items, None, extras)?
            }
            Strategy::TopK => {
                let items = self.filter(items, None, extras)?;
                self.order(items, limit, extras)?
            }
        };
        match &self.transform {
            Some(t) => t.apply(&t.bind(extras), survivors),
            None => Ok(survivors),
        }
    }

    fn filter(
        &self,
        items: Vec<Value>,
        limit: Option<usize>,
        extras: &ResolvedExtras,
    ) -> Result<Vec<Value>> {
        match &self.predicate {
            Some(stage) => stage.apply(&stage.bind(extras), items, limit),
            None => Ok(items),
        }
    }

    fn order(
        &self,
        items: Vec<Value>,
        k: Option<usize>,
        extras: &ResolvedExtras,
    ) -> Result<Vec<Value>> {
        match &self.ordering {
            Some(stage) => {
                let bound = stage.bind(extras);
                ordering::order(items, stage.eval(&bound), self.reverse, k)
            }
            None => ordering::order(items, OrderingEval::Natural, self.reverse, k),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use triage_core::prelude::{CallableSignature, StageCallback};

    fn ints(values: &[i64]) -> Vec<Value> {
        values.iter().map(|&i| Value::Int(i)).collect()
    }

    fn even_predicate() -> StageCallback {
        StageCallback::new("even", CallableSignature::plain(["chosen"]), |args| {
            match args[0] {
                Value::Int(i) => Ok(Value::Bool(i % 2 == 0)),
                _ => Ok(Value::Bool(false)),
            }
        })
    }

    fn ident_transform() -> StageCallback {
        StageCallback::new("ident", CallableSignature::plain(["chosen"]), |args| {
            Ok(args[0].clone())
        })
    }

    #[test]
    fn test_strategy_reflects_shape() {
        let stages = StageSet {
            transform: Some(ident_transform()),
            ..StageSet::default()
        };
        let pipe = compile(stages, PipelineConfig::default()).unwrap();
        assert_eq!(pipe.strategy(), Strategy::Identity);

        let stages = StageSet {
            predicate: Some(even_predicate()),
            ..StageSet::default()
        };
        let config = PipelineConfig {
            cardinality: Cardinality::Fixed(2),
            ..PipelineConfig::default()
        };
        let pipe = compile(stages, config).unwrap();
        assert_eq!(pipe.strategy(), Strategy::FilterTruncate);
    }

    #[test]
    fn test_filter_truncate_short_circuits_by_original_order() {
        let stages = StageSet {
            predicate: Some(even_predicate()),
            ..StageSet::default()
        };
        let config = PipelineConfig {
            cardinality: Cardinality::Fixed(2),
            ..PipelineConfig::default()
        };
        let pipe = compile(stages, config).unwrap();
        let out = pipe.run(ints(&[1, 4, 3, 8, 6, 2])).unwrap();
        assert_eq!(out, ints(&[4, 8]));
    }

    #[test]
    fn test_dynamic_count_flows_into_selection() {
        let config = PipelineConfig {
            cardinality: Cardinality::Dynamic,
            natural_order: true,
            ..PipelineConfig::default()
        };
        let pipe = compile(StageSet::default(), config).unwrap();
        assert_eq!(pipe.strategy(), Strategy::TopK);

        let out = pipe
            .invoke(
                Input::Collection(ints(&[5, 1, 4, 2, 3])),
                &Call::new().count(2),
            )
            .unwrap();
        assert_eq!(out, Output::Sequence(ints(&[1, 2])));

        let err = pipe.run(ints(&[1, 2])).unwrap_err();
        assert!(matches!(err, Error::Invocation(_)));
    }

    #[test]
    fn test_single_value_mode_rejects_collections() {
        let stages = StageSet {
            transform: Some(StageCallback::new(
                "double",
                CallableSignature::plain(["chosen"]),
                |args| match args[0] {
                    Value::Int(i) => Ok(Value::Int(i * 2)),
                    _ => Ok(args[0].clone()),
                },
            )),
            ..StageSet::default()
        };
        let config = PipelineConfig {
            single_value: true,
            ..PipelineConfig::default()
        };
        let pipe = compile(stages, config).unwrap();
        assert_eq!(pipe.run_single(Value::Int(21)).unwrap(), Value::Int(42));
        assert!(pipe.run(ints(&[1])).is_err());
    }

    #[test]
    fn test_identical_plans_hash_identically() {
        let mk = || {
            compile(
                StageSet {
                    predicate: Some(even_predicate()),
                    ..StageSet::default()
                },
                PipelineConfig::default(),
            )
            .unwrap()
        };
        let a = mk();
        let b = mk();
        assert_eq!(a.plan_hash(), b.plan_hash());
        assert_ne!(a.id(), b.id());
    }
}
