//! Assembles the sub-extractor results into a [`DesignModel`].

use crate::assign::find_assignments;
use crate::block::{find_blocks, RawBlock};
use crate::decl::{find_params, find_ports, find_signals, RawParam};
use crate::eval::{array_depth, eval_const, range_width, ParamEnv};
use crate::expr::{complexity, identifiers, push_unique};
use crate::instance::find_instances;
use crate::modules::{owner, subroutine_ranges, ModuleSpan};
use crate::scan::merge_ranges;
use hdlscope_model::{
    Assignment, BlockKind, DesignModel, Instance, Module, Parameter, Port, ProceduralAssignment,
    ProceduralBlock, Signal, SignalKind,
};
use hdlscope_source::SourceText;
use log::{debug, trace};
use std::ops::Range;

const INTEGER_WIDTH: u32 = 32;

fn fold_params(
    source: &SourceText,
    raws: Vec<RawParam>,
    env: &mut ParamEnv,
) -> Vec<Parameter> {
    raws.into_iter()
        .map(|raw| {
            let evaluated = eval_const(&raw.value, env);
            if let Some(value) = evaluated {
                env.insert(raw.name.clone(), value);
            }
            Parameter {
                name: raw.name,
                kind: raw.kind,
                value: raw.value,
                evaluated,
                line: source.line_of(raw.offset),
            }
        })
        .collect()
}

fn width_of(range: Option<&str>, is_integer: bool, env: &ParamEnv) -> u32 {
    match range {
        Some(r) => range_width(r, env).unwrap_or(1),
        None if is_integer => INTEGER_WIDTH,
        None => 1,
    }
}

fn to_block(source: &SourceText, raw: RawBlock) -> ProceduralBlock {
    let masked = source.masked();
    let mut reads = Vec::new();
    let mut writes = Vec::new();
    let assignments: Vec<ProceduralAssignment> = raw
        .assignments
        .into_iter()
        .map(|a| ProceduralAssignment {
            complexity: complexity(&a.rhs),
            lhs: a.lhs,
            rhs: a.rhs,
            blocking: a.blocking,
            line: source.line_of(a.offset),
        })
        .collect();
    for a in &assignments {
        match a.target() {
            Some(target) => push_unique(&mut writes, target),
            None => identifiers(&a.lhs)
                .iter()
                .for_each(|name| push_unique(&mut writes, name)),
        }
        for name in identifiers(&a.rhs) {
            push_unique(&mut reads, &name);
        }
    }
    let end_offset = raw.body.end.saturating_sub(1).max(raw.body.start);
    ProceduralBlock {
        kind: BlockKind::classify(&raw.keyword, &raw.sensitivity),
        keyword: raw.keyword,
        sensitivity: raw.sensitivity,
        body: masked[raw.body.clone()].to_string(),
        line: source.line_of(raw.offset),
        end_line: source.line_of(end_offset),
        reads,
        writes,
        assignments,
    }
}

/// Builds the design model from prepared source and its module ranges.
pub(crate) fn build_model(source: &SourceText, spans: &[ModuleSpan]) -> DesignModel {
    let masked = source.masked();
    let subroutines = subroutine_ranges(masked);
    let mut model = DesignModel::new();
    let mut modules: Vec<Module> = spans
        .iter()
        .map(|s| {
            let mut module = Module::new(s.name.clone(), source.line_of(s.start));
            module.end_line = s.endmodule.map(|at| source.line_of(at));
            module
        })
        .collect();

    // Parameters first: widths fold against them.
    let mut top_raw = Vec::new();
    let mut module_raw: Vec<Vec<RawParam>> = vec![Vec::new(); spans.len()];
    for raw in find_params(masked) {
        match owner(spans, raw.offset) {
            Some(i) => module_raw[i].push(raw),
            None => top_raw.push(raw),
        }
    }
    let mut top_env = ParamEnv::new();
    model.parameters = fold_params(source, top_raw, &mut top_env);
    let mut envs = Vec::with_capacity(spans.len());
    for (module, raws) in modules.iter_mut().zip(module_raw) {
        let mut env = top_env.clone();
        module.parameters = fold_params(source, raws, &mut env);
        envs.push(env);
    }

    let raw_blocks = find_blocks(masked, spans);
    let mut excluded: Vec<Range<usize>> = subroutines.clone();
    excluded.extend(raw_blocks.iter().map(|b| b.offset..b.body.end));
    let excluded = merge_ranges(excluded);

    for raw in find_ports(masked, &subroutines) {
        let Some(i) = owner(spans, raw.offset) else {
            continue;
        };
        let module = &mut modules[i];
        if module.port(&raw.name).is_some() {
            continue;
        }
        module.ports.push(Port {
            width: width_of(raw.range.as_deref(), raw.is_integer, &envs[i]),
            name: raw.name,
            direction: raw.direction,
            range: raw.range,
            is_reg: raw.is_reg,
            signed: raw.signed,
            line: source.line_of(raw.offset),
        });
    }

    for raw in find_signals(masked, &subroutines) {
        let Some(i) = owner(spans, raw.offset) else {
            continue;
        };
        let module = &mut modules[i];
        if let Some(port) = module.ports.iter_mut().find(|p| p.name == raw.name) {
            // non-ANSI `output q; reg q;`
            if raw.kind == SignalKind::Reg {
                port.is_reg = true;
            }
            continue;
        }
        if module.signal(&raw.name).is_some() {
            continue;
        }
        let depth = (!raw.dims.is_empty()).then(|| {
            raw.dims
                .iter()
                .map(|d| array_depth(d, &envs[i]).unwrap_or(1))
                .fold(1u32, u32::saturating_mul)
        });
        modules[i].signals.push(Signal {
            width: width_of(raw.range.as_deref(), raw.is_integer, &envs[i]),
            name: raw.name,
            kind: raw.kind,
            range: raw.range,
            array_depth: depth,
            line: source.line_of(raw.offset),
        });
    }

    for raw in find_instances(masked, &excluded) {
        let Some(i) = owner(spans, raw.offset) else {
            continue;
        };
        modules[i].instances.push(Instance {
            module_name: raw.module_name,
            name: raw.name,
            parameters: raw.parameters,
            connections: raw.connections,
            line: source.line_of(raw.offset),
        });
    }

    for raw in find_assignments(masked, &excluded) {
        let Some(i) = owner(spans, raw.offset) else {
            continue;
        };
        modules[i].assignments.push(Assignment {
            lhs: raw.lhs,
            rhs: raw.rhs,
            complexity: raw.complexity,
            line: source.line_of(raw.offset),
        });
    }

    for raw in raw_blocks {
        let Some(i) = owner(spans, raw.offset) else {
            continue;
        };
        let block = to_block(source, raw);
        trace!(
            "block at line {} in '{}': {} ({} assignments)",
            block.line,
            modules[i].name,
            block.kind,
            block.assignments.len()
        );
        modules[i].blocks.push(block);
    }

    for module in &modules {
        debug!(
            "module '{}': {} ports, {} signals, {} instances, {} blocks, {} assigns, {} params",
            module.name,
            module.ports.len(),
            module.signals.len(),
            module.instances.len(),
            module.blocks.len(),
            module.assignments.len(),
            module.parameters.len()
        );
    }
    model.modules = modules;
    model
}
