//! Closure lowering. Shared by
//! function-declaration lowering (`statements::function`) and lambda-
//! expression lowering (`expressions::lambda`) — both bottom out here, the
//! way `why_lib::codegen::expressions::lambda` centralizes environment
//! construction for both named and anonymous callables.

use indexmap::IndexMap;
use inkwell::types::BasicTypeEnum;
use inkwell::values::{BasicValueEnum, StructValue};
use inkwell::AddressSpace;

use crate::analyze::{Annotations, SymbolId};
use crate::ast::{Block, Expression, LambdaBody, Param};
use crate::types::closure_struct_type;

use super::context::CodegenContext;
use super::{expressions, statements};

pub enum Body<'a> {
    Block(&'a Block),
    Expression(&'a Expression),
}

impl<'a> From<&'a LambdaBody> for Body<'a> {
    fn from(body: &'a LambdaBody) -> Self {
        match body {
            LambdaBody::Block(block) => Body::Block(block),
            LambdaBody::Expression(expr) => Body::Expression(expr),
        }
    }
}

/// Builds a closure value for a function/lambda with the given captured
/// names (in stable insertion order), parameters (with their chosen IR
/// parameter types — ordinarily `i32`, but pointer-typed for a select
/// predicate's row parameter, see `expressions::select`), and body.
///
/// Resolves each capture to its current stack slot, allocates and populates
/// a heap environment struct holding their values (skipped entirely when
/// there is nothing to capture), declares an implementation function taking
/// the environment pointer plus the given parameter types, lowers the body
/// inside that function with captures and parameters rebound, and finally
/// wraps the function pointer and environment pointer into the uniform
/// closure struct value.
pub fn build_closure<'ctx>(
    ctx: &CodegenContext<'ctx>,
    annotations: &Annotations,
    captures: &IndexMap<String, SymbolId>,
    params: &[Param],
    param_ir_types: &[BasicTypeEnum<'ctx>],
    body: Body<'_>,
    name_hint: &str,
) -> StructValue<'ctx> {
    let byte_ptr = ctx.context.ptr_type(AddressSpace::default());

    // Resolve each captured name to its current (slot, ir_type).
    let resolved_captures: Vec<(String, BasicTypeEnum<'ctx>)> = captures
        .keys()
        .map(|name| {
            let (_, ty) = ctx
                .find(name)
                .unwrap_or_else(|| panic!("internal compiler error: unresolved capture '{name}'"));
            (name.clone(), ty)
        })
        .collect();

    // Anonymous struct type of captured IR types, in order.
    let env_field_types: Vec<BasicTypeEnum<'ctx>> =
        resolved_captures.iter().map(|(_, ty)| *ty).collect();
    let env_struct_type = ctx.context.struct_type(&env_field_types, false);

    // Malloc + populate, only if there is anything to capture.
    let env_ptr = if resolved_captures.is_empty() {
        byte_ptr.const_null()
    } else {
        let malloc_fn = ctx
            .module
            .get_function("malloc")
            .expect("runtime not declared: malloc");
        let size = env_struct_type.size_of().expect("sized struct");
        let call = ctx
            .builder
            .build_call(malloc_fn, &[size.into()], "env_malloc")
            .expect("malloc call");
        let env_ptr = call
            .try_as_basic_value()
            .left()
            .expect("malloc returns a value")
            .into_pointer_value();

        for (i, (name, field_ty)) in resolved_captures.iter().enumerate() {
            let (slot, _) = ctx.find(name).expect("resolved above");
            let current_value = ctx
                .builder
                .build_load(*field_ty, slot, &format!("capture_{name}"))
                .expect("load captured value");
            let field_ptr = ctx
                .builder
                .build_struct_gep(env_struct_type, env_ptr, i as u32, &format!("env_field_{name}"))
                .expect("struct gep");
            ctx.builder
                .build_store(field_ptr, current_value)
                .expect("store captured value");
        }

        env_ptr
    };

    // Save the current block, declare the implementation function.
    let saved_block = ctx.builder.get_insert_block();

    let mut llvm_param_types: Vec<inkwell::types::BasicMetadataTypeEnum> = vec![byte_ptr.into()];
    llvm_param_types.extend(param_ir_types.iter().map(|ty| (*ty).into()));
    let fn_type = ctx.context.i32_type().fn_type(&llvm_param_types, false);

    let fn_name = format!("{name_hint}_{}", ctx.next_lambda_name());
    let function = ctx.declare_function(&fn_name, fn_type);
    let entry = ctx.context.append_basic_block(function, "entry");
    ctx.builder.position_at_end(entry);
    ctx.enter_function(entry);

    // Fresh scope for the implementation body.
    ctx.enter_scope();

    // Rebind captures from the environment (always bound, even when
    // empty, so later lookups for this impl fn behave uniformly).
    let env_param = function
        .get_nth_param(0)
        .expect("env parameter always present")
        .into_pointer_value();
    for (i, (name, field_ty)) in resolved_captures.iter().enumerate() {
        let field_ptr = ctx
            .builder
            .build_struct_gep(env_struct_type, env_param, i as u32, &format!("env_field_{name}"))
            .expect("struct gep");
        let value = ctx
            .builder
            .build_load(*field_ty, field_ptr, &format!("reload_{name}"))
            .expect("load captured field");
        let slot = ctx.alloca_in_entry(*field_ty, name);
        ctx.builder.build_store(slot, value).expect("store rebind");
        ctx.bind(name.clone(), slot, *field_ty);
    }

    // Bind parameters.
    for (i, param) in params.iter().enumerate() {
        let ir_type = param_ir_types[i];
        let arg = function
            .get_nth_param((i + 1) as u32)
            .unwrap_or_else(|| panic!("internal compiler error: missing parameter {}", param.name));
        let slot = ctx.alloca_in_entry(ir_type, &param.name);
        ctx.builder.build_store(slot, arg).expect("store parameter");
        ctx.bind(param.name.clone(), slot, ir_type);
    }

    // Lower the body.
    match body {
        Body::Block(block) => {
            for statement in &block.statements {
                statements::lower_statement(ctx, annotations, statement);
            }
            if !ctx.block_is_terminated() {
                let zero = ctx.context.i32_type().const_int(0, false);
                ctx.builder.build_return(Some(&zero)).expect("implicit return 0");
            }
        }
        Body::Expression(expr) => {
            let value = expressions::lower_expression(ctx, annotations, expr);
            let result = expressions::widen_to_i32(ctx, value);
            ctx.builder
                .build_return(Some(&result))
                .expect("expression body return");
        }
    }

    // Exit scope, restore the saved builder position.
    ctx.exit_scope();
    ctx.exit_function();
    if let Some(block) = saved_block {
        ctx.builder.position_at_end(block);
    }

    // Wrap {fn*, env*} into the closure struct value.
    let closure_ty = closure_struct_type(ctx.context);
    let fn_ptr = function.as_global_value().as_pointer_value();
    let undef = closure_ty.get_undef();
    let with_fn = ctx
        .builder
        .build_insert_value(undef, fn_ptr, 0, "closure_fn")
        .expect("insert fn pointer");
    let with_env = ctx
        .builder
        .build_insert_value(with_fn, env_ptr, 1, "closure_env")
        .expect("insert env pointer");
    with_env.into_struct_value()
}

/// Extracts the two fields of a closure value, as used at call sites.
pub fn extract_closure_fields<'ctx>(
    ctx: &CodegenContext<'ctx>,
    closure: StructValue<'ctx>,
) -> (BasicValueEnum<'ctx>, BasicValueEnum<'ctx>) {
    let fn_ptr = ctx
        .builder
        .build_extract_value(closure, 0, "closure_fn")
        .expect("extract fn pointer");
    let env_ptr = ctx
        .builder
        .build_extract_value(closure, 1, "closure_env")
        .expect("extract env pointer");
    (fn_ptr, env_ptr)
}
