use crate::ast::{self, Node};
use crate::environment::{Env, Environment};
use crate::object::{EvalError, FunctionObject, Object, Result};
use std::rc::Rc;

pub fn eval(node: Node, env: &Env) -> Result<Object> {
    match node {
        Node::Program(prog) => eval_program(prog, env),
        Node::Statement(s) => match s {
            ast::Statement::Expr(stmt) => eval(stmt.expression.into(), env),
            ast::Statement::Block(stmt) => eval_block_statement(stmt, env),
            ast::Statement::Return(stmt) => Ok(Object::ReturnValue(Box::new(eval(
                stmt.return_value.into(),
                env,
            )?))),
            ast::Statement::Let(stmt) => {
                let val = eval(stmt.value.into(), env)?;
                env.borrow_mut().set(&stmt.name.value, val);

                Ok(Object::Null)
            }
        },
        Node::Expression(e) => match e {
            ast::Expression::IntegerLiteral(l) => Ok(l.value.into()),
            ast::Expression::Boolean(b) => Ok(b.value.into()),
            ast::Expression::Prefix(prefix) => {
                let right = eval((*prefix.right).into(), env)?;
                eval_prefix_expression(prefix.operator, right)
            }
            ast::Expression::Infix(infix) => {
                let left = eval((*infix.left).into(), env)?;
                let right = eval((*infix.right).into(), env)?;
                eval_infix_expression(infix.operator, left, right)
            }
            ast::Expression::If(if_expression) => eval_if_expression(if_expression, env),
            ast::Expression::Identifier(identifier) => env
                .borrow()
                .get(&identifier.value)
                .ok_or_else(|| EvalError::IdentifierNotFound {
                    id: identifier.value.clone(),
                }),
            ast::Expression::Function(fn_literal) => Ok(Object::Function(FunctionObject {
                parameters: fn_literal.parameters,
                body: fn_literal.body,
                env: Rc::clone(env),
            })),
            ast::Expression::Call(call) => {
                let function = eval((*call.function).into(), env)?;
                let args = eval_expressions(call.arguments, env)?;
                apply_function(function, args)
            }
        },
    }
}

fn eval_program(program: ast::Program, env: &Env) -> Result<Object> {
    let mut result = Object::default();

    for stmt in program.statements.into_iter() {
        result = eval(stmt.into(), env)?;

        if let Object::ReturnValue(obj) = result {
            return Ok(*obj);
        }
    }

    Ok(result)
}

// Return envelopes pass through unopened so they keep unwinding
// through enclosing blocks.
fn eval_block_statement(block: ast::BlockStatement, env: &Env) -> Result<Object> {
    let mut result = Object::default();

    for stmt in block.statements.into_iter() {
        result = eval(stmt.into(), env)?;

        if result.is_return_value() {
            return Ok(result);
        }
    }

    Ok(result)
}

fn eval_expressions(exprs: Vec<ast::Expression>, env: &Env) -> Result<Vec<Object>> {
    let mut result = vec![];

    for expr in exprs.into_iter() {
        result.push(eval(expr.into(), env)?)
    }
    Ok(result)
}

fn eval_prefix_expression(operator: ast::Operator, right: Object) -> Result<Object> {
    match operator {
        ast::Operator::Bang => Ok(eval_bang_operator(right)),
        ast::Operator::Minus => eval_prefix_minus_operator(right),
        _ => Err(EvalError::UnknownPrefixOperator {
            operator,
            operand: right.type_name(),
        }),
    }
}

fn eval_infix_expression(operator: ast::Operator, left: Object, right: Object) -> Result<Object> {
    match (left, right) {
        (Object::Integer(x), Object::Integer(y)) => eval_integer_infix_expression(operator, x, y),
        (left, right) => match operator {
            ast::Operator::Eq => Ok((left == right).into()),
            ast::Operator::NotEq => Ok((left != right).into()),
            op => Err(EvalError::binary_op_error(
                left.type_name(),
                op,
                right.type_name(),
            )),
        },
    }
}

fn eval_bang_operator(right: Object) -> Object {
    (!right.truth_value()).into()
}

fn eval_prefix_minus_operator(right: Object) -> Result<Object> {
    match right {
        Object::Integer(n) => Ok(n.wrapping_neg().into()),
        a => Err(EvalError::UnknownPrefixOperator {
            operator: ast::Operator::Minus,
            operand: a.type_name(),
        }),
    }
}

// Arithmetic wraps on overflow, the behavior of a native 64-bit integer.
fn eval_integer_infix_expression(operator: ast::Operator, left: i64, right: i64) -> Result<Object> {
    match operator {
        ast::Operator::Plus => Ok(left.wrapping_add(right).into()),
        ast::Operator::Minus => Ok(left.wrapping_sub(right).into()),
        ast::Operator::Asterisk => Ok(left.wrapping_mul(right).into()),
        ast::Operator::Slash => {
            if right == 0 {
                Err(EvalError::DivisionByZero)
            } else {
                Ok((left / right).into())
            }
        }
        ast::Operator::LT => Ok((left < right).into()),
        ast::Operator::GT => Ok((left > right).into()),
        ast::Operator::Eq => Ok((left == right).into()),
        ast::Operator::NotEq => Ok((left != right).into()),
        op => Err(EvalError::UnknownInfixOperator {
            left: "INTEGER",
            operator: op,
            right: "INTEGER",
        }),
    }
}

fn eval_if_expression(if_expression: ast::IfExpression, env: &Env) -> Result<Object> {
    let condition = eval((*if_expression.condition).into(), env)?;

    if condition.truth_value() {
        eval(ast::Statement::Block(if_expression.consequence).into(), env)
    } else if let Some(alt) = if_expression.alternative {
        eval(ast::Statement::Block(alt).into(), env)
    } else {
        Ok(Object::Null)
    }
}

fn apply_function(func: Object, args: Vec<Object>) -> Result<Object> {
    match func {
        Object::Function(f) => {
            let env = extend_function_env(&f, args);

            eval(ast::Statement::Block(f.body).into(), &env).map(Object::unwrap_return)
        }
        obj => Err(EvalError::NotAFunction {
            type_name: obj.type_name(),
        }),
    }
}

// The call frame encloses the environment captured at the function
// literal, not the caller's.
fn extend_function_env(func: &FunctionObject, args: Vec<Object>) -> Env {
    let env = Environment::with_enclosed(Rc::clone(&func.env));

    for (param, arg) in func.parameters.iter().zip(args.into_iter()) {
        env.borrow_mut().set(&param.value, arg);
    }

    env
}
