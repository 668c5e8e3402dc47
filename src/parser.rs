use crate::ast::{self, Expression, Statement};
use crate::lexer::Lexer;
use crate::token::{Token, TokenType};
use std::collections::HashMap;
use std::rc::Rc;

type PrefixParseFn = fn(&mut Parser) -> Option<Expression>;
type InfixParseFn = fn(&mut Parser, Expression) -> Option<Expression>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Lowest,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
    Call,
}

impl Precedence {
    fn of(token_type: TokenType) -> Self {
        match token_type {
            TokenType::Eq | TokenType::NotEq => Self::Equals,
            TokenType::LT | TokenType::GT => Self::LessGreater,
            TokenType::Plus | TokenType::Minus => Self::Sum,
            TokenType::Slash | TokenType::Asterisk => Self::Product,
            TokenType::LParen => Self::Call,
            _ => Self::Lowest,
        }
    }
}

pub struct Parser {
    lexer: Lexer,
    errors: Vec<String>,

    cur_token: Token,
    peek_token: Token,

    prefix_parse_fns: HashMap<TokenType, PrefixParseFn>,
    infix_parse_fns: HashMap<TokenType, InfixParseFn>,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Self {
        let cur_token = lexer.next_token();
        let peek_token = lexer.next_token();

        let mut parser = Self {
            lexer,
            cur_token,
            peek_token,
            errors: Default::default(),
            prefix_parse_fns: Default::default(),
            infix_parse_fns: Default::default(),
        };

        parser.register_prefix(TokenType::Ident, Self::parse_identifier);
        parser.register_prefix(TokenType::Int, Self::parse_integer_literal);
        parser.register_prefix(TokenType::True, Self::parse_boolean);
        parser.register_prefix(TokenType::False, Self::parse_boolean);
        parser.register_prefix(TokenType::Bang, Self::parse_prefix_expression);
        parser.register_prefix(TokenType::Minus, Self::parse_prefix_expression);
        parser.register_prefix(TokenType::LParen, Self::parse_grouped_expression);
        parser.register_prefix(TokenType::If, Self::parse_if_expression);
        parser.register_prefix(TokenType::Function, Self::parse_function_literal);

        parser.register_infix(TokenType::Plus, Self::parse_infix_expression);
        parser.register_infix(TokenType::Minus, Self::parse_infix_expression);
        parser.register_infix(TokenType::Slash, Self::parse_infix_expression);
        parser.register_infix(TokenType::Asterisk, Self::parse_infix_expression);
        parser.register_infix(TokenType::Eq, Self::parse_infix_expression);
        parser.register_infix(TokenType::NotEq, Self::parse_infix_expression);
        parser.register_infix(TokenType::LT, Self::parse_infix_expression);
        parser.register_infix(TokenType::GT, Self::parse_infix_expression);
        parser.register_infix(TokenType::LParen, Self::parse_call_expression);

        parser
    }

    fn register_prefix(&mut self, token_type: TokenType, func: PrefixParseFn) {
        self.prefix_parse_fns.insert(token_type, func);
    }

    fn register_infix(&mut self, token_type: TokenType, func: InfixParseFn) {
        self.infix_parse_fns.insert(token_type, func);
    }

    fn next_token(&mut self) {
        self.cur_token = self.peek_token.clone();
        self.peek_token = self.lexer.next_token();
    }

    pub fn parse_program(mut self) -> Result<ast::Program, Vec<String>> {
        let mut program = ast::Program::default();

        while !self.cur_token.is(TokenType::Eof) {
            if let Some(stmt) = self.parse_statement() {
                program.statements.push(stmt)
            }
            self.next_token();
        }

        if self.errors.is_empty() {
            Ok(program)
        } else {
            Err(self.errors)
        }
    }

    fn parse_statement(&mut self) -> Option<Statement> {
        match self.cur_token {
            Token::Let => self.parse_let_statement().map(Statement::Let),
            Token::Return => self.parse_return_statement().map(Statement::Return),
            _ => self.parse_expression_statement().map(Statement::Expr),
        }
    }

    fn parse_let_statement(&mut self) -> Option<ast::LetStatement> {
        let token = self.cur_token.clone();

        if !self.expect_peek(TokenType::Ident) {
            return None;
        }

        let name: Rc<ast::Identifier> = Rc::new(self.cur_token.clone().into());

        if !self.expect_peek(TokenType::Assign) {
            return None;
        }

        self.next_token();
        let value = self.parse_expression(Precedence::Lowest)?;

        if self.peek_token.is(TokenType::Semicolon) {
            self.next_token();
        }

        Some(ast::LetStatement { token, name, value })
    }

    fn parse_return_statement(&mut self) -> Option<ast::ReturnStatement> {
        let token = self.cur_token.clone();

        self.next_token();
        let return_value = self.parse_expression(Precedence::Lowest)?;

        if self.peek_token.is(TokenType::Semicolon) {
            self.next_token();
        }

        Some(ast::ReturnStatement {
            token,
            return_value,
        })
    }

    fn parse_expression_statement(&mut self) -> Option<ast::ExpressionStatement> {
        let token = self.cur_token.clone();

        let expression = self.parse_expression(Precedence::Lowest);

        if self.peek_token.is(TokenType::Semicolon) {
            self.next_token();
        }

        Some(ast::ExpressionStatement {
            token,
            expression: expression?,
        })
    }

    fn parse_expression(&mut self, precedence: Precedence) -> Option<Expression> {
        let prefix = match self
            .prefix_parse_fns
            .get(&TokenType::from(&self.cur_token))
            .copied()
        {
            Some(func) => func,
            None => {
                self.no_prefix_parse_fn_error();
                return None;
            }
        };

        let mut left = prefix(self)?;

        while !self.peek_token.is(TokenType::Semicolon) && precedence < self.peek_precedence() {
            let infix = match self
                .infix_parse_fns
                .get(&TokenType::from(&self.peek_token))
                .copied()
            {
                Some(func) => func,
                None => return Some(left),
            };

            self.next_token();
            left = infix(self, left)?;
        }

        Some(left)
    }

    fn parse_identifier(&mut self) -> Option<Expression> {
        Some(Expression::Identifier(self.cur_token.clone().into()))
    }

    fn parse_integer_literal(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();

        match token.literal().parse() {
            Ok(value) => Some(Expression::IntegerLiteral(ast::IntegerLiteral {
                token,
                value,
            })),
            Err(_) => {
                self.errors.push(format!(
                    "could not parse {:?} as integer",
                    token.literal()
                ));
                None
            }
        }
    }

    fn parse_boolean(&mut self) -> Option<Expression> {
        Some(Expression::Boolean(self.cur_token.clone().into()))
    }

    fn parse_prefix_expression(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();
        let operator = ast::Operator::from(&token);

        self.next_token();
        let right = self.parse_expression(Precedence::Prefix)?;

        Some(Expression::Prefix(ast::PrefixExpression {
            token,
            operator,
            right: Box::new(right),
        }))
    }

    fn parse_infix_expression(&mut self, left: Expression) -> Option<Expression> {
        let token = self.cur_token.clone();
        let operator = ast::Operator::from(&token);
        let precedence = self.cur_precedence();

        self.next_token();
        let right = self.parse_expression(precedence)?;

        Some(Expression::Infix(ast::InfixExpression {
            token,
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }))
    }

    fn parse_grouped_expression(&mut self) -> Option<Expression> {
        self.next_token();

        let expression = self.parse_expression(Precedence::Lowest);

        if !self.expect_peek(TokenType::RParen) {
            return None;
        }

        expression
    }

    fn parse_if_expression(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();

        if !self.expect_peek(TokenType::LParen) {
            return None;
        }

        self.next_token();
        let condition = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(TokenType::RParen) {
            return None;
        }
        if !self.expect_peek(TokenType::LBrace) {
            return None;
        }

        let consequence = self.parse_block_statement();

        let alternative = if self.peek_token.is(TokenType::Else) {
            self.next_token();

            if !self.expect_peek(TokenType::LBrace) {
                return None;
            }

            Some(self.parse_block_statement())
        } else {
            None
        };

        Some(Expression::If(ast::IfExpression {
            token,
            condition: Box::new(condition),
            consequence,
            alternative,
        }))
    }

    fn parse_function_literal(&mut self) -> Option<Expression> {
        let token = self.cur_token.clone();

        if !self.expect_peek(TokenType::LParen) {
            return None;
        }

        let parameters = self.parse_function_parameters()?;

        if !self.expect_peek(TokenType::LBrace) {
            return None;
        }

        let body = self.parse_block_statement();

        Some(Expression::Function(ast::FunctionLiteral {
            token,
            parameters,
            body,
        }))
    }

    fn parse_function_parameters(&mut self) -> Option<Vec<ast::Identifier>> {
        let mut parameters = vec![];

        if self.peek_token.is(TokenType::RParen) {
            self.next_token();
            return Some(parameters);
        }

        if !self.expect_peek(TokenType::Ident) {
            return None;
        }
        parameters.push(self.cur_token.clone().into());

        while self.peek_token.is(TokenType::Comma) {
            self.next_token();
            if !self.expect_peek(TokenType::Ident) {
                return None;
            }
            parameters.push(self.cur_token.clone().into());
        }

        if !self.expect_peek(TokenType::RParen) {
            return None;
        }

        Some(parameters)
    }

    fn parse_block_statement(&mut self) -> ast::BlockStatement {
        let token = self.cur_token.clone();
        let mut statements = vec![];

        self.next_token();

        while !self.cur_token.is(TokenType::RBrace) && !self.cur_token.is(TokenType::Eof) {
            if let Some(stmt) = self.parse_statement() {
                statements.push(stmt);
            }
            self.next_token();
        }

        ast::BlockStatement { token, statements }
    }

    fn parse_call_expression(&mut self, function: Expression) -> Option<Expression> {
        let token = self.cur_token.clone();
        let arguments = self.parse_call_arguments()?;

        Some(Expression::Call(ast::CallExpression {
            token,
            function: Box::new(function),
            arguments,
        }))
    }

    fn parse_call_arguments(&mut self) -> Option<Vec<Expression>> {
        let mut arguments = vec![];

        if self.peek_token.is(TokenType::RParen) {
            self.next_token();
            return Some(arguments);
        }

        self.next_token();
        arguments.push(self.parse_expression(Precedence::Lowest)?);

        while self.peek_token.is(TokenType::Comma) {
            self.next_token();
            self.next_token();
            arguments.push(self.parse_expression(Precedence::Lowest)?);
        }

        if !self.expect_peek(TokenType::RParen) {
            return None;
        }

        Some(arguments)
    }

    fn cur_precedence(&self) -> Precedence {
        Precedence::of(TokenType::from(&self.cur_token))
    }

    fn peek_precedence(&self) -> Precedence {
        Precedence::of(TokenType::from(&self.peek_token))
    }

    fn expect_peek(&mut self, expected: TokenType) -> bool {
        if self.peek_token.is(expected) {
            self.next_token();
            true
        } else {
            self.peek_error(expected);
            false
        }
    }

    fn peek_error(&mut self, expected: TokenType) {
        self.errors.push(format!(
            "expected next token to be {}, got {} instead",
            expected,
            TokenType::from(&self.peek_token)
        ));
    }

    fn no_prefix_parse_fn_error(&mut self) {
        self.errors.push(format!(
            "no prefix parse function for {} found",
            TokenType::from(&self.cur_token)
        ));
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn parse(input: &str) -> ast::Program {
        Parser::new(Lexer::new(input.to_owned()))
            .parse_program()
            .expect("Parse errors found")
    }

    #[test]
    fn test_let_statements() {
        let cases = [
            ("let x = 5;", "x", "5"),
            ("let y = true;", "y", "true"),
            ("let foobar = y;", "foobar", "y"),
        ];

        for (input, name, value) in cases.iter() {
            let program = parse(input);
            assert_eq!(program.statements.len(), 1);

            match &program.statements[0] {
                Statement::Let(stmt) => {
                    assert_eq!(stmt.token.literal(), "let");
                    assert_eq!(stmt.name.value, *name);
                    assert_eq!(stmt.value.to_string(), *value);
                }
                stmt => panic!("expected let statement, got {:?}", stmt),
            }
        }
    }

    #[test]
    fn test_return_statements() {
        let cases = [
            ("return 5;", "5"),
            ("return true;", "true"),
            ("return foobar;", "foobar"),
        ];

        for (input, value) in cases.iter() {
            let program = parse(input);
            assert_eq!(program.statements.len(), 1);

            match &program.statements[0] {
                Statement::Return(stmt) => {
                    assert_eq!(stmt.token.literal(), "return");
                    assert_eq!(stmt.return_value.to_string(), *value);
                }
                stmt => panic!("expected return statement, got {:?}", stmt),
            }
        }
    }

    #[test]
    fn test_identifier_expression() {
        let program = parse("foobar;");

        assert_eq!(program.statements.len(), 1);

        match &program.statements[0] {
            Statement::Expr(stmt) => match &stmt.expression {
                Expression::Identifier(ident) => {
                    assert_eq!(ident.value, "foobar");
                    assert_eq!(ident.token.literal(), "foobar");
                }
                expr => panic!("expected identifier, got {:?}", expr),
            },
            stmt => panic!("expected expression statement, got {:?}", stmt),
        }
    }

    #[test]
    fn test_integer_literal_expression() {
        let program = parse("5;");

        match &program.statements[0] {
            Statement::Expr(stmt) => match &stmt.expression {
                Expression::IntegerLiteral(literal) => {
                    assert_eq!(literal.value, 5);
                    assert_eq!(literal.token.literal(), "5");
                }
                expr => panic!("expected integer literal, got {:?}", expr),
            },
            stmt => panic!("expected expression statement, got {:?}", stmt),
        }
    }

    #[test]
    fn test_boolean_expression() {
        let cases = [("true;", true), ("false;", false)];

        for (input, value) in cases.iter() {
            let program = parse(input);

            match &program.statements[0] {
                Statement::Expr(stmt) => match &stmt.expression {
                    Expression::Boolean(boolean) => assert_eq!(boolean.value, *value),
                    expr => panic!("expected boolean, got {:?}", expr),
                },
                stmt => panic!("expected expression statement, got {:?}", stmt),
            }
        }
    }

    #[test]
    fn test_prefix_expressions() {
        let cases = [
            ("!5;", ast::Operator::Bang, "5"),
            ("-15;", ast::Operator::Minus, "15"),
            ("!true;", ast::Operator::Bang, "true"),
            ("!false;", ast::Operator::Bang, "false"),
        ];

        for (input, operator, right) in cases.iter() {
            let program = parse(input);

            match &program.statements[0] {
                Statement::Expr(stmt) => match &stmt.expression {
                    Expression::Prefix(prefix) => {
                        assert_eq!(prefix.operator, *operator);
                        assert_eq!(prefix.right.to_string(), *right);
                    }
                    expr => panic!("expected prefix expression, got {:?}", expr),
                },
                stmt => panic!("expected expression statement, got {:?}", stmt),
            }
        }
    }

    #[test]
    fn test_infix_expressions() {
        let cases = [
            ("5 + 5;", "5", ast::Operator::Plus, "5"),
            ("5 - 5;", "5", ast::Operator::Minus, "5"),
            ("5 * 5;", "5", ast::Operator::Asterisk, "5"),
            ("5 / 5;", "5", ast::Operator::Slash, "5"),
            ("5 > 5;", "5", ast::Operator::GT, "5"),
            ("5 < 5;", "5", ast::Operator::LT, "5"),
            ("5 == 5;", "5", ast::Operator::Eq, "5"),
            ("5 != 5;", "5", ast::Operator::NotEq, "5"),
            ("true == true", "true", ast::Operator::Eq, "true"),
            ("true != false", "true", ast::Operator::NotEq, "false"),
        ];

        for (input, left, operator, right) in cases.iter() {
            let program = parse(input);

            match &program.statements[0] {
                Statement::Expr(stmt) => match &stmt.expression {
                    Expression::Infix(infix) => {
                        assert_eq!(infix.left.to_string(), *left);
                        assert_eq!(infix.operator, *operator);
                        assert_eq!(infix.right.to_string(), *right);
                    }
                    expr => panic!("expected infix expression, got {:?}", expr),
                },
                stmt => panic!("expected expression statement, got {:?}", stmt),
            }
        }
    }

    #[test]
    fn test_operator_precedence_parsing() {
        let cases = [
            ("-a * b", "((-a) * b)"),
            ("!-a", "(!(-a))"),
            ("a + b + c", "((a + b) + c)"),
            ("a + b - c", "((a + b) - c)"),
            ("a * b * c", "((a * b) * c)"),
            ("a * b / c", "((a * b) / c)"),
            ("a + b / c", "(a + (b / c))"),
            ("a + b * c + d / e - f", "(((a + (b * c)) + (d / e)) - f)"),
            ("3 + 4; -5 * 5", "(3 + 4)((-5) * 5)"),
            ("5 > 4 == 3 < 4", "((5 > 4) == (3 < 4))"),
            ("5 < 4 != 3 > 4", "((5 < 4) != (3 > 4))"),
            (
                "3 + 4 * 5 == 3 * 1 + 4 * 5",
                "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)))",
            ),
            ("true", "true"),
            ("false", "false"),
            ("3 > 5 == false", "((3 > 5) == false)"),
            ("3 < 5 == true", "((3 < 5) == true)"),
            ("1 + (2 + 3) + 4", "((1 + (2 + 3)) + 4)"),
            ("(5 + 5) * 2", "((5 + 5) * 2)"),
            ("2 / (5 + 5)", "(2 / (5 + 5))"),
            ("-(5 + 5)", "(-(5 + 5))"),
            ("!(true == true)", "(!(true == true))"),
            ("a + add(b * c) + d", "((a + add((b * c))) + d)"),
            (
                "add(a, b, 1, 2 * 3, 4 + 5, add(6, 7 * 8))",
                "add(a, b, 1, (2 * 3), (4 + 5), add(6, (7 * 8)))",
            ),
            ("add(a + b + c * d / f + g)", "add((((a + b) + ((c * d) / f)) + g))"),
            ("f(x) + 1", "(f(x) + 1)"),
        ];

        for (input, expected) in cases.iter() {
            assert_eq!(parse(input).to_string(), *expected);
        }
    }

    #[test]
    fn test_if_expression() {
        let program = parse("if (x < y) { x }");

        match &program.statements[0] {
            Statement::Expr(stmt) => match &stmt.expression {
                Expression::If(if_expr) => {
                    assert_eq!(if_expr.condition.to_string(), "(x < y)");
                    assert_eq!(if_expr.consequence.statements.len(), 1);
                    assert_eq!(if_expr.consequence.to_string(), "x");
                    assert!(if_expr.alternative.is_none());
                }
                expr => panic!("expected if expression, got {:?}", expr),
            },
            stmt => panic!("expected expression statement, got {:?}", stmt),
        }
    }

    #[test]
    fn test_if_else_expression() {
        let program = parse("if (x < y) { x } else { y }");

        match &program.statements[0] {
            Statement::Expr(stmt) => match &stmt.expression {
                Expression::If(if_expr) => {
                    assert_eq!(if_expr.condition.to_string(), "(x < y)");
                    assert_eq!(if_expr.consequence.to_string(), "x");
                    assert_eq!(
                        if_expr.alternative.as_ref().map(|alt| alt.to_string()),
                        Some("y".to_owned())
                    );
                }
                expr => panic!("expected if expression, got {:?}", expr),
            },
            stmt => panic!("expected expression statement, got {:?}", stmt),
        }
    }

    #[test]
    fn test_function_literal_parsing() {
        let program = parse("fn(x, y) { x + y; }");

        match &program.statements[0] {
            Statement::Expr(stmt) => match &stmt.expression {
                Expression::Function(func) => {
                    let names: Vec<&str> =
                        func.parameters.iter().map(|p| p.value.as_str()).collect();
                    assert_eq!(names, vec!["x", "y"]);
                    assert_eq!(func.body.to_string(), "(x + y)");
                }
                expr => panic!("expected function literal, got {:?}", expr),
            },
            stmt => panic!("expected expression statement, got {:?}", stmt),
        }
    }

    #[test]
    fn test_function_parameter_parsing() {
        let cases: [(&str, &[&str]); 3] = [
            ("fn() {};", &[]),
            ("fn(x) {};", &["x"]),
            ("fn(x, y, z) {};", &["x", "y", "z"]),
        ];

        for (input, expected) in cases.iter() {
            let program = parse(input);

            match &program.statements[0] {
                Statement::Expr(stmt) => match &stmt.expression {
                    Expression::Function(func) => {
                        let names: Vec<&str> =
                            func.parameters.iter().map(|p| p.value.as_str()).collect();
                        assert_eq!(names, *expected);
                    }
                    expr => panic!("expected function literal, got {:?}", expr),
                },
                stmt => panic!("expected expression statement, got {:?}", stmt),
            }
        }
    }

    #[test]
    fn test_call_expression_parsing() {
        let program = parse("add(1, 2 * 3, 4 + 5);");

        match &program.statements[0] {
            Statement::Expr(stmt) => match &stmt.expression {
                Expression::Call(call) => {
                    assert_eq!(call.function.to_string(), "add");

                    let arguments: Vec<String> =
                        call.arguments.iter().map(Expression::to_string).collect();
                    assert_eq!(arguments, vec!["1", "(2 * 3)", "(4 + 5)"]);
                }
                expr => panic!("expected call expression, got {:?}", expr),
            },
            stmt => panic!("expected expression statement, got {:?}", stmt),
        }
    }

    #[test]
    fn test_parse_errors() {
        let cases = [
            (
                "let x 5;",
                "expected next token to be Assign, got Int instead",
            ),
            (
                "let = 10;",
                "expected next token to be Ident, got Assign instead",
            ),
            ("5 +", "no prefix parse function for Eof found"),
            ("@", "no prefix parse function for Illegal found"),
            (
                "9999999999999999999999",
                "could not parse \"9999999999999999999999\" as integer",
            ),
        ];

        for (input, expected) in cases.iter() {
            let errors = Parser::new(Lexer::new((*input).to_owned()))
                .parse_program()
                .expect_err("expected parse errors");

            assert!(
                errors.iter().any(|e| e == expected),
                "errors {:?} missing {:?}",
                errors,
                expected
            );
        }
    }

    #[test]
    fn test_error_recovery_reaches_later_statements() {
        let errors = Parser::new(Lexer::new("let x 5; let = 10; let 838383;".to_owned()))
            .parse_program()
            .expect_err("expected parse errors");

        // three peek errors, plus the stranded `=` drawing a no-prefix error
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn test_canonical_rendering_round_trips() {
        let cases = [
            "let x = 5;",
            "return (x + y);",
            "((-a) * b)",
            "(!(true == true))",
            "if ((x < y)) { x } else { y }",
            "fn(x, y) { (x + y) }",
            "add(1, (2 * 3), add(4, 5))",
            "let counter = fn(x) { if ((x > 100)) { return x; } counter((x + 1)) };",
        ];

        for input in cases.iter() {
            let first = parse(input);
            let second = parse(&first.to_string());
            assert_eq!(first, second);
        }
    }
}
