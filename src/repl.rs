use crate::environment::Environment;
use crate::evaluator::eval;
use crate::lexer::Lexer;
use crate::parser::Parser;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

static PROMPT: &str = ">>> ";

pub fn start() -> rustyline::Result<()> {
    let mut rl = DefaultEditor::new()?;
    // one environment for the whole session, so bindings carry over
    // from line to line
    let env = Environment::new();

    loop {
        let line = match rl.readline(PROMPT) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => return Ok(()),
            Err(err) => return Err(err),
        };
        if line.trim().is_empty() {
            continue;
        }
        rl.add_history_entry(line.as_str())?;

        match Parser::new(Lexer::new(line)).parse_program() {
            Err(errors) => {
                for err in errors.iter() {
                    println!("\t{}", err);
                }
            }
            Ok(program) => match eval(program.into(), &env) {
                Ok(obj) => println!("{}", obj),
                Err(err) => println!("ERROR: {}", err),
            },
        }
    }
}
