use marmoset::repl;

fn main() -> rustyline::Result<()> {
    println!("Hello! This is the Marmoset programming language!");
    println!("Feel free to type in commands");
    repl::start()
}
