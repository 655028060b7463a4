use clap::Parser;
use stkc::{compile_tree, print_program, Ast, Error, Options, SymbolMap};
use tracing_subscriber::EnvFilter;

#[derive(Debug, clap::Parser)]
#[clap(author, version, about)]
struct Args {
    /// Input AST (YAML)
    #[clap(default_value = "main.ast.yaml")]
    input: String,

    /// Output file
    #[clap(short, long, default_value = "main.asm")]
    output: String,

    /// Spaces per nesting level
    #[clap(long, default_value_t = 4)]
    indent: usize,

    /// Omit `; IF` / `; WHILE` annotations
    #[clap(long)]
    no_comments: bool,

    /// Write a YAML symbol map to this file
    #[clap(long)]
    symbols: Option<String>,

    /// Enable verbose output
    #[clap(short, long)]
    verbose: bool,
}

fn init_logger(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt::Subscriber::builder()
        .without_time()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}

fn main() {
    let args = Args::parse();
    init_logger(args.verbose);

    let text = match std::fs::read_to_string(&args.input) {
        Ok(text) => text,
        Err(e) => {
            Error::from(e).print_diag(&Ast::new());
            std::process::exit(1);
        }
    };

    let ast = match Ast::from_yaml(&text) {
        Ok(ast) => ast,
        Err(e) => {
            e.print_diag(&Ast::new());
            std::process::exit(1);
        }
    };

    let program = match compile_tree(&ast) {
        Ok(program) => program,
        Err(e) => {
            e.print_diag(&ast);
            std::process::exit(1);
        }
    };

    if args.verbose {
        print_program(&program, &ast);
    }

    let options = Options {
        indent: args.indent,
        comments: !args.no_comments,
    };
    if let Err(e) = std::fs::write(&args.output, program.render(&options)) {
        Error::from(e).print_diag(&ast);
        std::process::exit(1);
    }

    if let Some(path) = &args.symbols {
        let written = SymbolMap::generate(&program)
            .to_yaml()
            .and_then(|yaml| std::fs::write(path, yaml).map_err(Into::into));
        if let Err(e) = written {
            e.print_diag(&ast);
            std::process::exit(1);
        }
    }

    println!("Successfully compiled {} to {}", args.input, args.output);
}
