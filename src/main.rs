use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing_subscriber::EnvFilter;

use wordy::{Error, Interpreter, lexer, parser};

const SOURCE_EXTENSION: &str = "wordy";

enum Emit {
    Tokens,
    Ast,
    Run,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let mut emit = Emit::Run;
    let mut input_path: Option<String> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--emit" | "-e" => {
                let mode = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("Missing mode after {arg}"))?;
                emit = match mode.as_str() {
                    "tokens" => Emit::Tokens,
                    "ast" => Emit::Ast,
                    "run" => Emit::Run,
                    other => bail!("Unknown emit mode '{other}' (expected tokens, ast or run)"),
                };
            }
            _ => {
                input_path = Some(arg);
                if args.next().is_some() {
                    bail!("Only one input file is supported");
                }
                break;
            }
        }
    }

    let (source, origin) = if let Some(path) = input_path {
        (read_source(Path::new(&path))?, path)
    } else {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Reading stdin")?;
        (buffer, "<stdin>".to_string())
    };

    let tokens = lexer::tokenize(&source)
        .map_err(Error::from)
        .with_context(|| format!("Tokenizing {origin}"))?;
    if let Emit::Tokens = emit {
        for token in &tokens {
            println!("{token}");
        }
        return Ok(());
    }

    let program = parser::parse_tokens(&tokens)
        .map_err(Error::from)
        .with_context(|| format!("Parsing {origin}"))?;
    if let Emit::Ast = emit {
        println!("{program:#?}");
        return Ok(());
    }

    let mut interpreter = Interpreter::new(io::stdin().lock(), io::stdout().lock());
    interpreter
        .evaluate(&program)
        .map_err(Error::from)
        .with_context(|| format!("Running {origin}"))?;
    Ok(())
}

fn read_source(path: &Path) -> Result<String> {
    if path.extension().and_then(|ext| ext.to_str()) != Some(SOURCE_EXTENSION) {
        bail!(
            "Expected a .{SOURCE_EXTENSION} source file, got {}",
            path.display()
        );
    }
    fs::read_to_string(path).with_context(|| format!("Reading {}", path.display()))
}
