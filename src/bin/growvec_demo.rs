use clap::Parser;
use growvec::{GrowVec, GrowVecError};
use std::io::{self, Read};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "growvec_demo")]
#[command(about = "Read words from stdin into a GrowVec, then push and pop one", long_about = None)]
struct Args {
    /// Number of slots to fill from stdin
    #[arg(short, long, default_value_t = 5)]
    count: usize,

    /// Value pushed after the slots are filled
    #[arg(short, long, default_value = "6")]
    append: String,
}

/// One line per state: every element followed by a space.
fn render_line(words: &GrowVec<String>) -> String {
    let mut line = String::new();
    for word in words {
        line.push_str(word);
        line.push(' ');
    }
    line
}

fn run(args: &Args, input: &str) -> Result<Vec<String>, GrowVecError> {
    let mut words = GrowVec::from_elem(args.count, String::new())?;
    for (slot, token) in words.iter_mut().zip(input.split_whitespace()) {
        slot.push_str(token);
    }
    let mut lines = vec![render_line(&words)];

    words.push(args.append.clone())?;
    lines.push(render_line(&words));

    words.pop();
    lines.push(render_line(&words));
    Ok(lines)
}

fn main() -> ExitCode {
    let args = Args::parse();

    let mut input = String::new();
    if let Err(err) = io::stdin().read_to_string(&mut input) {
        eprintln!("Failed to read stdin: {err}");
        return ExitCode::FAILURE;
    }

    match run(&args, &input) {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
