use std::env::args;

use pretty_env_logger::formatted_builder;
use trailsat::{
    formula::{Cnf, LiteralError},
    prelude::*,
    report::Report,
    solver::{DpllSolver, Solver},
};

const DEMO_FORMULAS: &[&[&[i32]]] = &[
    &[&[1], &[-2, 1], &[3, -1], &[-3]],
    &[&[1], &[-2, 1], &[4, -1], &[-3]],
    &[&[1], &[-4, -1], &[4, -1], &[-3]],
    &[
        &[1, -2, 3],
        &[-1, 2],
        &[2, -3],
        &[1, -3],
        &[-1, 3],
        &[-2],
        &[-3],
    ],
];

fn usage_string() -> String {
    format!(
        "Usage: {} <solver_name> <command>

solver_name: dpll

command:
    demo [n] - solve the built-in formulas, or only the n-th one
    list     - print the built-in formulas",
        args().next().unwrap_or_else(|| "trailsat".to_owned())
    )
}

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("Unknown solver '{}'\n\n{}", name, usage_string()))]
    UnknownSolver { name: String },
    #[snafu(display("Unknown command '{}'\n\n{}", name, usage_string()))]
    UnknownCommand { name: String },
    #[snafu(display("Required argument does not exist\n\n{}", usage_string()))]
    MissingArgument,
    #[snafu(display(
        "Formula number '{}' is invalid (must be within 1 to {})",
        number,
        DEMO_FORMULAS.len()
    ))]
    InvalidFormulaNumber { number: String },
    #[snafu(display("Built-in formula #{} is malformed", number))]
    MalformedFormula {
        number: usize,
        source: LiteralError,
    },
}

fn demo_formula(number: usize) -> Result<Cnf, Error> {
    let clauses = DEMO_FORMULAS[number - 1]
        .iter()
        .map(|clause| clause.iter().copied());
    Cnf::from_literals(clauses).context(MalformedFormula { number })
}

fn parse_formula_number(arg: &str) -> Result<usize, Error> {
    let number = arg.parse::<usize>().ok();
    number
        .filter(|&n| n >= 1 && n <= DEMO_FORMULAS.len())
        .context(InvalidFormulaNumber { number: arg })
}

fn solve_formula<T: Solver>(number: usize) -> Result<(), Error> {
    let formula = demo_formula(number)?;
    println!("Formula #{}: {}", number, formula);

    let solver = T::new(formula);
    if let Some(model) = solver.solve() {
        println!("SAT {}", model.assignment());
    } else {
        println!("UNSAT");
    }
    println!("\n{}\n", "#".repeat(54));

    Ok(())
}

fn dispatch_command<T: Solver>(args: Vec<String>) -> Result<(), Error> {
    match args.get(0).map(|s| s.as_str()) {
        Some("demo") => match args.get(1) {
            Some(arg) => solve_formula::<T>(parse_formula_number(arg)?)?,
            None => {
                for number in 1..=DEMO_FORMULAS.len() {
                    solve_formula::<T>(number)?;
                }
            }
        },
        Some("list") => {
            for number in 1..=DEMO_FORMULAS.len() {
                println!("{}: {}", number, demo_formula(number)?);
            }
        }
        Some(name) => UnknownCommand {
            name: name.to_owned(),
        }
        .fail()?,
        None => MissingArgument.fail()?,
    }

    Ok(())
}

fn init_logger() {
    let mut builder = formatted_builder();

    if let Ok(s) = ::std::env::var("RUST_LOG") {
        builder.parse_filters(&s);
    } else if cfg!(debug_assertions) {
        builder.parse_filters("trailsat=info");
    } else {
        builder.parse_filters("trailsat=warn");
    }

    builder.try_init().expect("Failed to initialize the logger");
}

fn main() -> Result<(), Report> {
    init_logger();

    let mut args = args();

    // drop arg[0]
    args.next();

    let solver_name = args.next();
    let remaining: Vec<_> = args.collect();

    match solver_name.as_deref() {
        Some("dpll") => dispatch_command::<DpllSolver>(remaining)?,
        Some(name) => UnknownSolver {
            name: name.to_owned(),
        }
        .fail()?,
        None => {
            println!("{}", usage_string());
        }
    }

    Ok(())
}
