//! CLI argument parsing and subcommand dispatch.

use rand::rngs::StdRng;
use rand::SeedableRng;

use upp_core::{Config, Strategy};
use upp_scoring::strategy::evaluator;
use upp_scoring::DEFAULT_ITERATIONS;

/// Parse CLI arguments and dispatch to the appropriate subcommand.
///
/// Returns `Ok(true)` if a subcommand was handled, `Ok(false)` if `serve`
/// should be started (handled by the caller).
pub fn dispatch(config: &Config, args: &[String]) -> anyhow::Result<bool> {
    match args.get(1).map(|s| s.as_str()) {
        Some("serve") => Ok(false),
        Some("evaluate") => {
            let iterations = args
                .iter()
                .skip(2)
                .find(|a| !a.starts_with("--"))
                .map(|a| a.parse())
                .transpose()?
                .unwrap_or(DEFAULT_ITERATIONS);
            let seed = parse_seed(args)?;
            evaluate_offline(config, iterations, seed)?;
            Ok(true)
        }
        _ => {
            print_usage();
            Ok(true)
        }
    }
}

/// Extract the optional `--seed N` flag.
fn parse_seed(args: &[String]) -> anyhow::Result<Option<u64>> {
    let Some(pos) = args.iter().position(|a| a == "--seed") else {
        return Ok(None);
    };
    let value = args
        .get(pos + 1)
        .ok_or_else(|| anyhow::anyhow!("--seed requires a value"))?;
    Ok(Some(value.parse()?))
}

/// Run the strategy evaluator locally and print the report as JSON.
fn evaluate_offline(config: &Config, iterations: usize, seed: Option<u64>) -> anyhow::Result<()> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let evaluation = evaluator::evaluate(&mut rng, &Strategy::ALL, None, iterations, &config.weights)?;
    println!("{}", serde_json::to_string_pretty(&evaluation)?);
    Ok(())
}

fn print_usage() {
    println!("upp-engine v{}", env!("CARGO_PKG_VERSION"));
    println!("Usage: upp-server <command>");
    println!("  serve                               Start HTTP server");
    println!("  evaluate [iterations] [--seed N]    Run a strategy evaluation and print JSON");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn serve_is_deferred_to_the_caller() {
        let config = Config::for_profile("");
        assert!(!dispatch(&config, &args(&["upp-server", "serve"])).unwrap());
    }

    #[test]
    fn unknown_command_prints_usage_and_exits() {
        let config = Config::for_profile("");
        assert!(dispatch(&config, &args(&["upp-server", "bogus"])).unwrap());
    }

    #[test]
    fn seed_flag_is_parsed() {
        assert_eq!(
            parse_seed(&args(&["upp-server", "evaluate", "--seed", "42"])).unwrap(),
            Some(42)
        );
        assert_eq!(parse_seed(&args(&["upp-server", "evaluate"])).unwrap(), None);
        assert!(parse_seed(&args(&["upp-server", "evaluate", "--seed"])).is_err());
    }
}
