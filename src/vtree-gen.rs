use anyhow::Result;
use rvtree::{count_items, ForestGenerator, ForestWriter};
use std::env;

struct Config {
    generator: ForestGenerator,
    output_file: Option<String>,
    use_brotli: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            generator: ForestGenerator::new(),
            output_file: None,
            use_brotli: false,
        }
    }
}

fn next_value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str> {
    *i += 1;
    match args.get(*i) {
        Some(value) => Ok(value.as_str()),
        None => anyhow::bail!("{} requires an argument", flag),
    }
}

fn parse_args() -> Result<Config> {
    let args: Vec<String> = env::args().collect();
    let mut config = Config::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-roots" => config.generator.num_roots = next_value(&args, &mut i, "-roots")?.parse()?,
            "-depth" => config.generator.max_depth = next_value(&args, &mut i, "-depth")?.parse()?,
            "-children" => config.generator.max_children = next_value(&args, &mut i, "-children")?.parse()?,
            "-seed" => config.generator.seed = next_value(&args, &mut i, "-seed")?.parse()?,
            "-out" => config.output_file = Some(next_value(&args, &mut i, "-out")?.to_string()),
            "-brotli" => config.use_brotli = true,
            "-h" | "-help" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            other => {
                eprintln!("Warning: Unknown argument: {}", other);
            }
        }
        i += 1;
    }

    Ok(config)
}

fn print_help() {
    println!("Synthetic Forest Generator");
    println!("Usage: vtree-gen [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  -roots <N>             Number of root items (default: 5)");
    println!("  -depth <N>             Maximum nesting depth (default: 5)");
    println!("  -children <N>          Maximum children per item (default: 10)");
    println!("  -seed <N>              Random seed (default: 42)");
    println!("  -out <FILE>            Output file path (default: forest.jsonl)");
    println!("  -brotli                Write compressed output (default name: forest.jsonl.br)");
    println!("  -h, -help, --help      Show this help message");
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(rvtree::logging::env_filter())
        .with_writer(std::io::stderr)
        .init();

    let config = parse_args()?;
    let output_path = config.output_file.clone().unwrap_or_else(|| {
        if config.use_brotli {
            "forest.jsonl.br".to_string()
        } else {
            "forest.jsonl".to_string()
        }
    });

    let roots = config.generator.generate();
    let generator = &config.generator;

    let mut writer = ForestWriter::new(&output_path)?;
    writer.write_header(serde_json::json!({
        "tool": "vtree-gen v0.1",
        "seed": generator.seed,
        "num_roots": generator.num_roots,
        "max_depth": generator.max_depth,
        "max_children": generator.max_children,
    }))?;
    writer.write_items(&roots)?;
    writer.write_footer()?;
    writer.finish()?;

    tracing::info!(path = %output_path, items = count_items(&roots), "forest written");
    Ok(())
}
