use clap::Parser;
use neatling_lib::{init_logging, load_config, NeatConfig, Run};
use std::fs::File;
use std::io::{BufWriter, Write};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML run configuration; built-in defaults when omitted
    #[arg(short, long)]
    config: Option<String>,

    #[arg(short, long, default_value_t = 10)]
    generations: u64,

    /// Overrides `population.seed`
    #[arg(short, long)]
    seed: Option<u64>,

    /// Writes one JSON genome snapshot per line after the last generation
    #[arg(short, long)]
    output: Option<String>,
}

fn resolve_config(args: &Args) -> anyhow::Result<NeatConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => NeatConfig::default(),
    };
    if args.seed.is_some() {
        config.population.seed = args.seed;
    }
    config.validate()?;
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let args = Args::parse();
    let config = resolve_config(&args)?;

    println!("Config fingerprint: {}", config.fingerprint());
    let mut run = Run::new(config)?;
    for _ in 0..args.generations {
        run.advance()?;
    }
    run.audit()?;

    let totals = run.metrics().totals();
    println!("Generations: {}", run.generation());
    println!("Innovations: {}", run.registry().snapshot().len());
    println!("Connections added: {}", totals.connections_added);
    println!("Nodes added: {}", totals.nodes_added);
    run.metrics().log_summary();

    if let Some(path) = &args.output {
        let mut writer = BufWriter::new(File::create(path)?);
        for genome in run.population() {
            serde_json::to_writer(&mut writer, &genome.snapshot())?;
            writeln!(writer)?;
        }
        writer.flush()?;
        println!("Snapshots written to {}", path);
    }

    Ok(())
}
