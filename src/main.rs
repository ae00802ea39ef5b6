use anyhow::Context;
use clap::{Arg, ArgAction, Command};
use listing_classifier::config::ClassifierConfig;
use listing_classifier::indexing::{Indexer, Listing, ManualOverrides};
use listing_classifier::taxonomy::Taxonomy;
use listing_classifier::ProductClassifier;
use log::LevelFilter;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::process;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let matches = Command::new("listing-classifier")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Rule-based product listing classifier")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value("listing-classifier.yaml"),
        )
        .arg(
            Arg::new("generate-config")
                .long("generate-config")
                .value_name("FILE")
                .help("Generate a default configuration file")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("test-config")
                .long("test-config")
                .help("Test configuration, taxonomy and overrides for validity")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-taxonomy")
                .long("list-taxonomy")
                .help("List categories and subcategories of the active taxonomy")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("name")
                .short('n')
                .long("name")
                .value_name("TEXT")
                .help("Listing name to classify")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("description")
                .short('d')
                .long("description")
                .value_name("TEXT")
                .help("Listing description to classify")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("FILE")
                .help("JSON lines file of {id, name, description} records to index")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Write indexed records here instead of stdout")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    if let Some(generate_path) = matches.get_one::<String>("generate-config") {
        generate_default_config(generate_path);
        return;
    }

    let config_path = matches
        .get_one::<String>("config")
        .map(String::as_str)
        .unwrap_or("listing-classifier.yaml");

    // Logging is set up before the config is read, so an explicit --verbose
    // or RUST_LOG wins over the configured level.
    let configured = ClassifierConfig::from_file(config_path)
        .map(|c| c.logging.level_filter())
        .unwrap_or(LevelFilter::Info);
    let log_level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        configured
    };
    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    let config = match ClassifierConfig::load_or_default(config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            process::exit(1);
        }
    };

    let taxonomy = match load_taxonomy(&config) {
        Ok(taxonomy) => Arc::new(taxonomy),
        Err(e) => {
            eprintln!("Error loading taxonomy: {e:#}");
            process::exit(1);
        }
    };

    if matches.get_flag("test-config") {
        test_config(&config, &taxonomy);
        return;
    }

    if matches.get_flag("list-taxonomy") {
        list_taxonomy(&taxonomy);
        return;
    }

    let classifier = Arc::new(ProductClassifier::with_taxonomy(taxonomy));

    if let Some(input) = matches.get_one::<String>("input") {
        let output = matches.get_one::<String>("output").map(String::as_str);
        if let Err(e) = index_file(&config, classifier, input, output).await {
            eprintln!("Indexing failed: {e:#}");
            process::exit(1);
        }
        return;
    }

    let name = matches.get_one::<String>("name").map(String::as_str);
    let description = matches.get_one::<String>("description").map(String::as_str);
    if name.is_none() && description.is_none() {
        eprintln!("Nothing to do: pass --name/--description, --input, --list-taxonomy or --test-config");
        process::exit(2);
    }

    let result = classifier.classify(name, description);
    match serde_json::to_string_pretty(&result) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error serializing result: {e}");
            process::exit(1);
        }
    }
}

fn load_taxonomy(config: &ClassifierConfig) -> anyhow::Result<Taxonomy> {
    match &config.taxonomy_path {
        Some(path) => Taxonomy::load_from_file(path),
        None => Ok(Taxonomy::builtin().clone()),
    }
}

fn load_overrides(config: &ClassifierConfig) -> anyhow::Result<ManualOverrides> {
    match &config.overrides_path {
        Some(path) => ManualOverrides::load_from_file(path),
        None => Ok(ManualOverrides::new()),
    }
}

fn generate_default_config(path: &str) {
    let config = ClassifierConfig::default();
    match config.to_file(path) {
        Ok(()) => {
            println!("Default configuration written to: {path}");
            println!("Please edit the configuration file to suit your needs.");
        }
        Err(e) => {
            eprintln!("Error writing configuration file: {e}");
            process::exit(1);
        }
    }
}

fn test_config(config: &ClassifierConfig, taxonomy: &Taxonomy) {
    println!("Testing configuration...");

    if let Err(e) = config.validate() {
        println!("❌ Configuration invalid: {e}");
        process::exit(1);
    }
    println!("✅ Configuration is valid");
    println!(
        "   Taxonomy: {} ({} categories)",
        config.taxonomy_path.as_deref().unwrap_or("embedded"),
        taxonomy.len()
    );

    match load_overrides(config) {
        Ok(overrides) => println!("   Manual overrides: {}", overrides.len()),
        Err(e) => {
            println!("❌ Manual overrides invalid: {e:#}");
            process::exit(1);
        }
    }

    println!(
        "   Filters: skip_tips={}, skip_custom_orders={}",
        config.filters.skip_tips, config.filters.skip_custom_orders
    );
    println!(
        "   Batch: {} workers, chunk size {}",
        config.batch.workers, config.batch.chunk_size
    );
}

fn list_taxonomy(taxonomy: &Taxonomy) {
    for category in taxonomy.categories() {
        let marker = if category.is_reserved() { " (reserved)" } else { "" };
        println!("{}{}", category.name(), marker);
        for sub in category.subcategories() {
            println!("  - {}", sub.name());
        }
    }
}

fn read_listings(path: &str) -> anyhow::Result<Vec<Listing>> {
    let file = std::fs::File::open(path).with_context(|| format!("Failed to open {path}"))?;
    let mut listings = Vec::new();
    for (number, line) in BufReader::new(file).lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read {path}"))?;
        if line.trim().is_empty() {
            continue;
        }
        let listing: Listing = serde_json::from_str(&line)
            .with_context(|| format!("Invalid listing on line {} of {path}", number + 1))?;
        listings.push(listing);
    }
    Ok(listings)
}

async fn index_file(
    config: &ClassifierConfig,
    classifier: Arc<ProductClassifier>,
    input: &str,
    output: Option<&str>,
) -> anyhow::Result<()> {
    let listings = read_listings(input)?;
    let total = listings.len();
    let overrides = load_overrides(config)?;
    let indexer = Indexer::new(classifier, overrides, config.filters.clone());

    let indexed = indexer.index_batch(listings, &config.batch).await?;

    let writer: Box<dyn Write> = match output {
        Some(path) => Box::new(
            std::fs::File::create(path).with_context(|| format!("Failed to create {path}"))?,
        ),
        None => Box::new(std::io::stdout()),
    };
    let mut writer = BufWriter::new(writer);
    for record in &indexed {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;

    log::info!(
        "Indexed {} of {} listings ({} excluded)",
        indexed.len(),
        total,
        total - indexed.len()
    );
    Ok(())
}
