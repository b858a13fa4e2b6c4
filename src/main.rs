use clap::{Arg, Command};
use listing_verifier::report::run_batch;
use listing_verifier::{form, AnalyzerConfig, Listing, ListingAnalyzer};
use log::LevelFilter;
use std::collections::HashMap;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process;

fn main() {
    let matches = Command::new("listing-verifier")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Heuristic authenticity scoring for e-commerce product listings")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Analyzer configuration file (YAML)"),
        )
        .arg(
            Arg::new("generate-config")
                .long("generate-config")
                .value_name("FILE")
                .help("Generate a default configuration file")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("test-config")
                .long("test-config")
                .help("Validate the configuration and exit")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("batch")
                .long("batch")
                .value_name("FILE")
                .help("Analyze a JSON array of listings and write a CSV report")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Report path for batch mode")
                .default_value("analysis_report.csv"),
        )
        .arg(
            Arg::new("demo")
                .long("demo")
                .help("Analyze built-in sample listings")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("interactive")
                .short('i')
                .long("interactive")
                .help("Enter a listing manually and analyze it")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let log_level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    if let Some(generate_path) = matches.get_one::<String>("generate-config") {
        match AnalyzerConfig::generate_default(Path::new(generate_path)) {
            Ok(()) => {
                println!("Default configuration written to: {generate_path}");
                println!("Edit the vocabulary and phrase tables to suit your catalog.");
            }
            Err(e) => {
                eprintln!("Error writing configuration file: {e}");
                process::exit(1);
            }
        }
        return;
    }

    let config = match load_config(matches.get_one::<String>("config")) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            process::exit(1);
        }
    };

    if matches.get_flag("test-config") {
        println!("Known spec keys: {}", config.known_spec_keys.len());
        println!("Red-flag phrases: {}", config.red_flag_phrases.len());
        println!("Key match threshold: {}", config.key_match_threshold);
        println!("Fuzzy token threshold: {}", config.fuzzy_token_threshold);
        println!("Configuration is valid.");
        return;
    }

    let analyzer = ListingAnalyzer::new(&config);

    if let Some(batch_path) = matches.get_one::<String>("batch") {
        let output = matches.get_one::<String>("output").unwrap();
        if let Err(e) = run_batch(&analyzer, Path::new(batch_path), Path::new(output)) {
            eprintln!("Batch analysis failed: {e}");
            process::exit(1);
        }
        return;
    }

    if matches.get_flag("demo") {
        run_demo(&analyzer);
        return;
    }

    if matches.get_flag("interactive") {
        if let Err(e) = run_interactive(&analyzer) {
            eprintln!("Interactive analysis failed: {e}");
            process::exit(1);
        }
        return;
    }

    // No mode selected.
    println!("Nothing to do. Try --demo, --interactive, or --batch <FILE>.");
    println!("Run with --help for the full option list.");
}

fn load_config(path: Option<&String>) -> anyhow::Result<AnalyzerConfig> {
    match path {
        Some(path) => AnalyzerConfig::load_from_file(Path::new(path)),
        None => Ok(AnalyzerConfig::default()),
    }
}

fn print_result(analyzer: &ListingAnalyzer, listing: &Listing) {
    let result = analyzer.analyze(listing);
    if result.explanations.is_empty() {
        println!("  No issues detected. This listing looks genuine.");
    } else {
        println!("  Suspicious listing:");
        for explanation in &result.explanations {
            println!("   - {explanation}");
        }
    }
    println!("  Confidence score: {}/100", result.confidence_score);
}

fn run_demo(analyzer: &ListingAnalyzer) {
    for listing in sample_listings() {
        println!(
            "Product {}: {}",
            listing.product_id.as_deref().unwrap_or("N/A"),
            listing.title
        );
        print_result(analyzer, &listing);
        println!();
    }
}

fn sample_listings() -> Vec<Listing> {
    let specs = |pairs: &[(&str, &str)]| -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    };

    vec![
        Listing {
            product_id: Some("B001".to_string()),
            title: "iPhone 14 Pro".to_string(),
            description: "Brand new iPhone 14 Pro, 512GB".to_string(),
            specs: specs(&[
                ("Brand", "Apple"),
                ("Storage", "512GB"),
                ("Price", "999"),
            ]),
            reviews: vec![
                "Not 512GB".to_string(),
                "Looks used".to_string(),
                "Battery was 80%".to_string(),
            ],
        },
        Listing {
            product_id: Some("B002".to_string()),
            title: "Nike Air Max".to_string(),
            description: "First copy of Nike shoes, original sole".to_string(),
            specs: specs(&[("Brand", "unknown"), ("Pirce", "40")]),
            reviews: vec![
                "First copy".to_string(),
                "Looks original".to_string(),
                "Bit fake".to_string(),
            ],
        },
        Listing {
            product_id: Some("B003".to_string()),
            title: "Sony Headphones".to_string(),
            description: "New sealed Sony headphones".to_string(),
            specs: specs(&[("Brand", "Sony"), ("Price", "199")]),
            reviews: vec![
                "Great quality".to_string(),
                "Exactly what I expected".to_string(),
            ],
        },
    ]
}

fn run_interactive(analyzer: &ListingAnalyzer) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let title = prompt_line(&mut lines, "Product title: ")?;
    let description = prompt_line(&mut lines, "Product description: ")?;

    println!("Specs, one 'key: value' per line (empty line to finish):");
    let spec_block = read_block(&mut lines)?;
    println!("Reviews, one per line (empty line to finish):");
    let review_block = read_block(&mut lines)?;

    let listing = Listing {
        product_id: None,
        title,
        description,
        specs: form::parse_spec_block(&spec_block),
        reviews: form::parse_review_block(&review_block),
    };

    println!();
    println!("Analysis result:");
    print_result(analyzer, &listing);
    Ok(())
}

fn prompt_line(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    prompt: &str,
) -> anyhow::Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;
    Ok(lines.next().transpose()?.unwrap_or_default())
}

fn read_block(lines: &mut impl Iterator<Item = io::Result<String>>) -> anyhow::Result<String> {
    let mut block = String::new();
    for line in lines.by_ref() {
        let line = line?;
        if line.trim().is_empty() {
            break;
        }
        block.push_str(&line);
        block.push('\n');
    }
    Ok(block)
}
