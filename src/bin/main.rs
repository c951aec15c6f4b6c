use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use guesser_core::display::{language_name, render_chart};
use guesser_core::{GuesserConfig, NaiveBayesClassifier};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Guess the language of short texts with a word-frequency Naive Bayes model.
#[derive(Parser, Debug)]
#[command(name = "guesser", version, about)]
struct Cli {
    /// JSON config file with model_path, corpus_dir and corpus_extension
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Model file to load and save (overrides the config file)
    #[arg(long, global = true)]
    model: Option<PathBuf>,

    /// Directory with one training file per language (overrides the config file)
    #[arg(long, global = true)]
    corpus: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Train a fresh model from the corpus directory and save it
    Train,

    /// Classify a text, training a model first if none has been saved yet
    Classify {
        /// Text to classify
        #[arg(required = true)]
        text: Vec<String>,

        /// Print the result as JSON instead of a chart
        #[arg(long)]
        json: bool,
    },

    /// Read lines from stdin and classify each one; 'exit' quits
    Interactive,

    /// Print statistics about the saved model
    Info,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "guesser=info,guesser_core=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    match cli.command {
        Command::Train => train(&config),
        Command::Classify { text, json } => classify(&config, &text.join(" "), json),
        Command::Interactive => interactive(&config),
        Command::Info => info(&config),
    }
}

fn resolve_config(cli: &Cli) -> Result<GuesserConfig> {
    let mut config = match &cli.config {
        Some(path) => GuesserConfig::from_json_file(path)?,
        None => GuesserConfig::default(),
    };
    if let Some(model) = &cli.model {
        config.model_path = model.clone();
    }
    if let Some(corpus) = &cli.corpus {
        config.corpus_dir = corpus.clone();
    }
    tracing::debug!(?config, "resolved configuration");
    Ok(config)
}

fn load(config: &GuesserConfig) -> Result<NaiveBayesClassifier> {
    NaiveBayesClassifier::load_or_train(config).with_context(|| {
        format!(
            "could not load or train a model at '{}'",
            config.model_path.display()
        )
    })
}

fn train(config: &GuesserConfig) -> Result<()> {
    tracing::info!("training on corpus in {}", config.corpus_dir.display());
    let classifier = NaiveBayesClassifier::train_from_corpus(config)
        .context("training failed")?;
    println!(
        "Model saved to '{}' ({} languages, {} examples, {} words)",
        config.model_path.display(),
        classifier.model().num_labels(),
        classifier.model().num_examples(),
        classifier.model().vocabulary_len()
    );
    Ok(())
}

fn classify(config: &GuesserConfig, text: &str, json: bool) -> Result<()> {
    let classifier = load(config)?;
    let result = classifier.classify(text)?;

    let mut stdout = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut stdout, &result)?;
        writeln!(stdout)?;
    } else {
        writeln!(stdout, "Results for \"{text}\"\n")?;
        render_chart(&mut stdout, &result)?;
    }
    Ok(())
}

fn interactive(config: &GuesserConfig) -> Result<()> {
    let classifier = load(config)?;
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("Language Guesser. Type a sentence and press Enter, 'exit' to quit.");
    println!("---------------------------------------------------------------");
    print!("> ");
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = line?;
        let input = line.trim();
        if input == "exit" {
            break;
        }
        if !input.is_empty() {
            let result = classifier.classify(input)?;
            render_chart(&mut stdout, &result)?;
        }
        print!("\n> ");
        stdout.flush()?;
    }
    Ok(())
}

fn info(config: &GuesserConfig) -> Result<()> {
    let classifier = NaiveBayesClassifier::load_from_file(&config.model_path)
        .with_context(|| format!("could not load '{}'", config.model_path.display()))?;
    let model = classifier.model();

    println!("Model: {}", config.model_path.display());
    println!("  examples:   {}", model.num_examples());
    println!("  vocabulary: {}", model.vocabulary_len());
    println!("  languages:  {}", model.num_labels());
    for label in model.labels() {
        println!(
            "    {label:<4} {:<12} {} examples",
            language_name(label),
            model.class_count(label)
        );
    }
    Ok(())
}
