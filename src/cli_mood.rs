use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use moodify_server::classifier::EmotionClassifier;
use moodify_server::config::DEFAULT_CATALOG_PATH;
use moodify_server::mood::{self, rules_for, Emotion};
use moodify_server::{load_catalog, load_classifier, Catalog, TextEmotionClassifier};

#[derive(Parser, Debug)]
struct CliArgs {
    /// CSV file with the song catalog.
    #[clap(default_value = DEFAULT_CATALOG_PATH)]
    pub catalog_path: PathBuf,

    /// JSON vectorizer, needed together with --model-path to classify text.
    #[clap(long, requires = "model_path")]
    pub vectorizer_path: Option<PathBuf>,

    /// JSON emotion model, needed together with --vectorizer-path to classify text.
    #[clap(long, requires = "vectorizer_path")]
    pub model_path: Option<PathBuf>,
}

fn print_rules() {
    for emotion in Emotion::ALL {
        let conditions: Vec<String> = rules_for(emotion).iter().map(|t| t.to_string()).collect();
        println!("{:<8} {}", emotion, conditions.join(" AND "));
    }
}

fn print_songs(catalog: &Catalog, raw_emotion: &str) {
    let emotion = match raw_emotion.parse::<Emotion>() {
        Ok(emotion) => emotion,
        Err(err) => {
            println!("{}", err);
            return;
        }
    };
    let total = mood::candidates(catalog, emotion).len();
    let songs = mood::select(catalog, emotion);
    if songs.is_empty() {
        println!("No songs found for emotion: {}", emotion);
        return;
    }
    println!("{} of {} songs for {}:\n", songs.len(), total, emotion);
    for song in songs {
        println!(
            "{} - {} [{}] valence={:.2} energy={:.2}",
            song.artists, song.track_name, song.track_id, song.valence, song.energy
        );
    }
}

fn print_classification(classifier: Option<&TextEmotionClassifier>, text: &str) {
    let Some(classifier) = classifier else {
        println!("No classifier loaded, start with --vectorizer-path and --model-path.");
        return;
    };
    match classifier.classify(text) {
        Ok(prediction) => println!(
            "{} ({:.1}%)",
            prediction.emotion,
            prediction.confidence * 100.0
        ),
        Err(err) => println!("Could not classify: {}", err),
    }
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();
    println!(
        "Cli Mood loading catalog at {}...",
        cli_args.catalog_path.display()
    );

    let catalog = load_catalog(&cli_args.catalog_path)?;
    let classifier = match (&cli_args.vectorizer_path, &cli_args.model_path) {
        (Some(vectorizer_path), Some(model_path)) => {
            Some(load_classifier(vectorizer_path, model_path)?)
        }
        _ => None,
    };
    println!("Done! {} songs loaded.", catalog.get_songs_count());

    let stdin = io::stdin();
    loop {
        print!("\nEmotion, \"? <text>\", \"rules\" or \"quit\": ");
        io::stdout().flush().context("Could not flush stdout")?;

        let mut user_input = String::new();
        let read = stdin
            .lock()
            .read_line(&mut user_input)
            .context("Failed to read line")?;
        if read == 0 {
            return Ok(());
        }

        match user_input.trim() {
            "" => continue,
            "quit" | "exit" => return Ok(()),
            "rules" => print_rules(),
            input => match input.strip_prefix('?') {
                Some(text) => print_classification(classifier.as_ref(), text.trim()),
                None => print_songs(&catalog, input),
            },
        }
    }
}
