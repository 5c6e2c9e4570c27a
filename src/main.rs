use std::io::{self, Write};

use anyhow::Result;
use cardsentry::form::{FieldKind, FormVariant};
use cardsentry::samples::SAMPLES;
use cardsentry::{present, ClientConfig, PredictionClient, Session};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = ClientConfig::load()?;
    println!("--- CardSentry v0.1 ---");
    println!("Checks card transactions against a fraud model at {}", config.endpoint);

    loop {
        println!();
        println!("1) Business transaction form");
        println!("2) Raw feature form (amount, time, v1..v28)");
        println!("3) Canned sample transactions");
        println!("q) Quit");
        let choice = prompt("> ")?;

        match choice.as_str() {
            "1" => run_analysis(&config, FormVariant::BusinessFields, false).await?,
            "2" => run_analysis(&config, FormVariant::RawFeatures, false).await?,
            "3" => run_analysis(&config, FormVariant::RawFeatures, true).await?,
            "q" | "Q" => break,
            other => println!("Unknown choice '{other}'."),
        }
    }
    Ok(())
}

async fn run_analysis(config: &ClientConfig, variant: FormVariant, from_sample: bool) -> Result<()> {
    let client = PredictionClient::new(config)?;
    let mut session = Session::new(client, variant);

    if from_sample {
        let Some(sample) = pick_sample()? else {
            return Ok(());
        };
        sample.fill(session.form_mut())?;
        println!("[Form] Loaded sample '{}'.", sample.label);
    } else {
        collect_fields(&mut session, variant)?;
    }

    // Re-prompt only the fields that failed, until the form validates.
    while let Err(e) = session.form_mut().validate() {
        println!("[Form] {e}");
        let failed: Vec<String> = session.form().errors().keys().cloned().collect();
        for field in variant.fields() {
            if failed.contains(&field.name) {
                println!("  {}: {}", field.label, session.form().errors()[&field.name]);
                let value = prompt(&format!("  {} = ", field.label))?;
                session.form_mut().set(&field.name, value)?;
            }
        }
    }

    println!("[Client] Analyzing transaction...");
    match session.submit().await {
        Ok(result) => {
            let assessment = present::assess(result);
            println!();
            print!("{}", present::render(&assessment));
            prompt("Press Enter to start a new analysis ")?;
            session.reset();
        }
        Err(e) => {
            // One alert, no retry; input state is cleared like the original.
            println!("[Client] Failed: {e}");
            println!("Error processing the transaction. Please try again.");
            session.reset();
        }
    }
    Ok(())
}

fn collect_fields(session: &mut Session, variant: FormVariant) -> Result<()> {
    println!("[Form] Enter the transaction details:");
    for field in variant.fields() {
        let hint = match &field.kind {
            FieldKind::Select(options) => format!(" ({})", options.join("/")),
            FieldKind::Integer | FieldKind::Number => String::new(),
        };
        let value = prompt(&format!("  {}{} = ", field.label, hint))?;
        session.form_mut().set(&field.name, value)?;
    }
    Ok(())
}

fn pick_sample() -> Result<Option<&'static cardsentry::samples::Sample>> {
    println!("[Form] Sample transactions:");
    for (i, sample) in SAMPLES.iter().enumerate() {
        println!("  {}) {} (amount {})", i + 1, sample.label, sample.features.amount);
    }
    let choice = prompt("> ")?;
    let index: usize = match choice.parse::<usize>() {
        Ok(n) if (1..=SAMPLES.len()).contains(&n) => n - 1,
        _ => {
            println!("No such sample.");
            return Ok(None);
        }
    };
    Ok(Some(&SAMPLES[index]))
}

fn prompt(label: &str) -> Result<String> {
    print!("{label}");
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}
