//! astro-insight CLI: daily insight, standalone horoscope, and sign profiles.
//!
//! Usage:
//!   astro-insight insight --name "Ritika" --date 1995-08-20 --time 14:30 --place "Jaipur, India" [--lang hi]
//!   astro-insight horoscope --name "Ritika" --sign Leo
//!   astro-insight sign Leo
//!
//! Reads `astro_config.toml` (optional) and `.env`; the LLM key comes from
//! ASTRO_LLM_API_KEY or GROQ_API_KEY. Output is JSON on stdout.

use astro_core::{
    AstroConfig, AstrologicalService, ChatHoroscopeClient, InsightRequest, ResultCache, SignInfo,
    ZodiacSign,
};
use std::collections::HashMap;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

fn print_usage() {
    eprintln!("astro-insight: Astrological Insight Generator");
    eprintln!("  insight   --name N --date YYYY-MM-DD --time HH:MM --place P [--lang en|hi]");
    eprintln!("  horoscope --name N --sign SIGN");
    eprintln!("  sign      SIGN");
    eprintln!();
    eprintln!("LLM key: ASTRO_LLM_API_KEY or GROQ_API_KEY (or api_key in astro_config.toml).");
}

/// Collects `--flag value` pairs; a bare word is stored under "" (positional).
fn parse_flags(args: impl Iterator<Item = String>) -> HashMap<String, String> {
    let mut out = HashMap::new();
    let mut args = args.peekable();
    while let Some(a) = args.next() {
        if let Some(flag) = a.strip_prefix("--") {
            let value = match args.peek() {
                Some(v) if !v.starts_with("--") => args.next().unwrap_or_default(),
                _ => String::new(),
            };
            out.insert(flag.to_string(), value);
        } else {
            out.insert(String::new(), a);
        }
    }
    out
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), BoxError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn error_json(message: impl std::fmt::Display) -> Result<ExitCode, BoxError> {
    print_json(&serde_json::json!({ "error": message.to_string() }))?;
    Ok(ExitCode::FAILURE)
}

fn build_service(config: &AstroConfig) -> Result<AstrologicalService, BoxError> {
    let client = ChatHoroscopeClient::from_config(config)?;
    Ok(AstrologicalService::new(
        Arc::new(client),
        Arc::new(ResultCache::new()),
    ))
}

#[tokio::main]
async fn main() -> Result<ExitCode, BoxError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut args = std::env::args().skip(1);
    let Some(command) = args.next() else {
        print_usage();
        return Ok(ExitCode::FAILURE);
    };
    let flags = parse_flags(args);
    let config = AstroConfig::load()?;
    tracing::debug!(command = %command, model = %config.model, "dispatching");

    match command.as_str() {
        "insight" => {
            let request = InsightRequest {
                name: flags.get("name").cloned(),
                birth_date: flags.get("date").cloned(),
                birth_time: flags.get("time").cloned(),
                birth_place: flags.get("place").cloned(),
                language: Some(flags.get("lang").cloned().unwrap_or_else(|| "en".to_string())),
            };
            let (details, language) = match request.into_parts() {
                Ok(parts) => parts,
                Err(e) => return error_json(e),
            };
            let service = build_service(&config)?;
            let response = service.generate_daily_insight(&details, language).await;
            print_json(&response)?;
            Ok(if response.is_error() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
        "horoscope" => {
            let (Some(name), Some(sign)) = (flags.get("name"), flags.get("sign")) else {
                return error_json("Missing required fields: name and zodiac");
            };
            let service = build_service(&config)?;
            match service.horoscope(name, sign).await {
                Ok(report) => {
                    print_json(&report)?;
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => error_json(format!("Error generating horoscope: {}", e)),
            }
        }
        "sign" => {
            let name = flags.get("").map(String::as_str).unwrap_or_default();
            match ZodiacSign::from_name(name) {
                Some(sign) => {
                    print_json(&SignInfo::for_sign(sign))?;
                    Ok(ExitCode::SUCCESS)
                }
                None => error_json(format!("Zodiac sign '{}' not found", name)),
            }
        }
        _ => {
            print_usage();
            Ok(ExitCode::FAILURE)
        }
    }
}
