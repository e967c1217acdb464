use chrono::NaiveDate;

use comparo_core::config::{ConfigOverrides, EngineConfig, LoadOptions, LogFormat};
use comparo_core::{ComparisonResult, Offer, SearchRequest, StructuredFields};
use comparo_engine::Aggregator;

use crate::commands::CommandResult;

pub struct SearchArgs {
    pub category: String,
    pub query: String,
    pub location: Option<String>,
    pub departure_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
    pub passengers: Option<u32>,
    pub seed: Option<u64>,
    pub json: bool,
}

pub fn run(args: SearchArgs) -> CommandResult {
    let config = match EngineConfig::load(LoadOptions {
        overrides: ConfigOverrides { seed: args.seed, ..ConfigOverrides::default() },
        ..LoadOptions::default()
    }) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "search",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    init_logging(&config);

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult::failure(
                "search",
                "runtime_init",
                format!("failed to initialize async runtime: {error}"),
                3,
            );
        }
    };

    let mut request = SearchRequest::new(args.category, args.query).with_fields(StructuredFields {
        departure_date: args.departure_date,
        return_date: args.return_date,
        passengers: args.passengers,
    });
    if let Some(location) = args.location {
        request = request.with_location(location);
    }

    let aggregator = Aggregator::from_config(&config);
    let results = runtime.block_on(aggregator.search(&request));

    let output = if args.json {
        serde_json::to_string_pretty(&results)
            .unwrap_or_else(|error| format!("serialization failed: {error}"))
    } else {
        render_results(&request, &results)
    };
    CommandResult { exit_code: 0, output }
}

fn init_logging(config: &EngineConfig) {
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    // A second init in the same process is a no-op failure; ignore it.
    let builder = tracing_subscriber::fmt().with_target(false).with_max_level(log_level);
    let _ = match config.logging.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}

fn render_results(request: &SearchRequest, results: &[ComparisonResult]) -> String {
    if results.is_empty() {
        return format!(
            "no results for \"{}\" in category `{}`",
            request.query.trim(),
            request.category
        );
    }

    let mut lines =
        vec![format!("{} result(s) for \"{}\" in {}:", results.len(), request.trimmed_query(), request.category)];
    for result in results {
        lines.push(String::new());
        lines.push(format!("{}  [{}]", result.name, result.id));
        lines.push(format!(
            "  best price: {} · fastest: {} on {} · top rated: \u{2605}{:.1} on {}",
            price_label(result.best_price()),
            result.fastest_delivery().estimated_delivery,
            result.fastest_delivery().platform.name,
            result.best_rated().rating,
            result.best_rated().platform.name,
        ));
        for offer in result.offers() {
            let stock = if offer.availability { "" } else { "  (unavailable)" };
            let specials = if offer.special_offers.is_empty() {
                String::new()
            } else {
                format!("  [{}]", offer.special_offers.join("; "))
            };
            lines.push(format!(
                "  - {}: {} · {} · \u{2605}{:.1} ({} reviews){}{}",
                offer.platform.name,
                price_label(offer),
                offer.estimated_delivery,
                offer.rating,
                offer.reviews,
                specials,
                stock,
            ));
        }
    }
    lines.join("\n")
}

fn price_label(offer: &Offer) -> String {
    if offer.price.is_zero() {
        format!("included on {}", offer.platform.name)
    } else {
        format!("\u{20B9}{}", offer.price)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use comparo_core::{ComparisonResult, Offer, Platform, SearchRequest};

    use super::render_results;

    fn result() -> ComparisonResult {
        let cheap = Offer::new(
            Platform::new("alpha", "Alpha", "https://alpha.example", "#111"),
            Decimal::from(199u32),
            "10-15 mins",
        )
        .with_rating(4.1)
        .with_reviews(320);
        let plush = Offer::new(
            Platform::new("beta", "Beta", "https://beta.example", "#222"),
            Decimal::from(240u32),
            "2-3 days",
        )
        .with_rating(4.6)
        .with_reviews(80);

        ComparisonResult::new("cat-1", "Widget", "https://img.example/w", vec![cheap, plush])
            .expect("valid result")
    }

    #[test]
    fn renders_recommendations_and_every_offer() {
        let request = SearchRequest::new("cat", "widget");
        let rendered = render_results(&request, &[result()]);

        assert!(rendered.contains("1 result(s)"));
        assert!(rendered.contains("best price: \u{20B9}199"));
        assert!(rendered.contains("top rated: \u{2605}4.6 on Beta"));
        assert!(rendered.contains("- Alpha:"));
        assert!(rendered.contains("- Beta:"));
    }

    #[test]
    fn empty_results_render_a_no_results_line() {
        let request = SearchRequest::new("cat", "widget");
        let rendered = render_results(&request, &[]);
        assert!(rendered.contains("no results"));
    }
}
