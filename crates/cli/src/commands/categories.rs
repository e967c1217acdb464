use comparo_core::config::{EngineConfig, LoadOptions};
use comparo_core::{CategoryCatalog, RandomSource};
use comparo_engine::DispatchTable;

pub fn run() -> String {
    let config = match EngineConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let catalog = CategoryCatalog::builtin();
    let dispatch =
        DispatchTable::standard(&config, RandomSource::from_seed_option(config.search.seed));

    let mut lines = vec![format!("{} categories:", catalog.len())];
    for category in catalog.iter() {
        lines.push(format!(
            "- {:<16} {:<20} {} platform(s) · cap {} · {}",
            category.id.0,
            category.name,
            category.platforms.len(),
            category.result_cap,
            dispatch.describe(&category.id),
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    #[test]
    fn lists_every_builtin_category_with_its_routing_kind() {
        let output = super::run();
        assert!(output.contains("cryptocurrency"));
        assert!(output.contains("adapter:catalog-retail"));
        assert!(output.contains("fallback-only"));
    }
}
