//! Resolve the settings of a small server from the process arguments, the
//! environment and an optional `serve.toml`.
//!
//! ```text
//! SERVE_WORKERS=8 cargo run --example serve -- --port 3000 --verbose
//! ```

use std::collections::BTreeMap;
use std::error::Error;
use std::io::{self, Write};

use figment::providers::{Format, Toml};
use opt_layers::{
    ArgvTable, ComputedRegistry, Dict, Normalizer, OptionParams, OptionSet, Resolver,
    TypeRegistry, ValidateSpec, Value, config_from_provider,
};

fn declare(options: &mut OptionSet, computed: &mut ComputedRegistry) -> Result<(), Box<dyn Error>> {
    let base_url = computed.register(|config: &Dict| {
        let host = config.get("host").and_then(Value::as_str).unwrap_or("127.0.0.1");
        Value::from(format!("http://{host}/"))
    });
    let types = TypeRegistry::shared()?;
    let normalizer = Normalizer::new(types).with_computed(computed);

    options.declare(
        &normalizer,
        "host",
        &OptionParams::new()
            .of_type("string")
            .short("H")
            .argv(true)
            .env("SERVE_HOST")
            .default_value("127.0.0.1"),
    )?;
    options.declare(
        &normalizer,
        "port",
        &OptionParams::new()
            .of_type("uint")
            .short("p")
            .argv(true)
            .env("SERVE_PORT")
            .default_value(8080),
    )?;
    options.declare(
        &normalizer,
        "base-url",
        &OptionParams::new()
            .of_type("string")
            .argv(true)
            .computed_default(base_url),
    )?;
    options.declare(
        &normalizer,
        "workers",
        &OptionParams::new().of_type("uint").env("SERVE_WORKERS").default_value(4),
    )?;
    let levels: BTreeMap<String, Value> = [("verbose", "debug"), ("quiet", "error")]
        .into_iter()
        .map(|(flag, level)| (flag.to_owned(), Value::from(level)))
        .collect();
    options.declare(
        &normalizer,
        "log-level",
        &OptionParams::new()
            .of_type("string")
            .env("SERVE_LOG")
            .values_flags(levels)
            .validate(ValidateSpec::allow_list(["debug", "info", "error"]))
            .default_value("info"),
    )?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut options = OptionSet::new();
    let mut computed = ComputedRegistry::new();
    declare(&mut options, &mut computed)?;

    let argv = ArgvTable::from_env()?;
    let config = config_from_provider(Toml::file("serve.toml"))?;
    let resolution = Resolver::new(&argv).config(&config).resolve_all(&options);

    let mut out = io::stdout().lock();
    for (name, value) in resolution.values() {
        let origin = resolution
            .provenance(name)
            .map_or_else(String::new, ToString::to_string);
        writeln!(out, "{name} = {value} ({origin})")?;
    }
    resolution.into_result()?;
    Ok(())
}
