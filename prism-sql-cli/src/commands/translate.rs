//! Translate command implementation.

use anyhow::{Context, Result};
use prism_sql::config::{Config, InputFormat};
use prism_sql::{DslTranslator, Query};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Options for one `translate` run
#[derive(Debug, Clone)]
pub struct TranslateOptions {
    /// Query document path, `-` for stdin
    pub input: PathBuf,
    pub format: Option<InputFormat>,
    pub pretty: bool,
    pub output: Option<PathBuf>,
}

/// Run the translate command.
pub fn run_translate(opts: &TranslateOptions, config: &Config) -> Result<()> {
    let content = read_input(&opts.input)?;
    let format = opts
        .format
        .or_else(|| InputFormat::from_path(&opts.input))
        .unwrap_or(config.input.default_format);

    tracing::debug!("Reading {} query from {}", format, opts.input.display());
    let query = parse_query(&content, format)
        .with_context(|| format!("Failed to parse query document {}", opts.input.display()))?;

    let mut dsl = render(&query, opts.pretty || config.output.pretty)?;
    if config.output.trailing_newline {
        dsl.push('\n');
    }

    match &opts.output {
        Some(path) => {
            fs::write(path, &dsl)
                .with_context(|| format!("Failed to write DSL to {}", path.display()))?;
            tracing::info!("Wrote DSL to {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(dsl.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}

fn read_input(input: &Path) -> Result<String> {
    if input == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read query from stdin")?;
        Ok(buf)
    } else {
        fs::read_to_string(input).with_context(|| format!("Failed to read {}", input.display()))
    }
}

/// Deserialize a query document
///
/// YAML goes through a JSON value so expression nodes can be written as
/// single-key maps (`- field: region`) instead of `!field` tags.
pub fn parse_query(content: &str, format: InputFormat) -> Result<Query> {
    let query: Query = match format {
        InputFormat::Json => serde_json::from_str(content)?,
        InputFormat::Yaml => {
            let value: serde_json::Value = serde_yaml::from_str(content)?;
            serde_json::from_value(value)?
        }
    };
    Ok(query)
}

/// Translate a query and serialize the request document
pub fn render(query: &Query, pretty: bool) -> Result<String> {
    let translator = DslTranslator::new();
    let dsl = if pretty {
        translator.to_dsl_string_pretty(query)
    } else {
        translator.try_to_dsl_string(query)
    };
    dsl.map_err(|e| anyhow::anyhow!("Translation failed ({}): {}", e.error_type(), e))
}
