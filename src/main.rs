//! pixelfilter CLI
//!
//! Applies the filter pipeline to an image file and reports the derived
//! border color.

use anyhow::{bail, Context, Result};
use log::warn;
use pixelfilter::prelude::*;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("🎨 pixelfilter v{}", pixelfilter::VERSION);
    println!();

    let args: Vec<String> = std::env::args().collect();
    let program = program_name(&args);

    if args.len() < 2 {
        print_usage(program);
        return Ok(());
    }

    match args[1].as_str() {
        "list" => list_filters(),
        "info" => {
            if args.len() < 3 {
                bail!("please specify a filter name");
            }
            filter_info(&args[2])?;
        }
        "process" => {
            if args.len() < 4 {
                eprintln!("Usage: {} process <input> <output> [options]", program);
                bail!("please specify input and output paths");
            }
            process_image(&args[2..])?;
        }
        "help" | "--help" | "-h" => print_usage(program),
        other => {
            print_usage(program);
            bail!("unknown command: {}", other);
        }
    }

    Ok(())
}

/// Name to show in usage lines; argv may be empty.
fn program_name(args: &[String]) -> &str {
    args.first().map(String::as_str).unwrap_or("pixelfilter")
}

fn print_usage(program: &str) {
    println!("Usage: {} <command> [options]", program);
    println!();
    println!("Commands:");
    println!("  list                          List all filters");
    println!("  info <filter>                 Show details about a filter");
    println!("  process <in> <out> [options]  Filter an image");
    println!("  help                          Show this help message");
    println!();
    println!("Process options:");
    println!("  --<filter> <value>   Set a filter, e.g. --hue 40 or --border 12");
    println!("  --config <file>      Load parameters from a TOML or JSON file");
    println!("  --region <WxH>       Fit the image into 90% of this region");
    println!("  --blur-kind <kind>   Blur implementation: gaussian (default) or box");
    println!("  --sequential         Disable row-parallel processing");
    println!("  --data-url           Print the result as a PNG data URL");
}

fn list_filters() {
    let registry = FilterRegistry::with_builtins();
    let grouped = registry.grouped_by_category();

    println!("Available filters ({} total):", registry.len());
    println!();

    for (category, filters) in grouped {
        println!("  📁 {}", category.display_name());
        for metadata in filters {
            println!("      • {} - {}", metadata.id, metadata.description);
        }
        println!();
    }
}

fn filter_info(name: &str) -> Result<()> {
    let registry = FilterRegistry::with_builtins();
    let metadata = match registry.get_metadata(name) {
        Some(metadata) => metadata,
        None => {
            let err = FilterError::UnknownFilter(name.to_string());
            if let Some(fix) = err.suggested_fix() {
                eprintln!("💡 {}", fix);
            }
            return Err(err.into());
        }
    };

    println!("Filter: {}", metadata.name);
    println!("ID: {}", metadata.id);
    println!("Category: {}", metadata.category.display_name());
    println!("Default: {}", metadata.default_value);
    println!("Range: {} to {}", metadata.range.min, metadata.range.max);
    println!("Control: {:?}", metadata.ui_hint);
    if let Some(stage) = metadata.stage {
        println!("Stage: {} of the per-pixel pass", stage + 1);
    }
    println!();
    println!("Description:");
    println!("  {}", metadata.description);
    Ok(())
}

fn process_image(args: &[String]) -> Result<()> {
    let input_path = &args[0];
    let output_path = &args[1];

    let mut config_path: Option<&String> = None;
    let mut region: Option<(u32, u32)> = None;
    let mut blur_kind: Option<BlurKind> = None;
    let mut sequential = false;
    let mut data_url = false;
    let mut overrides: Vec<(&str, &String)> = Vec::new();

    let mut i = 2;
    while i < args.len() {
        match (args[i].as_str(), args.get(i + 1)) {
            ("--sequential", _) => {
                sequential = true;
                i += 1;
            }
            ("--data-url", _) => {
                data_url = true;
                i += 1;
            }
            ("--config", Some(path)) => {
                config_path = Some(path);
                i += 2;
            }
            ("--region", Some(dims)) => {
                region = Some(
                    parse_dimensions(dims)
                        .with_context(|| format!("invalid region '{}', expected WxH", dims))?,
                );
                i += 2;
            }
            ("--blur-kind", Some(kind)) => {
                blur_kind = Some(kind.parse()?);
                i += 2;
            }
            (flag, Some(value)) if flag.starts_with("--") => {
                overrides.push((flag.trim_start_matches("--"), value));
                i += 2;
            }
            (flag, _) => bail!("unknown or incomplete option: {}", flag),
        }
    }

    // Command-line flags win over the config file.
    let mut config = match config_path {
        Some(path) => PipelineConfig::load(path)
            .with_context(|| format!("failed to load config {}", path))?,
        None => PipelineConfig::default(),
    };
    if sequential {
        config.execution.parallel = false;
    }
    if region.is_some() {
        config.display.region = region;
    }
    if let Some(kind) = blur_kind {
        config.blur.kind = kind;
    }
    for (name, value) in overrides {
        config.parameters.set_from_str(name, value)?;
    }

    let registry = FilterRegistry::with_builtins();
    for (kind, value) in registry.out_of_range(&config.parameters) {
        warn!("{} = {} is outside its usual range", kind, value);
    }

    println!("⚙️  Processing {} -> {}", input_path, output_path);
    let image = load_image(input_path, config.display.region)
        .with_context(|| format!("failed to load {}", input_path))?;
    println!("   • Image: {}x{}", image.width(), image.height());

    let active = config.parameters.active();
    if active.is_empty() {
        println!("   • No active filters");
    } else {
        let names: Vec<&str> = active.iter().map(|kind| kind.name()).collect();
        println!("   • Active filters: {}", names.join(", "));
    }

    let session = EditSession::from_config(image, &config);
    let rendered = session.render()?;

    save_image(&rendered.surface, output_path)
        .with_context(|| format!("failed to save {}", output_path))?;

    println!("✅ Border color: {}", rendered.border_color);
    if let Some(width) = rendered.border_width {
        println!("   • Border: {}px", width);
    }
    if data_url {
        println!("{}", to_data_url(&rendered.surface)?);
    }
    println!("🎉 Image saved to: {}", output_path);
    Ok(())
}

fn parse_dimensions(s: &str) -> Option<(u32, u32)> {
    let (w, h) = s.split_once('x')?;
    let w: u32 = w.parse().ok()?;
    let h: u32 = h.parse().ok()?;
    if w == 0 || h == 0 {
        return None;
    }
    Some((w, h))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_name_without_argv() {
        assert_eq!(program_name(&[]), "pixelfilter");
        assert_eq!(program_name(&["./pf".to_string()]), "./pf");
    }

    #[test]
    fn test_parse_dimensions() {
        assert_eq!(parse_dimensions("1280x800"), Some((1280, 800)));
        assert_eq!(parse_dimensions("0x800"), None);
        assert_eq!(parse_dimensions("1280"), None);
    }
}
