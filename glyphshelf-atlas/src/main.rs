mod cli;
mod logging;

use clap::Parser;
use color_eyre::eyre::{Context, Result};
use glyphshelf_atlas::{AtlasGenerator, save_png};
use glyphshelf_data::FontAtlas;
use glyphshelf_rasterizer::{FontDiscovery, SwashRasterizer};

use crate::{
    cli::{Cli, FontSource},
    logging::{LoggingConfig, init_logging},
};

fn main() -> Result<()> {
    // panic hook
    color_eyre::install()?;

    let logging_config = LoggingConfig::from_env();
    let _guard = init_logging(logging_config).wrap_err("Failed to initialize logging")?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "glyphshelf-atlas starting up"
    );

    let cli = Cli::parse();

    if cli.list_fonts {
        Cli::display_font_list();
        return Ok(());
    }

    cli.validate()?;

    let (mut generator, font_name) = open_font(&cli)?;
    cli.print_summary(&font_name);

    if cli.coverage {
        println!("\n{}", generator.coverage());
    }

    let atlas = match cli.atlas_size {
        Some(size) => generator.generate_with_size(size),
        None => generator.generate(),
    }
    .wrap_err_with(|| format!("Failed to build atlas for '{font_name}'"))?;

    print_atlas_summary(&atlas);

    if let Some(output) = &cli.output {
        save_png(&atlas, output)?;
        println!("Atlas image written to {}", output.display());
    }

    Ok(())
}

fn open_font(cli: &Cli) -> Result<(AtlasGenerator<SwashRasterizer>, String)> {
    let options = cli.raster_options();

    match cli.font_source()? {
        FontSource::File(path) => {
            let generator = AtlasGenerator::from_path(path, cli.index, options)
                .wrap_err_with(|| format!("Failed to load font '{}'", path.display()))?;
            Ok((generator, path.display().to_string()))
        },
        FontSource::Family(family) => {
            let discovery = FontDiscovery::new();
            let resolved = discovery
                .find_family(family)
                .unwrap_or_else(|| family.to_string());
            if resolved != family {
                println!("✓ Found font: {resolved} (matched: {family})");
            }

            let generator = AtlasGenerator::from_family(&discovery, &resolved, options)
                .wrap_err_with(|| format!("Failed to load font family '{family}'"))?;
            Ok((generator, resolved))
        },
    }
}

fn print_atlas_summary(atlas: &FontAtlas) {
    println!("\nGlyph atlas generated!");
    println!("Texture size: {}x{}", atlas.width(), atlas.height());
    println!("Glyph count: {}", atlas.glyphs().len());
    println!("Line height: {}px", atlas.line_height());
    println!(
        "Fixed width: {}",
        if atlas.is_fixed_width() { "yes" } else { "no" }
    );

    let used: u64 = atlas.glyphs().values().map(|g| g.rect.area()).sum();
    let total = u64::from(atlas.width()) * u64::from(atlas.height());
    if total > 0 {
        println!(
            "Texture fill: {:.1}%",
            used as f64 / total as f64 * 100.0
        );
    }

    if let Some(overflow) = atlas.overflow() {
        eprintln!("\n⚠️  {overflow}");
        let sample: String = overflow
            .glyphs
            .iter()
            .take(74)
            .map(|&ch| if ch.is_control() || ch.is_whitespace() { '·' } else { ch })
            .collect();
        eprintln!("  {sample}");
        eprintln!("The atlas has aliased glyph regions and is not usable for rendering.");
    }
}
