use std::path::{Path, PathBuf};

use clap::Parser;
use color_eyre::{Report, eyre::eyre};
use glyphshelf_atlas::AtlasSize;
use glyphshelf_rasterizer::{FontDiscovery, RasterOptions};

#[derive(Parser, Debug)]
#[command(
    name = "glyphshelf-atlas",
    about = "Glyph atlas builder",
    long_about = "Rasterizes every glyph a font provides and shelf-packs them into a single power-of-two grayscale texture"
)]
pub struct Cli {
    /// Path to a TTF/OTF file, or the name of an installed font family
    #[arg(value_name = "FONT", required_unless_present = "list_fonts")]
    pub font: Option<String>,

    /// Face index inside a font collection
    #[arg(long, default_value = "0", value_name = "N")]
    pub index: usize,

    /// Font size in pixels per em
    #[arg(short = 's', long, default_value = "14.0", value_name = "PX")]
    pub size: f32,

    /// Disable hinting
    #[arg(long)]
    pub no_hinting: bool,

    /// Force the atlas size instead of deriving it from the glyph area
    #[arg(long, value_name = "WxH", value_parser = parse_atlas_size)]
    pub atlas_size: Option<AtlasSize>,

    /// Write the atlas texture as a grayscale PNG
    #[arg(short = 'o', long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Print the code point ranges the font covers
    #[arg(long)]
    pub coverage: bool,

    /// List installed font families and exit
    #[arg(short = 'L', long)]
    pub list_fonts: bool,
}

/// Where the font comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSource<'a> {
    File(&'a Path),
    Family(&'a str),
}

impl Cli {
    pub fn raster_options(&self) -> RasterOptions {
        RasterOptions::new(self.size).hinting(!self.no_hinting)
    }

    /// Treats the font argument as a file path if such a file exists,
    /// otherwise as a family name.
    pub fn font_source(&self) -> Result<FontSource<'_>, Report> {
        let font = self
            .font
            .as_deref()
            .ok_or_else(|| eyre!("Font selection required"))?;

        let path = Path::new(font);
        if path.is_file() {
            Ok(FontSource::File(path))
        } else {
            Ok(FontSource::Family(font))
        }
    }

    /// Displays the list of installed font families
    pub fn display_font_list() {
        println!("Discovering fonts...");
        let discovery = FontDiscovery::new();
        let families = discovery.list_families();

        if families.is_empty() {
            println!("No fonts found!");
            return;
        }

        let monospace = discovery.monospace_families();

        println!("\n{:<4} {:<5} Font Name", "ID", "Mono");
        println!("{}", "-".repeat(50));

        for (i, family) in families.iter().enumerate() {
            let mono = if monospace.contains(family) { "*" } else { "" };
            println!("{:<4} {mono:<5} {family}", i + 1);
        }

        println!("\nTotal: {} font families", families.len());
    }

    /// Validates the CLI arguments
    pub fn validate(&self) -> Result<(), Report> {
        if !(self.size > 0.0 && self.size.is_finite()) {
            return Err(eyre!("Font size must be positive"));
        }

        if let Some(output) = &self.output {
            if output.is_dir() {
                return Err(eyre!("Output path '{}' is a directory", output.display()));
            }
        }

        Ok(())
    }

    /// Prints a summary of the configuration
    pub fn print_summary(&self, font_name: &str) {
        println!("\nGenerating glyph atlas:");
        println!("  Font: {font_name}");
        if self.index != 0 {
            println!("  Face index: {}", self.index);
        }
        println!("  Size: {}px", self.size);
        println!("  Hinting: {}", if self.no_hinting { "off" } else { "full" });

        if let Some(size) = self.atlas_size {
            println!("  Atlas size: {}x{} (forced)", size.width, size.height);
        }

        if let Some(output) = &self.output {
            println!("  Output: {}", output.display());
        }
    }
}

fn parse_atlas_size(s: &str) -> Result<AtlasSize, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("Invalid atlas size '{s}'. Expected format: 512x256"))?;

    let parse = |v: &str| match v.trim().parse::<u32>() {
        Ok(0) => Err(format!("Atlas dimensions must be positive, got '{s}'")),
        Ok(n) => Ok(n),
        Err(e) => Err(format!("Invalid dimension '{v}': {e}")),
    };

    Ok(AtlasSize::new(parse(w)?, parse(h)?))
}
