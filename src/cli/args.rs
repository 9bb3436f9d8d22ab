// ABOUTME: Command line argument definitions and parsing using Clap
// ABOUTME: Defines the input/output flags and derives the default image path

use clap::Parser;
use std::path::{Path, PathBuf};

use super::commands::resolve_image_path;
use crate::export::render::IMAGE_FORMAT;

#[derive(Parser, Debug)]
#[command(name = "argoviz")]
#[command(about = "Create a diagram of an Argo workflow template's dag tasks or steps")]
#[command(version)]
pub struct Args {
    #[arg(long = "input-file", help = "Path to the YAML input file")]
    pub input_file: PathBuf,

    #[arg(
        long = "output-file",
        help = "Path to the output PNG file. Defaults to the input file with the .png extension"
    )]
    pub output_file: Option<PathBuf>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(short, long, help = "Path to configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Disable colored output")]
    pub no_color: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Image path: the explicit `--output-file`, or the input path with a
    /// `.png` extension.
    pub fn image_path(&self) -> PathBuf {
        resolve_image_path(&self.input_file, self.output_file.as_deref())
    }
}

pub fn default_image_path(input_file: &Path) -> PathBuf {
    input_file.with_extension(IMAGE_FORMAT)
}
