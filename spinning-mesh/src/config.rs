use crate::colors::ColorSeed;
use crate::geometry::{
    BlobLayout, GeometrySourceConfig, DEFAULT_ASSET_PATH, DEFAULT_INDEX_OFFSET,
    DEFAULT_VERTEX_OFFSET, MAX_BLOB_OFFSET,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum GeometryKind {
    /// the compiled-in arrays
    Inline,
    /// positions and wire indices read from a mesh blob
    Binary,
}

/// Spin a small extruded mesh three ways: filled, wireframe and as line segments.
#[derive(Debug, Parser)]
#[command(name = "spinning-mesh", version)]
pub struct Cli {
    /// where the mesh comes from
    #[arg(long, value_enum, default_value_t = GeometryKind::Inline)]
    pub geometry: GeometryKind,

    /// mesh blob read by `--geometry binary` and written by `pack`
    #[arg(long, default_value = DEFAULT_ASSET_PATH)]
    pub asset: PathBuf,

    /// byte offset of the 108 little-endian i16 positions
    #[arg(long, default_value_t = DEFAULT_VERTEX_OFFSET,
          value_parser = clap::value_parser!(u64).range(..=MAX_BLOB_OFFSET))]
    pub vertex_offset: u64,

    /// byte offset of the 108 u8 wire indices
    #[arg(long, default_value_t = DEFAULT_INDEX_OFFSET,
          value_parser = clap::value_parser!(u64).range(..=MAX_BLOB_OFFSET))]
    pub index_offset: u64,

    /// color seed; the wall clock when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, default_value_t = 1280)]
    pub width: u32,

    #[arg(long, default_value_t = 720)]
    pub height: u32,

    /// env_logger filter, e.g. "debug" or "spinning_mesh=trace"; RUST_LOG otherwise
    #[arg(long)]
    pub log_filter: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// write the compiled-in mesh as a blob for `--geometry binary`
    Pack {
        /// defaults to --asset
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "spinning mesh".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

/// What the render path needs to know, settled before any GL call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DemoConfig {
    pub geometry: GeometrySourceConfig,
    pub color_seed: ColorSeed,
    pub window: WindowSettings,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            geometry: GeometrySourceConfig::Inline,
            color_seed: ColorSeed::WallClock,
            window: WindowSettings::default(),
        }
    }
}

impl Cli {
    pub fn layout(&self) -> BlobLayout {
        BlobLayout {
            vertex_offset: self.vertex_offset,
            index_offset: self.index_offset,
        }
    }

    pub fn demo_config(&self) -> DemoConfig {
        let geometry = match self.geometry {
            GeometryKind::Inline => GeometrySourceConfig::Inline,
            GeometryKind::Binary => GeometrySourceConfig::BinaryOffset {
                path: self.asset.clone(),
                layout: self.layout(),
            },
        };
        DemoConfig {
            geometry,
            color_seed: self.seed.map_or(ColorSeed::WallClock, ColorSeed::Fixed),
            window: WindowSettings {
                width: self.width,
                height: self.height,
                ..WindowSettings::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_means_the_plain_demo() {
        let cli = Cli::try_parse_from(["spinning-mesh"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.demo_config(), DemoConfig::default());
    }

    #[test]
    fn binary_geometry_carries_path_and_offsets() {
        let cli = Cli::try_parse_from([
            "spinning-mesh",
            "--geometry",
            "binary",
            "--asset",
            "mesh.dat",
            "--vertex-offset",
            "0",
            "--index-offset",
            "1024",
            "--seed",
            "9",
        ])
        .unwrap();
        let config = cli.demo_config();
        assert_eq!(
            config.geometry,
            GeometrySourceConfig::BinaryOffset {
                path: PathBuf::from("mesh.dat"),
                layout: BlobLayout {
                    vertex_offset: 0,
                    index_offset: 1024,
                },
            }
        );
        assert_eq!(config.color_seed, ColorSeed::Fixed(9));
    }

    #[test]
    fn pack_subcommand() {
        let cli = Cli::try_parse_from(["spinning-mesh", "pack", "--output", "out.bin"]).unwrap();
        match cli.command {
            Some(Command::Pack { output }) => assert_eq!(output, Some(PathBuf::from("out.bin"))),
            None => panic!("pack not parsed"),
        }
    }

    #[test]
    fn oversized_offsets_are_rejected() {
        assert!(Cli::try_parse_from(["spinning-mesh", "--index-offset", "100000000000"]).is_err());
        assert!(
            Cli::try_parse_from(["spinning-mesh", "--vertex-offset", "18446744073709551515"])
                .is_err()
        );
        let at_limit = MAX_BLOB_OFFSET.to_string();
        let cli = Cli::try_parse_from(["spinning-mesh", "--index-offset", at_limit.as_str()])
            .unwrap();
        assert_eq!(cli.index_offset, MAX_BLOB_OFFSET);
    }

    #[test]
    fn unknown_geometry_is_rejected() {
        assert!(Cli::try_parse_from(["spinning-mesh", "--geometry", "obj"]).is_err());
    }
}
