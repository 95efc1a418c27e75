use crate::errors::{GeometryLoadError, GeometryLoadReason};
use crate::mesh_data::{SOLID_INDICES, VERTEX_COUNT, VERTEX_POSITIONS, WIRE_INDICES};
use gl::types::{GLfloat, GLuint};
use itertools::Itertools;
use std::fs::File;
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

pub const POSITION_VALUES: usize = VERTEX_COUNT * 3;
pub const WIRE_INDEX_COUNT: usize = 108;

/// bytes of little-endian i16 positions in a mesh blob
pub const POSITION_BYTES: usize = POSITION_VALUES * 2;
/// bytes of u8 wire indices in a mesh blob
pub const WIRE_INDEX_BYTES: usize = WIRE_INDEX_COUNT;

pub const DEFAULT_ASSET_PATH: &str = "assets/mesh.bin";
pub const DEFAULT_VERTEX_OFFSET: u64 = 64;
pub const DEFAULT_INDEX_OFFSET: u64 = 512;
/// Offsets past this are refused; `pack` builds the whole blob in memory.
pub const MAX_BLOB_OFFSET: u64 = 16 << 20;

/// Everything the render context uploads, ready for GL.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshGeometry {
    pub positions: Vec<GLfloat>,
    pub solid_indices: Vec<GLuint>,
    pub wire_indices: Vec<GLuint>,
}

impl MeshGeometry {
    pub fn from_parts(
        positions: &[i16],
        solid_indices: &[u8],
        wire_indices: &[u8],
    ) -> Result<Self, GeometryLoadError> {
        let rval = Self {
            positions: positions.iter().map(|&p| p as GLfloat).collect(),
            solid_indices: solid_indices.iter().map(|&i| i as GLuint).collect(),
            wire_indices: wire_indices.iter().map(|&i| i as GLuint).collect(),
        };
        rval.check_indices()?;
        Ok(rval)
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn vertices(&self) -> impl Iterator<Item = [GLfloat; 3]> + '_ {
        self.positions
            .iter()
            .copied()
            .tuples()
            .map(|(x, y, z)| [x, y, z])
    }

    /// every index, in both sets, has to name an existing vertex
    pub fn check_indices(&self) -> Result<(), GeometryLoadError> {
        let vertex_count = self.vertex_count();
        let bad = self
            .solid_indices
            .iter()
            .chain(self.wire_indices.iter())
            .find_position(|&&i| i as usize >= vertex_count);
        match bad {
            Some((position, &value)) => Err(GeometryLoadReason::IndexOutOfRange {
                position,
                value,
                vertex_count,
            }
            .into()),
            None => Ok(()),
        }
    }

    /// (min, max) corners, for the log
    pub fn bounds(&self) -> Option<([GLfloat; 3], [GLfloat; 3])> {
        self.vertices().fold(None, |acc, v| {
            let (mut lo, mut hi) = acc.unwrap_or((v, v));
            for axis in 0..3 {
                lo[axis] = lo[axis].min(v[axis]);
                hi[axis] = hi[axis].max(v[axis]);
            }
            Some((lo, hi))
        })
    }
}

//

/// Where the mesh comes from.  Picked once, at startup.
pub trait GeometrySource {
    fn describe(&self) -> String;

    fn load(&self) -> Result<MeshGeometry, GeometryLoadError>;
}

/// The compiled-in arrays
pub struct InlineGeometry;

impl GeometrySource for InlineGeometry {
    fn describe(&self) -> String {
        "inline constants".to_string()
    }

    fn load(&self) -> Result<MeshGeometry, GeometryLoadError> {
        MeshGeometry::from_parts(&VERTEX_POSITIONS, &SOLID_INDICES, &WIRE_INDICES)
    }
}

//

/// Byte offsets of the two ranges inside a mesh blob.
///
/// A blob has no header.  `[vertex_offset, vertex_offset + 216)` holds 108
/// little-endian `i16` positions and `[index_offset, index_offset + 108)`
/// holds 108 `u8` wire indices.  Anything else in the file is ignored.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BlobLayout {
    pub vertex_offset: u64,
    pub index_offset: u64,
}

impl Default for BlobLayout {
    fn default() -> Self {
        Self {
            vertex_offset: DEFAULT_VERTEX_OFFSET,
            index_offset: DEFAULT_INDEX_OFFSET,
        }
    }
}

impl BlobLayout {
    pub fn vertex_end(&self) -> u64 {
        self.vertex_offset.saturating_add(POSITION_BYTES as u64)
    }

    pub fn index_end(&self) -> u64 {
        self.index_offset.saturating_add(WIRE_INDEX_BYTES as u64)
    }

    /// the smallest file that holds both ranges
    pub fn file_len(&self) -> u64 {
        self.vertex_end().max(self.index_end())
    }

    pub fn check(&self) -> Result<(), GeometryLoadError> {
        if let Some(&offset) = [self.vertex_offset, self.index_offset]
            .iter()
            .find(|&&offset| offset > MAX_BLOB_OFFSET)
        {
            return Err(GeometryLoadReason::LayoutTooLarge {
                offset,
                limit: MAX_BLOB_OFFSET,
            }
            .into());
        }

        let overlaps =
            self.vertex_offset < self.index_end() && self.index_offset < self.vertex_end();
        if overlaps {
            Err(GeometryLoadReason::OverlappingRanges.into())
        } else {
            Ok(())
        }
    }
}

/// Positions and wire indices read from a mesh blob; the solid
/// triangulation is always the compiled-in one.
pub struct BinaryOffsetGeometry {
    pub path: PathBuf,
    pub layout: BlobLayout,
}

impl BinaryOffsetGeometry {
    pub fn new(path: impl Into<PathBuf>, layout: BlobLayout) -> Self {
        Self {
            path: path.into(),
            layout,
        }
    }

    pub fn read_from<R: Read + Seek>(
        reader: &mut R,
        layout: &BlobLayout,
    ) -> Result<MeshGeometry, GeometryLoadError> {
        layout.check()?;

        let mut position_bytes = [0u8; POSITION_BYTES];
        read_section(reader, "vertex positions", layout.vertex_offset, &mut position_bytes)?;

        let mut wire_indices = [0u8; WIRE_INDEX_BYTES];
        read_section(reader, "wire indices", layout.index_offset, &mut wire_indices)?;

        let positions = position_bytes
            .chunks_exact(2)
            .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
            .collect::<Vec<_>>();

        MeshGeometry::from_parts(&positions, &SOLID_INDICES, &wire_indices)
    }
}

impl GeometrySource for BinaryOffsetGeometry {
    fn describe(&self) -> String {
        format!(
            "{} (positions @{}, wire indices @{})",
            self.path.display(),
            self.layout.vertex_offset,
            self.layout.index_offset
        )
    }

    fn load(&self) -> Result<MeshGeometry, GeometryLoadError> {
        let mut file = File::open(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => GeometryLoadReason::NotFound(self.path.clone()),
            _ => GeometryLoadReason::Io(e),
        })?;
        Self::read_from(&mut file, &self.layout)
    }
}

fn read_section<R: Read + Seek>(
    reader: &mut R,
    section: &'static str,
    offset: u64,
    dest: &mut [u8],
) -> Result<(), GeometryLoadError> {
    reader
        .seek(SeekFrom::Start(offset))
        .map_err(GeometryLoadReason::Io)?;
    let wanted = dest.len();
    reader.read_exact(dest).map_err(|e| match e.kind() {
        ErrorKind::UnexpectedEof => GeometryLoadReason::Truncated {
            section,
            offset,
            wanted,
        },
        _ => GeometryLoadReason::Io(e),
    })?;
    Ok(())
}

/// Write the compiled-in mesh as a blob with the given layout.  Bytes outside
/// the two ranges are zero.
pub fn write_mesh_blob<W: Write>(
    writer: &mut W,
    layout: &BlobLayout,
) -> Result<(), GeometryLoadError> {
    layout.check()?;

    let mut blob = vec![0u8; layout.file_len() as usize];
    let positions = VERTEX_POSITIONS
        .iter()
        .flat_map(|p| p.to_le_bytes())
        .collect::<Vec<_>>();
    let vertex_start = layout.vertex_offset as usize;
    blob[vertex_start..vertex_start + POSITION_BYTES].copy_from_slice(&positions);
    let index_start = layout.index_offset as usize;
    blob[index_start..index_start + WIRE_INDEX_BYTES].copy_from_slice(&WIRE_INDICES);

    writer.write_all(&blob).map_err(GeometryLoadReason::Io)?;
    Ok(())
}

pub fn pack_mesh_blob(path: &Path, layout: &BlobLayout) -> Result<(), GeometryLoadError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(GeometryLoadReason::Io)?;
    }
    let mut file = File::create(path).map_err(GeometryLoadReason::Io)?;
    write_mesh_blob(&mut file, layout)?;
    log::info!(
        "wrote {} bytes of mesh data to {}",
        layout.file_len(),
        path.display()
    );
    Ok(())
}

//

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GeometrySourceConfig {
    Inline,
    BinaryOffset { path: PathBuf, layout: BlobLayout },
}

impl GeometrySourceConfig {
    pub fn into_source(self) -> Box<dyn GeometrySource> {
        match self {
            GeometrySourceConfig::Inline => Box::new(InlineGeometry),
            GeometrySourceConfig::BinaryOffset { path, layout } => {
                Box::new(BinaryOffsetGeometry::new(path, layout))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn blob(layout: &BlobLayout) -> Vec<u8> {
        let mut rval = Vec::new();
        write_mesh_blob(&mut rval, layout).unwrap();
        rval
    }

    #[test]
    fn constant_indices_name_existing_vertices() {
        assert_eq!(VERTEX_POSITIONS.len(), VERTEX_COUNT * 3);
        for &i in SOLID_INDICES.iter().chain(WIRE_INDICES.iter()) {
            assert!((i as usize) < VERTEX_COUNT, "index {} out of range", i);
        }
        // triangles and segments come in whole groups
        assert_eq!(SOLID_INDICES.len() % 3, 0);
        assert_eq!(WIRE_INDICES.len() % 2, 0);
    }

    #[test]
    fn inline_source_loads_the_whole_mesh() {
        let mesh = InlineGeometry.load().unwrap();
        assert_eq!(mesh.vertex_count(), 36);
        assert_eq!(mesh.solid_indices.len(), 204);
        assert_eq!(mesh.wire_indices.len(), 108);
        assert_eq!(mesh.vertices().next(), Some([-26.0, -42.0, 144.0]));
        let (lo, hi) = mesh.bounds().unwrap();
        assert_eq!(lo, [-52.0, -42.0, 144.0]);
        assert_eq!(hi, [62.0, 51.0, 154.0]);
    }

    #[test]
    fn blob_reads_back_as_the_inline_mesh() {
        let layout = BlobLayout::default();
        let bytes = blob(&layout);
        assert_eq!(bytes.len() as u64, layout.file_len());
        let mesh = BinaryOffsetGeometry::read_from(&mut Cursor::new(bytes), &layout).unwrap();
        assert_eq!(mesh, InlineGeometry.load().unwrap());
    }

    #[test]
    fn positions_are_little_endian_i16() {
        let layout = BlobLayout {
            vertex_offset: 0,
            index_offset: POSITION_BYTES as u64,
        };
        let bytes = blob(&layout);
        // -26 as i16 LE
        assert_eq!(&bytes[0..2], &[0xe6, 0xff]);
        assert_eq!(bytes[POSITION_BYTES], WIRE_INDICES[0]);
    }

    #[test]
    fn short_file_is_truncated_not_zero_filled() {
        let layout = BlobLayout::default();
        let mut bytes = blob(&layout);
        bytes.truncate((layout.index_offset + 107) as usize);
        let err = BinaryOffsetGeometry::read_from(&mut Cursor::new(bytes), &layout).unwrap_err();
        assert!(err.is_truncated(), "{}", err);
        match err.reason {
            GeometryLoadReason::Truncated { section, .. } => assert_eq!(section, "wire indices"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn empty_file_is_truncated_at_the_positions() {
        let layout = BlobLayout::default();
        let err = BinaryOffsetGeometry::read_from(&mut Cursor::new(Vec::new()), &layout).unwrap_err();
        match err.reason {
            GeometryLoadReason::Truncated { section, .. } => {
                assert_eq!(section, "vertex positions")
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn missing_file_is_not_found() {
        let source = BinaryOffsetGeometry::new(
            "this/path/does/not/exist/mesh.bin",
            BlobLayout::default(),
        );
        let err = source.load().unwrap_err();
        assert!(err.is_not_found(), "{}", err);
    }

    #[test]
    fn bad_index_in_file_is_rejected() {
        let layout = BlobLayout::default();
        let mut bytes = blob(&layout);
        bytes[layout.index_offset as usize + 5] = 36;
        let err = BinaryOffsetGeometry::read_from(&mut Cursor::new(bytes), &layout).unwrap_err();
        match err.reason {
            GeometryLoadReason::IndexOutOfRange { value, .. } => assert_eq!(value, 36),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn overlapping_layout_is_rejected() {
        let layout = BlobLayout {
            vertex_offset: 0,
            index_offset: 100,
        };
        assert!(matches!(
            layout.check().unwrap_err().reason,
            GeometryLoadReason::OverlappingRanges
        ));
        assert!(write_mesh_blob(&mut Vec::new(), &layout).is_err());
    }

    #[test]
    fn huge_offsets_are_refused_without_panicking() {
        for layout in [
            BlobLayout {
                vertex_offset: u64::MAX - 100,
                index_offset: 0,
            },
            BlobLayout {
                vertex_offset: 0,
                index_offset: u64::MAX,
            },
            BlobLayout {
                vertex_offset: 0,
                index_offset: 100_000_000_000,
            },
        ] {
            let err = write_mesh_blob(&mut Vec::new(), &layout).unwrap_err();
            assert!(
                matches!(err.reason, GeometryLoadReason::LayoutTooLarge { .. }),
                "{}",
                err
            );

            let err = BinaryOffsetGeometry::read_from(&mut Cursor::new(Vec::new()), &layout)
                .unwrap_err();
            assert!(
                matches!(err.reason, GeometryLoadReason::LayoutTooLarge { .. }),
                "{}",
                err
            );
        }
    }

    #[test]
    fn offsets_at_the_limit_still_pack() {
        let layout = BlobLayout {
            vertex_offset: 0,
            index_offset: MAX_BLOB_OFFSET,
        };
        let bytes = blob(&layout);
        assert_eq!(bytes.len() as u64, MAX_BLOB_OFFSET + WIRE_INDEX_BYTES as u64);
        let mesh = BinaryOffsetGeometry::read_from(&mut Cursor::new(bytes), &layout).unwrap();
        assert_eq!(mesh.wire_indices.len(), WIRE_INDEX_COUNT);
    }

    #[test]
    fn config_picks_the_source() {
        let inline = GeometrySourceConfig::Inline.into_source();
        assert_eq!(inline.describe(), "inline constants");
        let binary = GeometrySourceConfig::BinaryOffset {
            path: PathBuf::from("assets/mesh.bin"),
            layout: BlobLayout::default(),
        }
        .into_source();
        assert!(binary.describe().starts_with("assets/mesh.bin"));
    }
}
