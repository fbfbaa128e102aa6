//! Binary STL (Stereolithography) support.
//!
//! # Binary Format
//!
//! ```text
//! UINT8[80]    – Header (free text, space padded)
//! UINT32       – Number of triangles
//! foreach triangle
//!     REAL32[3] – Normal vector
//!     REAL32[3] – Vertex 1
//!     REAL32[3] – Vertex 2
//!     REAL32[3] – Vertex 3
//!     UINT16    – Attribute byte count (0)
//! end
//! ```
//!
//! All multi-byte values are little-endian. Normals are written exactly as
//! the mesh stores them; this module never recomputes them.

use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::Path;

use skyline_types::{Point3, Triangle, TriangleMesh, Vector3};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{IoError, IoResult};

/// STL binary header size in bytes.
pub const HEADER_SIZE: usize = 80;

/// Size of one triangle record (normal + 3 vertices + attribute).
pub const TRIANGLE_SIZE: usize = 50;

/// Header text used when the caller does not supply one.
pub const DEFAULT_HEADER: &str = "Binary STL generated by skyline";

/// Expected size in bytes of a binary STL holding `triangle_count` triangles.
///
/// ```
/// assert_eq!(skyline_io::binary_stl_size(0), 84);
/// assert_eq!(skyline_io::binary_stl_size(12), 84 + 12 * 50);
/// ```
#[must_use]
pub const fn binary_stl_size(triangle_count: usize) -> usize {
    HEADER_SIZE + 4 + triangle_count * TRIANGLE_SIZE
}

/// Save a mesh as binary STL with the default header.
///
/// The write is all-or-nothing: records go to a temporary file next to
/// `path`, which is flushed, synced and then renamed over the destination.
/// On any failure the temporary file is removed and `path` is left as it
/// was.
///
/// # Errors
///
/// Returns an error if the destination directory is not writable, the mesh
/// has more than `u32::MAX` triangles, or the final rename fails.
///
/// # Example
///
/// ```no_run
/// use skyline_io::save_stl;
/// use skyline_types::TriangleMesh;
///
/// save_stl(&TriangleMesh::new(), "empty.stl").unwrap();
/// ```
pub fn save_stl<P: AsRef<Path>>(mesh: &TriangleMesh, path: P) -> IoResult<()> {
    save_stl_with_header(mesh, DEFAULT_HEADER, path)
}

/// Save a mesh as binary STL with a custom header text.
///
/// The header is truncated to 80 bytes and padded with spaces.
///
/// # Errors
///
/// See [`save_stl`].
pub fn save_stl_with_header<P: AsRef<Path>>(
    mesh: &TriangleMesh,
    header: &str,
    path: P,
) -> IoResult<()> {
    let path = path.as_ref();
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut temp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        write_stl_with_header(mesh, header, &mut writer)?;
        writer.flush()?;
    }
    temp.as_file().sync_all()?;

    temp.persist(path).map_err(|e| IoError::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;

    info!(
        path = %path.display(),
        triangles = mesh.len(),
        bytes = binary_stl_size(mesh.len()),
        "Wrote binary STL"
    );
    Ok(())
}

/// Write a mesh as binary STL to any writer, using the default header.
///
/// # Errors
///
/// Returns an error if the writer fails or the mesh is too large.
pub fn write_stl<W: Write>(mesh: &TriangleMesh, writer: W) -> IoResult<()> {
    write_stl_with_header(mesh, DEFAULT_HEADER, writer)
}

/// Write a mesh as binary STL to any writer.
///
/// # Errors
///
/// Returns an error if the writer fails or the mesh is too large.
pub fn write_stl_with_header<W: Write>(
    mesh: &TriangleMesh,
    header_text: &str,
    mut writer: W,
) -> IoResult<()> {
    let face_count = u32::try_from(mesh.len())
        .map_err(|_| IoError::TooManyTriangles { count: mesh.len() })?;

    let mut header = [b' '; HEADER_SIZE];
    let text = header_text.as_bytes();
    let n = text.len().min(HEADER_SIZE);
    header[..n].copy_from_slice(&text[..n]);
    writer.write_all(&header)?;

    writer.write_all(&face_count.to_le_bytes())?;

    let mut record = [0u8; TRIANGLE_SIZE];
    for tri in mesh {
        encode_record(tri, &mut record);
        writer.write_all(&record)?;
    }

    debug!(triangles = face_count, "Encoded STL records");
    Ok(())
}

fn encode_record(tri: &Triangle, record: &mut [u8; TRIANGLE_SIZE]) {
    let values = [
        tri.normal.x,
        tri.normal.y,
        tri.normal.z,
        tri.v0.x,
        tri.v0.y,
        tri.v0.z,
        tri.v1.x,
        tri.v1.y,
        tri.v1.z,
        tri.v2.x,
        tri.v2.y,
        tri.v2.z,
    ];
    for (chunk, value) in record.chunks_exact_mut(4).zip(values) {
        #[allow(clippy::cast_possible_truncation)]
        // Truncation: f64 to f32 is intentional for STL format which uses f32
        let value = value as f32;
        chunk.copy_from_slice(&value.to_le_bytes());
    }
    record[48..50].copy_from_slice(&0u16.to_le_bytes());
}

/// Load a mesh from a binary STL file.
///
/// Normals are taken from the file as-is.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is truncated.
pub fn load_stl<P: AsRef<Path>>(path: P) -> IoResult<TriangleMesh> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            IoError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IoError::Io(e)
        }
    })?;

    read_stl(BufReader::new(file))
}

/// Read a binary STL from any reader.
///
/// # Errors
///
/// Returns [`IoError::InvalidHeader`] if fewer than 84 bytes are available
/// and [`IoError::InvalidFaceCount`] if the records end early.
pub fn read_stl<R: Read>(mut reader: R) -> IoResult<TriangleMesh> {
    let mut header = [0u8; HEADER_SIZE + 4];
    let got = read_up_to(&mut reader, &mut header)?;
    if got < header.len() {
        return Err(IoError::InvalidHeader {
            expected: header.len(),
            got,
        });
    }

    let face_count = u32::from_le_bytes([
        header[HEADER_SIZE],
        header[HEADER_SIZE + 1],
        header[HEADER_SIZE + 2],
        header[HEADER_SIZE + 3],
    ]);

    // The count comes from untrusted input; grow past this as records arrive.
    let mut mesh = TriangleMesh::with_capacity(face_count.min(MAX_PREALLOCATED) as usize);
    let mut record = [0u8; TRIANGLE_SIZE];
    for i in 0..face_count {
        if read_up_to(&mut reader, &mut record)? < TRIANGLE_SIZE {
            return Err(IoError::InvalidFaceCount {
                expected: face_count,
                got: i,
            });
        }
        mesh.push(Triangle::with_normal(
            Vector3::from(read_vec3(&record[0..12])),
            Point3::from(read_vec3(&record[12..24])),
            Point3::from(read_vec3(&record[24..36])),
            Point3::from(read_vec3(&record[36..48])),
        ));
    }

    Ok(mesh)
}

/// Upper bound on triangles reserved up front from a header count.
const MAX_PREALLOCATED: u32 = 1 << 16;

/// Fill `buf` as far as the reader allows, returning the byte count.
fn read_up_to<R: Read>(reader: &mut R, buf: &mut [u8]) -> IoResult<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}

/// Read 3 little-endian f32s.
fn read_vec3(buf: &[u8]) -> [f64; 3] {
    let x = f32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
    let y = f32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
    let z = f32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]);
    [f64::from(x), f64::from(y), f64::from(z)]
}
