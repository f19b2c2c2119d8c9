//! The 1024 byte MRC2014 header
//!
//! Only the fields needed to interpret and reproduce the voxel data are kept.
//! Everything is stored as 4 byte words with the byte order given by the
//! machine stamp.
//!
//! ```text
//! word  offset  field
//!  1-3     0    NX NY NZ        columns, rows, sections
//!  4      12    MODE            data type
//!  5-7    16    NXSTART ...     index of first column, row, section
//!  8-10   28    MX MY MZ        sampling along each axis
//! 11-13   40    CELLA           cell dimensions in angstroms
//! 14-16   52    CELLB           cell angles in degrees
//! 17-19   64    MAPC MAPR MAPS  axis corresponding to columns, rows, sections
//! 20-22   76    DMIN DMAX DMEAN
//! 23      88    ISPG            space group
//! 24      92    NSYMBT          extended header length in bytes
//! 27     104    EXTTYP
//! 28     108    NVERSION
//! 50-52  196    ORIGIN
//! 53     208    MAP             "MAP "
//! 54     212    MACHST          machine stamp
//! 55     216    RMS
//! 56     220    NLABL
//! 57-256 224    LABEL(20,10)    ten 80 character labels
//! ```

// crate modules
use crate::error::{Error, Result};

// tomokit modules
use tomokit_utils::f;

// external crates
use log::warn;

/// Total length of the main header in bytes
pub const HEADER_LENGTH: usize = 1024;

/// Length of a single text label in bytes
const LABEL_LENGTH: usize = 80;

/// Maximum number of labels
const MAX_LABELS: usize = 10;

/// Supported MRC data modes
///
/// These are the element types used by tomograms and segmentations in
/// practice. Complex and packed 4-bit modes are not supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// 8-bit signed integer (mode 0)
    Int8,
    /// 16-bit signed integer (mode 1)
    Int16,
    /// 32-bit float (mode 2)
    Float32,
    /// 16-bit unsigned integer (mode 6)
    Uint16,
}

impl Mode {
    /// Number of bytes for one voxel of this mode
    pub fn byte_size(&self) -> usize {
        match self {
            Self::Int8 => 1,
            Self::Int16 | Self::Uint16 => 2,
            Self::Float32 => 4,
        }
    }

    /// Mode number as written to the header
    pub fn number(&self) -> i32 {
        match self {
            Self::Int8 => 0,
            Self::Int16 => 1,
            Self::Float32 => 2,
            Self::Uint16 => 6,
        }
    }
}

impl TryFrom<i32> for Mode {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self> {
        match value {
            0 => Ok(Self::Int8),
            1 => Ok(Self::Int16),
            2 => Ok(Self::Float32),
            6 => Ok(Self::Uint16),
            _ => Err(Error::UnsupportedMode(value)),
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Float32 => "float32",
            Self::Uint16 => "uint16",
        };
        write!(f, "{s} (mode {})", self.number())
    }
}

/// Byte ordering of all header words and voxel data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endian {
    /// Little endian, machine stamp `0x44 0x44`
    #[default]
    Little,
    /// Big endian, machine stamp `0x11 0x11`
    Big,
}

impl Endian {
    /// Machine stamp bytes for this byte order
    pub fn machine_stamp(&self) -> [u8; 4] {
        match self {
            Self::Little => [0x44, 0x44, 0x00, 0x00],
            Self::Big => [0x11, 0x11, 0x00, 0x00],
        }
    }

    /// Decide the byte order from the header bytes
    ///
    /// The machine stamp is trusted when set. Old files without one are
    /// checked for a sensible mode number in either byte order.
    fn detect(bytes: &[u8]) -> Self {
        match bytes[212] {
            0x44 => return Self::Little,
            0x11 => return Self::Big,
            _ => (),
        }

        let mode = [bytes[12], bytes[13], bytes[14], bytes[15]];
        if Mode::try_from(i32::from_le_bytes(mode)).is_ok() {
            warn!("Missing machine stamp, assuming little endian");
            Self::Little
        } else {
            warn!("Missing machine stamp, assuming big endian");
            Self::Big
        }
    }

    fn read_i32(&self, bytes: &[u8], offset: usize) -> i32 {
        let word = [
            bytes[offset],
            bytes[offset + 1],
            bytes[offset + 2],
            bytes[offset + 3],
        ];
        match self {
            Self::Little => i32::from_le_bytes(word),
            Self::Big => i32::from_be_bytes(word),
        }
    }

    fn read_f32(&self, bytes: &[u8], offset: usize) -> f32 {
        f32::from_bits(self.read_i32(bytes, offset) as u32)
    }
}

/// Header information of an MRC file
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    /// Number of columns, rows, and sections
    pub dimensions: [i32; 3],
    /// Data type of every voxel
    pub mode: Mode,
    /// Index of the first column, row, and section
    pub start: [i32; 3],
    /// Number of intervals along each cell axis
    pub sampling: [i32; 3],
    /// Cell dimensions in angstroms
    pub cell_lengths: [f32; 3],
    /// Cell angles in degrees
    pub cell_angles: [f32; 3],
    /// Axis (1, 2, 3 for x, y, z) that columns, rows, and sections run along
    pub axis_order: [i32; 3],
    /// Minimum density value
    pub dmin: f32,
    /// Maximum density value
    pub dmax: f32,
    /// Mean density value
    pub dmean: f32,
    /// Space group number, 1 for a single volume
    pub space_group: i32,
    /// Number of bytes in the extended header
    pub extended_length: i32,
    /// Extended header type
    pub extended_type: [u8; 4],
    /// Format version, 20140 for MRC2014
    pub version: i32,
    /// Origin of the volume in angstroms
    pub origin: [f32; 3],
    /// Byte order of the file
    pub endian: Endian,
    /// RMS deviation of densities from the mean
    pub rms: f32,
    /// Text labels
    pub labels: Vec<String>,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            dimensions: [1, 1, 1],
            mode: Mode::Float32,
            start: [0, 0, 0],
            sampling: [1, 1, 1],
            cell_lengths: [1.0, 1.0, 1.0],
            cell_angles: [90.0, 90.0, 90.0],
            axis_order: [1, 2, 3],
            dmin: 0.0,
            dmax: 0.0,
            dmean: 0.0,
            space_group: 1,
            extended_length: 0,
            extended_type: [0; 4],
            version: 20140,
            origin: [0.0, 0.0, 0.0],
            endian: Endian::Little,
            rms: 0.0,
            labels: Vec::new(),
        }
    }
}

impl Header {
    /// Number of voxels described by the header
    ///
    /// Fails with [Error::InvalidDimensions] if the count does not fit in a
    /// `usize`.
    pub fn number_of_voxels(&self) -> Result<usize> {
        self.dimensions
            .iter()
            .try_fold(1_usize, |n, d| n.checked_mul(usize::try_from(*d).ok()?))
            .ok_or_else(|| Error::InvalidDimensions(self.dimensions.map(i64::from)))
    }

    /// Expected length of the voxel data block in bytes
    pub fn data_byte_length(&self) -> Result<usize> {
        self.number_of_voxels()?
            .checked_mul(self.mode.byte_size())
            .ok_or_else(|| Error::InvalidDimensions(self.dimensions.map(i64::from)))
    }

    /// Offset of the first voxel from the start of the file
    pub fn data_offset(&self) -> usize {
        HEADER_LENGTH + self.extended_length.max(0) as usize
    }

    /// Voxel size in angstroms along x, y, and z
    ///
    /// Falls back to 1.0 for any axis with no sampling information.
    pub fn voxel_size(&self) -> [f32; 3] {
        let mut size = [1.0; 3];
        for (i, s) in size.iter_mut().enumerate() {
            if self.sampling[i] > 0 && self.cell_lengths[i] > 0.0 {
                *s = self.cell_lengths[i] / self.sampling[i] as f32;
            }
        }
        size
    }

    /// Interpret the first 1024 bytes of an MRC file
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_LENGTH {
            return Err(Error::UnexpectedByteLength {
                expected: HEADER_LENGTH,
                found: bytes.len(),
            });
        }

        let endian = Endian::detect(bytes);
        let int = |offset: usize| endian.read_i32(bytes, offset);
        let float = |offset: usize| endian.read_f32(bytes, offset);

        let dimensions = [int(0), int(4), int(8)];
        if dimensions.iter().any(|d| *d < 1) {
            return Err(Error::InvalidDimensions(dimensions.map(i64::from)));
        }

        let mode = Mode::try_from(int(12))?;

        if &bytes[208..212] != b"MAP " {
            warn!("Missing \"MAP \" identifier, file may predate MRC2014");
        }

        // 0 is common in old files and means the standard ordering
        let axis_order = match [int(64), int(68), int(72)] {
            [0, 0, 0] => [1, 2, 3],
            [1, 2, 3] => [1, 2, 3],
            other => {
                return Err(Error::UnrecognisedHeader(f!(
                    "axis order {other:?} is not supported"
                )))
            }
        };

        let extended_length = int(92);
        if extended_length < 0 {
            return Err(Error::UnrecognisedHeader(f!(
                "negative extended header length {extended_length}"
            )));
        }

        let n_labels = (int(220).clamp(0, MAX_LABELS as i32)) as usize;
        let labels = (0..n_labels)
            .map(|i| {
                let start = 224 + i * LABEL_LENGTH;
                String::from_utf8_lossy(&bytes[start..start + LABEL_LENGTH])
                    .trim_end_matches(|c: char| c == '\0' || c == ' ')
                    .to_string()
            })
            .collect();

        Ok(Self {
            dimensions,
            mode,
            start: [int(16), int(20), int(24)],
            sampling: [int(28), int(32), int(36)],
            cell_lengths: [float(40), float(44), float(48)],
            cell_angles: [float(52), float(56), float(60)],
            axis_order,
            dmin: float(76),
            dmax: float(80),
            dmean: float(84),
            space_group: int(88),
            extended_length,
            extended_type: [bytes[104], bytes[105], bytes[106], bytes[107]],
            version: int(108),
            origin: [float(196), float(200), float(204)],
            endian,
            rms: float(216),
            labels,
        })
    }

    /// Encode the header into 1024 bytes
    ///
    /// Always written little endian. Labels beyond the tenth and characters
    /// beyond the eightieth are dropped.
    pub fn to_bytes(&self) -> [u8; HEADER_LENGTH] {
        let mut bytes = [0u8; HEADER_LENGTH];
        let mut put = |offset: usize, word: [u8; 4]| {
            bytes[offset..offset + 4].copy_from_slice(&word);
        };

        for i in 0..3 {
            put(i * 4, self.dimensions[i].to_le_bytes());
            put(16 + i * 4, self.start[i].to_le_bytes());
            put(28 + i * 4, self.sampling[i].to_le_bytes());
            put(40 + i * 4, self.cell_lengths[i].to_le_bytes());
            put(52 + i * 4, self.cell_angles[i].to_le_bytes());
            put(64 + i * 4, self.axis_order[i].to_le_bytes());
            put(196 + i * 4, self.origin[i].to_le_bytes());
        }

        put(12, self.mode.number().to_le_bytes());
        put(76, self.dmin.to_le_bytes());
        put(80, self.dmax.to_le_bytes());
        put(84, self.dmean.to_le_bytes());
        put(88, self.space_group.to_le_bytes());
        put(92, self.extended_length.to_le_bytes());
        put(104, self.extended_type);
        put(108, self.version.to_le_bytes());
        put(208, *b"MAP ");
        put(212, Endian::Little.machine_stamp());
        put(216, self.rms.to_le_bytes());

        let labels = &self.labels[..self.labels.len().min(MAX_LABELS)];
        put(220, (labels.len() as i32).to_le_bytes());

        for (i, label) in labels.iter().enumerate() {
            let start = 224 + i * LABEL_LENGTH;
            let text = label.as_bytes();
            let n = text.len().min(LABEL_LENGTH);
            bytes[start..start + n].copy_from_slice(&text[..n]);
        }

        bytes
    }
}

impl std::fmt::Display for Header {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut s = "Header {\n".to_string();
        s += &f!("    dimensions: {:?}\n", self.dimensions);
        s += &f!("    mode: {}\n", self.mode);
        s += &f!("    voxel size: {:?}\n", self.voxel_size());
        s += &f!("    origin: {:?}\n", self.origin);
        s += &f!("    byte order: {:?}\n", self.endian);
        s += &f!("    extended header: {} bytes\n", self.extended_length);
        s += &f!("    labels: {}\n}}", self.labels.len());
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_bytes_round_trip() {
        let header = Header {
            dimensions: [10, 20, 30],
            mode: Mode::Int16,
            sampling: [10, 20, 30],
            cell_lengths: [20.0, 60.0, 120.0],
            origin: [1.0, 2.0, 3.0],
            labels: vec!["cropped".to_string()],
            ..Default::default()
        };

        let decoded = Header::from_bytes(&header.to_bytes()).unwrap();
        assert_eq!(decoded, header);
        assert_eq!(decoded.voxel_size(), [2.0, 3.0, 4.0]);
    }

    #[test]
    fn big_endian_header() {
        let mut bytes = [0u8; HEADER_LENGTH];
        for (i, value) in [4_i32, 5, 6, 2].iter().enumerate() {
            bytes[i * 4..i * 4 + 4].copy_from_slice(&value.to_be_bytes());
        }
        bytes[212] = 0x11;
        bytes[213] = 0x11;

        let header = Header::from_bytes(&bytes).unwrap();
        assert_eq!(header.endian, Endian::Big);
        assert_eq!(header.dimensions, [4, 5, 6]);
        assert_eq!(header.mode, Mode::Float32);
        assert_eq!(header.voxel_size(), [1.0, 1.0, 1.0]);
    }

    #[test]
    fn unknown_mode() {
        let header = Header {
            dimensions: [2, 2, 2],
            ..Default::default()
        };
        let mut bytes = header.to_bytes();
        bytes[12..16].copy_from_slice(&4_i32.to_le_bytes());

        assert!(matches!(
            Header::from_bytes(&bytes),
            Err(Error::UnsupportedMode(4))
        ));
    }

    #[test]
    fn zero_dimension() {
        let header = Header {
            dimensions: [2, 0, 2],
            ..Default::default()
        };

        assert!(matches!(
            Header::from_bytes(&header.to_bytes()),
            Err(Error::InvalidDimensions([2, 0, 2]))
        ));
    }

    #[test]
    fn short_header() {
        assert!(matches!(
            Header::from_bytes(&[0u8; 100]),
            Err(Error::UnexpectedByteLength {
                expected: 1024,
                found: 100
            })
        ));
    }
}
